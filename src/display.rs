use std::fmt::Write;

use crate::compare::compare_salary;
use crate::models::vacancy::{VacancyRecord, VacancySet};

/// Characters of description shown on a detail card.
pub const DESCRIPTION_BUDGET: usize = 100;

const RULE: &str = "__________________________________________________________________________________";

/// Numbered `N. title — salary currency` lines for the first `top` records.
pub fn short_list(records: &VacancySet, top: usize) -> String {
    let mut out = String::new();
    for (position, record) in records.records().take(top).enumerate() {
        let _ = writeln!(
            out,
            "{}. {} — {} {}",
            position + 1,
            record.title,
            salary_text(record),
            record.currency
        );
    }
    out
}

pub fn detail_card(record: &VacancyRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Title: {}", record.title);
    let _ = writeln!(out, "Salary: {} {}", salary_text(record), record.currency);
    let _ = writeln!(out, "Published: {}", record.published_at_text());
    match record.description.as_deref() {
        Some(text) => {
            let _ = writeln!(out, "Description: {}", truncate_description(text));
            let _ = writeln!(out, "(Read more at the vacancy link)");
        }
        None => {
            let _ = writeln!(out, "No description");
        }
    }
    let _ = writeln!(out, "Vacancy link: {}", record.url);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "City: {}", record.city);
    let _ = writeln!(out, "Employer: {}", record.employer.name);
    let _ = writeln!(out, "Employer link: {}", record.employer.url);
    let _ = writeln!(out, "{RULE}");
    out
}

/// Both detail cards followed by the salary verdict.
pub fn comparison_report(first: &VacancyRecord, second: &VacancyRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "First vacancy");
    out.push_str(&detail_card(first));
    let _ = writeln!(out, "Second vacancy");
    out.push_str(&detail_card(second));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", compare_salary(first, second));
    out
}

/// Cut to [`DESCRIPTION_BUDGET`] characters, marking the cut with `...`.
pub fn truncate_description(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_BUDGET) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn salary_text(record: &VacancyRecord) -> String {
    record
        .salary
        .map(|s| s.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vacancy::tests::record;

    #[test]
    fn short_list_stops_at_top() {
        let set: VacancySet = (1..=5)
            .map(|n| (format!("item {n}"), record(&format!("V{n}"), Some(n * 1000), "X")))
            .collect();

        let out = short_list(&set, 2);
        assert_eq!(out, "1. V1 — 1000 RUB\n2. V2 — 2000 RUB\n");
    }

    #[test]
    fn truncates_by_characters() {
        let long = "я".repeat(150);
        let cut = truncate_description(&long);

        assert_eq!(cut.chars().count(), DESCRIPTION_BUDGET + 3);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate_description("short"), "short");
    }

    #[test]
    fn card_without_description() {
        let card = detail_card(&record("A", Some(1), "Acme"));

        assert!(card.contains("No description"));
        assert!(card.contains("Employer: Acme"));
        assert!(card.contains("Published: 2024-01-15 10:30:00"));
    }

    #[test]
    fn comparison_shows_both_cards_before_verdict() {
        let report = comparison_report(
            &record("Lead", Some(200000), "Acme"),
            &record("Junior", Some(90000), "Globex"),
        );

        let first = report.find("Title: Lead").unwrap();
        let second = report.find("Title: Junior").unwrap();
        let verdict = report
            .find("Salary of 'Lead' is higher than 'Junior' by 110000 RUB.")
            .unwrap();
        assert!(first < second && second < verdict);
        assert!(report.contains("Employer: Globex"));
    }

    #[test]
    fn card_points_to_full_listing() {
        let mut r = record("A", Some(1), "Acme");
        r.description = Some("x".repeat(120));

        let card = detail_card(&r);
        assert!(card.contains(&format!("Description: {}...", "x".repeat(100))));
        assert!(card.contains("Read more at the vacancy link"));
    }
}
