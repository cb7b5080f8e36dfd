use std::cmp::Ordering;
use std::fmt;

use crate::models::vacancy::VacancyRecord;

/// Salary comparison of `subject` against `other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryComparison {
    pub subject: String,
    pub other: String,
    /// How `subject`'s salary relates to `other`'s.
    pub ordering: Ordering,
    pub difference: u64,
    pub currency: String,
}

impl SalaryComparison {
    /// Title of the better-paid vacancy, `None` when both pay the same.
    pub fn higher(&self) -> Option<&str> {
        match self.ordering {
            Ordering::Greater => Some(&self.subject),
            Ordering::Less => Some(&self.other),
            Ordering::Equal => None,
        }
    }
}

impl fmt::Display for SalaryComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.ordering {
            Ordering::Greater => "higher",
            Ordering::Less => "lower",
            Ordering::Equal => return f.write_str("Both vacancies offer the same salary."),
        };
        write!(
            f,
            "Salary of '{}' is {direction} than '{}' by {} {}.",
            self.subject, self.other, self.difference, self.currency
        )
    }
}

/// Compare the salaries of two validated records.
///
/// # Panics
///
/// Panics if either record has an unknown salary. Records coming out of
/// [`clean`](crate::clean::clean) always carry one.
pub fn compare_salary(a: &VacancyRecord, b: &VacancyRecord) -> SalaryComparison {
    let left = known_salary(a);
    let right = known_salary(b);

    SalaryComparison {
        subject: a.title.clone(),
        other: b.title.clone(),
        ordering: left.cmp(&right),
        difference: left.abs_diff(right),
        currency: a.currency.clone(),
    }
}

fn known_salary(record: &VacancyRecord) -> u64 {
    match record.salary {
        Some(salary) => salary,
        None => panic!(
            "compare_salary called with unvalidated record '{}' (unknown salary)",
            record.title
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vacancy::tests::record;

    #[test]
    fn reports_higher_subject() {
        let cmp = compare_salary(&record("A", Some(100000), "X"), &record("B", Some(80000), "Y"));

        assert_eq!(cmp.ordering, Ordering::Greater);
        assert_eq!(cmp.difference, 20000);
        assert_eq!(cmp.higher(), Some("A"));
        assert_eq!(cmp.to_string(), "Salary of 'A' is higher than 'B' by 20000 RUB.");
    }

    #[test]
    fn swapped_arguments_agree() {
        let a = record("A", Some(100000), "X");
        let b = record("B", Some(80000), "Y");

        let forward = compare_salary(&a, &b);
        let backward = compare_salary(&b, &a);

        assert_eq!(backward.ordering, Ordering::Less);
        assert_eq!(backward.difference, forward.difference);
        assert_eq!(backward.higher(), forward.higher());
        assert_eq!(backward.to_string(), "Salary of 'B' is lower than 'A' by 20000 RUB.");
    }

    #[test]
    fn equal_salaries() {
        let cmp = compare_salary(&record("A", Some(5), "X"), &record("B", Some(5), "Y"));

        assert_eq!(cmp.higher(), None);
        assert_eq!(cmp.difference, 0);
        assert_eq!(cmp.to_string(), "Both vacancies offer the same salary.");
    }

    #[test]
    #[should_panic(expected = "unknown salary")]
    fn unknown_salary_is_a_contract_violation() {
        compare_salary(&record("A", None, "X"), &record("B", Some(5), "Y"));
    }
}
