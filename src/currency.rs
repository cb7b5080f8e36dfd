//! Static exchange-rate table for settling foreign salaries in rubles.

/// Rubles per one unit of each supported currency.
const EXCHANGE_RATES: &[(&str, f64)] = &[
    ("AZN", 52.25),
    ("BYR", 26.98),
    ("EUR", 97.16),
    ("GEL", 32.84),
    ("KGS", 0.99),
    ("KZT", 0.19),
    ("USD", 88.8),
    ("UZS", 0.0072),
    ("UAH", 2.44),
];

/// Codes that already denote the settlement currency (HH uses the legacy `RUR`).
const SETTLEMENT_CODES: &[&str] = &["RUB", "RUR"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Converted(u64),
    Unsupported,
}

fn rate(code: &str) -> Option<f64> {
    EXCHANGE_RATES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, rate)| *rate)
}

/// Convert `amount` in `currency` to whole rubles, rounding down.
pub fn convert_to_canonical(amount: f64, currency: &str) -> Conversion {
    match rate(currency) {
        Some(rate) => Conversion::Converted(floor_amount(amount * rate)),
        None => Conversion::Unsupported,
    }
}

pub fn is_settlement_currency(code: &str) -> bool {
    SETTLEMENT_CODES.iter().any(|c| c.eq_ignore_ascii_case(code))
}

/// Floors an amount to whole rubles; negative or non-finite amounts become 0.
pub(crate) fn floor_amount(amount: f64) -> u64 {
    if !amount.is_finite() || amount <= 0.0 {
        return 0;
    }
    amount.floor() as u64
}
