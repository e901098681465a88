//! Fare estimation for a driving distance.

const BASE_FARE: f64 = 500.0;
const PER_KM: f64 = 325.0;
/// Minimum fare in FCFA.
pub const MINIMUM_FARE: u32 = 1500;

/// Estimated fare in FCFA for a distance in kilometers.
pub fn estimate_price(distance_km: f64) -> u32 {
    let price = (BASE_FARE + distance_km.max(0.0) * PER_KM).round();
    // `as` saturates on overflow and maps NaN to 0
    (price as u32).max(MINIMUM_FARE)
}

/// Formats an amount with fr-FR thousands grouping, e.g. `45 000 FCFA`.
pub fn format_fcfa(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    format!("{grouped} FCFA")
}

/// Parses a formatted amount back to FCFA (`"45 000 FCFA"` -> 45000).
pub fn parse_fcfa(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}
