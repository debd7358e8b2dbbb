//! Fields derived at save time.

use chrono::Datelike;

use crate::types::Period;

/// `"Item " + item_number`.
pub fn derive_description(item_number: &str) -> String {
    format!("Item {}", item_number)
}

/// `MM/01/YY` for the period's month in the given year.
pub fn derive_date(period: Period, year: i32) -> String {
    format!("{:02}/01/{:02}", period.month(), year.rem_euclid(100))
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description() {
        assert_eq!(derive_description("1234567"), "Item 1234567");
        assert_eq!(derive_description(""), "Item ");
    }

    #[test]
    fn test_date_follows_period() {
        let april = Period::parse("P04").unwrap();
        assert_eq!(derive_date(april, 2025), "04/01/25");
        assert_eq!(derive_date(Period::parse("P12").unwrap(), 2009), "12/01/09");
        assert_eq!(derive_date(april, 2100), "04/01/00");
    }
}
