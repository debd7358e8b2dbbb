//! Generic "item number + price" line detection.
//!
//! Used when a report has no AS400 data lines: any line of at least
//! 20 characters carrying a 6-8 digit number and a `d+.dd` amount yields
//! one entry per item number, paired with the nearest amount on the line.

use once_cell::sync::Lazy;
use regex::Regex;

static ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{6,8}\b").expect("valid item regex"));
static PRICE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\d{2}-?").expect("valid price regex"));
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{2}/\d{2}/(?:\d{4}|\d{2}))\b").expect("valid date regex"));

/// Lines shorter than this rarely hold a full entry.
const MIN_LINE_LEN: usize = 20;

/// One detected entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMatch {
    pub item_number: String,
    pub price: String,
    /// Date printed on the same line, if any.
    pub date: Option<String>,
}

/// First `MM/DD/YY` or `MM/DD/YYYY` date in the text.
pub fn find_date(text: &str) -> Option<String> {
    DATE_RE.captures(text).map(|c| c[1].to_string())
}

/// Item number candidates on a line, skipping digits that belong to an amount.
fn item_candidates(line: &str) -> Vec<(usize, &str)> {
    let bytes = line.as_bytes();
    ITEM_RE
        .find_iter(line)
        .filter(|m| {
            let before = m.start().checked_sub(1).map(|i| bytes[i]);
            let after = bytes.get(m.end()).copied();
            before != Some(b'.') && before != Some(b'/') && after != Some(b'.') && after != Some(b'/')
        })
        .map(|m| (m.start(), m.as_str()))
        .collect()
}

/// Scan every line of the text.
pub fn scan(text: &str) -> Vec<LineMatch> {
    let mut matches = Vec::new();

    for line in text.lines() {
        if line.trim().len() < MIN_LINE_LEN {
            continue;
        }

        let prices: Vec<(usize, &str)> = PRICE_RE.find_iter(line).map(|m| (m.start(), m.as_str())).collect();
        if prices.is_empty() {
            continue;
        }

        let date = find_date(line);
        for (position, item_number) in item_candidates(line) {
            let nearest = prices
                .iter()
                .min_by_key(|(price_pos, _)| price_pos.abs_diff(position))
                .map(|(_, price)| price.to_string())
                .unwrap_or_else(|| "0.00".to_string());

            matches.push(LineMatch {
                item_number: item_number.to_string(),
                price: nearest,
                date: date.clone(),
            });
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_pairs_nearest_price() {
        let text = "1234567  WIDGET BLUE        4.99\n8765432  GADGET BOX      12.00   1.00";
        let found = scan(text);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].item_number, "1234567");
        assert_eq!(found[0].price, "4.99");
        assert_eq!(found[1].item_number, "8765432");
        assert_eq!(found[1].price, "12.00");
    }

    #[test]
    fn test_amount_digits_are_not_items() {
        let found = scan("REFUND TOTAL            1234567.00 for 7654321");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].item_number, "7654321");
    }

    #[test]
    fn test_short_lines_and_priceless_lines_skipped() {
        assert!(scan("1234567 4.99").is_empty());
        assert!(scan("1234567 has no amount on this line").is_empty());
    }

    #[test]
    fn test_line_date_and_trailing_minus() {
        let found = scan("03/15/25 RETURN 1234567 SHOE        19.99-");
        assert_eq!(found[0].date.as_deref(), Some("03/15/25"));
        assert_eq!(found[0].price, "19.99-");
    }

    #[test]
    fn test_find_date() {
        assert_eq!(find_date("Report Date: 11/02/2024\n").as_deref(), Some("11/02/2024"));
        assert_eq!(find_date("no date here"), None);
    }
}
