//! Fixed-width AS400 refund audit lines.
//!
//! ```text
//! Rec# Trn# Date     Tracking#     Member#       Item#    DeptQty     Tender $ S R Auditor
//! 0001 0042 04/12/25 1234567890123 11112222333   1234567  12  1-      12.99- Y N JDOE
//! ```
//!
//! Column offsets are character positions; lines shorter than 70 characters
//! are headers or separators and are skipped.

/// Minimum length of a data line.
const MIN_LINE_LEN: usize = 70;

/// One parsed audit line.
#[derive(Debug, Clone, PartialEq)]
pub struct As400Entry {
    pub record: String,
    pub transaction: String,
    pub date: String,
    pub tracking: String,
    pub member: String,
    pub item_number: String,
    pub department: String,
    pub quantity: String,
    pub tender: String,
    pub saleable: String,
    pub refund: String,
    pub auditor: String,
}

fn column(chars: &[char], start: usize, end: Option<usize>) -> String {
    let end = end.unwrap_or(chars.len()).min(chars.len());
    if start >= end {
        return String::new();
    }
    chars[start..end].iter().collect::<String>().trim().to_string()
}

/// Parse one line, or `None` when it is not a data line.
///
/// A data line must carry a numeric item number and a tender amount.
pub fn parse_line(line: &str) -> Option<As400Entry> {
    if line.trim().chars().count() < MIN_LINE_LEN {
        return None;
    }
    let chars: Vec<char> = line.trim_end_matches(['\r', '\n']).chars().collect();

    let entry = As400Entry {
        record: column(&chars, 0, Some(4)),
        transaction: column(&chars, 5, Some(9)),
        date: column(&chars, 10, Some(18)),
        tracking: column(&chars, 19, Some(32)),
        member: column(&chars, 33, Some(46)),
        item_number: column(&chars, 46, Some(55)),
        department: column(&chars, 55, Some(59)),
        quantity: column(&chars, 59, Some(62)),
        tender: column(&chars, 67, Some(75)),
        saleable: column(&chars, 76, Some(77)),
        refund: column(&chars, 78, Some(79)),
        auditor: column(&chars, 80, None),
    };

    let item_ok = !entry.item_number.is_empty() && entry.item_number.chars().all(|c| c.is_ascii_digit());
    let tender_ok = entry.tender.chars().any(|c| c.is_ascii_digit());
    (item_ok && tender_ok).then_some(entry)
}

/// Parse every data line of a report.
pub fn parse_report(text: &str) -> Vec<As400Entry> {
    text.lines().filter_map(parse_line).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a fixed-width line from `(offset, value)` pairs.
    pub(crate) fn fixed_line(fields: &[(usize, &str)]) -> String {
        let mut chars = vec![' '; 84];
        for (offset, value) in fields {
            for (i, c) in value.chars().enumerate() {
                if offset + i >= chars.len() {
                    chars.resize(offset + i + 1, ' ');
                }
                chars[offset + i] = c;
            }
        }
        chars.into_iter().collect()
    }

    pub(crate) fn sample_line(item: &str, qty: &str, tender: &str) -> String {
        fixed_line(&[
            (0, "0001"),
            (5, "0042"),
            (10, "04/12/25"),
            (19, "1234567890123"),
            (33, "111122223333"),
            (46, item),
            (55, "12"),
            (59, qty),
            (67, tender),
            (76, "Y"),
            (78, "N"),
            (80, "JDOE"),
        ])
    }

    #[test]
    fn test_parse_data_line() {
        let entry = parse_line(&sample_line("1234567", "1-", "12.99-")).unwrap();
        assert_eq!(entry.record, "0001");
        assert_eq!(entry.date, "04/12/25");
        assert_eq!(entry.member, "111122223333");
        assert_eq!(entry.item_number, "1234567");
        assert_eq!(entry.department, "12");
        assert_eq!(entry.quantity, "1-");
        assert_eq!(entry.tender, "12.99-");
        assert_eq!(entry.auditor, "JDOE");
    }

    #[test]
    fn test_short_and_header_lines_skipped() {
        assert!(parse_line("REFUND AUDIT REPORT").is_none());
        let header = fixed_line(&[(0, "Rec#"), (46, "Item#"), (67, "Tender $"), (80, "Auditor")]);
        assert!(parse_line(&header).is_none());
    }

    #[test]
    fn test_parse_report_keeps_order() {
        let text = format!(
            "HEADER\n{}\n{}\n",
            sample_line("1111111", "1", "5.00"),
            sample_line("2222222", "2", "10.00")
        );
        let entries = parse_report(&text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].item_number, "1111111");
        assert_eq!(entries[1].item_number, "2222222");
    }
}
