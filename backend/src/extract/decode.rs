//! Report text decoding.
//!
//! AS400 exports arrive as ASCII, UTF-8, or one of the Latin-1 code pages;
//! anything chardet reports outside that set is read as lossy UTF-8.

use encoding_rs::WINDOWS_1252;

/// Encodings a report is decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportEncoding {
    Utf8,
    Latin1,
    Windows1252,
}

impl ReportEncoding {
    /// Map a charset label to a supported encoding.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => Self::Latin1,
            "windows-1252" | "cp1252" => Self::Windows1252,
            _ => Self::Utf8,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "iso-8859-1",
            Self::Windows1252 => "windows-1252",
        }
    }

    /// Invalid UTF-8 is replaced, not rejected, so stray bytes cost one
    /// character rather than the whole report.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            // Latin-1 is a subset of windows-1252 for every printable byte
            Self::Latin1 | Self::Windows1252 => WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned(),
        }
    }
}

pub fn detect_encoding(bytes: &[u8]) -> ReportEncoding {
    let (charset, _confidence, _language) = chardet::detect(bytes);
    ReportEncoding::from_label(&charset)
}

/// Decode with a named encoding; unknown names decode as UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    ReportEncoding::from_label(encoding).decode(bytes)
}

/// Detect and decode in one step, returning the text and the encoding label.
pub fn decode_auto(bytes: &[u8]) -> (String, String) {
    let encoding = detect_encoding(bytes);
    (encoding.decode(bytes), encoding.label().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_utf8() {
        let (text, encoding) = decode_auto(b"Item 1234567 12.50");
        assert_eq!(encoding, "utf-8");
        assert_eq!(text, "Item 1234567 12.50");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_charset_labels() {
        assert_eq!(ReportEncoding::from_label("ascii"), ReportEncoding::Utf8);
        assert_eq!(ReportEncoding::from_label("ISO-8859-1"), ReportEncoding::Latin1);
        assert_eq!(ReportEncoding::from_label("CP1252"), ReportEncoding::Windows1252);
        assert_eq!(ReportEncoding::from_label("KOI8-R"), ReportEncoding::Utf8);
        assert_eq!(ReportEncoding::Latin1.label(), "iso-8859-1");
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let decoded = decode_content(&[0x31, 0xFF, 0x32], "utf-8");
        assert!(decoded.starts_with('1'));
        assert!(decoded.ends_with('2'));
    }
}
