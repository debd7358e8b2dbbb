//! PDF text extraction.
//!
//! Walks each page's content stream and rebuilds text lines from the text
//! operators. A line break is emitted whenever the text position moves
//! vertically (`Td`, `TD`, `Tm`, `T*`, `'`, `"`) and at the end of every
//! text object, so fixed-width report rows survive as separate lines.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object};

use crate::error::{ExtractError, ExtractResult};

/// Kerning (in thousandths of a text unit) wide enough to read as a space.
const TJ_SPACE_THRESHOLD: f32 = -200.0;

/// Extract the text of every page, in page order.
pub fn pdf_text(bytes: &[u8]) -> ExtractResult<String> {
    let document = Document::load_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;

    let mut text = String::new();
    for (page_number, page_id) in document.get_pages() {
        let raw = document
            .get_page_content(page_id)
            .map_err(|e| ExtractError::Pdf(format!("page {}: {}", page_number, e)))?;
        let content =
            Content::decode(&raw).map_err(|e| ExtractError::Pdf(format!("page {}: {}", page_number, e)))?;

        let mut page = PageText::default();
        for operation in &content.operations {
            page.apply(operation);
        }
        text.push_str(&page.finish());
    }

    Ok(text)
}

#[derive(Default)]
struct PageText {
    out: String,
    line_y: Option<f32>,
}

impl PageText {
    fn apply(&mut self, op: &Operation) {
        match op.operator.as_str() {
            "Tj" => self.show(op.operands.first()),
            "TJ" => {
                if let Some(Object::Array(parts)) = op.operands.first() {
                    for part in parts {
                        match number(part) {
                            Some(kern) if kern <= TJ_SPACE_THRESHOLD => self.out.push(' '),
                            Some(_) => {}
                            None => self.show(Some(part)),
                        }
                    }
                }
            }
            "'" => {
                self.break_line();
                self.show(op.operands.first());
            }
            "\"" => {
                self.break_line();
                self.show(op.operands.get(2));
            }
            "Td" | "TD" => {
                if op.operands.get(1).and_then(number).is_some_and(|ty| ty != 0.0) {
                    self.break_line();
                }
            }
            "Tm" => {
                let y = op.operands.get(5).and_then(number);
                if y.is_some() && self.line_y.is_some() && y != self.line_y {
                    self.break_line();
                }
                self.line_y = y;
            }
            "T*" | "ET" => self.break_line(),
            "BT" => self.line_y = None,
            _ => {}
        }
    }

    fn show(&mut self, operand: Option<&Object>) {
        if let Some(Object::String(bytes, _)) = operand {
            self.out.push_str(&decode_string(bytes));
        }
    }

    fn break_line(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.out
    }
}

fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// UTF-16BE when the string carries a byte order mark, else single-byte text.
fn decode_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => encoding_rs::UTF_16BE.decode_without_bom_handling(rest).0.into_owned(),
        _ => encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::{dictionary, Stream};

    /// Build a PDF with one page per entry, each page a single text object
    /// whose lines are separated by `Td 0 -12`.
    pub(crate) fn build_pdf(pages: &[Vec<String>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for lines in pages {
            let mut operations = vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 8.into()]),
                Operation::new("Td", vec![20.into(), 800.into()]),
            ];
            for (i, line) in lines.iter().enumerate() {
                if i > 0 {
                    operations.push(Operation::new("Td", vec![0.into(), (-12).into()]));
                }
                operations.push(Operation::new("Tj", vec![Object::string_literal(line.as_str())]));
            }
            operations.push(Operation::new("ET", vec![]));

            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 842.into(), 595.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_garbage_is_pdf_error() {
        let result = pdf_text(b"definitely not a pdf");
        assert!(matches!(result, Err(ExtractError::Pdf(_))));
    }

    #[test]
    fn test_lines_in_one_text_object_stay_separate() {
        let lines = vec![
            "REFUND AUDIT LOG".to_string(),
            "1234567  WIDGET BLUE        4.99".to_string(),
            "2345678  WIDGET RED         5.99".to_string(),
        ];
        let text = pdf_text(&build_pdf(&[lines.clone()])).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), lines);
    }

    #[test]
    fn test_all_pages_in_order() {
        let pdf = build_pdf(&[vec!["page one".to_string()], vec!["page two".to_string()]]);
        assert_eq!(pdf_text(&pdf).unwrap(), "page one\npage two\n");
    }

    #[test]
    fn test_tj_kerning_and_quote_operators() {
        let mut page = PageText::default();
        page.apply(&Operation::new("BT", vec![]));
        page.apply(&Operation::new(
            "TJ",
            vec![Object::Array(vec![
                Object::string_literal("ITEM"),
                Object::Integer(-400),
                Object::string_literal("1234567"),
                Object::Real(-20.0),
            ])],
        ));
        page.apply(&Operation::new("'", vec![Object::string_literal("next line")]));
        page.apply(&Operation::new("Td", vec![10.into(), 0.into()]));
        page.apply(&Operation::new("Tj", vec![Object::string_literal(" same line")]));
        page.apply(&Operation::new("ET", vec![]));

        assert_eq!(page.finish(), "ITEM 1234567\nnext line same line\n");
    }

    #[test]
    fn test_utf16_strings() {
        assert_eq!(decode_string(&[0xFE, 0xFF, 0x00, 0x41, 0x00, 0xE9]), "Aé");
        assert_eq!(decode_string(b"4.99"), "4.99");
    }
}
