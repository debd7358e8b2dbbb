//! Row editor state for the results table.
//!
//! Rows live only here until a save serializes all of them, in order, into
//! one `/update-data` payload.

use crate::types::{LineItem, Period};

use super::derive::{derive_date, derive_description};

/// One editable table row.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorRow {
    /// Client-side id, unique within the session.
    pub id: u64,
    pub item_number: String,
    pub price: String,
    pub quantity: i64,
    pub exception: String,
    pub period: Period,
    /// Carried through from extraction, not editable.
    pub department: String,
}

impl EditorRow {
    fn empty(id: u64, period: Period) -> Self {
        Self {
            id,
            item_number: String::new(),
            price: "0.00".to_string(),
            quantity: 1,
            exception: String::new(),
            period,
            department: String::new(),
        }
    }

    fn from_item(id: u64, item: &LineItem) -> Self {
        Self {
            id,
            item_number: item.item_number.clone(),
            price: item.price.clone(),
            quantity: item.quantity,
            exception: item.exception.clone(),
            period: Period::from_code_or_first(item.period.as_deref().unwrap_or_default()),
            department: item.department.clone(),
        }
    }

    /// Serialize with `description` and `date` recomputed.
    pub fn to_item(&self, year: i32) -> LineItem {
        LineItem {
            description: derive_description(&self.item_number),
            date: derive_date(self.period, year),
            item_number: self.item_number.clone(),
            price: self.price.clone(),
            quantity: self.quantity,
            exception: self.exception.clone(),
            period: Some(self.period.code()),
            department: self.department.clone(),
        }
    }
}

/// A single field edit.
#[derive(Clone, Debug, PartialEq)]
pub enum RowEdit {
    ItemNumber(String),
    Price(String),
    /// Raw input; non-numeric or below 1 becomes 1.
    Quantity(String),
    Exception(String),
    /// Period code from the dropdown.
    Period(String),
}

/// Ordered rows of the results table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowEditor {
    rows: Vec<EditorRow>,
    last_id: u64,
}

impl RowEditor {
    /// Rows for the items the server extracted.
    pub fn from_items(items: &[LineItem], now_ms: u64) -> Self {
        let mut editor = Self::default();
        for item in items {
            let id = editor.next_id(now_ms);
            editor.rows.push(EditorRow::from_item(id, item));
        }
        editor
    }

    pub fn rows(&self) -> &[EditorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Time-based id, bumped past the last one on collision.
    fn next_id(&mut self, now_ms: u64) -> u64 {
        let id = if now_ms > self.last_id { now_ms } else { self.last_id + 1 };
        self.last_id = id;
        id
    }

    /// Append an empty row, returning its id.
    pub fn add_row(&mut self, now_ms: u64, period: Period) -> u64 {
        let id = self.next_id(now_ms);
        self.rows.push(EditorRow::empty(id, period));
        id
    }

    /// Remove a row; `false` when the id is unknown.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        self.rows.len() != before
    }

    /// One row per non-blank line of `text`, returning how many were added.
    pub fn bulk_add(&mut self, text: &str, now_ms: u64, period: Period) -> usize {
        let numbers: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        for number in &numbers {
            let id = self.next_id(now_ms);
            let mut row = EditorRow::empty(id, period);
            row.item_number = number.to_string();
            self.rows.push(row);
        }
        numbers.len()
    }

    /// Apply an edit; `false` when the id is unknown.
    pub fn edit(&mut self, id: u64, edit: RowEdit) -> bool {
        let Some(row) = self.rows.iter_mut().find(|row| row.id == id) else {
            return false;
        };
        match edit {
            RowEdit::ItemNumber(value) => row.item_number = value,
            RowEdit::Price(value) => row.price = value,
            RowEdit::Quantity(value) => row.quantity = value.trim().parse::<i64>().unwrap_or(1).max(1),
            RowEdit::Exception(value) => row.exception = value,
            RowEdit::Period(code) => row.period = Period::from_code_or_first(&code),
        }
        true
    }

    /// The save payload: every row, in order.
    pub fn payload(&self, year: i32) -> Vec<LineItem> {
        self.rows.iter().map(|row| row.to_item(year)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(code: &str) -> Period {
        Period::parse(code).unwrap()
    }

    #[test]
    fn test_adds_and_deletes() {
        let mut editor = RowEditor::default();
        let ids: Vec<u64> = (0..5).map(|_| editor.add_row(1_000, p("P01"))).collect();

        assert!(editor.delete(ids[1]));
        assert!(editor.delete(ids[3]));
        assert!(!editor.delete(ids[3]));
        assert_eq!(editor.len(), 3);
    }

    #[test]
    fn test_ids_unique_under_same_clock() {
        let mut editor = RowEditor::default();
        let a = editor.add_row(42, p("P01"));
        let b = editor.add_row(42, p("P01"));
        let c = editor.add_row(10, p("P01"));
        assert_eq!((a, b, c), (42, 43, 44));
    }

    #[test]
    fn test_bulk_add_skips_blank_lines() {
        let mut editor = RowEditor::default();
        let added = editor.bulk_add("111\n\n222\n  \n333", 7, p("P06"));

        assert_eq!(added, 3);
        let numbers: Vec<&str> = editor.rows().iter().map(|r| r.item_number.as_str()).collect();
        assert_eq!(numbers, ["111", "222", "333"]);
        let row = &editor.rows()[0];
        assert_eq!(row.price, "0.00");
        assert_eq!(row.quantity, 1);
        assert_eq!(row.period, p("P06"));
        assert!(row.exception.is_empty());
    }

    #[test]
    fn test_payload_recomputes_date() {
        let item = LineItem {
            item_number: "1234567".into(),
            description: "stale".into(),
            price: "9.99".into(),
            quantity: 2,
            exception: "damaged".into(),
            period: Some("P09".into()),
            date: "09/14/24".into(),
            department: "12".into(),
        };
        let mut editor = RowEditor::from_items(&[item], 1);
        let id = editor.rows()[0].id;
        editor.edit(id, RowEdit::Period("P04".into()));

        let payload = editor.payload(2025);
        assert_eq!(payload[0].date, "04/01/25");
        assert_eq!(payload[0].period.as_deref(), Some("P04"));
        assert_eq!(payload[0].description, "Item 1234567");
        assert_eq!(payload[0].department, "12");
    }

    #[test]
    fn test_quantity_edit_stays_positive() {
        let mut editor = RowEditor::default();
        let id = editor.add_row(1, p("P01"));

        editor.edit(id, RowEdit::Quantity("abc".into()));
        assert_eq!(editor.rows()[0].quantity, 1);
        editor.edit(id, RowEdit::Quantity("0".into()));
        assert_eq!(editor.rows()[0].quantity, 1);
        editor.edit(id, RowEdit::Quantity(" 4 ".into()));
        assert_eq!(editor.rows()[0].quantity, 4);
    }

    #[test]
    fn test_empty_item_numbers_are_saved() {
        let mut editor = RowEditor::default();
        editor.add_row(1, p("P02"));
        let payload = editor.payload(2025);
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0].item_number, "");
    }

    #[test]
    fn test_unknown_period_selects_first() {
        let item = LineItem {
            item_number: "1".into(),
            description: String::new(),
            price: "0.00".into(),
            quantity: 1,
            exception: String::new(),
            period: Some("P00".into()),
            date: String::new(),
            department: String::new(),
        };
        let editor = RowEditor::from_items(&[item], 1);
        assert_eq!(editor.rows()[0].period.code(), "P01");
    }
}
