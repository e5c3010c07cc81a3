use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDate;
use thiserror::Error;

use crate::errors::ApiError;
use crate::models::menu::{MealSlot, UploadStats, Weekday};

/// Expected sheet layout: row 0 carries day headers (one weekday name per
/// column, first column reserved for labels), row 1 the dates, and every
/// following row either switches the current meal section (first cell
/// contains breakfast/lunch/snack/dinner) or contributes one food name
/// per day column.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Unsupported file type '{0}'. Please upload an Excel file (.xlsx, .xls) or CSV file")]
    UnsupportedType(String),

    #[error("Failed to read spreadsheet: {0}")]
    Unreadable(String),

    #[error("Invalid menu format: not enough rows")]
    TooFewRows,

    #[error("No day columns recognized in the uploaded menu")]
    NoDaysFound,
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::UnsupportedType(_) | UploadError::Unreadable(_) => {
                ApiError::Validation(err.to_string())
            }
            // A sheet with no recognizable days still gets the full parse
            // detail back so the caller sees how close the file came.
            UploadError::TooFewRows | UploadError::NoDaysFound => ApiError::UploadRejected {
                message: err.to_string(),
                warnings: Weekday::ALL
                    .iter()
                    .map(|d| format!("Day '{d}' not found in upload"))
                    .collect(),
                stats: UploadStats {
                    days_found: 0,
                    total_items: 0,
                },
            },
        }
    }
}

/// One parsed day: food names per meal slot, in sheet order.
#[derive(Debug, Default)]
pub struct ParsedDay {
    pub date: Option<NaiveDate>,
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub snacks: Vec<String>,
    pub dinner: Vec<String>,
}

impl ParsedDay {
    pub fn slot(&self, meal: MealSlot) -> &Vec<String> {
        match meal {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Snacks => &self.snacks,
            MealSlot::Dinner => &self.dinner,
        }
    }

    fn slot_mut(&mut self, meal: MealSlot) -> &mut Vec<String> {
        match meal {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Snacks => &mut self.snacks,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    pub fn item_count(&self) -> usize {
        MealSlot::ALL.iter().map(|m| self.slot(*m).len()).sum()
    }
}

/// The recognized part of an upload, plus warnings for the days the sheet
/// did not cover.
#[derive(Debug, Default)]
pub struct ParsedMenu {
    pub days: Vec<(Weekday, ParsedDay)>,
    pub warnings: Vec<String>,
}

impl ParsedMenu {
    pub fn day(&self, day: Weekday) -> Option<&ParsedDay> {
        self.days.iter().find(|(d, _)| *d == day).map(|(_, p)| p)
    }

    pub fn stats(&self) -> UploadStats {
        UploadStats {
            days_found: self.days.len(),
            total_items: self.days.iter().map(|(_, d)| d.item_count()).sum(),
        }
    }
}

/// Parses an uploaded menu file. The first worksheet (or the whole CSV)
/// is reduced to a row grid, then interpreted by `parse_rows`.
pub fn parse_menu_upload(filename: &str, bytes: &[u8]) -> Result<ParsedMenu, UploadError> {
    let lower = filename.to_lowercase();
    let rows = if lower.ends_with(".csv") {
        csv_rows(bytes)?
    } else if lower.ends_with(".xlsx") || lower.ends_with(".xls") {
        sheet_rows(bytes)?
    } else {
        let ext = lower.rsplit('.').next().unwrap_or("").to_string();
        return Err(UploadError::UnsupportedType(ext));
    };
    parse_rows(rows)
}

fn csv_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>, UploadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| UploadError::Unreadable(e.to_string()))?;
        rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
    }
    Ok(rows)
}

fn sheet_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>, UploadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| UploadError::Unreadable(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| UploadError::Unreadable("workbook has no sheets".into()))?
        .map_err(|e| UploadError::Unreadable(e.to_string()))?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        // Excel serial dates come through as YYYY-MM-DD
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.date().to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

/// Interprets a row grid as a weekly menu.
pub fn parse_rows(rows: Vec<Vec<String>>) -> Result<ParsedMenu, UploadError> {
    if rows.len() < 2 {
        return Err(UploadError::TooFewRows);
    }

    let header = &rows[0];
    let date_row = &rows[1];

    // Day columns: first column is the category label, the rest are
    // matched by weekday-name substring.
    let mut columns: Vec<(usize, Weekday)> = Vec::new();
    for (idx, cell) in header.iter().enumerate().skip(1) {
        if let Some(day) = day_in(cell) {
            if !columns.iter().any(|(_, d)| *d == day) {
                columns.push((idx, day));
            }
        }
    }
    if columns.is_empty() {
        return Err(UploadError::NoDaysFound);
    }

    let mut days: Vec<(Weekday, ParsedDay)> = columns
        .iter()
        .map(|(idx, day)| {
            let parsed = ParsedDay {
                date: date_row.get(*idx).and_then(|cell| parse_date(cell)),
                ..Default::default()
            };
            (*day, parsed)
        })
        .collect();

    let mut current_meal: Option<MealSlot> = None;
    for row in rows.iter().skip(2) {
        let category = row.first().map(|s| s.trim()).unwrap_or("");
        if let Some(meal) = meal_in(category) {
            current_meal = Some(meal);
            continue;
        }
        // Item rows carry a label in the first column; anything else is
        // spacing or decoration.
        let Some(meal) = current_meal else { continue };
        if category.is_empty() {
            continue;
        }

        for (pos, (col, _)) in columns.iter().enumerate() {
            let name = row.get(*col).map(|s| s.trim()).unwrap_or("");
            if name.is_empty() || name.contains("***") {
                continue;
            }
            let slot = days[pos].1.slot_mut(meal);
            if !slot.iter().any(|existing| existing.eq_ignore_ascii_case(name)) {
                slot.push(name.to_string());
            }
        }
    }

    let warnings = Weekday::ALL
        .iter()
        .filter(|d| !days.iter().any(|(found, _)| found == *d))
        .map(|d| format!("Day '{d}' not found in upload"))
        .collect();

    Ok(ParsedMenu { days, warnings })
}

fn day_in(cell: &str) -> Option<Weekday> {
    let lower = cell.trim().to_lowercase();
    Weekday::ALL
        .iter()
        .find(|d| lower.contains(&d.to_string()))
        .copied()
}

fn meal_in(cell: &str) -> Option<MealSlot> {
    let lower = cell.trim().to_lowercase();
    if lower.contains("breakfast") {
        Some(MealSlot::Breakfast)
    } else if lower.contains("lunch") {
        Some(MealSlot::Lunch)
    } else if lower.contains("snack") {
        Some(MealSlot::Snacks)
    } else if lower.contains("dinner") {
        Some(MealSlot::Dinner)
    } else {
        None
    }
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(cell, format) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_parses_days_meals_and_items() {
        let parsed = parse_rows(grid(&[
            &["Category", "Monday", "Tuesday"],
            &["Date", "2025-12-15", "2025-12-16"],
            &["Breakfast", "", ""],
            &["Item 1", "Poha", "Idli"],
            &["Item 2", "Tea", "Sambar"],
            &["Lunch", "", ""],
            &["Item 1", "Dal Tadka", "Rajma"],
        ]))
        .unwrap();

        assert_eq!(parsed.days.len(), 2);
        let monday = parsed.day(Weekday::Monday).unwrap();
        assert_eq!(monday.date, Some("2025-12-15".parse().unwrap()));
        assert_eq!(monday.breakfast, vec!["Poha", "Tea"]);
        assert_eq!(monday.lunch, vec!["Dal Tadka"]);
        let tuesday = parsed.day(Weekday::Tuesday).unwrap();
        assert_eq!(tuesday.breakfast, vec!["Idli", "Sambar"]);
        assert_eq!(parsed.stats().days_found, 2);
        assert_eq!(parsed.stats().total_items, 6);
    }

    #[test]
    fn test_placeholder_cells_and_duplicates_skipped() {
        let parsed = parse_rows(grid(&[
            &["Category", "Monday"],
            &["Date", ""],
            &["Breakfast", ""],
            &["Item 1", "Poha"],
            &["Item 2", "***"],
            &["Item 3", "poha"],
            &["Item 4", "  "],
        ]))
        .unwrap();

        let monday = parsed.day(Weekday::Monday).unwrap();
        assert_eq!(monday.breakfast, vec!["Poha"]);
    }

    #[test]
    fn test_rows_outside_a_meal_section_are_ignored() {
        let parsed = parse_rows(grid(&[
            &["Category", "Friday"],
            &["Date", ""],
            &["Item 1", "Stray"],
            &["Dinner", ""],
            &["Item 1", "Veg Biryani"],
        ]))
        .unwrap();

        let friday = parsed.day(Weekday::Friday).unwrap();
        assert!(friday.breakfast.is_empty());
        assert_eq!(friday.dinner, vec!["Veg Biryani"]);
    }

    #[test]
    fn test_missing_days_reported_as_warnings() {
        let parsed = parse_rows(grid(&[
            &["Category", "Monday", "Thursday"],
            &["Date", "", ""],
            &["Lunch", "", ""],
            &["Item 1", "Dal", "Kadhi"],
        ]))
        .unwrap();

        assert_eq!(parsed.warnings.len(), 5);
        assert!(parsed.warnings.iter().any(|w| w.contains("tuesday")));
        assert!(!parsed.warnings.iter().any(|w| w.contains("thursday")));
    }

    #[test]
    fn test_no_recognizable_days_rejected() {
        let result = parse_rows(grid(&[
            &["Category", "Col A", "Col B"],
            &["Date", "", ""],
            &["Lunch", "", ""],
            &["Item 1", "Dal", "Rice"],
        ]));
        assert!(matches!(result, Err(UploadError::NoDaysFound)));
    }

    #[test]
    fn test_too_few_rows_rejected() {
        let result = parse_rows(grid(&[&["Category", "Monday"]]));
        assert!(matches!(result, Err(UploadError::TooFewRows)));
    }

    #[test]
    fn test_csv_upload_end_to_end() {
        let csv = "Category,Monday,Tuesday\n\
                   Date,2025-12-15,2025-12-16\n\
                   Breakfast,,\n\
                   Item 1,Poha,Idli\n\
                   Snacks,,\n\
                   Item 1,Samosa,Tea\n";
        let parsed = parse_menu_upload("menu.csv", csv.as_bytes()).unwrap();
        assert_eq!(parsed.days.len(), 2);
        assert_eq!(parsed.day(Weekday::Monday).unwrap().snacks, vec!["Samosa"]);
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let result = parse_menu_upload("menu.pdf", b"%PDF-");
        assert!(matches!(result, Err(UploadError::UnsupportedType(_))));
    }

    #[test]
    fn test_day_header_substring_match() {
        // Headers like "Monday (15th)" still count
        let parsed = parse_rows(grid(&[
            &["Category", "Monday (15th)"],
            &["Date", ""],
            &["Dinner", ""],
            &["Item 1", "Khichdi"],
        ]))
        .unwrap();
        assert!(parsed.day(Weekday::Monday).is_some());
    }
}
