//! Spreadsheet export of a standards table and of a grade assignment.

use crate::error::ExportError;
use crate::filter::without_intro;
use crate::grades::{year_label, GradeAssignment};
use crate::table::StandardTable;
use rust_xlsxwriter::{Format, Workbook};

pub const TABLE_SHEET: &str = "Sheet1";
pub const TABLE_HEADERS: [&str; 6] = ["id", "typ", "komponent", "tema", "druh", "definicia standardu"];
const TABLE_WIDTHS: [f64; 6] = [14.0, 24.0, 32.0, 32.0, 20.0, 90.0];

pub const ASSIGNMENT_HEADERS: [&str; 5] = ["typ", "komponent", "tema", "typ_standardu", "definicia"];
const ASSIGNMENT_WIDTHS: [f64; 5] = [24.0, 32.0, 32.0, 20.0, 90.0];

/// One worksheet: a header row and string cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub widths: Vec<f64>,
    /// Number format applied to column A.
    pub first_column_format: Option<String>,
}

impl Sheet {
    fn new(name: &str, headers: &[&str], widths: &[f64]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            widths: widths.to_vec(),
            first_column_format: None,
        }
    }
}

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Browse-view export: every row but intro rows and the main goal.
pub fn standards_sheet(table: &StandardTable) -> Sheet {
    let mut sheet = Sheet::new(TABLE_SHEET, &TABLE_HEADERS, &TABLE_WIDTHS);
    sheet.first_column_format = Some("0.00".to_string());
    sheet.rows = without_intro(table)
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.typ.clone(),
                cell(&r.komponent),
                cell(&r.tema),
                cell(&r.typ_standardu),
                r.definicia_clean.clone(),
            ]
        })
        .collect();
    sheet
}

/// One sheet per grade-year with the rows assigned to it.
pub fn assignment_sheets(grid: &GradeAssignment) -> Vec<Sheet> {
    grid.years()
        .iter()
        .enumerate()
        .map(|(slot, year)| {
            let mut sheet = Sheet::new(&year_label(*year), &ASSIGNMENT_HEADERS, &ASSIGNMENT_WIDTHS);
            sheet.rows = grid
                .rows()
                .iter()
                .filter(|r| r.assigned[slot])
                .map(|r| {
                    vec![
                        r.typ.clone(),
                        cell(&r.komponent),
                        cell(&r.tema),
                        cell(&r.typ_standardu),
                        r.definicia.clone(),
                    ]
                })
                .collect();
            sheet
        })
        .collect()
}

/// Write sheets into an in-memory XLSX file.
pub fn write_workbook(sheets: &[Sheet]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (col, width) in sheet.widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }
        if let Some(num_format) = &sheet.first_column_format {
            let format = Format::new().set_num_format(num_format);
            worksheet.set_column_format(0, &format)?;
        }

        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &bold)?;
        }
        for (i, row) in sheet.rows.iter().enumerate() {
            let row_num = i as u32 + 1;
            for (col, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(row_num, col as u16, value)?;
                }
            }
        }
    }

    let buffer = workbook.save_to_buffer()?;
    tracing::debug!(sheets = sheets.len(), bytes = buffer.len(), "workbook written");
    Ok(buffer)
}

pub fn export_standards(table: &StandardTable) -> Result<Vec<u8>, ExportError> {
    write_workbook(&[standards_sheet(table)])
}

pub fn export_assignment(grid: &GradeAssignment) -> Result<Vec<u8>, ExportError> {
    write_workbook(&assignment_sheets(grid))
}

/// Download filename of the browse-view export.
pub fn download_name(subject: &str, cycle: u8) -> String {
    format!("standardy_{}_c{}.xlsx", subject, cycle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_support::{grouped, record};
    use calamine::{Data, Reader, Xlsx};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn read_back(bytes: Vec<u8>) -> Vec<(String, Vec<Vec<String>>)> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        workbook
            .sheet_names()
            .into_iter()
            .map(|name| {
                let range = workbook.worksheet_range(&name).unwrap();
                let rows = range
                    .rows()
                    .map(|row| {
                        row.iter()
                            .map(|c| match c {
                                Data::String(s) => s.clone(),
                                Data::Empty => String::new(),
                                other => other.to_string(),
                            })
                            .collect()
                    })
                    .collect();
                (name, rows)
            })
            .collect()
    }

    fn fixture() -> StandardTable {
        vec![
            record("mt3-hc-001", "Hlavný cieľ."),
            record("mt3-c-001", "1. Cieľ."),
            grouped("mt3-o-000", "Čísla", Some("Úvod"), None, "Úvod."),
            grouped("mt3-o-001", "Čísla", Some("Zlomky"), Some("Pojmy"), "<b>zlomok</b>"),
            grouped("mt3-o-002", "Čísla", Some("Zlomky"), None, "čitateľ"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn standards_sheet_drops_intro_and_main_goal() {
        let sheet = standards_sheet(&fixture());
        assert_eq!(sheet.name, "Sheet1");
        let ids: Vec<&str> = sheet.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(ids, vec!["mt3-c-001", "mt3-o-001", "mt3-o-002"]);
        assert_eq!(
            sheet.rows[1],
            vec!["mt3-o-001", "", "Čísla", "Zlomky", "Pojmy", "Zlomok."]
        );
    }

    #[test]
    fn standards_workbook_reads_back() {
        let sheets = read_back(export_standards(&fixture()).unwrap());
        assert_eq!(sheets.len(), 1);
        let (name, rows) = &sheets[0];
        assert_eq!(name, "Sheet1");
        assert_eq!(rows[0], TABLE_HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3][0], "mt3-o-002");
        assert_eq!(rows[3][4], "");
        assert_eq!(rows[3][5], "Čitateľ.");
    }

    #[test]
    fn assignment_all_true_has_every_row_on_every_sheet() {
        let grid = GradeAssignment::new(&fixture(), 3).unwrap();
        let sheets = read_back(export_assignment(&grid).unwrap());
        let names: Vec<&str> = sheets.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["6. ročník", "7. ročník", "8. ročník", "9. ročník"]);
        for (_, rows) in &sheets {
            assert_eq!(rows.len(), 1 + grid.len());
            assert_eq!(rows[0], ASSIGNMENT_HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn assignment_all_false_year_is_header_only() {
        let mut grid = GradeAssignment::new(&fixture(), 2).unwrap();
        grid.set_year(4, false).unwrap();
        grid.set("mt3-o-001", 5, false).unwrap();

        let sheets = assignment_sheets(&grid);
        assert!(sheets[0].rows.is_empty());
        assert_eq!(sheets[1].rows.len(), 1);
        assert_eq!(sheets[1].rows[0][4], "Čitateľ.");

        let read = read_back(write_workbook(&sheets).unwrap());
        assert_eq!(read[0].1.len(), 1);
    }

    #[test]
    fn download_name_format() {
        assert_eq!(download_name("Matematika", 3), "standardy_Matematika_c3.xlsx");
    }
}
