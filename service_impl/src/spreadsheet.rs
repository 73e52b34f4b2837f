//! Writes report rows into an xlsx workbook.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use service::{report::ReportRow, ServiceError};

pub const SHEET_NAME: &str = "Activities";
pub const HEADERS: [&str; 7] = [
    "Day", "Date", "Status", "Title", "Category", "Minutes", "Hours",
];

struct ReportFormats {
    header: Format,
    text: Format,
    number: Format,
    hours: Format,
    total_text: Format,
    total_number: Format,
    total_hours: Format,
}

impl ReportFormats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_background_color(0x4472C4)
                .set_font_color(0xFFFFFF)
                .set_border(FormatBorder::Thin),
            text: Format::new().set_border(FormatBorder::Thin),
            number: Format::new()
                .set_num_format("#,##0")
                .set_border(FormatBorder::Thin),
            hours: Format::new()
                .set_num_format("#,##0.00")
                .set_border(FormatBorder::Thin),
            total_text: Format::new()
                .set_bold()
                .set_background_color(0xE2EFDA)
                .set_border(FormatBorder::Thin),
            total_number: Format::new()
                .set_bold()
                .set_num_format("#,##0")
                .set_background_color(0xE2EFDA)
                .set_border(FormatBorder::Thin),
            total_hours: Format::new()
                .set_bold()
                .set_num_format("#,##0.00")
                .set_background_color(0xE2EFDA)
                .set_border(FormatBorder::Thin),
        }
    }

    fn for_row(&self, is_total: bool) -> (&Format, &Format, &Format) {
        if is_total {
            (&self.total_text, &self.total_number, &self.total_hours)
        } else {
            (&self.text, &self.number, &self.hours)
        }
    }
}

fn spreadsheet_error(err: XlsxError) -> ServiceError {
    ServiceError::SpreadsheetError(err.to_string().into())
}

#[derive(Debug, PartialEq)]
struct RowCells<'a> {
    day_index: u32,
    date: String,
    marker: &'static str,
    title: &'a str,
    category: &'a str,
    minutes: u32,
    hours: f64,
    is_total: bool,
}

fn row_cells(row: &ReportRow) -> RowCells<'_> {
    let (title, category) = match row {
        ReportRow::Activity(activity) => (
            activity.title.as_ref(),
            activity.category.as_deref().unwrap_or(""),
        ),
        ReportRow::DayTotal(_) => ("", ""),
    };
    RowCells {
        day_index: row.day_index(),
        date: row.date().to_string(),
        marker: row.marker(),
        title,
        category,
        minutes: row.minutes(),
        hours: row.minutes() as f64 / 60.0,
        is_total: row.is_day_total(),
    }
}

fn write_row(
    sheet: &mut Worksheet,
    row_number: u32,
    row: &ReportRow,
    formats: &ReportFormats,
) -> Result<(), XlsxError> {
    let cells = row_cells(row);
    let (text, number, hours) = formats.for_row(cells.is_total);

    sheet.write_with_format(row_number, 0, cells.day_index, number)?;
    sheet.write_with_format(row_number, 1, cells.date.as_str(), text)?;
    sheet.write_with_format(row_number, 2, cells.marker, text)?;
    sheet.write_with_format(row_number, 3, cells.title, text)?;
    sheet.write_with_format(row_number, 4, cells.category, text)?;
    sheet.write_with_format(row_number, 5, cells.minutes, number)?;
    sheet.write_with_format(row_number, 6, cells.hours, hours)?;
    Ok(())
}

/// One header row followed by one line per report row, in report order.
pub fn write_report_workbook(rows: &[ReportRow]) -> Result<Vec<u8>, ServiceError> {
    let mut workbook = Workbook::new();
    let formats = ReportFormats::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME).map_err(spreadsheet_error)?;
    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_with_format(0, col as u16, *header, &formats.header)
            .map_err(spreadsheet_error)?;
    }
    sheet
        .set_column_width(1, 12)
        .map_err(spreadsheet_error)?;
    sheet
        .set_column_width(3, 40)
        .map_err(spreadsheet_error)?;
    sheet
        .set_column_width(4, 20)
        .map_err(spreadsheet_error)?;

    for (index, row) in rows.iter().enumerate() {
        write_row(sheet, index as u32 + 1, row, &formats).map_err(spreadsheet_error)?;
    }

    workbook.save_to_buffer().map_err(spreadsheet_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::{
        activity::ActivityStatus,
        report::{ActivityRow, DayTotalRow, DAY_TOTAL_MARKER},
    };
    use time::macros::date;
    use uuid::Uuid;

    #[test]
    fn test_empty_report_is_a_valid_workbook() {
        let bytes = write_report_workbook(&[]).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_xlsx_errors_become_spreadsheet_errors() {
        let err = spreadsheet_error(XlsxError::ParameterError("column width".into()));
        assert!(
            matches!(err, ServiceError::SpreadsheetError(message) if message.contains("column width"))
        );
    }

    fn review_rows() -> [ReportRow; 2] {
        [
            ReportRow::Activity(ActivityRow {
                day_index: 1,
                id: Uuid::nil(),
                user_id: Uuid::nil(),
                date: date!(2025 - 10 - 06),
                minutes_spent: 90,
                status: ActivityStatus::Done,
                title: "Code review".into(),
                category: Some("Development".into()),
            }),
            ReportRow::DayTotal(DayTotalRow {
                day_index: 1,
                date: date!(2025 - 10 - 06),
                total_minutes: 90,
            }),
        ]
    }

    #[test]
    fn test_report_with_total_rows() {
        let bytes = write_report_workbook(&review_rows()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_activity_cells() {
        let rows = review_rows();
        let cells = row_cells(&rows[0]);
        assert_eq!(cells.day_index, 1);
        assert_eq!(cells.date, "2025-10-06");
        assert_eq!(cells.title, "Code review");
        assert_eq!(cells.category, "Development");
        assert_eq!(cells.minutes, 90);
        assert_eq!(cells.hours, 1.5);
        assert!(!cells.is_total);
        assert_ne!(cells.marker, DAY_TOTAL_MARKER);
    }

    #[test]
    fn test_day_total_cells() {
        let rows = review_rows();
        assert_eq!(
            row_cells(&rows[1]),
            RowCells {
                day_index: 1,
                date: "2025-10-06".into(),
                marker: DAY_TOTAL_MARKER,
                title: "",
                category: "",
                minutes: 90,
                hours: 1.5,
                is_total: true,
            }
        );
    }

    #[test]
    fn test_total_rows_use_total_formats() {
        let formats = ReportFormats::new();
        let (text, number, hours) = formats.for_row(true);
        assert_eq!(text, &formats.total_text);
        assert_eq!(number, &formats.total_number);
        assert_eq!(hours, &formats.total_hours);
        assert_ne!(text, &formats.text);

        let (text, number, hours) = formats.for_row(false);
        assert_eq!(text, &formats.text);
        assert_eq!(number, &formats.number);
        assert_eq!(hours, &formats.hours);
    }
}
