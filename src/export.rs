//! Spreadsheet Export
//!
//! Encodes the receipt list as an `.xlsx` workbook.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

use crate::models::Receipt;

pub const EXPORT_FILE_NAME: &str = "receipts_data.xlsx";
pub const SHEET_NAME: &str = "Receipts";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Header label and column width, in sheet order
pub const COLUMNS: [(&str, f64); 7] = [
    ("Description", 30.0),
    ("Store", 30.0),
    ("Price with GST", 20.0),
    ("Date", 15.0),
    ("Purpose", 15.0),
    ("Person", 15.0),
    ("Image URL", 40.0),
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no receipts to export")]
    Empty,
    #[error("failed to build workbook: {0}")]
    Xlsx(#[from] XlsxError),
}

/// One sheet row
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub description: String,
    pub store: String,
    pub price: Option<f64>,
    pub date: String,
    pub purpose: String,
    pub person: String,
    pub image_url: String,
}

pub fn export_rows(receipts: &[Receipt], format_date: impl Fn(NaiveDate) -> String) -> Vec<ExportRow> {
    receipts
        .iter()
        .map(|r| ExportRow {
            description: r.description.clone(),
            store: r.store.clone(),
            price: r.price_with_gst.and_then(|p| p.to_f64()),
            date: r.date.map(&format_date).unwrap_or_default(),
            purpose: r.purpose_label().to_string(),
            person: r.person_label().to_string(),
            image_url: r.image_url.clone(),
        })
        .collect()
}

/// Encode `receipts` into workbook bytes
pub fn build_workbook(
    receipts: &[Receipt],
    format_date: impl Fn(NaiveDate) -> String,
) -> Result<Vec<u8>, ExportError> {
    if receipts.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, (label, width)) in (0u16..).zip(COLUMNS) {
        sheet.write_string_with_format(0, col, label, &bold)?;
        sheet.set_column_width(col, width)?;
    }

    for (row, receipt) in (1u32..).zip(export_rows(receipts, format_date)) {
        sheet.write_string(row, 0, &receipt.description)?;
        sheet.write_string(row, 1, &receipt.store)?;
        if let Some(price) = receipt.price {
            sheet.write_number(row, 2, price)?;
        }
        sheet.write_string(row, 3, &receipt.date)?;
        sheet.write_string(row, 4, &receipt.purpose)?;
        sheet.write_string(row, 5, &receipt.person)?;
        sheet.write_string(row, 6, &receipt.image_url)?;
    }

    tracing::debug!(rows = receipts.len(), "workbook built");
    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::receipt;
    use crate::models::{Person, Purpose};

    fn iso(date: NaiveDate) -> String {
        date.format("%d/%m/%Y").to_string()
    }

    #[test]
    fn test_empty_list_is_not_exported() {
        assert!(matches!(build_workbook(&[], iso), Err(ExportError::Empty)));
    }

    #[test]
    fn test_rows_follow_receipts() {
        let mut undated = receipt("b", "", None, Purpose::Ecom);
        undated.price_with_gst = None;
        let receipts = vec![receipt("a", "2024-02-29", Some(Person::Hesh), Purpose::Work), undated];

        let rows = export_rows(&receipts, iso);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "29/02/2024");
        assert_eq!(rows[0].price, Some(12.5));
        assert_eq!(rows[0].person, "Hesh");
        assert_eq!(rows[1].date, "");
        assert_eq!(rows[1].price, None);
        assert_eq!(rows[1].person, "");
        assert_eq!(rows[1].image_url, "https://images.example/b.jpg");
    }

    #[test]
    fn test_header_order() {
        let labels: Vec<_> = COLUMNS.iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            ["Description", "Store", "Price with GST", "Date", "Purpose", "Person", "Image URL"]
        );
    }

    /// Text of one part of the workbook package
    fn package_part(bytes: &[u8], name: &str) -> String {
        use std::io::Read;

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut xml).unwrap();
        xml
    }

    /// `<t>` values of the shared string table, in table order
    fn shared_strings(xml: &str) -> Vec<&str> {
        xml.split("<t>")
            .skip(1)
            .filter_map(|chunk| chunk.split("</t>").next())
            .collect()
    }

    #[test]
    fn test_workbook_layout() {
        let receipts: Vec<_> = (0..3)
            .map(|i| receipt(&i.to_string(), "2024-01-01", Some(Person::Harsha), Purpose::Uber))
            .collect();

        let bytes = build_workbook(&receipts, iso).unwrap();
        assert!(bytes.starts_with(b"PK"));

        let workbook = package_part(&bytes, "xl/workbook.xml");
        assert!(workbook.contains(r#"name="Receipts""#));

        let sheet = package_part(&bytes, "xl/worksheets/sheet1.xml");
        assert_eq!(sheet.matches("<row ").count(), receipts.len() + 1);
        assert_eq!(sheet.matches("<v>12.5</v>").count(), receipts.len());

        let strings = package_part(&bytes, "xl/sharedStrings.xml");
        let labels: Vec<_> = COLUMNS.iter().map(|(label, _)| *label).collect();
        assert_eq!(shared_strings(&strings)[..COLUMNS.len()], labels[..]);
        assert!(shared_strings(&strings).contains(&"01/01/2024"));
    }
}
