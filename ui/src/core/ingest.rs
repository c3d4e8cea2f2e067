//! Spreadsheet ingestion: workbook bytes → [`Dataset`].
//!
//! Only the first worksheet is read. Its first row names the columns; every
//! following row with at least one non-empty cell becomes a
//! [`CampaignRecord`]. Header names are normalised the way spreadsheet-to-JSON
//! exporters do it: blank headers become `__EMPTY`, repeats get `_1`, `_2`, ...
//! suffixes. Mapping onto typed attributes happens on the normalised name.

use std::collections::{HashMap, HashSet};
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use thiserror::Error;
use tracing::{debug, info};

use super::config::ColumnMapping;
use super::record::{CampaignRecord, CellValue, Dataset, Field};

const EMPTY_HEADER: &str = "__EMPTY";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("file is not a readable spreadsheet: {0}")]
    Container(#[source] calamine::Error),

    #[error("file contents could not be read")]
    Unreadable,

    #[error("workbook contains no worksheets")]
    NoWorksheet,

    #[error("could not read worksheet {sheet:?}: {source}")]
    Worksheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("worksheet {sheet:?} has no data rows")]
    NoDataRows { sheet: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Treat a header-only or blank worksheet as [`ParseError::NoDataRows`]
    /// instead of an empty dataset.
    pub reject_empty: bool,
}

/// Parse an uploaded workbook with default options.
pub fn ingest(bytes: &[u8], mapping: &ColumnMapping) -> Result<Dataset, ParseError> {
    ingest_with(bytes, mapping, IngestOptions::default())
}

pub fn ingest_with(
    bytes: &[u8],
    mapping: &ColumnMapping,
    options: IngestOptions,
) -> Result<Dataset, ParseError> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(ParseError::Container)?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ParseError::NoWorksheet)?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|source| ParseError::Worksheet {
            sheet: sheet.clone(),
            source,
        })?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_value).collect::<Vec<_>>());
    let dataset = build_dataset(rows, mapping);

    if dataset.is_empty() && options.reject_empty {
        return Err(ParseError::NoDataRows { sheet });
    }

    let unmapped: Vec<&str> = dataset
        .columns
        .iter()
        .filter(|column| mapping.resolve(column).is_none())
        .map(String::as_str)
        .collect();
    info!(
        sheet = %sheet,
        rows = dataset.len(),
        columns = dataset.columns.len(),
        ?unmapped,
        "ingested worksheet"
    );

    Ok(dataset)
}

/// Assemble a dataset from raw rows; the first row is the header.
pub(crate) fn build_dataset<I>(mut rows: I, mapping: &ColumnMapping) -> Dataset
where
    I: Iterator<Item = Vec<Option<CellValue>>>,
{
    let Some(header_row) = rows.next() else {
        return Dataset::default();
    };
    let columns = normalize_headers(&header_row);

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        if row.iter().all(Option::is_none) {
            skipped += 1;
            continue;
        }
        records.push(build_record(&columns, row, mapping));
    }

    if skipped > 0 {
        debug!(skipped, "skipped blank rows");
    }

    Dataset { columns, records }
}

fn build_record(
    columns: &[String],
    row: Vec<Option<CellValue>>,
    mapping: &ColumnMapping,
) -> CampaignRecord {
    let mut record = CampaignRecord::default();

    for (column, cell) in columns.iter().zip(row) {
        let Some(value) = cell else {
            continue;
        };
        let attribute = mapping.resolve(column);
        if let Some(attribute) = attribute {
            record.assign(attribute, &value);
        }
        record.fields.push(Field {
            column: column.clone(),
            value,
            attribute,
        });
    }

    record
}

pub(crate) fn normalize_headers(cells: &[Option<CellValue>]) -> Vec<String> {
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut used: HashSet<String> = HashSet::new();

    cells
        .iter()
        .map(|cell| {
            let base = cell
                .as_ref()
                .map(CellValue::label)
                .filter(|label| !label.is_empty())
                .unwrap_or_else(|| EMPTY_HEADER.to_string());

            let counter = counters.entry(base.clone()).or_insert(0);
            let mut name = if *counter == 0 {
                base.clone()
            } else {
                format!("{base}_{counter}")
            };
            while used.contains(&name) {
                *counter += 1;
                name = format!("{base}_{counter}");
            }
            *counter += 1;
            used.insert(name.clone());
            name
        })
        .collect()
}

fn cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty => None,
        Data::String(text) if text.is_empty() => None,
        Data::String(text) => Some(CellValue::Text(text.clone())),
        Data::Float(value) => Some(CellValue::Number(*value)),
        Data::Int(value) => Some(CellValue::Number(*value as f64)),
        Data::Bool(value) => Some(CellValue::Bool(*value)),
        // Serial day number, matching what the sheet stores.
        Data::DateTime(value) => Some(CellValue::Number(value.as_f64())),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Some(CellValue::Text(text.clone())),
        Data::Error(err) => Some(CellValue::Text(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Attribute;
    use rust_xlsxwriter::Workbook;

    fn text(value: &str) -> Option<CellValue> {
        Some(CellValue::Text(value.to_string()))
    }

    fn number(value: f64) -> Option<CellValue> {
        Some(CellValue::Number(value))
    }

    fn campaign_workbook() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let headers = [
            "Mês/Ano",
            "Plataforma",
            "Gasto Real",
            "Receita",
            "Leads",
            "Vendas",
            "CTR (%)",
            "CPC",
        ];
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }

        sheet.write_string(1, 0, "2024-01").unwrap();
        sheet.write_string(1, 1, "Google").unwrap();
        sheet.write_number(1, 2, 100.0).unwrap();
        sheet.write_number(1, 3, 300.0).unwrap();
        sheet.write_number(1, 4, 10.0).unwrap();
        sheet.write_number(1, 5, 2.0).unwrap();
        sheet.write_number(1, 6, 2.5).unwrap();
        sheet.write_number(1, 7, 1.2).unwrap();

        sheet.write_string(2, 0, "2024-01").unwrap();
        sheet.write_string(2, 1, "Meta").unwrap();
        sheet.write_string(2, 2, "200").unwrap();
        sheet.write_number(2, 3, 100.0).unwrap();
        sheet.write_number(2, 4, 5.0).unwrap();
        sheet.write_string(2, 5, "n/a").unwrap();
        sheet.write_number(2, 6, 1.0).unwrap();

        // A second sheet must be ignored.
        let other = workbook.add_worksheet();
        other.write_string(0, 0, "Mês/Ano").unwrap();
        other.write_string(1, 0, "1999-12").unwrap();

        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn parses_first_sheet_into_records() {
        let dataset = ingest(&campaign_workbook(), &ColumnMapping::default()).unwrap();

        assert_eq!(dataset.columns.len(), 8);
        assert_eq!(dataset.len(), 2);

        let google = &dataset.records[0];
        assert_eq!(google.period(), Some("2024-01"));
        assert_eq!(google.platform(), Some("Google"));
        assert_eq!(google.spend, 100.0);
        assert_eq!(google.revenue, 300.0);
        assert_eq!(google.leads, 10.0);
        assert_eq!(google.sales, 2.0);
        assert_eq!(google.click_through_rate, 2.5);
        assert_eq!(google.field("CPC"), Some(&CellValue::Number(1.2)));
        assert_eq!(google.extra_fields().count(), 1);

        let meta = &dataset.records[1];
        assert_eq!(meta.spend, 200.0);
        assert_eq!(meta.sales, 0.0);
        assert_eq!(meta.field("Vendas"), Some(&CellValue::Text("n/a".into())));
        assert_eq!(meta.field("CPC"), None);
    }

    #[test]
    fn ingesting_same_bytes_twice_is_identical() {
        let bytes = campaign_workbook();
        let mapping = ColumnMapping::default();
        let first = ingest(&bytes, &mapping).unwrap();
        let second = ingest(&bytes, &mapping).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let result = ingest(b"definitely not a workbook", &ColumnMapping::default());
        assert!(matches!(result, Err(ParseError::Container(_))));
    }

    #[test]
    fn header_only_sheet_is_empty_unless_rejected() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Mês/Ano").unwrap();
        sheet.write_string(0, 1, "Receita").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let mapping = ColumnMapping::default();
        let dataset = ingest(&bytes, &mapping).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.columns, vec!["Mês/Ano", "Receita"]);

        let strict = ingest_with(
            &bytes,
            &mapping,
            IngestOptions {
                reject_empty: true,
            },
        );
        assert!(matches!(strict, Err(ParseError::NoDataRows { .. })));
    }

    #[test]
    fn headers_are_deduplicated_and_blank_ones_named() {
        let headers = normalize_headers(&[
            text("Receita"),
            None,
            text("Receita"),
            None,
            text("Receita_1"),
        ]);
        assert_eq!(
            headers,
            vec!["Receita", "__EMPTY", "Receita_1", "__EMPTY_1", "Receita_1_1"]
        );
    }

    #[test]
    fn duplicate_header_maps_only_first_occurrence() {
        let rows = vec![
            vec![text("Receita"), text("Receita")],
            vec![number(10.0), number(99.0)],
        ];
        let dataset = build_dataset(rows.into_iter(), &ColumnMapping::default());
        let record = &dataset.records[0];
        assert_eq!(record.revenue, 10.0);
        assert_eq!(record.fields[0].attribute, Some(Attribute::Revenue));
        assert_eq!(record.fields[1].column, "Receita_1");
        assert_eq!(record.fields[1].attribute, None);
    }

    #[test]
    fn blank_rows_are_skipped() {
        let rows = vec![
            vec![text("Plataforma"), text("Gasto Real")],
            vec![None, None],
            vec![text("Meta"), number(5.0)],
        ];
        let dataset = build_dataset(rows.into_iter(), &ColumnMapping::default());
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].platform(), Some("Meta"));
    }

    #[test]
    fn numeric_period_labels_use_display_text() {
        let rows = vec![vec![text("Mês/Ano")], vec![number(2024.0)]];
        let dataset = build_dataset(rows.into_iter(), &ColumnMapping::default());
        assert_eq!(dataset.records[0].period(), Some("2024"));
    }
}
