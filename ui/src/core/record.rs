//! Campaign rows as parsed from an uploaded spreadsheet.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::Attribute;

/// Raw value of a non-empty worksheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// Numeric reading of the cell. Missing, non-numeric and non-finite values
    /// read as `0.0`.
    pub fn as_number(&self) -> f64 {
        let value = match self {
            CellValue::Number(value) => *value,
            CellValue::Text(text) => text.trim().parse::<f64>().unwrap_or(0.0),
            CellValue::Bool(_) => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    /// Display text, used for labels (`period`, `platform`) and the detail table.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// A cell kept verbatim for display, tagged with the attribute it fed (if any).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub column: String,
    pub value: CellValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Attribute>,
}

/// One worksheet row. Numeric attributes are already coerced (missing or
/// unparseable → 0) so aggregation never sees raw cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub period: Option<String>,
    pub platform: Option<String>,
    pub spend: f64,
    pub revenue: f64,
    pub leads: f64,
    pub sales: f64,
    pub click_through_rate: f64,
    /// Every non-empty cell of the row in header order.
    pub fields: Vec<Field>,
}

impl CampaignRecord {
    pub fn period(&self) -> Option<&str> {
        self.period.as_deref()
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    pub fn field(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|field| field.column == column)
            .map(|field| &field.value)
    }

    /// Columns that did not map onto a typed attribute.
    pub fn extra_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.attribute.is_none())
    }

    pub(crate) fn assign(&mut self, attribute: Attribute, value: &CellValue) {
        match attribute {
            Attribute::Period => self.period = non_empty_label(value),
            Attribute::Platform => self.platform = non_empty_label(value),
            Attribute::Spend => self.spend = value.as_number(),
            Attribute::Revenue => self.revenue = value.as_number(),
            Attribute::Leads => self.leads = value.as_number(),
            Attribute::Sales => self.sales = value.as_number(),
            Attribute::ClickThroughRate => self.click_through_rate = value.as_number(),
        }
    }
}

fn non_empty_label(value: &CellValue) -> Option<String> {
    let label = value.label();
    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}

/// Result of one upload: the normalised header row plus its records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub records: Vec<CampaignRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_coercion_defaults_to_zero() {
        assert_eq!(CellValue::Number(12.5).as_number(), 12.5);
        assert_eq!(CellValue::Text(" 42 ".into()).as_number(), 42.0);
        assert_eq!(CellValue::Text("R$ 10".into()).as_number(), 0.0);
        assert_eq!(CellValue::Text("NaN".into()).as_number(), 0.0);
        assert_eq!(CellValue::Text("inf".into()).as_number(), 0.0);
        assert_eq!(CellValue::Bool(true).as_number(), 0.0);
    }

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(CellValue::Number(2024.0).label(), "2024");
        assert_eq!(CellValue::Number(2.5).label(), "2.5");
        assert_eq!(CellValue::Bool(false).label(), "false");
    }

    #[test]
    fn assign_routes_cells_to_typed_attributes() {
        let mut record = CampaignRecord::default();
        record.assign(Attribute::Period, &CellValue::Text("2024-01".into()));
        record.assign(Attribute::Spend, &CellValue::Text("abc".into()));
        record.assign(Attribute::Revenue, &CellValue::Number(300.0));
        record.assign(Attribute::Platform, &CellValue::Text(String::new()));

        assert_eq!(record.period(), Some("2024-01"));
        assert_eq!(record.platform(), None);
        assert_eq!(record.spend, 0.0);
        assert_eq!(record.revenue, 300.0);
    }
}
