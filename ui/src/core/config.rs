//! Dashboard configuration: which spreadsheet headers feed which record
//! attributes, and how money is presented.
//!
//! The defaults describe the layout the dashboard was built around
//! (`Mês/Ano`, `Plataforma`, `Gasto Real`, ...). A JSON document can override
//! any subset of fields:
//!
//! ```json
//! { "columns": { "spend": "Spend", "revenue": "Revenue" }, "locale": "en-US" }
//! ```
//!
//! On desktop an optional `adlens.json` in the platform config directory is
//! picked up by [`DashboardConfig::load_or_default`]; the web build always uses
//! the defaults.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Typed record attribute a spreadsheet column can feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Period,
    Platform,
    Spend,
    Revenue,
    Leads,
    Sales,
    ClickThroughRate,
}

impl Attribute {
    pub const ALL: [Attribute; 7] = [
        Attribute::Period,
        Attribute::Platform,
        Attribute::Spend,
        Attribute::Revenue,
        Attribute::Leads,
        Attribute::Sales,
        Attribute::ClickThroughRate,
    ];

    pub fn usage(self) -> ColumnUsage {
        match self {
            Attribute::Period | Attribute::Platform => ColumnUsage::GroupingKey,
            Attribute::Spend | Attribute::Revenue | Attribute::Leads | Attribute::Sales => {
                ColumnUsage::Summed
            }
            Attribute::ClickThroughRate => ColumnUsage::Averaged,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attribute::Period => "period",
            Attribute::Platform => "platform",
            Attribute::Spend => "spend",
            Attribute::Revenue => "revenue",
            Attribute::Leads => "leads",
            Attribute::Sales => "sales",
            Attribute::ClickThroughRate => "click_through_rate",
        };
        f.write_str(name)
    }
}

/// How the dashboard consumes a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnUsage {
    GroupingKey,
    Summed,
    Averaged,
    DisplayOnly,
}

/// One row of the column guide.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedColumn {
    pub header: String,
    pub usage: ColumnUsage,
}

/// Exact header names (case and punctuation sensitive) for each attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub period: String,
    pub platform: String,
    pub spend: String,
    pub revenue: String,
    pub leads: String,
    pub sales: String,
    pub click_through_rate: String,
    /// Listed in the column guide only; the value stays a pass-through field.
    pub cost_per_click: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            period: "Mês/Ano".into(),
            platform: "Plataforma".into(),
            spend: "Gasto Real".into(),
            revenue: "Receita".into(),
            leads: "Leads".into(),
            sales: "Vendas".into(),
            click_through_rate: "CTR (%)".into(),
            cost_per_click: "CPC".into(),
        }
    }
}

impl ColumnMapping {
    pub fn header(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::Period => &self.period,
            Attribute::Platform => &self.platform,
            Attribute::Spend => &self.spend,
            Attribute::Revenue => &self.revenue,
            Attribute::Leads => &self.leads,
            Attribute::Sales => &self.sales,
            Attribute::ClickThroughRate => &self.click_through_rate,
        }
    }

    /// Exact-match lookup of a (normalised) header name.
    pub fn resolve(&self, header: &str) -> Option<Attribute> {
        Attribute::ALL
            .into_iter()
            .find(|attribute| self.header(*attribute) == header)
    }

    pub fn expected_columns(&self) -> Vec<ExpectedColumn> {
        let mut columns: Vec<ExpectedColumn> = Attribute::ALL
            .into_iter()
            .map(|attribute| ExpectedColumn {
                header: self.header(attribute).to_string(),
                usage: attribute.usage(),
            })
            .collect();
        columns.push(ExpectedColumn {
            header: self.cost_per_click.clone(),
            usage: ColumnUsage::DisplayOnly,
        });
        columns
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (index, first) in Attribute::ALL.iter().enumerate() {
            for second in &Attribute::ALL[index + 1..] {
                if self.header(*first) == self.header(*second) {
                    return Err(ConfigError::DuplicateHeader {
                        header: self.header(*first).to_string(),
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Locale used for currency and count formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CurrencyLocale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub columns: ColumnMapping,
    pub locale: CurrencyLocale,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid dashboard config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("header {header:?} is mapped to both {first} and {second}")]
    DuplicateHeader {
        header: String,
        first: Attribute,
        second: Attribute,
    },

    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DashboardConfig {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = serde_json::from_str(source)?;
        config.columns.validate()?;
        Ok(config)
    }

    /// Defaults, overridden by `adlens.json` in the user config directory when
    /// present. A malformed file is logged and ignored.
    pub fn load_or_default() -> Self {
        match Self::load_user_file() {
            Ok(Some(config)) => {
                info!("loaded dashboard config overrides");
                config
            }
            Ok(None) => Self::default(),
            Err(err) => {
                warn!("{err}; falling back to default dashboard config");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn load_user_file() -> Result<Option<Self>, ConfigError> {
        let Some(dirs) = directories::ProjectDirs::from("com", "Adlens", "Adlens") else {
            return Ok(None);
        };
        let path = dirs.config_dir().join("adlens.json");
        if !path.exists() {
            return Ok(None);
        }
        let source = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&source).map(Some)
    }

    #[cfg(target_arch = "wasm32")]
    fn load_user_file() -> Result<Option<Self>, ConfigError> {
        Ok(None)
    }
}
