//! Platform-agnostic dashboard logic: parsing, filtering, aggregation and
//! formatting. Nothing in here touches Dioxus.

pub mod aggregate;
pub mod config;
pub mod filter;
pub mod format;
pub mod ingest;
pub mod record;
pub mod upload;

pub use aggregate::{KpiSet, PeriodPoint, PlatformSlice};
pub use config::{ColumnMapping, CurrencyLocale, DashboardConfig};
pub use filter::{FilterState, Selection};
pub use ingest::ParseError;
pub use record::{CampaignRecord, CellValue, Dataset};
