mod charts;
pub use charts::{RoiCtrChart, SpendRevenueChart, SpendShareChart};

mod export;
pub use export::ExportButton;

mod session;
pub use session::{provide_dashboard_session, use_dashboard_state};

mod kpis;
pub use kpis::KpiGrid;

mod table;
pub use table::DetailTable;

mod toolbar;
pub use toolbar::UploadToolbar;

use tracing::warn;

use crate::t;

use crate::core::{
    aggregate::{self, KpiSet, PeriodPoint, PlatformSlice},
    filter::{self, FilterState},
    record::{CampaignRecord, Dataset},
    ParseError,
};

/// Session state for the dashboard: the loaded dataset, the active filter and
/// the outcome of the last upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub dataset: Dataset,
    pub filter: FilterState,
    pub error: Option<String>,
    pub file_name: Option<String>,
}

impl DashboardState {
    /// A successful parse replaces the dataset wholesale and drops stale
    /// selections; a failure keeps whatever was loaded before.
    pub fn apply_upload(&mut self, file_name: String, result: Result<Dataset, ParseError>) {
        match result {
            Ok(dataset) => {
                self.filter = self.filter.reconcile(&dataset.records);
                self.dataset = dataset;
                self.file_name = Some(file_name);
                self.error = None;
            }
            Err(err) => {
                warn!(file = %file_name, "upload rejected: {err}");
                let reason = err.to_string();
                self.error = Some(t!("upload-failed", file = file_name, reason = reason));
            }
        }
    }

    /// An upload without data rows leaves the dashboard on its instructional
    /// empty screen.
    pub fn has_data(&self) -> bool {
        !self.dataset.is_empty()
    }

    pub fn visible(&self) -> Vec<&CampaignRecord> {
        self.filter.apply(&self.dataset.records)
    }

    pub fn kpis(&self) -> KpiSet {
        aggregate::summarize(self.visible())
    }

    pub fn series(&self) -> Vec<PeriodPoint> {
        aggregate::monthly_series(self.visible())
    }

    pub fn breakdown(&self) -> Vec<PlatformSlice> {
        aggregate::platform_breakdown(self.visible())
    }

    /// Filters once and derives everything the page renders.
    pub fn view(&self) -> DashboardView {
        let visible = self.visible();
        DashboardView {
            periods: filter::available_periods(&self.dataset.records),
            platforms: filter::available_platforms(&self.dataset.records),
            kpis: aggregate::summarize(visible.iter().copied()),
            series: aggregate::monthly_series(visible.iter().copied()),
            breakdown: aggregate::platform_breakdown(visible.iter().copied()),
            columns: self.dataset.columns.clone(),
            rows: visible.into_iter().cloned().collect(),
        }
    }
}

/// Everything the components render, derived from [`DashboardState`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub periods: Vec<String>,
    pub platforms: Vec<String>,
    pub kpis: KpiSet,
    pub series: Vec<PeriodPoint>,
    pub breakdown: Vec<PlatformSlice>,
    pub columns: Vec<String>,
    pub rows: Vec<CampaignRecord>,
}

/// Label used wherever a record has no period / platform value.
pub(crate) fn label_or_dash(label: Option<&str>) -> &str {
    label.unwrap_or("—")
}
