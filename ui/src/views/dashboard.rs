use dioxus::prelude::*;

use crate::core::config::DashboardConfig;
use crate::dashboard::{
    use_dashboard_state, DetailTable, ExportButton, KpiGrid, RoiCtrChart, SpendRevenueChart,
    SpendShareChart, UploadToolbar,
};
use crate::t;

/// The single-page dashboard: upload, filter, KPIs, charts and detail table.
#[component]
pub fn Dashboard() -> Element {
    // Re-render when the navbar switches language.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang = lang_code.map(|code| code()).unwrap_or_default();

    let config = try_use_context::<DashboardConfig>().unwrap_or_default();
    let state = use_dashboard_state();
    let view = use_memo(move || state.read().view());
    let has_data = state.read().has_data();

    let view = view();
    let expected = config
        .columns
        .expected_columns()
        .into_iter()
        .map(|column| column.header)
        .collect::<Vec<_>>()
        .join(", ");

    rsx! {
        section { class: "page page-dashboard",
            h1 { {t!("dashboard-title")} }

            UploadToolbar {
                state,
                mapping: config.columns.clone(),
                periods: view.periods.clone(),
                platforms: view.platforms.clone(),
                visible_rows: view.rows.len(),
            }

            if !has_data {
                p { class: "page-dashboard__empty",
                    {t!("empty-state-intro")}
                    " "
                    i { "{expected}" }
                }
            } else {
                KpiGrid { kpis: view.kpis, locale: config.locale }

                div { class: "chart-grid",
                    SpendRevenueChart { breakdown: view.breakdown.clone() }
                    SpendShareChart { breakdown: view.breakdown.clone(), locale: config.locale }
                    RoiCtrChart { series: view.series.clone() }
                }

                DetailTable { columns: view.columns.clone(), rows: view.rows.clone() }

                ExportButton { columns: view.columns.clone(), rows: view.rows.clone() }
            }
        }
    }
}
