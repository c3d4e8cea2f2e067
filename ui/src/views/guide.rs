use dioxus::prelude::*;

use crate::core::config::{ColumnUsage, DashboardConfig};
use crate::t;

fn usage_label(usage: ColumnUsage) -> String {
    match usage {
        ColumnUsage::GroupingKey => t!("guide-usage-grouping"),
        ColumnUsage::Summed => t!("guide-usage-summed"),
        ColumnUsage::Averaged => t!("guide-usage-averaged"),
        ColumnUsage::DisplayOnly => t!("guide-usage-display"),
    }
}

/// Lists the spreadsheet headers the dashboard looks for and what each feeds.
#[component]
pub fn ColumnGuide() -> Element {
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang = lang_code.map(|code| code()).unwrap_or_default();

    let config = try_use_context::<DashboardConfig>().unwrap_or_default();
    let rows: Vec<(String, String)> = config
        .columns
        .expected_columns()
        .into_iter()
        .map(|column| (column.header, usage_label(column.usage)))
        .collect();

    rsx! {
        section { class: "page page-guide",
            h1 { {t!("guide-title")} }
            p { {t!("guide-intro")} }

            div { class: "card card--wide",
                table { class: "table",
                    thead {
                        tr {
                            th { {t!("guide-column-header")} }
                            th { {t!("guide-column-usage")} }
                        }
                    }
                    tbody {
                        for (header, usage) in rows.into_iter() {
                            tr { key: "{header}",
                                td { code { "{header}" } }
                                td { "{usage}" }
                            }
                        }
                    }
                }
            }

            p { class: "page-guide__note", {t!("guide-note")} }
        }
    }
}
