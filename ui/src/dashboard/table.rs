use dioxus::prelude::*;

use crate::core::record::CampaignRecord;
use crate::t;

/// Every visible record, cell values shown verbatim under the normalised
/// header row.
#[component]
pub fn DetailTable(columns: Vec<String>, rows: Vec<CampaignRecord>) -> Element {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.field(column).map(|v| v.label()).unwrap_or_default())
                .collect()
        })
        .collect();

    rsx! {
        section { class: "card card--wide",
            div { class: "card__header",
                h2 { class: "section-title", {t!("table-title")} }
                span { class: "card__meta", {t!("toolbar-rows", count = rows.len())} }
            }

            if body.is_empty() {
                p { class: "card__placeholder", {t!("table-empty")} }
            } else {
                div { class: "table-scroll",
                    table { class: "table",
                        thead {
                            tr {
                                for column in columns.iter() {
                                    th { key: "{column}", "{column}" }
                                }
                            }
                        }
                        tbody {
                            for (index, cells) in body.into_iter().enumerate() {
                                tr { key: "{index}",
                                    for cell in cells.into_iter() {
                                        td { "{cell}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
