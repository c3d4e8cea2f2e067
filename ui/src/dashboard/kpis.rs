use dioxus::prelude::*;

use crate::core::{aggregate::KpiSet, config::CurrencyLocale, format};
use crate::t;

#[component]
pub fn KpiGrid(kpis: KpiSet, locale: CurrencyLocale) -> Element {
    let cards = [
        (t!("kpi-spend"), format::format_currency(kpis.total_spend, locale)),
        (t!("kpi-revenue"), format::format_currency(kpis.total_revenue, locale)),
        (t!("kpi-roi"), format::format_percent(kpis.roi)),
        (t!("kpi-roas"), format::format_ratio(kpis.roas)),
        (t!("kpi-leads"), format::format_count(kpis.total_leads, locale)),
        (t!("kpi-sales"), format::format_count(kpis.total_sales, locale)),
    ];

    rsx! {
        div { class: "kpi-grid",
            for (title, value) in cards.into_iter() {
                div { class: "kpi", key: "{title}",
                    h3 { class: "kpi__title", "{title}" }
                    div { class: "kpi__value", "{value}" }
                }
            }
        }
    }
}
