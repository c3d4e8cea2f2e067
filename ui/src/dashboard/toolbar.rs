use dioxus::prelude::*;
use tracing::{debug, info};

use crate::core::{
    config::ColumnMapping,
    filter::{Selection, ALL_CHOICE},
    ingest::{self, ParseError},
    upload::UploadSequencer,
};
use crate::dashboard::DashboardState;
use crate::t;

const ACCEPTED_FILES: &str = ".xlsx,.xls,.xlsb,.ods";

/// File picker, period / platform selectors and the visible-row badge.
#[component]
pub fn UploadToolbar(
    state: Signal<DashboardState>,
    mapping: ColumnMapping,
    periods: Vec<String>,
    platforms: Vec<String>,
    visible_rows: usize,
) -> Element {
    let mut state = state;
    let mut sequencer = use_signal(UploadSequencer::default);
    let mut reading = use_signal(|| Option::<String>::None);

    let on_file = move |evt: FormEvent| {
        let mapping = mapping.clone();
        async move {
            let Some(engine) = evt.files() else {
                return;
            };
            let Some(name) = engine.files().into_iter().next() else {
                return;
            };

            let ticket = sequencer.write().begin();
            reading.set(Some(name.clone()));
            info!(file = %name, "reading upload");

            let bytes = engine.read_file(&name).await;
            if !sequencer.peek().is_current(ticket) {
                debug!(file = %name, "discarding superseded upload");
                return;
            }

            let result = match bytes {
                Some(bytes) => ingest::ingest(&bytes, &mapping),
                None => Err(ParseError::Unreadable),
            };
            state.write().apply_upload(name, result);
            reading.set(None);
        }
    };

    let snapshot = state.read();
    let period_choice = snapshot.filter.period.choice().to_string();
    let platform_choice = snapshot.filter.platform.choice().to_string();
    let error = snapshot.error.clone();
    let file_name = snapshot.file_name.clone();
    let has_data = snapshot.has_data();
    drop(snapshot);

    rsx! {
        div { class: "toolbar",
            label { class: "toolbar__file",
                span { class: "visually-hidden", {t!("toolbar-upload-label")} }
                input {
                    class: "file",
                    r#type: "file",
                    accept: ACCEPTED_FILES,
                    multiple: false,
                    onchange: on_file,
                }
            }

            label { class: "visually-hidden", r#for: "period-select", {t!("filter-period-label")} }
            select {
                id: "period-select",
                class: "select",
                disabled: !has_data,
                value: "{period_choice}",
                onchange: move |evt: FormEvent| {
                    state.write().filter.period = Selection::from_choice(&evt.value());
                },
                option { value: ALL_CHOICE, {t!("filter-all-periods")} }
                for period in periods.iter() {
                    option { key: "{period}", value: "{period}", "{period}" }
                }
            }

            label { class: "visually-hidden", r#for: "platform-select", {t!("filter-platform-label")} }
            select {
                id: "platform-select",
                class: "select",
                disabled: !has_data,
                value: "{platform_choice}",
                onchange: move |evt: FormEvent| {
                    state.write().filter.platform = Selection::from_choice(&evt.value());
                },
                option { value: ALL_CHOICE, {t!("filter-all-platforms")} }
                for platform in platforms.iter() {
                    option { key: "{platform}", value: "{platform}", "{platform}" }
                }
            }

            span { class: "badge", {t!("toolbar-rows", count = visible_rows)} }
        }

        if let Some(name) = reading() {
            p { class: "toolbar__status", {t!("toolbar-reading", file = name)} }
        } else if let Some(err) = error {
            p { class: "toolbar__status toolbar__status--error", "⚠️ {err}" }
        } else if let Some(name) = file_name {
            p { class: "toolbar__status", {t!("toolbar-loaded", file = name)} }
        }
    }
}
