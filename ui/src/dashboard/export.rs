use dioxus::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::record::CampaignRecord;
use crate::t;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working,
    Done(String),
    Error(String),
}

#[derive(Debug, Error)]
enum ExportError {
    #[cfg(target_arch = "wasm32")]
    #[error("{0}")]
    Browser(&'static str),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("could not determine an export directory")]
    NoExportDir,
    #[cfg(not(target_arch = "wasm32"))]
    #[error("could not write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Downloads the visible rows as CSV under the normalised header row.
#[component]
pub fn ExportButton(columns: Vec<String>, rows: Vec<CampaignRecord>) -> Element {
    let mut status = use_signal(|| ExportStatus::Idle);
    let mut busy = use_signal(|| false);

    let on_export = move |_| {
        let columns = columns.clone();
        let rows = rows.clone();
        async move {
            if busy() {
                return;
            }
            busy.set(true);
            status.set(ExportStatus::Working);

            let csv = build_csv(&columns, &rows);
            let filename = format!("adlens-{}.csv", timestamp_slug());
            match download_bytes(&filename, "text/csv", csv.into_bytes()).await {
                Ok(Some(path)) => {
                    info!(%path, rows = rows.len(), "csv export saved");
                    status.set(ExportStatus::Done(t!("export-saved", path = path)));
                }
                Ok(None) => {
                    info!(rows = rows.len(), "csv download started");
                    status.set(ExportStatus::Done(t!("export-started")));
                }
                Err(err) => {
                    warn!("csv export failed: {err}");
                    status.set(ExportStatus::Error(err.to_string()));
                }
            }
            busy.set(false);
        }
    };

    let feedback = match status() {
        ExportStatus::Idle => None,
        ExportStatus::Working => Some(("card__meta", t!("export-working"))),
        ExportStatus::Done(message) => Some(("card__meta card__meta--success", format!("✅ {message}"))),
        ExportStatus::Error(err) => Some(("card__meta card__meta--error", format!("⚠️ {err}"))),
    };

    rsx! {
        div { class: "export",
            button {
                r#type: "button",
                class: "button",
                disabled: busy(),
                onclick: on_export,
                {t!("export-csv")}
            }
            if let Some((class_name, message)) = feedback {
                span { class: "{class_name}", "{message}" }
            }
        }
    }
}

fn build_csv(columns: &[String], rows: &[CampaignRecord]) -> String {
    let mut out = String::new();
    push_line(&mut out, columns.iter().map(String::as_str));
    for record in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| record.field(column).map(|v| v.label()).unwrap_or_default())
            .collect();
        push_line(&mut out, cells.iter().map(String::as_str));
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    let line: Vec<String> = cells.map(escape_csv).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

fn escape_csv(value: &str) -> String {
    let needs_quotes = value.contains([',', '"', '\n', '\r']);
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

/// Browser builds trigger a download and return `None`; native builds write
/// into the app data directory and return the saved path.
async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| ExportError::Browser("failed to create blob"))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| ExportError::Browser("unable to create download"))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(ExportError::Browser("document unavailable"))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| ExportError::Browser("unable to create anchor"))?
            .dyn_into()
            .map_err(|_| ExportError::Browser("anchor cast failed"))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or(ExportError::Browser("missing body"))?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = mime;
        let dir = directories::ProjectDirs::from("com", "Adlens", "Adlens")
            .ok_or(ExportError::NoExportDir)?
            .data_dir()
            .join("exports");
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(filename);
        std::fs::write(&path, bytes)?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{CellValue, Field};

    fn field(column: &str, value: CellValue) -> Field {
        Field {
            column: column.into(),
            value,
            attribute: None,
        }
    }

    #[test]
    fn escapes_only_when_needed() {
        assert_eq!(escape_csv("Google"), "Google");
        assert_eq!(escape_csv("Search, Brand"), "\"Search, Brand\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("two\nlines"), "\"two\nlines\"");
        assert_eq!(escape_csv(""), "");
    }

    #[test]
    fn csv_follows_header_order_and_leaves_missing_cells_blank() {
        let columns = vec!["Plataforma".to_string(), "Receita".to_string(), "Notas".to_string()];
        let rows = vec![CampaignRecord {
            fields: vec![
                field("Receita", CellValue::Number(300.0)),
                field("Plataforma", CellValue::Text("Google, Inc".into())),
            ],
            ..Default::default()
        }];

        let csv = build_csv(&columns, &rows);
        assert_eq!(csv, "Plataforma,Receita,Notas\r\n\"Google, Inc\",300,\r\n");
    }

    #[test]
    fn slug_is_a_compact_timestamp() {
        let slug = timestamp_slug();
        assert_eq!(slug.len(), 15);
        assert_eq!(slug.as_bytes()[8], b'_');
    }
}
