#![cfg(test)]
/*!
Theme selector lint for the desktop build.

The dashboard components rely on class names defined in the shared theme
(`ui/assets/theme/main.css`). The desktop binary embeds that file, so a
renamed or dropped selector silently degrades packaged builds. This test keeps
a curated list of selectors the components use and fails if any disappears.

When renaming a class, update the component markup and REQUIRED_SELECTORS
together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".visually-hidden",
    // Toolbar
    ".toolbar {",
    ".file,",
    ".select {",
    ".badge {",
    ".toolbar__status",
    ".toolbar__status--error",
    ".button {",
    // KPI cards
    ".kpi-grid",
    ".kpi {",
    ".kpi__title",
    ".kpi__value",
    // Cards
    ".chart-grid",
    ".card {",
    ".card--wide",
    ".card__header",
    ".card__meta",
    ".card__meta--success",
    ".card__meta--error",
    ".card__placeholder",
    ".section-title",
    // Charts
    ".chart {",
    ".chart--donut",
    ".chart-donut",
    ".chart__grid",
    ".chart__axis",
    ".chart__label",
    ".chart__legend",
    ".chart__legend--stacked",
    ".chart__swatch",
    // Detail table and export
    ".table-scroll",
    ".table {",
    ".export {",
    "@media (max-width: 800px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    assert!(
        missing.is_empty(),
        "Missing {} required CSS selectors/tokens in unified theme:\n{}",
        missing.len(),
        missing.join("\n")
    );
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 2_500,
        "Embedded theme appears unexpectedly small ({non_ws_len} non-whitespace chars); \
         did the file get truncated or the path change?"
    );
}

#[test]
fn status_modifiers_have_base_classes() {
    for (base, modifier) in [
        (".toolbar__status", ".toolbar__status--error"),
        (".card__meta", ".card__meta--error"),
        (".chart__legend", ".chart__legend--stacked"),
    ] {
        assert!(
            THEME_CSS.contains(modifier) && THEME_CSS.contains(&format!("{base} {{")),
            "{modifier} is styled without its base class {base}"
        );
    }
}
