//! Inline SVG charts. Geometry lives in small pure helpers so layout can be
//! tested without a renderer.

use std::f64::consts::{FRAC_PI_2, TAU};

use dioxus::prelude::*;

use crate::core::{
    aggregate::{PeriodPoint, PlatformSlice},
    config::CurrencyLocale,
    format,
};
use crate::dashboard::label_or_dash;
use crate::t;

const PALETTE: [&str; 8] = [
    "#4D96FF", "#00C49F", "#FFC658", "#8884d8", "#ff8042", "#a78bfa", "#22d3ee", "#f472b6",
];
const REVENUE_COLOR: &str = "#00C49F";
const SPEND_COLOR: &str = "#4D96FF";
const ROI_COLOR: &str = "#FFC658";
const CTR_COLOR: &str = "#f472b6";

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 300.0;
const TICKS: usize = 4;

/// Plot area inside the SVG viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frame {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Frame {
    fn standard() -> Self {
        Self {
            left: 56.0,
            top: 16.0,
            right: WIDTH - 16.0,
            bottom: HEIGHT - 40.0,
        }
    }

    fn width(&self) -> f64 {
        self.right - self.left
    }

    fn height(&self) -> f64 {
        self.bottom - self.top
    }

    fn y(&self, value: f64, range: ValueRange) -> f64 {
        self.bottom - (value - range.min) / range.span() * self.height()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    /// Range covering every value and zero, never degenerate.
    fn covering(values: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if max - min <= f64::EPSILON {
            Self {
                min,
                max: min + 1.0,
            }
        } else {
            Self { min, max }
        }
    }

    fn span(&self) -> f64 {
        self.max - self.min
    }

    fn ticks(&self) -> Vec<f64> {
        (0..=TICKS)
            .map(|i| self.min + self.span() * i as f64 / TICKS as f64)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Bar {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Two bars (revenue, spend) per platform group.
fn grouped_bars(slices: &[PlatformSlice], frame: Frame, range: ValueRange) -> Vec<(Bar, Bar)> {
    if slices.is_empty() {
        return Vec::new();
    }
    let group_width = frame.width() / slices.len() as f64;
    let bar_width = group_width * 0.35;
    let baseline = frame.y(0.0, range);

    let bar = |x: f64, value: f64| {
        let top = frame.y(value, range);
        Bar {
            x,
            y: top.min(baseline),
            width: bar_width,
            height: (baseline - top).abs(),
        }
    };

    slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            let center = frame.left + group_width * (i as f64 + 0.5);
            (
                bar(center - bar_width, slice.revenue),
                bar(center, slice.spend),
            )
        })
        .collect()
}

/// `x,y` pairs for an SVG polyline, spread evenly across the frame.
fn polyline_points(values: &[f64], frame: Frame, range: ValueRange) -> String {
    let step = if values.len() > 1 {
        frame.width() / (values.len() - 1) as f64
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = if values.len() == 1 {
                frame.left + frame.width() / 2.0
            } else {
                frame.left + step * i as f64
            };
            format!("{:.1},{:.1}", x, frame.y(*value, range))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn x_for_index(index: usize, count: usize, frame: Frame) -> f64 {
    if count <= 1 {
        frame.left + frame.width() / 2.0
    } else {
        frame.left + frame.width() * index as f64 / (count - 1) as f64
    }
}

/// Donut segment path from `start` to `end` (fractions of a full turn).
fn donut_segment(start: f64, end: f64, outer: f64, inner: f64, cx: f64, cy: f64) -> String {
    // A single arc cannot draw a full circle; split it in two.
    if end - start >= 1.0 - 1e-9 {
        return format!(
            "{} {}",
            donut_segment(start, start + 0.5, outer, inner, cx, cy),
            donut_segment(start + 0.5, end, outer, inner, cx, cy)
        );
    }

    let point = |fraction: f64, radius: f64| {
        let angle = fraction * TAU - FRAC_PI_2;
        (cx + radius * angle.cos(), cy + radius * angle.sin())
    };
    let large_arc = u8::from(end - start > 0.5);
    let (ox1, oy1) = point(start, outer);
    let (ox2, oy2) = point(end, outer);
    let (ix1, iy1) = point(end, inner);
    let (ix2, iy2) = point(start, inner);

    format!(
        "M {ox1:.2} {oy1:.2} A {outer} {outer} 0 {large_arc} 1 {ox2:.2} {oy2:.2} \
         L {ix1:.2} {iy1:.2} A {inner} {inner} 0 {large_arc} 0 {ix2:.2} {iy2:.2} Z"
    )
}

/// Pre-formatted SVG coordinates for one bar.
#[derive(Debug, Clone, PartialEq)]
struct Mark {
    x: String,
    y: String,
    width: String,
    height: String,
}

impl From<&Bar> for Mark {
    fn from(bar: &Bar) -> Self {
        Self {
            x: format!("{:.1}", bar.x),
            y: format!("{:.1}", bar.y),
            width: format!("{:.1}", bar.width),
            height: format!("{:.1}", bar.height),
        }
    }
}

#[component]
pub fn SpendRevenueChart(breakdown: Vec<PlatformSlice>) -> Element {
    let frame = Frame::standard();
    let range = ValueRange::covering(
        breakdown
            .iter()
            .flat_map(|slice| [slice.revenue, slice.spend]),
    );
    let label_y = format!("{:.1}", frame.bottom + 20.0);
    let groups: Vec<(Mark, Mark, String, String)> = grouped_bars(&breakdown, frame, range)
        .iter()
        .zip(&breakdown)
        .map(|((revenue, spend), slice)| {
            let center = spend.x;
            (
                Mark::from(revenue),
                Mark::from(spend),
                format!("{center:.1}"),
                label_or_dash(slice.platform.as_deref()).to_string(),
            )
        })
        .collect();

    rsx! {
        section { class: "card",
            div { class: "card__header",
                h2 { class: "section-title", {t!("chart-revenue-vs-spend")} }
            }
            if groups.is_empty() {
                p { class: "card__placeholder", {t!("chart-empty")} }
            } else {
                svg { class: "chart", view_box: "0 0 {WIDTH} {HEIGHT}",
                    {render_grid(frame, range)}
                    for (i, (revenue, spend, label_x, label)) in groups.into_iter().enumerate() {
                        g { key: "{i}",
                            rect { x: revenue.x, y: revenue.y, width: revenue.width, height: revenue.height, fill: REVENUE_COLOR }
                            rect { x: spend.x, y: spend.y, width: spend.width, height: spend.height, fill: SPEND_COLOR }
                            text { class: "chart__label", x: label_x, y: label_y.clone(), text_anchor: "middle", "{label}" }
                        }
                    }
                }
                {render_legend(vec![
                    (t!("chart-legend-revenue"), REVENUE_COLOR),
                    (t!("chart-legend-spend"), SPEND_COLOR),
                ])}
            }
        }
    }
}

#[component]
pub fn SpendShareChart(breakdown: Vec<PlatformSlice>, locale: CurrencyLocale) -> Element {
    let (cx, cy) = (HEIGHT / 2.0, HEIGHT / 2.0);

    let mut start = 0.0;
    let segments: Vec<(String, &'static str, String)> = breakdown
        .iter()
        .enumerate()
        .filter(|(_, slice)| slice.share > 0.0)
        .map(|(i, slice)| {
            let end = start + slice.share;
            let outline = donut_segment(start, end.min(1.0), 120.0, 70.0, cx, cy);
            start = end;
            let label = format!(
                "{} · {} · {}",
                label_or_dash(slice.platform.as_deref()),
                format::format_currency(slice.spend, locale),
                format::format_percent(slice.share * 100.0)
            );
            (outline, PALETTE[i % PALETTE.len()], label)
        })
        .collect();

    rsx! {
        section { class: "card",
            div { class: "card__header",
                h2 { class: "section-title", {t!("chart-spend-share")} }
            }
            if segments.is_empty() {
                p { class: "card__placeholder", {t!("chart-empty")} }
            } else {
                div { class: "chart-donut",
                    svg { class: "chart chart--donut", view_box: "0 0 {HEIGHT} {HEIGHT}",
                        for (i, (outline, color, _)) in segments.iter().enumerate() {
                            path { key: "{i}", d: "{outline}", fill: *color, fill_rule: "evenodd" }
                        }
                    }
                    ul { class: "chart__legend chart__legend--stacked",
                        for (i, (_, color, label)) in segments.iter().enumerate() {
                            li { key: "{i}",
                                span { class: "chart__swatch", style: "background:{color}" }
                                "{label}"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn RoiCtrChart(series: Vec<PeriodPoint>) -> Element {
    let frame = Frame::standard();
    let range = ValueRange::covering(
        series
            .iter()
            .flat_map(|point| [point.roi, point.avg_ctr]),
    );
    let roi: Vec<f64> = series.iter().map(|point| point.roi).collect();
    let ctr: Vec<f64> = series.iter().map(|point| point.avg_ctr).collect();
    let roi_points = polyline_points(&roi, frame, range);
    let ctr_points = polyline_points(&ctr, frame, range);

    let label_y = format!("{:.1}", frame.bottom + 20.0);
    let markers: Vec<SeriesMarker> = series
        .iter()
        .enumerate()
        .map(|(i, point)| SeriesMarker {
            x: format!("{:.1}", x_for_index(i, series.len(), frame)),
            roi_y: format!("{:.1}", frame.y(point.roi, range)),
            ctr_y: format!("{:.1}", frame.y(point.avg_ctr, range)),
            roi: format::format_percent(point.roi),
            ctr: format::format_percent(point.avg_ctr),
            label: label_or_dash(point.period.as_deref()).to_string(),
        })
        .collect();

    rsx! {
        section { class: "card card--wide",
            div { class: "card__header",
                h2 { class: "section-title", {t!("chart-roi-ctr")} }
            }
            if markers.is_empty() {
                p { class: "card__placeholder", {t!("chart-empty")} }
            } else {
                svg { class: "chart", view_box: "0 0 {WIDTH} {HEIGHT}",
                    {render_grid(frame, range)}
                    polyline { points: "{roi_points}", fill: "none", stroke: ROI_COLOR, stroke_width: "2" }
                    polyline { points: "{ctr_points}", fill: "none", stroke: CTR_COLOR, stroke_width: "2" }
                    for (i, marker) in markers.into_iter().enumerate() {
                        g { key: "{i}",
                            circle { cx: marker.x.clone(), cy: marker.roi_y, r: "3", fill: ROI_COLOR,
                                title { "{marker.roi}" }
                            }
                            circle { cx: marker.x.clone(), cy: marker.ctr_y, r: "3", fill: CTR_COLOR,
                                title { "{marker.ctr}" }
                            }
                            text { class: "chart__label", x: marker.x, y: label_y.clone(), text_anchor: "middle", "{marker.label}" }
                        }
                    }
                }
                {render_legend(vec![
                    (t!("chart-legend-roi"), ROI_COLOR),
                    (t!("chart-legend-ctr"), CTR_COLOR),
                ])}
            }
        }
    }
}

struct SeriesMarker {
    x: String,
    roi_y: String,
    ctr_y: String,
    roi: String,
    ctr: String,
    label: String,
}

fn render_grid(frame: Frame, range: ValueRange) -> Element {
    let ticks: Vec<(String, String, String)> = range
        .ticks()
        .into_iter()
        .map(|tick| {
            let y = frame.y(tick, range);
            (
                format!("{y:.1}"),
                format!("{:.1}", y + 4.0),
                format::format_axis(tick),
            )
        })
        .collect();
    let left = format!("{:.1}", frame.left);
    let right = format!("{:.1}", frame.right);
    let label_x = format!("{:.1}", frame.left - 8.0);

    rsx! {
        for (i, (y, text_y, label)) in ticks.into_iter().enumerate() {
            g { key: "tick-{i}",
                line { class: "chart__grid", x1: left.clone(), x2: right.clone(), y1: y.clone(), y2: y, stroke_dasharray: "3 3" }
                text { class: "chart__axis", x: label_x.clone(), y: text_y, text_anchor: "end", "{label}" }
            }
        }
    }
}

fn render_legend(entries: Vec<(String, &'static str)>) -> Element {
    rsx! {
        ul { class: "chart__legend",
            for (label, color) in entries.into_iter() {
                li { key: "{label}",
                    span { class: "chart__swatch", style: "background:{color}" }
                    "{label}"
                }
            }
        }
    }
}
