//! Minimal static SVG charts: bars (single, grouped, stacked), lines and
//! count heatmaps.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::InsightsError;

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 520.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 150.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 130.0;
const Y_TICKS: usize = 5;
const MAX_X_LABELS: usize = 12;

pub const BLUE: &str = "#1f77b4";
pub const GREEN: &str = "#2ca02c";
pub const RED: &str = "#d62728";
pub const GRAY: &str = "#a9a9a9";
pub const PALE_GREEN: &str = "#98fb98";
pub const LIGHT_RED: &str = "#ff7f7f";

/// One named series; `values[i]` belongs to category / x position `i`.
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub color: &'static str,
    pub values: Vec<Option<f64>>,
    /// Text drawn above each bar (bar charts only)
    pub annotations: Vec<Option<String>>,
}

impl Series {
    pub fn new(name: impl Into<String>, color: &'static str, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            color,
            values,
            annotations: Vec::new(),
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<Option<String>>) -> Self {
        self.annotations = annotations;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarLayout {
    Grouped,
    Stacked,
}

#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub layout: BarLayout,
    /// Fixed top of the y axis; derived from the data when None
    pub y_max: Option<f64>,
    pub footnote: Option<String>,
}

impl BarChart {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            categories: Vec::new(),
            series: Vec::new(),
            layout: BarLayout::Grouped,
            y_max: None,
            footnote: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_labels: Vec<String>,
    pub series: Vec<Series>,
}

/// Square grid of counts, rows by `y` label and columns by `x` label
/// (e.g. a confusion matrix: actual by predicted).
#[derive(Debug, Clone)]
pub struct Heatmap {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub labels: Vec<String>,
    pub cells: Vec<Vec<usize>>,
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

struct Svg {
    body: String,
}

impl Svg {
    fn new() -> Self {
        let mut body = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
        );
        body.push('\n');
        body.push_str(&format!(
            r#"<rect x="0" y="0" width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#
        ));
        body.push('\n');
        Self { body }
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.body.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{fill}"/>"#
        ));
        self.body.push('\n');
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) {
        self.body.push_str(&format!(
            r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{stroke}"/>"#
        ));
        self.body.push('\n');
    }

    fn filled_text(&mut self, x: f64, y: f64, size: u32, fill: &str, content: &str) {
        self.body.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" font-size="{size}" text-anchor="middle" fill="{fill}">{}</text>"#,
            escape(content)
        ));
        self.body.push('\n');
    }

    fn text(&mut self, x: f64, y: f64, size: u32, anchor: &str, content: &str) {
        self.body.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" font-size="{size}" text-anchor="{anchor}">{}</text>"#,
            escape(content)
        ));
        self.body.push('\n');
    }

    fn rotated_text(&mut self, x: f64, y: f64, angle: i32, anchor: &str, content: &str) {
        self.body.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" font-size="11" text-anchor="{anchor}" transform="rotate({angle} {x:.1} {y:.1})">{}</text>"#,
            escape(content)
        ));
        self.body.push('\n');
    }

    fn polyline(&mut self, points: &[(f64, f64)], stroke: &str) {
        let pts: Vec<String> = points.iter().map(|(x, y)| format!("{x:.1},{y:.1}")).collect();
        self.body.push_str(&format!(
            r#"<polyline points="{}" fill="none" stroke="{stroke}" stroke-width="2"/>"#,
            pts.join(" ")
        ));
        self.body.push('\n');
    }

    fn finish(mut self) -> String {
        self.body.push_str("</svg>\n");
        self.body
    }
}

struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn new(y_min: f64, y_max: f64) -> Self {
        let y_max = if y_max > y_min { y_max } else { y_min + 1.0 };
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
            height: HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
            y_min,
            y_max,
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn y(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.y_min, self.y_max);
        self.bottom() - (clamped - self.y_min) / (self.y_max - self.y_min) * self.height
    }

    fn draw_axes(&self, svg: &mut Svg, title: &str, x_label: &str, y_label: &str) {
        svg.text(WIDTH / 2.0, 30.0, 18, "middle", title);
        for i in 0..=Y_TICKS {
            let value = self.y_min + (self.y_max - self.y_min) * i as f64 / Y_TICKS as f64;
            let y = self.y(value);
            svg.line(self.left, y, self.left + self.width, y, "#e5e5e5");
            svg.text(self.left - 8.0, y + 4.0, 11, "end", &format_tick(value));
        }
        svg.line(self.left, self.top, self.left, self.bottom(), "black");
        svg.line(self.left, self.bottom(), self.left + self.width, self.bottom(), "black");
        svg.text(self.left + self.width / 2.0, HEIGHT - 15.0, 13, "middle", x_label);
        svg.rotated_text(20.0, self.top + self.height / 2.0, -90, "middle", y_label);
    }

    fn draw_legend(&self, svg: &mut Svg, series: &[Series]) {
        if series.len() < 2 {
            return;
        }
        let x = self.left + self.width + 20.0;
        for (i, s) in series.iter().enumerate() {
            let y = self.top + 10.0 + i as f64 * 20.0;
            svg.rect(x, y - 10.0, 12.0, 12.0, s.color);
            svg.text(x + 18.0, y, 12, "start", &s.name);
        }
    }

    /// X-axis labels under evenly spaced slots; thinned out when crowded.
    fn draw_x_labels(&self, svg: &mut Svg, labels: &[String], centers: &[f64]) {
        let step = labels.len().div_ceil(MAX_X_LABELS).max(1);
        for (i, (label, &x)) in labels.iter().zip(centers).enumerate() {
            if i % step == 0 {
                svg.rotated_text(x, self.bottom() + 15.0, -45, "end", label);
            }
        }
    }
}

fn format_tick(value: f64) -> String {
    if value.abs() >= 100.0 || value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn data_max(series: &[Series], stacked: bool, categories: usize) -> f64 {
    if stacked {
        (0..categories)
            .map(|c| {
                series
                    .iter()
                    .filter_map(|s| s.values.get(c).copied().flatten())
                    .sum::<f64>()
            })
            .fold(0.0, f64::max)
    } else {
        series
            .iter()
            .flat_map(|s| s.values.iter().flatten().copied())
            .fold(0.0, f64::max)
    }
}

pub fn render_bar_chart(chart: &BarChart) -> String {
    let n = chart.categories.len().max(1);
    let stacked = chart.layout == BarLayout::Stacked;
    let y_max = chart
        .y_max
        .unwrap_or_else(|| data_max(&chart.series, stacked, n) * 1.1);
    let frame = Frame::new(0.0, y_max);

    let mut svg = Svg::new();
    frame.draw_axes(&mut svg, &chart.title, &chart.x_label, &chart.y_label);

    let slot = frame.width / n as f64;
    let centers: Vec<f64> = (0..chart.categories.len())
        .map(|i| frame.left + slot * (i as f64 + 0.5))
        .collect();
    let k = chart.series.len().max(1);

    for (c, &center) in centers.iter().enumerate() {
        let mut stack_top = 0.0;
        for (si, s) in chart.series.iter().enumerate() {
            let Some(value) = s.values.get(c).copied().flatten() else {
                continue;
            };
            let (x, w, base) = match chart.layout {
                BarLayout::Stacked => {
                    let w = slot * 0.6;
                    (center - w / 2.0, w, stack_top)
                }
                BarLayout::Grouped => {
                    let w = slot * 0.8 / k as f64;
                    (center - slot * 0.4 + w * si as f64, w, 0.0)
                }
            };
            let y_top = frame.y(base + value);
            let y_base = frame.y(base);
            svg.rect(x, y_top, w, (y_base - y_top).max(0.0), s.color);
            if let Some(Some(note)) = s.annotations.get(c) {
                svg.text(x + w / 2.0, y_top - 4.0, 10, "middle", note);
            }
            if stacked {
                stack_top += value;
            }
        }
    }

    frame.draw_x_labels(&mut svg, &chart.categories, &centers);
    frame.draw_legend(&mut svg, &chart.series);
    if let Some(note) = &chart.footnote {
        svg.text(WIDTH - 10.0, HEIGHT - 5.0, 10, "end", note);
    }
    svg.finish()
}

pub fn render_line_chart(chart: &LineChart) -> String {
    let values = chart.series.iter().flat_map(|s| s.values.iter().flatten().copied());
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let (lo, hi) = if lo.is_finite() { (lo, hi) } else { (0.0, 1.0) };
    let pad = ((hi - lo) * 0.05).max(1.0);
    let frame = Frame::new(lo - pad, hi + pad);

    let mut svg = Svg::new();
    frame.draw_axes(&mut svg, &chart.title, &chart.x_label, &chart.y_label);

    let n = chart.x_labels.len();
    let x_at = |i: usize| {
        if n <= 1 {
            frame.left + frame.width / 2.0
        } else {
            frame.left + frame.width * i as f64 / (n - 1) as f64
        }
    };

    for s in &chart.series {
        let points: Vec<(f64, f64)> = s
            .values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (x_at(i), frame.y(v))))
            .collect();
        if !points.is_empty() {
            svg.polyline(&points, s.color);
        }
    }

    let centers: Vec<f64> = (0..n).map(x_at).collect();
    frame.draw_x_labels(&mut svg, &chart.x_labels, &centers);
    frame.draw_legend(&mut svg, &chart.series);
    svg.finish()
}

/// White to dark blue by `t` in 0..=1.
fn blues(t: f64) -> String {
    const LO: (f64, f64, f64) = (247.0, 251.0, 255.0);
    const HI: (f64, f64, f64) = (8.0, 48.0, 107.0);
    let t = t.clamp(0.0, 1.0);
    let mix = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    format!("#{:02x}{:02x}{:02x}", mix(LO.0, HI.0), mix(LO.1, HI.1), mix(LO.2, HI.2))
}

pub fn render_heatmap(chart: &Heatmap) -> String {
    let n = chart.labels.len().max(1);
    let max = chart.cells.iter().flatten().copied().max().unwrap_or(0);
    let side = (HEIGHT - MARGIN_TOP - MARGIN_BOTTOM).min(WIDTH - MARGIN_LEFT - MARGIN_RIGHT);
    let cell = side / n as f64;
    let left = (WIDTH - side) / 2.0;
    let top = MARGIN_TOP;

    let mut svg = Svg::new();
    svg.text(WIDTH / 2.0, 30.0, 18, "middle", &chart.title);

    for (r, row) in chart.cells.iter().enumerate() {
        for (c, &count) in row.iter().enumerate() {
            let t = if max == 0 { 0.0 } else { count as f64 / max as f64 };
            let x = left + c as f64 * cell;
            let y = top + r as f64 * cell;
            svg.rect(x, y, cell, cell, &blues(t));
            let ink = if t > 0.5 { "white" } else { "black" };
            svg.filled_text(x + cell / 2.0, y + cell / 2.0 + 5.0, 14, ink, &count.to_string());
        }
    }

    for (i, label) in chart.labels.iter().enumerate() {
        let center = i as f64 * cell + cell / 2.0;
        svg.text(left + center, top + side + 20.0, 12, "middle", label);
        svg.text(left - 8.0, top + center + 4.0, 12, "end", label);
    }
    svg.text(WIDTH / 2.0, top + side + 45.0, 13, "middle", &chart.x_label);
    svg.rotated_text(left - 70.0, top + side / 2.0, -90, "middle", &chart.y_label);
    svg.finish()
}

pub fn save_svg(path: &Path, svg: &str) -> Result<(), InsightsError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| InsightsError::io(parent, e))?;
    }
    fs::write(path, svg).map_err(|e| InsightsError::io(path, e))?;
    info!(path = %path.display(), "Chart saved");
    Ok(())
}
