//! Declarative chart description
//!
//! These types describe the trace chart without depending on any rendering
//! backend. A backend receives a [`ChartSpec`] (usually as JSON) and is
//! expected to honour every field.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use crate::schema::Signal;
use crate::table::Samples;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    pub const GRID: Self = Self::hex(0xF0F0F0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub const fn with_opacity(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

/// Formats as `#RRGGBB` when opaque, `rgba(r, g, b, a)` otherwise.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Serialize, Clone, Copy, Hash, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum Dash {
    #[default]
    Solid,
    Dot,
    Dash,
}

#[derive(Serialize, Clone, Copy, Hash, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Fill the area between the line and y = 0.
    ToZeroY,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Fill {
    pub mode: FillMode,
    pub color: Color,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct SeriesStyle {
    pub color: Color,
    pub width: f32,
    pub dash: Dash,
    pub fill: Option<Fill>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SeriesSpec {
    pub signal: Signal,
    pub name: &'static str,
    /// Zero-based row of the panel this series is drawn in.
    pub row: usize,
    pub style: SeriesStyle,
    pub y: Samples,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum AxisRange {
    Auto,
    Fixed { min: f64, max: f64 },
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct YAxis {
    pub label: &'static str,
    pub range: AxisRange,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PanelSpec {
    pub row: usize,
    pub title: &'static str,
    pub y_axis: YAxis,
    pub series: Vec<SeriesSpec>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct XAxis {
    /// All rows pan and zoom together.
    pub shared: bool,
    pub values: Arc<[NaiveDateTime]>,
}

#[derive(Serialize, Clone, Copy, Hash, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum HoverMode {
    /// One combined readout of every series at the hovered x position.
    XUnified,
    Closest,
}

#[derive(Serialize, Clone, Copy, Hash, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Serialize, Clone, Copy, Hash, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum XAnchor {
    Left,
    Center,
    Right,
}

#[derive(Serialize, Clone, Copy, Hash, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum YAnchor {
    Top,
    Middle,
    Bottom,
}

/// Legend placement in paper coordinates, where `y > 1` is above the plot.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Legend {
    pub orientation: Orientation,
    pub x: f32,
    pub y: f32,
    pub x_anchor: XAnchor,
    pub y_anchor: YAnchor,
}

#[derive(Serialize, Clone, Copy, Hash, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum TickPlacement {
    Inside,
    Outside,
}

/// Styling applied to every axis of every row.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct AxisStyle {
    pub show_grid: bool,
    pub grid_color: Color,
    pub line_color: Color,
    pub ticks: TickPlacement,
    pub tick_color: Color,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Font {
    pub color: Color,
    pub size: f32,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Layout {
    pub height: u32,
    pub vertical_spacing: f32,
    pub row_heights: Vec<f32>,
    pub plot_background: Color,
    pub paper_background: Color,
    pub font_color: Color,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub title_font: Font,
    pub layout: Layout,
    pub x_axis: XAxis,
    pub hover: HoverMode,
    pub legend: Legend,
    pub axis_style: AxisStyle,
    pub panels: Vec<PanelSpec>,
}

impl ChartSpec {
    pub fn series(&self) -> impl Iterator<Item = &SeriesSpec> {
        self.panels.iter().flat_map(|p| p.series.iter())
    }

    pub fn panel(&self, row: usize) -> Option<&PanelSpec> {
        self.panels.get(row)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
