//! Static styling for the trace chart.
//!
//! Every signal has exactly one look, and every row one title, unit and
//! range. The composer only reads from these tables.

use crate::chart::{
    AxisRange, AxisStyle, Color, Dash, Fill, FillMode, Font, HoverMode, Layout, Legend,
    Orientation, SeriesStyle, TickPlacement, XAnchor, YAnchor,
};
use crate::schema::Signal;

pub const LINE_WIDTH: f32 = 2.0;
pub const FILL_OPACITY: f32 = 0.1;

/// Valve opening is a percentage; leave a little headroom above 100.
pub const VALVE_RANGE: AxisRange = AxisRange::Fixed {
    min: 0.0,
    max: 105.0,
};

pub const TEMP_SETPOINT: Color = Color::BLACK;
pub const TEMP_ACTUAL: Color = Color::hex(0xD32F2F);
pub const PRESSURE_SETPOINT: Color = Color::hex(0x1A237E);
pub const INLET_PRESSURE: Color = Color::hex(0x004D40);
pub const OUTLET_PRESSURE: Color = Color::hex(0x00008B);
pub const STEAM_FLOW: Color = Color::hex(0x7B1FA2);
pub const VALVE_OPENING: Color = Color::hex(0xB8860B);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesDef {
    pub name: &'static str,
    pub style: SeriesStyle,
}

const fn line(color: Color, dash: Dash) -> SeriesStyle {
    SeriesStyle {
        color,
        width: LINE_WIDTH,
        dash,
        fill: None,
    }
}

const fn filled(color: Color) -> SeriesStyle {
    SeriesStyle {
        color,
        width: LINE_WIDTH,
        dash: Dash::Solid,
        fill: Some(Fill {
            mode: FillMode::ToZeroY,
            color: color.with_opacity(FILL_OPACITY),
        }),
    }
}

/// Display name and style of a signal's series. The timestamp has none.
pub fn series(signal: Signal) -> Option<SeriesDef> {
    let (name, style) = match signal {
        Signal::Timestamp => return None,
        Signal::TempSetpoint => ("Process Temp SP", line(TEMP_SETPOINT, Dash::Dot)),
        Signal::TempActual => ("Process Temp", line(TEMP_ACTUAL, Dash::Solid)),
        Signal::PressureSetpoint => ("Pressure SP", line(PRESSURE_SETPOINT, Dash::Dot)),
        Signal::InletPressure => ("Inlet P1", line(INLET_PRESSURE, Dash::Solid)),
        Signal::OutletPressure => ("Outlet P2", filled(OUTLET_PRESSURE)),
        Signal::SteamFlow => ("Flow Rate", filled(STEAM_FLOW)),
        Signal::ValveOpening => ("Valve %", filled(VALVE_OPENING)),
    };
    Some(SeriesDef { name, style })
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowDef {
    pub title: &'static str,
    pub y_label: &'static str,
    pub y_range: AxisRange,
    /// Series in draw order.
    pub signals: &'static [Signal],
}

pub const ROWS: [RowDef; 4] = [
    RowDef {
        title: "Temperature Analysis",
        y_label: "Temp (°C)",
        y_range: AxisRange::Auto,
        signals: &[Signal::TempSetpoint, Signal::TempActual],
    },
    RowDef {
        title: "Pressure Dynamics",
        y_label: "Bar",
        y_range: AxisRange::Auto,
        signals: &[
            Signal::PressureSetpoint,
            Signal::InletPressure,
            Signal::OutletPressure,
        ],
    },
    RowDef {
        title: "Steam Flow Rate",
        y_label: "kg/hr",
        y_range: AxisRange::Auto,
        signals: &[Signal::SteamFlow],
    },
    RowDef {
        title: "Control Valve Output",
        y_label: "%",
        y_range: VALVE_RANGE,
        signals: &[Signal::ValveOpening],
    },
];

pub const AXIS_STYLE: AxisStyle = AxisStyle {
    show_grid: true,
    grid_color: Color::GRID,
    line_color: Color::BLACK,
    ticks: TickPlacement::Outside,
    tick_color: Color::BLACK,
};

pub const LEGEND: Legend = Legend {
    orientation: Orientation::Horizontal,
    x: 1.0,
    y: 1.02,
    x_anchor: XAnchor::Right,
    y_anchor: YAnchor::Bottom,
};

pub const HOVER: HoverMode = HoverMode::XUnified;

pub const TITLE_FONT: Font = Font {
    color: Color::BLACK,
    size: 16.0,
};

pub const CHART_HEIGHT: u32 = 900;
pub const VERTICAL_SPACING: f32 = 0.03;

pub fn layout() -> Layout {
    Layout {
        height: CHART_HEIGHT,
        vertical_spacing: VERTICAL_SPACING,
        row_heights: vec![1.0 / ROWS.len() as f32; ROWS.len()],
        plot_background: Color::WHITE,
        paper_background: Color::WHITE,
        font_color: Color::BLACK,
    }
}
