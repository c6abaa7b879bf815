//! Summary metrics
//!
//! Scalars shown above the trace chart. Values are kept at full precision;
//! rounding only happens when a [`Readout`] is formatted.

use std::fmt;

use serde::Serialize;

use crate::schema::Signal;
use crate::{Error, SignalTable};

/// Steam flow is logged once a minute in kg/hr, so summing the samples and
/// dividing by this converts the total to kilograms.
pub const STEAM_SAMPLES_PER_HOUR: f64 = 60.0;

pub const UNAVAILABLE: &str = "N/A";

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct SummaryMetrics {
    pub avg_process_temp: f64,
    pub max_outlet_pressure: f64,
    /// `None` when the log has no steam flow column.
    pub total_steam: Option<f64>,
    /// `None` when the log has no valve opening column.
    pub avg_valve_opening: Option<f64>,
}

pub fn summarize(table: &SignalTable) -> Result<SummaryMetrics, Error> {
    let avg_process_temp = mean(table.require(Signal::TempActual)?);
    let max_outlet_pressure = max(table.require(Signal::OutletPressure)?);
    let total_steam = table
        .column(Signal::SteamFlow)
        .map(|flow| sum(&flow[..]) / STEAM_SAMPLES_PER_HOUR);
    let avg_valve_opening = table
        .column(Signal::ValveOpening)
        .map(|valve| mean(&valve[..]));
    Ok(SummaryMetrics {
        avg_process_temp,
        max_outlet_pressure,
        total_steam,
        avg_valve_opening,
    })
}

fn present(samples: &[Option<f64>]) -> impl Iterator<Item = f64> + '_ {
    samples.iter().filter_map(|s| *s).filter(|s| !s.is_nan())
}

/// Mean of the present samples, NaN when there are none.
fn mean(samples: &[Option<f64>]) -> f64 {
    let (sum, count) = present(samples).fold((0.0, 0usize), |(sum, n), s| (sum + s, n + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Max of the present samples, NaN when there are none.
fn max(samples: &[Option<f64>]) -> f64 {
    present(samples).reduce(f64::max).unwrap_or(f64::NAN)
}

fn sum(samples: &[Option<f64>]) -> f64 {
    present(samples).sum()
}

impl SummaryMetrics {
    pub fn readouts(&self) -> [Readout; 4] {
        [
            Readout {
                label: "Avg Process Temp",
                value: Some(self.avg_process_temp),
                unit: "°C",
                precision: 1,
            },
            Readout {
                label: "Max Outlet Pressure",
                value: Some(self.max_outlet_pressure),
                unit: "bar",
                precision: 2,
            },
            Readout {
                label: "Total Steam Consumed",
                value: self.total_steam,
                unit: "kg",
                precision: 0,
            },
            Readout {
                label: "Avg Valve Opening",
                value: self.avg_valve_opening,
                unit: "%",
                precision: 1,
            },
        ]
    }
}

/// One labeled metric, ready for a display widget.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Readout {
    pub label: &'static str,
    pub value: Option<f64>,
    pub unit: &'static str,
    pub precision: usize,
}

impl Readout {
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{value:.prec$} {}", self.unit, prec = self.precision),
            None => f.write_str(UNAVAILABLE),
        }
    }
}
