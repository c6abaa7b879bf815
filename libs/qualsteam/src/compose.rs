use chrono::NaiveDate;
use tracing::debug;

use crate::chart::{ChartSpec, PanelSpec, SeriesSpec, XAxis, YAxis};
use crate::{Error, SignalTable, style};

/// Builds the four-row trace chart for `table`.
///
/// Rows are always emitted in the order temperature, pressure, flow, valve.
/// A required signal missing from the table fails the whole chart; an
/// optional one is left out of its row.
pub fn compose(table: &SignalTable, title: impl Into<String>) -> Result<ChartSpec, Error> {
    let mut panels = Vec::with_capacity(style::ROWS.len());
    for (row, def) in style::ROWS.iter().enumerate() {
        let mut series = Vec::with_capacity(def.signals.len());
        for &signal in def.signals {
            let Some(y) = table.column(signal) else {
                if signal.is_required() {
                    return Err(Error::missing(signal));
                }
                debug!(%signal, "omitting optional series");
                continue;
            };
            let Some(series_def) = style::series(signal) else {
                continue;
            };
            series.push(SeriesSpec {
                signal,
                name: series_def.name,
                row,
                style: series_def.style,
                y: y.clone(),
            });
        }
        panels.push(PanelSpec {
            row,
            title: def.title,
            y_axis: YAxis {
                label: def.y_label,
                range: def.y_range,
            },
            series,
        });
    }

    Ok(ChartSpec {
        title: title.into(),
        title_font: style::TITLE_FONT,
        layout: style::layout(),
        x_axis: XAxis {
            shared: true,
            values: table.timestamps().clone(),
        },
        hover: style::HOVER,
        legend: style::LEGEND,
        axis_style: style::AXIS_STYLE,
        panels,
    })
}

/// Chart title for a scenario, e.g. `Forensic Trace: Scenario 1 (2024-03-11)`.
pub fn trace_title(scenario: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!("Forensic Trace: {scenario} ({})", date.format("%Y-%m-%d")),
        None => format!("Forensic Trace: {scenario}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{AxisRange, Dash};
    use crate::schema::Signal;
    use chrono::{Duration, NaiveDateTime};

    fn axis(n: usize) -> Vec<NaiveDateTime> {
        let t0 = NaiveDate::from_ymd_opt(2024, 3, 11)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        (0..n).map(|i| t0 + Duration::minutes(i as i64)).collect()
    }

    fn build(n: usize, columns: &[(Signal, &[f64])]) -> SignalTable {
        columns
            .iter()
            .try_fold(SignalTable::new(axis(n)), |table, (signal, values)| {
                table.with_values(*signal, values.iter().copied())
            })
            .unwrap()
    }

    const MANDATORY: [(Signal, &[f64]); 4] = [
        (Signal::TempSetpoint, &[120.0; 3]),
        (Signal::TempActual, &[118.0, 119.0, 121.0]),
        (Signal::OutletPressure, &[2.0, 2.1, 2.05]),
        (Signal::ValveOpening, &[35.0, 40.0, 38.0]),
    ];

    fn mandatory() -> SignalTable {
        build(3, &MANDATORY)
    }

    fn full() -> SignalTable {
        let optional: [(Signal, &[f64]); 3] = [
            (Signal::PressureSetpoint, &[2.0; 3]),
            (Signal::InletPressure, &[6.0, 6.1, 5.9]),
            (Signal::SteamFlow, &[300.0, 320.0, 310.0]),
        ];
        build(3, &[&MANDATORY[..], &optional[..]].concat())
    }

    fn counts(chart: &ChartSpec) -> Vec<usize> {
        chart.panels.iter().map(|p| p.series.len()).collect()
    }

    #[test]
    fn test_full_chart() {
        let chart = compose(&full(), "trace").unwrap();
        assert_eq!(counts(&chart), [2, 3, 1, 1]);
        assert!(chart.x_axis.shared);
        assert_eq!(chart.x_axis.values.len(), 3);
        let names: Vec<_> = chart.series().map(|s| s.name).collect();
        assert_eq!(
            names,
            [
                "Process Temp SP",
                "Process Temp",
                "Pressure SP",
                "Inlet P1",
                "Outlet P2",
                "Flow Rate",
                "Valve %"
            ]
        );
        for panel in &chart.panels {
            assert!(panel.series.iter().all(|s| s.row == panel.row));
        }
    }

    #[test]
    fn test_valve_axis_fixed() {
        // max valve opening is 40, well under the axis ceiling
        let chart = compose(&full(), "trace").unwrap();
        let valve = chart.panel(3).unwrap();
        assert_eq!(
            valve.y_axis.range,
            AxisRange::Fixed {
                min: 0.0,
                max: 105.0
            }
        );
        assert_eq!(valve.y_axis.label, "%");
        assert!(valve.series[0].style.fill.is_some());
    }

    #[test]
    fn test_optional_series_omitted() {
        let chart = compose(&mandatory(), "trace").unwrap();
        assert_eq!(counts(&chart), [2, 1, 0, 1]);
        assert_eq!(chart.panels.len(), 4);
        let pressure = chart.panel(1).unwrap();
        assert_eq!(pressure.series[0].signal, Signal::OutletPressure);
    }

    #[test]
    fn test_missing_outlet_pressure() {
        let table = build(
            1,
            &[
                (Signal::TempSetpoint, &[120.0]),
                (Signal::TempActual, &[118.0]),
                (Signal::ValveOpening, &[35.0]),
            ],
        );
        let err = compose(&table, "trace").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingColumn {
                signal: Signal::OutletPressure,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_valve_opening() {
        let table = build(
            1,
            &[
                (Signal::TempSetpoint, &[120.0]),
                (Signal::TempActual, &[118.0]),
                (Signal::OutletPressure, &[2.0]),
            ],
        );
        assert!(matches!(
            compose(&table, "trace"),
            Err(Error::MissingColumn {
                signal: Signal::ValveOpening,
                ..
            })
        ));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let table = full();
        let a = compose(&table, "trace").unwrap();
        let b = compose(&table, "trace").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_json_pretty().unwrap(), b.to_json_pretty().unwrap());
    }

    #[test]
    fn test_setpoints_dotted() {
        let chart = compose(&full(), "trace").unwrap();
        for series in chart.series() {
            let dotted = matches!(
                series.signal,
                Signal::TempSetpoint | Signal::PressureSetpoint
            );
            assert_eq!(series.style.dash == Dash::Dot, dotted, "{}", series.name);
        }
    }

    #[test]
    fn test_trace_title() {
        assert_eq!(
            trace_title("Scenario 2", NaiveDate::from_ymd_opt(2024, 3, 11)),
            "Forensic Trace: Scenario 2 (2024-03-11)"
        );
        assert_eq!(trace_title("Scenario 2", None), "Forensic Trace: Scenario 2");
    }
}
