//! Signal tables
//!
//! A [`SignalTable`] holds one scenario's process log: a timestamp axis plus
//! one sample column per registered signal. Columns other than the timestamp
//! may be absent, which is tracked once at load time in a [`SignalSet`].

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::Error;
use crate::schema::{Signal, SignalSet};

/// One column of samples. Blank and NA cells are `None`.
pub type Samples = Arc<[Option<f64>]>;

/// Numeric dates are month-first; day-first is only tried once those fail.
const TIMESTAMP_FORMATS: [&str; 12] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m-%d-%Y %H:%M:%S",
    "%m-%d-%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

/// Cell contents read as a missing sample, on top of the empty cell.
const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Clone, Debug, PartialEq)]
pub struct SignalTable {
    timestamps: Arc<[NaiveDateTime]>,
    temp_setpoint: Option<Samples>,
    temp_actual: Option<Samples>,
    steam_flow: Option<Samples>,
    valve_opening: Option<Samples>,
    inlet_pressure: Option<Samples>,
    outlet_pressure: Option<Samples>,
    pressure_setpoint: Option<Samples>,
    signals: SignalSet,
}

impl SignalTable {
    /// Creates a table with only a timestamp axis.
    pub fn new(timestamps: impl Into<Arc<[NaiveDateTime]>>) -> Self {
        let mut signals = SignalSet::empty();
        signals.insert(Signal::Timestamp);
        Self {
            timestamps: timestamps.into(),
            temp_setpoint: None,
            temp_actual: None,
            steam_flow: None,
            valve_opening: None,
            inlet_pressure: None,
            outlet_pressure: None,
            pressure_setpoint: None,
            signals,
        }
    }

    /// Attaches a sample column. The column must have one sample per timestamp.
    pub fn with_column(
        mut self,
        signal: Signal,
        samples: impl Into<Samples>,
    ) -> Result<Self, Error> {
        let samples = samples.into();
        if samples.len() != self.timestamps.len() {
            return Err(Error::ColumnLength {
                column: signal.column(),
                expected: self.timestamps.len(),
                actual: samples.len(),
            });
        }
        if let Some(slot) = self.slot_mut(signal) {
            *slot = Some(samples);
            self.signals.insert(signal);
        }
        Ok(self)
    }

    /// Attaches a fully populated sample column.
    pub fn with_values(
        self,
        signal: Signal,
        values: impl IntoIterator<Item = f64>,
    ) -> Result<Self, Error> {
        let samples: Samples = values.into_iter().map(Some).collect();
        self.with_column(signal, samples)
    }

    /// Opens a process log. Anything that is not a readable regular file is
    /// [`Error::ResourceNotFound`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let not_found = |source| Error::ResourceNotFound {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(not_found)?;
        if !file.metadata().map_err(not_found)?.is_file() {
            return Err(not_found(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        Self::from_reader(io::BufReader::new(file))
    }

    /// Parses a CSV process log. Any row with an unparseable timestamp or a
    /// non-numeric sample rejects the whole table.
    pub fn from_reader(reader: impl io::Read) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut timestamp_idx = None;
        let mut slots: Vec<(Signal, usize)> = Vec::new();
        for (idx, label) in reader.headers()?.iter().enumerate() {
            match Signal::from_column(label) {
                Some(Signal::Timestamp) if timestamp_idx.is_none() => timestamp_idx = Some(idx),
                Some(signal)
                    if signal != Signal::Timestamp && !slots.iter().any(|(s, _)| *s == signal) =>
                {
                    slots.push((signal, idx))
                }
                Some(signal) => warn!(%signal, column = label, "ignoring duplicate column"),
                None => debug!(column = label, "ignoring unregistered column"),
            }
        }
        let timestamp_idx =
            timestamp_idx.ok_or_else(|| Error::MissingTimestamp(Signal::Timestamp.column()))?;

        let mut timestamps = Vec::new();
        let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); slots.len()];
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let raw = record.get(timestamp_idx).unwrap_or_default();
            let timestamp = parse_timestamp(raw).ok_or_else(|| Error::MalformedTimestamp {
                row,
                value: raw.to_string(),
            })?;
            timestamps.push(timestamp);

            for ((signal, idx), column) in slots.iter().zip(columns.iter_mut()) {
                let raw = record.get(*idx).unwrap_or_default();
                let sample = parse_sample(raw).map_err(|_| Error::InvalidValue {
                    row,
                    column: signal.column(),
                    value: raw.to_string(),
                })?;
                column.push(sample);
            }
        }

        slots.into_iter().zip(columns).try_fold(
            SignalTable::new(timestamps),
            |table, ((signal, _), samples)| table.with_column(signal, samples),
        )
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &Arc<[NaiveDateTime]> {
        &self.timestamps
    }

    pub fn signals(&self) -> SignalSet {
        self.signals
    }

    pub fn has(&self, signal: Signal) -> bool {
        self.signals.contains(signal)
    }

    pub fn column(&self, signal: Signal) -> Option<&Samples> {
        match signal {
            Signal::Timestamp => None,
            Signal::TempSetpoint => self.temp_setpoint.as_ref(),
            Signal::TempActual => self.temp_actual.as_ref(),
            Signal::SteamFlow => self.steam_flow.as_ref(),
            Signal::ValveOpening => self.valve_opening.as_ref(),
            Signal::InletPressure => self.inlet_pressure.as_ref(),
            Signal::OutletPressure => self.outlet_pressure.as_ref(),
            Signal::PressureSetpoint => self.pressure_setpoint.as_ref(),
        }
    }

    /// Like [`Self::column`], but absence is an error.
    pub fn require(&self, signal: Signal) -> Result<&Samples, Error> {
        self.column(signal).ok_or_else(|| Error::missing(signal))
    }

    /// Calendar date of the first sample.
    pub fn report_date(&self) -> Option<NaiveDate> {
        self.timestamps.first().map(|t| t.date())
    }

    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((*self.timestamps.first()?, *self.timestamps.last()?))
    }

    fn slot_mut(&mut self, signal: Signal) -> Option<&mut Option<Samples>> {
        match signal {
            Signal::Timestamp => None,
            Signal::TempSetpoint => Some(&mut self.temp_setpoint),
            Signal::TempActual => Some(&mut self.temp_actual),
            Signal::SteamFlow => Some(&mut self.steam_flow),
            Signal::ValveOpening => Some(&mut self.valve_opening),
            Signal::InletPressure => Some(&mut self.inlet_pressure),
            Signal::OutletPressure => Some(&mut self.outlet_pressure),
            Signal::PressureSetpoint => Some(&mut self.pressure_setpoint),
        }
    }
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_sample(raw: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    let raw = raw.trim();
    if raw.is_empty() || NA_TOKENS.contains(&raw) {
        return Ok(None);
    }
    raw.parse::<f64>().map(Some)
}
