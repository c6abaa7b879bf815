//! Column registry
//!
//! Maps every logical signal in a QualSteam process log to the physical
//! column label it is recorded under. Nothing else in the crate spells out a
//! column label.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Timestamp,
    TempSetpoint,
    TempActual,
    SteamFlow,
    ValveOpening,
    InletPressure,
    OutletPressure,
    PressureSetpoint,
}

/// Whether a signal has to be present for the trace chart to be built.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Presence {
    Required,
    Optional,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ColumnSpec {
    pub signal: Signal,
    pub label: &'static str,
    pub presence: Presence,
}

pub static COLUMNS: [ColumnSpec; 8] = [
    ColumnSpec::new(Signal::Timestamp, "Timestamp", Presence::Required),
    ColumnSpec::new(Signal::TempSetpoint, "Process Temp SP", Presence::Required),
    ColumnSpec::new(Signal::TempActual, "Process Temp", Presence::Required),
    ColumnSpec::new(Signal::SteamFlow, "Steam Flow Rate", Presence::Optional),
    ColumnSpec::new(Signal::ValveOpening, "QualSteam Valve Opening", Presence::Required),
    ColumnSpec::new(Signal::InletPressure, "Inlet Steam Pressure", Presence::Optional),
    ColumnSpec::new(Signal::OutletPressure, "Outlet Steam Pressure", Presence::Required),
    ColumnSpec::new(Signal::PressureSetpoint, "Pressure SP", Presence::Optional),
];

impl ColumnSpec {
    const fn new(signal: Signal, label: &'static str, presence: Presence) -> Self {
        Self {
            signal,
            label,
            presence,
        }
    }
}

impl Signal {
    pub const ALL: [Signal; 8] = [
        Signal::Timestamp,
        Signal::TempSetpoint,
        Signal::TempActual,
        Signal::SteamFlow,
        Signal::ValveOpening,
        Signal::InletPressure,
        Signal::OutletPressure,
        Signal::PressureSetpoint,
    ];

    /// Every signal except the timestamp axis.
    pub const MEASURED: [Signal; 7] = [
        Signal::TempSetpoint,
        Signal::TempActual,
        Signal::SteamFlow,
        Signal::ValveOpening,
        Signal::InletPressure,
        Signal::OutletPressure,
        Signal::PressureSetpoint,
    ];

    pub fn spec(self) -> &'static ColumnSpec {
        &COLUMNS[self as usize]
    }

    pub fn column(self) -> &'static str {
        self.spec().label
    }

    pub fn presence(self) -> Presence {
        self.spec().presence
    }

    pub fn is_required(self) -> bool {
        self.presence() == Presence::Required
    }

    pub fn from_column(label: &str) -> Option<Signal> {
        COLUMNS
            .iter()
            .find(|spec| spec.label == label)
            .map(|spec| spec.signal)
    }

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Signal::Timestamp => "timestamp",
            Signal::TempSetpoint => "process temperature setpoint",
            Signal::TempActual => "process temperature",
            Signal::SteamFlow => "steam flow rate",
            Signal::ValveOpening => "valve opening",
            Signal::InletPressure => "inlet steam pressure",
            Signal::OutletPressure => "outlet steam pressure",
            Signal::PressureSetpoint => "pressure setpoint",
        };
        f.write_str(name)
    }
}

/// Set of signals present in a loaded table, resolved once at load time.
#[derive(Serialize, Deserialize, Clone, Copy, Default, Hash, PartialEq, Eq)]
pub struct SignalSet(u16);

impl SignalSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, signal: Signal) {
        self.0 |= signal.bit();
    }

    pub const fn contains(self, signal: Signal) -> bool {
        self.0 & signal.bit() != 0
    }

    pub fn iter(self) -> impl Iterator<Item = Signal> {
        Signal::ALL.into_iter().filter(move |s| self.contains(*s))
    }

    /// Required signals absent from this set.
    pub fn missing_required(self) -> impl Iterator<Item = Signal> {
        Signal::ALL
            .into_iter()
            .filter(move |s| s.is_required() && !self.contains(*s))
    }
}

impl FromIterator<Signal> for SignalSet {
    fn from_iter<I: IntoIterator<Item = Signal>>(iter: I) -> Self {
        let mut set = SignalSet::empty();
        for signal in iter {
            set.insert(signal);
        }
        set
    }
}

impl fmt::Debug for SignalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
