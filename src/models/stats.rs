use chrono::{DateTime, Utc};

/// Min / max / average of one quantity over a time range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// Server-side statistics for `/api/power/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowerStats {
    pub voltage: Option<Spread>,
    pub current: Option<Spread>,
}

/// Energy consumed over a time range, in kWh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyTotal {
    pub total_kwh: f64,
}

/// The selected phases collapsed into one reading, before display rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedReading {
    pub timestamp: Option<DateTime<Utc>>,
    pub energy_kwh: f64,
    pub voltage: Option<f64>,
    pub current: Option<f64>,
}

/// Summary derived from the current multi-phase reading and phase selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Sum of selected phase energy, kWh rounded to 3 places.
    pub total_energy_kwh: f64,
    /// Mean voltage of selected phases, rounded to 2 places.
    pub average_voltage: Option<f64>,
    /// Mean current of selected phases, rounded to 2 places.
    pub average_current: Option<f64>,
    /// Highest instantaneous power among selected phases.
    pub peak_power: Option<f64>,
    /// Number of selected phases that reported data.
    pub phase_count: usize,
    pub latest_reading: CombinedReading,
}
