use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

use super::error::AppError;

/// One of the three electrical circuits monitored by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    L1,
    L2,
    L3,
}

impl Phase {
    /// Identifier used by the API, both in query strings and as `phases` keys.
    pub fn number(&self) -> u8 {
        match self {
            Phase::L1 => 1,
            Phase::L2 => 2,
            Phase::L3 => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::L1 => "Phase 1",
            Phase::L2 => "Phase 2",
            Phase::L3 => "Phase 3",
        }
    }

    pub fn all() -> &'static [Phase] {
        &[Phase::L1, Phase::L2, Phase::L3]
    }
}

impl TryFrom<u8> for Phase {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Phase::L1),
            2 => Ok(Phase::L2),
            3 => Ok(Phase::L3),
            _ => Err(AppError::Validation(format!("Invalid phase id: {value}"))),
        }
    }
}

impl std::str::FromStr for Phase {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| AppError::Validation(format!("Invalid phase id: {s}")))
            .and_then(Phase::try_from)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The set of phases the user wants to see. May be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhaseSelection {
    phases: BTreeSet<Phase>,
}

impl PhaseSelection {
    pub fn all() -> Self {
        Self::from_phases(Phase::all().iter().copied())
    }

    pub fn none() -> Self {
        Self {
            phases: BTreeSet::new(),
        }
    }

    pub fn from_phases(phases: impl IntoIterator<Item = Phase>) -> Self {
        Self {
            phases: phases.into_iter().collect(),
        }
    }

    pub fn contains(&self, phase: Phase) -> bool {
        self.phases.contains(&phase)
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Phases in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = Phase> + '_ {
        self.phases.iter().copied()
    }

    /// Returns a copy with `phase` flipped in or out of the selection.
    pub fn toggled(&self, phase: Phase) -> Self {
        let mut phases = self.phases.clone();
        if !phases.remove(&phase) {
            phases.insert(phase);
        }
        Self { phases }
    }

    /// Query-string value in the bracketed list form the API expects, e.g. `[1,3]`.
    pub fn query_value(&self) -> String {
        let ids: Vec<String> = self.iter().map(|p| p.number().to_string()).collect();
        format!("[{}]", ids.join(","))
    }
}

impl Default for PhaseSelection {
    fn default() -> Self {
        Self::all()
    }
}

/// Measurements reported for a single phase. Every quantity is optional
/// because the device omits what it could not sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseReading {
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    pub power: Option<f64>,
    pub energy_wh: Option<f64>,
}

impl PhaseReading {
    pub fn energy_kwh(&self) -> Option<f64> {
        self.energy_wh.map(|wh| wh / 1000.0)
    }
}

/// Multi-phase snapshot returned by the dashboard readings endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingData {
    pub timestamp: Option<DateTime<Utc>>,
    pub phases: BTreeMap<Phase, PhaseReading>,
    pub total: Option<PhaseReading>,
}

impl ReadingData {
    /// Returns the reading for `phase`, or `None` when the device sent no data for it.
    pub fn phase(&self, phase: Phase) -> Option<&PhaseReading> {
        self.phases.get(&phase)
    }
}

/// A single sample from the power endpoints (latest or time series).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerReading {
    pub time: DateTime<Utc>,
    pub voltage: f64,
    pub current: f64,
    pub power: Option<f64>,
    pub energy_wh: Option<f64>,
}

impl PowerReading {
    /// Instantaneous power, falling back to V·I when the device did not report it.
    pub fn effective_power(&self) -> f64 {
        self.power.unwrap_or(self.voltage * self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_parsing() {
        assert_eq!("1".parse::<Phase>().unwrap(), Phase::L1);
        assert_eq!(" 3".parse::<Phase>().unwrap(), Phase::L3);
        assert!("4".parse::<Phase>().is_err());
        assert!("L1".parse::<Phase>().is_err());
    }

    #[test]
    fn test_selection_toggle() {
        let selection = PhaseSelection::all().toggled(Phase::L2);
        assert!(!selection.contains(Phase::L2));
        assert_eq!(selection.len(), 2);

        let selection = selection.toggled(Phase::L2);
        assert_eq!(selection, PhaseSelection::all());
    }

    #[test]
    fn test_selection_query_value() {
        assert_eq!(PhaseSelection::all().query_value(), "[1,2,3]");
        assert_eq!(
            PhaseSelection::from_phases([Phase::L3, Phase::L1]).query_value(),
            "[1,3]"
        );
        assert_eq!(PhaseSelection::none().query_value(), "[]");
    }

    #[test]
    fn test_selection_empty_after_toggling_everything_off() {
        let selection = Phase::all()
            .iter()
            .fold(PhaseSelection::all(), |s, &p| s.toggled(p));
        assert!(selection.is_empty());
        assert_eq!(selection, PhaseSelection::none());
        assert!(!PhaseSelection::all().is_empty());
    }
}
