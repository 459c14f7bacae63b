use chrono::{DateTime, Utc};

use super::reading::{Phase, PhaseSelection};

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceInfo {
    pub name: String,
    pub location: String,
    pub device_id: String,
    pub status: String,
}

impl DeviceInfo {
    pub fn is_online(&self) -> bool {
        self.status.eq_ignore_ascii_case("online") || self.status.eq_ignore_ascii_case("active")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub role: Option<String>,
}

/// Energy used in one hour of the day, per phase (Wh).
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyUsage {
    pub hour: String,
    pub phase1: Option<f64>,
    pub phase2: Option<f64>,
    pub phase3: Option<f64>,
}

impl HourlyUsage {
    pub fn value(&self, phase: Phase) -> Option<f64> {
        match phase {
            Phase::L1 => self.phase1,
            Phase::L2 => self.phase2,
            Phase::L3 => self.phase3,
        }
    }

    /// Sum over the selected phases; absent phases count as zero.
    pub fn total_for(&self, selection: &PhaseSelection) -> f64 {
        selection.iter().filter_map(|p| self.value(p)).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub time: String,
    pub energy: f64,
    pub voltage: f64,
    pub current: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyConsumption {
    pub day: String,
    pub consumption: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsData {
    pub energy_trend: Vec<TrendPoint>,
    pub daily_consumption: Vec<DailyConsumption>,
}

impl AnalyticsData {
    pub fn total_consumption(&self) -> f64 {
        self.daily_consumption.iter().map(|d| d.consumption).sum()
    }
}

/// One tier of the tariff applied to consumed energy.
#[derive(Debug, Clone, PartialEq)]
pub struct BillSlab {
    pub slab: String,
    pub units: f64,
    pub rate: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BillCalculation {
    pub total_amount: f64,
    pub breakdown: Vec<BillSlab>,
    pub fixed_charges: Option<f64>,
}

impl BillCalculation {
    /// Sum of the slab amounts, excluding fixed charges.
    pub fn energy_charge_total(&self) -> f64 {
        self.breakdown.iter().map(|s| s.amount).sum()
    }

    /// Total amount per kWh consumed. `None` when nothing was consumed.
    pub fn average_rate(&self, total_kwh: f64) -> Option<f64> {
        (total_kwh > 0.0).then(|| self.total_amount / total_kwh)
    }
}

/// Raw answer of an arbitrary GET, kept for the inspection console.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResponse {
    pub url: String,
    pub status: u16,
    pub body: serde_json::Value,
    pub received_at: DateTime<Utc>,
}
