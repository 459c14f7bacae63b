//! Fixed-decimal display rounding.
//!
//! Always round from the source value. Rounding an already-rounded figure
//! and aggregating it again drifts.

/// Decimal places shown for voltage and current.
pub const ELECTRICAL_PLACES: u32 = 2;

/// Decimal places shown for kWh quantities.
pub const ENERGY_PLACES: u32 = 3;

/// Rounds half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

pub fn round_electrical(value: f64) -> f64 {
    round_to(value, ELECTRICAL_PLACES)
}

pub fn round_energy(value: f64) -> f64 {
    round_to(value, ENERGY_PLACES)
}

pub fn wh_to_kwh(wh: f64) -> f64 {
    wh / 1000.0
}

/// Formats an optional voltage, current or power value for display, e.g.
/// `229.88 V`, or a dash when the value was not reported.
pub fn electrical_label(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{} {unit}", round_electrical(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_electrical() {
        assert_eq!(round_electrical(229.95), 229.95);
        assert_eq!(round_electrical(230.004), 230.0);
        assert_eq!(round_electrical(12.345_6), 12.35);
    }

    #[test]
    fn test_round_energy() {
        assert_eq!(round_energy(wh_to_kwh(4000.0)), 4.0);
        assert_eq!(round_energy(wh_to_kwh(1234.5678)), 1.235);
        assert_eq!(round_energy(0.0), 0.0);
    }

    #[test]
    fn test_electrical_label() {
        assert_eq!(electrical_label(Some(229.876_54), "V"), "229.88 V");
        assert_eq!(electrical_label(Some(5.0), "A"), "5 A");
        assert_eq!(electrical_label(None, "W"), "—");
    }
}
