use crate::models::{
    reading::{PhaseReading, PhaseSelection, ReadingData},
    stats::{CombinedReading, Statistics},
};
use crate::utils::rounding::{round_electrical, round_energy, wh_to_kwh};

/// Combines the selected phases of `reading` into display statistics.
///
/// Returns `None` when none of the selected phases has data, including when
/// the selection itself is empty. Phases missing from the reading are skipped.
/// Energy sums treat an unreported value as zero; means and the peak only
/// consider phases that reported the quantity.
pub fn aggregate(reading: &ReadingData, selection: &PhaseSelection) -> Option<Statistics> {
    let selected: Vec<&PhaseReading> = selection
        .iter()
        .filter_map(|phase| reading.phase(phase))
        .collect();

    if selected.is_empty() {
        return None;
    }

    let energy_wh: f64 = selected.iter().filter_map(|p| p.energy_wh).sum();
    let voltage = mean(selected.iter().filter_map(|p| p.voltage));
    let current = mean(selected.iter().filter_map(|p| p.current));
    let peak_power = selected
        .iter()
        .filter_map(|p| p.power)
        .fold(None, |peak: Option<f64>, power| {
            Some(peak.map_or(power, |p| p.max(power)))
        });

    Some(Statistics {
        total_energy_kwh: round_energy(wh_to_kwh(energy_wh)),
        average_voltage: voltage.map(round_electrical),
        average_current: current.map(round_electrical),
        peak_power: peak_power.map(round_electrical),
        phase_count: selected.len(),
        latest_reading: CombinedReading {
            timestamp: reading.timestamp,
            energy_kwh: wh_to_kwh(energy_wh),
            voltage,
            current,
        },
    })
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
