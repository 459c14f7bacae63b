use chrono::Utc;
use std::rc::Rc;
use yew::prelude::*;

use crate::models::reading::PowerReading;
use crate::models::stats::{EnergyTotal, PowerStats, Spread};
use crate::models::time_range::TimeRange;
use crate::utils::rounding::{round_electrical, round_energy};

#[derive(Properties, PartialEq)]
pub struct PowerPanelProps {
    pub latest: Option<Rc<PowerReading>>,
    pub stats: Option<Rc<PowerStats>>,
    pub energy: Option<Rc<EnergyTotal>>,
    pub series: Option<Rc<Vec<PowerReading>>>,
    pub range: TimeRange,
}

fn spread_row(name: &str, unit: &str, spread: Option<Spread>) -> Html {
    match spread {
        Some(s) => html! {
            <tr>
                <td>{name}</td>
                <td>{format!("{} {unit}", s.min)}</td>
                <td>{format!("{} {unit}", s.avg)}</td>
                <td>{format!("{} {unit}", s.max)}</td>
            </tr>
        },
        None => html! {
            <tr><td>{name}</td><td colspan="3">{"No Data"}</td></tr>
        },
    }
}

/// Live single-feed readings with range statistics
#[function_component(PowerPanel)]
pub fn power_panel(props: &PowerPanelProps) -> Html {
    let peak = props.series.as_ref().and_then(|series| {
        series
            .iter()
            .map(PowerReading::effective_power)
            .reduce(f64::max)
    });
    let (start, end) = props.range.bounds(Utc::now());

    html! {
        <div class="power-panel">
            <div class="summary-grid">
                if let Some(latest) = &props.latest {
                    <div class="summary-item">
                        <h3>{"Voltage"}</h3>
                        <p class="summary-value">{format!("{} V", round_electrical(latest.voltage))}</p>
                    </div>
                    <div class="summary-item">
                        <h3>{"Current"}</h3>
                        <p class="summary-value">{format!("{} A", round_electrical(latest.current))}</p>
                    </div>
                    <div class="summary-item">
                        <h3>{"Power"}</h3>
                        <p class="summary-value">{format!("{} W", round_electrical(latest.effective_power()))}</p>
                    </div>
                }
                if let Some(energy) = &props.energy {
                    <div class="summary-item">
                        <h3>{"Energy"}</h3>
                        <p class="summary-value">{format!("{} kWh", energy.total_kwh)}</p>
                    </div>
                }
                if let Some(peak) = peak {
                    <div class="summary-item">
                        <h3>{"Peak Power"}</h3>
                        <p class="summary-value">{format!("{} W", round_electrical(peak))}</p>
                    </div>
                }
            </div>

            if let Some(latest) = &props.latest {
                <p class="summary-note">
                    {format!("Last reading {}", latest.time.format("%Y-%m-%d %H:%M:%S"))}
                    if let Some(wh) = latest.energy_wh {
                        {format!(", meter {} kWh", round_energy(wh / 1000.0))}
                    }
                </p>
            }

            if let Some(stats) = &props.stats {
                <table class="power-stats">
                    <thead>
                        <tr><th></th><th>{"Min"}</th><th>{"Avg"}</th><th>{"Max"}</th></tr>
                    </thead>
                    <tbody>
                        {spread_row("Voltage", "V", stats.voltage)}
                        {spread_row("Current", "A", stats.current)}
                    </tbody>
                </table>
            }

            if let Some(series) = &props.series {
                <p class="summary-note">
                    {format!(
                        "{} samples between {} and {}",
                        series.len(),
                        start.format("%Y-%m-%d %H:%M"),
                        end.format("%Y-%m-%d %H:%M")
                    )}
                </p>
            }
        </div>
    }
}
