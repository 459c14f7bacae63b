use crate::models::stats::Statistics;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryProps {
    pub statistics: Option<Statistics>,
}

fn or_na(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v} {unit}"))
}

#[function_component(Summary)]
pub fn summary(props: &SummaryProps) -> Html {
    match &props.statistics {
        Some(stats) => html! {
            <div class="data-summary">
                <div class="summary-grid">
                    <div class="summary-item">
                        <h3>{"Total Energy"}</h3>
                        <p class="summary-value">{format!("{:.3} kWh", stats.total_energy_kwh)}</p>
                    </div>
                    <div class="summary-item">
                        <h3>{"Average Voltage"}</h3>
                        <p class="summary-value">{or_na(stats.average_voltage, "V")}</p>
                    </div>
                    <div class="summary-item">
                        <h3>{"Average Current"}</h3>
                        <p class="summary-value">{or_na(stats.average_current, "A")}</p>
                    </div>
                    <div class="summary-item">
                        <h3>{"Peak Power"}</h3>
                        <p class="summary-value">{or_na(stats.peak_power, "W")}</p>
                    </div>
                </div>
                <p class="summary-note">
                    {format!("Across {} phase(s)", stats.phase_count)}
                    if let Some(ts) = stats.latest_reading.timestamp {
                        {format!(", read at {}", ts.format("%H:%M:%S"))}
                    }
                </p>
            </div>
        },
        None => html! {
            <div class="data-summary empty">
                <h3>{"Total Combined"}</h3>
                <p>{"No Data"}</p>
            </div>
        },
    }
}
