use std::rc::Rc;
use yew::prelude::*;

use crate::models::reading::{Phase, PhaseSelection, ReadingData};
use crate::utils::rounding::{electrical_label, round_energy};

#[derive(Properties, PartialEq)]
pub struct PhaseCardsProps {
    pub readings: Option<Rc<ReadingData>>,
    pub selection: PhaseSelection,
}

/// One card per selected phase; phases without data are greyed out.
#[function_component(PhaseCards)]
pub fn phase_cards(props: &PhaseCardsProps) -> Html {
    html! {
        <div class="phase-cards">
            { for props.selection.iter().map(|phase| phase_card(phase, props.readings.as_deref())) }
        </div>
    }
}

fn phase_card(phase: Phase, readings: Option<&ReadingData>) -> Html {
    let Some(reading) = readings.and_then(|r| r.phase(phase)) else {
        return html! {
            <div class="phase-card no-data">
                <p class="phase-name">{phase.label()}</p>
                <p class="phase-value">{"No Data"}</p>
            </div>
        };
    };

    html! {
        <div class={classes!("phase-card", format!("phase-{}", phase.number()))}>
            <p class="phase-name">{phase.label()}</p>
            <p class="phase-value">
                {reading.energy_kwh().map_or_else(|| "—".to_string(), |kwh| format!("{} kWh", round_energy(kwh)))}
            </p>
            <div class="phase-details">
                <p>{"Voltage: "}{electrical_label(reading.voltage, "V")}</p>
                <p>{"Current: "}{electrical_label(reading.current, "A")}</p>
                <p>{"Power: "}{electrical_label(reading.power, "W")}</p>
            </div>
        </div>
    }
}
