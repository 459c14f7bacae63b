use yew::prelude::*;

use crate::models::reading::{Phase, PhaseSelection};

#[derive(Properties, PartialEq)]
pub struct PhaseSelectorProps {
    pub selection: PhaseSelection,
    pub on_toggle: Callback<Phase>,
}

/// Checkbox row for choosing which phases to monitor
#[function_component(PhaseSelector)]
pub fn phase_selector(props: &PhaseSelectorProps) -> Html {
    html! {
        <div class="phase-selector">
            <h3>{"Select Phases to Monitor"}</h3>
            <div class="phase-options">
                {
                    Phase::all().iter().map(|&phase| {
                        let checked = props.selection.contains(phase);
                        let onchange = {
                            let callback = props.on_toggle.clone();
                            Callback::from(move |_: Event| callback.emit(phase))
                        };
                        let class = if checked { "phase-option selected" } else { "phase-option" };
                        html! {
                            <label {class}>
                                <input type="checkbox" {checked} {onchange} />
                                <span>{phase.label()}</span>
                            </label>
                        }
                    }).collect::<Html>()
                }
            </div>
        </div>
    }
}
