use yew::prelude::*;

use crate::models::reading::{Phase, PhaseSelection};

/// Handle returned by `use_phases` hook
#[derive(Clone, PartialEq)]
pub struct PhasesHandle {
    pub selection: PhaseSelection,
    pub toggle: Callback<Phase>,
}

/// Phase selection state, starting with every phase selected.
#[hook]
pub fn use_phases() -> PhasesHandle {
    let selection = use_state(PhaseSelection::all);

    let toggle = {
        let selection = selection.clone();
        Callback::from(move |phase: Phase| selection.set(selection.toggled(phase)))
    };

    PhasesHandle {
        selection: (*selection).clone(),
        toggle,
    }
}
