use yew::prelude::*;

use crate::services::poller::DataState;

#[derive(Properties, PartialEq)]
pub struct StatusProps {
    pub label: AttrValue,
    pub loading: bool,
    pub has_data: bool,
    #[prop_or_default]
    pub error: Option<String>,
}

impl StatusProps {
    pub fn of<T>(label: &'static str, state: &DataState<T>) -> Self {
        Self {
            label: AttrValue::Static(label),
            loading: state.is_loading(),
            has_data: state.data().is_some(),
            error: state.error().map(str::to_string),
        }
    }
}

/// Inline loading / error line for one resource. Renders nothing once the
/// resource has data and no error.
#[function_component(Status)]
pub fn status(props: &StatusProps) -> Html {
    html! {
        <>
            if let Some(msg) = &props.error {
                <div class="status error">
                    <p>{"❌ Error loading "}{&props.label}{": "}{msg}</p>
                    if props.has_data {
                        <p class="status-note">{"Showing last known values."}</p>
                    }
                </div>
            }
            if props.loading && !props.has_data {
                <div class="status loading">
                    <div class="spinner"></div>
                    <p>{format!("Loading {}...", props.label)}</p>
                </div>
            } else if props.loading {
                <div class="status refreshing">
                    <p>{format!("Refreshing {}...", props.label)}</p>
                </div>
            }
        </>
    }
}
