use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::hooks::use_time_range::TimeRangeHandle;
use crate::models::time_range::{RelativeWindow, TimeRange};

const CUSTOM: &str = "custom";

#[derive(Properties, PartialEq)]
pub struct TimeRangeSelectorProps {
    pub handle: TimeRangeHandle,
}

/// Window dropdown plus an explicit start/end form for custom ranges
#[function_component(TimeRangeSelector)]
pub fn time_range_selector(props: &TimeRangeSelectorProps) -> Html {
    let handle = &props.handle;
    let show_custom = use_state(|| matches!(handle.range, TimeRange::Custom(_)));
    let start_ref = use_node_ref();
    let end_ref = use_node_ref();

    let on_select = {
        let set_window = handle.set_window.clone();
        let show_custom = show_custom.clone();
        Callback::from(move |e: Event| {
            let Some(select) = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
            else {
                return;
            };
            let value = select.value();
            if value == CUSTOM {
                show_custom.set(true);
            } else if let Ok(window) = value.parse::<RelativeWindow>() {
                show_custom.set(false);
                set_window.emit(window);
            }
        })
    };

    let on_apply = {
        let set_custom = handle.set_custom.clone();
        let start_ref = start_ref.clone();
        let end_ref = end_ref.clone();
        Callback::from(move |_: MouseEvent| {
            let start = start_ref.cast::<HtmlInputElement>().map(|i| i.value());
            let end = end_ref.cast::<HtmlInputElement>().map(|i| i.value());
            if let (Some(start), Some(end)) = (start, end) {
                set_custom.emit((start, end));
            }
        })
    };

    let current = handle.range.window();

    html! {
        <div class="time-range-selector">
            <select
                class="time-range-select"
                onchange={on_select}
                aria-label="Select time range"
            >
                {
                    RelativeWindow::all().iter().map(|w| {
                        let selected = !*show_custom && current == Some(*w);
                        html! {
                            <option value={w.code()} {selected}>{w.description()}</option>
                        }
                    }).collect::<Html>()
                }
                <option value={CUSTOM} selected={*show_custom}>{"Custom range"}</option>
            </select>

            if *show_custom {
                <div class="custom-range">
                    <label>{"From "}<input type="datetime-local" ref={start_ref} /></label>
                    <label>{"To "}<input type="datetime-local" ref={end_ref} /></label>
                    <button onclick={on_apply}>{"Apply"}</button>
                </div>
            }

            if let Some(error) = &handle.error {
                <p class="validation-error">{error}</p>
            }

            <p class="range-label">{handle.range.label()}</p>
        </div>
    }
}
