use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::models::dashboard::ProbeResponse;
use crate::services::api::SharedClient;

/// Endpoints offered by the console, with their default query strings.
const ENDPOINTS: &[(&str, &str)] = &[
    ("/api/power/latest", ""),
    ("/api/power/stats", "timeRange=24h"),
    ("/api/power/energy", "timeRange=24h"),
    ("/api/power", "timeRange=24h"),
    ("/api/power/energy/range", "from=2025-12-10T00:00:00Z&to=2025-12-10T23:59:59Z"),
];

#[derive(Properties, PartialEq)]
pub struct ProbeConsoleProps {
    pub client: SharedClient,
}

/// Sends raw GETs to the API and shows the untouched response.
#[function_component(ProbeConsole)]
pub fn probe_console(props: &ProbeConsoleProps) -> Html {
    let endpoint = use_state(|| ENDPOINTS[0].0.to_string());
    let query = use_state(|| ENDPOINTS[0].1.to_string());
    let response = use_state(|| None::<ProbeResponse>);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_endpoint = {
        let endpoint = endpoint.clone();
        let query = query.clone();
        Callback::from(move |e: Event| {
            let target: HtmlInputElement = e.target_unchecked_into();
            let value = target.value();
            let default_query = ENDPOINTS
                .iter()
                .find(|(path, _)| *path == value)
                .map(|(_, q)| (*q).to_string())
                .unwrap_or_default();
            query.set(default_query);
            endpoint.set(value);
        })
    };

    let on_query = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            query.set(target.value());
        })
    };

    let on_send = {
        let client = props.client.clone();
        let endpoint = endpoint.clone();
        let query = query.clone();
        let response = response.clone();
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |_: MouseEvent| {
            let client = client.clone();
            let path = (*endpoint).clone();
            let params = (*query).clone();
            let response = response.clone();
            let error = error.clone();
            let loading = loading.clone();

            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match client.probe(&path, &params).await {
                    Ok(probe) => response.set(Some(probe)),
                    Err(e) => {
                        response.set(None);
                        error.set(Some(e.to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="probe-console">
            <h2>{"API Debug Console"}</h2>
            <input list="probe-endpoints" value={(*endpoint).clone()} onchange={on_endpoint} />
            <datalist id="probe-endpoints">
                { for ENDPOINTS.iter().map(|(path, _)| html! { <option value={*path} /> }) }
            </datalist>
            <input
                class="probe-query"
                placeholder="e.g. timeRange=1h"
                value={(*query).clone()}
                oninput={on_query}
            />
            <button onclick={on_send} disabled={*loading}>
                { if *loading { "Loading..." } else { "Send Request" } }
            </button>

            if let Some(msg) = &*error {
                <div class="status error"><p>{"Error: "}{msg}</p></div>
            }

            if let Some(probe) = &*response {
                <div class="probe-response">
                    <p>
                        <span class={if (200..300).contains(&probe.status) { "badge ok" } else { "badge fail" }}>
                            {probe.status.to_string()}
                        </span>
                        {" "}{&probe.url}
                    </p>
                    <p class="summary-note">
                        {format!("Received at {}", probe.received_at.format("%H:%M:%S"))}
                    </p>
                    <pre>{serde_json::to_string_pretty(&probe.body).unwrap_or_default()}</pre>
                </div>
            }
        </div>
    }
}
