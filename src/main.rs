use yew::prelude::*;

use energo_dashboard::components::{Dashboard, ProbeConsole};
use energo_dashboard::services::api::{EnergoClient, SharedClient};
use energo_dashboard::services::capability::Capabilities;

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Screen(usize),
    Console,
}

#[function_component(App)]
fn app() -> Html {
    let client = use_memo((), |_| EnergoClient::new().map(SharedClient::new));
    let screens = use_memo((), |_| Capabilities::all());
    let tab = use_state(|| Tab::Screen(0));

    let client = match &*client {
        Ok(client) => client.clone(),
        Err(e) => {
            log::error!("Failed to start API client: {e}");
            return html! {
                <div class="app-container">
                    <div class="status error"><p>{"❌ "}{e.to_string()}</p></div>
                </div>
            };
        }
    };

    let select = |target: Tab| {
        let tab = tab.clone();
        Callback::from(move |_: MouseEvent| tab.set(target))
    };

    html! {
        <div class="app-container">
            <header class="app-header">
                <h1>{"Energo Dashboard"}</h1>
                <nav class="tabs">
                    { for screens.iter().enumerate().map(|(i, caps)| html! {
                        <button
                            class={classes!("tab", (*tab == Tab::Screen(i)).then_some("active"))}
                            onclick={select(Tab::Screen(i))}
                        >
                            {caps.name}
                        </button>
                    }) }
                    <button
                        class={classes!("tab", (*tab == Tab::Console).then_some("active"))}
                        onclick={select(Tab::Console)}
                    >
                        {"API Console"}
                    </button>
                </nav>
            </header>

            <main class="app-main">
                {
                    match *tab {
                        Tab::Screen(i) => match screens.get(i) {
                            Some(caps) => html! {
                                <Dashboard key={caps.name} client={client.clone()} capabilities={caps.clone()} />
                            },
                            None => html! {},
                        },
                        Tab::Console => html! { <ProbeConsole client={client.clone()} /> },
                    }
                }
            </main>

            <style>
                {include_str!("style.css")}
            </style>
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);
    yew::Renderer::<App>::new().render();
}
