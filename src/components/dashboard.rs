use chrono::Utc;
use yew::prelude::*;

use crate::components::bill::Bill;
use crate::components::device_card::DeviceCard;
use crate::components::phase_cards::PhaseCards;
use crate::components::phase_selector::PhaseSelector;
use crate::components::power_panel::PowerPanel;
use crate::components::status::{Status, StatusProps};
use crate::components::summary::Summary;
use crate::components::time_range_selector::TimeRangeSelector;
use crate::components::usage_tables::{AnalyticsTables, HourlyTable};
use crate::hooks::use_phases::use_phases;
use crate::hooks::use_polled::use_polled;
use crate::hooks::use_time_range::use_time_range;
use crate::models::error::AppError;
use crate::models::time_range::{RelativeWindow, TimeRange};
use crate::services::aggregate::aggregate;
use crate::services::api::SharedClient;
use crate::services::capability::{Capabilities, Resource};

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub client: SharedClient,
    pub capabilities: Capabilities,
}

fn window_only(what: &str) -> AppError {
    AppError::Validation(format!("{what} are only available for named windows"))
}

/// One dashboard screen. Which resources are fetched and which of them poll
/// is decided entirely by `capabilities`.
#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let caps = &props.capabilities;
    let phases = use_phases();
    let time_range = use_time_range();
    let selection = phases.selection.clone();
    let range = time_range.range;

    // Multi-phase resources
    let readings = {
        let client = props.client.clone();
        use_polled(
            caps.includes(Resource::Readings),
            selection.clone(),
            caps.poll_interval(Resource::Readings),
            move |selection| async move { client.readings(&selection).await },
        )
    };

    let hourly = {
        let client = props.client.clone();
        use_polled(
            caps.includes(Resource::HourlyUsage),
            (Utc::now().date_naive(), selection.clone()),
            caps.poll_interval(Resource::HourlyUsage),
            move |(date, selection)| async move { client.hourly_usage(date, &selection).await },
        )
    };

    let device = {
        let client = props.client.clone();
        use_polled(
            caps.includes(Resource::DeviceInfo),
            (),
            caps.poll_interval(Resource::DeviceInfo),
            move |()| async move { client.device_info().await },
        )
    };

    let profile = {
        let client = props.client.clone();
        use_polled(
            caps.includes(Resource::UserProfile),
            (),
            caps.poll_interval(Resource::UserProfile),
            move |()| async move { client.user_profile().await },
        )
    };

    let analytics = {
        let client = props.client.clone();
        use_polled(
            caps.includes(Resource::Analytics),
            selection.clone(),
            caps.poll_interval(Resource::Analytics),
            move |selection| async move {
                client
                    .analytics("energy", RelativeWindow::TwentyFourHours, &selection)
                    .await
            },
        )
    };

    let statistics = readings.data().and_then(|r| aggregate(r, &selection));

    let bill = {
        let client = props.client.clone();
        use_polled(
            caps.includes(Resource::Bill) && statistics.is_some(),
            statistics.map(|s| s.total_energy_kwh),
            caps.poll_interval(Resource::Bill),
            move |kwh| async move {
                match kwh {
                    Some(kwh) => client.calculate_bill(kwh).await,
                    None => Err(AppError::Data("No energy total to price".to_string())),
                }
            },
        )
    };

    // Single-feed resources
    let latest = {
        let client = props.client.clone();
        use_polled(
            caps.includes(Resource::LatestPower),
            (),
            caps.poll_interval(Resource::LatestPower),
            move |()| async move { client.latest_power().await },
        )
    };

    let stats = {
        let client = props.client.clone();
        use_polled(
            caps.includes(Resource::PowerStats),
            range,
            caps.poll_interval(Resource::PowerStats),
            move |range| async move {
                match range.window() {
                    Some(window) => client.power_stats(window).await,
                    None => Err(window_only("Statistics")),
                }
            },
        )
    };

    let energy = {
        let client = props.client.clone();
        use_polled(
            caps.includes(Resource::EnergyTotal),
            range,
            caps.poll_interval(Resource::EnergyTotal),
            move |range| async move {
                match range {
                    TimeRange::Relative(_) => client.energy_total(&range).await,
                    TimeRange::Custom(custom) => {
                        client.energy_between(custom.start(), custom.end()).await
                    }
                }
            },
        )
    };

    let series = {
        let client = props.client.clone();
        use_polled(
            caps.includes(Resource::PowerSeries),
            range,
            caps.poll_interval(Resource::PowerSeries),
            move |range| async move {
                match range.window() {
                    Some(window) => client.power_series(window).await,
                    None => Err(window_only("Power readings")),
                }
            },
        )
    };

    html! {
        <div class="dashboard">
            <section class="controls-section">
                if caps.phase_selection {
                    <PhaseSelector selection={selection.clone()} on_toggle={phases.toggle.clone()} />
                    if selection.is_empty() {
                        <p class="summary-note">{"Select at least one phase to see readings."}</p>
                    }
                }
                if caps.time_range_selection {
                    <TimeRangeSelector handle={time_range.clone()} />
                }
            </section>

            if caps.includes(Resource::DeviceInfo) || caps.includes(Resource::UserProfile) {
                <section class="device-section">
                    <Status ..StatusProps::of(Resource::DeviceInfo.label(), &device) />
                    <Status ..StatusProps::of(Resource::UserProfile.label(), &profile) />
                    <DeviceCard device={device.data().cloned()} profile={profile.data().cloned()} />
                </section>
            }

            if caps.includes(Resource::Readings) {
                <section class="data-section">
                    <h2>{"Live Readings"}</h2>
                    <Status ..StatusProps::of(Resource::Readings.label(), &readings) />
                    <Summary statistics={statistics} />
                    <PhaseCards readings={readings.data().cloned()} selection={selection.clone()} />
                </section>
            }

            if caps.includes(Resource::Bill) {
                <section class="bill-section">
                    <h2>{"Bill Estimate"}</h2>
                    <Status ..StatusProps::of(Resource::Bill.label(), &bill) />
                    if let (Some(calculation), Some(stats)) = (bill.data(), statistics) {
                        <Bill bill={calculation.clone()} total_kwh={stats.total_energy_kwh} />
                    }
                </section>
            }

            if caps.includes(Resource::HourlyUsage) {
                <section class="usage-section">
                    <h2>{"Today's Usage"}</h2>
                    <Status ..StatusProps::of(Resource::HourlyUsage.label(), &hourly) />
                    if let Some(usage) = hourly.data() {
                        <HourlyTable usage={usage.clone()} selection={selection.clone()} />
                    }
                </section>
            }

            if caps.includes(Resource::Analytics) {
                <section class="analytics-section">
                    <h2>{"Analytics"}</h2>
                    <Status ..StatusProps::of(Resource::Analytics.label(), &analytics) />
                    if let Some(data) = analytics.data() {
                        <AnalyticsTables analytics={data.clone()} />
                    }
                </section>
            }

            if caps.includes(Resource::LatestPower) {
                <section class="power-section">
                    <h2>{"Power Monitor"}</h2>
                    <Status ..StatusProps::of(Resource::LatestPower.label(), &latest) />
                    <Status ..StatusProps::of(Resource::PowerStats.label(), &stats) />
                    <Status ..StatusProps::of(Resource::EnergyTotal.label(), &energy) />
                    <Status ..StatusProps::of(Resource::PowerSeries.label(), &series) />
                    <PowerPanel
                        latest={latest.data().cloned()}
                        stats={stats.data().cloned()}
                        energy={energy.data().cloned()}
                        series={series.data().cloned()}
                        range={range}
                    />
                </section>
            }
        </div>
    }
}
