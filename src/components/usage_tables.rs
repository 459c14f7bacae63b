use std::rc::Rc;
use yew::prelude::*;

use crate::models::dashboard::{AnalyticsData, HourlyUsage};
use crate::models::reading::PhaseSelection;

#[derive(Properties, PartialEq)]
pub struct HourlyTableProps {
    pub usage: Rc<Vec<HourlyUsage>>,
    pub selection: PhaseSelection,
}

/// Today's usage per hour, one column per selected phase.
#[function_component(HourlyTable)]
pub fn hourly_table(props: &HourlyTableProps) -> Html {
    if props.usage.is_empty() {
        return html! { <p class="empty">{"No hourly data for today yet."}</p> };
    }

    html! {
        <table class="hourly-usage">
            <thead>
                <tr>
                    <th>{"Hour"}</th>
                    { for props.selection.iter().map(|p| html! { <th>{p.label()}</th> }) }
                    <th>{"Total (Wh)"}</th>
                </tr>
            </thead>
            <tbody>
                { for props.usage.iter().map(|row| html! {
                    <tr>
                        <td>{&row.hour}</td>
                        { for props.selection.iter().map(|p| html! {
                            <td>{row.value(p).map_or_else(|| "—".to_string(), |v| format!("{v:.1}"))}</td>
                        }) }
                        <td>{format!("{:.1}", row.total_for(&props.selection))}</td>
                    </tr>
                }) }
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq)]
pub struct AnalyticsTablesProps {
    pub analytics: Rc<AnalyticsData>,
}

#[function_component(AnalyticsTables)]
pub fn analytics_tables(props: &AnalyticsTablesProps) -> Html {
    let analytics = &props.analytics;

    html! {
        <div class="analytics">
            <table class="energy-trend">
                <thead>
                    <tr><th>{"Time"}</th><th>{"Energy"}</th><th>{"Voltage"}</th><th>{"Current"}</th></tr>
                </thead>
                <tbody>
                    { for analytics.energy_trend.iter().map(|point| html! {
                        <tr>
                            <td>{&point.time}</td>
                            <td>{format!("{:.3} kWh", point.energy)}</td>
                            <td>{format!("{:.2} V", point.voltage)}</td>
                            <td>{point.current.map_or_else(|| "—".to_string(), |c| format!("{c:.2} A"))}</td>
                        </tr>
                    }) }
                </tbody>
            </table>

            <table class="daily-consumption">
                <thead>
                    <tr><th>{"Day"}</th><th>{"Consumption"}</th></tr>
                </thead>
                <tbody>
                    { for analytics.daily_consumption.iter().map(|day| html! {
                        <tr>
                            <td>{&day.day}</td>
                            <td>{format!("{:.2} kWh", day.consumption)}</td>
                        </tr>
                    }) }
                </tbody>
                <tfoot>
                    <tr>
                        <td>{"Total"}</td>
                        <td>{format!("{:.2} kWh", analytics.total_consumption())}</td>
                    </tr>
                </tfoot>
            </table>
        </div>
    }
}
