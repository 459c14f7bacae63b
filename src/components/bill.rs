use std::rc::Rc;
use yew::prelude::*;

use crate::models::dashboard::BillCalculation;

#[derive(Properties, PartialEq)]
pub struct BillProps {
    pub bill: Rc<BillCalculation>,
    /// Energy the bill was priced for.
    pub total_kwh: f64,
}

#[function_component(Bill)]
pub fn bill(props: &BillProps) -> Html {
    let bill = &props.bill;
    let avg_rate = bill
        .average_rate(props.total_kwh)
        .map_or_else(|| "N/A".to_string(), |r| format!("LKR {r:.2}/kWh"));

    html! {
        <div class="bill">
            <div class="bill-summary">
                <h3>{"Estimated Monthly Bill"}</h3>
                <p class="bill-total">{format!("LKR {:.2}", bill.total_amount)}</p>
                <div class="summary-grid">
                    <div class="summary-item">
                        <h3>{"Units Consumed"}</h3>
                        <p class="summary-value">{format!("{:.3} kWh", props.total_kwh)}</p>
                    </div>
                    <div class="summary-item">
                        <h3>{"Avg Rate"}</h3>
                        <p class="summary-value">{avg_rate}</p>
                    </div>
                </div>
            </div>

            <table class="bill-breakdown">
                <thead>
                    <tr><th>{"Slab"}</th><th>{"Units"}</th><th>{"Rate"}</th><th>{"Amount"}</th></tr>
                </thead>
                <tbody>
                    { for bill.breakdown.iter().map(|slab| html! {
                        <tr>
                            <td>{&slab.slab}</td>
                            <td>{slab.units.to_string()}</td>
                            <td>{format!("LKR {}", slab.rate)}</td>
                            <td>{format!("LKR {:.2}", slab.amount)}</td>
                        </tr>
                    }) }
                </tbody>
                <tfoot>
                    <tr>
                        <td colspan="3">{"Energy Charge Total"}</td>
                        <td>{format!("LKR {:.2}", bill.energy_charge_total())}</td>
                    </tr>
                    <tr>
                        <td colspan="3">{"Fixed Charge"}</td>
                        <td>{format!("LKR {:.2}", bill.fixed_charges.unwrap_or_default())}</td>
                    </tr>
                    <tr class="bill-grand-total">
                        <td colspan="3">{"Total Amount"}</td>
                        <td>{format!("LKR {:.2}", bill.total_amount)}</td>
                    </tr>
                </tfoot>
            </table>
        </div>
    }
}
