use std::rc::Rc;
use yew::prelude::*;

use crate::models::dashboard::{DeviceInfo, UserProfile};

#[derive(Properties, PartialEq)]
pub struct DeviceCardProps {
    pub device: Option<Rc<DeviceInfo>>,
    pub profile: Option<Rc<UserProfile>>,
}

#[function_component(DeviceCard)]
pub fn device_card(props: &DeviceCardProps) -> Html {
    html! {
        <div class="device-card">
            if let Some(device) = &props.device {
                <div class="device-info">
                    <h3>{&device.name}</h3>
                    <p>{&device.location}</p>
                    <p class="device-id">{&device.device_id}</p>
                    <span class={if device.is_online() { "device-status online" } else { "device-status offline" }}>
                        {&device.status}
                    </span>
                </div>
            }
            if let Some(profile) = &props.profile {
                <div class="user-profile">
                    <p class="user-name">{&profile.name}</p>
                    <p class="user-email">{&profile.email}</p>
                    if let Some(role) = &profile.role {
                        <p class="user-role">{role}</p>
                    }
                </div>
            }
        </div>
    }
}
