use crate::config::Config;

/// Every resource a dashboard screen can fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Readings,
    HourlyUsage,
    DeviceInfo,
    UserProfile,
    Analytics,
    Bill,
    LatestPower,
    PowerStats,
    EnergyTotal,
    PowerSeries,
}

impl Resource {
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Readings => "readings",
            Resource::HourlyUsage => "hourly usage",
            Resource::DeviceInfo => "device info",
            Resource::UserProfile => "user profile",
            Resource::Analytics => "analytics",
            Resource::Bill => "bill",
            Resource::LatestPower => "latest reading",
            Resource::PowerStats => "statistics",
            Resource::EnergyTotal => "energy total",
            Resource::PowerSeries => "power readings",
        }
    }
}

/// Describes one dashboard variant: which resources it shows and which of
/// them are re-fetched on a timer.
#[derive(Debug, Clone, PartialEq)]
pub struct Capabilities {
    pub name: &'static str,
    resources: &'static [Resource],
    polled: &'static [Resource],
    poll_interval_ms: u32,
    pub phase_selection: bool,
    pub time_range_selection: bool,
}

impl Capabilities {
    /// Multi-phase dashboard: readings refresh every 30 seconds, the rest
    /// reload only when the phase selection changes.
    pub fn phase_dashboard() -> Self {
        Self {
            name: "Dashboard",
            resources: &[
                Resource::Readings,
                Resource::HourlyUsage,
                Resource::DeviceInfo,
                Resource::UserProfile,
                Resource::Analytics,
                Resource::Bill,
            ],
            polled: &[Resource::Readings],
            poll_interval_ms: Config::READINGS_POLL_MS,
            phase_selection: true,
            time_range_selection: false,
        }
    }

    /// Single-feed power monitor: the latest reading refreshes every 5 seconds.
    pub fn power_monitor() -> Self {
        Self {
            name: "Power Monitor",
            resources: &[
                Resource::LatestPower,
                Resource::PowerStats,
                Resource::EnergyTotal,
                Resource::PowerSeries,
            ],
            polled: &[Resource::LatestPower],
            poll_interval_ms: Config::LIVE_POLL_MS,
            phase_selection: false,
            time_range_selection: true,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![Self::phase_dashboard(), Self::power_monitor()]
    }

    pub fn includes(&self, resource: Resource) -> bool {
        self.resources.contains(&resource)
    }

    /// Poll interval for `resource`, or `None` if it is fetched on demand only.
    pub fn poll_interval(&self, resource: Resource) -> Option<u32> {
        (Config::ENABLE_AUTO_REFRESH && self.polled.contains(&resource))
            .then_some(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_dashboard_polls_readings_only() {
        let caps = Capabilities::phase_dashboard();
        assert_eq!(caps.poll_interval(Resource::Readings), Some(30_000));
        assert_eq!(caps.poll_interval(Resource::DeviceInfo), None);
        assert!(!caps.includes(Resource::LatestPower));
    }

    #[test]
    fn test_power_monitor_polls_every_five_seconds() {
        let caps = Capabilities::power_monitor();
        assert_eq!(caps.poll_interval(Resource::LatestPower), Some(5_000));
        assert!(caps.includes(Resource::EnergyTotal));
        assert!(!caps.includes(Resource::Readings));
        assert!(caps.time_range_selection);
    }

    #[test]
    fn test_resource_labels_are_distinct() {
        let caps = Capabilities::all();
        let labels: Vec<&str> = caps
            .iter()
            .flat_map(|c| c.resources.iter().map(Resource::label))
            .collect();
        let unique: std::collections::HashSet<&str> = labels.iter().copied().collect();
        assert_eq!(labels.len(), unique.len());
        assert_eq!(Resource::Readings.label(), "readings");
    }
}
