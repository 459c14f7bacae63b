pub mod bill;
pub mod dashboard;
pub mod device_card;
pub mod phase_cards;
pub mod phase_selector;
pub mod power_panel;
pub mod probe_console;
pub mod status;
pub mod summary;
pub mod time_range_selector;
pub mod usage_tables;

pub use dashboard::Dashboard;
pub use probe_console::ProbeConsole;
