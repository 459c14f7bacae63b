pub mod use_phases;
pub mod use_polled;
pub mod use_time_range;
