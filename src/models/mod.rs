pub mod dashboard;
pub mod error;
pub mod reading;
pub mod stats;
pub mod time_range;
