pub mod aggregate;
pub mod api;
pub mod capability;
pub mod normalize;
pub mod poller;
