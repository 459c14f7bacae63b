/// Configuration constants for the application
pub struct Config;

impl Config {
    /// Enable automatic data refresh polling
    pub const ENABLE_AUTO_REFRESH: bool = true;

    /// Multi-phase readings polling interval in milliseconds (30 seconds)
    pub const READINGS_POLL_MS: u32 = 30_000;

    /// Live power polling interval in milliseconds (5 seconds)
    pub const LIVE_POLL_MS: u32 = 5_000;
}
