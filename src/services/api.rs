use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use std::ops::Deref;
use std::rc::Rc;

use crate::models::{
    dashboard::{AnalyticsData, BillCalculation, DeviceInfo, HourlyUsage, ProbeResponse, UserProfile},
    error::AppError,
    reading::{PhaseSelection, PowerReading, ReadingData},
    stats::{EnergyTotal, PowerStats},
    time_range::{CustomRange, RelativeWindow, TimeRange},
};
use crate::services::normalize;

// CONSTANTS
const BASE_URL: &str = "https://energo.azurewebsites.net";
const DEFAULT_DEVICE_ID: &str = "ESP32-A1B2C3";

// API CONFIGURATION
/// Configuration for the Energo API client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    base_url: String,
    device_id: String,
}

impl ApiConfig {
    /// Creates a builder for constructing an `ApiConfig`.
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the monitoring device this client reads from.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Full endpoint URL with `params` form-encoded into the query string.
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<reqwest::Url, AppError> {
        let mut url = reqwest::Url::parse(&self.url(path))
            .map_err(|e| AppError::Config(format!("Invalid API URL '{}': {e}", self.base_url)))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfigBuilder::default().build()
    }
}

// API CONFIGURATION BUILDER
/// Builder for constructing an `ApiConfig` with custom settings.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
    device_id: Option<String>,
}

impl ApiConfigBuilder {
    /// Sets a custom base URL (primarily for testing).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the device identifier sent with dashboard requests.
    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Builds the `ApiConfig`.
    pub fn build(self) -> ApiConfig {
        let base_url = self.base_url.unwrap_or_else(|| BASE_URL.to_string());
        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            device_id: self
                .device_id
                .unwrap_or_else(|| DEFAULT_DEVICE_ID.to_string()),
        }
    }
}

// REQUEST TYPES
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct BillRequest<'a> {
    total_energy: f64,
    device_id: &'a str,
}

fn iso_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ENERGO CLIENT
/// HTTP client for the Energo monitoring API.
///
/// Each method performs exactly one request. Failures are returned to the
/// caller; the next poll tick is the only retry.
pub struct EnergoClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl EnergoClient {
    /// Creates a new client with default configuration.
    pub fn new() -> Result<Self, AppError> {
        Self::with_config(ApiConfig::default())
    }

    /// Creates a new client with the specified configuration.
    pub fn with_config(config: ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Returns a reference to the client's configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // POWER ENDPOINTS
    /// Fetches the most recent single-feed reading.
    pub async fn latest_power(&self) -> Result<PowerReading, AppError> {
        let request = self.http.get(self.config.endpoint("/api/power/latest", &[])?);
        normalize::latest_reading(self.execute(request, "latest reading").await?)
    }

    /// Fetches voltage and current statistics over `window`.
    pub async fn power_stats(&self, window: RelativeWindow) -> Result<PowerStats, AppError> {
        let url = self
            .config
            .endpoint("/api/power/stats", &[("timeRange", window.code())])?;
        let request = self.http.get(url);
        normalize::power_stats(self.execute(request, "power statistics").await?)
    }

    /// Fetches all samples recorded over `window`.
    pub async fn power_series(&self, window: RelativeWindow) -> Result<Vec<PowerReading>, AppError> {
        let url = self
            .config
            .endpoint("/api/power", &[("timeRange", window.code())])?;
        let request = self.http.get(url);
        normalize::power_series(self.execute(request, "power readings").await?)
    }

    /// Fetches total energy for a named window or an explicit range.
    pub async fn energy_total(&self, range: &TimeRange) -> Result<EnergyTotal, AppError> {
        let url = match range {
            TimeRange::Relative(window) => self
                .config
                .endpoint("/api/power/energy", &[("timeRange", window.code())])?,
            TimeRange::Custom(range) => {
                let from = iso_instant(range.start());
                let to = iso_instant(range.end());
                self.config.endpoint(
                    "/api/power/energy/range",
                    &[("from", from.as_str()), ("to", to.as_str())],
                )?
            }
        };
        normalize::energy_total(self.execute(self.http.get(url), "energy total").await?)
    }

    /// Fetches total energy between two instants. The range is validated
    /// before any request is made.
    pub async fn energy_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<EnergyTotal, AppError> {
        let range = TimeRange::Custom(CustomRange::new(start, end)?);
        self.energy_total(&range).await
    }

    // DASHBOARD ENDPOINTS
    /// Fetches the current multi-phase reading for the selected phases.
    pub async fn readings(&self, phases: &PhaseSelection) -> Result<ReadingData, AppError> {
        let phases = phases.query_value();
        let url = self.config.endpoint(
            "/api/dashboard/readings",
            &[
                ("phases", phases.as_str()),
                ("deviceId", self.config.device_id()),
            ],
        )?;
        let request = self.http.get(url);
        normalize::readings(self.execute(request, "readings").await?)
    }

    /// Fetches per-hour usage for `date`.
    pub async fn hourly_usage(
        &self,
        date: NaiveDate,
        phases: &PhaseSelection,
    ) -> Result<Vec<HourlyUsage>, AppError> {
        let date = date.format("%Y-%m-%d").to_string();
        let phases = phases.query_value();
        let url = self.config.endpoint(
            "/api/dashboard/hourly-usage",
            &[
                ("date", date.as_str()),
                ("phases", phases.as_str()),
                ("deviceId", self.config.device_id()),
            ],
        )?;
        let request = self.http.get(url);
        normalize::hourly_usage(self.execute(request, "hourly usage").await?)
    }

    pub async fn device_info(&self) -> Result<DeviceInfo, AppError> {
        let url = self.config.endpoint(
            "/api/dashboard/device-info",
            &[("deviceId", self.config.device_id())],
        )?;
        let request = self.http.get(url);
        normalize::device_info(self.execute(request, "device info").await?)
    }

    pub async fn user_profile(&self) -> Result<UserProfile, AppError> {
        let request = self
            .http
            .get(self.config.endpoint("/api/dashboard/user-profile", &[])?);
        normalize::user_profile(self.execute(request, "user profile").await?)
    }

    /// Asks the server to price `total_kwh` against its tariff slabs.
    pub async fn calculate_bill(&self, total_kwh: f64) -> Result<BillCalculation, AppError> {
        let body = BillRequest {
            total_energy: total_kwh,
            device_id: self.config.device_id(),
        };
        let request = self
            .http
            .post(self.config.endpoint("/api/dashboard/calculate-bill", &[])?)
            .json(&body);
        normalize::bill_calculation(self.execute(request, "bill calculation").await?)
    }

    /// Fetches trend and daily consumption analytics of kind `kind` (e.g. `energy`).
    pub async fn analytics(
        &self,
        kind: &str,
        period: RelativeWindow,
        phases: &PhaseSelection,
    ) -> Result<AnalyticsData, AppError> {
        let phases = phases.query_value();
        let url = self.config.endpoint(
            "/api/dashboard/analytics",
            &[
                ("type", kind),
                ("period", period.code()),
                ("phases", phases.as_str()),
                ("deviceId", self.config.device_id()),
            ],
        )?;
        let request = self.http.get(url);
        normalize::analytics(self.execute(request, "analytics").await?)
    }

    // INSPECTION
    /// Issues a raw GET and returns whatever came back, whatever the status.
    ///
    /// `query` is appended verbatim, e.g. `timeRange=1h`.
    pub async fn probe(&self, path: &str, query: &str) -> Result<ProbeResponse, AppError> {
        let mut url = self.config.url(path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(query.trim_start_matches('?'));
        }

        log::debug!("GET {url}");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| self.classify_error(e))?;

        Ok(ProbeResponse {
            url,
            status,
            body: serde_json::from_str(&text).unwrap_or(Value::String(text)),
            received_at: Utc::now(),
        })
    }

    /// Sends a request and returns the JSON body, failing on transport errors,
    /// non-2xx status, or an explicit `"success": false`.
    async fn execute(&self, request: reqwest::RequestBuilder, what: &str) -> Result<Value, AppError> {
        log::debug!("Fetching {what}");

        let response = request.send().await.map_err(|e| self.classify_error(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify_error(e))?;
        let body = serde_json::from_str::<Value>(&text).ok();

        if !status.is_success() {
            let error = self.error_for_status(status, body.as_ref(), what);
            log::warn!("{what}: {error}");
            return Err(error);
        }

        let body = body.ok_or_else(|| AppError::Data(format!("Response for {what} is not JSON")))?;

        if normalize::is_explicit_failure(&body) {
            let message = normalize::server_message(&body)
                .unwrap_or_else(|| format!("Failed to fetch {what}"));
            log::warn!("{what}: server reported failure: {message}");
            return Err(AppError::Api {
                status: Some(status.as_u16()),
                message,
            });
        }

        Ok(body)
    }

    /// Converts a reqwest error into an appropriate AppError.
    fn classify_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::Network(format!("Request timeout: {error}"))
        } else if error.is_decode() {
            AppError::Data(format!("Failed to read response: {error}"))
        } else if error.is_request() {
            AppError::Network(format!("Request error: {error}"))
        } else {
            AppError::Network(format!("Network error: {error}"))
        }
    }

    /// Creates an error based on HTTP status code, preferring the server's message.
    fn error_for_status(&self, status: reqwest::StatusCode, body: Option<&Value>, what: &str) -> AppError {
        let message = body.and_then(normalize::server_message).unwrap_or_else(|| {
            match status.as_u16() {
                404 => format!("Resource not found: {what}"),
                400..=499 => format!("Client error {status} fetching {what}"),
                500..=599 => format!("Server error {status} fetching {what}"),
                _ => format!("Unexpected status {status} fetching {what}"),
            }
        });

        AppError::Api {
            status: Some(status.as_u16()),
            message,
        }
    }
}

/// Cheaply clonable handle to one client, shared by every component on a page.
///
/// Two handles are equal only if they point at the same client.
#[derive(Clone)]
pub struct SharedClient(Rc<EnergoClient>);

impl SharedClient {
    pub fn new(client: EnergoClient) -> Self {
        Self(Rc::new(client))
    }
}

impl PartialEq for SharedClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedClient {
    type Target = EnergoClient;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reading::Phase;
    use chrono::TimeZone;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    fn client_for(server: &ServerGuard) -> EnergoClient {
        let config = ApiConfig::builder()
            .base_url(server.url())
            .device_id("DEV-1")
            .build();
        EnergoClient::with_config(config).unwrap()
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = ApiConfig::builder().build();
        assert_eq!(config.base_url(), "https://energo.azurewebsites.net");
        assert_eq!(config.device_id(), "ESP32-A1B2C3");
    }

    #[test]
    fn test_config_builder_trims_trailing_slash() {
        let config = ApiConfig::builder().base_url("http://localhost:8080/").build();
        assert_eq!(config.url("/api/power"), "http://localhost:8080/api/power");
    }

    #[tokio::test]
    async fn test_latest_power() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/power/latest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"time": "2025-12-10T08:30:00Z", "voltage": 231.4, "charge": 4.2, "power": 971.9})
                    .to_string(),
            )
            .create_async()
            .await;

        let reading = client_for(&server).latest_power().await.unwrap();

        assert_eq!(
            reading,
            PowerReading {
                time: Utc.with_ymd_and_hms(2025, 12, 10, 8, 30, 0).unwrap(),
                voltage: 231.4,
                current: 4.2,
                power: Some(971.9),
                energy_wh: None,
            }
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_power_stats_sends_time_range() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/power/stats")
            .match_query(Matcher::UrlEncoded("timeRange".into(), "6h".into()))
            .with_status(200)
            .with_body(
                json!({
                    "voltage": {"min": 225.5, "max": 236.25, "avg": 230.75},
                    "charge": {"min": 0.5, "max": 8.25, "avg": 3.5}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let stats = client_for(&server)
            .power_stats(RelativeWindow::SixHours)
            .await
            .unwrap();

        assert_eq!(stats.voltage.unwrap().avg, 230.75);
        assert_eq!(stats.current.unwrap().max, 8.25);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_energy_total_relative_window() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/power/energy")
            .match_query(Matcher::UrlEncoded("timeRange".into(), "24h".into()))
            .with_status(200)
            .with_body(json!({"totalEnergyKWh": 18.5}).to_string())
            .create_async()
            .await;

        let total = client_for(&server)
            .energy_total(&TimeRange::default())
            .await
            .unwrap();

        assert_eq!(total, EnergyTotal { total_kwh: 18.5 });
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_energy_total_custom_range() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/power/energy/range")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("from".into(), "2025-12-10T00:00:00Z".into()),
                Matcher::UrlEncoded("to".into(), "2025-12-10T23:59:59Z".into()),
            ]))
            .with_status(200)
            .with_body(json!({"totalEnergyKWh": 7.125}).to_string())
            .create_async()
            .await;

        let total = client_for(&server)
            .energy_between(
                Utc.with_ymd_and_hms(2025, 12, 10, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2025, 12, 10, 23, 59, 59).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(total.total_kwh, 7.125);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_inverted_range_rejected_before_fetch() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/power/energy/range")
            .expect(0)
            .create_async()
            .await;

        let result = client_for(&server)
            .energy_between(
                Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_power_series() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/power")
            .match_query(Matcher::UrlEncoded("timeRange".into(), "1h".into()))
            .with_status(200)
            .with_body(
                json!({"data": [
                    {"time": "2025-12-10T08:00:00Z", "voltage": 230.0, "current": 1.5, "power": 345.0, "energy_wh": 12.0},
                    {"time": "2025-12-10T08:00:05Z", "voltage": 230.5, "current": 1.25}
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let series = client_for(&server)
            .power_series(RelativeWindow::OneHour)
            .await
            .unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].energy_wh, Some(12.0));
        assert_eq!(series[1].power, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_readings_sends_phases_and_device() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/dashboard/readings")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("phases".into(), "[1,2]".into()),
                Matcher::UrlEncoded("deviceId".into(), "DEV-1".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({"success": true, "data": {
                    "phases": {
                        "1": {"voltage": 230.1, "current": 2.0, "power": 460.2, "energy_wh": 1500},
                        "2": {"voltage": 229.8, "current": 3.0, "power": 689.4, "energy_wh": 2500}
                    },
                    "total": {"energy_wh": 4000, "voltage": 229.95, "current": 5.0, "power": 1149.6},
                    "timestamp": "2025-12-10T08:30:00Z"
                }})
                .to_string(),
            )
            .create_async()
            .await;

        let selection = PhaseSelection::from_phases([Phase::L1, Phase::L2]);
        let data = client_for(&server).readings(&selection).await.unwrap();

        assert_eq!(data.phases.len(), 2);
        assert_eq!(data.phase(Phase::L2).unwrap().voltage, Some(229.8));
        assert_eq!(data.total.unwrap().energy_wh, Some(4000.0));
        assert_eq!(
            data.timestamp,
            Some(Utc.with_ymd_and_hms(2025, 12, 10, 8, 30, 0).unwrap())
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_hourly_usage() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/dashboard/hourly-usage")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("date".into(), "2025-12-10".into()),
                Matcher::UrlEncoded("phases".into(), "[1,2,3]".into()),
                Matcher::UrlEncoded("deviceId".into(), "DEV-1".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({"success": true, "data": [
                    {"hour": "00:00", "phase1": 120.0, "phase2": 80.5, "phase3": 40.0},
                    {"hour": "01:00", "phase1": 110.0, "phase3": 35.0}
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let usage = client_for(&server)
            .hourly_usage(
                NaiveDate::from_ymd_opt(2025, 12, 10).unwrap(),
                &PhaseSelection::all(),
            )
            .await
            .unwrap();

        assert_eq!(
            usage[1],
            HourlyUsage {
                hour: "01:00".to_string(),
                phase1: Some(110.0),
                phase2: None,
                phase3: Some(35.0),
            }
        );
        assert_eq!(usage[0].total_for(&PhaseSelection::all()), 240.5);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_device_info_and_profile() {
        let mut server = Server::new_async().await;
        let device = server
            .mock("GET", "/api/dashboard/device-info")
            .match_query(Matcher::UrlEncoded("deviceId".into(), "DEV-1".into()))
            .with_status(200)
            .with_body(
                json!({"success": true, "data": {
                    "name": "Main Board", "location": "Colombo", "deviceId": "DEV-1", "status": "online"
                }})
                .to_string(),
            )
            .create_async()
            .await;
        let profile = server
            .mock("GET", "/api/dashboard/user-profile")
            .with_status(200)
            .with_body(
                json!({"success": true, "data": {"name": "Nimal", "email": "nimal@example.com"}})
                    .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let info = client.device_info().await.unwrap();
        let user = client.user_profile().await.unwrap();

        assert_eq!(
            info,
            DeviceInfo {
                name: "Main Board".to_string(),
                location: "Colombo".to_string(),
                device_id: "DEV-1".to_string(),
                status: "online".to_string(),
            }
        );
        assert!(info.is_online());
        assert_eq!(user.role, None);
        assert_eq!(user.email, "nimal@example.com");
        device.assert_async().await;
        profile.assert_async().await;
    }

    #[tokio::test]
    async fn test_calculate_bill_posts_energy() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/dashboard/calculate-bill")
            .match_body(Matcher::Json(json!({"totalEnergy": 4.0, "deviceId": "DEV-1"})))
            .with_status(200)
            .with_body(
                json!({"success": true, "data": {
                    "totalAmount": 1210.0,
                    "breakdown": [
                        {"slab": "0-30", "units": 30, "rate": 8.0, "amount": 240.0},
                        {"slab": "31-60", "units": 30, "rate": 20.0, "amount": 600.0}
                    ],
                    "fixedCharges": 370.0
                }})
                .to_string(),
            )
            .create_async()
            .await;

        let bill = client_for(&server).calculate_bill(4.0).await.unwrap();

        assert_eq!(bill.total_amount, 1210.0);
        assert_eq!(bill.breakdown.len(), 2);
        assert_eq!(bill.breakdown[0].slab, "0-30");
        assert_eq!(bill.breakdown[1].units, 30.0);
        assert_eq!(bill.fixed_charges, Some(370.0));
        assert_eq!(bill.energy_charge_total(), 840.0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_analytics() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/dashboard/analytics")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("type".into(), "energy".into()),
                Matcher::UrlEncoded("period".into(), "24h".into()),
                Matcher::UrlEncoded("phases".into(), "[3]".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({"success": true, "data": {
                    "energyTrend": [{"time": "08:00", "energy": 1.25, "voltage": 230.0, "charge": 2.5}],
                    "dailyConsumption": [{"day": "Mon", "consumption": 10.5}, {"day": "Tue", "consumption": 9.0}]
                }})
                .to_string(),
            )
            .create_async()
            .await;

        let analytics = client_for(&server)
            .analytics(
                "energy",
                RelativeWindow::TwentyFourHours,
                &PhaseSelection::from_phases([Phase::L3]),
            )
            .await
            .unwrap();

        assert_eq!(analytics.energy_trend[0].current, Some(2.5));
        assert_eq!(analytics.daily_consumption.len(), 2);
        assert_eq!(analytics.total_consumption(), 19.5);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_success_false_is_failure_despite_200() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/dashboard/user-profile")
            .with_status(200)
            .with_body(json!({"success": false, "error": {"message": "Session expired"}}).to_string())
            .create_async()
            .await;

        let err = client_for(&server).user_profile().await.unwrap_err();

        assert_eq!(
            err,
            AppError::Api {
                status: Some(200),
                message: "Session expired".to_string()
            }
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_without_json_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/power/latest")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let err = client_for(&server).latest_power().await.unwrap_err();

        assert_eq!(err.status(), Some(502));
        assert!(err.to_string().contains("Server error"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_device_failure_does_not_block_other_resources() {
        let mut server = Server::new_async().await;
        let _device = server
            .mock("GET", "/api/dashboard/device-info")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(json!({"success": false, "error": {"message": "Device registry down"}}).to_string())
            .create_async()
            .await;
        let _readings = server
            .mock("GET", "/api/dashboard/readings")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({"success": true, "data": {"phases": {"1": {"voltage": 230.0}}}}).to_string())
            .create_async()
            .await;
        let _analytics = server
            .mock("GET", "/api/dashboard/analytics")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({"success": true, "data": {"energyTrend": [], "dailyConsumption": []}}).to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let selection = PhaseSelection::all();
        let (device, readings, analytics) = tokio::join!(
            client.device_info(),
            client.readings(&selection),
            client.analytics("energy", RelativeWindow::TwentyFourHours, &selection),
        );

        let device_err = device.unwrap_err();
        assert_eq!(device_err.status(), Some(500));
        assert_eq!(device_err.to_string(), "API error: Device registry down");
        assert_eq!(readings.unwrap().phases.len(), 1);
        assert_eq!(analytics.unwrap(), AnalyticsData::default());
    }

    #[tokio::test]
    async fn test_probe_returns_raw_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/power/energy")
            .match_query(Matcher::UrlEncoded("timeRange".into(), "1h".into()))
            .with_status(404)
            .with_body(json!({"message": "No data"}).to_string())
            .create_async()
            .await;

        let probe = client_for(&server)
            .probe("/api/power/energy", "timeRange=1h")
            .await
            .unwrap();

        assert_eq!(probe.status, 404);
        assert!(probe.url.ends_with("/api/power/energy?timeRange=1h"));
        assert_eq!(probe.body, json!({"message": "No data"}));
        mock.assert_async().await;
    }
}
