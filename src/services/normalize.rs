//! Per-endpoint mapping from raw JSON bodies to typed read models.
//!
//! Every wire struct spells out the fields it expects; anything the server
//! may omit is an `Option`. The canonical name for amperage is `current`,
//! and `charge` is accepted wherever older endpoints still send it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::{
    dashboard::{
        AnalyticsData, BillCalculation, BillSlab, DailyConsumption, DeviceInfo, HourlyUsage,
        TrendPoint, UserProfile,
    },
    error::AppError,
    reading::{Phase, PhaseReading, PowerReading, ReadingData},
    stats::{EnergyTotal, PowerStats, Spread},
    time_range::parse_flexible_datetime,
};
use crate::utils::rounding::{round_electrical, round_energy};

// ENVELOPE
#[derive(Deserialize, Debug)]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
}

/// Pulls the best human-readable failure message out of an error body.
///
/// Understands `{"error": {"message": ..}}`, `{"error": ".."}` and
/// `{"message": ..}`.
pub fn server_message(body: &Value) -> Option<String> {
    let from_error = match body.get("error") {
        Some(Value::String(message)) => Some(message.clone()),
        Some(Value::Object(error)) => error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    };

    from_error.or_else(|| {
        body.get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
    })
}

/// `true` only when the body carries `"success": false`. Bodies without the
/// flag are not wrapped and count as successful.
pub fn is_explicit_failure(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool) == Some(false)
}

/// Unwraps a `/api/dashboard/*` envelope, failing on `success: false`.
pub fn envelope_data(body: Value, what: &str) -> Result<Value, AppError> {
    let message = server_message(&body);
    let envelope: Envelope = decode(body, what)?;

    if !envelope.success {
        return Err(AppError::Api {
            status: None,
            message: message.unwrap_or_else(|| format!("Failed to fetch {what}")),
        });
    }

    envelope
        .data
        .ok_or_else(|| AppError::Data(format!("Response for {what} has no data")))
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Data(format!("Failed to parse {what}: {e}")))
}

// POWER ENDPOINTS
#[derive(Deserialize, Debug)]
struct RawPowerReading {
    #[serde(alias = "timestamp")]
    time: String,
    voltage: f64,
    #[serde(default)]
    current: Option<f64>,
    #[serde(default)]
    charge: Option<f64>,
    #[serde(default)]
    power: Option<f64>,
    #[serde(default, alias = "energyWh")]
    energy_wh: Option<f64>,
}

impl TryFrom<RawPowerReading> for PowerReading {
    type Error = AppError;

    fn try_from(raw: RawPowerReading) -> Result<Self, Self::Error> {
        let time = parse_flexible_datetime(&raw.time)
            .ok_or_else(|| AppError::Data(format!("Invalid reading time '{}'", raw.time)))?;
        let current = raw
            .current
            .or(raw.charge)
            .ok_or_else(|| AppError::Data("Reading has neither current nor charge".to_string()))?;

        Ok(Self {
            time,
            voltage: raw.voltage,
            current,
            power: raw.power,
            energy_wh: raw.energy_wh,
        })
    }
}

/// `GET /api/power/latest`
pub fn latest_reading(body: Value) -> Result<PowerReading, AppError> {
    decode::<RawPowerReading>(body, "latest reading")?.try_into()
}

#[derive(Deserialize, Debug)]
struct RawSeries {
    #[serde(default, deserialize_with = "null_as_default")]
    data: Vec<RawPowerReading>,
}

/// `GET /api/power?timeRange=`. Samples are returned oldest first.
pub fn power_series(body: Value) -> Result<Vec<PowerReading>, AppError> {
    let series: RawSeries = decode(body, "power readings")?;
    let mut readings = series
        .data
        .into_iter()
        .map(PowerReading::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    readings.sort_by_key(|r| r.time);
    Ok(readings)
}

#[derive(Deserialize, Debug, Default)]
struct RawSpread {
    min: Option<f64>,
    max: Option<f64>,
    avg: Option<f64>,
}

impl RawSpread {
    fn into_spread(self) -> Option<Spread> {
        Some(Spread {
            min: round_electrical(self.min?),
            max: round_electrical(self.max?),
            avg: round_electrical(self.avg?),
        })
    }
}

#[derive(Deserialize, Debug)]
struct RawPowerStats {
    #[serde(default)]
    voltage: Option<RawSpread>,
    #[serde(default)]
    current: Option<RawSpread>,
    #[serde(default)]
    charge: Option<RawSpread>,
}

/// `GET /api/power/stats?timeRange=`
pub fn power_stats(body: Value) -> Result<PowerStats, AppError> {
    let raw: RawPowerStats = decode(body, "power statistics")?;
    Ok(PowerStats {
        voltage: raw.voltage.and_then(RawSpread::into_spread),
        current: raw.current.or(raw.charge).and_then(RawSpread::into_spread),
    })
}

#[derive(Deserialize, Debug)]
struct RawEnergyTotal {
    #[serde(rename = "totalEnergyKWh")]
    total_energy_kwh: f64,
}

/// `GET /api/power/energy` and `GET /api/power/energy/range`
pub fn energy_total(body: Value) -> Result<EnergyTotal, AppError> {
    let raw: RawEnergyTotal = decode(body, "energy total")?;
    Ok(EnergyTotal {
        total_kwh: round_energy(raw.total_energy_kwh),
    })
}

// DASHBOARD ENDPOINTS
#[derive(Deserialize, Debug, Default, Clone, Copy)]
struct RawPhase {
    #[serde(default)]
    voltage: Option<f64>,
    #[serde(default)]
    current: Option<f64>,
    #[serde(default)]
    charge: Option<f64>,
    #[serde(default)]
    power: Option<f64>,
    #[serde(default, alias = "energyWh")]
    energy_wh: Option<f64>,
}

impl From<RawPhase> for PhaseReading {
    fn from(raw: RawPhase) -> Self {
        Self {
            voltage: raw.voltage,
            current: raw.current.or(raw.charge),
            power: raw.power,
            energy_wh: raw.energy_wh,
        }
    }
}

#[derive(Deserialize, Debug)]
struct RawReadingData {
    #[serde(default, deserialize_with = "null_as_default")]
    phases: BTreeMap<String, Option<RawPhase>>,
    #[serde(default)]
    total: Option<RawPhase>,
    #[serde(default)]
    timestamp: Option<String>,
}

/// `GET /api/dashboard/readings`. Values stay unrounded because the
/// aggregator works from them.
pub fn readings(body: Value) -> Result<ReadingData, AppError> {
    let raw: RawReadingData = decode(envelope_data(body, "readings")?, "readings")?;

    let phases = raw
        .phases
        .into_iter()
        .filter_map(|(key, phase)| match key.parse::<Phase>() {
            Ok(id) => phase.map(|p| (id, PhaseReading::from(p))),
            Err(_) => {
                log::warn!("Ignoring reading for unknown phase '{key}'");
                None
            }
        })
        .collect();

    let timestamp = raw.timestamp.as_deref().and_then(|ts| {
        let parsed = parse_flexible_datetime(ts);
        if parsed.is_none() {
            log::warn!("Unparseable reading timestamp '{ts}'");
        }
        parsed
    });

    Ok(ReadingData {
        timestamp,
        phases,
        total: raw.total.map(PhaseReading::from),
    })
}

#[derive(Deserialize, Debug)]
struct RawHourlyUsage {
    hour: String,
    #[serde(default)]
    phase1: Option<f64>,
    #[serde(default)]
    phase2: Option<f64>,
    #[serde(default)]
    phase3: Option<f64>,
}

/// `GET /api/dashboard/hourly-usage`
pub fn hourly_usage(body: Value) -> Result<Vec<HourlyUsage>, AppError> {
    let raw: Vec<RawHourlyUsage> = decode(envelope_data(body, "hourly usage")?, "hourly usage")?;
    Ok(raw
        .into_iter()
        .map(|h| HourlyUsage {
            hour: h.hour,
            phase1: h.phase1,
            phase2: h.phase2,
            phase3: h.phase3,
        })
        .collect())
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawDeviceInfo {
    name: String,
    location: String,
    device_id: String,
    status: String,
}

/// `GET /api/dashboard/device-info`
pub fn device_info(body: Value) -> Result<DeviceInfo, AppError> {
    let raw: RawDeviceInfo = decode(envelope_data(body, "device info")?, "device info")?;
    Ok(DeviceInfo {
        name: raw.name,
        location: raw.location,
        device_id: raw.device_id,
        status: raw.status,
    })
}

#[derive(Deserialize, Debug)]
struct RawUserProfile {
    name: String,
    email: String,
    #[serde(default)]
    role: Option<String>,
}

/// `GET /api/dashboard/user-profile`
pub fn user_profile(body: Value) -> Result<UserProfile, AppError> {
    let raw: RawUserProfile = decode(envelope_data(body, "user profile")?, "user profile")?;
    Ok(UserProfile {
        name: raw.name,
        email: raw.email,
        role: raw.role,
    })
}

#[derive(Deserialize, Debug)]
struct RawBillSlab {
    slab: String,
    units: f64,
    rate: f64,
    amount: f64,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawBillCalculation {
    total_amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    breakdown: Vec<RawBillSlab>,
    #[serde(default)]
    fixed_charges: Option<f64>,
}

/// `POST /api/dashboard/calculate-bill`. Slab order is preserved.
pub fn bill_calculation(body: Value) -> Result<BillCalculation, AppError> {
    let raw: RawBillCalculation =
        decode(envelope_data(body, "bill calculation")?, "bill calculation")?;
    Ok(BillCalculation {
        total_amount: raw.total_amount,
        breakdown: raw
            .breakdown
            .into_iter()
            .map(|s| BillSlab {
                slab: s.slab,
                units: s.units,
                rate: s.rate,
                amount: s.amount,
            })
            .collect(),
        fixed_charges: raw.fixed_charges,
    })
}

#[derive(Deserialize, Debug)]
struct RawTrendPoint {
    time: String,
    energy: f64,
    voltage: f64,
    #[serde(default)]
    current: Option<f64>,
    #[serde(default)]
    charge: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct RawDailyConsumption {
    day: String,
    consumption: f64,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawAnalytics {
    #[serde(default, deserialize_with = "null_as_default")]
    energy_trend: Vec<RawTrendPoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    daily_consumption: Vec<RawDailyConsumption>,
}

/// `GET /api/dashboard/analytics`
pub fn analytics(body: Value) -> Result<AnalyticsData, AppError> {
    let raw: RawAnalytics = decode(envelope_data(body, "analytics")?, "analytics")?;
    Ok(AnalyticsData {
        energy_trend: raw
            .energy_trend
            .into_iter()
            .map(|t| TrendPoint {
                time: t.time,
                energy: t.energy,
                voltage: t.voltage,
                current: t.current.or(t.charge),
            })
            .collect(),
        daily_consumption: raw
            .daily_consumption
            .into_iter()
            .map(|d| DailyConsumption {
                day: d.day,
                consumption: d.consumption,
            })
            .collect(),
    })
}
