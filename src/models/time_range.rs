use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use super::error::AppError;

/// Named look-back windows understood by the `timeRange` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RelativeWindow {
    OneHour,
    SixHours,
    #[default]
    TwentyFourHours,
    SevenDays,
}

impl RelativeWindow {
    /// Wire value for the `timeRange` parameter.
    pub fn code(&self) -> &'static str {
        match self {
            RelativeWindow::OneHour => "1h",
            RelativeWindow::SixHours => "6h",
            RelativeWindow::TwentyFourHours => "24h",
            RelativeWindow::SevenDays => "7d",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RelativeWindow::OneHour => "Last hour",
            RelativeWindow::SixHours => "Last 6 hours",
            RelativeWindow::TwentyFourHours => "Last 24 hours",
            RelativeWindow::SevenDays => "Last 7 days",
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            RelativeWindow::OneHour => Duration::hours(1),
            RelativeWindow::SixHours => Duration::hours(6),
            RelativeWindow::TwentyFourHours => Duration::hours(24),
            RelativeWindow::SevenDays => Duration::days(7),
        }
    }

    pub fn all() -> &'static [RelativeWindow] {
        &[
            RelativeWindow::OneHour,
            RelativeWindow::SixHours,
            RelativeWindow::TwentyFourHours,
            RelativeWindow::SevenDays,
        ]
    }
}

impl std::fmt::Display for RelativeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for RelativeWindow {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1h" => Ok(RelativeWindow::OneHour),
            "6h" => Ok(RelativeWindow::SixHours),
            "24h" => Ok(RelativeWindow::TwentyFourHours),
            "7d" => Ok(RelativeWindow::SevenDays),
            _ => Err(AppError::Validation(format!("Unknown time range: {s}"))),
        }
    }
}

/// An explicit `[start, end)` interval. Only constructible with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl CustomRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, AppError> {
        if start >= end {
            return Err(AppError::Validation(format!(
                "Start time {} must be before end time {}",
                start.format("%Y-%m-%d %H:%M"),
                end.format("%Y-%m-%d %H:%M")
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeRange {
    Relative(RelativeWindow),
    Custom(CustomRange),
}

impl TimeRange {
    pub fn custom(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, AppError> {
        CustomRange::new(start, end).map(TimeRange::Custom)
    }

    /// Builds a custom range from two user-entered instants (RFC 3339, or the
    /// `YYYY-MM-DDTHH:MM` form produced by `datetime-local` inputs, read as UTC).
    pub fn parse_custom(start: &str, end: &str) -> Result<Self, AppError> {
        let start = parse_flexible_datetime(start)
            .ok_or_else(|| AppError::Validation(format!("Invalid start time '{start}'")))?;
        let end = parse_flexible_datetime(end)
            .ok_or_else(|| AppError::Validation(format!("Invalid end time '{end}'")))?;
        Self::custom(start, end)
    }

    /// The named window, if this is a relative range.
    pub fn window(&self) -> Option<RelativeWindow> {
        match self {
            TimeRange::Relative(window) => Some(*window),
            TimeRange::Custom(_) => None,
        }
    }

    /// Resolves the range to concrete instants relative to `now`.
    pub fn bounds(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        match self {
            TimeRange::Relative(window) => (now - window.duration(), now),
            TimeRange::Custom(range) => (range.start, range.end),
        }
    }

    pub fn label(&self) -> String {
        match self {
            TimeRange::Relative(window) => window.description().to_string(),
            TimeRange::Custom(range) => format!(
                "{} to {}",
                range.start.format("%Y-%m-%d %H:%M"),
                range.end.format("%Y-%m-%d %H:%M")
            ),
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Relative(RelativeWindow::default())
    }
}

/// Parses RFC 3339 timestamps as well as the seconds-less and zone-less forms
/// the device firmware and browser inputs produce. Zone-less values are UTC.
pub fn parse_flexible_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = s.strip_suffix('Z').unwrap_or(s);
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_round_trip() {
        for window in RelativeWindow::all() {
            assert_eq!(window.code().parse::<RelativeWindow>().unwrap(), *window);
        }
        assert!("2h".parse::<RelativeWindow>().is_err());
    }

    #[test]
    fn test_flexible_datetime_forms() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_flexible_datetime("2025-01-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_flexible_datetime("2025-01-01T10:00Z"), Some(expected));
        assert_eq!(parse_flexible_datetime("2025-01-01T10:00"), Some(expected));
        assert_eq!(parse_flexible_datetime("2025-01-01T11:00:00+01:00"), Some(expected));
        assert_eq!(parse_flexible_datetime("yesterday"), None);
    }

    #[test]
    fn test_custom_range_rejects_inverted_bounds() {
        let result = TimeRange::parse_custom("2025-01-01T10:00", "2025-01-01T09:00");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_custom_range_rejects_empty_interval() {
        let t = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        assert!(TimeRange::custom(t, t).is_err());
    }

    #[test]
    fn test_relative_bounds() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        let (start, end) = TimeRange::Relative(RelativeWindow::SixHours).bounds(now);
        assert_eq!(end, now);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 1, 1, 18, 0, 0).unwrap());
    }
}
