use chrono::NaiveTime;

/// Parse `HH:MM`. A trailing `:SS` component, as stored for database time
/// columns, is also accepted.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}
