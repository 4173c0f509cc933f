use serde::{Deserialize, Serialize};
use time::{macros::format_description, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};
use utoipa::ToSchema;

pub const FEET_PER_FLIGHT_LEVEL: i64 = 100;
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Parses `HHMMZ` (on today's UTC date) or `YYYY-MM-DD HH:MMZ`
pub fn parse_zulu_time(input: &str) -> Option<OffsetDateTime> {
    parse_zulu_time_at(input, OffsetDateTime::now_utc())
}

/// Same as [`parse_zulu_time`], with the short form resolved against `now`'s UTC date
pub fn parse_zulu_time_at(input: &str, now: OffsetDateTime) -> Option<OffsetDateTime> {
    if input.len() == 5 && input.ends_with('Z') {
        let digits = &input[..4];
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let hour: u8 = digits[..2].parse().ok()?;
        let minute: u8 = digits[2..].parse().ok()?;
        let clock = Time::from_hms(hour, minute, 0).ok()?;
        let today = now.to_offset(UtcOffset::UTC).date();
        return Some(PrimitiveDateTime::new(today, clock).assume_utc());
    }

    PrimitiveDateTime::parse(
        input,
        format_description!("[year]-[month]-[day] [hour]:[minute]Z"),
    )
    .ok()
    .map(PrimitiveDateTime::assume_utc)
}

/// `YYYY-MM-DD HH:MMZ`, the form times are echoed back in
pub fn format_zulu(at: OffsetDateTime) -> String {
    at.format(format_description!("[year]-[month]-[day] [hour]:[minute]Z"))
        .unwrap_or_else(|_| at.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FlightLevel {
    /// As entered, upper-cased, e.g. `FL350`
    pub text: String,
    pub level: u32,
    pub altitude_ft: i64,
    pub altitude_m: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlightLevelInput {
    /// Blank, or not an `FL` value at all
    None,
    Valid(FlightLevel),
    Invalid(String),
}

pub fn parse_flight_level(input: &str) -> FlightLevelInput {
    let text = input.trim().to_uppercase();
    let Some(rest) = text.strip_prefix("FL") else {
        return FlightLevelInput::None;
    };

    match rest.trim().parse::<u32>() {
        Ok(level) => {
            let altitude_ft = i64::from(level) * FEET_PER_FLIGHT_LEVEL;
            FlightLevelInput::Valid(FlightLevel {
                altitude_m: (altitude_ft as f64 * METERS_PER_FOOT).round() as i64,
                altitude_ft,
                level,
                text,
            })
        }
        Err(_) => FlightLevelInput::Invalid(text),
    }
}
