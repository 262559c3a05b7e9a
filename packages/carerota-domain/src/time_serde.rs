//! Calendar-date, time-of-day and weekday wire formats.
//!
//! Dates travel as `YYYY-MM-DD`, times as `HH:MM` and weekdays as `0..=6` with Sunday as zero,
//! matching the shape the scheduling API stores.

use time::{Date, Time, macros::format_description};

pub fn format_date(date: &Date) -> String {
	format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

pub fn format_hhmm(time: &Time) -> String {
	format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Parses a calendar date, discarding any time-of-day suffix such as `T00:00:00.000Z`.
pub fn parse_date(raw: &str) -> Option<Date> {
	let day = raw.trim().split(['T', ' ']).next()?;

	Date::parse(day, format_description!("[year]-[month]-[day]")).ok()
}

/// Parses `HH:MM` or `HH:MM:SS`. Seconds are accepted only when zero.
pub fn parse_hhmm(raw: &str) -> Option<Time> {
	let raw = raw.trim();
	let parsed = match raw.len() {
		5 => Time::parse(raw, format_description!("[hour]:[minute]")),
		8 => Time::parse(raw, format_description!("[hour]:[minute]:[second]")),
		_ => return None,
	}
	.ok()?;

	if parsed.second() != 0 {
		return None;
	}

	Some(parsed)
}

pub mod date {
	use serde::Serializer;
	use time::Date;

	pub fn serialize<S>(value: &Date, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&super::format_date(value))
	}

	pub mod option {
		use serde::Serializer;
		use time::Date;

		pub fn serialize<S>(value: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			match value {
				Some(value) => super::serialize(value, serializer),
				None => serializer.serialize_none(),
			}
		}
	}
}

pub mod hhmm {
	use serde::Serializer;
	use time::Time;

	pub fn serialize<S>(value: &Time, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&super::format_hhmm(value))
	}
}

pub mod weekday {
	use serde::Serializer;
	use time::Weekday;

	pub fn serialize<S>(value: &Weekday, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_u8(value.number_days_from_sunday())
	}
}
