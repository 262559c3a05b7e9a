use time::{Date, Time};

use crate::{record::RecordId, time_serde};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("Invalid schedule record {record_id}: {reason}.")]
	InvalidRecord { record_id: RecordId, reason: InvalidReason },
	#[error("Invalid range: end date {end} is before start date {start}.")]
	InvalidRange { start: Date, end: Date },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidReason {
	#[error("both date and recurring fields are set")]
	AmbiguousKind,
	#[error("neither date nor day_of_week is set")]
	MissingKind,
	#[error("recurring record is missing {0}")]
	MissingField(&'static str),
	#[error("day_of_week {0} is outside 0..=6")]
	DayOfWeekOutOfRange(i64),
	#[error("unknown frequency {0:?}")]
	UnknownFrequency(String),
	#[error("anchor_week_start is required on biweekly records")]
	MissingAnchor,
	#[error("anchor_week_start is only allowed on biweekly records")]
	UnexpectedAnchor,
	#[error("anchor_week_start {0} is not a Sunday")]
	AnchorNotSunday(Date),
	#[error("{field} {value:?} is not a YYYY-MM-DD date")]
	MalformedDate { field: &'static str, value: String },
	#[error("{field} {value:?} is not an HH:MM time")]
	MalformedTime { field: &'static str, value: String },
	#[error(
		"start_time {} must be before end_time {}",
		time_serde::format_hhmm(.start),
		time_serde::format_hhmm(.end)
	)]
	EmptyWindow { start: Time, end: Time },
}
