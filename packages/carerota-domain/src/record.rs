use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use time::{Date, Time, Weekday};

use crate::{
	Error, InvalidReason, Result, calendar,
	time_serde::{self, parse_date, parse_hhmm},
};

macro_rules! opaque_id {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
		#[serde(transparent)]
		pub struct $name(String);
		impl $name {
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}
		impl From<&str> for $name {
			fn from(value: &str) -> Self {
				Self(value.to_string())
			}
		}
		impl From<String> for $name {
			fn from(value: String) -> Self {
				Self(value)
			}
		}
		impl<'de> Deserialize<'de> for $name {
			fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
			where
				D: Deserializer<'de>,
			{
				RawId::deserialize(deserializer).map(|raw| Self(raw.into_string()))
			}
		}
	};
}

opaque_id!(
	/// Identifier of a schedule record as assigned by the storage collaborator.
	RecordId
);
opaque_id!(CaregiverId);
opaque_id!(ClientId);

/// Storage emits numeric or string keys depending on the table.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
	Text(String),
	Signed(i64),
	Unsigned(u64),
}
impl RawId {
	fn into_string(self) -> String {
		match self {
			Self::Text(value) => value,
			Self::Signed(value) => value.to_string(),
			Self::Unsigned(value) => value.to_string(),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Frequency {
	Weekly,
	Biweekly,
}
impl Frequency {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"weekly" => Some(Self::Weekly),
			"biweekly" | "bi-weekly" | "bi_weekly" => Some(Self::Biweekly),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cadence {
	Weekly,
	/// Runs in the week starting at `anchor_week_start` and every second week before and after.
	Biweekly { anchor_week_start: Date },
}
impl Cadence {
	pub fn anchor_week_start(&self) -> Option<Date> {
		match self {
			Self::Weekly => None,
			Self::Biweekly { anchor_week_start } => Some(*anchor_week_start),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Recurrence {
	pub day_of_week: Weekday,
	pub cadence: Cadence,
	/// No occurrence resolves before this date.
	pub effective_from: Date,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
	OneTime { date: Date },
	Recurring(Recurrence),
}

/// Half-open time-of-day interval `[start, end)`; `start < end` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ShiftWindow {
	#[serde(with = "time_serde::hhmm")]
	start: Time,
	#[serde(with = "time_serde::hhmm")]
	end: Time,
}
impl ShiftWindow {
	pub fn new(start: Time, end: Time) -> std::result::Result<Self, InvalidReason> {
		if start >= end {
			return Err(InvalidReason::EmptyWindow { start, end });
		}

		Ok(Self { start, end })
	}

	pub fn start(&self) -> Time {
		self.start
	}

	pub fn end(&self) -> Time {
		self.end
	}

	pub fn duration_minutes(&self) -> i64 {
		(self.end - self.start).whole_minutes()
	}

	pub fn hours(&self) -> f64 {
		self.duration_minutes() as f64 / 60.0
	}

	/// Windows sharing only a boundary do not overlap.
	pub fn overlaps(&self, other: &Self) -> bool {
		self.start < other.end && self.end > other.start
	}

	pub fn overlap(&self, other: &Self) -> Option<Self> {
		if !self.overlaps(other) {
			return None;
		}

		Some(Self { start: self.start.max(other.start), end: self.end.min(other.end) })
	}
}

/// A validated unit of scheduling intent.
///
/// Only constructible through [`ScheduleRecord::new`] or [`ScheduleRecord::from_raw`], so every
/// value upholds the record invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleRecord {
	id: RecordId,
	caregiver_id: CaregiverId,
	client_id: ClientId,
	kind: RecordKind,
	window: ShiftWindow,
	is_active: bool,
	notes: Option<String>,
}
impl ScheduleRecord {
	pub fn new(
		id: RecordId,
		caregiver_id: CaregiverId,
		client_id: ClientId,
		kind: RecordKind,
		window: ShiftWindow,
	) -> Result<Self> {
		if let RecordKind::Recurring(Recurrence {
			cadence: Cadence::Biweekly { anchor_week_start },
			..
		}) = kind
			&& anchor_week_start.weekday() != Weekday::Sunday
		{
			return Err(Error::InvalidRecord {
				record_id: id,
				reason: InvalidReason::AnchorNotSunday(anchor_week_start),
			});
		}

		Ok(Self { id, caregiver_id, client_id, kind, window, is_active: true, notes: None })
	}

	pub fn from_raw(raw: RawScheduleRecord) -> Result<Self> {
		let RawScheduleRecord {
			id,
			caregiver_id,
			client_id,
			date,
			day_of_week,
			frequency,
			effective_from,
			anchor_week_start,
			start_time,
			end_time,
			is_active,
			notes,
		} = raw;
		let invalid = |reason| Error::InvalidRecord { record_id: id.clone(), reason };
		let has_recurring_fields = day_of_week.is_some()
			|| frequency.is_some()
			|| effective_from.is_some()
			|| anchor_week_start.is_some();
		let kind = match (date, has_recurring_fields) {
			(Some(_), true) => return Err(invalid(InvalidReason::AmbiguousKind)),
			(None, false) => return Err(invalid(InvalidReason::MissingKind)),
			(Some(date), false) =>
				RecordKind::OneTime { date: required_date("date", &date).map_err(invalid)? },
			(None, true) => RecordKind::Recurring(
				parse_recurrence(day_of_week, frequency, effective_from, anchor_week_start)
					.map_err(invalid)?,
			),
		};
		let start = required_time("start_time", &start_time).map_err(invalid)?;
		let end = required_time("end_time", &end_time).map_err(invalid)?;
		let window = ShiftWindow::new(start, end).map_err(invalid)?;
		let notes = notes.filter(|text| !text.trim().is_empty());
		let record = Self::new(id, caregiver_id, client_id, kind, window)?;

		Ok(record.with_active(is_active.unwrap_or(true)).with_notes(notes))
	}

	pub fn with_active(mut self, is_active: bool) -> Self {
		self.is_active = is_active;

		self
	}

	pub fn with_notes(mut self, notes: Option<String>) -> Self {
		self.notes = notes;

		self
	}

	pub fn id(&self) -> &RecordId {
		&self.id
	}

	pub fn caregiver_id(&self) -> &CaregiverId {
		&self.caregiver_id
	}

	pub fn client_id(&self) -> &ClientId {
		&self.client_id
	}

	pub fn kind(&self) -> &RecordKind {
		&self.kind
	}

	pub fn window(&self) -> ShiftWindow {
		self.window
	}

	pub fn is_active(&self) -> bool {
		self.is_active
	}

	pub fn notes(&self) -> Option<&str> {
		self.notes.as_deref()
	}

	pub fn recurrence(&self) -> Option<&Recurrence> {
		match &self.kind {
			RecordKind::Recurring(recurrence) => Some(recurrence),
			RecordKind::OneTime { .. } => None,
		}
	}

	pub fn belongs_to(&self, caregiver_id: &CaregiverId) -> bool {
		&self.caregiver_id == caregiver_id
	}
}

/// A schedule row as the storage collaborator hands it over, before validation.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawScheduleRecord {
	pub id: RecordId,
	pub caregiver_id: CaregiverId,
	pub client_id: ClientId,
	#[serde(default)]
	pub date: Option<String>,
	#[serde(default)]
	pub day_of_week: Option<i64>,
	#[serde(default)]
	pub frequency: Option<String>,
	#[serde(default)]
	pub effective_from: Option<String>,
	#[serde(default)]
	pub anchor_week_start: Option<String>,
	pub start_time: String,
	pub end_time: String,
	/// Only an explicit `false` marks a record inactive.
	#[serde(default)]
	pub is_active: Option<bool>,
	#[serde(default)]
	pub notes: Option<String>,
}

fn parse_recurrence(
	day_of_week: Option<i64>,
	frequency: Option<String>,
	effective_from: Option<String>,
	anchor_week_start: Option<String>,
) -> std::result::Result<Recurrence, InvalidReason> {
	let index = day_of_week.ok_or(InvalidReason::MissingField("day_of_week"))?;
	let day_of_week =
		calendar::weekday_from_index(index).ok_or(InvalidReason::DayOfWeekOutOfRange(index))?;
	let frequency = frequency.ok_or(InvalidReason::MissingField("frequency"))?;
	let frequency =
		Frequency::parse(&frequency).ok_or(InvalidReason::UnknownFrequency(frequency))?;
	let effective_from = effective_from.ok_or(InvalidReason::MissingField("effective_from"))?;
	let effective_from = required_date("effective_from", &effective_from)?;
	let anchor_week_start = anchor_week_start
		.map(|anchor| required_date("anchor_week_start", &anchor))
		.transpose()?;
	let cadence = match (frequency, anchor_week_start) {
		(Frequency::Weekly, None) => Cadence::Weekly,
		(Frequency::Weekly, Some(_)) => return Err(InvalidReason::UnexpectedAnchor),
		(Frequency::Biweekly, None) => return Err(InvalidReason::MissingAnchor),
		(Frequency::Biweekly, Some(anchor_week_start)) => Cadence::Biweekly { anchor_week_start },
	};

	Ok(Recurrence { day_of_week, cadence, effective_from })
}

fn required_date(field: &'static str, raw: &str) -> std::result::Result<Date, InvalidReason> {
	parse_date(raw).ok_or_else(|| InvalidReason::MalformedDate { field, value: raw.to_string() })
}

fn required_time(field: &'static str, raw: &str) -> std::result::Result<Time, InvalidReason> {
	parse_hhmm(raw).ok_or_else(|| InvalidReason::MalformedTime { field, value: raw.to_string() })
}

#[cfg(test)]
mod tests {
	use time::{
		Weekday,
		macros::{date, time},
	};

	use super::{
		Cadence, CaregiverId, ClientId, RawScheduleRecord, RecordId, RecordKind, ScheduleRecord,
		ShiftWindow,
	};
	use crate::{Error, InvalidReason};

	fn raw(id: &str) -> RawScheduleRecord {
		RawScheduleRecord {
			id: RecordId::from(id),
			caregiver_id: CaregiverId::from("cg-1"),
			client_id: ClientId::from("cl-1"),
			start_time: "09:00".to_string(),
			end_time: "13:00".to_string(),
			..Default::default()
		}
	}

	fn reason(result: crate::Result<ScheduleRecord>) -> InvalidReason {
		match result {
			Err(Error::InvalidRecord { reason, .. }) => reason,
			other => panic!("Expected an invalid record, got {other:?}."),
		}
	}

	#[test]
	fn parses_biweekly_record() {
		let record = ScheduleRecord::from_raw(RawScheduleRecord {
			day_of_week: Some(1),
			frequency: Some("bi-weekly".to_string()),
			effective_from: Some("2024-01-01".to_string()),
			anchor_week_start: Some("2024-01-07".to_string()),
			..raw("r1")
		})
		.expect("Biweekly record should parse.");
		let recurrence = record.recurrence().expect("Record should be recurring.");

		assert_eq!(recurrence.day_of_week, Weekday::Monday);
		assert_eq!(
			recurrence.cadence,
			Cadence::Biweekly { anchor_week_start: date!(2024 - 01 - 07) }
		);
		assert_eq!(recurrence.effective_from, date!(2024 - 01 - 01));
		assert!(record.is_active());
	}

	#[test]
	fn one_time_dates_drop_time_of_day() {
		let record = ScheduleRecord::from_raw(RawScheduleRecord {
			date: Some("2024-01-08T00:00:00.000Z".to_string()),
			is_active: Some(false),
			notes: Some("  ".to_string()),
			..raw("r2")
		})
		.expect("One-time record should parse.");

		assert_eq!(record.kind(), &RecordKind::OneTime { date: date!(2024 - 01 - 08) });
		assert!(!record.is_active());
		assert_eq!(record.notes(), None);
	}

	#[test]
	fn rejects_mixed_kinds() {
		let result = ScheduleRecord::from_raw(RawScheduleRecord {
			date: Some("2024-01-08".to_string()),
			day_of_week: Some(1),
			..raw("r3")
		});

		assert_eq!(reason(result), InvalidReason::AmbiguousKind);
		assert_eq!(reason(ScheduleRecord::from_raw(raw("r4"))), InvalidReason::MissingKind);
	}

	#[test]
	fn rejects_inverted_and_empty_windows() {
		let inverted = ScheduleRecord::from_raw(RawScheduleRecord {
			date: Some("2024-01-08".to_string()),
			start_time: "13:00".to_string(),
			end_time: "09:00".to_string(),
			..raw("r5")
		});
		let empty = ScheduleRecord::from_raw(RawScheduleRecord {
			date: Some("2024-01-08".to_string()),
			end_time: "09:00".to_string(),
			..raw("r6")
		});

		assert!(matches!(reason(inverted), InvalidReason::EmptyWindow { .. }));
		assert!(matches!(reason(empty), InvalidReason::EmptyWindow { .. }));
	}

	#[test]
	fn enforces_anchor_rules() {
		let weekly = || RawScheduleRecord {
			day_of_week: Some(1),
			frequency: Some("weekly".to_string()),
			effective_from: Some("2024-01-01".to_string()),
			..raw("r7")
		};

		assert_eq!(
			reason(ScheduleRecord::from_raw(RawScheduleRecord {
				frequency: Some("biweekly".to_string()),
				..weekly()
			})),
			InvalidReason::MissingAnchor
		);
		assert_eq!(
			reason(ScheduleRecord::from_raw(RawScheduleRecord {
				anchor_week_start: Some("2024-01-07".to_string()),
				..weekly()
			})),
			InvalidReason::UnexpectedAnchor
		);
		assert_eq!(
			reason(ScheduleRecord::from_raw(RawScheduleRecord {
				frequency: Some("biweekly".to_string()),
				anchor_week_start: Some("2024-01-08".to_string()),
				..weekly()
			})),
			InvalidReason::AnchorNotSunday(date!(2024 - 01 - 08))
		);
	}

	#[test]
	fn rejects_incomplete_recurrence() {
		assert_eq!(
			reason(ScheduleRecord::from_raw(RawScheduleRecord {
				day_of_week: Some(7),
				frequency: Some("weekly".to_string()),
				effective_from: Some("2024-01-01".to_string()),
				..raw("r8")
			})),
			InvalidReason::DayOfWeekOutOfRange(7)
		);
		assert_eq!(
			reason(ScheduleRecord::from_raw(RawScheduleRecord {
				day_of_week: Some(2),
				effective_from: Some("2024-01-01".to_string()),
				..raw("r9")
			})),
			InvalidReason::MissingField("frequency")
		);
		assert_eq!(
			reason(ScheduleRecord::from_raw(RawScheduleRecord {
				day_of_week: Some(2),
				frequency: Some("monthly".to_string()),
				effective_from: Some("2024-01-01".to_string()),
				..raw("r10")
			})),
			InvalidReason::UnknownFrequency("monthly".to_string())
		);
	}

	#[test]
	fn deserializes_numeric_ids() {
		let raw: RawScheduleRecord = serde_json::from_str(
			r#"{"id":42,"caregiver_id":7,"client_id":"cl-9","date":"2024-01-08","start_time":"09:00:00","end_time":"10:30:00","is_active":null}"#,
		)
		.expect("Raw record should deserialize.");
		let record = ScheduleRecord::from_raw(raw).expect("Record should validate.");

		assert_eq!(record.id().as_str(), "42");
		assert_eq!(record.caregiver_id().as_str(), "7");
		assert!(record.is_active());
		assert_eq!(record.window().duration_minutes(), 90);
	}

	#[test]
	fn windows_touching_at_a_boundary_do_not_overlap() {
		let morning = ShiftWindow::new(time!(09:00), time!(13:00)).expect("Valid window.");
		let afternoon = ShiftWindow::new(time!(13:00), time!(17:00)).expect("Valid window.");
		let midday = ShiftWindow::new(time!(12:00), time!(16:00)).expect("Valid window.");

		assert!(!morning.overlaps(&afternoon));
		assert_eq!(
			morning.overlap(&midday),
			Some(ShiftWindow::new(time!(12:00), time!(13:00)).expect("Valid window."))
		);
	}
}
