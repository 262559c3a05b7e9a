use serde::Serialize;
use time::{Date, Time};

use crate::{
	record::{CaregiverId, ClientId, RecordId, ScheduleRecord, ShiftWindow},
	time_serde,
};

/// A concrete, dated shift derived from one [`ScheduleRecord`]. Never persisted by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Occurrence {
	pub source_record_id: RecordId,
	pub caregiver_id: CaregiverId,
	pub client_id: ClientId,
	#[serde(with = "time_serde::date")]
	pub date: Date,
	#[serde(with = "time_serde::hhmm")]
	pub start_time: Time,
	#[serde(with = "time_serde::hhmm")]
	pub end_time: Time,
}
impl Occurrence {
	pub fn of(record: &ScheduleRecord, date: Date) -> Self {
		let window = record.window();

		Self {
			source_record_id: record.id().clone(),
			caregiver_id: record.caregiver_id().clone(),
			client_id: record.client_id().clone(),
			date,
			start_time: window.start(),
			end_time: window.end(),
		}
	}

	/// Shared time span with `other`, ignoring dates. Back-to-back shifts share nothing.
	pub fn overlap(&self, other: &Self) -> Option<ShiftWindow> {
		ShiftWindow::new(self.start_time.max(other.start_time), self.end_time.min(other.end_time))
			.ok()
	}

	pub fn duration_minutes(&self) -> i64 {
		(self.end_time - self.start_time).whole_minutes()
	}
}
