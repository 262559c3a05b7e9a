//! Double-booking detection for one caregiver's schedule.

use std::collections::BTreeMap;

use serde::Serialize;
use time::{Date, Weekday};

use crate::{
	calendar,
	occurrence::Occurrence,
	record::{CaregiverId, RecordId, RecordKind, Recurrence, ScheduleRecord, ShiftWindow},
	resolve::{self, ResolveOptions},
	time_serde,
};

/// Two recurring records that collide on a shared weekday. Neither is preferred.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConflictPair {
	pub a: RecordId,
	pub b: RecordId,
	#[serde(with = "time_serde::weekday")]
	pub day_of_week: Weekday,
	pub overlap: ShiftWindow,
}

/// Two occurrences that collide on one concrete date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OccurrenceConflict {
	pub a: Occurrence,
	pub b: Occurrence,
	#[serde(with = "time_serde::date")]
	pub date: Date,
	pub overlap: ShiftWindow,
}

/// A collision between a record about to be saved and an existing record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CandidateConflict {
	pub existing: RecordId,
	#[serde(with = "time_serde::weekday")]
	pub day_of_week: Weekday,
	/// `None` when both sides recur, so the collision repeats on every shared week.
	#[serde(with = "time_serde::date::option")]
	pub date: Option<Date>,
	pub overlap: ShiftWindow,
}

/// Shared window of two recurring schedules, or `None` when they can never coincide.
///
/// Bi-weekly pairs whose anchor weeks are an odd number of weeks apart run on alternating weeks
/// and never collide, whatever their times.
pub fn recurring_overlap(
	a: &Recurrence,
	a_window: ShiftWindow,
	b: &Recurrence,
	b_window: ShiftWindow,
) -> Option<ShiftWindow> {
	if a.day_of_week != b.day_of_week {
		return None;
	}
	if let (Some(a_anchor), Some(b_anchor)) =
		(a.cadence.anchor_week_start(), b.cadence.anchor_week_start())
		&& !calendar::same_parity(a_anchor, b_anchor)
	{
		return None;
	}

	a_window.overlap(&b_window)
}

/// Every conflicting pair among the caregiver's active recurring records.
///
/// Pairs are emitted as `(records[i], records[j])` with `i < j`, so output is stable for a fixed
/// input. One-time records are not considered; see [`find_date_conflicts`].
pub fn find_conflicts(records: &[ScheduleRecord], caregiver_id: &CaregiverId) -> Vec<ConflictPair> {
	let recurring: Vec<(&ScheduleRecord, &Recurrence)> = records
		.iter()
		.filter(|record| record.is_active() && record.belongs_to(caregiver_id))
		.filter_map(|record| record.recurrence().map(|recurrence| (record, recurrence)))
		.collect();
	let mut conflicts = Vec::new();

	for (i, (a, a_recurrence)) in recurring.iter().enumerate() {
		for (b, b_recurrence) in &recurring[i + 1..] {
			if let Some(overlap) =
				recurring_overlap(a_recurrence, a.window(), b_recurrence, b.window())
			{
				conflicts.push(ConflictPair {
					a: a.id().clone(),
					b: b.id().clone(),
					day_of_week: a_recurrence.day_of_week,
					overlap,
				});
			}
		}
	}

	conflicts
}

/// [`find_conflicts`] for every caregiver present in `records`, keyed by caregiver.
///
/// Caregivers without conflicts are omitted.
pub fn conflicts_by_caregiver(
	records: &[ScheduleRecord],
) -> BTreeMap<CaregiverId, Vec<ConflictPair>> {
	let mut caregivers: Vec<&CaregiverId> =
		records.iter().map(ScheduleRecord::caregiver_id).collect();

	caregivers.sort();
	caregivers.dedup();

	caregivers
		.into_iter()
		.filter_map(|caregiver_id| {
			let conflicts = find_conflicts(records, caregiver_id);

			(!conflicts.is_empty()).then(|| (caregiver_id.clone(), conflicts))
		})
		.collect()
}

/// Overlapping pairs among the caregiver's active occurrences on `date`.
///
/// Covers one-time visits, which the recurring detector skips.
pub fn find_date_conflicts(
	records: &[ScheduleRecord],
	caregiver_id: &CaregiverId,
	date: Date,
) -> Vec<OccurrenceConflict> {
	let occurrences: Vec<Occurrence> =
		resolve::resolve_for_date(records, date, ResolveOptions::active_only())
			.into_iter()
			.filter(|occurrence| &occurrence.caregiver_id == caregiver_id)
			.collect();
	let mut conflicts = Vec::new();

	for (i, a) in occurrences.iter().enumerate() {
		for b in &occurrences[i + 1..] {
			if let Some(overlap) = a.overlap(b) {
				conflicts.push(OccurrenceConflict { a: a.clone(), b: b.clone(), date, overlap });
			}
		}
	}

	conflicts
}

/// Existing active records of the candidate's caregiver that the candidate would collide with.
///
/// A record sharing the candidate's id is the version being edited and is skipped. Inactive
/// candidates never conflict.
pub fn conflicts_for_candidate(
	records: &[ScheduleRecord],
	candidate: &ScheduleRecord,
) -> Vec<CandidateConflict> {
	if !candidate.is_active() {
		return Vec::new();
	}

	records
		.iter()
		.filter(|existing| {
			existing.is_active()
				&& existing.id() != candidate.id()
				&& existing.belongs_to(candidate.caregiver_id())
		})
		.filter_map(|existing| candidate_collision(candidate, existing))
		.collect()
}

fn candidate_collision(
	candidate: &ScheduleRecord,
	existing: &ScheduleRecord,
) -> Option<CandidateConflict> {
	let (date, overlap) = match (candidate.kind(), existing.kind()) {
		(RecordKind::Recurring(a), RecordKind::Recurring(b)) =>
			(None, recurring_overlap(a, candidate.window(), b, existing.window())?),
		(RecordKind::OneTime { date }, _) | (_, RecordKind::OneTime { date }) => {
			if !candidate.occurs_on(*date) || !existing.occurs_on(*date) {
				return None;
			}

			(Some(*date), candidate.window().overlap(&existing.window())?)
		},
	};
	let day_of_week = match date {
		Some(date) => date.weekday(),
		None => candidate.recurrence().map(|recurrence| recurrence.day_of_week)?,
	};

	Some(CandidateConflict { existing: existing.id().clone(), day_of_week, date, overlap })
}
