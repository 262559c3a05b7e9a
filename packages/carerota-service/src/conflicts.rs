use std::collections::BTreeMap;

use time::Date;

use carerota_domain::{
	CandidateConflict, CaregiverId, ConflictPair, OccurrenceConflict, ScheduleRecord, conflict,
};

use crate::ScheduleService;

impl ScheduleService {
	/// Recurring double-bookings for one caregiver.
	pub fn find_conflicts(
		&self,
		records: &[ScheduleRecord],
		caregiver_id: &CaregiverId,
	) -> Vec<ConflictPair> {
		let conflicts = conflict::find_conflicts(records, caregiver_id);

		tracing::debug!(
			caregiver_id = %caregiver_id,
			conflicts = conflicts.len(),
			"Checked recurring schedule for conflicts."
		);

		conflicts
	}

	pub fn conflicts_by_caregiver(
		&self,
		records: &[ScheduleRecord],
	) -> BTreeMap<CaregiverId, Vec<ConflictPair>> {
		let grouped = conflict::conflicts_by_caregiver(records);

		tracing::debug!(
			records = records.len(),
			caregivers_with_conflicts = grouped.len(),
			"Checked all caregivers for conflicts."
		);

		grouped
	}

	/// Double-bookings on one concrete date, one-time visits included.
	pub fn find_date_conflicts(
		&self,
		records: &[ScheduleRecord],
		caregiver_id: &CaregiverId,
		date: Date,
	) -> Vec<OccurrenceConflict> {
		let conflicts = conflict::find_date_conflicts(records, caregiver_id, date);

		tracing::debug!(
			caregiver_id = %caregiver_id,
			%date,
			conflicts = conflicts.len(),
			"Checked date for conflicts."
		);

		conflicts
	}

	/// Existing records a new or edited record would collide with.
	pub fn conflicts_for_candidate(
		&self,
		records: &[ScheduleRecord],
		candidate: &ScheduleRecord,
	) -> Vec<CandidateConflict> {
		let conflicts = conflict::conflicts_for_candidate(records, candidate);

		if !conflicts.is_empty() {
			tracing::info!(
				record_id = %candidate.id(),
				caregiver_id = %candidate.caregiver_id(),
				conflicts = conflicts.len(),
				"Candidate schedule record collides with existing records."
			);
		}

		conflicts
	}
}
