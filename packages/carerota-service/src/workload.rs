use serde::Serialize;
use time::Date;

use carerota_domain::{CaregiverId, ResolveOptions, ScheduleRecord, calendar, time_serde, workload};

use crate::ScheduleService;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorkloadSummary {
	pub caregiver_id: CaregiverId,
	/// Long-run average with bi-weekly records counted at half weight.
	pub steady_state_hours: f64,
	#[serde(with = "time_serde::date")]
	pub week_start: Date,
	/// Hours actually scheduled in the week starting at `week_start`.
	pub actual_hours: f64,
}

impl ScheduleService {
	pub fn weekly_hours(&self, records: &[ScheduleRecord], caregiver_id: &CaregiverId) -> f64 {
		workload::weekly_hours(records, caregiver_id)
	}

	/// Hours in the week containing `date`, counting only active records.
	pub fn actual_week_hours(
		&self,
		records: &[ScheduleRecord],
		caregiver_id: &CaregiverId,
		date: Date,
	) -> f64 {
		workload::actual_week_hours(records, caregiver_id, date, ResolveOptions::active_only())
	}

	pub fn current_week_hours(&self, records: &[ScheduleRecord], caregiver_id: &CaregiverId) -> f64 {
		self.actual_week_hours(records, caregiver_id, self.today())
	}

	/// Steady-state and actual hours for the week containing `week`, or the current week.
	pub fn workload_summary(
		&self,
		records: &[ScheduleRecord],
		caregiver_id: &CaregiverId,
		week: Option<Date>,
	) -> WorkloadSummary {
		let date = week.unwrap_or_else(|| self.today());
		let summary = WorkloadSummary {
			caregiver_id: caregiver_id.clone(),
			steady_state_hours: self.weekly_hours(records, caregiver_id),
			week_start: calendar::week_start_of(date),
			actual_hours: self.actual_week_hours(records, caregiver_id, date),
		};

		tracing::debug!(
			caregiver_id = %caregiver_id,
			steady_state_hours = summary.steady_state_hours,
			actual_hours = summary.actual_hours,
			"Computed caregiver workload."
		);

		summary
	}
}
