use time::Date;

use crate::{
	calendar,
	record::{Cadence, CaregiverId, ScheduleRecord},
	resolve::{self, ResolveOptions},
};

/// Steady-state weekly hours of the caregiver's active recurring records.
///
/// Bi-weekly records count half their duration. One-time visits are not part of the steady
/// state; use [`actual_week_hours`] for a concrete week.
pub fn weekly_hours(records: &[ScheduleRecord], caregiver_id: &CaregiverId) -> f64 {
	let minutes: f64 = records
		.iter()
		.filter(|record| record.is_active() && record.belongs_to(caregiver_id))
		.filter_map(|record| {
			let recurrence = record.recurrence()?;
			let minutes = record.window().duration_minutes() as f64;

			Some(match recurrence.cadence {
				Cadence::Weekly => minutes,
				Cadence::Biweekly { .. } => minutes / 2.0,
			})
		})
		.sum();

	minutes / 60.0
}

/// Hours the caregiver actually works in the Sunday–Saturday week containing `date`.
pub fn actual_week_hours(
	records: &[ScheduleRecord],
	caregiver_id: &CaregiverId,
	date: Date,
	options: ResolveOptions,
) -> f64 {
	let minutes: i64 = calendar::week_of(date)
		.flat_map(|day| resolve::resolve_for_date(records, day, options))
		.filter(|occurrence| &occurrence.caregiver_id == caregiver_id)
		.map(|occurrence| occurrence.duration_minutes())
		.sum();

	minutes as f64 / 60.0
}
