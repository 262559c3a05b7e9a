use time::{Date, Duration};

use carerota_domain::{CaregiverId, Occurrence, ResolveOptions, ScheduleRecord, resolve};

use crate::{Error, Result, ScheduleService};

impl ScheduleService {
	pub fn resolve_for_date(
		&self,
		records: &[ScheduleRecord],
		date: Date,
		options: ResolveOptions,
	) -> Vec<Occurrence> {
		let occurrences = resolve::resolve_for_date(records, date, options);

		tracing::debug!(
			%date,
			records = records.len(),
			occurrences = occurrences.len(),
			include_inactive = options.include_inactive,
			"Resolved schedule for date."
		);

		occurrences
	}

	/// Occurrences for every date in `[start, end]`, bounded by `resolution.max_range_days`.
	pub fn resolve_for_range(
		&self,
		records: &[ScheduleRecord],
		start: Date,
		end: Date,
		options: ResolveOptions,
	) -> Result<Vec<Occurrence>> {
		let days = (end - start).whole_days() + 1;
		let max = self.cfg.resolution.max_range_days;

		if end >= start && days > i64::from(max) {
			return Err(Error::RangeTooLarge { days, max });
		}

		let occurrences = resolve::resolve_for_range(records, start, end, options)?;

		tracing::debug!(
			%start,
			%end,
			records = records.len(),
			occurrences = occurrences.len(),
			"Resolved schedule for range."
		);

		Ok(occurrences)
	}

	/// Today's occurrences under the configured inactive-record policy.
	pub fn resolve_today(&self, records: &[ScheduleRecord]) -> Vec<Occurrence> {
		self.resolve_for_date(records, self.today(), self.default_options())
	}

	/// The caregiver's active occurrences in `[today, today + days)`, ending early at the last
	/// representable date.
	pub fn upcoming_for_caregiver(
		&self,
		records: &[ScheduleRecord],
		caregiver_id: &CaregiverId,
		days: u32,
	) -> Result<Vec<Occurrence>> {
		if days == 0 {
			return Ok(Vec::new());
		}

		let max = self.cfg.resolution.max_range_days;

		if days > max {
			return Err(Error::RangeTooLarge { days: i64::from(days), max });
		}

		let start = self.today();
		let end = start.checked_add(Duration::days(i64::from(days) - 1)).unwrap_or(Date::MAX);
		let occurrences =
			self.resolve_for_range(records, start, end, ResolveOptions::active_only())?;

		Ok(occurrences
			.into_iter()
			.filter(|occurrence| &occurrence.caregiver_id == caregiver_id)
			.collect())
	}
}
