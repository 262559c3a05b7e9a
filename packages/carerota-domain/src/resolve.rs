//! Occurrence resolution: which records produce a shift on a given calendar date.

use time::Date;

use crate::{
	Error, Result, calendar,
	occurrence::Occurrence,
	record::{Cadence, RecordKind, Recurrence, ScheduleRecord},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveOptions {
	/// Resolve paused or soft-deleted records too. Meant for read-only history views.
	pub include_inactive: bool,
}
impl ResolveOptions {
	pub fn active_only() -> Self {
		Self { include_inactive: false }
	}

	pub fn with_inactive() -> Self {
		Self { include_inactive: true }
	}

	fn admits(&self, record: &ScheduleRecord) -> bool {
		self.include_inactive || record.is_active()
	}
}

impl Recurrence {
	/// Checks weekday, then effective date, then cadence parity.
	pub fn occurs_on(&self, date: Date) -> bool {
		if date.weekday() != self.day_of_week {
			return false;
		}
		if date < self.effective_from {
			return false;
		}

		match self.cadence {
			Cadence::Weekly => true,
			Cadence::Biweekly { anchor_week_start } => calendar::same_parity(anchor_week_start, date),
		}
	}
}

impl ScheduleRecord {
	/// Whether the record's schedule lands on `date`, regardless of its active flag.
	pub fn occurs_on(&self, date: Date) -> bool {
		match self.kind() {
			RecordKind::OneTime { date: scheduled } => *scheduled == date,
			RecordKind::Recurring(recurrence) => recurrence.occurs_on(date),
		}
	}
}

/// Occurrences active on `date`, in input record order. A record yields at most one.
pub fn resolve_for_date(
	records: &[ScheduleRecord],
	date: Date,
	options: ResolveOptions,
) -> Vec<Occurrence> {
	records
		.iter()
		.filter(|record| options.admits(record) && record.occurs_on(date))
		.map(|record| Occurrence::of(record, date))
		.collect()
}

/// Ordered union of [`resolve_for_date`] over every date in `[start, end]`.
pub fn resolve_for_range(
	records: &[ScheduleRecord],
	start: Date,
	end: Date,
	options: ResolveOptions,
) -> Result<Vec<Occurrence>> {
	if end < start {
		return Err(Error::InvalidRange { start, end });
	}

	Ok(calendar::dates_inclusive(start, end)
		.flat_map(|date| resolve_for_date(records, date, options))
		.collect())
}

#[cfg(test)]
mod tests {
	use time::{
		Weekday,
		macros::{date, time},
	};

	use super::{ResolveOptions, resolve_for_date, resolve_for_range};
	use crate::{
		Error,
		record::{
			Cadence, CaregiverId, ClientId, RecordId, RecordKind, Recurrence, ScheduleRecord,
			ShiftWindow,
		},
	};

	fn record(id: &str, kind: RecordKind) -> ScheduleRecord {
		ScheduleRecord::new(
			RecordId::from(id),
			CaregiverId::from("cg-1"),
			ClientId::from("cl-1"),
			kind,
			ShiftWindow::new(time!(09:00), time!(13:00)).expect("Valid window."),
		)
		.expect("Valid record.")
	}

	fn biweekly_monday() -> ScheduleRecord {
		record(
			"bw",
			RecordKind::Recurring(Recurrence {
				day_of_week: Weekday::Monday,
				cadence: Cadence::Biweekly { anchor_week_start: date!(2024 - 01 - 07) },
				effective_from: date!(2024 - 01 - 01),
			}),
		)
	}

	#[test]
	fn biweekly_alternates_from_anchor_week() {
		let records = vec![biweekly_monday()];
		let opts = ResolveOptions::default();

		assert_eq!(resolve_for_date(&records, date!(2024 - 01 - 08), opts).len(), 1);
		assert_eq!(resolve_for_date(&records, date!(2024 - 01 - 15), opts).len(), 0);
		assert_eq!(resolve_for_date(&records, date!(2024 - 01 - 22), opts).len(), 1);
	}

	#[test]
	fn effective_date_is_checked_before_parity() {
		let records = vec![record(
			"late",
			RecordKind::Recurring(Recurrence {
				day_of_week: Weekday::Monday,
				cadence: Cadence::Biweekly { anchor_week_start: date!(2023 - 12 - 24) },
				effective_from: date!(2024 - 01 - 10),
			}),
		)];
		let opts = ResolveOptions::default();

		// 2024-01-08 falls in an "on" week but precedes the effective date.
		assert!(resolve_for_date(&records, date!(2024 - 01 - 08), opts).is_empty());
		assert!(resolve_for_date(&records, date!(2024 - 01 - 15), opts).is_empty());
		assert_eq!(resolve_for_date(&records, date!(2024 - 01 - 22), opts).len(), 1);
	}

	#[test]
	fn inactive_records_need_explicit_opt_in() {
		let records = vec![
			record("paused", RecordKind::OneTime { date: date!(2024 - 03 - 05) }).with_active(false),
		];

		assert!(resolve_for_date(&records, date!(2024 - 03 - 05), ResolveOptions::active_only())
			.is_empty());
		assert_eq!(
			resolve_for_date(&records, date!(2024 - 03 - 05), ResolveOptions::with_inactive())
				.len(),
			1
		);
	}

	#[test]
	fn range_is_date_ordered_then_input_ordered() {
		let records = vec![
			record("one-off", RecordKind::OneTime { date: date!(2024 - 01 - 22) }),
			biweekly_monday(),
		];
		let occurrences = resolve_for_range(
			&records,
			date!(2024 - 01 - 07),
			date!(2024 - 01 - 27),
			ResolveOptions::default(),
		)
		.expect("Valid range.");
		let summary: Vec<_> = occurrences
			.iter()
			.map(|occurrence| (occurrence.date, occurrence.source_record_id.as_str()))
			.collect();

		assert_eq!(
			summary,
			vec![
				(date!(2024 - 01 - 08), "bw"),
				(date!(2024 - 01 - 22), "one-off"),
				(date!(2024 - 01 - 22), "bw"),
			]
		);
	}

	#[test]
	fn inverted_range_is_rejected() {
		let err =
			resolve_for_range(&[], date!(2024 - 01 - 08), date!(2024 - 01 - 07), Default::default())
				.expect_err("Inverted range must fail.");

		assert_eq!(
			err,
			Error::InvalidRange { start: date!(2024 - 01 - 08), end: date!(2024 - 01 - 07) }
		);
	}

	#[test]
	fn single_day_range_matches_date_resolution() {
		let records = vec![biweekly_monday()];
		let day = date!(2024 - 01 - 08);

		assert_eq!(
			resolve_for_range(&records, day, day, ResolveOptions::default())
				.expect("Valid range."),
			resolve_for_date(&records, day, ResolveOptions::default())
		);
	}
}
