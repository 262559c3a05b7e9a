mod error;

pub use error::{Error, Result};

use std::{path::Path, sync::Mutex};

use time::{Date, Duration};

use carerota_config::Config;
use carerota_domain::{CaregiverId, ClientId, Clock, RawScheduleRecord, RecordId, ScheduleRecord};

const SAMPLE_CONFIG_TOML: &str = r#"
[service]
log_level = "debug"

[resolution]
include_inactive = false
max_range_days = 366

[ingest]
strict_batch = false
"#;

/// A clock tests can move forward or back between calls.
pub struct ManualClock {
	today: Mutex<Date>,
}
impl ManualClock {
	pub fn new(today: Date) -> Self {
		Self { today: Mutex::new(today) }
	}

	pub fn set(&self, today: Date) {
		*self.today.lock().unwrap_or_else(|err| err.into_inner()) = today;
	}

	pub fn advance_days(&self, days: i64) {
		let mut today = self.today.lock().unwrap_or_else(|err| err.into_inner());

		*today += Duration::days(days);
	}
}
impl Clock for ManualClock {
	fn today(&self) -> Date {
		*self.today.lock().unwrap_or_else(|err| err.into_inner())
	}
}

/// Fluent builder for schedule records in the raw wire shape.
///
/// Defaults to caregiver `cg-1`, client `cl-1` and a 09:00 to 13:00 window.
#[derive(Clone, Debug)]
pub struct RecordBuilder {
	raw: RawScheduleRecord,
}
impl RecordBuilder {
	pub fn one_time(id: &str, date: &str) -> Self {
		Self::base(id).with(|raw| raw.date = Some(date.to_string()))
	}

	pub fn weekly(id: &str, day_of_week: i64, effective_from: &str) -> Self {
		Self::base(id).with(|raw| {
			raw.day_of_week = Some(day_of_week);
			raw.frequency = Some("weekly".to_string());
			raw.effective_from = Some(effective_from.to_string());
		})
	}

	pub fn biweekly(id: &str, day_of_week: i64, effective_from: &str, anchor: &str) -> Self {
		Self::base(id).with(|raw| {
			raw.day_of_week = Some(day_of_week);
			raw.frequency = Some("biweekly".to_string());
			raw.effective_from = Some(effective_from.to_string());
			raw.anchor_week_start = Some(anchor.to_string());
		})
	}

	pub fn caregiver(self, caregiver_id: &str) -> Self {
		self.with(|raw| raw.caregiver_id = CaregiverId::from(caregiver_id))
	}

	pub fn client(self, client_id: &str) -> Self {
		self.with(|raw| raw.client_id = ClientId::from(client_id))
	}

	pub fn times(self, start: &str, end: &str) -> Self {
		self.with(|raw| {
			raw.start_time = start.to_string();
			raw.end_time = end.to_string();
		})
	}

	pub fn inactive(self) -> Self {
		self.with(|raw| raw.is_active = Some(false))
	}

	pub fn notes(self, notes: &str) -> Self {
		self.with(|raw| raw.notes = Some(notes.to_string()))
	}

	/// Escape hatch for shaping invalid records.
	pub fn with(mut self, edit: impl FnOnce(&mut RawScheduleRecord)) -> Self {
		edit(&mut self.raw);

		self
	}

	pub fn raw(self) -> RawScheduleRecord {
		self.raw
	}

	pub fn build(self) -> Result<ScheduleRecord> {
		Ok(ScheduleRecord::from_raw(self.raw)?)
	}

	fn base(id: &str) -> Self {
		Self {
			raw: RawScheduleRecord {
				id: RecordId::from(id),
				caregiver_id: CaregiverId::from("cg-1"),
				client_id: ClientId::from("cl-1"),
				start_time: "09:00".to_string(),
				end_time: "13:00".to_string(),
				..Default::default()
			},
		}
	}
}

/// Builds every record, failing on the first invalid one.
pub fn build_all(builders: impl IntoIterator<Item = RecordBuilder>) -> Result<Vec<ScheduleRecord>> {
	builders.into_iter().map(RecordBuilder::build).collect()
}

/// A valid configuration with default policies and `debug` logging.
pub fn sample_config() -> Result<Config> {
	Ok(carerota_config::parse(Path::new("testkit.toml"), SAMPLE_CONFIG_TOML)?)
}

/// [`sample_config`] with one edit applied before use.
pub fn sample_config_with(edit: impl FnOnce(&mut Config)) -> Result<Config> {
	let mut cfg = sample_config()?;

	edit(&mut cfg);
	carerota_config::validate(&cfg)?;

	Ok(cfg)
}
