pub mod conflicts;
pub mod ingest;
pub mod resolve;
pub mod snapshot;
pub mod workload;

mod error;

pub use error::{Error, Result};
pub use ingest::{IngestReport, RejectedRecord};
pub use workload::WorkloadSummary;

use std::sync::Arc;

use time::{Date, OffsetDateTime};

use carerota_config::Config;
use carerota_domain::{Clock, FixedClock, ResolveOptions};

/// Reads the host's local calendar date, falling back to UTC when the local offset is unknown.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn today(&self) -> Date {
		OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()).date()
	}
}

/// Entry point for schedule resolution, conflict detection and workload queries.
///
/// Every query works on a caller-supplied snapshot of validated records and holds no state of
/// its own besides configuration and the clock.
pub struct ScheduleService {
	pub cfg: Config,
	clock: Arc<dyn Clock>,
}
impl ScheduleService {
	/// Uses the system clock unless `clock.fixed_today` pins the date.
	pub fn new(cfg: Config) -> Self {
		let clock: Arc<dyn Clock> = match carerota_config::fixed_today(&cfg) {
			Some(today) => Arc::new(FixedClock(today)),
			None => Arc::new(SystemClock),
		};

		Self { cfg, clock }
	}

	pub fn with_clock(cfg: Config, clock: Arc<dyn Clock>) -> Self {
		Self { cfg, clock }
	}

	pub fn today(&self) -> Date {
		self.clock.today()
	}

	/// Options applied when a caller does not pass its own.
	pub fn default_options(&self) -> ResolveOptions {
		ResolveOptions { include_inactive: self.cfg.resolution.include_inactive }
	}
}
