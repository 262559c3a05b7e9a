use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub resolution: Resolution,
	#[serde(default)]
	pub ingest: Ingest,
	#[serde(default)]
	pub clock: Clock,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Resolution {
	/// Default for the per-call flag that lets paused or deleted records resolve.
	pub include_inactive: bool,
	/// Longest inclusive date range a single range query may cover.
	pub max_range_days: u32,
}
impl Default for Resolution {
	fn default() -> Self {
		Self { include_inactive: false, max_range_days: 366 }
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Ingest {
	/// Abort the whole batch on the first invalid record instead of skipping it.
	pub strict_batch: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Clock {
	/// Optional. Pins "today" to a `YYYY-MM-DD` date for reproducible reports.
	pub fixed_today: Option<String>,
}
