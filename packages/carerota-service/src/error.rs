pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Domain(#[from] carerota_domain::Error),
	#[error("Range of {days} days exceeds the configured maximum of {max} days.")]
	RangeTooLarge { days: i64, max: u32 },
	#[error("Failed to read record snapshot at {path:?}.")]
	ReadSnapshot { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to parse record snapshot: {source}")]
	ParseSnapshot { source: serde_json::Error },
}
