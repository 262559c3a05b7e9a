//! Loading record snapshots exported by the scheduling API.

use std::{fs, path::Path};

use carerota_domain::RawScheduleRecord;

use crate::{Error, Result};

pub fn load_snapshot(path: &Path) -> Result<Vec<RawScheduleRecord>> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadSnapshot { path: path.to_path_buf(), source: err })?;

	parse_snapshot(&raw)
}

/// Accepts either a bare JSON array of records or an object with a `records` array.
pub fn parse_snapshot(raw: &str) -> Result<Vec<RawScheduleRecord>> {
	#[derive(serde::Deserialize)]
	#[serde(untagged)]
	enum Snapshot {
		Bare(Vec<RawScheduleRecord>),
		Wrapped { records: Vec<RawScheduleRecord> },
	}

	let snapshot: Snapshot =
		serde_json::from_str(raw).map_err(|err| Error::ParseSnapshot { source: err })?;

	Ok(match snapshot {
		Snapshot::Bare(records) | Snapshot::Wrapped { records } => records,
	})
}
