use carerota_domain::{RawScheduleRecord, RecordId, ScheduleRecord};

use crate::{Result, ScheduleService};

#[derive(Debug)]
pub struct RejectedRecord {
	pub record_id: RecordId,
	pub error: carerota_domain::Error,
}

#[derive(Debug, Default)]
pub struct IngestReport {
	pub records: Vec<ScheduleRecord>,
	pub rejected: Vec<RejectedRecord>,
}

impl ScheduleService {
	/// Validates a raw batch from the storage collaborator.
	///
	/// In lenient mode an invalid record is reported and skipped while the rest of the batch is
	/// kept. With `ingest.strict_batch` the first invalid record fails the whole call.
	pub fn ingest(&self, raw_records: Vec<RawScheduleRecord>) -> Result<IngestReport> {
		let strict = self.cfg.ingest.strict_batch;
		let mut report = IngestReport::default();

		for raw in raw_records {
			let record_id = raw.id.clone();

			match ScheduleRecord::from_raw(raw) {
				Ok(record) => report.records.push(record),
				Err(err) if strict => {
					tracing::info!(
						record_id = %record_id,
						error = %err,
						"Strict ingest aborted on invalid schedule record."
					);

					return Err(err.into());
				},
				Err(err) => {
					tracing::warn!(
						record_id = %record_id,
						error = %err,
						"Skipping invalid schedule record."
					);

					report.rejected.push(RejectedRecord { record_id, error: err });
				},
			}
		}

		tracing::debug!(
			accepted = report.records.len(),
			rejected = report.rejected.len(),
			"Ingested schedule records."
		);

		Ok(report)
	}
}
