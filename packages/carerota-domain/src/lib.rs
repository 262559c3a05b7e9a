pub mod calendar;
pub mod clock;
pub mod conflict;
pub mod occurrence;
pub mod record;
pub mod resolve;
pub mod time_serde;
pub mod workload;

mod error;

pub use clock::{Clock, FixedClock};
pub use conflict::{CandidateConflict, ConflictPair, OccurrenceConflict};
pub use error::{Error, InvalidReason, Result};
pub use occurrence::Occurrence;
pub use record::{
	Cadence, CaregiverId, ClientId, Frequency, RawScheduleRecord, RecordId, RecordKind,
	Recurrence, ScheduleRecord, ShiftWindow,
};
pub use resolve::ResolveOptions;
