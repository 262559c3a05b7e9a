use time::Date;

/// Source of "today" for date-relative queries. Implementations must be cheap to call.
pub trait Clock
where
	Self: Send + Sync,
{
	fn today(&self) -> Date;
}

/// A clock pinned to one date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub Date);
impl Clock for FixedClock {
	fn today(&self) -> Date {
		self.0
	}
}
