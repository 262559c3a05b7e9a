//! Week arithmetic on naive calendar dates. Weeks start on Sunday.

use time::{Date, Duration, Weekday};

pub fn weekday_from_index(index: i64) -> Option<Weekday> {
	u8::try_from(index).ok().filter(|index| *index <= 6).map(|index| Weekday::Sunday.nth_next(index))
}

pub fn weekday_index(weekday: Weekday) -> u8 {
	weekday.number_days_from_sunday()
}

/// The Sunday on or before `date`, clamped to [`Date::MIN`] in the first calendar week.
pub fn week_start_of(date: Date) -> Date {
	date.checked_sub(Duration::days(days_from_sunday(date))).unwrap_or(Date::MIN)
}

/// The Saturday on or after `date`, clamped to [`Date::MAX`] in the last calendar week.
pub fn week_end_of(date: Date) -> Date {
	date.checked_add(Duration::days(6 - days_from_sunday(date))).unwrap_or(Date::MAX)
}

/// Whole weeks from the week containing `from` to the week containing `to`.
///
/// Negative when `to` falls in an earlier week. The difference is floored, so parity stays
/// symmetric around `from`.
pub fn weeks_between(from: Date, to: Date) -> i64 {
	week_number(to) - week_number(from)
}

/// Whether the weeks containing `a` and `b` are an even number of weeks apart.
pub fn same_parity(a: Date, b: Date) -> bool {
	weeks_between(a, b).rem_euclid(2) == 0
}

/// Every date in `[start, end]`, ascending. Empty when `end < start`.
pub fn dates_inclusive(start: Date, end: Date) -> impl Iterator<Item = Date> {
	std::iter::successors(Some(start), move |day| day.next_day().filter(|next| *next <= end))
		.take_while(move |day| *day <= end)
}

/// Sunday through Saturday of the week containing `date`, cut short at the calendar limits.
pub fn week_of(date: Date) -> impl Iterator<Item = Date> {
	dates_inclusive(week_start_of(date), week_end_of(date))
}

fn days_from_sunday(date: Date) -> i64 {
	i64::from(date.weekday().number_days_from_sunday())
}

/// Sunday-based week count since the Julian epoch, which began on a Monday.
fn week_number(date: Date) -> i64 {
	(i64::from(date.to_julian_day()) + 1).div_euclid(7)
}
