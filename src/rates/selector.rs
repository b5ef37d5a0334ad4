use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::{
    error::{NotFoundError, Result},
    models::ExchangeRateRecord,
};

/// Oldest record still usable for a date, roughly six months.
pub const MAX_WINDOW_DAYS: i64 = 182;

pub const EFFECTIVE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Start of `date` in UTC, the instant an effective date takes effect.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Picks the record whose effective date (midnight UTC) is the latest one
/// strictly before `target` and at most [`MAX_WINDOW_DAYS`] away from it.
/// Records whose date does not parse are skipped. Equally distant records
/// resolve to the first one.
pub fn select_closest(
    records: &[ExchangeRateRecord],
    target: DateTime<Utc>,
) -> Result<&ExchangeRateRecord> {
    let max_window = TimeDelta::days(MAX_WINDOW_DAYS);
    let mut closest: Option<(TimeDelta, &ExchangeRateRecord)> = None;

    for record in records {
        let date = match NaiveDate::parse_from_str(&record.effective_date, EFFECTIVE_DATE_FORMAT) {
            Ok(d) => start_of_day(d),
            Err(err) => {
                log::debug!(
                    "skipping rate record with effective date '{}': {}",
                    record.effective_date,
                    err
                );
                continue;
            }
        };

        if date >= target {
            continue;
        }

        let diff = target - date;
        if diff > max_window {
            continue;
        }

        if closest.map_or(true, |(best, _)| diff < best) {
            closest = Some((diff, record));
        }
    }

    closest
        .map(|(_, record)| record)
        .ok_or_else(|| NotFoundError::RateRecord.into())
}
