//! Day, week, month and quarter boundaries plus period grouping.
//!
//! Boundary helpers work on any [`chrono::TimeZone`] and keep the input's
//! zone. Local midnight may not exist on DST transition days; in that case
//! the first valid instant of the day is used instead.

mod period;

pub use period::{Period, PeriodOptions, months_on_period, weeks_on_period};

use chrono::{
    DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Utc,
};

/// Midnight at the start of `t`'s day.
pub fn start_of_day<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    local_midnight(&t.timezone(), t.date_naive())
}

/// The last representable instant of `t`'s day, one nanosecond before the
/// next midnight.
pub fn end_of_day<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    tomorrow(t) - TimeDelta::nanoseconds(1)
}

/// Midnight at the start of the day after `t`.
pub fn tomorrow<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    local_midnight(&t.timezone(), next_day(t.date_naive()))
}

/// Start of the Monday of `t`'s week.
pub fn start_of_week<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    let date = t.date_naive();
    let back = Days::new(u64::from(date.weekday().num_days_from_monday()));
    local_midnight(&t.timezone(), date.checked_sub_days(back).unwrap_or(date))
}

/// End of the Sunday of `t`'s week.
pub fn end_of_week<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    let date = t.date_naive();
    let ahead = Days::new(u64::from(6 - date.weekday().num_days_from_monday()));
    let sunday = date.checked_add_days(ahead).unwrap_or(date);
    local_midnight(&t.timezone(), next_day(sunday)) - TimeDelta::nanoseconds(1)
}

/// Midnight on the first day of `t`'s month.
pub fn start_of_month<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    local_midnight(&t.timezone(), first_of_month(t.date_naive()))
}

/// End of the last day of `t`'s month.
pub fn end_of_month<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    let first = first_of_month(t.date_naive());
    let next = first.checked_add_months(Months::new(1)).unwrap_or(first);
    local_midnight(&t.timezone(), next) - TimeDelta::nanoseconds(1)
}

/// Midnight on the first day of `t`'s quarter.
pub fn start_of_quarter<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    local_midnight(&t.timezone(), first_of_quarter(t.date_naive()))
}

/// End of the last day of `t`'s quarter.
pub fn end_of_quarter<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    let first = first_of_quarter(t.date_naive());
    let next = first.checked_add_months(Months::new(3)).unwrap_or(first);
    local_midnight(&t.timezone(), next) - TimeDelta::nanoseconds(1)
}

/// ISO 8601 with a literal `Z`, after converting to UTC.
pub fn format_as_zulu<Tz: TimeZone>(t: &DateTime<Tz>) -> String {
    t.with_timezone(&Utc).format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Whole 24 hour periods between two instants, truncated towards zero.
pub fn days_between<Tz: TimeZone>(from: &DateTime<Tz>, to: &DateTime<Tz>) -> i64 {
    to.clone().signed_duration_since(from.clone()).num_days()
}

/// Milliseconds since the Unix epoch.
pub fn unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Whole 30 day months from `now` until `target`, never less than 1.
///
/// A day only counts once the same wall-clock time has been reached on it.
/// Targets in the past are not meaningful.
pub fn months_until<Tz: TimeZone>(now: &DateTime<Tz>, target: &DateTime<Tz>) -> i64 {
    let now_local = now.naive_local();
    let target_local = target.naive_local();

    let mut days = target_local
        .date()
        .signed_duration_since(now_local.date())
        .num_days();
    if now_local + TimeDelta::days(days) > target_local {
        days -= 1;
    }

    match days / 30 {
        0 => 1,
        months => months,
    }
}

const MINUTES_PER_DAY: i64 = 24 * 60;

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn first_of_quarter(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    let offset = first.month0() % 3;
    first.checked_sub_months(Months::new(offset)).unwrap_or(first)
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    if let Some(t) = tz.from_local_datetime(&midnight).earliest() {
        return t;
    }

    // Midnight fell into a gap. Find the first minute of the day that exists,
    // then walk back over its seconds to where the gap ends.
    let first_minute = (1..MINUTES_PER_DAY)
        .map(|m| midnight + TimeDelta::minutes(m))
        .find_map(|naive| Some((naive, tz.from_local_datetime(&naive).earliest()?)));

    match first_minute {
        Some((naive, mut first)) => {
            for s in 1..60 {
                match tz.from_local_datetime(&(naive - TimeDelta::seconds(s))).earliest() {
                    Some(t) => first = t,
                    None => break,
                }
            }
            first
        }
        // The whole day was skipped; use the offset in effect the day before.
        None => {
            let before = tz
                .offset_from_local_datetime(&(midnight - TimeDelta::days(1)))
                .earliest()
                .map_or(0, |offset| offset.fix().local_minus_utc());
            tz.from_utc_datetime(&(midnight - TimeDelta::seconds(i64::from(before))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        utc(y, m, d, 0, 0)
    }

    fn last_instant(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        day(y, m, d) + TimeDelta::days(1) - TimeDelta::nanoseconds(1)
    }

    #[test]
    fn test_start_and_end_of_day() {
        let t = utc(2016, 1, 13, 15, 42);
        assert_eq!(start_of_day(&t), day(2016, 1, 13));
        assert_eq!(end_of_day(&t), last_instant(2016, 1, 13));
        assert_eq!(tomorrow(&t), day(2016, 1, 14));
        assert_eq!(tomorrow(&day(2016, 12, 31)), day(2017, 1, 1));
    }

    #[test]
    fn test_start_of_month() {
        let cases = [
            (day(2016, 1, 13), day(2016, 1, 1)),
            (day(2016, 1, 1), day(2016, 1, 1)),
            (day(2016, 12, 30), day(2016, 12, 1)),
        ];
        for (input, want) in cases {
            assert_eq!(start_of_month(&input), want, "input {input}");
        }
    }

    #[test]
    fn test_end_of_month() {
        let cases = [
            (day(2016, 1, 1), last_instant(2016, 1, 31)),
            (day(2016, 1, 31), last_instant(2016, 1, 31)),
            (day(2016, 11, 1), last_instant(2016, 11, 30)),
            (day(2016, 12, 31), last_instant(2016, 12, 31)),
            (day(2012, 2, 1), last_instant(2012, 2, 29)),
            (day(2013, 2, 1), last_instant(2013, 2, 28)),
        ];
        for (input, want) in cases {
            assert_eq!(end_of_month(&input), want, "input {input}");
        }
    }

    #[test]
    fn test_week_boundaries() {
        // 2020-11-04 is a Wednesday.
        let t = utc(2020, 11, 4, 10, 0);
        assert_eq!(start_of_week(&t), day(2020, 11, 2));
        assert_eq!(end_of_week(&t), last_instant(2020, 11, 8));

        let sunday = utc(2020, 11, 8, 10, 0);
        assert_eq!(start_of_week(&sunday), day(2020, 11, 2));
        assert_eq!(end_of_week(&sunday), last_instant(2020, 11, 8));

        let monday = day(2020, 11, 2);
        assert_eq!(start_of_week(&monday), monday);
    }

    #[test]
    fn test_quarter_boundaries() {
        assert_eq!(start_of_quarter(&day(2020, 2, 15)), day(2020, 1, 1));
        assert_eq!(start_of_quarter(&day(2020, 6, 30)), day(2020, 4, 1));
        assert_eq!(start_of_quarter(&day(2020, 10, 1)), day(2020, 10, 1));
        assert_eq!(end_of_quarter(&day(2020, 2, 15)), last_instant(2020, 3, 31));
        assert_eq!(end_of_quarter(&day(2020, 12, 1)), last_instant(2020, 12, 31));
    }

    #[test]
    fn test_boundaries_keep_timezone() {
        let tz = FixedOffset::east_opt(5 * 3600).unwrap();
        let t = tz.with_ymd_and_hms(2021, 3, 10, 2, 30, 0).unwrap();
        let start = start_of_day(&t);
        assert_eq!(start.offset(), &tz);
        assert_eq!(start.hour(), 0);
        assert_eq!(start.day(), 10);
        assert_eq!(format_as_zulu(&start), "2021-03-09T19:00:00Z");
    }

    // Midnight does not exist on these days: clocks jump from 00:00 to 01:00.
    #[test]
    fn test_day_boundaries_in_dst_gap() {
        use chrono_tz::America::Sao_Paulo;
        use chrono_tz::Asia::Beirut;

        let t = Beirut.with_ymd_and_hms(2022, 3, 27, 12, 0, 0).unwrap();
        let start = start_of_day(&t);
        assert_eq!(start, utc(2022, 3, 26, 22, 0));
        assert_eq!((start.day(), start.hour()), (27, 1));

        let saturday = Beirut.with_ymd_and_hms(2022, 3, 26, 12, 0, 0).unwrap();
        assert_eq!(tomorrow(&saturday), start);
        let end = end_of_day(&saturday);
        assert_eq!(end, start - TimeDelta::nanoseconds(1));
        assert_eq!((end.day(), end.hour()), (26, 23));

        let t = Sao_Paulo.with_ymd_and_hms(2018, 11, 4, 12, 0, 0).unwrap();
        let start = start_of_day(&t);
        assert_eq!(start, utc(2018, 11, 4, 3, 0));
        assert_eq!((start.day(), start.hour()), (4, 1));
    }

    #[test]
    fn test_week_boundaries_in_dst_gap() {
        use chrono_tz::Asia::Tehran;

        // 2021-03-22 is a Monday.
        let monday = utc(2021, 3, 21, 20, 30);

        let t = Tehran.with_ymd_and_hms(2021, 3, 24, 12, 0, 0).unwrap();
        let start = start_of_week(&t);
        assert_eq!(start, monday);
        assert_eq!((start.day(), start.hour()), (22, 1));

        let previous = Tehran.with_ymd_and_hms(2021, 3, 17, 12, 0, 0).unwrap();
        let end = end_of_week(&previous);
        assert_eq!(end, monday - TimeDelta::nanoseconds(1));
        assert_eq!(end.day(), 21);
    }

    #[test]
    fn test_month_and_quarter_boundaries_in_dst_gap() {
        use chrono_tz::America::Asuncion;

        let first = utc(2017, 10, 1, 4, 0);

        let t = Asuncion.with_ymd_and_hms(2017, 11, 15, 12, 0, 0).unwrap();
        let start = start_of_quarter(&t);
        assert_eq!(start, first);
        assert_eq!((start.month(), start.day(), start.hour()), (10, 1, 1));

        let t = Asuncion.with_ymd_and_hms(2017, 10, 15, 12, 0, 0).unwrap();
        assert_eq!(start_of_month(&t), first);

        let t = Asuncion.with_ymd_and_hms(2017, 9, 10, 12, 0, 0).unwrap();
        let end = end_of_month(&t);
        assert_eq!(end, first - TimeDelta::nanoseconds(1));
        assert_eq!((end.month(), end.day()), (9, 30));

        let t = Asuncion.with_ymd_and_hms(2017, 8, 1, 12, 0, 0).unwrap();
        assert_eq!(end_of_quarter(&t), first - TimeDelta::nanoseconds(1));
    }

    #[test]
    fn test_format_as_zulu() {
        assert_eq!(format_as_zulu(&utc(2019, 4, 1, 13, 5)), "2019-04-01T13:05:00Z");
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(&day(2020, 1, 1), &day(2020, 1, 31)), 30);
        assert_eq!(days_between(&day(2020, 1, 1), &utc(2020, 1, 2, 23, 0)), 1);
        assert_eq!(days_between(&day(2020, 1, 31), &day(2020, 1, 1)), -30);
    }

    #[test]
    fn test_unix_millis() {
        let before = Utc::now().timestamp_millis();
        let got = unix_millis();
        assert!(got >= before);
    }

    #[test]
    fn test_months_until() {
        let now = utc(2021, 6, 15, 12, 0);
        let cases = [
            (now, 1),
            (now + TimeDelta::days(35), 1),
            (now + TimeDelta::days(65), 2),
            (now + TimeDelta::days(370), 12),
        ];
        for (target, want) in cases {
            assert_eq!(months_until(&now, &target), want, "target {target}");
        }
    }

    #[test]
    fn test_months_until_counts_whole_days() {
        let now = utc(2021, 1, 1, 12, 0);
        assert_eq!(months_until(&now, &utc(2021, 3, 2, 12, 0)), 2);
        assert_eq!(months_until(&now, &utc(2021, 3, 2, 11, 0)), 1);
    }
}
