use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Every day in the period, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |day| *day <= self.end)
    }

    /// True when every day of the period falls on a Saturday or Sunday.
    pub fn is_weekend_only(&self) -> bool {
        self.days()
            .all(|day| matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
    }
}

/// How [`weeks_on_period`] and [`months_on_period`] cut a range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodOptions {
    /// Weeks run Sunday to Saturday instead of Monday to Sunday.
    pub week_starts_on_sunday: bool,
    /// Drop pieces that contain nothing but weekend days.
    pub ignore_weekend_only_periods: bool,
}

impl PeriodOptions {
    pub fn week_starts_on_sunday(mut self, enabled: bool) -> Self {
        self.week_starts_on_sunday = enabled;
        self
    }

    pub fn ignore_weekend_only_periods(mut self, enabled: bool) -> Self {
        self.ignore_weekend_only_periods = enabled;
        self
    }

    fn last_weekday(&self) -> Weekday {
        if self.week_starts_on_sunday {
            Weekday::Sat
        } else {
            Weekday::Sun
        }
    }
}

/// Split `period` into calendar weeks. The first and last weeks are clipped
/// to the period.
pub fn weeks_on_period(period: Period, opts: PeriodOptions) -> Vec<Period> {
    let last = opts.last_weekday();
    split(period, opts, |day| {
        let ahead = (7 + last.num_days_from_monday() - day.weekday().num_days_from_monday()) % 7;
        day.checked_add_days(Days::new(u64::from(ahead)))
    })
}

/// Split `period` into calendar months. The first and last months are
/// clipped to the period.
pub fn months_on_period(period: Period, opts: PeriodOptions) -> Vec<Period> {
    split(period, opts, |day| {
        day.with_day(1)?
            .checked_add_months(Months::new(1))?
            .pred_opt()
    })
}

fn split<F>(period: Period, opts: PeriodOptions, piece_end: F) -> Vec<Period>
where
    F: Fn(NaiveDate) -> Option<NaiveDate>,
{
    let mut pieces = Vec::new();
    let mut cursor = period.start;

    while cursor <= period.end {
        let end = piece_end(cursor).map_or(period.end, |end| end.min(period.end));
        let piece = Period::new(cursor, end);
        if !(opts.ignore_weekend_only_periods && piece.is_weekend_only()) {
            pieces.push(piece);
        }

        match end.succ_opt() {
            Some(next) => cursor = next,
            None => break,
        }
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn render(pieces: &[Period]) -> Vec<String> {
        pieces
            .iter()
            .map(|p| format!("{}:{}", p.start.format("%Y-%m-%d"), p.end.format("%Y-%m-%d")))
            .collect()
    }

    fn nov_to_dec() -> Period {
        Period::new(date(2020, 11, 1), date(2020, 12, 11))
    }

    #[test]
    fn test_weeks_on_period() {
        let got = weeks_on_period(nov_to_dec(), PeriodOptions::default());
        assert_eq!(
            render(&got),
            vec![
                "2020-11-01:2020-11-01",
                "2020-11-02:2020-11-08",
                "2020-11-09:2020-11-15",
                "2020-11-16:2020-11-22",
                "2020-11-23:2020-11-29",
                "2020-11-30:2020-12-06",
                "2020-12-07:2020-12-11",
            ]
        );
    }

    #[test]
    fn test_weeks_on_period_ignoring_weekend_only() {
        let opts = PeriodOptions::default().ignore_weekend_only_periods(true);
        let got = weeks_on_period(nov_to_dec(), opts);
        assert_eq!(
            render(&got),
            vec![
                "2020-11-02:2020-11-08",
                "2020-11-09:2020-11-15",
                "2020-11-16:2020-11-22",
                "2020-11-23:2020-11-29",
                "2020-11-30:2020-12-06",
                "2020-12-07:2020-12-11",
            ]
        );
    }

    #[test]
    fn test_weeks_on_period_starting_sunday() {
        let opts = PeriodOptions::default().week_starts_on_sunday(true);
        let got = weeks_on_period(nov_to_dec(), opts);
        assert_eq!(
            render(&got),
            vec![
                "2020-11-01:2020-11-07",
                "2020-11-08:2020-11-14",
                "2020-11-15:2020-11-21",
                "2020-11-22:2020-11-28",
                "2020-11-29:2020-12-05",
                "2020-12-06:2020-12-11",
            ]
        );
    }

    #[test]
    fn test_months_on_period() {
        let period = Period::new(date(2020, 10, 13), date(2020, 12, 11));
        let got = months_on_period(period, PeriodOptions::default());
        assert_eq!(
            render(&got),
            vec![
                "2020-10-13:2020-10-31",
                "2020-11-01:2020-11-30",
                "2020-12-01:2020-12-11",
            ]
        );
    }

    #[test]
    fn test_months_on_period_ignoring_weekend_only() {
        let period = Period::new(date(2020, 10, 31), date(2020, 12, 11));
        let opts = PeriodOptions::default().ignore_weekend_only_periods(true);
        let got = months_on_period(period, opts);
        assert_eq!(
            render(&got),
            vec!["2020-11-01:2020-11-30", "2020-12-01:2020-12-11"]
        );
    }

    #[test]
    fn test_inverted_period_is_empty() {
        let period = Period::new(date(2020, 12, 11), date(2020, 11, 1));
        assert!(weeks_on_period(period, PeriodOptions::default()).is_empty());
        assert!(months_on_period(period, PeriodOptions::default()).is_empty());
    }

    #[test]
    fn test_single_day_period() {
        let period = Period::new(date(2020, 11, 4), date(2020, 11, 4));
        assert_eq!(weeks_on_period(period, PeriodOptions::default()), vec![period]);
        assert_eq!(months_on_period(period, PeriodOptions::default()), vec![period]);
    }

    #[test]
    fn test_is_weekend_only() {
        assert!(Period::new(date(2020, 11, 7), date(2020, 11, 8)).is_weekend_only());
        assert!(!Period::new(date(2020, 11, 6), date(2020, 11, 7)).is_weekend_only());
        assert_eq!(Period::new(date(2020, 11, 1), date(2020, 11, 7)).days().count(), 7);
    }
}
