//! The daily calendar and its demand factor tables.
//!
//! Pure lookup data: the inclusive day sequence for the run plus the
//! month and weekday demand multipliers. No randomness, no I/O.

use crate::config::GenConfig;
use crate::error::{GenError, GenResult};
use chrono::{Datelike, NaiveDate};

pub struct Calendar {
    days: Vec<NaiveDate>,
    month_multipliers: [f64; 12],
    weekday_multipliers: [f64; 7],
}

impl Calendar {
    pub fn new(config: &GenConfig) -> GenResult<Self> {
        if config.end_date < config.start_date {
            return Err(GenError::InvalidConfig {
                reason: format!(
                    "calendar range {}..{} is reversed",
                    config.start_date, config.end_date
                ),
            });
        }
        let days: Vec<NaiveDate> = config
            .start_date
            .iter_days()
            .take_while(|d| *d <= config.end_date)
            .collect();
        Ok(Self {
            days,
            month_multipliers: config.month_multipliers,
            weekday_multipliers: config.weekday_multipliers,
        })
    }

    /// Every day of the run, inclusive of both endpoints, in order.
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn month_multiplier(&self, date: NaiveDate) -> f64 {
        self.month_multipliers[date.month0() as usize]
    }

    /// Monday-first weekday indexing, matching the config table.
    pub fn weekday_multiplier(&self, date: NaiveDate) -> f64 {
        self.weekday_multipliers[date.weekday().num_days_from_monday() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_day_count() {
        let mut config = GenConfig::default_test();
        config.start_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        config.end_date = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        let calendar = Calendar::new(&config).unwrap();
        assert_eq!(calendar.len(), 31);
        assert_eq!(calendar.days()[0], config.start_date);
        assert_eq!(*calendar.days().last().unwrap(), config.end_date);
    }

    #[test]
    fn single_day_range_has_one_entry() {
        let mut config = GenConfig::default_test();
        config.end_date = config.start_date;
        let calendar = Calendar::new(&config).unwrap();
        assert_eq!(calendar.len(), 1);
    }

    #[test]
    fn factor_lookups_match_the_tables() {
        let config = GenConfig::default_run();
        let calendar = Calendar::new(&config).unwrap();
        // 2023-11-06 is a Monday in November.
        let date = NaiveDate::from_ymd_opt(2023, 11, 6).unwrap();
        assert_eq!(calendar.month_multiplier(date), 1.35);
        assert_eq!(calendar.weekday_multiplier(date), 1.0);
        // 2023-12-03 is a Sunday in December.
        let date = NaiveDate::from_ymd_opt(2023, 12, 3).unwrap();
        assert_eq!(calendar.month_multiplier(date), 1.5);
        assert_eq!(calendar.weekday_multiplier(date), 0.9);
    }
}
