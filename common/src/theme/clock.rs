use std::{fmt::Debug, sync::Arc};

use chrono::{Datelike, Local, NaiveDate, Utc};

use api::theme::MonthDay;

use crate::{config::ClockSource, server::ThemeConfig};

// time provider
//
// the resolver never reads the wall clock directly, so that tests and
// previews can decide what "today" is
pub trait Clock: Debug + Send + Sync {
    fn today(&self) -> MonthDay;
}

pub fn month_day<D: Datelike>(date: &D) -> MonthDay {
    MonthDay::new(date.month(), date.day())
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> MonthDay {
        month_day(&Local::now().date_naive())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UtcClock;

impl Clock for UtcClock {
    fn today(&self) -> MonthDay {
        month_day(&Utc::now().date_naive())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> MonthDay {
        month_day(&self.0)
    }
}

// a pinned date wins over the configured source
pub fn clock_for(config: &ThemeConfig) -> Arc<dyn Clock> {
    match (config.pin_date, &config.clock) {
        (Some(date), _) => Arc::new(FixedClock(date)),
        (None, ClockSource::Local) => Arc::new(LocalClock),
        (None, ClockSource::Utc) => Arc::new(UtcClock),
    }
}
