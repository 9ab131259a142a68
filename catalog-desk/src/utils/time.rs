//! 时间工具函数 — 可注入时钟
//!
//! Validation needs "today" and the notifier needs deadlines, so both read
//! time through [`Clock`] instead of calling `Local::now()` directly.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone};
use std::cell::Cell;
use std::rc::Rc;

/// Source of the current local time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    /// Local calendar date
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Unix millis
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Manually driven clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Rc<Cell<DateTime<Local>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    /// Noon of `date`, local time
    ///
    /// DST gap fallback: if the local time does not exist, the same wall
    /// time in UTC is used.
    pub fn at_date(date: NaiveDate) -> Self {
        let naive = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
        let now = Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap_or_else(|| naive.and_utc().with_timezone(&Local));
        Self::new(now)
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: DateTime<Local>) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.now.get()
    }
}

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// 日期是否在 `today` 之后
pub fn is_future(date: NaiveDate, today: NaiveDate) -> bool {
    date > today
}
