//! Time source for receipt stamps.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

/// Provides the current time and the human-readable date printed on receipts.
pub trait Clock {
    /// Current time in epoch milliseconds.
    fn now_millis(&self) -> i64;

    /// Localized date label for a timestamp.
    fn date_label(&self, millis: i64) -> String;
}

/// Wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn date_label(&self, millis: i64) -> String {
        let date = Local
            .timestamp_millis_opt(millis)
            .single()
            .map(|dt| dt.date_naive())
            .unwrap_or_default();
        format_date_pt_br(date)
    }
}

/// Settable clock in UTC, for tests and replays.
#[derive(Debug, Default)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    pub fn new(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    /// Move the clock to an absolute time.
    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    /// Move the clock forward.
    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }

    fn date_label(&self, millis: i64) -> String {
        let date = DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|dt| dt.date_naive())
            .unwrap_or_default();
        format_date_pt_br(date)
    }
}

/// Long Brazilian Portuguese date, e.g. "19 de outubro de 2026".
pub fn format_date_pt_br(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        MONTHS_PT_BR[date.month0() as usize],
        date.year()
    )
}
