// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Serenade-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Serenade and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Countdown to the next occurrence of a fixed calendar date.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use crate::config::{TARGET_DAY, TARGET_MONTH};

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Gap between two February 29ths across a skipped century leap year.
const MAX_YEARS_BETWEEN_OCCURRENCES: i32 = 8;

/// The instant the countdown runs towards. Fixed for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTarget {
    at: DateTime<Utc>,
}

impl CountdownTarget {
    /// Midnight of `month`/`day` in `now`'s timezone, this year or, if that instant has already
    /// passed, the next year that has the date (February 29th skips to the next leap year).
    ///
    /// Returns `None` for a date that no year has, such as February 30th.
    pub fn next_occurrence<Tz: TimeZone>(
        now: &DateTime<Tz>,
        month: u32,
        day: u32,
    ) -> Option<Self> {
        let zone = now.timezone();
        let year = now.year();
        let now = now.with_timezone(&Utc);
        (year..=year + MAX_YEARS_BETWEEN_OCCURRENCES)
            .filter_map(|year| local_midnight(&zone, year, month, day))
            .find(|at| *at >= now)
            .map(|at| Self { at })
    }

    /// Next February 14th.
    pub fn valentines<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        // February 14th exists in every year.
        Self::next_occurrence(now, TARGET_MONTH, TARGET_DAY)
            .unwrap_or_else(|| Self { at: now.with_timezone(&Utc) })
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    /// Milliseconds left until the target; negative once it has passed.
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        (self.at - now).num_milliseconds()
    }
}

fn local_midnight<Tz: TimeZone>(
    zone: &Tz,
    year: i32,
    month: u32,
    day: u32,
) -> Option<DateTime<Utc>> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    let at = zone
        .from_local_datetime(&naive)
        .earliest()
        .map(|at| at.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive));
    Some(at)
}

/// Time remaining, split into calendar-free units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Decomposes a millisecond distance. Negative distances collapse to zero.
    pub fn from_millis(distance: i64) -> Self {
        if distance < 0 {
            return Self::default();
        }
        Self {
            days: distance / MS_PER_DAY,
            hours: (distance % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (distance % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (distance % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

/// The four zero-padded countdown fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownDisplay {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl CountdownDisplay {
    pub fn zero() -> Self {
        Self::from(Remaining::default())
    }

    pub fn fields(&self) -> [&str; 4] {
        [&self.days, &self.hours, &self.minutes, &self.seconds]
    }
}

impl Default for CountdownDisplay {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Remaining> for CountdownDisplay {
    fn from(value: Remaining) -> Self {
        Self {
            days: pad2(value.days),
            hours: pad2(value.hours),
            minutes: pad2(value.minutes),
            seconds: pad2(value.seconds),
        }
    }
}

impl fmt::Display for CountdownDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d {}h {}m {}s", self.days, self.hours, self.minutes, self.seconds)
    }
}

fn pad2(value: i64) -> String {
    format!("{value:02}")
}

/// One countdown evaluation.
pub fn tick(target: &CountdownTarget, now: DateTime<Utc>) -> CountdownDisplay {
    let distance = target.remaining_ms(now);
    if distance < 0 {
        return CountdownDisplay::zero();
    }
    Remaining::from_millis(distance).into()
}
