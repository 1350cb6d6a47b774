use crate::{days::DayOfWeek, error::ValidationError};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A weekly class meeting spanning the closed period range `start..=end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClassPeriod {
    day_of_week: DayOfWeek,
    start_period: i32,
    end_period: i32,
}

impl ClassPeriod {
    pub fn new(
        day_of_week: DayOfWeek,
        start_period: i32,
        end_period: i32,
    ) -> Result<Self, ValidationError> {
        if start_period < 0 || end_period < 0 || start_period > end_period {
            return Err(ValidationError::InvalidPeriodRange {
                start: start_period,
                end: end_period,
            });
        }

        Ok(Self {
            day_of_week,
            start_period,
            end_period,
        })
    }

    pub fn day_of_week(&self) -> DayOfWeek {
        self.day_of_week
    }

    pub fn start_period(&self) -> i32 {
        self.start_period
    }

    pub fn end_period(&self) -> i32 {
        self.end_period
    }

    /// Whether both meetings occupy the same slot on the same day
    pub fn conflicts_with(&self, other: &ClassPeriod) -> bool {
        self.day_of_week == other.day_of_week
            && self.start_period <= other.end_period
            && self.end_period >= other.start_period
    }
}

impl Display for ClassPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} {}-{}",
            self.day_of_week, self.start_period, self.end_period
        )
    }
}

/// Returns the first pair of meetings that double-book a slot, if any
pub fn find_conflict(periods: &[ClassPeriod]) -> Option<(ClassPeriod, ClassPeriod)> {
    periods.iter().enumerate().find_map(|(i, a)| {
        periods[i + 1..]
            .iter()
            .find(|b| a.conflicts_with(b))
            .map(|b| (*a, *b))
    })
}
