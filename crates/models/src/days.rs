use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Day of the week a class meets, stored as `0..7` with Monday as 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const MONDAY: Self = DayOfWeek(0);
    pub const TUESDAY: Self = DayOfWeek(1);
    pub const WEDNESDAY: Self = DayOfWeek(2);
    pub const THURSDAY: Self = DayOfWeek(3);
    pub const FRIDAY: Self = DayOfWeek(4);
    pub const SATURDAY: Self = DayOfWeek(5);
    pub const SUNDAY: Self = DayOfWeek(6);

    /// Day-to-char mapping for parsing and display
    const DAY_CHARS: [(Self, char); 7] = [
        (Self::MONDAY, 'M'),
        (Self::TUESDAY, 'T'),
        (Self::WEDNESDAY, 'W'),
        (Self::THURSDAY, 'R'),
        (Self::FRIDAY, 'F'),
        (Self::SATURDAY, 'S'),
        (Self::SUNDAY, 'U'),
    ];

    pub fn new(day: i32) -> Result<Self, ValidationError> {
        if (0..7).contains(&day) {
            Ok(DayOfWeek(day as u8))
        } else {
            Err(ValidationError::DayOfWeekOutOfRange(day))
        }
    }

    pub fn index(self) -> i32 {
        i32::from(self.0)
    }

    pub fn letter(self) -> char {
        Self::DAY_CHARS[self.0 as usize].1
    }

    pub fn from_letter(letter: char) -> Result<Self, ValidationError> {
        Self::DAY_CHARS
            .iter()
            .find(|(_, c)| *c == letter.to_ascii_uppercase())
            .map(|&(day, _)| day)
            .ok_or(ValidationError::UnknownDay(letter))
    }
}

impl TryFrom<i32> for DayOfWeek {
    type Error = ValidationError;

    fn try_from(day: i32) -> Result<Self, Self::Error> {
        Self::new(day)
    }
}

impl From<DayOfWeek> for i32 {
    fn from(day: DayOfWeek) -> Self {
        day.index()
    }
}

/// Accepts either the numeric index ("2") or the schedule letter ("W")
impl FromStr for DayOfWeek {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(day) = s.parse::<i32>() {
            return Self::new(day);
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::from_letter(letter),
            (Some(letter), Some(_)) => Err(ValidationError::UnknownDay(letter)),
            (None, _) => Err(ValidationError::UnknownDay(' ')),
        }
    }
}

impl Display for DayOfWeek {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.letter())
    }
}
