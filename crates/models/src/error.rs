use thiserror::Error;

/// Rejection raised when a catalog value breaks one of the schema invariants
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("credit must be non-negative, got {0}")]
    NegativeCredit(f64),

    #[error("target grade must be non-negative, got {0}")]
    NegativeTargetGrade(i32),

    #[error("day of week must be in 0..7, got {0}")]
    DayOfWeekOutOfRange(i32),

    #[error("unknown day letter '{0}'")]
    UnknownDay(char),

    #[error("invalid period range {start}..={end}")]
    InvalidPeriodRange { start: i32, end: i32 },

    #[error("unknown course type '{0}'")]
    UnknownCourseType(String),

    #[error("{kind} code must not be empty")]
    EmptyCode { kind: &'static str },

    #[error("duplicate {kind} code '{code}' in catalog batch")]
    DuplicateCode { kind: &'static str, code: String },
}
