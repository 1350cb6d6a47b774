use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[cfg(feature = "database")]
use sea_orm::Value;

/// Discriminator of the polymorphic course hierarchy, stored in `courses.type`
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CourseType {
    /// General education course, belongs to a category
    General,
    /// Major course, may target a grade level
    Major,
}

impl CourseType {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// Parses a user supplied discriminator, ignoring surrounding whitespace and case
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        value
            .trim()
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| ValidationError::UnknownCourseType(value.to_string()))
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for CourseType {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "CourseType".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl From<CourseType> for Value {
    fn from(course_type: CourseType) -> Self {
        Value::String(Some(Box::new(course_type.as_str().to_string())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for CourseType {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.parse().map_err(|_| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Unknown course type discriminator: {val}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for CourseType {
    fn null() -> Value {
        Value::String(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_course_type() {
        assert_eq!(CourseType::parse("general"), Ok(CourseType::General));
        assert_eq!(CourseType::parse(" Major "), Ok(CourseType::Major));
        assert_eq!(
            CourseType::parse("elective"),
            Err(ValidationError::UnknownCourseType("elective".to_string()))
        );
    }

    #[test]
    fn test_course_type_round_trips_through_str() {
        for course_type in CourseType::iter() {
            assert_eq!(course_type.to_string().parse::<CourseType>(), Ok(course_type));
        }
        assert_eq!(CourseType::General.as_str(), "general");
    }
}
