use crate::error::ValidationError;

pub const MIN_AGE: i64 = 5;
pub const MAX_AGE: i64 = 120;
pub const MAX_AGE_LIMIT: i64 = 25;
pub const MAX_HEAD_COUNT: i64 = 50_000;

/// Validator for customer, show and avanue fields.
pub struct Validator;

impl Validator {
    /// Require that a field was supplied.
    pub fn require<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
        value.ok_or(ValidationError::Missing(field))
    }

    /// Validate a name or title.
    /// Must be between 2 and 512 characters.
    pub fn validate_name(field: &'static str, name: &str) -> Result<(), ValidationError> {
        let len = name.chars().count();
        if !(2..=512).contains(&len) {
            return Err(ValidationError::NameLength { field, len });
        }
        Ok(())
    }

    /// Validate a customer age.
    pub fn validate_age(age: i64) -> Result<(), ValidationError> {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ValidationError::AgeOutOfRange(age));
        }
        Ok(())
    }

    /// Reject negative counts. Creation only enforces this lower bound.
    pub fn validate_non_negative(field: &'static str, value: i64) -> Result<(), ValidationError> {
        if value < 0 {
            return Err(ValidationError::Negative { field, value });
        }
        Ok(())
    }

    /// Validate a show age limit on update.
    pub fn validate_age_limit(age_limit: i64) -> Result<(), ValidationError> {
        if !(0..=MAX_AGE_LIMIT).contains(&age_limit) {
            return Err(ValidationError::AgeLimitOutOfRange(age_limit));
        }
        Ok(())
    }

    /// Validate the number of open seats of a show on update.
    pub fn validate_head_count(head_count: i64) -> Result<(), ValidationError> {
        if !(0..=MAX_HEAD_COUNT).contains(&head_count) {
            return Err(ValidationError::HeadCountOutOfRange(head_count));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert_eq!(Validator::require("age", Some(30)), Ok(30));
        assert_eq!(
            Validator::require::<i64>("age", None),
            Err(ValidationError::Missing("age"))
        );
    }

    #[test]
    fn test_valid_names() {
        assert!(Validator::validate_name("name", "Al").is_ok());
        assert!(Validator::validate_name("name", &"a".repeat(512)).is_ok());
        // Multi-byte characters count once
        assert!(Validator::validate_name("name", "Åse").is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(
            Validator::validate_name("name", ""),
            Err(ValidationError::NameLength {
                field: "name",
                len: 0
            })
        );
        assert!(Validator::validate_name("title", "A").is_err());
        assert!(Validator::validate_name("title", &"a".repeat(513)).is_err());
    }

    #[test]
    fn test_age_bounds() {
        for age in MIN_AGE..=MAX_AGE {
            assert!(Validator::validate_age(age).is_ok(), "age {} rejected", age);
        }
        assert_eq!(
            Validator::validate_age(4),
            Err(ValidationError::AgeOutOfRange(4))
        );
        assert_eq!(
            Validator::validate_age(121),
            Err(ValidationError::AgeOutOfRange(121))
        );
        assert!(Validator::validate_age(0).is_err());
    }

    #[test]
    fn test_non_negative() {
        assert!(Validator::validate_non_negative("age_limit", 0).is_ok());
        assert!(Validator::validate_non_negative("head_count", 60_000).is_ok());
        assert_eq!(
            Validator::validate_non_negative("head_count", -1),
            Err(ValidationError::Negative {
                field: "head_count",
                value: -1
            })
        );
    }

    #[test]
    fn test_age_limit_bounds() {
        assert!(Validator::validate_age_limit(0).is_ok());
        assert!(Validator::validate_age_limit(25).is_ok());
        assert!(Validator::validate_age_limit(26).is_err());
        assert!(Validator::validate_age_limit(-1).is_err());
    }

    #[test]
    fn test_head_count_bounds() {
        assert!(Validator::validate_head_count(0).is_ok());
        assert!(Validator::validate_head_count(50_000).is_ok());
        assert_eq!(
            Validator::validate_head_count(50_001),
            Err(ValidationError::HeadCountOutOfRange(50_001))
        );
        assert!(Validator::validate_head_count(-5).is_err());
    }
}
