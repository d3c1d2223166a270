use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Referenced entity does not exist.
    NotFound,
    /// Entity exists but its status disallows the operation.
    InvalidState,
    /// A time-bounded qualification has lapsed.
    ExpiredCredential,
    /// A competing, unfinished commitment occupies the requested slot.
    ScheduleConflict,
    /// Required input is absent.
    MissingField,
    /// Input is present but out of range or malformed.
    InvalidValue,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "Not Found",
            ErrorKind::InvalidState => "Invalid State",
            ErrorKind::ExpiredCredential => "Expired Credential",
            ErrorKind::ScheduleConflict => "Schedule Conflict",
            ErrorKind::MissingField => "Missing Field",
            ErrorKind::InvalidValue => "Invalid Value",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    pub kind: ErrorKind,
    pub message: String,
}

impl RuleViolation {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Outcome of a single check.
///
/// Violations keep the order in which rules were evaluated. The value is
/// never modified after construction; `merge` builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    valid: bool,
    violations: Vec<RuleViolation>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self::from_violations(Vec::new())
    }

    pub fn from_violations(violations: Vec<RuleViolation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }

    pub fn single(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::from_violations(vec![RuleViolation::new(kind, message)])
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn violations(&self) -> &[RuleViolation] {
        &self.violations
    }

    pub fn has_kind(&self, kind: ErrorKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }

    pub fn count_of(&self, kind: ErrorKind) -> usize {
        self.violations.iter().filter(|v| v.kind == kind).count()
    }

    /// All violation messages joined with `"; "`, in evaluation order.
    pub fn error_message(&self) -> String {
        self.violations
            .iter()
            .map(|v| v.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn merge(self, other: ValidationResult) -> Self {
        let mut violations = self.violations;
        violations.extend(other.violations);
        Self::from_violations(violations)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

impl FromIterator<RuleViolation> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = RuleViolation>>(iter: I) -> Self {
        Self::from_violations(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_valid() {
        let result = ValidationResult::valid();
        assert!(result.is_valid());
        assert!(result.violations().is_empty());
        assert_eq!(result.error_message(), "");
    }

    #[test]
    fn any_violation_makes_result_invalid() {
        let result = ValidationResult::single(ErrorKind::MissingField, "date is required");
        assert!(!result.is_valid());
        assert!(result.has_kind(ErrorKind::MissingField));
        assert!(!result.has_kind(ErrorKind::NotFound));
    }

    #[test]
    fn error_message_preserves_order() {
        let result: ValidationResult = vec![
            RuleViolation::new(ErrorKind::MissingField, "first"),
            RuleViolation::new(ErrorKind::InvalidValue, "second"),
            RuleViolation::new(ErrorKind::MissingField, "third"),
        ]
        .into_iter()
        .collect();

        assert_eq!(result.error_message(), "first; second; third");
        assert_eq!(result.count_of(ErrorKind::MissingField), 2);
    }

    #[test]
    fn merge_appends_in_order() {
        let left = ValidationResult::single(ErrorKind::InvalidState, "vehicle");
        let right = ValidationResult::single(ErrorKind::ExpiredCredential, "driver");
        let merged = left.merge(right);

        assert!(!merged.is_valid());
        assert_eq!(merged.error_message(), "vehicle; driver");

        let both_valid = ValidationResult::valid().merge(ValidationResult::valid());
        assert!(both_valid.is_valid());
    }

    #[test]
    fn violation_display_includes_kind() {
        let violation = RuleViolation::new(ErrorKind::ScheduleConflict, "busy");
        assert_eq!(violation.to_string(), "[Schedule Conflict] busy");
    }
}
