//! Record Validation - Rule/Policy Separation
//!
//! Rules produce structured violations.
//! Policy maps violations to actions.

use serde::{Deserialize, Serialize};

use crate::records::{FailureMode, ReviewRecord};

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static VALIDATION_CALL_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_validation_call_count() -> u32 {
    VALIDATION_CALL_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_validation_call_count() {
    VALIDATION_CALL_COUNT.store(0, Ordering::SeqCst);
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub message: String,
    pub field: String,
    pub remediation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
    pub record_name: String,
}

impl ValidationResult {
    pub fn success(record: &ReviewRecord) -> Self {
        Self {
            valid: true,
            violations: vec![],
            record_name: record.name.clone(),
        }
    }

    pub fn failure(record: &ReviewRecord, violations: Vec<ValidationViolation>) -> Self {
        Self {
            valid: false,
            violations,
            record_name: record.name.clone(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Error)
    }
}

/// Validation rule trait - produces violations
pub trait ValidationRule {
    fn name(&self) -> &'static str;
    fn validate(&self, record: &ReviewRecord) -> Vec<ValidationViolation>;
}

// --- Concrete Rules ---

pub struct RequiredFieldsRule;

impl ValidationRule for RequiredFieldsRule {
    fn name(&self) -> &'static str {
        "required_fields"
    }

    fn validate(&self, record: &ReviewRecord) -> Vec<ValidationViolation> {
        let mut violations = vec![];

        if record.name.trim().is_empty() {
            violations.push(ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Error,
                message: "Reviewer name is empty".to_string(),
                field: "name".to_string(),
                remediation: vec!["Add the reviewer's display name".to_string()],
            });
        }

        if record.review.trim().is_empty() {
            violations.push(ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Error,
                message: "Review text is empty".to_string(),
                field: "review".to_string(),
                remediation: vec!["Add the testimonial text".to_string()],
            });
        }

        violations
    }
}

pub struct SocialLinkRule;

impl ValidationRule for SocialLinkRule {
    fn name(&self) -> &'static str {
        "social_link"
    }

    fn validate(&self, record: &ReviewRecord) -> Vec<ValidationViolation> {
        let Some(link) = &record.social_link else {
            return vec![];
        };

        if link.starts_with("http://") || link.starts_with("https://") {
            vec![]
        } else {
            vec![ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Error,
                message: "Social link is not an http(s) URL".to_string(),
                field: "socialLink".to_string(),
                remediation: vec![
                    "Use a full URL including the scheme, or omit the field".to_string(),
                ],
            }]
        }
    }
}

pub struct ColorRule;

impl ValidationRule for ColorRule {
    fn name(&self) -> &'static str {
        "color"
    }

    fn validate(&self, record: &ReviewRecord) -> Vec<ValidationViolation> {
        let Some(color) = &record.color else {
            return vec![];
        };

        if is_hex_color(color) {
            vec![]
        } else {
            // The renderer falls back to the default color, so this only warns.
            vec![ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Warning,
                message: "Color is not a #rgb or #rrggbb hex value".to_string(),
                field: "color".to_string(),
                remediation: vec!["Use a hex color like #ffde59".to_string()],
            }]
        }
    }
}

fn is_hex_color(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Validator orchestrates rules and applies policy
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(RequiredFieldsRule),
                Box::new(SocialLinkRule),
                Box::new(ColorRule),
            ],
        }
    }

    pub fn validate(&self, record: &ReviewRecord, failure_mode: FailureMode) -> ValidationResult {
        #[cfg(feature = "test-hooks")]
        VALIDATION_CALL_COUNT.fetch_add(1, Ordering::SeqCst);

        let mut all_violations = vec![];

        for rule in &self.rules {
            let violations = rule.validate(record);
            all_violations.extend(violations);
        }

        let has_errors = all_violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Error);

        match failure_mode {
            FailureMode::Block if has_errors => {
                let errors: Vec<_> = all_violations
                    .into_iter()
                    .filter(|v| v.severity == ViolationSeverity::Error)
                    .collect();
                ValidationResult::failure(record, errors)
            }
            FailureMode::Block => {
                // Warnings don't block
                if all_violations.is_empty() {
                    ValidationResult::success(record)
                } else {
                    ValidationResult {
                        valid: true,
                        violations: all_violations,
                        record_name: record.name.clone(),
                    }
                }
            }
            FailureMode::Warn | FailureMode::Log => {
                // Never block, just record
                ValidationResult {
                    valid: true,
                    violations: all_violations,
                    record_name: record.name.clone(),
                }
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
