//! Item validation.
//!
//! Validators inspect an [`Item`] and produce a [`ValidationReport`]. The
//! item service rejects writes whose report contains failures.

use crate::error::{Error, Result};
use crate::models::Item;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational message (not a problem)
    Info,
    /// Error (write is rejected)
    Error,
}

impl Severity {
    /// Check if this severity is considered a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// A validation issue found on an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Severity of the issue
    pub severity: Severity,
    /// Field the issue refers to
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl ValidationIssue {
    /// Create a new validation issue
    pub fn new(severity: Severity, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result of validating an item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// All issues found
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an issue to the report
    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    /// Whether no failing issue was recorded
    pub fn passed(&self) -> bool {
        !self.issues.iter().any(|i| i.severity.is_failure())
    }

    /// Convert into `Err(ValidationError)` when the report has failures
    pub fn into_result(self) -> Result<()> {
        if self.passed() {
            return Ok(());
        }

        let reasons: Vec<String> = self
            .issues
            .iter()
            .filter(|i| i.severity.is_failure())
            .map(|i| format!("{}: {}", i.field, i.message))
            .collect();
        Err(Error::validation_error(reasons.join("; ")))
    }
}

/// Trait for item validators
pub trait Validator: Send + Sync {
    /// Validate an item and return a report
    fn validate(&self, item: &Item) -> ValidationReport;

    /// Name of this validator
    fn name(&self) -> &str;
}

/// Checks the email field against a conventional address pattern
#[derive(Debug, Clone, Default)]
pub struct EmailValidator;

impl EmailValidator {
    /// Check a single address
    pub fn is_valid(email: &str) -> bool {
        EMAIL_RE.is_match(email)
    }
}

impl Validator for EmailValidator {
    fn validate(&self, item: &Item) -> ValidationReport {
        let mut report = ValidationReport::new();
        if item.email.is_empty() {
            report.add_issue(ValidationIssue::new(
                Severity::Error,
                "email",
                "Email is required",
            ));
        } else if !Self::is_valid(&item.email) {
            report.add_issue(ValidationIssue::new(
                Severity::Error,
                "email",
                format!("Invalid email format: {}", item.email),
            ));
        }
        report
    }

    fn name(&self) -> &str {
        "EmailValidator"
    }
}

/// Longest accepted item name, in characters
pub const MAX_NAME_LEN: usize = 255;

/// Checks descriptive fields
#[derive(Debug, Clone, Default)]
pub struct FieldValidator;

impl Validator for FieldValidator {
    fn validate(&self, item: &Item) -> ValidationReport {
        let mut report = ValidationReport::new();

        if item.name.trim().is_empty() {
            report.add_issue(ValidationIssue::new(
                Severity::Error,
                "name",
                "Name cannot be blank",
            ));
        } else if item.name.chars().count() > MAX_NAME_LEN {
            report.add_issue(ValidationIssue::new(
                Severity::Error,
                "name",
                format!("Name exceeds {} characters", MAX_NAME_LEN),
            ));
        }

        if item.description.is_empty() {
            report.add_issue(ValidationIssue::new(
                Severity::Info,
                "description",
                "Description is empty",
            ));
        }

        report
    }

    fn name(&self) -> &str {
        "FieldValidator"
    }
}

/// Runs several validators and merges their reports
pub struct CompositeValidator {
    validators: Vec<Box<dyn Validator>>,
}

impl CompositeValidator {
    /// Create an empty composite
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Add a validator
    pub fn add_validator(mut self, validator: Box<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Validators applied to every item write
    pub fn for_items() -> Self {
        Self::new()
            .add_validator(Box::new(FieldValidator))
            .add_validator(Box::new(EmailValidator))
    }
}

impl Default for CompositeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CompositeValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.validators.iter().map(|v| v.name()).collect();
        f.debug_struct("CompositeValidator")
            .field("validators", &names)
            .finish()
    }
}

impl Validator for CompositeValidator {
    fn validate(&self, item: &Item) -> ValidationReport {
        let mut report = ValidationReport::new();
        for validator in &self.validators {
            report.merge(validator.validate(item));
        }
        report
    }

    fn name(&self) -> &str {
        "CompositeValidator"
    }
}
