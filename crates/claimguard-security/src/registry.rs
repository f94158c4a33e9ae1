use claimguard_core::{Error, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Built-in detectors, in scan order: (name, pattern, replacement, description)
const BUILTIN_RULES: &[(&str, &str, &str, &str)] = &[
    (
        "ssn",
        r"\b\d{3}-\d{2}-\d{4}\b",
        "XXX-XX-XXXX",
        "Social Security Number",
    ),
    (
        "credit_card",
        r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4}[\s-]?\d{4}\b",
        "XXXX-XXXX-XXXX-XXXX",
        "Credit Card Number",
    ),
    (
        "email",
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
        "[EMAIL_REDACTED]",
        "Email Address",
    ),
    (
        "phone",
        r"\b\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}\b",
        "(XXX) XXX-XXXX",
        "Phone Number",
    ),
    (
        "date_of_birth",
        r"\b(?:DOB|Date of Birth|Birth Date):\s*\d{1,2}/\d{1,2}/\d{4}\b",
        "DOB: XX/XX/XXXX",
        "Date of Birth",
    ),
    (
        "drivers_license",
        r"\b(?:DL|Driver'?s? License|License)[\s#:]+[A-Z0-9]{5,15}\b",
        // Must not contain an alphanumeric run after the label, or the
        // token would re-match its own pattern.
        "DL: [REDACTED]",
        "Driver's License",
    ),
    (
        "bank_account",
        r"\b(?:Account|Acct)[\s#:]+\d{8,17}\b",
        "Account: XXXXXXXXXX",
        "Bank Account Number",
    ),
    (
        "vin",
        r"\b[A-HJ-NPR-Z0-9]{17}\b",
        "VIN: XXXXXXXXXXXXX",
        "Vehicle Identification Number",
    ),
];

/// Uncompiled detector definition, as read from configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub name: String,
    pub pattern: String,
    pub replacement: String,
    pub description: String,
}

/// A named, compiled detector. Patterns always match case-insensitively.
#[derive(Debug, Clone)]
pub struct DetectorRule {
    name: String,
    pattern: Regex,
    replacement: String,
    description: String,
}

impl DetectorRule {
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::Pattern {
                detector: name.clone(),
                source,
            })?;

        Ok(Self {
            name,
            pattern,
            replacement: replacement.into(),
            description: description.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Ordered set of detectors keyed by name.
///
/// Registration order is scan order. Re-registering a name replaces the rule
/// in place; there is no removal.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    rules: Vec<DetectorRule>,
}

impl PatternRegistry {
    /// Registry seeded with the built-in detectors
    pub fn new() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|(name, pattern, replacement, description)| {
                DetectorRule::new(*name, pattern, *replacement, *description)
                    .expect("built-in detector patterns are valid")
            })
            .collect();

        Self { rules }
    }

    /// Registry with no detectors at all
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Insert or replace a detector. An invalid pattern leaves the registry
    /// unchanged.
    pub fn register(
        &mut self,
        name: &str,
        pattern: &str,
        replacement: &str,
        description: &str,
    ) -> Result<()> {
        let rule = DetectorRule::new(name, pattern, replacement, description)?;

        match self.rules.iter_mut().find(|r| r.name == rule.name) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }

        Ok(())
    }

    /// Register every spec in order, stopping at the first invalid pattern
    pub fn register_all<I>(&mut self, specs: I) -> Result<()>
    where
        I: IntoIterator<Item = RuleSpec>,
    {
        for spec in specs {
            self.register(&spec.name, &spec.pattern, &spec.replacement, &spec.description)?;
        }
        Ok(())
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&DetectorRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetectorRule> {
        self.rules.iter()
    }

    /// Rules to apply for an optional name subset, in registration order.
    /// Names that are not registered are ignored.
    pub fn select<'a>(
        &'a self,
        names: Option<&'a [&'a str]>,
    ) -> impl Iterator<Item = &'a DetectorRule> + 'a {
        self.rules
            .iter()
            .filter(move |rule| names.is_none_or(|names| names.contains(&rule.name())))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}
