//! Form validation pipeline
//!
//! Each form declares a [`Schema`]: an ordered list of fields, each with an
//! ordered chain of [`Rule`]s. Sanitizing rules rewrite the value, checking
//! rules report a message and leave the value untouched. A failing check does
//! not stop the chain, and every field runs before the caller looks at the
//! error list.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateLength;

static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid alphanumeric pattern"));

/// Result of applying one rule to a field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Sanitized(String),
    Failed(String),
}

/// A single field-level check or sanitizer
pub trait Rule: Send + Sync {
    fn apply(&self, value: &str) -> Outcome;
}

/// Strip surrounding whitespace
pub struct Trim;

impl Rule for Trim {
    fn apply(&self, value: &str) -> Outcome {
        Outcome::Sanitized(value.trim().to_string())
    }
}

/// Replace markup-significant characters with HTML entities
pub struct Escape;

impl Rule for Escape {
    fn apply(&self, value: &str) -> Outcome {
        Outcome::Sanitized(escape_html(value))
    }
}

/// Character count bounds
pub struct Length {
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub message: &'static str,
}

impl Rule for Length {
    fn apply(&self, value: &str) -> Outcome {
        if value.validate_length(self.min, self.max, None) {
            Outcome::Pass
        } else {
            Outcome::Failed(self.message.to_string())
        }
    }
}

/// ASCII letters and digits only
pub struct Alphanumeric {
    pub message: &'static str,
}

impl Rule for Alphanumeric {
    fn apply(&self, value: &str) -> Outcome {
        if ALPHANUMERIC.is_match(value) {
            Outcome::Pass
        } else {
            Outcome::Failed(self.message.to_string())
        }
    }
}

/// ISO-8601 calendar date
pub struct IsoDate {
    pub message: &'static str,
}

impl Rule for IsoDate {
    fn apply(&self, value: &str) -> Outcome {
        match parse_iso_date(value) {
            Some(_) => Outcome::Pass,
            None => Outcome::Failed(self.message.to_string()),
        }
    }
}

/// Value must be one of a fixed set
pub struct OneOf {
    pub allowed: &'static [&'static str],
    pub message: &'static str,
}

impl Rule for OneOf {
    fn apply(&self, value: &str) -> Outcome {
        if self.allowed.contains(&value) {
            Outcome::Pass
        } else {
            Outcome::Failed(self.message.to_string())
        }
    }
}

/// Escape `& < > " ' / \` and backticks
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Parse an ISO-8601 date (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`) or a timestamp
/// whose date part is kept. Reduced precision means the first day of the period.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_reduced_date(value))
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
                .ok()
                .map(|dt| dt.date())
        })
}

fn parse_reduced_date(value: &str) -> Option<NaiveDate> {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match value.split_once('-') {
        None if value.len() == 4 && digits(value) => NaiveDate::from_ymd_opt(value.parse().ok()?, 1, 1),
        Some((year, month)) if year.len() == 4 && month.len() == 2 && digits(year) && digits(month) => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        _ => None,
    }
}

/// Rule chain for one form field
pub struct FieldRules {
    name: &'static str,
    optional: bool,
    rules: Vec<Box<dyn Rule>>,
}

impl FieldRules {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            optional: false,
            rules: Vec::new(),
        }
    }

    /// Absent or empty values skip every rule and stay unset
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn trim(self) -> Self {
        self.rule(Trim)
    }

    pub fn escape(self) -> Self {
        self.rule(Escape)
    }

    pub fn min_length(self, min: u64, message: &'static str) -> Self {
        self.rule(Length {
            min: Some(min),
            max: None,
            message,
        })
    }

    pub fn max_length(self, max: u64, message: &'static str) -> Self {
        self.rule(Length {
            min: None,
            max: Some(max),
            message,
        })
    }

    pub fn alphanumeric(self, message: &'static str) -> Self {
        self.rule(Alphanumeric { message })
    }

    pub fn iso_date(self, message: &'static str) -> Self {
        self.rule(IsoDate { message })
    }

    pub fn one_of(self, allowed: &'static [&'static str], message: &'static str) -> Self {
        self.rule(OneOf { allowed, message })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the chain, returning the final value and every failure message
    pub fn run(&self, raw: Option<&str>) -> (Option<String>, Vec<String>) {
        let raw = raw.unwrap_or_default();
        if self.optional && raw.is_empty() {
            return (None, Vec::new());
        }

        let mut value = raw.to_string();
        let mut messages = Vec::new();
        for rule in &self.rules {
            match rule.apply(&value) {
                Outcome::Pass => {}
                Outcome::Sanitized(v) => value = v,
                Outcome::Failed(msg) => messages.push(msg),
            }
        }
        (Some(value), messages)
    }
}

/// Raw submitted form, looked up by field name
pub trait FormInput {
    fn value(&self, field: &str) -> Option<&str>;
}

/// Ordered field declarations of one form
pub struct Schema {
    fields: Vec<FieldRules>,
}

impl Schema {
    pub fn new(fields: Vec<FieldRules>) -> Self {
        Self { fields }
    }

    pub fn validate(&self, input: &impl FormInput) -> Validated {
        let mut validated = Validated {
            fields: self.fields.iter().map(FieldRules::name).collect(),
            ..Default::default()
        };
        for field in &self.fields {
            let (value, messages) = field.run(input.value(field.name()));
            if let Some(value) = value {
                validated.values.insert(field.name(), value);
            }
            for message in messages {
                validated.push_error(field.name(), message);
            }
        }
        validated
    }
}

/// One failed rule, tagged with its field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Sanitized values plus the ordered error list of one submission
#[derive(Debug, Default)]
pub struct Validated {
    /// Declaration order, used to place errors
    fields: Vec<&'static str>,
    values: HashMap<&'static str, String>,
    errors: Vec<FieldError>,
}

impl Validated {
    /// Sanitized value, empty when unset
    pub fn text(&self, field: &str) -> String {
        self.values.get(field).cloned().unwrap_or_default()
    }

    pub fn optional_text(&self, field: &str) -> Option<String> {
        self.values.get(field).filter(|v| !v.is_empty()).cloned()
    }

    /// Parsed date, `None` when unset or not a date
    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        self.values.get(field).and_then(|v| parse_iso_date(v))
    }

    /// Errors stay ordered by field declaration; undeclared fields go last
    pub fn push_error(&mut self, field: &'static str, message: impl Into<String>) {
        let rank = self.rank(field);
        let at = self
            .errors
            .iter()
            .position(|e| self.rank(e.field) > rank)
            .unwrap_or(self.errors.len());
        self.errors.insert(
            at,
            FieldError {
                field,
                message: message.into(),
            },
        );
    }

    fn rank(&self, field: &str) -> usize {
        self.fields
            .iter()
            .position(|f| *f == field)
            .unwrap_or(self.fields.len())
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Input(Vec<(&'static str, &'static str)>);

    impl FormInput for Input {
        fn value(&self, field: &str) -> Option<&str> {
            self.0.iter().find(|(k, _)| *k == field).map(|(_, v)| *v)
        }
    }

    fn name_rules() -> FieldRules {
        FieldRules::new("first_name")
            .trim()
            .min_length(1, "First Name must be specified.")
            .escape()
            .alphanumeric("First name has non-alphanumeric characters.")
    }

    #[test]
    fn test_trim_runs_before_checks() {
        let (value, errors) = name_rules().run(Some("  Isaac  "));
        assert_eq!(value.as_deref(), Some("Isaac"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_field_accumulates_errors() {
        let (value, errors) = name_rules().run(Some("   "));
        assert_eq!(value.as_deref(), Some(""));
        assert_eq!(
            errors,
            vec![
                "First Name must be specified.".to_string(),
                "First name has non-alphanumeric characters.".to_string(),
            ]
        );
    }

    #[test]
    fn test_escape_before_charset_check() {
        let (value, errors) = name_rules().run(Some("<b>"));
        assert_eq!(value.as_deref(), Some("&lt;b&gt;"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_optional_empty_is_unset() {
        let rules = FieldRules::new("date_of_birth")
            .optional()
            .iso_date("Invalid date of birth");
        assert_eq!(rules.run(Some("")), (None, vec![]));
        assert_eq!(rules.run(None), (None, vec![]));

        let (_, errors) = rules.run(Some("not a date"));
        assert_eq!(errors, vec!["Invalid date of birth".to_string()]);
    }

    #[test]
    fn test_length_counts_characters() {
        let rules = FieldRules::new("name").min_length(3, "too short");
        assert!(rules.run(Some("Été")).1.is_empty());
        assert_eq!(rules.run(Some("ab")).1.len(), 1);

        let rules = FieldRules::new("name").max_length(3, "too long");
        assert_eq!(rules.run(Some("abcd")).1, vec!["too long".to_string()]);
    }

    #[test]
    fn test_one_of() {
        let rules = FieldRules::new("status").one_of(&["Available", "Loaned"], "Invalid status");
        assert!(rules.run(Some("Loaned")).1.is_empty());
        assert_eq!(rules.run(Some("Lost")).1, vec!["Invalid status".to_string()]);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;&#x2F;a&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_parse_iso_date() {
        let expected = NaiveDate::from_ymd_opt(1920, 1, 2);
        assert_eq!(parse_iso_date("1920-01-02"), expected);
        assert_eq!(parse_iso_date("1920-01-02T10:30:00Z"), expected);
        assert_eq!(parse_iso_date("1920-01-02T10:30"), expected);
        assert_eq!(parse_iso_date("1920-13-02"), None);
        assert_eq!(parse_iso_date("02/01/1920"), None);
    }

    #[test]
    fn test_parse_reduced_precision_date() {
        assert_eq!(parse_iso_date("1920"), NaiveDate::from_ymd_opt(1920, 1, 1));
        assert_eq!(parse_iso_date("1920-08"), NaiveDate::from_ymd_opt(1920, 8, 1));
        assert_eq!(parse_iso_date("1920-13"), None);
        assert_eq!(parse_iso_date("192"), None);
        assert_eq!(parse_iso_date("1920-8"), None);
    }

    #[test]
    fn test_late_errors_keep_declaration_order() {
        let schema = Schema::new(vec![
            FieldRules::new("book").trim(),
            FieldRules::new("imprint")
                .trim()
                .min_length(1, "Imprint must be specified"),
        ]);
        let mut validated = schema.validate(&Input(vec![("book", "x"), ("imprint", "")]));
        validated.push_error("book", "Book not found");
        validated.push_error("genre", "Genre not found");
        validated.push_error("imprint", "Imprint taken");

        let fields: Vec<_> = validated.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["book", "imprint", "imprint", "genre"]);
        assert_eq!(validated.errors()[2].message, "Imprint taken");
    }

    #[test]
    fn test_schema_checks_every_field() {
        let schema = Schema::new(vec![
            name_rules(),
            FieldRules::new("family_name")
                .trim()
                .min_length(1, "Family name must be specified."),
            FieldRules::new("date_of_birth")
                .optional()
                .iso_date("Invalid date of birth"),
        ]);

        let validated = schema.validate(&Input(vec![
            ("first_name", ""),
            ("family_name", " Asimov "),
            ("date_of_birth", "1920-01-02"),
        ]));

        assert!(!validated.is_valid());
        assert_eq!(validated.text("family_name"), "Asimov");
        assert_eq!(validated.date("date_of_birth"), NaiveDate::from_ymd_opt(1920, 1, 2));
        assert_eq!(validated.errors()[0].field, "first_name");
        assert_eq!(validated.errors()[0].message, "First Name must be specified.");
    }
}
