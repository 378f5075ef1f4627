use super::violation::Violation;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use validator::{ValidateUrl, ValidationError, ValidationErrors};

lazy_static! {
    /// Empty, or digits with dashes/spaces and an optional leading `+`.
    pub static ref PHONE_NUMBER_REGEX: regex::Regex =
        regex::Regex::new(r"^(\+?[0-9][0-9 \-]*)?$").unwrap();
}

pub fn validate_url_list(urls: &[String]) -> Result<(), ValidationError> {
    if urls.iter().all(|url| url.validate_url()) {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

/// Empty strings are allowed; anything else must be a URL.
pub fn validate_optional_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

/// Flattens validator output into field-level violations, sorted by field.
pub fn violations_from(errors: &ValidationErrors) -> Vec<Violation> {
    let mut violations: Vec<Violation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = wire_name(&field.to_string());
            errs.iter()
                .map(move |err| Violation::invalid(field.clone(), describe(err)))
        })
        .collect();
    violations.sort_by(|a, b| a.field().cmp(b.field()));
    violations
}

/// Checks that `later` does not precede `earlier`.
pub fn check_not_before(
    later_field: &str,
    later: &DateTime<Utc>,
    earlier_field: &str,
    earlier: &DateTime<Utc>,
) -> Option<Violation> {
    (later < earlier).then(|| {
        Violation::invalid(later_field, format!("must not be earlier than `{earlier_field}`"))
    })
}

fn describe(err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    match (err.params.get("min"), err.params.get("max")) {
        (Some(min), Some(max)) => format!("{} (expected {min}..={max})", err.code),
        (Some(min), None) => format!("{} (expected at least {min})", err.code),
        (None, Some(max)) => format!("{} (expected at most {max})", err.code),
        (None, None) => err.code.to_string(),
    }
}

/// Maps a Rust field name to its camelCase wire name. Already camelCase
/// names pass through unchanged.
pub fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
