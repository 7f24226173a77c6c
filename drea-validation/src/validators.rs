// Built-in validators

use crate::errors::{Fault, Result};
use crate::normalizer::text_form;
use crate::rules::{Rule, RuleSet, ValidationResult, validate_entry};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Stricter-than-RFC email pattern shared by the email validator and the
/// classic model.
pub static STRICT_EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9]+([._-]?[a-zA-Z0-9]+)*@[a-zA-Z0-9-]+(\.[a-zA-Z]{2,63})+$").unwrap()
});

/// Symbols accepted by the password validator; any whitespace character
/// also counts as a symbol
pub const PASSWORD_SYMBOLS: &str = "?@!#$%&*";

fn regex_rule(pattern: &str, message: &str) -> Rule {
    Rule::pattern(Regex::new(pattern).unwrap(), message)
}

static USERNAME_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new()
        .add(regex_rule(r"^[A-Za-z\s-]+$", "Username must contain only letters"))
        .add(regex_rule(r"^.{5,}$", "Username is too small"))
        .add(regex_rule(r"^.{5,35}$", "Username is too long"))
});

static EMAIL_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::from(Rule::pattern(
        STRICT_EMAIL_REGEX.clone(),
        "Invalid Email address",
    ))
});

static PHONE_NUMBER_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new()
        .add(regex_rule(r"^[0-9]+$", "Phone number must contain only digits"))
        .add(regex_rule(r"^.{3,}$", "Phone number is too small"))
        .add(regex_rule(r"^.{3,12}$", "Phone number is too long"))
});

static PASSWORD_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new()
        .add(regex_rule(
            r"^.{8,}$",
            "Password must be atleast 8 characters long",
        ))
        .add(regex_rule(
            r"[A-Z]",
            "Password must contain atleast an uppercase letter",
        ))
        .add(regex_rule(
            r"[a-z]",
            "Password must contain atleast a lowercase letter",
        ))
        .add(regex_rule(r"[0-9]", "Password must contain atleast a number"))
        .add(regex_rule(
            r"[?@!#$%&*\s]",
            "Password must contain atleast a symbol",
        ))
});

static REQUIRED_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::from(Rule::predicate(
        |value| !value.is_null() && !text_form(value).trim().is_empty(),
        "This field is required",
    ))
});

fn require_present(entry: &Value) -> Result<()> {
    if entry.is_null() {
        return Err(Fault::null_value("entry cannot be null or undefined"));
    }
    Ok(())
}

fn require_string(entry: &Value) -> Result<()> {
    require_present(entry)?;
    if !entry.is_string() {
        return Err(Fault::argument_type("entry must be a string"));
    }
    Ok(())
}

/// Letters, spaces and hyphens only; 5 to 35 characters
pub fn is_username_valid(entry: impl Into<Value>) -> Result<ValidationResult> {
    let entry = entry.into();
    require_string(&entry)?;
    validate_entry(&entry, &USERNAME_RULES)
}

/// Alphanumeric local part segments joined by `.`, `_` or `-`, a hyphenated
/// domain label and a 2 to 63 letter top-level domain
pub fn is_email_valid(entry: impl Into<Value>) -> Result<ValidationResult> {
    let entry = entry.into();
    require_string(&entry)?;
    validate_entry(&entry, &EMAIL_RULES)
}

/// Digits only; 3 to 12 characters
pub fn is_phone_number_valid(entry: impl Into<Value>) -> Result<ValidationResult> {
    let entry = entry.into();
    require_string(&entry)?;
    validate_entry(&entry, &PHONE_NUMBER_RULES)
}

/// At least 8 characters with an uppercase letter, a lowercase letter, a
/// digit and a symbol from [`PASSWORD_SYMBOLS`] or whitespace, checked in
/// that order
pub fn is_password_valid(entry: impl Into<Value>) -> Result<ValidationResult> {
    let entry = entry.into();
    require_string(&entry)?;
    validate_entry(&entry, &PASSWORD_RULES)
}

/// Non-null and not blank once converted to text
pub fn is_required(entry: impl Into<Value>) -> Result<ValidationResult> {
    let entry = entry.into();
    require_present(&entry)?;
    validate_entry(&entry, &REQUIRED_RULES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FaultKind;
    use serde_json::json;

    fn error_of(result: Result<ValidationResult>) -> Option<String> {
        result.unwrap().error().map(str::to_string)
    }

    #[test]
    fn test_username() {
        assert!(is_username_valid("Jane Doe").unwrap().is_valid());
        assert!(is_username_valid("Mary-Jane Watson").unwrap().is_valid());
        assert_eq!(
            error_of(is_username_valid("Jane_Doe")).as_deref(),
            Some("Username must contain only letters")
        );
        assert_eq!(
            error_of(is_username_valid("Jane")).as_deref(),
            Some("Username is too small")
        );
        assert_eq!(
            error_of(is_username_valid("a".repeat(36))).as_deref(),
            Some("Username is too long")
        );
    }

    #[test]
    fn test_username_character_check_comes_first() {
        // Too short and containing a digit: the character class is reported.
        assert_eq!(
            error_of(is_username_valid("ab1")).as_deref(),
            Some("Username must contain only letters")
        );
    }

    #[test]
    fn test_email() {
        assert!(is_email_valid("a@b.com").unwrap().is_valid());
        assert!(is_email_valid("fon.bless_m-t@gmail.com").unwrap().is_valid());
        assert!(is_email_valid("user@mail.example.co.uk").unwrap().is_valid());
        assert!(!is_email_valid(".fon@gmail.com").unwrap().is_valid());
        assert!(!is_email_valid("fon..bless@gmail.com").unwrap().is_valid());
        assert!(!is_email_valid("user+tag@example.com").unwrap().is_valid());
        assert!(!is_email_valid("user@example.c").unwrap().is_valid());
        assert!(!is_email_valid("blessfonmtohgmail.com").unwrap().is_valid());
    }

    #[test]
    fn test_phone_number() {
        assert!(is_phone_number_valid("237865373").unwrap().is_valid());
        assert_eq!(
            error_of(is_phone_number_valid("+237865")).as_deref(),
            Some("Phone number must contain only digits")
        );
        assert_eq!(
            error_of(is_phone_number_valid("12")).as_deref(),
            Some("Phone number is too small")
        );
        assert_eq!(
            error_of(is_phone_number_valid("1234567890123")).as_deref(),
            Some("Phone number is too long")
        );
    }

    #[test]
    fn test_password_order() {
        assert!(is_password_valid("Abcdef1!").unwrap().is_valid());
        assert_eq!(
            error_of(is_password_valid("Ab1!")).as_deref(),
            Some("Password must be atleast 8 characters long")
        );
        assert_eq!(
            error_of(is_password_valid("abcdefg1!")).as_deref(),
            Some("Password must contain atleast an uppercase letter")
        );
        assert_eq!(
            error_of(is_password_valid("ABCDEFG1!")).as_deref(),
            Some("Password must contain atleast a lowercase letter")
        );
        assert_eq!(
            error_of(is_password_valid("Abcdefgh!")).as_deref(),
            Some("Password must contain atleast a number")
        );
        assert_eq!(
            error_of(is_password_valid("Abcdefg12")).as_deref(),
            Some("Password must contain atleast a symbol")
        );
    }

    #[test]
    fn test_password_whitespace_counts_as_symbol() {
        let result = is_password_valid("Abcdefg1 x").unwrap();
        assert!(result.is_valid());
        assert_eq!(result.error(), None);

        // Surrounding whitespace is trimmed before the rules run
        assert_eq!(
            error_of(is_password_valid(" Abcdefg12 ")).as_deref(),
            Some("Password must contain atleast a symbol")
        );
    }

    #[test]
    fn test_required() {
        assert!(is_required("x").unwrap().is_valid());
        assert!(is_required(0).unwrap().is_valid());
        assert!(is_required(false).unwrap().is_valid());
        assert_eq!(
            error_of(is_required("   ")).as_deref(),
            Some("This field is required")
        );
    }

    #[test]
    fn test_preconditions() {
        assert_eq!(
            is_username_valid(Value::Null).unwrap_err().kind(),
            FaultKind::NullValue
        );
        assert_eq!(
            is_email_valid(json!(42)).unwrap_err().kind(),
            FaultKind::ArgumentType
        );
        assert_eq!(
            is_phone_number_valid(json!(237865373)).unwrap_err().kind(),
            FaultKind::ArgumentType
        );
        assert_eq!(
            is_password_valid(json!(["Abcdef1!"])).unwrap_err().kind(),
            FaultKind::ArgumentType
        );
        assert_eq!(
            is_required(Value::Null).unwrap_err().kind(),
            FaultKind::NullValue
        );
    }
}
