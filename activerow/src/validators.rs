use std::borrow::Cow;

use regex::Regex;

use crate::validation::Invalid;

#[inline]
fn err(code: &'static str, msg: impl Into<Cow<'static, str>>) -> Invalid {
    Invalid::new(code, msg)
}

/// Checks that a string is not empty or whitespace-only.
pub fn non_empty(s: &str) -> Result<(), Invalid> {
    if s.trim().is_empty() {
        Err(err("blank", "This field may not be blank."))
    } else {
        Ok(())
    }
}

/// Validates minimum byte length (not character count).
pub fn min_len(n: usize) -> impl Fn(&str) -> Result<(), Invalid> {
    move |s| {
        if s.len() < n {
            Err(err(
                "min_length",
                format!("Ensure this field has at least {n} characters."),
            ))
        } else {
            Ok(())
        }
    }
}

/// Validates maximum byte length (not character count).
pub fn max_len(n: usize) -> impl Fn(&str) -> Result<(), Invalid> {
    move |s| {
        if s.len() > n {
            Err(err(
                "max_length",
                format!("Ensure this field has at most {n} characters."),
            ))
        } else {
            Ok(())
        }
    }
}

pub fn min_value(n: i64) -> impl Fn(i64) -> Result<(), Invalid> {
    move |v| {
        if v < n {
            Err(err(
                "min_value",
                format!("Ensure this value is greater than or equal to {n}."),
            ))
        } else {
            Ok(())
        }
    }
}

pub fn max_value(n: i64) -> impl Fn(i64) -> Result<(), Invalid> {
    move |v| {
        if v > n {
            Err(err(
                "max_value",
                format!("Ensure this value is less than or equal to {n}."),
            ))
        } else {
            Ok(())
        }
    }
}

/// RFC-ish, pragmatic email (copied philosophy from validator crate)
pub fn email(s: &str) -> Result<(), Invalid> {
    static EMAIL_RE: once_cell::sync::Lazy<Regex> = once_cell::sync::Lazy::new(|| {
        Regex::new(r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9-]+(\.[a-z0-9-]+)+$")
            .expect("valid email regex")
    });

    if EMAIL_RE.is_match(s) {
        Ok(())
    } else {
        Err(err("email", "Enter a valid email address."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_rejects_whitespace() {
        assert!(non_empty("  ").is_err());
        assert!(non_empty("x").is_ok());
    }

    #[test]
    fn length_bounds() {
        assert!(min_len(3)("ab").is_err());
        assert!(min_len(3)("abc").is_ok());
        assert!(max_len(3)("abcd").is_err());
        assert!(max_len(3)("abc").is_ok());
    }

    #[test]
    fn value_bounds() {
        assert!(min_value(18)(17).is_err());
        assert!(min_value(18)(18).is_ok());
        assert!(max_value(120)(121).is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(email("someone@example.com").is_ok());
        assert!(email("not-an-email").is_err());
        assert_eq!(email("x@y").unwrap_err().code, "email");
    }
}
