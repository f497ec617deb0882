//! Sensitive data marker for automatic redaction
//!
//! Database URLs routinely embed credentials, so configuration keeps them
//! wrapped in `Sensitive<T>` and only exposes the raw value at the point
//! where a connection is opened.

use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use gematria_core_types::Sensitive;
///
/// let url = Sensitive::new("postgres://user:hunter2@db/gematria");
/// assert_eq!(format!("{:?}", url), "***REDACTED***");
/// assert_eq!(format!("{}", url), "***REDACTED***");
///
/// assert_eq!(url.expose(), &"postgres://user:hunter2@db/gematria");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_debug_redaction() {
        let secret = Sensitive::new("sqlite:///var/lib/gematria.db?key=abc");
        let debug_str = format!("{:?}", secret);
        assert_eq!(debug_str, "***REDACTED***");
        assert!(!debug_str.contains("key=abc"));
    }

    #[test]
    fn test_sensitive_display_redaction() {
        let secret = Sensitive::new("postgres://admin:pw@localhost/gematria");
        let display_str = format!("{}", secret);
        assert_eq!(display_str, "***REDACTED***");
        assert!(!display_str.contains("admin"));
    }

    #[test]
    fn test_sensitive_into_inner() {
        let secret = Sensitive::new(String::from("gematria.db"));
        assert_eq!(secret.into_inner(), "gematria.db");
    }

    #[test]
    fn test_sensitive_inside_config_struct() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Settings {
            port: u16,
            database_url: Sensitive<String>,
        }

        let settings = Settings {
            port: 5000,
            database_url: Sensitive::new("postgres://u:secret@h/db".to_string()),
        };

        let debug_str = format!("{:?}", settings);
        assert!(debug_str.contains("5000"));
        assert!(debug_str.contains("***REDACTED***"));
        assert!(!debug_str.contains("secret"));
    }
}
