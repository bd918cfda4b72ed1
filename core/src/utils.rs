//! Utility functions and types.

use std::fmt::Debug;

/// Debug wrapper that keeps key material out of log output.
///
/// Credentials carry an access key and a secret key; their `Debug` impls go
/// through this wrapper so that neither can end up in a log line verbatim.
/// Values of 12 characters or more keep their first and last three characters
/// so that two keys remain distinguishable, anything shorter is masked
/// entirely.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.len() {
            0 => f.write_str("EMPTY"),
            1..=11 => f.write_str("***"),
            n => write!(f, "{}***{}", &self.0[..3], &self.0[n - 3..]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_masks_short_values() {
        assert_eq!(format!("{:?}", Redact::from("")), "EMPTY");
        assert_eq!(format!("{:?}", Redact::from("secret")), "***");
        // 11 characters is still too short to keep any edges.
        assert_eq!(format!("{:?}", Redact::from("elevenchars")), "***");
    }

    #[test]
    fn test_redact_keeps_edges_of_long_keys() {
        let access_key = "AKIDEXAMPLEKEY".to_string();
        assert_eq!(format!("{:?}", Redact::from(&access_key)), "AKI***KEY");
    }

    #[test]
    fn test_redact_never_echoes_the_middle() {
        let secret_key = "long-enough-signing-secret";
        let out = format!("{:?}", Redact::from(secret_key));

        assert_eq!(out, "lon***ret");
        assert!(!out.contains("signing"));
    }
}
