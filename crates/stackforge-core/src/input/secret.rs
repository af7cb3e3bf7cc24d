//! Credential wrapper that never prints its value

use std::fmt;

const MASK: &str = "********";

/// A credential held only for the duration of a run.
///
/// `Debug` and `Display` both print a mask, so a secret can sit inside any
/// struct that derives `Debug` without leaking into logs or error output.
/// The only way to read it is [`Secret::expose`].
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw value, for rendering credential-bearing templates only
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_is_masked() {
        let secret = Secret::new("hunter2");
        assert_eq!(format!("{}", secret), MASK);
        assert_eq!(format!("{:?}", secret), MASK);
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn test_secret_masked_inside_derived_debug() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Holder {
            password: Secret,
        }

        let rendered = format!("{:?}", Holder { password: Secret::new("hunter2") });
        assert!(!rendered.contains("hunter2"));
    }
}
