//! crates/logging/src/form.rs
//! Case-normalised form identifiers.

use std::borrow::Borrow;
use std::fmt;

/// Reserved form name that addresses the default for unconfigured forms.
///
/// Passing this name (in any letter case) to
/// [`FormRegistry::set_form_log`](crate::FormRegistry::set_form_log) updates
/// the unspecified default instead of creating a form entry.
pub const UNSPECIFIED: &str = "unspecified";

/// A lower-cased classification label attached to log calls.
///
/// A form acts either as a *type* or as a *category*. The role is not stored
/// here: the registry decides it at resolution time by checking whether a
/// category with this exact name has been defined.
///
/// # Examples
///
/// ```
/// use logging::Form;
///
/// let form = Form::new("Network");
/// assert_eq!(form.as_str(), "network");
/// assert_eq!(form, Form::from("NETWORK"));
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Form(String);

impl Form {
    /// Creates a form from `name`, lower-casing it.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.to_lowercase())
    }

    /// Returns the normalised name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reports whether this is the reserved [`UNSPECIFIED`] name.
    #[must_use]
    pub fn is_unspecified(&self) -> bool {
        self.0 == UNSPECIFIED
    }

    /// Consumes the form and returns the normalised name.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Form {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Form {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Form {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Form {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl PartialEq<str> for Form {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Form {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lowercases_name() {
        assert_eq!(Form::new("Foo1").as_str(), "foo1");
        assert_eq!(Form::new("ÄRGER").as_str(), "ärger");
    }

    #[test]
    fn unspecified_detection_ignores_case() {
        assert!(Form::new("UNSPECIFIED").is_unspecified());
        assert!(Form::new("Unspecified").is_unspecified());
        assert!(!Form::new("unspecified2").is_unspecified());
    }

    #[test]
    fn display_matches_normalised_name() {
        assert_eq!(Form::new("Methods").to_string(), "methods");
    }

    #[test]
    fn compares_against_str() {
        let form = Form::from(String::from("Bar"));
        assert_eq!(form, "bar");
        assert_ne!(form, "Bar");
    }

    #[test]
    fn borrow_allows_str_lookups() {
        let mut set = rustc_hash::FxHashSet::default();
        set.insert(Form::new("Foo"));
        assert!(set.contains("foo"));
        assert!(!set.contains("Foo"));
    }
}
