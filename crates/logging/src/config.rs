//! crates/logging/src/config.rs
//! Textual and file-based form configuration.
//!
//! Directives are the compact form used on command lines:
//!
//! | Token            | Effect                         |
//! |------------------|--------------------------------|
//! | `NAME`, `+NAME`  | enable `NAME`                  |
//! | `-NAME`          | disable `NAME`                 |
//! | `NAME=VALUE`     | `on`/`off` and their synonyms  |
//!
//! Category definitions read `CATEGORY=TYPE[,TYPE...]`. A [`FormConfig`]
//! bundles both for storage in a JSON document when the `serde` feature is
//! enabled.

use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::form::Form;
use crate::registry::FormRegistry;

/// Parses a directive token into the form name and the requested setting.
///
/// The returned name is trimmed but not lower-cased; the registry normalises
/// it when the setting is recorded.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyDirective`] for blank tokens,
/// [`ConfigError::EmptyName`] when only a sign or value is present,
/// [`ConfigError::SignedValue`] when a sign and a value are combined and
/// [`ConfigError::InvalidValue`] when the value is not a recognised switch.
pub fn parse_directive(token: &str) -> Result<(&str, bool), ConfigError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyDirective);
    }

    let (name, enabled) = if let Some((name, value)) = trimmed.split_once('=') {
        if name.trim_start().starts_with(['+', '-']) {
            return Err(ConfigError::SignedValue(trimmed.to_owned()));
        }
        let enabled = parse_switch(value.trim()).ok_or_else(|| ConfigError::InvalidValue {
            directive: trimmed.to_owned(),
            value: value.trim().to_owned(),
        })?;
        (name.trim(), enabled)
    } else if let Some(name) = trimmed.strip_prefix('-') {
        (name.trim(), false)
    } else if let Some(name) = trimmed.strip_prefix('+') {
        (name.trim(), true)
    } else {
        (trimmed, true)
    };

    if name.is_empty() {
        return Err(ConfigError::EmptyName(trimmed.to_owned()));
    }
    Ok((name, enabled))
}

/// Parses `token` with [`parse_directive`] and records it in `registry`.
///
/// # Errors
///
/// Propagates the errors of [`parse_directive`]; the registry is left
/// untouched on failure.
pub fn apply_directive(registry: &mut FormRegistry, token: &str) -> Result<(), ConfigError> {
    let (name, enabled) = parse_directive(token)?;
    registry.set_form_log(name, enabled);
    Ok(())
}

/// Splits a `CATEGORY=TYPE[,TYPE...]` definition.
///
/// Member names are trimmed and empty entries skipped. Names keep their case.
///
/// # Errors
///
/// Returns [`ConfigError::MissingTypes`] when the `=` separator or the
/// category name is missing.
pub fn parse_category_definition(definition: &str) -> Result<(&str, Vec<&str>), ConfigError> {
    let (category, types) = definition
        .split_once('=')
        .ok_or_else(|| ConfigError::MissingTypes(definition.to_owned()))?;
    let category = category.trim();
    if category.is_empty() {
        return Err(ConfigError::MissingTypes(definition.to_owned()));
    }

    let types = types
        .split(',')
        .map(str::trim)
        .filter(|ty| !ty.is_empty())
        .collect();
    Ok((category, types))
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Complete form configuration, suitable for storing alongside a program.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct FormConfig {
    /// Master switch.
    pub enabled: bool,
    /// Verdict for forms nothing else decides.
    pub unspecified: bool,
    /// Explicit settings keyed by form name.
    pub forms: BTreeMap<String, bool>,
    /// Category definitions keyed by category name.
    pub categories: BTreeMap<String, Vec<String>>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            unspecified: true,
            forms: BTreeMap::new(),
            categories: BTreeMap::new(),
        }
    }
}

impl FormConfig {
    /// Captures the current state of `registry`.
    #[must_use]
    pub fn from_registry(registry: &FormRegistry) -> Self {
        Self {
            enabled: registry.is_enabled(),
            unspecified: registry.unspecified_default(),
            forms: registry
                .settings()
                .map(|(form, enabled)| (form.as_str().to_owned(), enabled))
                .collect(),
            categories: registry
                .categories()
                .map(|(category, types)| (category.to_owned(), types.to_vec()))
                .collect(),
        }
    }

    /// Checks that every `forms` key can be stored unchanged.
    ///
    /// Keys must be lower-case, since the registry lower-cases settings, and
    /// must not be the reserved [`UNSPECIFIED`](crate::UNSPECIFIED) name, which
    /// has its own field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReservedForm`] or
    /// [`ConfigError::UnnormalizedForm`] for the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in self.forms.keys() {
            let form = Form::new(name);
            if form.is_unspecified() {
                return Err(ConfigError::ReservedForm(name.clone()));
            }
            if form.as_str() != name {
                return Err(ConfigError::UnnormalizedForm(name.clone()));
            }
        }
        Ok(())
    }

    /// Applies the configuration on top of `registry`.
    ///
    /// Categories are defined first, replacing same-named definitions, and
    /// form settings are recorded afterwards.
    ///
    /// # Errors
    ///
    /// Propagates [`validate`](Self::validate); the registry is left untouched
    /// on failure.
    pub fn apply_to(&self, registry: &mut FormRegistry) -> Result<(), ConfigError> {
        self.validate()?;
        registry.set_enabled(self.enabled);
        registry.set_unspecified_default(self.unspecified);
        for (category, types) in &self.categories {
            registry.categorize(category, types.iter().cloned());
        }
        for (form, enabled) in &self.forms {
            registry.set_form_log(form, *enabled);
        }
        Ok(())
    }

    /// Builds a fresh registry holding this configuration.
    ///
    /// # Errors
    ///
    /// Propagates [`validate`](Self::validate).
    pub fn to_registry(&self) -> Result<FormRegistry, ConfigError> {
        let mut registry = FormRegistry::new();
        self.apply_to(&mut registry)?;
        Ok(registry)
    }
}

#[cfg(feature = "serde")]
impl FormConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] when the document is malformed and the
    /// errors of [`validate`](Self::validate) for unusable form names.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses the JSON document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Json`] when it is malformed.
    pub fn from_json_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialises the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if serialisation fails.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
