//! crates/logging/src/setting.rs
//! Tri-state enable flag for forms.

/// Explicit logging setting of a form.
///
/// Lookups never fail: a form without an entry reports [`Setting::Unset`],
/// which the resolver treats as "defer to the next rule".
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Setting {
    /// Logging explicitly turned on.
    Enabled,
    /// Logging explicitly turned off.
    Disabled,
    /// No explicit setting.
    #[default]
    Unset,
}

impl Setting {
    /// Returns the explicit flag, or `None` for [`Setting::Unset`].
    #[must_use]
    pub const fn flag(self) -> Option<bool> {
        match self {
            Self::Enabled => Some(true),
            Self::Disabled => Some(false),
            Self::Unset => None,
        }
    }

    /// Reports whether the setting carries an explicit value.
    #[must_use]
    pub const fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }
}

impl From<bool> for Setting {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

impl From<Option<bool>> for Setting {
    fn from(flag: Option<bool>) -> Self {
        flag.map_or(Self::Unset, Self::from)
    }
}
