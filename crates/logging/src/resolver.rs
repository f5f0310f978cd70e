//! crates/logging/src/resolver.rs
//! Precedence rules deciding whether a message under a form is emitted.

use std::fmt;

use crate::form::Form;
use crate::registry::FormRegistry;
use crate::setting::Setting;
use crate::trace;

/// The rule that produced a [`Resolution`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VerdictSource {
    /// The master switch is off.
    MasterSwitch,
    /// The current form is a category with an explicit setting.
    CategorySetting,
    /// The current form is a category without a setting; categories default to enabled.
    CategoryDefault,
    /// The current type has an explicit setting, which dominates its categories.
    TypeSetting,
    /// The current type has no setting; at least one of its categories does.
    CategoryMembership,
    /// Neither the type nor any of its categories has a setting.
    UnspecifiedDefault,
}

impl VerdictSource {
    /// Short human-readable description of the rule.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::MasterSwitch => "master switch off",
            Self::CategorySetting => "category setting",
            Self::CategoryDefault => "category default",
            Self::TypeSetting => "type setting",
            Self::CategoryMembership => "category membership",
            Self::UnspecifiedDefault => "unspecified default",
        }
    }
}

impl fmt::Display for VerdictSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Outcome of resolving the current form against a [`FormRegistry`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Resolution {
    emit: bool,
    source: VerdictSource,
}

impl Resolution {
    const fn new(emit: bool, source: VerdictSource) -> Self {
        Self { emit, source }
    }

    /// Reports whether the message should be passed to the consumer.
    #[must_use]
    pub const fn emits(self) -> bool {
        self.emit
    }

    /// Returns the rule that decided the outcome.
    #[must_use]
    pub const fn source(self) -> VerdictSource {
        self.source
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.emit { "enabled" } else { "disabled" };
        write!(f, "{verdict} ({})", self.source)
    }
}

impl FormRegistry {
    /// Decides whether a message logged under `form` is emitted.
    ///
    /// Rules, in order:
    ///
    /// 1. The master switch off suppresses everything.
    /// 2. A form naming a category uses the category's setting, defaulting
    ///    to enabled.
    /// 3. Otherwise the form is a type (or absent). An explicit type setting
    ///    wins over its categories; without one, any enabled category enables
    ///    the type and any other explicit category setting disables it.
    ///    With nothing set the unspecified default applies.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{Form, FormRegistry, VerdictSource};
    ///
    /// let mut registry = FormRegistry::new();
    /// registry.categorize("foo", ["foo1", "foo2"]);
    /// registry.set_form_log("foo", true);
    /// registry.set_form_log("foo2", false);
    ///
    /// let foo1 = registry.resolve(Some(&Form::new("foo1")));
    /// assert!(foo1.emits());
    /// assert_eq!(foo1.source(), VerdictSource::CategoryMembership);
    ///
    /// let foo2 = registry.resolve(Some(&Form::new("foo2")));
    /// assert!(!foo2.emits());
    /// assert_eq!(foo2.source(), VerdictSource::TypeSetting);
    /// ```
    #[must_use]
    pub fn resolve(&self, form: Option<&Form>) -> Resolution {
        let resolution = self.resolve_inner(form.map(Form::as_str));
        trace::trace_resolution(form, resolution);
        resolution
    }

    fn resolve_inner(&self, form: Option<&str>) -> Resolution {
        if !self.is_enabled() {
            return Resolution::new(false, VerdictSource::MasterSwitch);
        }

        if let Some(category) = form.filter(|name| self.is_category(name)) {
            return match self.setting(category).flag() {
                Some(enabled) => Resolution::new(enabled, VerdictSource::CategorySetting),
                None => Resolution::new(true, VerdictSource::CategoryDefault),
            };
        }

        let type_verdict = form.map_or(Setting::Unset, |ty| self.setting(ty));
        let category_verdict = form.map_or(Setting::Unset, |ty| self.category_verdict(ty));

        match (type_verdict.flag(), category_verdict.flag()) {
            (Some(enabled), _) => Resolution::new(enabled, VerdictSource::TypeSetting),
            (None, Some(enabled)) => Resolution::new(enabled, VerdictSource::CategoryMembership),
            (None, None) => {
                Resolution::new(self.unspecified_default(), VerdictSource::UnspecifiedDefault)
            }
        }
    }

    /// Combined verdict of every category containing `ty`.
    ///
    /// Any enabled category wins. Otherwise a disabled category disables,
    /// and categories without settings are ignored.
    #[must_use]
    pub fn category_verdict(&self, ty: &str) -> Setting {
        let mut verdict = Setting::Unset;
        for category in self.categories_of(ty) {
            match self.setting(category) {
                Setting::Enabled => return Setting::Enabled,
                Setting::Disabled => verdict = Setting::Disabled,
                Setting::Unset => {}
            }
        }
        verdict
    }
}
