//! crates/logging/src/registry.rs
//! Classification registry: category membership and per-form settings.

use rustc_hash::FxHashMap;

use crate::form::Form;
use crate::setting::Setting;
use crate::trace;

/// Long-lived configuration consulted by the resolver.
///
/// The registry stores the master switch, the default for unconfigured
/// forms, explicit per-form settings and the category definitions. It is
/// mutated only through explicit configuration calls and is read-only while
/// a message is being resolved.
///
/// Form settings are keyed by the lower-cased name, whereas category names
/// and their member types are stored exactly as given. Membership checks are
/// case-sensitive, so a type registered as `"Foo1"` never matches the current
/// form `"foo1"`.
#[derive(Clone, Debug)]
pub struct FormRegistry {
    enabled: bool,
    unspecified: bool,
    settings: FxHashMap<Form, bool>,
    categories: FxHashMap<String, Vec<String>>,
}

impl FormRegistry {
    /// Creates a registry with logging on, unconfigured forms enabled and no
    /// settings or categories.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            unspecified: true,
            settings: FxHashMap::default(),
            categories: FxHashMap::default(),
        }
    }

    /// Reports the master switch.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the master switch. When off, nothing is logged.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns the decision used for forms without any applicable setting.
    #[must_use]
    pub const fn unspecified_default(&self) -> bool {
        self.unspecified
    }

    /// Sets the decision used for forms without any applicable setting.
    pub fn set_unspecified_default(&mut self, enabled: bool) {
        self.unspecified = enabled;
    }

    /// Records an explicit setting for `form`.
    ///
    /// The name is lower-cased before storage. The reserved name
    /// [`UNSPECIFIED`](crate::UNSPECIFIED) updates the unspecified default
    /// instead. Later calls for the same form replace earlier ones.
    pub fn set_form_log(&mut self, form: &str, enabled: bool) {
        let form = Form::new(form);
        trace::trace_form_setting(form.as_str(), enabled);
        if form.is_unspecified() {
            self.unspecified = enabled;
        } else {
            self.settings.insert(form, enabled);
        }
    }

    /// Returns the explicit setting stored under `name`.
    ///
    /// The lookup uses `name` as given; settings are stored lower-cased.
    #[must_use]
    pub fn setting(&self, name: &str) -> Setting {
        Setting::from(self.settings.get(name).copied())
    }

    /// Removes the explicit setting for `form`, returning what was stored.
    pub fn clear_form_log(&mut self, form: &str) -> Setting {
        Setting::from(self.settings.remove(Form::new(form).as_str()))
    }

    /// Iterates over explicit form settings in unspecified order.
    pub fn settings(&self) -> impl Iterator<Item = (&Form, bool)> {
        self.settings.iter().map(|(form, enabled)| (form, *enabled))
    }

    /// Defines `category` with exactly the given member types, replacing any
    /// earlier definition. Names are stored verbatim and may repeat.
    pub fn categorize<I, S>(&mut self, category: &str, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members: Vec<String> = types.into_iter().map(Into::into).collect();
        trace::trace_categorize(category, members.len());
        self.categories.insert(category.to_owned(), members);
    }

    /// Appends types to `category`, skipping those already present.
    ///
    /// When the category is not defined yet this behaves like
    /// [`categorize`](Self::categorize), keeping the given list verbatim.
    pub fn add_types<I, S>(&mut self, category: &str, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(members) = self.categories.get_mut(category) else {
            self.categorize(category, types);
            return;
        };

        for ty in types {
            let ty = ty.into();
            if !members.contains(&ty) {
                members.push(ty);
            }
        }
        trace::trace_categorize(category, members.len());
    }

    /// Reports whether `form` names a defined category (exact match).
    #[must_use]
    pub fn is_category(&self, form: &str) -> bool {
        self.categories.contains_key(form)
    }

    /// Returns the member types of `category`.
    #[must_use]
    pub fn members(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Iterates over the categories listing `ty` as a member.
    ///
    /// Matching is exact. The iteration order is unspecified.
    pub fn categories_of<'a>(&'a self, ty: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.categories
            .iter()
            .filter(move |(_, members)| members.iter().any(|member| member == ty))
            .map(|(category, _)| category.as_str())
    }

    /// Iterates over every defined category and its members.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(category, members)| (category.as_str(), members.as_slice()))
    }
}

impl Default for FormRegistry {
    fn default() -> Self {
        Self::new()
    }
}
