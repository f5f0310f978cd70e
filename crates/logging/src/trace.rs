//! crates/logging/src/trace.rs
//! Tracing instrumentation for registry updates, form changes and resolutions.
//!
//! All helpers are conditionally compiled behind the `tracing` feature flag
//! and collapse to no-op inline functions when it is disabled. Events use
//! targets below [`TARGET_PREFIX`] so the tracing bridge can recognise and
//! skip them.

#[cfg(feature = "tracing")]
use crate::form::Form;
#[cfg(feature = "tracing")]
use crate::resolver::Resolution;

/// Prefix shared by every target emitted from this module.
#[cfg(feature = "tracing")]
pub(crate) const TARGET_PREFIX: &str = "formlog::";

#[cfg(feature = "tracing")]
const REGISTRY_TARGET: &str = "formlog::registry";

#[cfg(feature = "tracing")]
const CONTEXT_TARGET: &str = "formlog::context";

#[cfg(feature = "tracing")]
const RESOLVE_TARGET: &str = "formlog::resolve";

/// Traces an explicit form setting being recorded.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_form_setting(form: &str, enabled: bool) {
    tracing::debug!(
        target: REGISTRY_TARGET,
        form = %form,
        enabled = enabled,
        "form_setting"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_form_setting(_form: &str, _enabled: bool) {}

/// Traces a category definition or extension.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_categorize(category: &str, members: usize) {
    tracing::debug!(
        target: REGISTRY_TARGET,
        category = %category,
        members = members,
        "category_defined"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_categorize(_category: &str, _members: usize) {}

/// Traces a form becoming current.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_form_entered(form: &Form, depth: usize) {
    tracing::trace!(
        target: CONTEXT_TARGET,
        form = %form,
        depth = depth,
        "form_entered"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_form_entered(_form: &crate::form::Form, _depth: usize) {}

/// Traces a form being left and the form restored in its place.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_form_left(left: &Form, restored: Option<&Form>) {
    tracing::trace!(
        target: CONTEXT_TARGET,
        left = %left,
        restored = %restored.map_or("", Form::as_str),
        "form_left"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_form_left(_left: &crate::form::Form, _restored: Option<&crate::form::Form>) {}

/// Traces the outcome of a resolution.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_resolution(form: Option<&Form>, resolution: Resolution) {
    tracing::trace!(
        target: RESOLVE_TARGET,
        form = %form.map_or("", Form::as_str),
        emit = resolution.emits(),
        source = %resolution.source(),
        "resolved"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_resolution(
    _form: Option<&crate::form::Form>,
    _resolution: crate::resolver::Resolution,
) {
}

#[cfg(all(test, feature = "tracing"))]
mod tests {
    use super::*;

    #[test]
    fn targets_share_prefix() {
        for target in [REGISTRY_TARGET, CONTEXT_TARGET, RESOLVE_TARGET] {
            assert!(target.starts_with(TARGET_PREFIX));
        }
    }

    #[test]
    fn helpers_run_without_subscriber() {
        let form = Form::new("foo");
        trace_form_setting("foo", true);
        trace_categorize("foo", 2);
        trace_form_entered(&form, 1);
        trace_form_left(&form, None);
        trace_resolution(Some(&form), crate::FormRegistry::new().resolve(Some(&form)));
    }
}
