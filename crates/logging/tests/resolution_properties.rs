//! Property tests for the resolver and the context stack.

use logging::{Form, FormRegistry, Logger, VerdictSource};
use proptest::prelude::*;

fn form_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

proptest! {
    #[test]
    fn unconfigured_forms_follow_switches(name in form_name(), master: bool, unspecified: bool) {
        let mut registry = FormRegistry::new();
        registry.set_enabled(master);
        registry.set_unspecified_default(unspecified);

        let resolution = registry.resolve(Some(&Form::new(&name)));
        prop_assert_eq!(resolution.emits(), master && unspecified);
    }

    #[test]
    fn unset_category_follows_master_only(
        category in form_name(),
        members in proptest::collection::vec(form_name(), 0..4),
        master: bool,
        unspecified: bool,
    ) {
        let mut registry = FormRegistry::new();
        registry.categorize(&category, members);
        registry.set_enabled(master);
        registry.set_unspecified_default(unspecified);

        let resolution = registry.resolve(Some(&Form::new(&category)));
        prop_assert_eq!(resolution.emits(), master);
    }

    #[test]
    fn type_setting_beats_category(
        ty in form_name(),
        category in form_name(),
        type_on: bool,
        category_on: bool,
    ) {
        prop_assume!(ty != category);
        let mut registry = FormRegistry::new();
        registry.categorize(&category, [ty.clone()]);
        registry.set_form_log(&ty, type_on);
        registry.set_form_log(&category, category_on);

        let resolution = registry.resolve(Some(&Form::new(&ty)));
        prop_assert_eq!(resolution.emits(), type_on);
        prop_assert_eq!(resolution.source(), VerdictSource::TypeSetting);
    }

    #[test]
    fn enabled_category_enables_unset_type(ty in form_name(), category in form_name()) {
        prop_assume!(ty != category);
        let mut registry = FormRegistry::new();
        registry.set_unspecified_default(false);
        registry.categorize(&category, [ty.clone()]);
        registry.set_form_log(&category, true);

        prop_assert!(registry.resolve(Some(&Form::new(&ty))).emits());
    }

    #[test]
    fn add_types_is_idempotent(
        category in form_name(),
        initial in proptest::collection::vec(form_name(), 0..5),
        added in proptest::collection::vec(form_name(), 0..5),
    ) {
        let mut registry = FormRegistry::new();
        registry.categorize(&category, initial);
        registry.add_types(&category, added.clone());
        let once = registry.members(&category).map(<[String]>::to_vec);

        registry.add_types(&category, added);
        prop_assert_eq!(registry.members(&category).map(<[String]>::to_vec), once);
    }

    #[test]
    fn reset_restores_prior_form_above_root(names in proptest::collection::vec(form_name(), 1..8)) {
        let mut log = Logger::with_consumer(Vec::<String>::new());
        for name in &names {
            log.set_type(name);
        }

        for expected in names.iter().rev().skip(1) {
            log.reset();
            prop_assert_eq!(log.form(), Some(&Form::new(expected)));
        }

        log.reset();
        prop_assert_eq!(log.form(), Some(&Form::new(&names[0])));
        prop_assert_eq!(log.depth(), 1);
    }
}
