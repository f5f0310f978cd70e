//! crates/logging/src/guard.rs
//! Scoped form entry for [`Logger`].

use std::ops::{Deref, DerefMut};

use crate::logger::Logger;

/// RAII guard returned by [`Logger::enter_type`] and [`Logger::enter_category`].
///
/// While the guard is alive the entered form is current. Dropping it calls
/// [`Logger::reset`], restoring the previous form, unless the entered form was
/// the logger's first one, which stays current. The guard dereferences to the
/// logger, so nested scopes can be opened from it directly.
///
/// # Examples
///
/// ```
/// use logging::Logger;
///
/// let mut log = Logger::with_consumer(Vec::<String>::new());
/// log.set_form_log("noisy", false);
/// log.set_type("main");
/// {
///     let mut scope = log.enter_type("noisy");
///     scope.out("suppressed")?;
///     {
///         let mut inner = scope.enter_type("detail");
///         inner.out("printed")?;
///     }
///     assert_eq!(scope.form().map(|form| form.as_str()), Some("noisy"));
/// }
///
/// assert_eq!(log.form().map(|form| form.as_str()), Some("main"));
/// assert_eq!(log.consumer(), &["printed"]);
/// # Ok::<(), std::io::Error>(())
/// ```
#[must_use = "dropping the guard immediately restores the previous form"]
pub struct FormGuard<'a, C> {
    logger: Option<&'a mut Logger<C>>,
}

impl<'a, C> FormGuard<'a, C> {
    pub(crate) const fn new(logger: &'a mut Logger<C>) -> Self {
        Self {
            logger: Some(logger),
        }
    }

    /// Consumes the guard without restoring the previous form.
    ///
    /// The entered form stays current until an explicit
    /// [`Logger::reset`].
    pub fn into_inner(mut self) -> &'a mut Logger<C> {
        self.logger
            .take()
            .expect("form guard must own a logger")
    }
}

impl<C> Drop for FormGuard<'_, C> {
    fn drop(&mut self) {
        if let Some(logger) = self.logger.take() {
            logger.reset();
        }
    }
}

impl<C> Deref for FormGuard<'_, C> {
    type Target = Logger<C>;

    fn deref(&self) -> &Self::Target {
        self.logger
            .as_deref()
            .expect("form guard remains active while borrowed")
    }
}

impl<C> DerefMut for FormGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.logger
            .as_deref_mut()
            .expect("form guard remains active while borrowed")
    }
}

#[cfg(test)]
mod tests {
    use crate::{Form, Logger};

    fn logger() -> Logger<Vec<String>> {
        Logger::with_consumer(Vec::<String>::new())
    }

    #[test]
    fn drop_restores_previous_form() {
        let mut log = logger();
        log.set_type("outer");
        {
            let guard = log.enter_type("inner");
            assert_eq!(guard.form(), Some(&Form::new("inner")));
        }
        assert_eq!(log.form(), Some(&Form::new("outer")));
    }

    #[test]
    fn first_form_survives_its_guard() {
        let mut log = logger();
        {
            let _guard = log.enter_category("root");
        }
        assert_eq!(log.form(), Some(&Form::new("root")));
    }

    #[test]
    fn nested_guards_unwind_in_order() {
        let mut log = logger();
        log.set_type("base");
        {
            let mut first = log.enter_type("one");
            {
                let second = first.enter_type("two");
                assert_eq!(second.depth(), 3);
            }
            assert_eq!(first.form(), Some(&Form::new("one")));
        }
        assert_eq!(log.depth(), 1);
    }

    #[test]
    fn into_inner_skips_restoration() {
        let mut log = logger();
        log.set_type("base");
        {
            let inner = log.enter_type("kept").into_inner();
            inner.out("m").expect("consume");
        }
        assert_eq!(log.form(), Some(&Form::new("kept")));
        assert_eq!(log.depth(), 2);
    }

    #[test]
    fn guard_resolves_against_entered_form() {
        let mut log = logger();
        log.set_form_log("quiet", false);
        log.set_type("base");
        {
            let mut guard = log.enter_type("quiet");
            assert!(!guard.out("hidden").expect("consume"));
        }
        assert!(log.out("shown").expect("consume"));
        assert_eq!(log.consumer(), &["shown"]);
    }
}
