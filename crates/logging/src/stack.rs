//! crates/logging/src/stack.rs
//! Context stack tracking the current form across nested calls.

use crate::form::Form;

/// Stack of forms entered by nested log scopes.
///
/// The top entry is the current form. The bottom entry is permanent:
/// [`reset`](Self::reset) never pops the last remaining form, so the first
/// form ever entered stays current once every nested scope has been left.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FormStack {
    forms: Vec<Form>,
}

impl FormStack {
    /// Creates an empty stack with no current form.
    #[must_use]
    pub const fn new() -> Self {
        Self { forms: Vec::new() }
    }

    /// Makes `form` the current form.
    pub fn push(&mut self, form: Form) {
        self.forms.push(form);
    }

    /// Restores the previous form, returning the one left behind.
    ///
    /// Returns `None` without changing anything when at most one form is
    /// on the stack.
    pub fn reset(&mut self) -> Option<Form> {
        if self.forms.len() > 1 {
            self.forms.pop()
        } else {
            None
        }
    }

    /// Returns the current form.
    #[must_use]
    pub fn current(&self) -> Option<&Form> {
        self.forms.last()
    }

    /// Number of forms on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.forms.len()
    }

    /// Reports whether no form has been entered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_has_no_current_form() {
        let stack = FormStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.current(), None);
    }

    #[test]
    fn reset_restores_previous_form() {
        let mut stack = FormStack::new();
        stack.push(Form::new("foo1"));
        stack.push(Form::new("foo2"));

        assert_eq!(stack.reset(), Some(Form::new("foo2")));
        assert_eq!(stack.current(), Some(&Form::new("foo1")));
    }

    #[test]
    fn reset_keeps_root_form() {
        let mut stack = FormStack::new();
        stack.push(Form::new("root"));

        assert_eq!(stack.reset(), None);
        assert_eq!(stack.reset(), None);
        assert_eq!(stack.current(), Some(&Form::new("root")));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn reset_on_empty_stack_is_noop() {
        let mut stack = FormStack::new();
        assert_eq!(stack.reset(), None);
        assert!(stack.is_empty());
    }
}
