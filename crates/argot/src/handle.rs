//! Caller-facing handles returned by registration.
//!
//! A handle shares its descriptor with the parser, so it can be configured
//! with the builder methods right after registration and read after `parse`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::descriptor::{SharedDescriptor, Values};

/// A flag: takes no value and counts how often it was given.
#[derive(Clone)]
pub struct Flag {
    descriptor: SharedDescriptor,
}

impl Flag {
    pub(crate) fn new(descriptor: SharedDescriptor) -> Self {
        Self { descriptor }
    }

    /// Set the help text shown next to the aliases.
    pub fn help(self, text: impl Into<String>) -> Self {
        self.descriptor.borrow_mut().help = text.into();
        self
    }

    /// Number of times the flag appeared (`-vvv` counts 3).
    pub fn count(&self) -> usize {
        self.descriptor.borrow().occurrences
    }

    pub fn is_set(&self) -> bool {
        self.count() > 0
    }

    pub fn aliases(&self) -> Vec<String> {
        self.descriptor.borrow().aliases.clone()
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descriptor = self.descriptor.borrow();
        f.debug_struct("Flag")
            .field("aliases", &descriptor.aliases)
            .field("count", &descriptor.occurrences)
            .finish()
    }
}

/// An option taking one value per occurrence, converted to `T`.
///
/// Every value is kept in order; `last`/`get` give "last one wins" semantics
/// and `all` gives every occurrence.
pub struct Opt<T> {
    descriptor: SharedDescriptor,
    values: Rc<RefCell<Values<T>>>,
}

impl<T> Clone for Opt<T> {
    fn clone(&self) -> Self {
        Self {
            descriptor: Rc::clone(&self.descriptor),
            values: Rc::clone(&self.values),
        }
    }
}

impl<T> Opt<T> {
    pub(crate) fn new(descriptor: SharedDescriptor, values: Rc<RefCell<Values<T>>>) -> Self {
        Self { descriptor, values }
    }

    /// Placeholder for the value in help output (default `VALUE`).
    pub fn metavar(self, name: impl Into<String>) -> Self {
        self.descriptor.borrow_mut().metavar = name.into();
        self
    }

    /// Fail `parse` unless this option received a value (or has an `init` seed).
    pub fn required(self) -> Self {
        self.descriptor.borrow_mut().required = true;
        self
    }

    pub fn help(self, text: impl Into<String>) -> Self {
        self.descriptor.borrow_mut().help = text.into();
        self
    }

    /// Seed a value used until one is parsed from the arguments.
    pub fn init(self, value: T) -> Self {
        self.values.borrow_mut().seed(value);
        self
    }

    /// Number of times the option appeared, including ones whose value was
    /// missing or failed to convert.
    pub fn count(&self) -> usize {
        self.descriptor.borrow().occurrences
    }

    /// Whether at least one value was parsed from the arguments.
    pub fn is_present(&self) -> bool {
        !self.values.borrow().parsed().is_empty()
    }

    /// Number of values visible through `all`.
    pub fn len(&self) -> usize {
        self.values.borrow().visible().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn aliases(&self) -> Vec<String> {
        self.descriptor.borrow().aliases.clone()
    }

    /// Borrow the visible values without cloning them.
    pub fn with_values<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(self.values.borrow().visible())
    }
}

impl<T: Clone> Opt<T> {
    pub fn first(&self) -> Option<T> {
        self.values.borrow().visible().first().cloned()
    }

    pub fn last(&self) -> Option<T> {
        self.values.borrow().visible().last().cloned()
    }

    /// Same as [`Opt::last`].
    pub fn get(&self) -> Option<T> {
        self.last()
    }

    /// Parsed values in argument order, or the seed if nothing was parsed.
    pub fn all(&self) -> Vec<T> {
        self.values.borrow().visible().to_vec()
    }
}

impl<T: fmt::Debug> fmt::Debug for Opt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descriptor = self.descriptor.borrow();
        let values = self.values.borrow();
        f.debug_struct("Opt")
            .field("aliases", &descriptor.aliases)
            .field("count", &descriptor.occurrences)
            .field("values", &values.visible())
            .finish()
    }
}
