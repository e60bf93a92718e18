//! Alias table mapping `-x` / `--name` to their descriptors.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::descriptor::{Descriptor, Kind, SharedDescriptor};
use crate::error::{RegistrationError, RegistrationResult};

/// Alias collection accepted by `Parser::flag` and `Parser::opt`.
///
/// Accepts a single name or multiple names via array, slice or vector.
pub trait Aliases {
    fn into_aliases(self) -> Vec<String>;
}

impl Aliases for &str {
    fn into_aliases(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl Aliases for String {
    fn into_aliases(self) -> Vec<String> {
        vec![self]
    }
}

impl Aliases for &[&str] {
    fn into_aliases(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl<const N: usize> Aliases for [&str; N] {
    fn into_aliases(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl Aliases for Vec<String> {
    fn into_aliases(self) -> Vec<String> {
        self
    }
}

impl Aliases for Vec<&str> {
    fn into_aliases(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Alias {
    Short(char),
    Long(String),
}

impl Alias {
    /// `-` plus one non-dash character, or `--` plus a name without `=`.
    pub(crate) fn classify(raw: &str) -> Option<Self> {
        if let Some(name) = raw.strip_prefix("--") {
            if name.is_empty() || name.contains('=') {
                return None;
            }
            return Some(Self::Long(raw.to_string()));
        }

        let mut chars = raw.strip_prefix('-')?.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != '-' => Some(Self::Short(c)),
            _ => None,
        }
    }
}

#[derive(Default)]
pub(crate) struct Registry {
    short: HashMap<char, SharedDescriptor>,
    long: HashMap<String, SharedDescriptor>,
    order: Vec<SharedDescriptor>,
}

impl Registry {
    /// Bind `aliases` to a new descriptor of `kind`.
    ///
    /// Every alias is checked before anything is inserted, so a failed call
    /// leaves the registry unchanged.
    pub(crate) fn register(
        &mut self,
        aliases: Vec<String>,
        kind: Kind,
    ) -> RegistrationResult<SharedDescriptor> {
        if aliases.is_empty() {
            return Err(RegistrationError::NoAliases);
        }

        let mut classified: Vec<Alias> = Vec::with_capacity(aliases.len());
        for raw in &aliases {
            let alias = Alias::classify(raw)
                .ok_or_else(|| RegistrationError::InvalidAliasSyntax(raw.clone()))?;
            if self.contains(&alias) || classified.contains(&alias) {
                return Err(RegistrationError::DuplicateAlias(raw.clone()));
            }
            classified.push(alias);
        }

        let descriptor = Rc::new(RefCell::new(Descriptor::new(aliases, kind)));
        for alias in classified {
            match alias {
                Alias::Short(c) => {
                    self.short.insert(c, Rc::clone(&descriptor));
                }
                Alias::Long(name) => {
                    self.long.insert(name, Rc::clone(&descriptor));
                }
            }
        }
        self.order.push(Rc::clone(&descriptor));

        Ok(descriptor)
    }

    /// Exact lookup of a full alias such as `-v` or `--verbose`.
    pub(crate) fn lookup(&self, alias: &str) -> Option<&SharedDescriptor> {
        match Alias::classify(alias)? {
            Alias::Short(c) => self.short(c),
            Alias::Long(name) => self.long(&name),
        }
    }

    pub(crate) fn short(&self, c: char) -> Option<&SharedDescriptor> {
        self.short.get(&c)
    }

    pub(crate) fn long(&self, alias: &str) -> Option<&SharedDescriptor> {
        self.long.get(alias)
    }

    /// Descriptors in registration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &SharedDescriptor> {
        self.order.iter()
    }

    fn contains(&self, alias: &Alias) -> bool {
        match alias {
            Alias::Short(c) => self.short.contains_key(c),
            Alias::Long(name) => self.long.contains_key(name),
        }
    }
}
