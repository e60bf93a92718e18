//! Token scanner: resolves each argument against the registry and records
//! occurrences, values and errors as it goes.

use crate::descriptor::{SharedDescriptor, SharedStore};
use crate::error::ParseError;
use crate::registry::Registry;

/// A valued option waiting for the next token.
struct Pending {
    alias: String,
    store: SharedStore,
}

/// State of one scan over an argument list.
#[derive(Default)]
pub(crate) struct ParseState {
    pub(crate) positionals: Vec<String>,
    pub(crate) errors: Vec<ParseError>,
    pending: Option<Pending>,
    flags_disabled: bool,
}

impl ParseState {
    /// Run the whole argument list through the dispatcher.
    ///
    /// Descriptor counts and values are updated in place while scanning.
    pub(crate) fn scan<I>(registry: &Registry, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut state = Self::default();
        for token in args {
            state.step(registry, token);
        }
        state.finish();
        state
    }

    fn step(&mut self, registry: &Registry, token: String) {
        if let Some(pending) = self.pending.take() {
            self.accept_value(&pending.alias, &pending.store, &token);
            return;
        }

        if self.flags_disabled {
            self.positionals.push(token);
        } else if token == "--" {
            self.flags_disabled = true;
        } else if token.len() > 2 && token.starts_with("--") {
            self.long_option(registry, &token);
        } else if token.len() >= 2 && token.starts_with('-') {
            self.short_cluster(registry, &token);
        } else {
            self.positionals.push(token);
        }
    }

    /// `--name`, `--name=value` or `--name value`.
    fn long_option(&mut self, registry: &Registry, token: &str) {
        let (alias, inline) = match token.split_once('=') {
            Some((alias, value)) => (alias, Some(value)),
            None => (token, None),
        };

        let Some(descriptor) = registry.long(alias) else {
            tracing::trace!(alias, "unknown long option");
            self.errors.push(ParseError::UnknownOption(alias.to_string()));
            return;
        };

        match (occur(descriptor), inline) {
            (None, None) => {}
            (None, Some(value)) => self.errors.push(ParseError::UnexpectedValue {
                alias: alias.to_string(),
                value: value.to_string(),
            }),
            (Some(store), Some(value)) => self.accept_value(alias, &store, value),
            (Some(store), None) => self.await_value(alias.to_string(), store),
        }
    }

    /// `-a`, `-abc`, `-abcVALUE` or `-abc VALUE`.
    ///
    /// The first valued option in the cluster takes the rest of the token (or
    /// the next token) as its value and ends the cluster.
    fn short_cluster(&mut self, registry: &Registry, token: &str) {
        let body = &token[1..];
        for (offset, flag) in body.char_indices() {
            let Some(descriptor) = registry.short(flag) else {
                tracing::trace!(%flag, token, "unknown short option");
                self.errors.push(ParseError::UnknownShortOption {
                    flag,
                    token: token.to_string(),
                });
                continue;
            };

            let Some(store) = occur(descriptor) else {
                continue;
            };

            let alias = format!("-{flag}");
            let rest = &body[offset + flag.len_utf8()..];
            if rest.is_empty() {
                self.await_value(alias, store);
            } else {
                self.accept_value(&alias, &store, rest);
            }
            return;
        }
    }

    fn await_value(&mut self, alias: String, store: SharedStore) {
        self.pending = Some(Pending { alias, store });
    }

    fn accept_value(&mut self, alias: &str, store: &SharedStore, raw: &str) {
        if let Err(reason) = store.borrow_mut().accept(raw) {
            self.errors.push(ParseError::ValueConversionFailed {
                alias: alias.to_string(),
                raw: raw.to_string(),
                reason,
            });
        }
    }

    /// The argument list ended while a value was still expected.
    fn finish(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.errors.push(ParseError::MissingValue {
                alias: pending.alias,
            });
        }
    }
}

/// Count one occurrence and hand back the value store of a valued option.
fn occur(descriptor: &SharedDescriptor) -> Option<SharedStore> {
    let mut descriptor = descriptor.borrow_mut();
    descriptor.occurrences += 1;
    descriptor.store()
}
