//! Per-option metadata and the state accumulated while parsing.

use std::cell::RefCell;
use std::fmt::{self, Display};
use std::rc::Rc;
use std::str::FromStr;

pub(crate) const DEFAULT_METAVAR: &str = "VALUE";

pub(crate) type SharedDescriptor = Rc<RefCell<Descriptor>>;
pub(crate) type SharedStore = Rc<RefCell<dyn ValueStore>>;

/// Text-to-value conversion for one option.
pub(crate) type Converter<T> = Box<dyn Fn(&str) -> Result<T, String>>;

#[derive(Clone)]
pub(crate) enum Kind {
    Flag,
    Valued(SharedStore),
}

pub(crate) struct Descriptor {
    pub(crate) aliases: Vec<String>,
    pub(crate) kind: Kind,
    pub(crate) required: bool,
    pub(crate) metavar: String,
    pub(crate) help: String,
    pub(crate) occurrences: usize,
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("aliases", &self.aliases)
            .field("takes_value", &self.takes_value())
            .field("required", &self.required)
            .field("occurrences", &self.occurrences)
            .finish_non_exhaustive()
    }
}

impl Descriptor {
    pub(crate) fn new(aliases: Vec<String>, kind: Kind) -> Self {
        Self {
            aliases,
            kind,
            required: false,
            metavar: DEFAULT_METAVAR.to_string(),
            help: String::new(),
            occurrences: 0,
        }
    }

    pub(crate) fn takes_value(&self) -> bool {
        matches!(self.kind, Kind::Valued(_))
    }

    /// The value store of a valued option, `None` for flags.
    pub(crate) fn store(&self) -> Option<SharedStore> {
        match &self.kind {
            Kind::Flag => None,
            Kind::Valued(store) => Some(Rc::clone(store)),
        }
    }

    /// Whether a value is available, parsed or seeded. Flags always are.
    pub(crate) fn has_value(&self) -> bool {
        match &self.kind {
            Kind::Flag => true,
            Kind::Valued(store) => store.borrow().has_value(),
        }
    }
}

/// Type-erased side of `Values<T>` the dispatcher talks to.
pub(crate) trait ValueStore {
    /// Convert `raw` and append it; the error is the converter's message.
    fn accept(&mut self, raw: &str) -> Result<(), String>;

    fn has_value(&self) -> bool;
}

/// Values of one `Opt<T>`.
///
/// `seed` holds what `init` supplied. It is shown until the first value is
/// parsed, and `parsed` is only ever appended to.
pub(crate) struct Values<T> {
    parsed: Vec<T>,
    seed: Vec<T>,
    convert: Converter<T>,
}

impl<T> Values<T> {
    pub(crate) fn new(convert: Converter<T>) -> Self {
        Self {
            parsed: Vec::new(),
            seed: Vec::new(),
            convert,
        }
    }

    pub(crate) fn seed(&mut self, value: T) {
        self.seed = vec![value];
    }

    pub(crate) fn parsed(&self) -> &[T] {
        &self.parsed
    }

    /// Parsed values if any were given, otherwise the seed.
    pub(crate) fn visible(&self) -> &[T] {
        if self.parsed.is_empty() {
            &self.seed
        } else {
            &self.parsed
        }
    }
}

impl<T> ValueStore for Values<T> {
    fn accept(&mut self, raw: &str) -> Result<(), String> {
        let value = (self.convert)(raw)?;
        self.parsed.push(value);
        Ok(())
    }

    fn has_value(&self) -> bool {
        !self.parsed.is_empty() || !self.seed.is_empty()
    }
}

/// Converter built on `FromStr`.
pub(crate) fn from_str_converter<T>() -> Converter<T>
where
    T: FromStr + 'static,
    T::Err: Display,
{
    Box::new(|raw: &str| raw.parse::<T>().map_err(|e| e.to_string()))
}

/// Wrap a caller-supplied conversion closure.
pub(crate) fn custom_converter<T, F, E>(convert: F) -> Converter<T>
where
    F: Fn(&str) -> Result<T, E> + 'static,
    E: Display,
{
    Box::new(move |raw: &str| convert(raw).map_err(|e| e.to_string()))
}
