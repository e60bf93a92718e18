//! Error types for option registration and argument parsing.

use std::fmt;

use thiserror::Error;

/// Errors raised while declaring flags and options.
///
/// These describe a mistake in the program's own option table rather than in
/// user input, so the registration call fails right away and nothing is added
/// to the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The alias list was empty.
    #[error("at least one alias is required")]
    NoAliases,
    /// An alias is neither `-x` nor `--name`.
    #[error("invalid option alias: {0:?} (expected -x or --name)")]
    InvalidAliasSyntax(String),
    /// An alias is already bound to another flag or option.
    #[error("duplicate option alias: {0}")]
    DuplicateAlias(String),
}

/// A single problem found while scanning the argument list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A long option (or the alias part of `--name=value`) is not registered.
    #[error("unknown option: {0}")]
    UnknownOption(String),
    /// A character of a short cluster is not registered.
    #[error("unknown option: -{flag} in {token}")]
    UnknownShortOption { flag: char, token: String },
    /// `--flag=value` was given for a flag.
    #[error("flag does not take a value: {alias}={value}")]
    UnexpectedValue { alias: String, value: String },
    /// A valued option was last in the argument list.
    #[error("missing value for {alias}")]
    MissingValue { alias: String },
    /// The value text could not be converted to the option's type.
    #[error("invalid value {raw:?} for {alias}: {reason}")]
    ValueConversionFailed {
        alias: String,
        raw: String,
        reason: String,
    },
    /// A required option never received a value.
    #[error("option {} is required, but not provided", .aliases.join(","))]
    MissingRequiredOption { aliases: Vec<String> },
}

/// Every error collected during one `parse` call, in discovery order.
///
/// Displayed as one error per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    pub(crate) fn new(errors: Vec<ParseError>) -> Self {
        Self { errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.errors.iter()
    }

    pub fn as_slice(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.errors.iter().enumerate() {
            if idx > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Result of a `parse` call: the positional arguments, or every error found.
pub type ParseResult<T> = Result<T, ParseErrors>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_lists_all_aliases() {
        let err = ParseError::MissingRequiredOption {
            aliases: vec!["-m".to_string(), "--message".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "option -m,--message is required, but not provided"
        );
    }

    #[test]
    fn unknown_short_names_flag_and_token() {
        let err = ParseError::UnknownShortOption {
            flag: 'x',
            token: "-axb".to_string(),
        };
        assert_eq!(err.to_string(), "unknown option: -x in -axb");
    }

    #[test]
    fn aggregate_displays_one_error_per_line() {
        let errors = ParseErrors::new(vec![
            ParseError::UnknownOption("--bogus".to_string()),
            ParseError::MissingValue {
                alias: "-n".to_string(),
            },
        ]);
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "unknown option: --bogus\nmissing value for -n"
        );
    }
}
