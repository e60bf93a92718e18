//! The parser: registration, scanning and required-option checks.

use std::cell::RefCell;
use std::fmt::Display;
use std::io;
use std::rc::Rc;
use std::str::FromStr;

use crate::descriptor::{Converter, Kind, SharedStore, Values, custom_converter, from_str_converter};
use crate::dispatch::ParseState;
use crate::error::{ParseError, ParseErrors, ParseResult, RegistrationResult};
use crate::handle::{Flag, Opt};
use crate::registry::{Aliases, Registry};
use crate::schema::ParserSchema;

const DEFAULT_PROGRAM_NAME: &str = "PROGRAM";

/// Holds the option table and the positional arguments of the last parse.
///
/// Handles returned by [`Parser::flag`] and [`Parser::opt`] stay valid for as
/// long as they are held, independently of the parser.
pub struct Parser {
    program_name: String,
    registry: Registry,
    positionals: Vec<String>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::with_program_name(DEFAULT_PROGRAM_NAME)
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program_name(name: impl Into<String>) -> Self {
        Self {
            program_name: name.into(),
            registry: Registry::default(),
            positionals: Vec::new(),
        }
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    pub fn set_program_name(&mut self, name: impl Into<String>) {
        self.program_name = name.into();
    }

    /// Whether `alias` (e.g. `-v` or `--verbose`) is already registered.
    pub fn contains(&self, alias: &str) -> bool {
        self.registry.lookup(alias).is_some()
    }

    /// Register a flag under `aliases` (e.g. `["-v", "--verbose"]`).
    pub fn flag<A: Aliases>(&mut self, aliases: A) -> RegistrationResult<Flag> {
        let aliases = aliases.into_aliases();
        tracing::trace!(?aliases, "registering flag");
        let descriptor = self.registry.register(aliases, Kind::Flag)?;
        Ok(Flag::new(descriptor))
    }

    /// Register an option whose values are converted with `T::from_str`.
    pub fn opt<T, A>(&mut self, aliases: A) -> RegistrationResult<Opt<T>>
    where
        T: FromStr + 'static,
        T::Err: Display,
        A: Aliases,
    {
        self.register_opt(aliases, from_str_converter())
    }

    /// Register an option with a custom text-to-value conversion.
    ///
    /// An `Err` from `convert` is reported as
    /// [`ParseError::ValueConversionFailed`] carrying its message.
    pub fn opt_with<T, A, F, E>(&mut self, aliases: A, convert: F) -> RegistrationResult<Opt<T>>
    where
        T: 'static,
        A: Aliases,
        F: Fn(&str) -> Result<T, E> + 'static,
        E: Display,
    {
        self.register_opt(aliases, custom_converter(convert))
    }

    fn register_opt<T, A>(&mut self, aliases: A, convert: Converter<T>) -> RegistrationResult<Opt<T>>
    where
        T: 'static,
        A: Aliases,
    {
        let aliases = aliases.into_aliases();
        tracing::trace!(?aliases, "registering option");
        let values = Rc::new(RefCell::new(Values::new(convert)));
        let store: SharedStore = values.clone();
        let descriptor = self.registry.register(aliases, Kind::Valued(store))?;
        Ok(Opt::new(descriptor, values))
    }

    /// Parse `args` (without the program name) and return the positional
    /// arguments.
    ///
    /// Scanning never stops early: every problem is collected and returned
    /// together. Counts and values recorded before a failure are kept, so
    /// handles can still be inspected (for example a `--help` flag) when this
    /// returns `Err`.
    pub fn parse<I, S>(&mut self, args: I) -> ParseResult<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tracing::debug!(program = %self.program_name, "parsing arguments");

        let ParseState {
            positionals,
            mut errors,
            ..
        } = ParseState::scan(&self.registry, args.into_iter().map(Into::<String>::into));
        errors.extend(self.missing_required());

        tracing::debug!(
            positionals = positionals.len(),
            errors = errors.len(),
            "parse finished"
        );

        self.positionals = positionals;
        if errors.is_empty() {
            Ok(self.positionals.clone())
        } else {
            Err(ParseErrors::new(errors))
        }
    }

    /// Like [`Parser::parse`], but the first element is taken as the program
    /// name.
    pub fn parse_argv<I, S>(&mut self, argv: I) -> ParseResult<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::<String>::into);
        if let Some(name) = argv.next() {
            self.program_name = name;
        }
        self.parse(argv)
    }

    /// Parse the current process arguments.
    pub fn parse_env(&mut self) -> ParseResult<Vec<String>> {
        self.parse_argv(std::env::args())
    }

    /// Positional arguments left over by the most recent parse.
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// Required options with neither a parsed value nor an `init` seed.
    fn missing_required(&self) -> Vec<ParseError> {
        self.registry
            .iter()
            .filter_map(|descriptor| {
                let descriptor = descriptor.borrow();
                (descriptor.required && !descriptor.has_value()).then(|| {
                    ParseError::MissingRequiredOption {
                        aliases: descriptor.aliases.clone(),
                    }
                })
            })
            .collect()
    }

    pub fn schema(&self) -> ParserSchema {
        ParserSchema::from_registry(&self.program_name, &self.registry)
    }

    pub fn usage(&self) -> String {
        self.schema().usage()
    }

    pub fn help(&self) -> String {
        self.schema().help()
    }

    /// Write the help text to `out`. `parse` never does this on its own.
    pub fn write_help<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.help().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistrationError;

    #[test]
    fn parse_argv_takes_program_name_from_first_element() {
        let mut parser = Parser::new();
        assert_eq!(parser.program_name(), "PROGRAM");
        let verbose = parser.flag(["-v", "--verbose"]).unwrap();
        assert!(parser.contains("--verbose"));
        assert!(!parser.contains("--verb"));

        let rest = parser.parse_argv(["tool", "-vv", "input"]).unwrap();
        assert_eq!(parser.program_name(), "tool");
        assert_eq!(rest, vec!["input".to_string()]);
        assert_eq!(parser.positionals(), &["input".to_string()]);
        assert_eq!(verbose.count(), 2);
    }

    #[test]
    fn errors_are_reported_in_discovery_order() {
        let mut parser = Parser::new();
        let _name = parser.opt::<String, _>("--name").unwrap().required();
        let level = parser.opt::<u8, _>("-l").unwrap();
        let _quiet = parser.flag("-q").unwrap();

        let err = parser
            .parse(["--nope", "-q=1", "-lx", "--quiet", "-l"])
            .unwrap_err();
        let errors = err.into_vec();
        assert_eq!(errors.len(), 7, "{errors:?}");
        assert_eq!(errors[0], ParseError::UnknownOption("--nope".to_string()));
        assert!(matches!(
            &errors[1],
            ParseError::UnknownShortOption { flag: '=', .. }
        ));
        assert!(matches!(
            &errors[2],
            ParseError::UnknownShortOption { flag: '1', .. }
        ));
        match &errors[3] {
            ParseError::ValueConversionFailed { alias, raw, .. } => {
                assert_eq!(alias, "-l");
                assert_eq!(raw, "x");
            }
            other => panic!("expected ValueConversionFailed, got: {other:?}"),
        }
        assert_eq!(errors[4], ParseError::UnknownOption("--quiet".to_string()));
        assert_eq!(
            errors[5],
            ParseError::MissingValue {
                alias: "-l".to_string()
            }
        );
        assert!(matches!(
            &errors[6],
            ParseError::MissingRequiredOption { aliases } if aliases == &["--name".to_string()]
        ));
        // Occurrences still count even though no value was stored.
        assert_eq!(level.count(), 2);
        assert!(level.is_empty());
    }

    #[test]
    fn required_option_reported_after_scan_errors() {
        let mut parser = Parser::new();
        parser.opt::<String, _>(["-m", "--message"]).unwrap().required();

        let err = parser.parse(["--bogus"]).unwrap_err();
        assert_eq!(
            err.into_vec(),
            vec![
                ParseError::UnknownOption("--bogus".to_string()),
                ParseError::MissingRequiredOption {
                    aliases: vec!["-m".to_string(), "--message".to_string()],
                },
            ]
        );
    }

    #[test]
    fn seeded_required_option_is_satisfied() {
        let mut parser = Parser::new();
        let n = parser.opt::<u32, _>("-n").unwrap().required().init(3);
        parser.parse(Vec::<String>::new()).unwrap();
        assert_eq!(n.get(), Some(3));
        assert_eq!(n.count(), 0);
    }

    #[test]
    fn failed_registration_leaves_parser_usable() {
        let mut parser = Parser::new();
        parser.flag("-v").unwrap();
        assert_eq!(
            parser.opt::<i32, _>(["--level", "-v"]).err().map(|e| e.to_string()),
            Some(RegistrationError::DuplicateAlias("-v".to_string()).to_string())
        );
        let level = parser.opt::<i32, _>("--level").unwrap();
        parser.parse(["--level=4"]).unwrap();
        assert_eq!(level.get(), Some(4));
    }

    #[test]
    fn custom_converter_errors_are_accumulated() {
        let mut parser = Parser::new();
        let mode = parser
            .opt_with("--mode", |raw: &str| match raw {
                "fast" | "slow" => Ok(raw.to_string()),
                other => Err(format!("unsupported mode {other}")),
            })
            .unwrap();

        let err = parser.parse(["--mode", "warp", "--mode=fast"]).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(
            err.to_string(),
            "invalid value \"warp\" for --mode: unsupported mode warp"
        );
        assert_eq!(mode.all(), vec!["fast".to_string()]);
    }

    #[test]
    fn write_help_emits_usage_and_options() {
        let mut parser = Parser::with_program_name("demo");
        parser.flag(["-h", "--help"]).unwrap().help("print help and exit");
        let mut out = Vec::new();
        parser.write_help(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("usage: demo [-h|--help]\n"));
        assert!(text.contains("-h, --help  print help and exit"));
    }
}
