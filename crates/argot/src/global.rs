//! A default parser for small programs that don't want to pass one around.
//!
//! Handles share state through `Rc`, so the default parser is per thread:
//! it is created on first use and dropped with the thread. Code that needs
//! isolation (tests in particular) should build its own [`Parser`].
//!
//! ```
//! let verbose = argot::global::flag(["-v", "--verbose"]).unwrap();
//! argot::global::with_parser(|p| p.parse(["-v"])).unwrap();
//! assert_eq!(verbose.count(), 1);
//! ```

use std::cell::RefCell;
use std::fmt::Display;
use std::io;
use std::str::FromStr;

use crate::error::{ParseResult, RegistrationResult};
use crate::handle::{Flag, Opt};
use crate::parser::Parser;
use crate::registry::Aliases;

thread_local! {
    static PARSER: RefCell<Parser> = RefCell::new(Parser::default());
}

/// Run `f` against the default parser.
///
/// Calling another function of this module from inside `f` panics, since
/// the parser is already borrowed.
pub fn with_parser<R>(f: impl FnOnce(&mut Parser) -> R) -> R {
    PARSER.with(|parser| f(&mut parser.borrow_mut()))
}

pub fn flag<A: Aliases>(aliases: A) -> RegistrationResult<Flag> {
    with_parser(|p| p.flag(aliases))
}

pub fn opt<T, A>(aliases: A) -> RegistrationResult<Opt<T>>
where
    T: FromStr + 'static,
    T::Err: Display,
    A: Aliases,
{
    with_parser(|p| p.opt(aliases))
}

pub fn opt_with<T, A, F, E>(aliases: A, convert: F) -> RegistrationResult<Opt<T>>
where
    T: 'static,
    A: Aliases,
    F: Fn(&str) -> Result<T, E> + 'static,
    E: Display,
{
    with_parser(|p| p.opt_with(aliases, convert))
}

/// Parse `argv`, taking the first element as the program name.
pub fn parse_argv<I, S>(argv: I) -> ParseResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    with_parser(|p| p.parse_argv(argv))
}

pub fn parse_env() -> ParseResult<Vec<String>> {
    with_parser(Parser::parse_env)
}

pub fn program_name() -> String {
    with_parser(|p| p.program_name().to_string())
}

pub fn help() -> String {
    with_parser(|p| p.help())
}

pub fn write_help<W: io::Write>(out: &mut W) -> io::Result<()> {
    with_parser(|p| p.write_help(out))
}

/// Replace the default parser with an empty one.
///
/// Handles from before the reset keep their values but are no longer
/// updated by parsing.
pub fn reset() {
    with_parser(|p| *p = Parser::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parser_round_trip() {
        reset();
        let verbose = flag(["-v", "--verbose"]).unwrap().help("be chatty");
        let times = opt::<u32, _>("-n").unwrap().metavar("N").init(3);

        let rest = parse_argv(["prog", "-v", "-n", "5", "file"]).unwrap();
        assert_eq!(rest, vec!["file".to_string()]);
        assert_eq!(program_name(), "prog");
        assert_eq!(verbose.count(), 1);
        assert_eq!(times.get(), Some(5));
        assert_eq!(help().lines().next(), Some("usage: prog [-v|--verbose] [-n N]"));

        reset();
        assert_eq!(program_name(), "PROGRAM");
        assert!(flag("-v").is_ok());
        reset();
    }

    #[test]
    fn each_thread_gets_its_own_parser() {
        reset();
        flag("-x").unwrap();
        let other = std::thread::spawn(|| flag("-x").is_ok()).join().unwrap();
        assert!(other);
        reset();
    }
}
