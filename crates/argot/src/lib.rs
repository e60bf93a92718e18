//! Declarative command-line flags and options.
//!
//! Register flags and typed options on a [`Parser`], hand it the argument
//! vector, then read the values back through the returned handles.
//!
//! Supported syntax:
//! - short flags `-v`, bundled as `-abc`
//! - short options `-nVALUE` / `-n VALUE`, also at the end of a bundle (`-abn 3`)
//! - long flags `--verbose`, long options `--name=VALUE` / `--name VALUE`
//! - `--` ends option processing; everything after it is positional
//!
//! ```
//! use argot::Parser;
//!
//! let mut parser = Parser::with_program_name("greet");
//! let verbose = parser.flag(["-v", "--verbose"]).unwrap().help("print more");
//! let name = parser
//!     .opt::<String, _>(["-m", "--message"])
//!     .unwrap()
//!     .metavar("MESSAGE")
//!     .required();
//! let times = parser.opt::<u32, _>("-n").unwrap().metavar("N").init(3);
//!
//! let rest = parser.parse(["-vm", "hi", "file.txt"]).unwrap();
//! assert_eq!(verbose.count(), 1);
//! assert_eq!(name.get().as_deref(), Some("hi"));
//! assert_eq!(times.get(), Some(3));
//! assert_eq!(rest, ["file.txt"]);
//! assert_eq!(
//!     parser.usage(),
//!     "usage: greet [-v|--verbose] -m|--message MESSAGE [-n N]"
//! );
//! ```
//!
//! Parsing never stops at the first problem. All errors are returned together
//! as [`ParseErrors`], while every count and value seen during the scan stays
//! recorded on the handles, even when `parse` fails.

mod descriptor;
mod dispatch;
mod error;
pub mod global;
mod handle;
mod help;
mod parser;
mod registry;
mod schema;

pub use error::{
    ParseError, ParseErrors, ParseResult, RegistrationError, RegistrationResult,
};
pub use handle::{Flag, Opt};
pub use parser::Parser;
pub use registry::Aliases;
pub use schema::{OptionSchema, ParserSchema};
