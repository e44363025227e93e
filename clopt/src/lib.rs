//! Typed command-line options with POSIX-style parsing.
//!
//! A program declares its options once in a [`Registry`], hands it the raw
//! argument list, and then reads back values that are always well defined:
//! the declared default, or a user-supplied literal that passed the option's
//! grammar and range check.
//!
//! - `Opt::integer`/`real`/`logical`/`string`/`flag` declare options,
//!   [`Registry::define`] registers them
//! - [`Registry::process_command_line`] parses `-abc`, `-o value`,
//!   `--name=value`, `--name value`, `--` and positional arguments
//! - `get_integer`, `get_real`, `get_logical`, `get_string` read values back
//! - `print_options`, `print_usage`, `print_option_values`, `print_args`
//!   render reports
//!
//! Bad user input comes back as an [`Error`]. Bad declarations (duplicate
//! names, invalid characters, wrong-kind queries, exceeded capacity) are
//! bugs in the host program and panic.
//!
//! ```
//! use clopt::{Opt, Registry};
//!
//! let mut reg = Registry::new();
//! reg.define(Opt::integer("count", 1).range(0, 10));
//! reg.define(Opt::flag("verbose").short('v'));
//! reg.define(Opt::string("name", "x"));
//!
//! reg.process_command_line(["-v", "--count=5", "hello"]).unwrap();
//! assert!(reg.get_logical("verbose"));
//! assert_eq!(reg.get_integer("count"), 5);
//! assert_eq!(reg.get_arg(1), Ok("hello"));
//! ```

pub mod error;
pub mod lexical;
pub mod option;
pub mod parser;
pub mod registry;
pub mod report;
pub mod wrap;

pub use error::{Error, Result};
pub use lexical::{is_integer, is_logical, is_real};
pub use option::{Bound, FromValue, Opt, OptionDef, OptionKind, Value};
pub use parser::{classify, TokenClass};
pub use registry::{Limits, OptionHandle, Registry};
pub use report::HelpLayout;
