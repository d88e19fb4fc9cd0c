//! # lemma
//!
//! Runtime for table-driven LALR parsers. A grammar's table generator
//! emits shift/reduce tables plus reduction actions; this crate supplies
//! everything those tables are driven by:
//!
//! - a configurable scanner (fixed literals through a prefix tree,
//!   regex-matched value tokens, delimited strings with escape rules,
//!   skip patterns),
//! - a builder-tree arena and the `GrammarActions` handle reduction code
//!   constructs nodes through,
//! - the driver that pumps tokens into the engine and lowers the finished
//!   tree into a value-semantics `ParseNode` with stable pre-order ids,
//! - a GraphViz DOT renderer for debugging.
//!
//! The in-repo `calc` module carries a small hand-written grammar standing
//! in for generated tables, so the pipeline can be exercised end to end:
//!
//! ```
//! let tree = lemma::calc::parse("1 + 2 * 3").unwrap();
//! assert_eq!(tree.production.as_deref(), Some("expr"));
//! let dot = lemma::dotify(&tree);
//! assert!(dot.starts_with("digraph"));
//! ```

pub mod ast;
pub mod calc;
pub mod error;
pub mod formats;
pub mod intern;
pub mod lexing;
pub mod parsing;
pub mod token;

pub use ast::ParseNode;
pub use error::{Error, Result};
pub use formats::dotify;
pub use intern::StringTable;
pub use lexing::{LexerConfig, RegexFlags, Scanner, StringFlags};
pub use parsing::{parse_with, Driver, GrammarActions, NodeId, ParserEngine};
pub use token::{Token, TokenCode};
