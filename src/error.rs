//! The single fatal error kind shared by configuration building, scanning,
//! and parsing.
//!
//! Nothing in this runtime recovers from a failure: a lexer error, a syntax
//! error, or a malformed configuration all abort the parse and surface to
//! the caller as one `Error` value distinguished by its message.

use std::fmt;

/// Every failure the runtime can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A literal was registered with empty text.
    EmptyLiteral,
    /// A literal was registered twice; carries the colliding text.
    DuplicateLiteral(String),
    /// A skip, value, or terminator pattern failed to compile.
    InvalidPattern { pattern: String, message: String },
    /// No skip, string, literal, or value rule matched at the cursor.
    NoMatch { line: u32, preview: String },
    /// End of input inside a string body.
    UnterminatedString { line: u32 },
    /// Newline inside a string whose definition does not span newlines.
    NewlineInString { line: u32 },
    /// The engine rejected the current token; carries its diagnostic
    /// rendering.
    SyntaxError { token: String },
    /// The scanner drained without the engine accepting.
    IncompleteParse,
    /// Lowering met a node id whose slot was dropped. Indicates a bug in
    /// the grammar's reduction actions, not invalid input.
    DanglingNode,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyLiteral => {
                write!(f, "Cannot add an empty literal to the lexer")
            }
            Error::DuplicateLiteral(text) => {
                write!(f, "Duplicate literal definition: {:?}", text)
            }
            Error::InvalidPattern { pattern, message } => {
                write!(f, "Invalid pattern {:?}: {}", pattern, message)
            }
            Error::NoMatch { line, preview } => {
                write!(f, "Lexer failure on line {}. Around here:\n{}", line, preview)
            }
            Error::UnterminatedString { line } => {
                write!(
                    f,
                    "Lexer error: string starting on line {} reached end of input",
                    line
                )
            }
            Error::NewlineInString { line } => {
                write!(f, "Lexer error: newline in string on line {}", line)
            }
            Error::SyntaxError { token } => {
                write!(f, "Parse error on token: {}", token)
            }
            Error::IncompleteParse => {
                write!(f, "Reached end of input without parser completing")
            }
            Error::DanglingNode => {
                write!(f, "Internal error: parse node referenced after drop")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
