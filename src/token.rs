//! The token record passed from the scanner into the parse engine.
//!
//! Tokens are small `Copy` values: the generated engine moves them through
//! its internal stack, so they hold an interner index rather than the text
//! itself. Resolving the text needs the interner (for value tokens) or the
//! configuration's canonical-literal map (for literal tokens).

use crate::intern::StringTable;
use crate::lexing::LexerConfig;

/// Token code assigned by the grammar. Code 0 is reserved for EOF.
pub type TokenCode = u32;

/// A single scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Grammar-assigned code.
    pub kind: TokenCode,
    /// Interner index of the matched text; absent for literal tokens.
    pub value: Option<usize>,
    /// 1-based line on which the match started.
    pub line: u32,
}

impl Token {
    /// The synthetic end-of-input code.
    pub const EOF: TokenCode = 0;

    /// A literal token: the text is implied by the code.
    pub fn literal(kind: TokenCode, line: u32) -> Self {
        Self {
            kind,
            value: None,
            line,
        }
    }

    /// A value token carrying interned matched text.
    pub fn valued(kind: TokenCode, value: usize, line: u32) -> Self {
        Self {
            kind,
            value: Some(value),
            line,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == Self::EOF
    }

    /// The token's text: the interned match for value tokens, the canonical
    /// spelling (falling back to the token name) for literals.
    pub fn resolve_value<'a>(
        &self,
        config: &'a LexerConfig,
        interner: &'a StringTable,
    ) -> &'a str {
        match self.value {
            Some(idx) => interner.get(idx),
            None => config
                .literal_text(self.kind)
                .unwrap_or_else(|| config.token_name(self.kind)),
        }
    }

    /// Diagnostic rendering: `NAME <value> (line N)` for value tokens,
    /// `NAME (line N)` for literals.
    pub fn describe(&self, config: &LexerConfig, interner: &StringTable) -> String {
        let name = config.token_name(self.kind);
        match self.value {
            Some(idx) => format!("{} <{}> (line {})", name, interner.get(idx), self.line),
            None => format!("{} (line {})", name, self.line),
        }
    }
}
