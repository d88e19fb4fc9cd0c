//! Declarative scanner configuration.
//!
//! The table generator emits one initialization routine per grammar; that
//! routine populates a `LexerConfig` through the `add_*` builder surface
//! below before the first parse. The configuration is read-only afterward:
//! every parse borrows it, so concurrent parses over one configuration are
//! safe.
//!
//! Patterns are compiled once, here. The regex engine has no equivalent of
//! a continuous-match flag, so `AnchoredPattern` synthesizes one by
//! wrapping every pattern as `\A(?:…)` and matching against the remaining
//! input slice. Matching is case-insensitive unless `RegexFlags`
//! says otherwise.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};
use crate::lexing::prefix_tree::PrefixTree;
use crate::token::TokenCode;

/// Per-pattern regex options. The default matches case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegexFlags {
    pub case_sensitive: bool,
}

impl RegexFlags {
    pub fn case_sensitive() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

/// String-definition behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringFlags {
    /// Allow the string body to contain newlines.
    pub span_newlines: bool,
    /// Merge adjacent strings of the same type (separated only by skip
    /// material) into one token.
    pub join_adjacent: bool,
}

/// One delimited-string token family.
#[derive(Debug, Clone, Copy)]
pub struct StringDef {
    pub(crate) open: char,
    pub(crate) escape: char,
    pub(crate) code: TokenCode,
    pub(crate) flags: StringFlags,
}

/// A pattern compiled to match only at the head of the remaining input.
#[derive(Debug, Clone)]
pub struct AnchoredPattern {
    regex: Regex,
}

impl AnchoredPattern {
    /// Compile `pattern` anchored to the cursor. The non-capturing wrapper
    /// keeps the caller's group 1 as the first capture group.
    pub fn compile(pattern: &str, flags: RegexFlags) -> Result<Self> {
        let anchored = format!(r"\A(?:{})", pattern);
        let regex = RegexBuilder::new(&anchored)
            .case_insensitive(!flags.case_sensitive)
            .build()
            .map_err(|e| Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { regex })
    }

    /// Byte length of a match starting exactly at the head of `tail`.
    pub fn match_len(&self, tail: &str) -> Option<usize> {
        self.regex.find(tail).map(|m| m.end())
    }

    /// Full-match byte length plus the first capture group's text when the
    /// group participated in the match.
    pub fn match_with_capture<'t>(&self, tail: &'t str) -> Option<(usize, Option<&'t str>)> {
        self.regex.captures(tail).map(|caps| {
            let full = caps.get(0).expect("group 0 always participates").end();
            (full, caps.get(1).map(|m| m.as_str()))
        })
    }

    pub fn matches_start(&self, tail: &str) -> bool {
        self.regex.is_match(tail)
    }
}

/// Complete scanner configuration for one grammar.
///
/// Within each token family, declaration order is priority order. Across
/// families the scanner tries strings, then literals, then value patterns.
#[derive(Debug)]
pub struct LexerConfig {
    pub(crate) literals: PrefixTree<TokenCode>,
    pub(crate) skips: Vec<AnchoredPattern>,
    pub(crate) value_types: Vec<(AnchoredPattern, TokenCode)>,
    pub(crate) string_defs: Vec<StringDef>,
    token_names: HashMap<TokenCode, String>,
    literal_texts: HashMap<TokenCode, String>,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LexerConfig {
    pub fn new() -> Self {
        let mut token_names = HashMap::new();
        token_names.insert(crate::token::Token::EOF, "EOF".to_string());
        Self {
            literals: PrefixTree::new(),
            skips: Vec::new(),
            value_types: Vec::new(),
            string_defs: Vec::new(),
            token_names,
            literal_texts: HashMap::new(),
        }
    }

    /// Register a fixed-string literal token.
    ///
    /// `terminator` is a pattern that must match the input immediately
    /// following the literal for the literal to be accepted; `flags` apply
    /// to it. The first spelling registered for a code becomes the code's
    /// canonical display text.
    pub fn add_literal(
        &mut self,
        code: TokenCode,
        text: &str,
        terminator: Option<&str>,
        flags: RegexFlags,
    ) -> Result<()> {
        let terminator = terminator
            .map(|p| AnchoredPattern::compile(p, flags))
            .transpose()?;
        self.literals.add(text, code, terminator)?;
        self.literal_texts
            .entry(code)
            .or_insert_with(|| text.to_string());
        Ok(())
    }

    /// Register a skip pattern; matches are consumed silently.
    pub fn add_skip(&mut self, pattern: &str, flags: RegexFlags) -> Result<()> {
        self.skips.push(AnchoredPattern::compile(pattern, flags)?);
        Ok(())
    }

    /// Register a regex-matched value token. A first capture group, when
    /// present, selects the token value within the overall match.
    pub fn add_value_type(
        &mut self,
        code: TokenCode,
        pattern: &str,
        flags: RegexFlags,
    ) -> Result<()> {
        self.value_types
            .push((AnchoredPattern::compile(pattern, flags)?, code));
        Ok(())
    }

    /// Register a delimited-string token family. The closing delimiter is
    /// the opening one; `escape` introduces a literal delimiter or escape
    /// character inside the body.
    pub fn add_string_def(
        &mut self,
        open: char,
        escape: char,
        code: TokenCode,
        flags: StringFlags,
    ) {
        self.string_defs.push(StringDef {
            open,
            escape,
            code,
            flags,
        });
    }

    /// Record the diagnostic name for a token code.
    pub fn name_token(&mut self, code: TokenCode, name: &str) {
        self.token_names.insert(code, name.to_string());
    }

    /// Diagnostic name for a code; `"UNKNOWN"` when never registered.
    pub fn token_name(&self, code: TokenCode) -> &str {
        self.token_names
            .get(&code)
            .map(String::as_str)
            .unwrap_or("UNKNOWN")
    }

    /// Canonical spelling for a literal code, when one was registered.
    pub fn literal_text(&self, code: TokenCode) -> Option<&str> {
        self.literal_texts.get(&code).map(String::as_str)
    }
}
