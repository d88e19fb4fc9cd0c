//! The scanner: a pull tokenizer over one input string.
//!
//! Each `next` call runs the skip phase, then tries the token families in
//! fixed order: delimited strings first (so a string's opening delimiter
//! cannot be stolen by a one-character literal), then literals (so keywords
//! outrank identifier patterns), then value patterns. Within each family,
//! declaration order is priority.
//!
//! The scanner tracks 1-based line numbers by counting newlines in every
//! span the cursor crosses, and emits one synthetic EOF token (code 0) when
//! the input is exhausted.

use crate::error::{Error, Result};
use crate::intern::StringTable;
use crate::lexing::config::{LexerConfig, StringDef};
use crate::token::Token;

/// How many characters of remaining input a lexer error carries.
const ERROR_PREVIEW_CHARS: usize = 100;

pub struct Scanner<'cfg, 'input> {
    config: &'cfg LexerConfig,
    input: &'input str,
    pos: usize,
    line: u32,
    count: usize,
    reached_end: bool,
    failed: bool,
}

impl<'cfg, 'input> Scanner<'cfg, 'input> {
    pub fn new(config: &'cfg LexerConfig, input: &'input str) -> Self {
        Self {
            config,
            input,
            pos: 0,
            line: 1,
            count: 0,
            reached_end: false,
            failed: false,
        }
    }

    /// Produce the next token.
    ///
    /// Returns `Ok(None)` after the synthetic EOF has been emitted. A
    /// lexing failure is terminal: the error is returned once and every
    /// later call returns `Ok(None)`.
    pub fn next(&mut self, interner: &mut StringTable) -> Result<Option<Token>> {
        if self.failed {
            return Ok(None);
        }
        match self.scan(interner) {
            Err(e) => {
                self.failed = true;
                Err(e)
            }
            ok => ok,
        }
    }

    /// Current 1-based line of the cursor.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Number of real tokens produced so far (the synthetic EOF is not
    /// counted).
    pub fn count(&self) -> usize {
        self.count
    }

    /// Up to `limit` characters of the remaining input, for diagnostics.
    pub fn remainder(&self, limit: usize) -> String {
        self.rest().chars().take(limit).collect()
    }

    fn rest(&self) -> &'input str {
        &self.input[self.pos..]
    }

    fn advance(&mut self, len: usize) {
        let span = &self.input[self.pos..self.pos + len];
        self.line += span.matches('\n').count() as u32;
        self.pos += len;
    }

    fn scan(&mut self, interner: &mut StringTable) -> Result<Option<Token>> {
        self.skip();

        if self.pos == self.input.len() {
            if self.reached_end {
                return Ok(None);
            }
            self.reached_end = true;
            return Ok(Some(Token::literal(Token::EOF, self.line)));
        }

        if let Some(tok) = self.next_string(interner)? {
            self.count += 1;
            return Ok(Some(tok));
        }
        if let Some(tok) = self.next_literal() {
            self.count += 1;
            return Ok(Some(tok));
        }
        if let Some(tok) = self.next_value(interner) {
            self.count += 1;
            return Ok(Some(tok));
        }

        Err(Error::NoMatch {
            line: self.line,
            preview: self.remainder(ERROR_PREVIEW_CHARS),
        })
    }

    /// Consume skip matches until none applies. A zero-length match is
    /// ignored: it would never advance the cursor.
    fn skip(&mut self) {
        let config = self.config;
        loop {
            let mut skipped = false;
            for pattern in &config.skips {
                match pattern.match_len(self.rest()) {
                    Some(len) if len > 0 => {
                        self.advance(len);
                        skipped = true;
                        break;
                    }
                    _ => {}
                }
            }
            if !skipped {
                return;
            }
        }
    }

    fn next_string(&mut self, interner: &mut StringTable) -> Result<Option<Token>> {
        let config = self.config;
        for def in &config.string_defs {
            if self.rest().starts_with(def.open) {
                return self.scan_string(*def, interner).map(Some);
            }
        }
        Ok(None)
    }

    /// Scan one string token, concatenating adjacent bodies when the
    /// definition joins them. The token reports the line of the first
    /// opening delimiter.
    fn scan_string(&mut self, def: StringDef, interner: &mut StringTable) -> Result<Token> {
        let start_line = self.line;
        let mut body = String::new();
        self.scan_string_once(def, &mut body)?;

        if def.flags.join_adjacent {
            loop {
                let saved_pos = self.pos;
                let saved_line = self.line;
                self.skip();
                if self.rest().starts_with(def.open) {
                    self.scan_string_once(def, &mut body)?;
                } else {
                    self.pos = saved_pos;
                    self.line = saved_line;
                    break;
                }
            }
        }

        let idx = interner.push(&body);
        Ok(Token::valued(def.code, idx, start_line))
    }

    /// Scan a single delimited string with the cursor on the opening
    /// delimiter, appending the body (escapes kept verbatim) to `body`.
    fn scan_string_once(&mut self, def: StringDef, body: &mut String) -> Result<()> {
        let open_len = def.open.len_utf8();
        let tail = &self.input[self.pos + open_len..];

        let mut iter = tail.char_indices();
        while let Some((i, ch)) = iter.next() {
            if ch == def.escape {
                if let Some((_, next)) = iter.clone().next() {
                    if next == def.open || next == def.escape {
                        iter.next();
                    }
                }
                continue;
            }
            if ch == def.open {
                body.push_str(&tail[..i]);
                self.advance(open_len + i + open_len);
                return Ok(());
            }
            if ch == '\n' && !def.flags.span_newlines {
                return Err(Error::NewlineInString { line: self.line });
            }
        }

        Err(Error::UnterminatedString { line: self.line })
    }

    fn next_literal(&mut self) -> Option<Token> {
        let (code, len) = self.config.literals.try_match(self.rest())?;
        let line = self.line;
        self.advance(len);
        Some(Token::literal(code, line))
    }

    fn next_value(&mut self, interner: &mut StringTable) -> Option<Token> {
        let config = self.config;
        for (pattern, code) in &config.value_types {
            if let Some((full_len, capture)) = pattern.match_with_capture(self.rest()) {
                if full_len == 0 {
                    continue;
                }
                let text = capture.unwrap_or(&self.rest()[..full_len]);
                let idx = interner.push(text);
                let line = self.line;
                // Advance by the whole match even when a capture group
                // narrowed the value.
                self.advance(full_len);
                return Some(Token::valued(*code, idx, line));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::config::{RegexFlags, StringFlags};

    fn arith_config() -> LexerConfig {
        let mut config = LexerConfig::new();
        config.add_skip(r"\s+", RegexFlags::default()).unwrap();
        config
            .add_literal(1, "+", None, RegexFlags::default())
            .unwrap();
        config.name_token(1, "PLUS");
        config
            .add_value_type(5, "[0-9]+", RegexFlags::default())
            .unwrap();
        config.name_token(5, "NUM");
        config
    }

    fn drain(config: &LexerConfig, input: &str) -> (Vec<Token>, StringTable) {
        let mut interner = StringTable::new();
        let mut scanner = Scanner::new(config, input);
        let mut tokens = Vec::new();
        while let Some(tok) = scanner.next(&mut interner).unwrap() {
            tokens.push(tok);
        }
        (tokens, interner)
    }

    #[test]
    fn test_tokens_and_final_eof() {
        let config = arith_config();
        let (tokens, _) = drain(&config, "1 + 2");
        let kinds: Vec<u32> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![5, 1, 5, 0]);
    }

    #[test]
    fn test_eof_emitted_once() {
        let config = arith_config();
        let mut interner = StringTable::new();
        let mut scanner = Scanner::new(&config, "");
        let first = scanner.next(&mut interner).unwrap();
        assert_eq!(first, Some(Token::literal(Token::EOF, 1)));
        assert_eq!(scanner.next(&mut interner).unwrap(), None);
        assert_eq!(scanner.next(&mut interner).unwrap(), None);
    }

    #[test]
    fn test_line_tracking_across_newlines() {
        let config = arith_config();
        let (tokens, _) = drain(&config, "1\n+\n2");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[2].line, 3);
        assert_eq!(tokens[3].line, 3); // EOF stays on the last line
    }

    #[test]
    fn test_value_token_interns_match() {
        let config = arith_config();
        let (tokens, interner) = drain(&config, "42");
        assert_eq!(interner.get(tokens[0].value.unwrap()), "42");
    }

    #[test]
    fn test_no_match_is_terminal() {
        let config = arith_config();
        let mut interner = StringTable::new();
        let mut scanner = Scanner::new(&config, "@");
        let err = scanner.next(&mut interner).unwrap_err();
        assert_eq!(
            err,
            Error::NoMatch {
                line: 1,
                preview: "@".to_string()
            }
        );
        assert_eq!(scanner.next(&mut interner).unwrap(), None);
    }

    #[test]
    fn test_error_preview_is_bounded() {
        let config = arith_config();
        let mut interner = StringTable::new();
        let long_garbage = "@".repeat(500);
        let mut scanner = Scanner::new(&config, &long_garbage);
        match scanner.next(&mut interner).unwrap_err() {
            Error::NoMatch { preview, .. } => {
                assert_eq!(preview.chars().count(), ERROR_PREVIEW_CHARS)
            }
            other => panic!("expected NoMatch, got {:?}", other),
        }
    }

    fn string_config(flags: StringFlags) -> LexerConfig {
        let mut config = arith_config();
        config.add_string_def('"', '\\', 9, flags);
        config.name_token(9, "STRING");
        config
    }

    #[test]
    fn test_string_body_keeps_escapes_verbatim() {
        let config = string_config(StringFlags::default());
        let (tokens, interner) = drain(&config, r#""a\"b""#);
        assert_eq!(tokens[0].kind, 9);
        assert_eq!(interner.get(tokens[0].value.unwrap()), r#"a\"b"#);
    }

    #[test]
    fn test_escaped_escape_does_not_close() {
        let config = string_config(StringFlags::default());
        let (tokens, interner) = drain(&config, r#""a\\" +"#);
        assert_eq!(interner.get(tokens[0].value.unwrap()), r"a\\");
        assert_eq!(tokens[1].kind, 1);
    }

    #[test]
    fn test_unterminated_string_errors() {
        let config = string_config(StringFlags::default());
        let mut interner = StringTable::new();
        let mut scanner = Scanner::new(&config, "\"abc");
        assert_eq!(
            scanner.next(&mut interner).unwrap_err(),
            Error::UnterminatedString { line: 1 }
        );
    }

    #[test]
    fn test_newline_rejected_unless_spanning() {
        let config = string_config(StringFlags::default());
        let mut interner = StringTable::new();
        let mut scanner = Scanner::new(&config, "\"a\nb\"");
        assert_eq!(
            scanner.next(&mut interner).unwrap_err(),
            Error::NewlineInString { line: 1 }
        );

        let spanning = string_config(StringFlags {
            span_newlines: true,
            ..StringFlags::default()
        });
        let (tokens, interner) = drain(&spanning, "\"a\nb\"");
        assert_eq!(interner.get(tokens[0].value.unwrap()), "a\nb");
        // The token reports the opening line; the cursor moved past the
        // embedded newline.
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_join_adjacent_concatenates_across_skips() {
        let config = string_config(StringFlags {
            join_adjacent: true,
            ..StringFlags::default()
        });
        let (tokens, interner) = drain(&config, "\"ab\"  \"cd\" + 1");
        assert_eq!(interner.get(tokens[0].value.unwrap()), "abcd");
        assert_eq!(tokens[1].kind, 1);
        assert_eq!(tokens[2].kind, 5);
    }

    #[test]
    fn test_join_adjacent_reports_first_line() {
        let config = string_config(StringFlags {
            join_adjacent: true,
            span_newlines: true,
            ..StringFlags::default()
        });
        let (tokens, _) = drain(&config, "\"ab\"\n\"cd\"\n1");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn test_join_adjacent_restores_cursor_after_failed_probe() {
        let config = string_config(StringFlags {
            join_adjacent: true,
            ..StringFlags::default()
        });
        // The skip between the string and "1" must not be consumed by the
        // failed join probe in a way that loses the number token.
        let (tokens, _) = drain(&config, "\"ab\" 1");
        assert_eq!(tokens[0].kind, 9);
        assert_eq!(tokens[1].kind, 5);
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_string_beats_single_char_literal() {
        let mut config = string_config(StringFlags::default());
        // A literal that collides with the string delimiter must not steal
        // the opening quote.
        config
            .add_literal(2, "\"", None, RegexFlags::default())
            .unwrap();
        let (tokens, interner) = drain(&config, "\"ab\"");
        assert_eq!(tokens[0].kind, 9);
        assert_eq!(interner.get(tokens[0].value.unwrap()), "ab");
    }

    #[test]
    fn test_literal_beats_value_pattern() {
        let mut config = LexerConfig::new();
        config.add_skip(r"\s+", RegexFlags::default()).unwrap();
        config
            .add_literal(3, "if", None, RegexFlags::default())
            .unwrap();
        config
            .add_value_type(4, "[a-z]+", RegexFlags::default())
            .unwrap();
        let (tokens, _) = drain(&config, "if x");
        assert_eq!(tokens[0].kind, 3);
        assert_eq!(tokens[1].kind, 4);
    }

    #[test]
    fn test_value_declaration_order_is_priority() {
        let mut config = LexerConfig::new();
        config
            .add_value_type(1, "[0-9]+", RegexFlags::default())
            .unwrap();
        config
            .add_value_type(2, "[0-9a-f]+", RegexFlags::default())
            .unwrap();
        let (tokens, _) = drain(&config, "99");
        assert_eq!(tokens[0].kind, 1);
    }

    #[test]
    fn test_capture_group_narrows_value_but_not_advance() {
        let mut config = LexerConfig::new();
        config
            .add_value_type(6, "<([a-z]+)>", RegexFlags::default())
            .unwrap();
        let (tokens, interner) = drain(&config, "<tag>");
        assert_eq!(interner.get(tokens[0].value.unwrap()), "tag");
        assert_eq!(tokens.len(), 2); // the whole match was consumed
    }

    #[test]
    fn test_count_excludes_eof() {
        let config = arith_config();
        let mut interner = StringTable::new();
        let mut scanner = Scanner::new(&config, "1 + 2");
        while scanner.next(&mut interner).unwrap().is_some() {}
        assert_eq!(scanner.count(), 3);
    }
}
