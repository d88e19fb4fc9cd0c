//! The driver: pumps tokens from the scanner into the engine and lowers
//! the finished builder tree.
//!
//! A driver is one-shot. Constructing it is the reset point: arena,
//! interner, engine state, and flags all start empty, and `parse` consumes
//! the driver so nothing leaks between runs. Concurrent parses construct
//! independent drivers over one shared configuration.

use crate::ast::lowering;
use crate::ast::ParseNode;
use crate::error::{Error, Result};
use crate::lexing::{LexerConfig, Scanner};
use crate::parsing::actions::GrammarActions;
use crate::parsing::engine::ParserEngine;

pub struct Driver<'cfg, E> {
    config: &'cfg LexerConfig,
    engine: E,
    actions: GrammarActions<'cfg>,
}

impl<'cfg, E: ParserEngine> Driver<'cfg, E> {
    pub fn new(config: &'cfg LexerConfig, engine: E) -> Self {
        Self {
            config,
            engine,
            actions: GrammarActions::new(config),
        }
    }

    /// Run one parse to completion.
    ///
    /// Pulls tokens until the scanner drains (the synthetic EOF included),
    /// offering each to the engine. Requires the engine to have accepted
    /// and a root to have been pushed; the builder tree is then lowered to
    /// the value tree and returned.
    pub fn parse(mut self, input: &str) -> Result<ParseNode> {
        let mut scanner = Scanner::new(self.config, input);

        while let Some(token) = scanner.next(&mut self.actions.interner)? {
            self.actions.note_token(token);
            self.engine.offer(token, &mut self.actions)?;
        }

        if !self.actions.successful() {
            return Err(Error::IncompleteParse);
        }
        let root = self.actions.root().ok_or(Error::IncompleteParse)?;

        lowering::lower(
            &self.actions.arena,
            root,
            &self.actions.interner,
            self.config,
        )
    }
}

/// Parse `input` with a fresh default-constructed engine.
pub fn parse_with<E: ParserEngine + Default>(
    config: &LexerConfig,
    input: &str,
) -> Result<ParseNode> {
    Driver::new(config, E::default()).parse(input)
}
