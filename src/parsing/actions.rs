//! The handle reduction actions use to build the parse tree.
//!
//! Generated reduction code never sees the driver or the arena directly;
//! it receives a `GrammarActions` and constructs nodes, edits child lists,
//! records the root, and signals accept/error through it. The handle also
//! owns the interner so token diagnostics can be rendered at any point of
//! the parse.

use crate::error::Error;
use crate::intern::StringTable;
use crate::lexing::LexerConfig;
use crate::parsing::arena::{BuilderValue, NodeArena, NodeId, UNSPECIFIED_LINE};
use crate::token::Token;

pub struct GrammarActions<'cfg> {
    config: &'cfg LexerConfig,
    pub(crate) arena: NodeArena,
    pub(crate) interner: StringTable,
    root: Option<NodeId>,
    successful: bool,
    current: Option<Token>,
}

impl<'cfg> GrammarActions<'cfg> {
    pub(crate) fn new(config: &'cfg LexerConfig) -> Self {
        Self {
            config,
            arena: NodeArena::new(),
            interner: StringTable::new(),
            root: None,
            successful: false,
            current: None,
        }
    }

    /// Record the token about to be offered, for syntax-error rendering.
    pub(crate) fn note_token(&mut self, token: Token) {
        self.current = Some(token);
    }

    /// Allocate a production node with unspecified line.
    pub fn production(&mut self, name: &str, children: &[NodeId]) -> NodeId {
        self.production_at(name, children, UNSPECIFIED_LINE)
    }

    /// Allocate a production node carrying a line number.
    pub fn production_at(&mut self, name: &str, children: &[NodeId], line: i64) -> NodeId {
        self.arena.alloc(
            BuilderValue::Production(name.to_string()),
            line,
            children.to_vec(),
        )
    }

    /// Allocate a node for a scanned token; the line comes from the token.
    pub fn token(&mut self, token: Token) -> NodeId {
        self.arena
            .alloc(BuilderValue::Token(token), i64::from(token.line), Vec::new())
    }

    /// Append a child at the end; returns the edited node for chaining.
    pub fn append(&mut self, node: NodeId, child: NodeId) -> NodeId {
        self.arena.push_child(node, child);
        node
    }

    /// Insert a child at the front; returns the edited node for chaining.
    pub fn prepend(&mut self, node: NodeId, child: NodeId) -> NodeId {
        self.arena.push_front_child(node, child);
        node
    }

    /// Append a pack of children in order; returns the edited node.
    pub fn extend(&mut self, node: NodeId, children: &[NodeId]) -> NodeId {
        self.arena.extend_children(node, children);
        node
    }

    /// Overwrite a node's line; returns the edited node for chaining.
    pub fn set_line(&mut self, node: NodeId, line: i64) -> NodeId {
        self.arena.set_line(node, line);
        node
    }

    /// Line recorded on a node (token line, explicit line, or -1).
    pub fn line_of(&self, node: NodeId) -> i64 {
        self.arena.line(node)
    }

    /// Record the final tree root. May be called on every toplevel
    /// reduction; the last call wins.
    pub fn push_root(&mut self, node: NodeId) {
        self.root = Some(node);
    }

    /// Release a node the grammar no longer needs. The id must not be
    /// reachable from nodes that survive to the end of the parse.
    pub fn drop_node(&mut self, node: NodeId) {
        self.arena.remove(node);
    }

    /// Mark the parse accepted. Called by the engine on the accept
    /// transition.
    pub fn success(&mut self) {
        self.successful = true;
    }

    /// Build the fatal syntax error for the most recently offered token.
    /// The engine returns this when a shift fails.
    pub fn syntax_error(&self) -> Error {
        let token = match self.current {
            Some(tok) => tok.describe(self.config, &self.interner),
            None => "<no token>".to_string(),
        };
        Error::SyntaxError { token }
    }

    pub(crate) fn successful(&self) -> bool {
        self.successful
    }

    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::RegexFlags;

    fn config() -> LexerConfig {
        let mut config = LexerConfig::new();
        config
            .add_value_type(5, "[0-9]+", RegexFlags::default())
            .unwrap();
        config.name_token(5, "NUM");
        config
    }

    #[test]
    fn test_production_defaults_to_unspecified_line() {
        let config = config();
        let mut actions = GrammarActions::new(&config);
        let node = actions.production("expr", &[]);
        assert_eq!(actions.line_of(node), UNSPECIFIED_LINE);
    }

    #[test]
    fn test_token_node_inherits_token_line() {
        let config = config();
        let mut actions = GrammarActions::new(&config);
        let idx = actions.interner.push("7");
        let node = actions.token(Token::valued(5, idx, 3));
        assert_eq!(actions.line_of(node), 3);
    }

    #[test]
    fn test_last_root_wins() {
        let config = config();
        let mut actions = GrammarActions::new(&config);
        let a = actions.production("a", &[]);
        let b = actions.production("b", &[]);
        actions.push_root(a);
        actions.push_root(b);
        assert_eq!(actions.root(), Some(b));
    }

    #[test]
    fn test_chaining_edits() {
        let config = config();
        let mut actions = GrammarActions::new(&config);
        let head = actions.production("head", &[]);
        let tail = actions.production("tail", &[]);
        let list = actions.production("list", &[]);
        let list = actions.append(list, tail);
        let list = actions.prepend(list, head);
        let list = actions.set_line(list, 4);
        assert_eq!(actions.line_of(list), 4);
    }

    #[test]
    fn test_syntax_error_renders_current_token() {
        let config = config();
        let mut actions = GrammarActions::new(&config);
        let idx = actions.interner.push("42");
        actions.note_token(Token::valued(5, idx, 7));
        let err = actions.syntax_error();
        assert_eq!(
            err.to_string(),
            "Parse error on token: NUM <42> (line 7)"
        );
    }

    #[test]
    fn test_dropped_node_is_gone() {
        let config = config();
        let mut actions = GrammarActions::new(&config);
        let node = actions.production("scaffold", &[]);
        actions.drop_node(node);
        assert!(actions.arena.get(node).is_none());
    }
}
