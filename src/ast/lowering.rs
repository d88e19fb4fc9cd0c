//! Lowering: copy the arena-owned builder tree into the value tree.
//!
//! The copy is a pre-order walk handing out ids from a counter starting at
//! 0, so a tree's ids are always a contiguous pre-order numbering. Token
//! nodes resolve their name and value here, against the configuration's
//! name map and the parse's interner.

use crate::ast::ParseNode;
use crate::error::{Error, Result};
use crate::intern::StringTable;
use crate::lexing::LexerConfig;
use crate::parsing::arena::{BuilderValue, NodeArena, NodeId};

pub(crate) fn lower(
    arena: &NodeArena,
    root: NodeId,
    interner: &StringTable,
    config: &LexerConfig,
) -> Result<ParseNode> {
    let mut counter = 0;
    lower_node(arena, root, interner, config, &mut counter)
}

fn lower_node(
    arena: &NodeArena,
    id: NodeId,
    interner: &StringTable,
    config: &LexerConfig,
    counter: &mut i64,
) -> Result<ParseNode> {
    let builder = arena.get(id).ok_or(Error::DanglingNode)?;

    let mut node = match &builder.value {
        BuilderValue::Production(name) => ParseNode::production(name),
        BuilderValue::Token(token) => ParseNode::terminal(
            config.token_name(token.kind),
            token.resolve_value(config, interner),
        ),
    };
    node.line = builder.line;
    node.id = *counter;
    *counter += 1;

    for &child in &builder.children {
        node.children
            .push(lower_node(arena, child, interner, config, counter)?);
    }

    Ok(node)
}
