//! Worked example grammar: arithmetic expressions.
//!
//! The runtime is normally driven by generated tables; this module carries
//! a small hand-written equivalent so the whole pipeline can be exercised
//! in-repo. The grammar:
//!
//! ```text
//! expr   ::= expr PLUS term | term
//! term   ::= term TIMES factor | factor
//! factor ::= LPAREN expr RPAREN | NUM
//! ```
//!
//! with literals `+ * ( )`, value token `NUM = [0-9]+`, and whitespace
//! skipped. The ACTION/GOTO tables are the standard SLR(1) construction
//! for this grammar. Reductions show the intended grammar-action idioms:
//! wrapping productions, pass-through productions (`expr ::= term` pushes
//! the `term` node through unchanged), and repeated `push_root` where the
//! last toplevel reduction wins.

use once_cell::sync::Lazy;

use crate::error::Result;
use crate::lexing::{LexerConfig, RegexFlags};
use crate::parsing::{GrammarActions, NodeId, ParserEngine};
use crate::token::{Token, TokenCode};

pub const PLUS: TokenCode = 1;
pub const TIMES: TokenCode = 2;
pub const LPAREN: TokenCode = 3;
pub const RPAREN: TokenCode = 4;
pub const NUM: TokenCode = 5;

/// Scanner configuration for the arithmetic grammar, built once.
pub static LEXER: Lazy<LexerConfig> = Lazy::new(|| {
    let mut config = LexerConfig::new();
    config
        .add_skip(r"\s+", RegexFlags::default())
        .expect("skip pattern");

    config
        .add_literal(PLUS, "+", None, RegexFlags::default())
        .expect("literal +");
    config.name_token(PLUS, "PLUS");
    config
        .add_literal(TIMES, "*", None, RegexFlags::default())
        .expect("literal *");
    config.name_token(TIMES, "TIMES");
    config
        .add_literal(LPAREN, "(", None, RegexFlags::default())
        .expect("literal (");
    config.name_token(LPAREN, "LPAREN");
    config
        .add_literal(RPAREN, ")", None, RegexFlags::default())
        .expect("literal )");
    config.name_token(RPAREN, "RPAREN");

    config
        .add_value_type(NUM, "[0-9]+", RegexFlags::default())
        .expect("NUM pattern");
    config.name_token(NUM, "NUM");

    config
});

#[derive(Debug, Clone, Copy)]
enum Action {
    Shift(u8),
    Reduce(u8),
    Accept,
    Error,
}

use Action::{Accept, Error as Reject, Reduce, Shift};

// Terminal columns: NUM, PLUS, TIMES, LPAREN, RPAREN, EOF.
const ACTION: [[Action; 6]; 12] = [
    /*  0 */ [Shift(5), Reject, Reject, Shift(4), Reject, Reject],
    /*  1 */ [Reject, Shift(6), Reject, Reject, Reject, Accept],
    /*  2 */ [Reject, Reduce(2), Shift(7), Reject, Reduce(2), Reduce(2)],
    /*  3 */ [Reject, Reduce(4), Reduce(4), Reject, Reduce(4), Reduce(4)],
    /*  4 */ [Shift(5), Reject, Reject, Shift(4), Reject, Reject],
    /*  5 */ [Reject, Reduce(6), Reduce(6), Reject, Reduce(6), Reduce(6)],
    /*  6 */ [Shift(5), Reject, Reject, Shift(4), Reject, Reject],
    /*  7 */ [Shift(5), Reject, Reject, Shift(4), Reject, Reject],
    /*  8 */ [Reject, Shift(6), Reject, Reject, Shift(11), Reject],
    /*  9 */ [Reject, Reduce(1), Shift(7), Reject, Reduce(1), Reduce(1)],
    /* 10 */ [Reject, Reduce(3), Reduce(3), Reject, Reduce(3), Reduce(3)],
    /* 11 */ [Reject, Reduce(5), Reduce(5), Reject, Reduce(5), Reduce(5)],
];

const NT_EXPR: usize = 0;
const NT_TERM: usize = 1;
const NT_FACTOR: usize = 2;

// Only the rows reachable after a reduction are meaningful.
const GOTO: [[u8; 3]; 12] = [
    [1, 2, 3],
    [0, 0, 0],
    [0, 0, 0],
    [0, 0, 0],
    [8, 2, 3],
    [0, 0, 0],
    [0, 9, 3],
    [0, 0, 10],
    [0, 0, 0],
    [0, 0, 0],
    [0, 0, 0],
    [0, 0, 0],
];

fn column(kind: TokenCode) -> Option<usize> {
    match kind {
        NUM => Some(0),
        PLUS => Some(1),
        TIMES => Some(2),
        LPAREN => Some(3),
        RPAREN => Some(4),
        Token::EOF => Some(5),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
enum StackSym {
    Token(Token),
    Node { id: NodeId, line: i64 },
}

#[derive(Debug, Clone, Copy)]
struct StackEntry {
    state: u8,
    sym: StackSym,
}

/// The SLR automaton for the arithmetic grammar. One engine per parse; an
/// empty stack means the start state.
#[derive(Debug, Default)]
pub struct CalcEngine {
    stack: Vec<StackEntry>,
}

impl CalcEngine {
    fn state(&self) -> usize {
        self.stack.last().map_or(0, |entry| entry.state as usize)
    }

    fn pop_node(&mut self) -> (NodeId, i64) {
        match self.stack.pop().map(|entry| entry.sym) {
            Some(StackSym::Node { id, line }) => (id, line),
            _ => unreachable!("reduction expected a node on the parse stack"),
        }
    }

    fn pop_token(&mut self) -> Token {
        match self.stack.pop().map(|entry| entry.sym) {
            Some(StackSym::Token(token)) => token,
            _ => unreachable!("reduction expected a token on the parse stack"),
        }
    }

    fn push_goto(&mut self, nonterminal: usize, id: NodeId, line: i64) {
        let state = GOTO[self.state()][nonterminal];
        self.stack.push(StackEntry {
            state,
            sym: StackSym::Node { id, line },
        });
    }

    fn reduce(&mut self, production: u8, actions: &mut GrammarActions<'_>) {
        match production {
            // expr ::= expr PLUS term
            1 => {
                let (term, _) = self.pop_node();
                let plus = self.pop_token();
                let (expr, line) = self.pop_node();
                let plus_node = actions.token(plus);
                let node = actions.production_at("expr", &[expr, plus_node, term], line);
                actions.push_root(node);
                self.push_goto(NT_EXPR, node, line);
            }
            // expr ::= term -- pass-through, no wrapper node
            2 => {
                let (term, line) = self.pop_node();
                actions.push_root(term);
                self.push_goto(NT_EXPR, term, line);
            }
            // term ::= term TIMES factor
            3 => {
                let (factor, _) = self.pop_node();
                let times = self.pop_token();
                let (term, line) = self.pop_node();
                let times_node = actions.token(times);
                let node = actions.production_at("term", &[term, times_node, factor], line);
                self.push_goto(NT_TERM, node, line);
            }
            // term ::= factor
            4 => {
                let (factor, line) = self.pop_node();
                let node = actions.production_at("term", &[factor], line);
                self.push_goto(NT_TERM, node, line);
            }
            // factor ::= LPAREN expr RPAREN -- the parentheses are dropped
            5 => {
                let _rparen = self.pop_token();
                let (expr, _) = self.pop_node();
                let lparen = self.pop_token();
                let line = i64::from(lparen.line);
                let node = actions.production_at("factor", &[expr], line);
                self.push_goto(NT_FACTOR, node, line);
            }
            // factor ::= NUM
            6 => {
                let num = self.pop_token();
                let line = i64::from(num.line);
                let num_node = actions.token(num);
                let node = actions.production_at("factor", &[num_node], line);
                self.push_goto(NT_FACTOR, node, line);
            }
            _ => unreachable!("no such production"),
        }
    }
}

impl ParserEngine for CalcEngine {
    fn offer(&mut self, token: Token, actions: &mut GrammarActions<'_>) -> Result<()> {
        let col = match column(token.kind) {
            Some(col) => col,
            None => return Err(actions.syntax_error()),
        };

        loop {
            match ACTION[self.state()][col] {
                Shift(next) => {
                    self.stack.push(StackEntry {
                        state: next,
                        sym: StackSym::Token(token),
                    });
                    return Ok(());
                }
                Reduce(production) => self.reduce(production, actions),
                Accept => {
                    actions.success();
                    return Ok(());
                }
                Reject => return Err(actions.syntax_error()),
            }
        }
    }
}

/// Parse an arithmetic expression with the in-repo grammar.
pub fn parse(input: &str) -> Result<crate::ast::ParseNode> {
    crate::parsing::parse_with::<CalcEngine>(&LEXER, input)
}
