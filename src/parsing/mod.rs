//! Parsing: the builder-node arena, the grammar action handle, the engine
//! contract, and the driver that ties them to the scanner.

pub mod actions;
pub mod arena;
pub mod driver;
pub mod engine;

pub use actions::GrammarActions;
pub use arena::NodeId;
pub use driver::{parse_with, Driver};
pub use engine::ParserEngine;
