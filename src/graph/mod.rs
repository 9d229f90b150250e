// error module
mod error;
// parser module
mod parser;
// store module
mod store;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the graph module.
//─────────────────────────────────────────────────────────────────────────────
pub use error::ParseError;
pub use parser::GraphParser;
pub use store::{GraphStore, SentenceSpec};
