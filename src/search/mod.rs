// engine module
mod engine;
// error module
mod error;
// sequence module
mod sequence;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the search module.
//─────────────────────────────────────────────────────────────────────────────
pub use engine::{SearchEngine, Strategy};
pub use error::SearchError;
