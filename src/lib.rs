//! stackfall (workspace facade crate).
//!
//! Re-exports the member crates under `stackfall::{core,engine,input,score,term,types}`
//! while the implementation lives in dedicated crates under `crates/`.

pub use stackfall_core as core;
pub use stackfall_engine as engine;
pub use stackfall_input as input;
pub use stackfall_score as score;
pub use stackfall_term as term;
pub use stackfall_types as types;
