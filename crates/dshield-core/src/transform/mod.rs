//! Feed-to-export transformation: classify, normalize, assemble.
//!
//! Every step is pure. The assembler is the only one that logs, and only to
//! report records it had to drop.

mod assemble;
mod classify;
mod normalize;

pub use assemble::*;
pub use classify::*;
pub use normalize::*;
