mod export;
mod feed;

pub use export::*;
pub use feed::*;
