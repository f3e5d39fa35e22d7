//! Extractors recognizing specific persistence-runtime failures.

mod detached;
pub use detached::DetachedAccessExtractor;
