//! Extraction engine: block matching, section decomposition, and
//! implementation lookup over the two aggregate sources.

pub mod block;
pub mod implementation;
pub mod sections;

pub use block::{discover, Discovery};
pub use implementation::locate_implementation;
pub use sections::decompose;
