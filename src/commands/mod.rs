//! CLI command implementations.
//!
//! - **split**: run the extraction pipeline over one aggregate header/source
//!   pair and write the per-type artifacts plus the regenerated aggregate.
//! - **init**: write a default `.declsplit.toml` conventions file.

pub mod init;
pub mod split;

pub use init::init_config;
pub use split::{handle_split, SplitOptions};
