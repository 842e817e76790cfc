pub mod domain;
mod infrastructure;
pub mod test_utils;

// Placeholders for fields left empty

pub const DEFAULT_TAG: &str = "Uncategorized";
pub const DEFAULT_DRAFT_TITLE: &str = "Untitled Draft";
pub const DEFAULT_AUTHOR: &str = "Mustjaab";

// Largest id accepted from callers, the biggest integer JSON clients represent exactly
pub const MAX_ID: u64 = 9_007_199_254_740_991;

// expose domain module

pub use domain::*;

// expose storage module

pub use infrastructure::json_store::{JsonFileRepository, StorageSettings};
