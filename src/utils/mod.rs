//! Shared helpers

pub mod encoding;
pub mod language;
pub mod paths;
pub mod tokens;

pub use encoding::{decode_text, is_binary_sample};
pub use language::fence_language;
pub use paths::{normalize_path, relative_path};
pub use tokens::estimate_tokens;
