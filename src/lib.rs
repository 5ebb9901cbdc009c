//! share-my-repo: package a repository into one LLM-friendly context document
//!
//! Files are discovered, filtered, decoded and rendered as a single Markdown,
//! JSON or YAML document with a directory tree, git metadata and a summary.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod render;
pub mod scan;
pub mod utils;
