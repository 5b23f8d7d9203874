//! # Use Cases
//!
//! アプリケーション固有のビジネスフロー

pub mod list_tree;
pub mod push_path;
