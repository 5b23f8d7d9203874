//! IPFS Node Integration
//!
//! ノードAPIクライアントとワイヤ型

pub mod client;
pub mod models;
