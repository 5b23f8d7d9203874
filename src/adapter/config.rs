//! Configuration
//!
//! 接続先ノードと台帳ファイルの設定

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_server() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_ledger() -> String {
    "cidsync.log".to_string()
}

/// ツール設定
///
/// JSONファイルから読み込むか、既定値で構築する。
/// CLIフラグの値はファイルの値より優先される（Driver層でマージ）。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// ストレージノードのホスト
    #[serde(default = "default_server")]
    pub server: String,
    /// ストレージノードのポート
    #[serde(default = "default_port")]
    pub port: u16,
    /// 台帳ファイルのパス
    #[serde(default = "default_ledger")]
    pub ledger: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            port: default_port(),
            ledger: default_ledger(),
        }
    }
}

impl Config {
    /// JSONファイルから設定を読み込む
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let content = fs::read_to_string(expanded.as_ref())
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;
        Ok(config)
    }

    /// ノードAPIのベースURLを返す
    pub fn api_base(&self) -> String {
        format!("http://{}:{}", self.server, self.port)
    }
}
