//! CLI Argument Parsing
//!
//! CLIの引数解析

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::adapter::config::Config;

/// コンテンツアドレス型ストレージノードへファイルをプッシュするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "cidsync")]
#[command(
    about = "Push local files to a content-addressed storage node and list stored trees",
    long_about = None
)]
pub struct Cli {
    /// Storage node host (overrides the config file)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Storage node port (overrides the config file)
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Ledger file path (overrides the config file)
    #[arg(long, global = true)]
    pub ledger: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// サブコマンド
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add a file or directory to the store
    #[command(alias = "a")]
    Add {
        /// Upload a directory file by file instead of as a single unit
        #[arg(short, long)]
        recursive: bool,

        /// Path to upload
        path: String,
    },

    /// List links under a content identifier
    #[command(alias = "l")]
    List {
        /// Recurse into directory-typed links
        #[arg(short, long)]
        recursive: bool,

        /// Content identifier to list
        cid: String,
    },
}

impl Cli {
    /// 設定を解決する
    ///
    /// 優先順位: CLIフラグ > 設定ファイル > 既定値
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(server) = &self.server {
            config.server = server.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(ledger) = &self.ledger {
            config.ledger = ledger.clone();
        }

        Ok(config)
    }
}
