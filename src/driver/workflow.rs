//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::adapter::config::Config;
use crate::adapter::ipfs::client::IpfsClient;
use crate::adapter::repositories::file_ledger_repository::FileLedgerRepository;
use crate::adapter::repositories::walkdir_tree_walker::WalkdirTreeWalker;
use crate::application::use_cases::list_tree::ListTreeUseCase;
use crate::application::use_cases::push_path::PushPathUseCase;
use crate::domain::repositories::ledger_repository::LedgerRepository;

use super::cli::{Cli, Command};

/// リスト表示の既定ベースプレフィックス
const LIST_BASE_PREFIX: &str = ".";

/// Cidsync Workflow
///
/// 依存を組み立て、1回の起動につき1コマンドを実行する
pub struct CidSyncWorkflow {
    config: Config,
}

impl CidSyncWorkflow {
    /// Create a new workflow instance with injected configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Execute the requested command
    pub async fn execute(&self, cli: Cli) -> Result<()> {
        info!("Using storage node at {}", self.config.api_base());

        let store = Arc::new(IpfsClient::new(self.config.api_base()));

        let ledger_path = shellexpand::tilde(&self.config.ledger).into_owned();
        let ledger = Arc::new(FileLedgerRepository::new(ledger_path));

        // The ledger is replayed exactly once, before any command runs
        let index = ledger.load().await?;
        info!("Loaded ledger: {} paths already pushed", index.len());

        match cli.command {
            Command::Add { recursive, path } => {
                let walker = Arc::new(WalkdirTreeWalker::new());
                let use_case = PushPathUseCase::new(store, ledger, walker);

                let summary = use_case.execute(&index, &path, recursive).await?;
                info!(
                    "Push complete: {} uploaded, {} skipped",
                    summary.uploaded, summary.skipped
                );
            }
            Command::List { recursive, cid } => {
                let use_case = ListTreeUseCase::new(store);

                let entries = use_case.execute(LIST_BASE_PREFIX, &cid, recursive).await?;
                for entry in &entries {
                    println!("{}", entry.to_line());
                }
            }
        }

        Ok(())
    }
}
