//! Cidsync - Content-Addressed Upload Tool
//!
//! ファイル/ディレクトリをストレージノードへプッシュし、台帳で再開可能にする

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use cidsync::driver::{Cli, CidSyncWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Resolve configuration (CLI flags override file values)
    let config = cli.resolve_config()?;

    // Create workflow with injected dependencies
    let workflow = CidSyncWorkflow::new(config);

    workflow.execute(cli).await
}
