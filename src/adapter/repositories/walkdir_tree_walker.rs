//! Walkdir Tree Walker Implementation
//!
//! TreeWalkerのファイルシステム実装

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::warn;
use std::path::Path;
use walkdir::WalkDir;

use crate::domain::entities::upload_candidate::UploadCandidate;
use crate::domain::repositories::tree_walker::TreeWalker;

/// walkdirベースのツリーウォーカー
///
/// 深さ優先・ファイル名の辞書順で列挙する。シンボリックリンクは辿らない。
pub struct WalkdirTreeWalker;

impl WalkdirTreeWalker {
    /// 新しいウォーカーを作成
    pub fn new() -> Self {
        Self
    }

    /// ツリーを平坦化する（同期処理）
    ///
    /// エントリの読み取りに失敗したらウォークを打ち切り、
    /// それまでの候補を返す
    fn walk_sync(root: &Path) -> Vec<UploadCandidate> {
        let mut candidates = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Walk of {} aborted: {}", root.display(), e);
                    break;
                }
            };

            // ディレクトリ自体は候補にならない
            if !entry.file_type().is_file() {
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    warn!("Walk of {} aborted: {}", root.display(), e);
                    break;
                }
            };

            candidates.push(UploadCandidate::new(entry.path().to_path_buf(), size));
        }

        candidates
    }
}

#[async_trait]
impl TreeWalker for WalkdirTreeWalker {
    async fn walk(&self, root: &Path) -> Result<Vec<UploadCandidate>> {
        let root = root.to_path_buf();
        tokio::task::spawn_blocking(move || Self::walk_sync(&root))
            .await
            .map_err(|e| anyhow!("Failed to spawn blocking task: {}", e))
    }
}

impl Default for WalkdirTreeWalker {
    fn default() -> Self {
        Self::new()
    }
}
