//! File Ledger Repository Implementation
//!
//! LedgerRepositoryのプレーンテキスト実装（追記専用の台帳ファイル）

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use log::info;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::entities::ledger_record::LedgerRecord;
use crate::domain::repositories::ledger_repository::{LedgerIndex, LedgerRepository};

/// プレーンテキストの台帳ファイルリポジトリ
///
/// `load` が台帳をリプレイした後、追記専用ハンドルを開いて保持する。
/// ハンドルはプロセス終了まで開いたままになる。
pub struct FileLedgerRepository {
    path: PathBuf,
    writer: Arc<Mutex<Option<File>>>,
}

impl FileLedgerRepository {
    /// 新しいリポジトリを作成
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: Arc::new(Mutex::new(None)),
        }
    }

    /// 台帳をリプレイして冪等性インデックスを構築する（同期処理）
    ///
    /// 読み込みハンドルはこの関数を抜ける時点で閉じられる
    fn load_sync(path: &Path) -> Result<LedgerIndex> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No existing ledger found at {}, starting empty", path.display());
                return Ok(LedgerIndex::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read ledger file {}", path.display()))
            }
        };

        let mut index = LedgerIndex::new();
        for line in content.lines() {
            // 2フィールド未満の行は黙って読み飛ばす
            if let Some(key) = LedgerRecord::key_from_line(line.trim()) {
                index.insert(key.to_string());
            }
        }

        Ok(index)
    }

    /// 追記専用ハンドルを開く（ファイルが無ければ作成する）
    fn open_append_sync(path: &Path) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open ledger file {} for append", path.display()))
    }
}

#[async_trait]
impl LedgerRepository for FileLedgerRepository {
    async fn load(&self) -> Result<LedgerIndex> {
        let path = self.path.clone();
        let writer = self.writer.clone();

        tokio::task::spawn_blocking(move || -> Result<LedgerIndex> {
            let index = Self::load_sync(&path)?;
            let file = Self::open_append_sync(&path)?;
            *writer
                .lock()
                .map_err(|_| anyhow!("Ledger writer lock poisoned"))? = Some(file);
            Ok(index)
        })
        .await
        .map_err(|e| anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn append(&self, record: &LedgerRecord) -> Result<()> {
        let line = record.to_line();
        let writer = self.writer.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut guard = writer
                .lock()
                .map_err(|_| anyhow!("Ledger writer lock poisoned"))?;
            match guard.as_mut() {
                Some(file) => {
                    writeln!(file, "{}", line).context("Failed to write ledger record")?;
                    Ok(())
                }
                None => bail!("Ledger has not been loaded"),
            }
        })
        .await
        .map_err(|e| anyhow!("Failed to spawn blocking task: {}", e))?
    }
}
