//! # Push Path Use Case
//!
//! パスアップロードのオーケストレーション

use anyhow::{Context, Result};
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::ledger_record::LedgerRecord;
use crate::domain::entities::upload_candidate::UploadCandidate;
use crate::domain::repositories::ledger_repository::{LedgerIndex, LedgerRepository};
use crate::domain::repositories::object_store::ObjectStore;
use crate::domain::repositories::tree_walker::TreeWalker;

/// プッシュ結果のサマリー
#[derive(Debug, Clone, Default)]
pub struct PushSummary {
    /// アップロードしたエントリ数
    pub uploaded: usize,
    /// 台帳によりスキップしたファイル数
    pub skipped: usize,
}

/// パスアップロードユースケース
///
/// 1回の起動で指定された1つのパスを処理する。パスが通常ファイルなら
/// そのままアップロード、ディレクトリなら `recursive` に応じて
/// 1つの不透明な単位としてアップロードするか、ウォークして
/// ファイルごとにアップロードする。
///
/// 冪等性インデックスは起動時にリプレイされたものを参照するだけで、
/// 実行中に追加されたレコードは反映されない。後続のファイルが失敗しても
/// 既に台帳へ追記されたレコードはそのまま残る（ロールバックなし）。
pub struct PushPathUseCase<S: ObjectStore, L: LedgerRepository, W: TreeWalker> {
    store: Arc<S>,
    ledger: Arc<L>,
    walker: Arc<W>,
}

impl<S: ObjectStore, L: LedgerRepository, W: TreeWalker> PushPathUseCase<S, L, W> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `store` - オブジェクトストア
    /// * `ledger` - 台帳リポジトリ
    /// * `walker` - ツリーウォーカー
    pub fn new(store: Arc<S>, ledger: Arc<L>, walker: Arc<W>) -> Self {
        Self {
            store,
            ledger,
            walker,
        }
    }

    /// パスをアップロードする
    ///
    /// # Arguments
    ///
    /// * `index` - 起動時にリプレイした冪等性インデックス
    /// * `path` - アップロード対象のパス
    /// * `recursive` - ディレクトリをファイル単位で再帰アップロードするか
    ///
    /// # Errors
    ///
    /// statの失敗、ファイルオープンの失敗、バックエンド呼び出しの失敗は
    /// いずれも致命的エラーとして返し、起動全体を中断する
    pub async fn execute(
        &self,
        index: &LedgerIndex,
        path: &str,
        recursive: bool,
    ) -> Result<PushSummary> {
        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Failed to stat {}", path))?;

        let mut summary = PushSummary::default();

        if metadata.is_dir() {
            if !recursive {
                // ディレクトリ全体を1つの単位としてアップロード
                let cid = self.store.add_directory(Path::new(path)).await?;
                let record = LedgerRecord::directory(path.to_string(), cid);
                self.commit(&record).await;
                summary.uploaded += 1;
            } else {
                // ファイルごとに再帰アップロード
                let candidates = self.walker.walk(Path::new(path)).await?;
                for candidate in candidates {
                    self.push_one(index, &candidate, &mut summary).await?;
                }
            }
        } else {
            let candidate = UploadCandidate::new(PathBuf::from(path), metadata.len());
            self.push_one(index, &candidate, &mut summary).await?;
        }

        Ok(summary)
    }

    /// 1ファイルをアップロードする
    ///
    /// 台帳リプレイ時点でプッシュ済みのパスはバックエンドに触れずスキップする
    async fn push_one(
        &self,
        index: &LedgerIndex,
        candidate: &UploadCandidate,
        summary: &mut PushSummary,
    ) -> Result<()> {
        let key = candidate.key();

        if index.is_pushed(&key) {
            println!("path {} already pushed in log", key);
            summary.skipped += 1;
            return Ok(());
        }

        let cid = self.store.add_file(&candidate.path).await?;
        let record = LedgerRecord::file(key, cid, candidate.size);
        self.commit(&record).await;
        summary.uploaded += 1;

        Ok(())
    }

    /// レコードを台帳へ追記し、同じ行を標準出力へエコーする
    ///
    /// アップロード自体は既にリモートで完了しているため、追記の失敗は
    /// 警告に留め、エコーは常に行う
    async fn commit(&self, record: &LedgerRecord) {
        if let Err(e) = self.ledger.append(record).await {
            warn!("Failed to append ledger record for {}: {}", record.path, e);
        }
        println!("{}", record.to_line());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    use crate::domain::entities::directory_link::DirectoryLink;

    /// 呼び出しを記録するテスト用ストア
    struct RecordingStore {
        added_files: Mutex<Vec<PathBuf>>,
        added_dirs: Mutex<Vec<PathBuf>>,
        should_succeed: bool,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                added_files: Mutex::new(Vec::new()),
                added_dirs: Mutex::new(Vec::new()),
                should_succeed: true,
            }
        }

        fn failing() -> Self {
            Self {
                should_succeed: false,
                ..Self::new()
            }
        }

        fn cid_for(path: &Path) -> String {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("Qm-{}", name)
        }
    }

    #[async_trait]
    impl ObjectStore for RecordingStore {
        async fn add_file(&self, path: &Path) -> Result<String> {
            if !self.should_succeed {
                return Err(anyhow!("backend unavailable"));
            }
            self.added_files.lock().unwrap().push(path.to_path_buf());
            Ok(Self::cid_for(path))
        }

        async fn add_directory(&self, path: &Path) -> Result<String> {
            if !self.should_succeed {
                return Err(anyhow!("backend unavailable"));
            }
            self.added_dirs.lock().unwrap().push(path.to_path_buf());
            Ok(Self::cid_for(path))
        }

        async fn list_children(&self, _cid: &str) -> Result<Vec<DirectoryLink>> {
            Ok(vec![])
        }
    }

    /// 追記されたレコードを記録するテスト用台帳
    struct RecordingLedger {
        records: Mutex<Vec<LedgerRecord>>,
        fail_append: bool,
    }

    impl RecordingLedger {
        fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                fail_append: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail_append: true,
                ..Self::new()
            }
        }

        fn records(&self) -> Vec<LedgerRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LedgerRepository for RecordingLedger {
        async fn load(&self) -> Result<LedgerIndex> {
            Ok(LedgerIndex::new())
        }

        async fn append(&self, record: &LedgerRecord) -> Result<()> {
            if self.fail_append {
                return Err(anyhow!("write failed"));
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    /// 実ファイルシステムを使うテスト用ウォーカー
    struct FsWalker;

    #[async_trait]
    impl TreeWalker for FsWalker {
        async fn walk(&self, root: &Path) -> Result<Vec<UploadCandidate>> {
            let mut candidates = Vec::new();
            for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file() {
                    let size = entry.metadata()?.len();
                    candidates.push(UploadCandidate::new(entry.path().to_path_buf(), size));
                }
            }
            Ok(candidates)
        }
    }

    fn use_case(
        store: Arc<RecordingStore>,
        ledger: Arc<RecordingLedger>,
    ) -> PushPathUseCase<RecordingStore, RecordingLedger, FsWalker> {
        PushPathUseCase::new(store, ledger, Arc::new(FsWalker))
    }

    #[tokio::test]
    async fn test_push_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("x.txt");
        fs::write(&file_path, b"0123456789").unwrap();

        let store = Arc::new(RecordingStore::new());
        let ledger = Arc::new(RecordingLedger::new());
        let use_case = use_case(store.clone(), ledger.clone());

        let index = LedgerIndex::new();
        let summary = use_case
            .execute(&index, file_path.to_str().unwrap(), false)
            .await
            .unwrap();

        assert_eq!(summary.uploaded, 1);
        assert_eq!(summary.skipped, 0);

        let records = ledger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, file_path.to_string_lossy());
        assert_eq!(records[0].cid, "Qm-x.txt");
        assert_eq!(records[0].size, 10);
        assert_eq!(records[0].kind.code(), 2);
    }

    #[tokio::test]
    async fn test_push_skips_already_pushed_path() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("x.txt");
        fs::write(&file_path, b"data").unwrap();

        let store = Arc::new(RecordingStore::new());
        let ledger = Arc::new(RecordingLedger::new());
        let use_case = use_case(store.clone(), ledger.clone());

        let mut index = LedgerIndex::new();
        index.insert(file_path.to_string_lossy().into_owned());

        let summary = use_case
            .execute(&index, file_path.to_str().unwrap(), false)
            .await
            .unwrap();

        assert_eq!(summary.uploaded, 0);
        assert_eq!(summary.skipped, 1);
        // バックエンドには触れない
        assert!(store.added_files.lock().unwrap().is_empty());
        assert!(ledger.records().is_empty());
    }

    #[tokio::test]
    async fn test_push_directory_non_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let dir_path = temp_dir.path().join("data");
        fs::create_dir(&dir_path).unwrap();
        fs::write(dir_path.join("x.txt"), b"0123456789").unwrap();

        let store = Arc::new(RecordingStore::new());
        let ledger = Arc::new(RecordingLedger::new());
        let use_case = use_case(store.clone(), ledger.clone());

        let index = LedgerIndex::new();
        let summary = use_case
            .execute(&index, dir_path.to_str().unwrap(), false)
            .await
            .unwrap();

        assert_eq!(summary.uploaded, 1);
        assert_eq!(store.added_dirs.lock().unwrap().len(), 1);
        assert!(store.added_files.lock().unwrap().is_empty());

        // ディレクトリは1行、サイズ0、種別1
        let records = ledger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].size, 0);
        assert_eq!(records[0].kind.code(), 1);
    }

    #[tokio::test]
    async fn test_push_directory_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let dir_path = temp_dir.path().join("data");
        fs::create_dir(&dir_path).unwrap();
        fs::write(dir_path.join("x.txt"), b"0123456789").unwrap();
        fs::write(dir_path.join("y.txt"), b"01234567890123456789").unwrap();

        let store = Arc::new(RecordingStore::new());
        let ledger = Arc::new(RecordingLedger::new());
        let use_case = use_case(store.clone(), ledger.clone());

        let index = LedgerIndex::new();
        let summary = use_case
            .execute(&index, dir_path.to_str().unwrap(), true)
            .await
            .unwrap();

        assert_eq!(summary.uploaded, 2);
        assert!(store.added_dirs.lock().unwrap().is_empty());

        // ウォーク順（辞書順）にファイルごとのレコード
        let records = ledger.records();
        assert_eq!(records.len(), 2);
        assert!(records[0].path.ends_with("x.txt"));
        assert_eq!(records[0].size, 10);
        assert_eq!(records[0].kind.code(), 2);
        assert!(records[1].path.ends_with("y.txt"));
        assert_eq!(records[1].size, 20);
    }

    #[tokio::test]
    async fn test_push_recursive_skips_only_indexed_files() {
        let temp_dir = TempDir::new().unwrap();
        let dir_path = temp_dir.path().join("data");
        fs::create_dir(&dir_path).unwrap();
        fs::write(dir_path.join("x.txt"), b"aaa").unwrap();
        fs::write(dir_path.join("y.txt"), b"bbb").unwrap();

        let store = Arc::new(RecordingStore::new());
        let ledger = Arc::new(RecordingLedger::new());
        let use_case = use_case(store.clone(), ledger.clone());

        // x.txt のみリプレイ済み
        let mut index = LedgerIndex::new();
        index.insert(dir_path.join("x.txt").to_string_lossy().into_owned());

        let summary = use_case
            .execute(&index, dir_path.to_str().unwrap(), true)
            .await
            .unwrap();

        assert_eq!(summary.uploaded, 1);
        assert_eq!(summary.skipped, 1);

        let records = ledger.records();
        assert_eq!(records.len(), 1);
        assert!(records[0].path.ends_with("y.txt"));
    }

    #[tokio::test]
    async fn test_push_same_path_twice_in_one_run_uploads_twice() {
        // インデックスは起動時に凍結されるため、同一実行内の再プッシュは
        // スキップされない
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("x.txt");
        fs::write(&file_path, b"data").unwrap();

        let store = Arc::new(RecordingStore::new());
        let ledger = Arc::new(RecordingLedger::new());
        let use_case = use_case(store.clone(), ledger.clone());

        let index = LedgerIndex::new();
        use_case
            .execute(&index, file_path.to_str().unwrap(), false)
            .await
            .unwrap();
        use_case
            .execute(&index, file_path.to_str().unwrap(), false)
            .await
            .unwrap();

        assert_eq!(store.added_files.lock().unwrap().len(), 2);
        assert_eq!(ledger.records().len(), 2);
    }

    #[tokio::test]
    async fn test_push_nonexistent_path_fails() {
        let store = Arc::new(RecordingStore::new());
        let ledger = Arc::new(RecordingLedger::new());
        let use_case = use_case(store, ledger);

        let index = LedgerIndex::new();
        let result = use_case.execute(&index, "/nonexistent/path", false).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_push_backend_failure_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("x.txt");
        fs::write(&file_path, b"data").unwrap();

        let store = Arc::new(RecordingStore::failing());
        let ledger = Arc::new(RecordingLedger::new());
        let use_case = use_case(store, ledger.clone());

        let index = LedgerIndex::new();
        let result = use_case
            .execute(&index, file_path.to_str().unwrap(), false)
            .await;

        assert!(result.is_err());
        assert!(ledger.records().is_empty());
    }

    #[tokio::test]
    async fn test_push_ledger_append_failure_is_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("x.txt");
        fs::write(&file_path, b"data").unwrap();

        let store = Arc::new(RecordingStore::new());
        let ledger = Arc::new(RecordingLedger::failing());
        let use_case = use_case(store.clone(), ledger);

        let index = LedgerIndex::new();
        let summary = use_case
            .execute(&index, file_path.to_str().unwrap(), false)
            .await
            .unwrap();

        // アップロードは完了扱い
        assert_eq!(summary.uploaded, 1);
        assert_eq!(store.added_files.lock().unwrap().len(), 1);
    }
}
