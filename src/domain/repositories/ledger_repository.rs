//! # Ledger Repository Trait
//!
//! アップロード台帳の永続化を抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::entities::ledger_record::LedgerRecord;

/// 冪等性インデックス
///
/// どのパスが既にプッシュ済みかを追跡するための集合。
/// プロセス起動時の台帳リプレイで一度だけ構築され、以後は変更されない。
/// 実行中にアップロードしたパスは追加されないため、同一実行内で同じ
/// パスを2回渡すと2回アップロードされる（仕様上の既知の挙動）。
#[derive(Debug, Clone, Default)]
pub struct LedgerIndex {
    pushed_paths: HashSet<String>,
}

impl LedgerIndex {
    /// 空のインデックスを作成
    pub fn new() -> Self {
        Self {
            pushed_paths: HashSet::new(),
        }
    }

    /// パスがプッシュ済みかどうかを確認
    pub fn is_pushed(&self, path: &str) -> bool {
        self.pushed_paths.contains(path)
    }

    /// プッシュ済みパスを追加（台帳リプレイ時のみ使用）
    pub fn insert(&mut self, path: String) {
        self.pushed_paths.insert(path);
    }

    /// インデックス内のパス数を返す
    pub fn len(&self) -> usize {
        self.pushed_paths.len()
    }

    /// インデックスが空かどうかを返す
    pub fn is_empty(&self) -> bool {
        self.pushed_paths.is_empty()
    }
}

/// 台帳リポジトリ
///
/// アップロード台帳の読み込み（リプレイ）と追記を担当するリポジトリ
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// 台帳をリプレイして冪等性インデックスを構築する
    ///
    /// # Returns
    ///
    /// 整形済み行の第1フィールド（パス）の集合
    ///
    /// # Errors
    ///
    /// 台帳ファイルが存在する場合に読み込みに失敗するとエラーを返す
    /// （ファイルが存在しない場合は空のインデックス）
    async fn load(&self) -> Result<LedgerIndex>;

    /// レコードを台帳に1行追記する
    ///
    /// # Errors
    ///
    /// 追記ハンドルへの書き込みに失敗した場合にエラーを返す。
    /// 呼び出し側はこれを致命的エラーとして扱わない（アップロード自体は
    /// 既にリモートで完了しているため）。
    async fn append(&self, record: &LedgerRecord) -> Result<()>;
}
