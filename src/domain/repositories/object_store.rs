//! # Object Store Trait
//!
//! コンテンツアドレス型ストレージバックエンドを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::directory_link::DirectoryLink;

/// オブジェクトストア
///
/// リモートのコンテンツアドレス型ストレージノードへの狭いインターフェース。
/// すべての呼び出しはブロッキング相当（完了かエラーまで待つ）で、
/// リトライもタイムアウトも行わない。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// ファイルの内容をストアに追加し、コンテンツIDを返す
    ///
    /// # Errors
    ///
    /// ファイルが開けない場合、またはバックエンド呼び出しに失敗した場合に
    /// エラーを返す
    async fn add_file(&self, path: &Path) -> Result<String>;

    /// ディレクトリ全体を1つの不透明な単位として追加し、コンテンツIDを返す
    ///
    /// # Errors
    ///
    /// バックエンド呼び出しに失敗した場合にエラーを返す
    async fn add_directory(&self, path: &Path) -> Result<String>;

    /// コンテンツIDの直接の子リンクを取得する
    ///
    /// 子が存在しない場合は空のベクターを返す（エラーではない）
    ///
    /// # Errors
    ///
    /// バックエンド呼び出しに失敗した場合にエラーを返す
    async fn list_children(&self, cid: &str) -> Result<Vec<DirectoryLink>>;
}
