//! # Tree Walker Trait
//!
//! ディレクトリツリーの平坦化を抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::domain::entities::upload_candidate::UploadCandidate;

/// ツリーウォーカー
///
/// ディレクトリを深さ優先・辞書順で平坦化し、通常ファイルのみを
/// アップロード候補として列挙する。ディレクトリ自体は候補にならない。
#[async_trait]
pub trait TreeWalker: Send + Sync {
    /// ルート以下の全ファイルを候補として列挙する
    ///
    /// 途中でエントリの読み取りに失敗した場合、ウォークはそこで打ち切り、
    /// それまでに収集した候補を返す（プロセスレベルの失敗にはしない）。
    ///
    /// # Errors
    ///
    /// ウォークの開始自体ができない場合にエラーを返す
    async fn walk(&self, root: &Path) -> Result<Vec<UploadCandidate>>;
}
