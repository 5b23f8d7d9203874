//! # List Tree Use Case
//!
//! 格納済みツリーの列挙ユースケース

use anyhow::Result;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::domain::repositories::object_store::ObjectStore;
use crate::domain::services::display_path::DisplayPath;

/// リスト出力の1エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// プレフィックスと子の名前を結合した表示パス
    pub path: String,
    /// 子のコンテンツID
    pub cid: String,
    /// バイトサイズ
    pub size: u64,
    /// バックエンドの種別コード（そのまま表示される）
    pub kind: i64,
}

impl ListedEntry {
    /// 表示用の1行として整形する
    pub fn to_line(&self) -> String {
        format!("{} {} {} {}", self.path, self.cid, self.size, self.kind)
    }
}

/// ツリー列挙ユースケース
///
/// 指定されたコンテンツIDの直接の子リンクを取得して列挙し、
/// `recursive` が真ならディレクトリ型の子へ深さ優先で降りる。
/// 子の順序はバックエンドが返した順をそのまま使い、ディレクトリは
/// 自身の行の直後（後続の兄弟より先）に展開される。
///
/// 子が空のレベルはそのレベルから戻るだけで、残りの兄弟の列挙は
/// 継続する。
pub struct ListTreeUseCase<S: ObjectStore> {
    store: Arc<S>,
}

impl<S: ObjectStore> ListTreeUseCase<S> {
    /// 新しいユースケースを作成
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// ツリーを列挙する
    ///
    /// # Arguments
    ///
    /// * `prefix` - 表示パスのベースプレフィックス
    /// * `cid` - 列挙対象のコンテンツID
    /// * `recursive` - ディレクトリ型の子へ再帰するか
    ///
    /// # Returns
    ///
    /// 深さ優先順のエントリ列（空なら成功扱いで出力なし）
    ///
    /// # Errors
    ///
    /// バックエンド呼び出しに失敗した場合にエラーを返す
    pub async fn execute(
        &self,
        prefix: &str,
        cid: &str,
        recursive: bool,
    ) -> Result<Vec<ListedEntry>> {
        let mut entries = Vec::new();
        self.visit(prefix.to_string(), cid.to_string(), recursive, &mut entries)
            .await?;
        Ok(entries)
    }

    /// 1レベル分の子リンクを列挙し、必要なら降りる
    ///
    /// 再帰asyncのためBoxedなFutureを返す
    fn visit<'a>(
        &'a self,
        prefix: String,
        cid: String,
        recursive: bool,
        out: &'a mut Vec<ListedEntry>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let links = self.store.list_children(&cid).await?;

            for link in links {
                let joined = DisplayPath::join(&prefix, &link.name);
                out.push(ListedEntry {
                    path: joined.clone(),
                    cid: link.cid.clone(),
                    size: link.size,
                    kind: link.kind,
                });

                if recursive && link.is_directory() {
                    self.visit(joined, link.cid, recursive, out).await?;
                }
            }

            Ok(())
        })
    }
}
