//! IPFS API Wire Models
//!
//! ノードAPIのレスポンス型（serde用の内部表現）

use serde::Deserialize;

/// `add` エンドポイントが返すNDJSONの1イベント
///
/// ディレクトリ追加の場合はエントリごとに1イベントが届き、
/// 最後のイベントがルートディレクトリを表す
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddEvent {
    /// エントリの名前（ルートからの相対パス）
    pub name: String,
    /// 割り当てられたコンテンツID
    pub hash: String,
}

/// `ls` エンドポイントのレスポンス
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LsOutput {
    /// 対象ごとの結果（欠落やnullは「子なし」として扱う）
    #[serde(default)]
    pub objects: Option<Vec<LsObject>>,
}

/// `ls` の1オブジェクト分の結果
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LsObject {
    /// 対象のコンテンツID
    pub hash: String,
    /// 直接の子リンク
    #[serde(default)]
    pub links: Option<Vec<LsLink>>,
}

/// `ls` が返す1つの子リンク
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LsLink {
    /// 子エントリの名前
    pub name: String,
    /// 子エントリのコンテンツID
    pub hash: String,
    /// バイトサイズ
    pub size: u64,
    /// 種別コード（1 = ディレクトリ型）
    #[serde(rename = "Type")]
    pub kind: i64,
}
