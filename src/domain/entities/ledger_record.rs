//! # LedgerRecord Entity
//!
//! 台帳レコードのエンティティ

use std::fmt;

/// 台帳エントリの種別
///
/// 台帳ファイル上では整数コードで永続化される（1 = Directory, 2 = File）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// ディレクトリ（1つの不透明な単位としてアップロードされたもの）
    Directory,
    /// 通常ファイル
    File,
}

impl EntryKind {
    /// 台帳ファイル上の整数コードを返す
    pub fn code(self) -> u8 {
        match self {
            EntryKind::Directory => 1,
            EntryKind::File => 2,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 台帳レコード
///
/// アップロード成功1件につき1行として永続化されるレコード。
/// `path` は元のファイルシステムパスで、冪等性のキーとして使われる。
/// 作成後に変更・削除されることはない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRecord {
    /// 元のファイルシステムパス（冪等性キー）
    pub path: String,
    /// ストレージバックエンドが返したコンテンツID
    pub cid: String,
    /// バイトサイズ（ディレクトリは0）
    pub size: u64,
    /// エントリ種別
    pub kind: EntryKind,
}

impl LedgerRecord {
    /// ファイルアップロードのレコードを作成
    pub fn file(path: String, cid: String, size: u64) -> Self {
        Self {
            path,
            cid,
            size,
            kind: EntryKind::File,
        }
    }

    /// ディレクトリアップロードのレコードを作成（サイズは常に0）
    pub fn directory(path: String, cid: String) -> Self {
        Self {
            path,
            cid,
            size: 0,
            kind: EntryKind::Directory,
        }
    }

    /// 台帳ファイルの1行として整形する
    ///
    /// 形式: `path cid size kind`（末尾改行なし）
    pub fn to_line(&self) -> String {
        format!("{} {} {} {}", self.path, self.cid, self.size, self.kind)
    }

    /// 台帳ファイルの1行から冪等性キー（パス）を取り出す
    ///
    /// 空白区切りで2フィールド以上ある行のみ有効。それ以外（空行、
    /// フィールド不足）は `None` を返し、読み込み時に黙って読み飛ばされる。
    pub fn key_from_line(line: &str) -> Option<&str> {
        let mut fields = line.split_whitespace();
        let first = fields.next()?;
        fields.next()?;
        Some(first)
    }
}
