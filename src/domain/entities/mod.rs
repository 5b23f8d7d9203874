//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **LedgerRecord**: 台帳レコード（アップロード成功1件＝1行）
//! - **UploadCandidate**: ウォークが生成するアップロード候補
//! - **DirectoryLink**: バックエンドが返す子リンク

pub mod directory_link;
pub mod ledger_record;
pub mod upload_candidate;
