//! # Cidsync
//!
//! ローカルのファイル/ディレクトリをコンテンツアドレス型ストレージノードへ
//! アップロードし、格納済みオブジェクトの内容をコンテンツIDでリストするツール
//!
//! アップロード成功は追記専用の台帳ファイルに1行ずつ記録され、起動時に
//! リプレイされて冪等性インデックスになる。部分的にアップロード済みの
//! ディレクトリツリーに対して再実行すると、プッシュ済みのファイルは
//! スキップされる。
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で
//! 構成されています：
//!
//! - **Domain層**: ビジネスの核心的なルールとエンティティ（外部依存なし）
//! - **Application層**: アプリケーション固有のビジネスフロー（ユースケース）
//! - **Adapter層**: 外部システムとの統合（IPFSノード, ファイルシステム等）
//! - **Driver層**: CLI、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部サービス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
