//! # Display Path Service
//!
//! リスト表示用パスの結合サービス

/// 表示パス結合サービス
///
/// リスト出力の1列目に使う表示パスを、スラッシュ区切りで結合する
/// ビジネスロジック
pub struct DisplayPath;

impl DisplayPath {
    /// ベースプレフィックスと子の名前を `/` で結合する
    ///
    /// 余分な区切り文字と `.` セグメントは畳み込まれる。
    /// 両方が空に畳まれた場合は `.` を返す。
    ///
    /// # Arguments
    ///
    /// * `base` - 現在のプレフィックス
    /// * `name` - 子エントリの名前
    pub fn join(base: &str, name: &str) -> String {
        let segments: Vec<&str> = base
            .split('/')
            .chain(name.split('/'))
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();

        if segments.is_empty() {
            ".".to_string()
        } else {
            segments.join("/")
        }
    }
}
