//! IPFS Node API Client
//!
//! ObjectStoreのHTTP実装（ノードAPIへのリクエストを組み立てる）

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use walkdir::WalkDir;

use crate::domain::entities::directory_link::DirectoryLink;
use crate::domain::repositories::object_store::ObjectStore;

use super::models::{AddEvent, LsLink, LsOutput};

/// ノードAPIのHTTPクライアント
///
/// すべての呼び出しは一度きり（リトライなし）で、タイムアウトも設定しない。
/// 応答しないノードはツールをそのまま待たせる。
pub struct IpfsClient {
    http: reqwest::Client,
    base_url: String,
}

impl IpfsClient {
    /// 新しいクライアントを作成
    ///
    /// # Arguments
    ///
    /// * `base_url` - ノードAPIのベースURL（例: `http://127.0.0.1:5001`）
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/api/v0/{}", self.base_url, name)
    }

    /// multipartフォームを `add` に送信し、NDJSONイベント列をパースする
    async fn submit_add(&self, form: Form) -> Result<Vec<AddEvent>> {
        let res = self
            .http
            .post(self.endpoint("add"))
            .multipart(form)
            .send()
            .await
            .context("Failed to send add request")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read add response")?;
        if !status.is_success() {
            bail!("add failed: {} - {}", status, body);
        }

        // レスポンスは1行1イベントのNDJSON
        let events: Vec<AddEvent> = body
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str)
            .collect::<Result<_, _>>()
            .context("Failed to parse add response")?;

        if events.is_empty() {
            bail!("add returned no entries");
        }

        Ok(events)
    }

    fn to_domain_link(link: LsLink) -> DirectoryLink {
        DirectoryLink {
            name: link.name,
            cid: link.hash,
            size: link.size,
            kind: link.kind,
        }
    }
}

#[async_trait]
impl ObjectStore for IpfsClient {
    async fn add_file(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let events = self.submit_add(form).await?;

        debug!("add_file {}: {} event(s)", path.display(), events.len());

        // 単一ファイルはイベント1つだが、常に最後のイベントを採用する
        Ok(events.into_iter().last().map(|e| e.hash).unwrap_or_default())
    }

    async fn add_directory(&self, path: &Path) -> Result<String> {
        // ノードがツリーを再構築できるよう、各エントリをルートディレクトリ名
        // からの相対パスを名前に持つパートとして送る。ノードはエントリごとに
        // イベントを返し、最後のイベントがルートディレクトリになる。
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let mut form = Form::new();

        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("Failed to walk directory {}", path.display()))?;
            let relative = entry
                .path()
                .strip_prefix(base)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .into_owned();

            if entry.file_type().is_dir() {
                let part = Part::bytes(Vec::new())
                    .file_name(relative)
                    .mime_str("application/x-directory")?;
                form = form.part("file", part);
            } else if entry.file_type().is_file() {
                let bytes = tokio::fs::read(entry.path())
                    .await
                    .with_context(|| format!("Failed to open {}", entry.path().display()))?;
                form = form.part("file", Part::bytes(bytes).file_name(relative));
            }
        }

        let events = self.submit_add(form).await?;

        debug!("add_directory {}: {} event(s)", path.display(), events.len());

        // 最後のイベント = ルートディレクトリ
        Ok(events.into_iter().last().map(|e| e.hash).unwrap_or_default())
    }

    async fn list_children(&self, cid: &str) -> Result<Vec<DirectoryLink>> {
        let res = self
            .http
            .post(self.endpoint("ls"))
            .query(&[("arg", cid)])
            .send()
            .await
            .context("Failed to send ls request")?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            bail!("ls failed: {} - {}", status, body);
        }

        let output: LsOutput = res.json().await.context("Failed to parse ls response")?;

        // 欠落・nullはいずれも「子なし」
        let links = output
            .objects
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|object| object.links)
            .unwrap_or_default();

        Ok(links.into_iter().map(Self::to_domain_link).collect())
    }
}
