//! Journal API client
//!
//! Thin async wrapper over the backend's REST endpoints. The credential
//! is injected at construction and attached per request; nothing here
//! reads tokens from the environment or disk. Endpoints that mutate
//! return the backend's view of the resource so callers never have to
//! guess what was stored.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use crate::config::Config;
use crate::credential::Credential;
use crate::models::{
    Character, CharacterMapping, ComicEntry, EntryPatch, Folder, FolderPatch, JournalEntry,
    ListPage, NewCharacter, NewEntry, NewFolder, Streak,
};

/// Longest error body quoted back to the user
const ERROR_BODY_LIMIT: usize = 200;

/// Client for the journal API
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credential: Option<Credential>,
}

impl ApiClient {
    /// Create a client from configuration and an optional credential
    ///
    /// Unauthenticated clients can still call `login` and `register`;
    /// everything else answers `MissingCredential` without touching the
    /// network.
    pub fn new(config: &Config, credential: Option<Credential>) -> ApiResult<Self> {
        let base_url = normalize_base(&config.api_url);
        reqwest::Url::parse(&base_url).map_err(|err| ApiError::InvalidBaseUrl {
            url: base_url.clone(),
            detail: err.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("daybook/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            credential,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    // ==================== Auth ====================

    /// Exchange a username and password for a token pair
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Credential> {
        let request = self
            .request(Method::POST, "token/")
            .json(&json!({ "username": username, "password": password }));
        self.send_json("token/", request).await
    }

    /// Create an account and receive its first token pair
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<Credential> {
        let request = self.request(Method::POST, "register/").json(&json!({
            "username": username,
            "email": email,
            "password": password,
        }));
        self.send_json("register/", request).await
    }

    // ==================== Entries ====================

    pub async fn list_entries(&self, folder: Option<i64>) -> ApiResult<Vec<JournalEntry>> {
        let mut request = self.request(Method::GET, "journal-entries/");
        if let Some(folder) = folder {
            request = request.query(&[("folder", folder)]);
        }
        self.fetch_list("journal-entries/", self.authed(request)?)
            .await
    }

    pub async fn get_entry(&self, id: i64) -> ApiResult<JournalEntry> {
        let path = format!("journal-entries/{}/", id);
        let request = self.authed(self.request(Method::GET, &path))?;
        self.send_json(&path, request).await
    }

    pub async fn create_entry(&self, entry: &NewEntry) -> ApiResult<JournalEntry> {
        let request = self
            .authed(self.request(Method::POST, "journal-entries/"))?
            .json(entry);
        self.send_json("journal-entries/", request).await
    }

    pub async fn update_entry(&self, id: i64, patch: &EntryPatch) -> ApiResult<JournalEntry> {
        let path = format!("journal-entries/{}/", id);
        let request = self.authed(self.request(Method::PATCH, &path))?.json(patch);
        self.send_json(&path, request).await
    }

    pub async fn delete_entry(&self, id: i64) -> ApiResult<()> {
        let path = format!("journal-entries/{}/", id);
        let request = self.authed(self.request(Method::DELETE, &path))?;
        self.send_empty(request).await
    }

    // ==================== Comics ====================

    /// Ask the backend to draw a comic for an entry
    pub async fn create_comic(&self, entry_id: i64, character_id: i64) -> ApiResult<ComicEntry> {
        let path = format!("journal-entries/{}/create-comic/", entry_id);
        let request = self
            .authed(self.request(Method::POST, &path))?
            .json(&json!({ "character_id": character_id }));
        self.send_json(&path, request).await
    }

    pub async fn get_comic(&self, id: i64) -> ApiResult<ComicEntry> {
        let path = format!("comic-entries/{}/", id);
        let request = self.authed(self.request(Method::GET, &path))?;
        self.send_json(&path, request).await
    }

    // ==================== Folders ====================

    pub async fn list_folders(&self) -> ApiResult<Vec<Folder>> {
        let request = self.authed(self.request(Method::GET, "folders/"))?;
        self.fetch_list("folders/", request).await
    }

    pub async fn create_folder(&self, folder: &NewFolder) -> ApiResult<Folder> {
        let request = self
            .authed(self.request(Method::POST, "folders/"))?
            .json(folder);
        self.send_json("folders/", request).await
    }

    pub async fn update_folder(&self, id: i64, patch: &FolderPatch) -> ApiResult<Folder> {
        let path = format!("folders/{}/", id);
        let request = self.authed(self.request(Method::PATCH, &path))?.json(patch);
        self.send_json(&path, request).await
    }

    pub async fn delete_folder(&self, id: i64) -> ApiResult<()> {
        let path = format!("folders/{}/", id);
        let request = self.authed(self.request(Method::DELETE, &path))?;
        self.send_empty(request).await
    }

    // ==================== Characters ====================

    pub async fn list_characters(&self) -> ApiResult<Vec<Character>> {
        let request = self.authed(self.request(Method::GET, "characters/"))?;
        self.fetch_list("characters/", request).await
    }

    pub async fn create_character(&self, character: &NewCharacter) -> ApiResult<Character> {
        let request = self
            .authed(self.request(Method::POST, "characters/"))?
            .json(character);
        self.send_json("characters/", request).await
    }

    pub async fn list_character_mappings(&self) -> ApiResult<Vec<CharacterMapping>> {
        let request = self.authed(self.request(Method::GET, "user-characters/"))?;
        self.fetch_list("user-characters/", request).await
    }

    pub async fn create_character_mapping(
        &self,
        mapping: &CharacterMapping,
    ) -> ApiResult<CharacterMapping> {
        let request = self
            .authed(self.request(Method::POST, "user-characters/"))?
            .json(mapping);
        self.send_json("user-characters/", request).await
    }

    // ==================== Gamification ====================

    pub async fn get_streak(&self) -> ApiResult<Streak> {
        let request = self.authed(self.request(Method::GET, "gamification/streaks/"))?;
        self.send_json("gamification/streaks/", request).await
    }

    // ==================== Plumbing ====================

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.http.request(method, url)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> ApiResult<reqwest::RequestBuilder> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(ApiError::MissingCredential)?;
        Ok(request.bearer_auth(&credential.access))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        let response = request.send().await?;
        let response = check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    async fn send_empty(&self, request: reqwest::RequestBuilder) -> ApiResult<()> {
        let response = request.send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<Vec<T>> {
        let page: ListPage<T> = self.send_json(endpoint, request).await?;
        Ok(page.into_vec())
    }
}

/// Base URLs are joined to relative paths by concatenation, so they must
/// end with exactly one slash.
fn normalize_base(raw: &str) -> String {
    format!("{}/", raw.trim_end_matches('/'))
}

async fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body);
    warn!("API request failed with {}: {}", status, message);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Pull a human-readable message out of an error body
///
/// The backend usually answers with `{"detail": "..."}`, sometimes with
/// `error` or `message`. Anything else is quoted raw, truncated.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "error", "message"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no error detail".to_string()
    } else {
        truncate_body(trimmed)
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_LIMIT {
        return body.to_string();
    }
    let cut: String = body.chars().take(ERROR_BODY_LIMIT).collect();
    format!("{}...", cut)
}
