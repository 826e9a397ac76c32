//! User notification/account preferences against the hub's second backend.
//!
//! The backend speaks a legacy flat shape (`name`, `user_type`,
//! `notification_types`); this module normalizes it into the typed model and
//! posts the legacy shape back. A JSON-file mirror stands in for the web
//! app's localStorage: written on every successful read and save, consulted
//! whenever the backend is unreachable or unhelpful. Network failures are
//! absorbed — callers never see an error, at worst stale or absent data.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Overrides the preferences API base URL.
pub const PREFS_URL_ENV: &str = "ALUMNIHUB_PREFS_URL";
/// Overrides the local mirror directory.
pub const DATA_DIR_ENV: &str = "ALUMNIHUB_DATA_DIR";

const DEFAULT_PREFS_URL: &str = "https://n54ugywlg2.execute-api.us-west-2.amazonaws.com";

const LEGACY_GAME_REMINDERS: &str = "pregame_reminders";
const LEGACY_GAME_RESULTS: &str = "postgame_results";
const LEGACY_STANDINGS_UPDATES: &str = "standings_updates";
const LEGACY_EMAIL_NOTIFICATIONS: &str = "email_notifications";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPrefs {
    #[serde(default)]
    pub game_reminders: bool,
    #[serde(default)]
    pub game_results: bool,
    #[serde(default)]
    pub standings_updates: bool,
    #[serde(default)]
    pub email_notifications: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_hours: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    /// "Fan", "Alumni", "Relative", "Parent", "Student", "Other", or empty.
    #[serde(default)]
    pub affiliation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationPrefs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// What the backend actually returns: either the typed shape or the legacy
/// flat fields, never reliably both.
#[derive(Debug, Default, Deserialize)]
struct BackendPrefs {
    #[serde(default)]
    account: Option<AccountInfo>,
    #[serde(default)]
    notifications: Option<NotificationPrefs>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_type: Option<String>,
    #[serde(default)]
    notification_types: Option<Vec<String>>,
    #[serde(default, rename = "reminderHours")]
    reminder_hours: Option<u32>,
    #[serde(default, rename = "updatedAt")]
    updated_at: Option<String>,
}

/// The payload the backend understands on writes.
#[derive(Debug, Serialize)]
struct BackendPayload {
    #[serde(rename = "userId")]
    user_id: String,
    name: String,
    email: String,
    user_type: String,
    notification_types: Vec<String>,
    #[serde(rename = "reminderHours", skip_serializing_if = "Option::is_none")]
    reminder_hours: Option<u32>,
}

fn to_legacy_types(prefs: &NotificationPrefs) -> Vec<String> {
    let mut out = Vec::new();
    if prefs.game_reminders {
        out.push(LEGACY_GAME_REMINDERS.to_owned());
    }
    if prefs.game_results {
        out.push(LEGACY_GAME_RESULTS.to_owned());
    }
    if prefs.standings_updates {
        out.push(LEGACY_STANDINGS_UPDATES.to_owned());
    }
    if prefs.email_notifications {
        out.push(LEGACY_EMAIL_NOTIFICATIONS.to_owned());
    }
    out
}

fn from_legacy_types(types: &[String], reminder_hours: Option<u32>) -> NotificationPrefs {
    NotificationPrefs {
        game_reminders: types.iter().any(|t| t == LEGACY_GAME_REMINDERS),
        game_results: types.iter().any(|t| t == LEGACY_GAME_RESULTS),
        standings_updates: types.iter().any(|t| t == LEGACY_STANDINGS_UPDATES),
        email_notifications: types.iter().any(|t| t == LEGACY_EMAIL_NOTIFICATIONS),
        reminder_hours,
    }
}

fn normalize_from_backend(user_id: &str, data: BackendPrefs) -> UserPreferences {
    let account = data.account.unwrap_or_else(|| {
        let name = data.name.unwrap_or_default();
        let mut parts = name.split_whitespace();
        let first_name = parts.next().unwrap_or_default().to_owned();
        let last_name = parts.collect::<Vec<_>>().join(" ");
        AccountInfo {
            first_name,
            last_name,
            email: data.email.unwrap_or_default(),
            affiliation: data.user_type.unwrap_or_default(),
        }
    });

    let notifications = data.notifications.or_else(|| {
        data.notification_types
            .as_deref()
            .map(|types| from_legacy_types(types, data.reminder_hours))
    });

    UserPreferences {
        user_id: user_id.to_owned(),
        account: Some(account),
        notifications,
        updated_at: data.updated_at,
    }
}

fn to_backend_payload(prefs: &UserPreferences) -> BackendPayload {
    let account = prefs.account.clone().unwrap_or_default();
    let name = format!("{} {}", account.first_name, account.last_name)
        .trim()
        .to_owned();
    BackendPayload {
        user_id: prefs.user_id.clone(),
        name,
        email: account.email,
        user_type: account.affiliation,
        notification_types: prefs
            .notifications
            .as_ref()
            .map(to_legacy_types)
            .unwrap_or_default(),
        reminder_hours: prefs.notifications.as_ref().and_then(|n| n.reminder_hours),
    }
}

/// Shallow merge: fields present in the delta win, the rest carry over.
fn merge_preferences(
    current: Option<UserPreferences>,
    delta: UserPreferences,
    user_id: &str,
) -> UserPreferences {
    let current = current.unwrap_or_default();
    UserPreferences {
        user_id: user_id.to_owned(),
        notifications: delta.notifications.or(current.notifications),
        account: delta.account.or(current.account),
        updated_at: delta.updated_at.or(current.updated_at),
    }
}

// ---------------------------------------------------------------------------
// Local mirror — one JSON file per user
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PrefsStore {
    dir: PathBuf,
}

impl Default for PrefsStore {
    fn default() -> Self {
        let dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("alumnihub"));
        Self::new(dir)
    }
}

impl PrefsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        let safe: String = user_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.dir.join(format!("prefs-{safe}.json"))
    }

    pub fn read(&self, user_id: &str) -> Option<UserPreferences> {
        let path = self.path_for(user_id);
        let raw = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(prefs) => Some(prefs),
            Err(e) => {
                warn!(path = %path.display(), "ignoring unreadable prefs mirror: {e}");
                None
            }
        }
    }

    pub fn write(&self, user_id: &str, prefs: &UserPreferences) {
        let path = self.path_for(user_id);
        if let Err(e) = self.try_write(&path, prefs) {
            warn!(path = %path.display(), "failed to write prefs mirror: {e}");
        }
    }

    fn try_write(&self, path: &Path, prefs: &UserPreferences) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let body = serde_json::to_string_pretty(prefs)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        std::fs::write(path, body)
    }
}

// ---------------------------------------------------------------------------
// Backend client
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PrefsClient {
    http: reqwest::Client,
    base_url: String,
    store: PrefsStore,
}

impl Default for PrefsClient {
    fn default() -> Self {
        let base_url =
            std::env::var(PREFS_URL_ENV).unwrap_or_else(|_| DEFAULT_PREFS_URL.to_owned());
        Self::with_base_url(base_url, PrefsStore::default())
    }
}

impl PrefsClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: impl Into<String>, store: PrefsStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            store,
        }
    }

    fn prefs_url(&self, user_id: &str) -> String {
        format!("{}/preferences/{}", self.base_url, encode_path_segment(user_id))
    }

    fn reset_url(&self) -> String {
        format!("{}/password-reset", self.base_url)
    }

    /// Preferences for a user: backend first, local mirror on any miss.
    pub async fn get_preferences(&self, user_id: &str) -> Option<UserPreferences> {
        let url = self.prefs_url(user_id);
        match self.http.get(&url).send().await {
            Ok(res) if res.status().is_success() => match res.json::<BackendPrefs>().await {
                Ok(data) => {
                    let normalized = normalize_from_backend(user_id, data);
                    self.store.write(user_id, &normalized);
                    Some(normalized)
                }
                Err(e) => {
                    warn!("preferences response unreadable, using local mirror: {e}");
                    self.store.read(user_id)
                }
            },
            Ok(res) => {
                debug!(status = %res.status(), "preferences backend miss, using local mirror");
                self.store.read(user_id)
            }
            Err(e) => {
                warn!("preferences GET failed, using local mirror: {e}");
                self.store.read(user_id)
            }
        }
    }

    /// Merge the delta over the stored preferences, mirror locally first,
    /// then best-effort sync to the backend. Never fails.
    pub async fn save_preferences(
        &self,
        user_id: &str,
        delta: UserPreferences,
    ) -> UserPreferences {
        let current = self.get_preferences(user_id).await;
        let mut next = merge_preferences(current, delta, user_id);
        // Backend-provided updatedAt wins; mirror-only saves stamp their own.
        next.updated_at
            .get_or_insert_with(|| chrono::Utc::now().to_rfc3339());
        self.store.write(user_id, &next);

        let payload = to_backend_payload(&next);
        match self.http.post(self.prefs_url(user_id)).json(&payload).send().await {
            Ok(res) if !res.status().is_success() => {
                // Local mirror stands; the backend catches up on the next save.
                error!(status = %res.status(), "preferences save rejected");
            }
            Err(e) => warn!("preferences POST failed, keeping local mirror: {e}"),
            Ok(_) => {}
        }
        next
    }

    /// Fire-and-best-effort; an empty email is a no-op.
    pub async fn request_password_reset(&self, email: &str) {
        if email.trim().is_empty() {
            return;
        }
        let body = serde_json::json!({ "email": email });
        match self.http.post(self.reset_url()).json(&body).send().await {
            Ok(res) if !res.status().is_success() => {
                error!(status = %res.status(), "password reset request rejected");
            }
            Err(e) => warn!("password reset request failed: {e}"),
            Ok(_) => {}
        }
    }
}

fn encode_path_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~') {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).as_bytes() {
                out.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> PrefsStore {
        let dir = std::env::temp_dir().join(format!(
            "alumnihub-prefs-test-{}-{tag}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        PrefsStore::new(dir)
    }

    fn sample_notifications() -> NotificationPrefs {
        NotificationPrefs {
            game_reminders: true,
            game_results: false,
            standings_updates: true,
            email_notifications: true,
            reminder_hours: Some(3),
        }
    }

    #[test]
    fn legacy_notification_types_round_trip() {
        let prefs = sample_notifications();
        let legacy = to_legacy_types(&prefs);
        assert_eq!(
            legacy,
            vec!["pregame_reminders", "standings_updates", "email_notifications"]
        );
        assert_eq!(from_legacy_types(&legacy, Some(3)), prefs);
    }

    #[test]
    fn backend_name_splits_into_first_and_last() {
        let data = BackendPrefs {
            name: Some("Sam de la Cruz".to_owned()),
            email: Some("sam@example.edu".to_owned()),
            user_type: Some("Alumni".to_owned()),
            notification_types: Some(vec!["postgame_results".to_owned()]),
            ..Default::default()
        };
        let prefs = normalize_from_backend("u-1", data);
        let account = prefs.account.expect("account");
        assert_eq!(account.first_name, "Sam");
        assert_eq!(account.last_name, "de la Cruz");
        assert_eq!(account.affiliation, "Alumni");
        let notifications = prefs.notifications.expect("notifications");
        assert!(notifications.game_results);
        assert!(!notifications.game_reminders);
    }

    #[test]
    fn typed_backend_shape_wins_over_legacy_fields() {
        let data = BackendPrefs {
            account: Some(AccountInfo {
                first_name: "Ada".into(),
                ..Default::default()
            }),
            notifications: Some(sample_notifications()),
            name: Some("Ignored Name".to_owned()),
            notification_types: Some(vec![]),
            ..Default::default()
        };
        let prefs = normalize_from_backend("u-2", data);
        assert_eq!(prefs.account.expect("account").first_name, "Ada");
        assert_eq!(prefs.notifications, Some(sample_notifications()));
    }

    #[test]
    fn mirror_round_trips_through_disk() {
        let store = temp_store("roundtrip");
        let prefs = UserPreferences {
            user_id: "u-3".into(),
            notifications: Some(sample_notifications()),
            ..Default::default()
        };
        assert!(store.read("u-3").is_none());
        store.write("u-3", &prefs);
        assert_eq!(store.read("u-3"), Some(prefs));
    }

    #[test]
    fn mirror_filenames_are_sanitized() {
        let store = PrefsStore::new("/tmp/x");
        let path = store.path_for("user@example.edu/../etc");
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("prefs-user-example-edu----etc.json")
        );
    }

    #[test]
    fn merge_keeps_unspecified_sections() {
        let current = UserPreferences {
            user_id: "u-4".into(),
            notifications: Some(sample_notifications()),
            account: Some(AccountInfo { first_name: "Ada".into(), ..Default::default() }),
            updated_at: Some("2025-01-01T00:00:00Z".into()),
        };
        let delta = UserPreferences {
            account: Some(AccountInfo { first_name: "Grace".into(), ..Default::default() }),
            ..Default::default()
        };
        let next = merge_preferences(Some(current), delta, "u-4");
        assert_eq!(next.account.expect("account").first_name, "Grace");
        assert_eq!(next.notifications, Some(sample_notifications()));
        assert_eq!(next.updated_at.as_deref(), Some("2025-01-01T00:00:00Z"));
    }

    #[tokio::test]
    async fn backend_get_normalizes_and_mirrors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/preferences/u-5")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "name": "Joan Clarke",
                    "email": "joan@example.edu",
                    "user_type": "Fan",
                    "notification_types": ["pregame_reminders"],
                    "reminderHours": 2
                }"#,
            )
            .create_async()
            .await;

        let store = temp_store("backend-get");
        let client = PrefsClient::with_base_url(server.url(), store.clone());
        let prefs = client.get_preferences("u-5").await.expect("preferences");

        assert_eq!(prefs.account.as_ref().expect("account").first_name, "Joan");
        let notifications = prefs.notifications.as_ref().expect("notifications");
        assert!(notifications.game_reminders);
        assert_eq!(notifications.reminder_hours, Some(2));
        assert_eq!(store.read("u-5"), Some(prefs));
    }

    #[tokio::test]
    async fn backend_miss_falls_back_to_the_mirror() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/preferences/u-6")
            .with_status(404)
            .create_async()
            .await;

        let store = temp_store("backend-miss");
        let cached = UserPreferences { user_id: "u-6".into(), ..Default::default() };
        store.write("u-6", &cached);

        let client = PrefsClient::with_base_url(server.url(), store);
        assert_eq!(client.get_preferences("u-6").await, Some(cached));
    }

    #[tokio::test]
    async fn save_posts_the_legacy_payload_and_keeps_the_mirror_on_rejection() {
        let mut server = mockito::Server::new_async().await;
        let _get = server
            .mock("GET", "/preferences/u-7")
            .with_status(404)
            .create_async()
            .await;
        let post = server
            .mock("POST", "/preferences/u-7")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{
                    "userId": "u-7",
                    "name": "Joan Clarke",
                    "user_type": "Fan",
                    "notification_types": ["pregame_reminders", "standings_updates", "email_notifications"]
                }"#
                .to_owned(),
            ))
            .with_status(500)
            .create_async()
            .await;

        let store = temp_store("save");
        let client = PrefsClient::with_base_url(server.url(), store.clone());
        let delta = UserPreferences {
            notifications: Some(sample_notifications()),
            account: Some(AccountInfo {
                first_name: "Joan".into(),
                last_name: "Clarke".into(),
                email: "joan@example.edu".into(),
                affiliation: "Fan".into(),
            }),
            ..Default::default()
        };

        let saved = client.save_preferences("u-7", delta).await;
        assert_eq!(saved.user_id, "u-7");
        post.assert_async().await;
        // Backend rejected the write; the mirror still has the merged state.
        assert_eq!(store.read("u-7"), Some(saved));
    }

    #[tokio::test]
    async fn password_reset_with_empty_email_is_a_no_op() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/password-reset")
            .expect(0)
            .create_async()
            .await;

        let client = PrefsClient::with_base_url(server.url(), temp_store("reset"));
        client.request_password_reset("  ").await;
        mock.assert_async().await;
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        assert_eq!(encode_path_segment("user@example.edu"), "user%40example.edu");
        assert_eq!(encode_path_segment("plain-id_1"), "plain-id_1");
    }
}
