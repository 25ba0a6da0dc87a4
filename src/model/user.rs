use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Per-user preferences nested inside the user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub theme: Theme,
    pub notifications: bool,
    pub preferences: HashMap<String, serde_json::Value>,
}

impl Default for UserSettings {
    fn default() -> Self {
        UserSettings {
            theme: Theme::Light,
            notifications: true,
            preferences: HashMap::new(),
        }
    }
}

/// Partial settings: only the fields present overwrite the stored ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserSettingsPatch {
    pub theme: Option<Theme>,
    pub notifications: Option<bool>,
    pub preferences: Option<HashMap<String, serde_json::Value>>,
}

impl UserSettings {
    /// Field-by-field merge; the stored settings are never replaced
    /// wholesale.
    pub fn merge(&mut self, patch: UserSettingsPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(notifications) = patch.notifications {
            self.notifications = notifications;
        }
        if let Some(preferences) = patch.preferences {
            self.preferences = preferences;
        }
    }
}

/// Account record stored in the shared entity collection. Credentials are
/// only ever persisted as `passwordHash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub last_login: String,
    pub settings: UserSettings,
    pub roles: Vec<String>,
    /// Optimistic-concurrency token, bumped on every replace.
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub settings: Option<UserSettingsPatch>,
}

/// Partial update: fields left as `None` retain their stored values.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub settings: Option<UserSettingsPatch>,
    pub is_active: Option<bool>,
    pub roles: Option<Vec<String>>,
}

impl User {
    /// Assemble a fresh user record. The caller hashes the password; this
    /// constructor never sees the raw value.
    pub fn new(
        email: String,
        password_hash: String,
        settings: Option<UserSettingsPatch>,
        now: &str,
    ) -> Self {
        let mut merged = UserSettings::default();
        if let Some(patch) = settings {
            merged.merge(patch);
        }
        User {
            id: Uuid::new_v4().to_string(),
            kind: EntityKind::User,
            email,
            password_hash,
            is_active: true,
            last_login: now.to_string(),
            settings: merged,
            roles: vec!["user".to_string()],
            version: 1,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    /// Merge a partial update. The raw `password` field of the input is
    /// ignored here; the repository hashes it and passes the hash in
    /// `password_hash`. `id`, `type` and `createdAt` are untouchable.
    pub fn apply_update(
        &mut self,
        update: UpdateUserInput,
        password_hash: Option<String>,
        now: &str,
    ) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(hash) = password_hash {
            self.password_hash = hash;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        if let Some(roles) = update.roles {
            self.roles = roles;
        }
        if let Some(patch) = update.settings {
            self.settings.merge(patch);
        }
        self.updated_at = now.to_string();
    }
}
