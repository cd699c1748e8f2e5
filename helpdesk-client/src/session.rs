//! Session context and on-disk persistence
//!
//! A session is created by login/register and torn down by logout. The
//! store keeps it as JSON at `{data_dir}/auth/session.json` so the console
//! stays logged in between runs.

use crate::error::ClientResult;
use serde::{Deserialize, Serialize};
use shared::client::{AuthResponse, UserInfo};
use std::path::{Path, PathBuf};

/// 登录会话
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserInfo,
    /// Login time, UTC milliseconds
    pub logged_in_at: i64,
}

impl Session {
    pub fn user_id(&self) -> Option<i64> {
        self.user.id
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }
}

impl From<AuthResponse> for Session {
    fn from(auth: AuthResponse) -> Self {
        Self {
            token: auth.token,
            user: auth.user,
            logged_in_at: shared::util::now_millis(),
        }
    }
}

/// 会话文件存储
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// 文件路径: {data_dir}/auth/session.json
    file_path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file_path: data_dir.join("auth/session.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// 从文件加载; no file means no session
    pub fn load(&self) -> ClientResult<Option<Session>> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// 保存到文件
    pub fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }

    /// 删除会话文件
    pub fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Session {
        Session {
            token: "tok-1".into(),
            user: UserInfo {
                id: Some(7),
                name: "Ana Gómez".into(),
                email: "ana@x.co".into(),
            },
            logged_in_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(store.load().unwrap().is_none());

        store.save(&sample()).unwrap();
        assert!(store.path().ends_with("auth/session.json"));
        assert_eq!(store.load().unwrap(), Some(sample()));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        std::fs::create_dir_all(dir.path().join("auth")).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_err());
    }

    #[test]
    fn test_from_auth_response() {
        let session = Session::from(AuthResponse {
            token: "t".into(),
            user: UserInfo {
                id: None,
                name: "N".into(),
                email: "n@x.co".into(),
            },
        });
        assert_eq!(session.user_id(), None);
        assert_eq!(session.email(), "n@x.co");
        assert!(session.logged_in_at > 0);
    }
}
