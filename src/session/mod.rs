/// 세션 컨텍스트와 로컬 저장소
/// 토큰은 전역 상태가 아니라 `Session` 값으로 각 요청에 명시적으로 전달된다.
// region:    --- Imports
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

// endregion: --- Imports

// region:    --- Session

/// 인증된 세션 (사용자명 + Bearer 토큰)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    username: String,
    token: String,
}

impl Session {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

// 토큰이 로그에 찍히지 않도록 직접 구현
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("token", &"***")
            .finish()
    }
}

// endregion: --- Session

// region:    --- Session Store

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("session file {path} is corrupted: {source}")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 세션 파일 저장소
///
/// 로그인 시 기록되고 로그아웃 시 삭제된다. 쓰기는 사용자 명령으로만 일어난다.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// 저장된 세션 로드 (없으면 None)
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{:<12} --> 저장된 세션 없음: {}", "Session", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e)),
        };
        let session = serde_json::from_str(&raw).map_err(|source| SessionError::Corrupted {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(session))
    }

    /// 세션 저장
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let raw = serde_json::to_string_pretty(session).map_err(|source| {
            SessionError::Corrupted {
                path: self.path.clone(),
                source,
            }
        })?;
        self.write_private(raw.as_bytes())
            .map_err(|e| self.io_error(e))?;
        info!(
            "{:<12} --> 세션 저장: user={}, path={}",
            "Session",
            session.username(),
            self.path.display()
        );
        Ok(())
    }

    // Bearer 토큰이 담기므로 소유자만 읽을 수 있어야 한다 (0600)
    fn write_private(&self, contents: &[u8]) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(&self.path)?;
        // 이미 있는 파일에는 생성 모드가 적용되지 않는다
        #[cfg(unix)]
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        file.write_all(contents)?;
        file.sync_all()
    }

    /// 세션 삭제 (로그아웃). 삭제된 세션이 있었으면 true
    pub fn clear(&self) -> Result<bool, SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("{:<12} --> 세션 삭제: {}", "Session", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

// endregion: --- Session Store

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scratch_store() -> SessionStore {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "plate-auction-session-test-{}-{}",
            std::process::id(),
            n
        ));
        SessionStore::new(dir.join("session.json"))
    }

    #[test]
    fn save_load_clear() {
        let store = scratch_store();
        assert_eq!(store.load().unwrap(), None);

        let session = Session::new("kim", "tok-123");
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));

        assert!(store.clear().unwrap());
        assert_eq!(store.load().unwrap(), None);
        assert!(!store.clear().unwrap());

        let _ = std::fs::remove_dir_all(store.path().parent().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let store = scratch_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{}").unwrap();
        std::fs::set_permissions(store.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        store.save(&Session::new("kim", "tok-123")).unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap(), Some(Session::new("kim", "tok-123")));

        let _ = std::fs::remove_dir_all(store.path().parent().unwrap());
    }

    #[test]
    fn corrupted_file_is_reported() {
        let store = scratch_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load(), Err(SessionError::Corrupted { .. })));
        let _ = std::fs::remove_dir_all(store.path().parent().unwrap());
    }

    #[test]
    fn debug_hides_token() {
        let session = Session::new("kim", "super-secret");
        let printed = format!("{:?}", session);
        assert!(printed.contains("kim"));
        assert!(!printed.contains("super-secret"));
    }
}

// endregion: --- Tests
