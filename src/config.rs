//! 클라이언트 설정
//!
//! 명령행 플래그가 우선이고, 없으면 환경 변수, 그다음 기본값을 쓴다.
//! - `PLATE_AUCTION_URL`: 권한 서버 주소 (기본 `http://localhost:8000`)
//! - `PLATE_AUCTION_SESSION`: 세션 파일 경로 (기본 `$HOME/.plate-auction/session.json`)
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const URL_ENV: &str = "PLATE_AUCTION_URL";
pub const SESSION_ENV: &str = "PLATE_AUCTION_SESSION";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub session_path: PathBuf,
}

impl ClientConfig {
    pub fn new(base_url: Option<String>, session_path: Option<PathBuf>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            session_path: session_path.unwrap_or_else(default_session_path),
        }
    }
}

fn default_session_path() -> PathBuf {
    let base = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(".plate-auction").join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_win() {
        let config = ClientConfig::new(
            Some("http://auction.test:9000".to_string()),
            Some(PathBuf::from("/tmp/s.json")),
        );
        assert_eq!(config.base_url, "http://auction.test:9000");
        assert_eq!(config.session_path, PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::new(None, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.session_path.ends_with(".plate-auction/session.json"));
    }
}
