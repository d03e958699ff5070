/// 경매 권한 서버 인터페이스
/// 인증, 입찰 검증, 마감 처리, 최고가 계산은 모두 권한 서버의 책임이다.
// region:    --- Imports
use crate::auction::model::{
    AccessToken, Bid, BidRequest, Credentials, Plate, PlateDetail, PlateDraft, Registration, User,
};
use crate::session::Session;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

mod http;
pub use self::http::HttpAuthority;

// endregion: --- Imports

// region:    --- Errors

/// 권한 서버 호출 실패
#[derive(Debug, Error)]
pub enum AuthorityError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error("{detail}")]
    NotFound { detail: String },
    #[error("{detail}")]
    Unauthorized { detail: String },
    #[error("malformed response from authority: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Value,
}

impl AuthorityError {
    /// 실패 응답을 오류로 변환
    ///
    /// `detail`이 문자열이면 그대로, 배열이면 각 항목의 `msg`를 이어 붙인다.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|body| flatten_detail(body.detail))
            .unwrap_or_else(|| format!("authority responded with status {status}"));

        match status {
            401 => AuthorityError::Unauthorized { detail },
            404 => AuthorityError::NotFound { detail },
            _ => AuthorityError::Rejected { status, detail },
        }
    }

    /// 권한 서버가 준 사람이 읽을 수 있는 메시지가 있는지
    pub fn detail(&self) -> Option<&str> {
        match self {
            AuthorityError::Rejected { detail, .. }
            | AuthorityError::NotFound { detail }
            | AuthorityError::Unauthorized { detail } => Some(detail),
            AuthorityError::Transport(_) | AuthorityError::Decode(_) => None,
        }
    }
}

fn flatten_detail(detail: Value) -> Option<String> {
    match detail {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                })
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

// endregion: --- Errors

// region:    --- Plate Query

/// 번호판 목록 정렬
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ordering {
    #[serde(rename = "deadline")]
    DeadlineAsc,
    #[serde(rename = "-deadline")]
    DeadlineDesc,
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ordering::DeadlineAsc => f.write_str("deadline"),
            Ordering::DeadlineDesc => f.write_str("-deadline"),
        }
    }
}

/// 번호판 목록 조회 조건
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlateQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<Ordering>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_number_contains: Option<String>,
}

// endregion: --- Plate Query

// region:    --- Authority Trait

/// 경매 권한 서버 트레이트
#[async_trait]
pub trait AuctionAuthority: Send + Sync {
    async fn register(&self, registration: &Registration) -> Result<User, AuthorityError>;

    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, AuthorityError>;

    async fn list_plates(
        &self,
        session: &Session,
        query: &PlateQuery,
    ) -> Result<Vec<Plate>, AuthorityError>;

    async fn get_plate(&self, session: &Session, plate_id: i64)
        -> Result<PlateDetail, AuthorityError>;

    async fn create_plate(&self, session: &Session, draft: &PlateDraft)
        -> Result<Plate, AuthorityError>;

    async fn update_plate(
        &self,
        session: &Session,
        plate_id: i64,
        draft: &PlateDraft,
    ) -> Result<Plate, AuthorityError>;

    async fn delete_plate(&self, session: &Session, plate_id: i64) -> Result<(), AuthorityError>;

    async fn place_bid(&self, session: &Session, request: &BidRequest)
        -> Result<Bid, AuthorityError>;

    async fn list_my_bids(&self, session: &Session) -> Result<Vec<Bid>, AuthorityError>;

    /// 본인 입찰 단건 조회 (타인의 입찰이면 403)
    async fn get_bid(&self, session: &Session, bid_id: i64) -> Result<Bid, AuthorityError>;

    async fn update_bid(
        &self,
        session: &Session,
        bid_id: i64,
        amount: f64,
    ) -> Result<Bid, AuthorityError>;

    async fn delete_bid(&self, session: &Session, bid_id: i64) -> Result<(), AuthorityError>;
}

// endregion: --- Authority Trait

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_verbatim() {
        let err = AuthorityError::from_response(400, r#"{"detail":"Bidding is closed"}"#);
        assert!(matches!(err, AuthorityError::Rejected { status: 400, .. }));
        assert_eq!(err.to_string(), "Bidding is closed");
    }

    #[test]
    fn validation_detail_is_flattened() {
        let body = r#"{"detail":[
            {"loc":["body","amount"],"msg":"Bid amount must be positive","type":"value_error"},
            {"loc":["body","plate_id"],"msg":"field required","type":"value_error.missing"}
        ]}"#;
        let err = AuthorityError::from_response(422, body);
        assert_eq!(
            err.detail(),
            Some("Bid amount must be positive; field required")
        );
    }

    #[test]
    fn status_decides_variant() {
        assert!(matches!(
            AuthorityError::from_response(404, r#"{"detail":"Plate not found"}"#),
            AuthorityError::NotFound { .. }
        ));
        assert!(matches!(
            AuthorityError::from_response(401, r#"{"detail":"Invalid authentication credentials"}"#),
            AuthorityError::Unauthorized { .. }
        ));
    }

    #[test]
    fn missing_detail_falls_back_to_status() {
        let err = AuthorityError::from_response(500, "Internal Server Error");
        assert_eq!(err.to_string(), "authority responded with status 500");
    }

    #[test]
    fn ordering_query_values() {
        let query = PlateQuery {
            ordering: Some(Ordering::DeadlineDesc),
            plate_number_contains: None,
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value, serde_json::json!({"ordering": "-deadline"}));
    }
}

// endregion: --- Tests
