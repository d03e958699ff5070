// region:    --- Imports
use super::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Plate

/// 번호판 모델 (목록 조회 응답)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    pub id: i64,
    pub plate_number: String,
    pub description: String,
    #[serde(with = "timestamp")]
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub highest_bid: Option<f64>,
    pub is_active: bool,
}

/// 번호판 상세 모델 (입찰 이력 포함)
///
/// `bids`는 권한 서버가 돌려준 순서(입력 순서 = 시간 순서)를 그대로 유지한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateDetail {
    #[serde(flatten)]
    pub plate: Plate,
    #[serde(default)]
    pub bids: Vec<Bid>,
}

impl PlateDetail {
    /// 특정 입찰을 제외한 최고 입찰가
    pub fn highest_bid_excluding(&self, bid_id: i64) -> Option<f64> {
        self.bids
            .iter()
            .filter(|bid| bid.id != bid_id)
            .map(|bid| bid.amount)
            .fold(None, |acc, amount| match acc {
                Some(highest) if highest >= amount => Some(highest),
                _ => Some(amount),
            })
    }
}

// endregion: --- Plate

// region:    --- Bid

/// 입찰 모델
///
/// 상세 조회에서는 `user_id`가 포함되고, 본인 입찰 확인 응답에서는 빠진다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub id: i64,
    pub amount: f64,
    pub plate_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// 입찰 제출 요청
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BidRequest {
    pub plate_id: i64,
    pub amount: f64,
}

/// 입찰 금액 변경 요청
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BidUpdate {
    pub amount: f64,
}

// endregion: --- Bid

// region:    --- User

/// 사용자 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "is_staff", alias = "is_admin", default)]
    pub is_admin: bool,
}

/// 회원가입 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "is_staff", alias = "is_admin", default)]
    pub is_admin: bool,
}

/// 로그인 자격 증명
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// 로그인 응답 토큰
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

// endregion: --- User

// region:    --- Plate Number

const REGIONS: [&str; 14] = [
    "01", "10", "20", "25", "30", "40", "50", "60", "70", "75", "80", "85", "90", "95",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Incorrect auto plate format. Format: R L NNN LL (R - region, L - letter, N - number)")]
pub struct PlateNumberError;

/// 번호판 번호 (`R L NNN LL` 형식)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlateNumber(String);

impl PlateNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// I는 숫자 1과 혼동되므로 사용하지 않는다.
fn is_plate_letter(b: u8) -> bool {
    b.is_ascii_uppercase() && b != b'I'
}

impl FromStr for PlateNumber {
    type Err = PlateNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 8 || !s.is_ascii() {
            return Err(PlateNumberError);
        }
        let valid = REGIONS.contains(&&s[0..2])
            && is_plate_letter(bytes[2])
            && bytes[3..6].iter().all(u8::is_ascii_digit)
            && bytes[6..8].iter().copied().all(is_plate_letter);
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(PlateNumberError)
        }
    }
}

impl TryFrom<String> for PlateNumber {
    type Error = PlateNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlateNumber> for String {
    fn from(value: PlateNumber) -> Self {
        value.0
    }
}

impl fmt::Display for PlateNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// endregion: --- Plate Number

// region:    --- Plate Draft

#[derive(Debug, Error)]
pub enum DraftError {
    #[error(transparent)]
    PlateNumber(#[from] PlateNumberError),
    #[error("Deadline must be in the future")]
    DeadlinePassed,
}

/// 관리자용 번호판 등록/수정 요청
///
/// 서버는 마감 시간을 naive UTC 현재 시각과 비교하므로 오프셋 없이 보낸다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateDraft {
    pub plate_number: PlateNumber,
    pub description: String,
    #[serde(
        serialize_with = "timestamp::serialize_naive",
        deserialize_with = "timestamp::deserialize"
    )]
    pub deadline: DateTime<Utc>,
}

impl PlateDraft {
    /// 번호판 형식과 마감 시간을 검증하여 요청 생성
    pub fn new(
        plate_number: &str,
        description: &str,
        deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, DraftError> {
        let plate_number = plate_number.trim().to_ascii_uppercase().parse::<PlateNumber>()?;
        if deadline <= now {
            return Err(DraftError::DeadlinePassed);
        }
        Ok(Self {
            plate_number,
            description: description.to_string(),
            deadline,
        })
    }
}

// endregion: --- Plate Draft

// region:    --- Tests


// endregion: --- Tests
