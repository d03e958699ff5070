/// 입찰 관련 커맨드 처리
/// 1. 입찰 제출
/// 2. 입찰 금액 변경
/// 3. 입찰 취소
// region:    --- Imports
use super::contract::Rejected;
use crate::auction::model::{Bid, BidRequest, PlateDetail};
use crate::authority::{AuctionAuthority, AuthorityError};
use crate::query::handlers::refresh;
use crate::session::Session;
use thiserror::Error;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Errors

/// 입찰 제출 실패
///
/// 어느 경우든 해당 시도에서 끝나며 자동 재시도는 없다.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// 권한 서버(또는 사전 검증)가 거절함. 사유는 그대로 사용자에게 보여준다.
    #[error("{reason}")]
    Rejected { reason: String },
    /// 토큰이 만료되었거나 잘못됨. 다시 로그인해야 한다.
    #[error("{detail}")]
    Unauthorized { detail: String },
    /// 네트워크 오류 또는 해석할 수 없는 응답
    #[error("Error placing bid")]
    Transport { cause: String },
}

impl From<AuthorityError> for SubmissionError {
    fn from(err: AuthorityError) -> Self {
        match err {
            AuthorityError::Rejected { detail, .. } | AuthorityError::NotFound { detail } => {
                SubmissionError::Rejected { reason: detail }
            }
            AuthorityError::Unauthorized { detail } => SubmissionError::Unauthorized { detail },
            AuthorityError::Transport(e) => SubmissionError::Transport {
                cause: e.to_string(),
            },
            AuthorityError::Decode(cause) => SubmissionError::Transport { cause },
        }
    }
}

impl From<Rejected> for SubmissionError {
    fn from(err: Rejected) -> Self {
        SubmissionError::Rejected {
            reason: err.to_string(),
        }
    }
}

// endregion: --- Errors

// region:    --- Commands

/// 입찰 제출 결과
///
/// `plate`는 확인 직후 재조회한 권한 서버의 상태이며, 재조회에 실패하면 None이다.
#[derive(Debug, Clone)]
pub struct UpdatedPlate {
    pub receipt: Bid,
    pub plate: Option<PlateDetail>,
}

/// 1. 입찰 제출
pub async fn submit(
    authority: &dyn AuctionAuthority,
    session: &Session,
    request: BidRequest,
) -> Result<UpdatedPlate, SubmissionError> {
    info!("{:<12} --> 입찰 제출 시작: {:?}", "Command", request);

    let receipt = authority.place_bid(session, &request).await.map_err(|e| {
        warn!("{:<12} --> 입찰 실패: {}", "Command", e);
        SubmissionError::from(e)
    })?;
    info!(
        "{:<12} --> 입찰 확인: bid_id={}, amount={}",
        "Command", receipt.id, receipt.amount
    );

    // 확인을 받았으므로 화면은 재조회 결과로만 갱신한다
    let plate = match refresh(authority, session, request.plate_id).await {
        Ok(plate) => Some(plate),
        Err(e) => {
            warn!("{:<12} --> 입찰 후 재조회 실패: {}", "Command", e);
            None
        }
    };

    Ok(UpdatedPlate { receipt, plate })
}

/// 2. 입찰 금액 변경
pub async fn raise_bid(
    authority: &dyn AuctionAuthority,
    session: &Session,
    bid_id: i64,
    amount: f64,
) -> Result<Bid, SubmissionError> {
    info!(
        "{:<12} --> 입찰 금액 변경 id: {}, amount: {}",
        "Command", bid_id, amount
    );
    Ok(authority.update_bid(session, bid_id, amount).await?)
}

/// 3. 입찰 취소
pub async fn withdraw_bid(
    authority: &dyn AuctionAuthority,
    session: &Session,
    bid_id: i64,
) -> Result<(), AuthorityError> {
    info!("{:<12} --> 입찰 취소 id: {}", "Command", bid_id);
    authority.delete_bid(session, bid_id).await
}

// endregion: --- Commands

// region:    --- Tests


// endregion: --- Tests
