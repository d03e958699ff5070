//! 명령 처리 (사용자 상호작용 경계)
//!
//! 모든 실패는 여기서 사용자에게 보여줄 문장으로 바뀌며 더 위로 전파되지 않는다.
// region:    --- Imports
use crate::account;
use crate::auction::commands as plate_commands;
use crate::auction::model::{Credentials, PlateDetail, PlateDraft, Registration};
use crate::auction::timestamp;
use crate::authority::{AuctionAuthority, AuthorityError, PlateQuery};
use crate::bidding::commands::{raise_bid, submit, withdraw_bid, SubmissionError};
use crate::bidding::contract::{can_bid, can_withdraw, validate_amount, validate_raise, Rejected};
use crate::query::handlers::{list_plates, my_bid, my_bids, refresh};
use crate::session::{Session, SessionStore};
use crate::view;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Context

/// 명령 처리 결과. 성공/실패 모두 사용자에게 보여줄 문장이다.
pub type Reply = Result<String, String>;

/// 한 번의 상호작용에 필요한 협력자
pub struct Context<'a> {
    pub authority: &'a dyn AuctionAuthority,
    pub store: &'a SessionStore,
    pub now: DateTime<Utc>,
}

impl<'a> Context<'a> {
    pub fn new(authority: &'a dyn AuctionAuthority, store: &'a SessionStore) -> Self {
        Self {
            authority,
            store,
            now: Utc::now(),
        }
    }

    fn session(&self) -> Result<Session, String> {
        match self.store.load() {
            Ok(Some(session)) => Ok(session),
            Ok(None) => Err("Not logged in. Run `plate-auction login` first.".to_string()),
            Err(e) => {
                warn!("{:<12} --> 세션 로드 실패: {}", "Handler", e);
                Err(format!("Could not read session: {e}"))
            }
        }
    }
}

fn log_in_again(detail: &str) -> String {
    format!("{detail}. Please log in again.")
}

/// 권한 서버 오류를 사용자 문장으로 변환
fn describe(err: AuthorityError, fallback: &str) -> String {
    match err {
        AuthorityError::Unauthorized { detail } => log_in_again(&detail),
        AuthorityError::Rejected { detail, .. } | AuthorityError::NotFound { detail } => detail,
        AuthorityError::Transport(e) => {
            warn!("{:<12} --> 네트워크 오류: {}", "Handler", e);
            fallback.to_string()
        }
        AuthorityError::Decode(e) => {
            warn!("{:<12} --> 응답 해석 실패: {}", "Handler", e);
            fallback.to_string()
        }
    }
}

/// 입찰 제출/변경 실패를 사용자 문장으로 변환
fn describe_submission(err: SubmissionError) -> String {
    match err {
        SubmissionError::Unauthorized { detail } => log_in_again(&detail),
        other => other.to_string(),
    }
}

/// 번호판 상세 조회. 없는 번호판은 오류가 아닌 "not found" 상태로 표시한다.
async fn load_plate(ctx: &Context<'_>, session: &Session, plate_id: i64) -> Result<PlateDetail, String> {
    match refresh(ctx.authority, session, plate_id).await {
        Ok(detail) => Ok(detail),
        Err(AuthorityError::NotFound { .. }) => Err(view::NOT_FOUND.to_string()),
        Err(e) => Err(describe(e, "Error fetching plate")),
    }
}

// endregion: --- Context

// region:    --- Account Handlers

/// 회원가입
pub async fn handle_register(ctx: &Context<'_>, registration: Registration) -> Reply {
    info!("{:<12} --> 회원가입 요청: {}", "Handler", registration.username);
    match account::register(ctx.authority, &registration).await {
        Ok(user) => Ok(format!(
            "Registered {}{}. You can now log in.",
            user.username,
            if user.is_admin { " (admin)" } else { "" }
        )),
        Err(e) => Err(describe(e, "Registration failed")),
    }
}

/// 로그인
pub async fn handle_login(ctx: &Context<'_>, credentials: Credentials) -> Reply {
    info!("{:<12} --> 로그인 요청: {}", "Handler", credentials.username);
    match account::login(ctx.authority, ctx.store, &credentials).await {
        Ok(session) => Ok(format!("Logged in as {}", session.username())),
        Err(account::AccountError::Authority(AuthorityError::Unauthorized { detail })) => {
            Err(detail)
        }
        Err(account::AccountError::Authority(e)) => Err(describe(e, "Login failed")),
        Err(account::AccountError::Session(e)) => Err(format!("Could not save session: {e}")),
    }
}

/// 로그아웃
pub async fn handle_logout(ctx: &Context<'_>) -> Reply {
    match account::logout(ctx.store) {
        Ok(true) => Ok("Logged out".to_string()),
        Ok(false) => Ok("Not logged in".to_string()),
        Err(e) => Err(format!("Could not clear session: {e}")),
    }
}

// endregion: --- Account Handlers

// region:    --- Query Handlers

/// 번호판 목록
pub async fn handle_list_plates(ctx: &Context<'_>, query: PlateQuery) -> Reply {
    let session = ctx.session()?;
    list_plates(ctx.authority, &session, &query)
        .await
        .map(|plates| view::plate_list(&plates, ctx.now))
        .map_err(|e| describe(e, "Error fetching plates"))
}

/// 번호판 상세 (입찰 이력 포함)
pub async fn handle_show_plate(ctx: &Context<'_>, plate_id: i64) -> Reply {
    let session = ctx.session()?;
    let detail = load_plate(ctx, &session, plate_id).await?;
    Ok(view::plate_detail(&detail, ctx.now))
}

/// 본인 입찰 목록
pub async fn handle_my_bids(ctx: &Context<'_>) -> Reply {
    let session = ctx.session()?;
    my_bids(ctx.authority, &session)
        .await
        .map(|bids| view::my_bids(&bids))
        .map_err(|e| describe(e, "Error fetching bids"))
}

// endregion: --- Query Handlers

// region:    --- Bid Handlers

/// 입찰 요청 처리
///
/// 최신 상태 조회 → 입찰 가능 여부 → 금액 검증 → 제출 → 재조회 결과 표시
pub async fn handle_bid(ctx: &Context<'_>, plate_id: i64, raw_amount: &str) -> Reply {
    info!(
        "{:<12} --> 입찰 요청 처리 시작: plate={}, amount={}",
        "Handler", plate_id, raw_amount
    );
    let session = ctx.session()?;
    let detail = load_plate(ctx, &session, plate_id).await?;

    if !can_bid(&detail.plate, ctx.now) {
        return Err(Rejected::Closed.to_string());
    }
    let accepted = validate_amount(raw_amount, &detail.plate).map_err(|e| e.to_string())?;

    let updated = submit(ctx.authority, &session, accepted.request)
        .await
        .map_err(describe_submission)?;

    let mut out = format!("Bid of {} placed.\n\n", view::money(updated.receipt.amount));
    match updated.plate {
        Some(detail) => out.push_str(&view::plate_detail(&detail, ctx.now)),
        None => out.push_str(&format!(
            "Could not refresh the plate; run `plate-auction show {plate_id}` to see the latest state."
        )),
    }
    Ok(out)
}

/// 본인 입찰이 속한 번호판 확인
async fn own_bid_plate(ctx: &Context<'_>, session: &Session, bid_id: i64) -> Result<i64, String> {
    my_bid(ctx.authority, session, bid_id)
        .await
        .map(|bid| bid.plate_id)
        .map_err(|e| describe(e, "Error fetching bid"))
}

/// 입찰 금액 변경
pub async fn handle_raise_bid(ctx: &Context<'_>, bid_id: i64, raw_amount: &str) -> Reply {
    info!(
        "{:<12} --> 입찰 금액 변경 요청: bid={}, amount={}",
        "Handler", bid_id, raw_amount
    );
    let session = ctx.session()?;
    let plate_id = own_bid_plate(ctx, &session, bid_id).await?;
    let detail = load_plate(ctx, &session, plate_id).await?;

    if !can_withdraw(&detail.plate, ctx.now) {
        return Err("Bidding period has ended".to_string());
    }
    let amount = validate_raise(raw_amount, &detail, bid_id).map_err(|e| e.to_string())?;

    let bid = raise_bid(ctx.authority, &session, bid_id, amount)
        .await
        .map_err(describe_submission)?;

    let mut out = format!("Bid #{} updated to {}.\n\n", bid.id, view::money(bid.amount));
    match refresh(ctx.authority, &session, plate_id).await {
        Ok(detail) => out.push_str(&view::plate_detail(&detail, ctx.now)),
        Err(e) => warn!("{:<12} --> 변경 후 재조회 실패: {}", "Handler", e),
    }
    Ok(out)
}

/// 입찰 취소
pub async fn handle_withdraw_bid(ctx: &Context<'_>, bid_id: i64) -> Reply {
    info!("{:<12} --> 입찰 취소 요청: bid={}", "Handler", bid_id);
    let session = ctx.session()?;
    let plate_id = own_bid_plate(ctx, &session, bid_id).await?;
    let detail = load_plate(ctx, &session, plate_id).await?;

    if !can_withdraw(&detail.plate, ctx.now) {
        return Err("Bidding period has ended".to_string());
    }
    withdraw_bid(ctx.authority, &session, bid_id)
        .await
        .map_err(|e| describe(e, "Error withdrawing bid"))?;
    Ok(format!("Bid #{bid_id} withdrawn"))
}

// endregion: --- Bid Handlers

// region:    --- Admin Handlers

/// 관리자 번호판 입력값
#[derive(Debug, Clone)]
pub struct PlateForm {
    pub plate_number: String,
    pub description: String,
    pub deadline: String,
}

impl PlateForm {
    fn draft(&self, now: DateTime<Utc>) -> Result<PlateDraft, String> {
        let deadline = timestamp::parse(self.deadline.trim()).ok_or_else(|| {
            format!(
                "Invalid deadline '{}': expected e.g. 2026-12-31T18:00:00",
                self.deadline
            )
        })?;
        PlateDraft::new(&self.plate_number, &self.description, deadline, now)
            .map_err(|e| e.to_string())
    }
}

/// 번호판 등록
pub async fn handle_create_plate(ctx: &Context<'_>, form: PlateForm) -> Reply {
    let session = ctx.session()?;
    let draft = form.draft(ctx.now)?;
    let plate = plate_commands::create_plate(ctx.authority, &session, &draft)
        .await
        .map_err(|e| describe(e, "Error creating plate"))?;
    Ok(format!("Created plate #{} {}", plate.id, plate.plate_number))
}

/// 번호판 수정
pub async fn handle_update_plate(ctx: &Context<'_>, plate_id: i64, form: PlateForm) -> Reply {
    let session = ctx.session()?;
    let draft = form.draft(ctx.now)?;
    let plate = plate_commands::update_plate(ctx.authority, &session, plate_id, &draft)
        .await
        .map_err(|e| describe(e, "Error updating plate"))?;
    Ok(format!("Updated plate #{} {}", plate.id, plate.plate_number))
}

/// 번호판 삭제
pub async fn handle_delete_plate(ctx: &Context<'_>, plate_id: i64) -> Reply {
    let session = ctx.session()?;
    plate_commands::delete_plate(ctx.authority, &session, plate_id)
        .await
        .map_err(|e| describe(e, "Error deleting plate"))?;
    Ok(format!("Deleted plate #{plate_id}"))
}

// endregion: --- Admin Handlers
