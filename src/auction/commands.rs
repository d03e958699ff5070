/// 관리자 번호판 관리 커맨드
/// 권한(관리자 여부) 판정은 권한 서버가 하며, 여기서는 초안 검증 후 전달만 한다.
// region:    --- Imports
use super::model::{Plate, PlateDraft};
use crate::authority::{AuctionAuthority, AuthorityError};
use crate::session::Session;
use tracing::info;

// endregion: --- Imports

// region:    --- Commands

/// 번호판 등록
pub async fn create_plate(
    authority: &dyn AuctionAuthority,
    session: &Session,
    draft: &PlateDraft,
) -> Result<Plate, AuthorityError> {
    info!("{:<12} --> 번호판 등록: {}", "Admin", draft.plate_number);
    authority.create_plate(session, draft).await
}

/// 번호판 수정
pub async fn update_plate(
    authority: &dyn AuctionAuthority,
    session: &Session,
    plate_id: i64,
    draft: &PlateDraft,
) -> Result<Plate, AuthorityError> {
    info!(
        "{:<12} --> 번호판 수정 id: {}, number: {}",
        "Admin", plate_id, draft.plate_number
    );
    authority.update_plate(session, plate_id, draft).await
}

/// 번호판 삭제 (입찰 이력도 함께 삭제됨)
pub async fn delete_plate(
    authority: &dyn AuctionAuthority,
    session: &Session,
    plate_id: i64,
) -> Result<(), AuthorityError> {
    info!("{:<12} --> 번호판 삭제 id: {}", "Admin", plate_id);
    authority.delete_plate(session, plate_id).await
}

// endregion: --- Commands
