// region:    --- Imports
use crate::auction::model::{Bid, Plate, PlateDetail};
use crate::authority::{AuctionAuthority, AuthorityError, PlateQuery};
use crate::session::Session;
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// 번호판 상세 재조회
///
/// 변경 후 화면은 이 결과로만 다시 그린다.
pub async fn refresh(
    authority: &dyn AuctionAuthority,
    session: &Session,
    plate_id: i64,
) -> Result<PlateDetail, AuthorityError> {
    info!("{:<12} --> 번호판 상세 조회 id: {}", "Query", plate_id);
    authority.get_plate(session, plate_id).await
}

/// 번호판 목록 조회
pub async fn list_plates(
    authority: &dyn AuctionAuthority,
    session: &Session,
    query: &PlateQuery,
) -> Result<Vec<Plate>, AuthorityError> {
    info!("{:<12} --> 번호판 목록 조회: {:?}", "Query", query);
    authority.list_plates(session, query).await
}

/// 본인 입찰 목록 조회
pub async fn my_bids(
    authority: &dyn AuctionAuthority,
    session: &Session,
) -> Result<Vec<Bid>, AuthorityError> {
    info!("{:<12} --> 본인 입찰 조회 user: {}", "Query", session.username());
    authority.list_my_bids(session).await
}

/// 본인 입찰 단건 조회
pub async fn my_bid(
    authority: &dyn AuctionAuthority,
    session: &Session,
    bid_id: i64,
) -> Result<Bid, AuthorityError> {
    info!("{:<12} --> 입찰 조회 id: {}", "Query", bid_id);
    authority.get_bid(session, bid_id).await
}

// endregion: --- Query Handlers
