/// 회원가입
pub const REGISTER: &str = "/register";

/// 로그인 (OAuth2 password form)
pub const LOGIN: &str = "/login";

/// 번호판 목록 조회 / 등록
pub const PLATES: &str = "/plates";

/// 입찰 제출 / 본인 입찰 목록 조회
pub const BIDS: &str = "/bids";

/// 번호판 상세 조회 / 수정 / 삭제
pub fn plate(plate_id: i64) -> String {
    format!("{PLATES}/{plate_id}")
}

/// 입찰 단건 조회 / 수정 / 취소
pub fn bid(bid_id: i64) -> String {
    format!("{BIDS}/{bid_id}")
}
