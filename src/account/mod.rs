/// 회원가입 / 로그인 / 로그아웃
// region:    --- Imports
use crate::auction::model::{Credentials, Registration, User};
use crate::authority::{AuctionAuthority, AuthorityError};
use crate::session::{Session, SessionError, SessionStore};
use thiserror::Error;
use tracing::info;

// endregion: --- Imports

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Authority(#[from] AuthorityError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// 회원가입
pub async fn register(
    authority: &dyn AuctionAuthority,
    registration: &Registration,
) -> Result<User, AuthorityError> {
    info!(
        "{:<12} --> 회원가입: {}, admin={}",
        "Account", registration.username, registration.is_admin
    );
    authority.register(registration).await
}

/// 로그인 후 세션 저장
///
/// 저장에 실패하면 세션은 반환되지 않는다.
pub async fn login(
    authority: &dyn AuctionAuthority,
    store: &SessionStore,
    credentials: &Credentials,
) -> Result<Session, AccountError> {
    info!("{:<12} --> 로그인: {}", "Account", credentials.username);
    let token = authority.login(credentials).await?;
    let session = Session::new(credentials.username.clone(), token.access_token);
    store.save(&session)?;
    Ok(session)
}

/// 로그아웃 (저장된 세션 삭제)
pub fn logout(store: &SessionStore) -> Result<bool, SessionError> {
    info!("{:<12} --> 로그아웃", "Account");
    store.clear()
}
