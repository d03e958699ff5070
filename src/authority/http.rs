// region:    --- Imports
use super::{AuctionAuthority, AuthorityError, PlateQuery};
use crate::auction::model::{
    AccessToken, Bid, BidRequest, BidUpdate, Credentials, Plate, PlateDetail, PlateDraft,
    Registration, User,
};
use crate::query::queries;
use crate::session::Session;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

// endregion: --- Imports

// region:    --- Http Authority

/// reqwest 기반 권한 서버 클라이언트
#[derive(Debug, Clone)]
pub struct HttpAuthority {
    client: Client,
    base_url: String,
}

impl HttpAuthority {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 요청 전송 후 상태 코드 확인
    async fn send(&self, request: RequestBuilder) -> Result<Response, AuthorityError> {
        let response = request.send().await?;
        let status = response.status();
        debug!("{:<12} --> 응답 상태: {}", "Authority", status);
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await?;
        let err = AuthorityError::from_response(status.as_u16(), &body);
        warn!("{:<12} --> 요청 거절: status={}, {}", "Authority", status, err);
        Err(err)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AuthorityError> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| AuthorityError::Decode(e.to_string()))
    }

    fn authorized(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        request.bearer_auth(session.token())
    }
}

#[async_trait]
impl AuctionAuthority for HttpAuthority {
    async fn register(&self, registration: &Registration) -> Result<User, AuthorityError> {
        debug!("{:<12} --> 회원가입 요청: {}", "Authority", registration.username);
        let request = self
            .client
            .post(self.url(queries::REGISTER))
            .json(registration);
        self.fetch(request).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, AuthorityError> {
        debug!("{:<12} --> 로그인 요청: {}", "Authority", credentials.username);
        let request = self.client.post(self.url(queries::LOGIN)).form(&[
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ]);
        self.fetch(request).await
    }

    async fn list_plates(
        &self,
        session: &Session,
        query: &PlateQuery,
    ) -> Result<Vec<Plate>, AuthorityError> {
        debug!("{:<12} --> 번호판 목록 조회: {:?}", "Authority", query);
        let request = self.client.get(self.url(queries::PLATES)).query(query);
        self.fetch(self.authorized(request, session)).await
    }

    async fn get_plate(
        &self,
        session: &Session,
        plate_id: i64,
    ) -> Result<PlateDetail, AuthorityError> {
        debug!("{:<12} --> 번호판 상세 조회 id: {}", "Authority", plate_id);
        let request = self.client.get(self.url(&queries::plate(plate_id)));
        self.fetch(self.authorized(request, session)).await
    }

    async fn create_plate(
        &self,
        session: &Session,
        draft: &PlateDraft,
    ) -> Result<Plate, AuthorityError> {
        debug!("{:<12} --> 번호판 등록: {}", "Authority", draft.plate_number);
        let request = self.client.post(self.url(queries::PLATES)).json(draft);
        self.fetch(self.authorized(request, session)).await
    }

    async fn update_plate(
        &self,
        session: &Session,
        plate_id: i64,
        draft: &PlateDraft,
    ) -> Result<Plate, AuthorityError> {
        debug!("{:<12} --> 번호판 수정 id: {}", "Authority", plate_id);
        let request = self.client.put(self.url(&queries::plate(plate_id))).json(draft);
        self.fetch(self.authorized(request, session)).await
    }

    async fn delete_plate(&self, session: &Session, plate_id: i64) -> Result<(), AuthorityError> {
        debug!("{:<12} --> 번호판 삭제 id: {}", "Authority", plate_id);
        let request = self.client.delete(self.url(&queries::plate(plate_id)));
        self.send(self.authorized(request, session)).await?;
        Ok(())
    }

    async fn place_bid(&self, session: &Session, request: &BidRequest) -> Result<Bid, AuthorityError> {
        debug!("{:<12} --> 입찰 제출: {:?}", "Authority", request);
        let builder = self.client.post(self.url(queries::BIDS)).json(request);
        self.fetch(self.authorized(builder, session)).await
    }

    async fn list_my_bids(&self, session: &Session) -> Result<Vec<Bid>, AuthorityError> {
        debug!("{:<12} --> 본인 입찰 목록 조회", "Authority");
        let request = self.client.get(self.url(queries::BIDS));
        self.fetch(self.authorized(request, session)).await
    }

    async fn get_bid(&self, session: &Session, bid_id: i64) -> Result<Bid, AuthorityError> {
        debug!("{:<12} --> 입찰 조회 id: {}", "Authority", bid_id);
        let request = self.client.get(self.url(&queries::bid(bid_id)));
        self.fetch(self.authorized(request, session)).await
    }

    async fn update_bid(
        &self,
        session: &Session,
        bid_id: i64,
        amount: f64,
    ) -> Result<Bid, AuthorityError> {
        debug!("{:<12} --> 입찰 수정 id: {}, amount: {}", "Authority", bid_id, amount);
        let request = self
            .client
            .put(self.url(&queries::bid(bid_id)))
            .json(&BidUpdate { amount });
        self.fetch(self.authorized(request, session)).await
    }

    async fn delete_bid(&self, session: &Session, bid_id: i64) -> Result<(), AuthorityError> {
        debug!("{:<12} --> 입찰 취소 id: {}", "Authority", bid_id);
        let request = self.client.delete(self.url(&queries::bid(bid_id)));
        self.send(self.authorized(request, session)).await?;
        Ok(())
    }
}

// endregion: --- Http Authority

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let authority = HttpAuthority::new("http://localhost:8000/");
        assert_eq!(authority.base_url(), "http://localhost:8000");
        assert_eq!(
            authority.url(&queries::plate(3)),
            "http://localhost:8000/plates/3"
        );
    }
}
