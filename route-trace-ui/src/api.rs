//! gloo-net transport behind [`TraceApi`].
//!
//! Every request carries the stored token in the `token` header. A 401 from
//! any endpoint clears the cookie and signs the session out.

use async_trait::async_trait;
use dioxus::prelude::*;
use gloo_net::http::{Request, RequestBuilder, Response};
use trace_core::api::{
    classify_failure, decode_history, decode_hops, decode_text, ALL_ROUTES_PATH,
    DEFAULT_GATEWAY_PATH, LOGIN_PATH, MAC_TRACE_PATH, ROUTE_TRACE_PATH, TOKEN_HEADER,
    USER_ROUTES_PATH,
};
use trace_core::{
    ApiError, CredentialStore, Hop, LoginRequest, RawHistoryEntry, RouteTraceQuery, Session,
    TraceApi,
};

use crate::config::api_base;
use crate::credentials::CookieCredentials;

#[derive(Clone, Copy)]
pub struct HttpTraceApi {
    session: Signal<Session>,
}

impl HttpTraceApi {
    pub fn new(session: Signal<Session>) -> Self {
        Self { session }
    }

    fn url(path: &str) -> String {
        format!("{}{}", api_base(), path)
    }

    fn authorize(builder: RequestBuilder) -> RequestBuilder {
        match CookieCredentials.load() {
            Some(token) => builder.header(TOKEN_HEADER, &token),
            None => builder,
        }
    }

    async fn read(&self, response: Result<Response, gloo_net::Error>) -> Result<String, ApiError> {
        let response = response.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if response.ok() {
            return Ok(body);
        }

        let error = classify_failure(status, &body);
        if error.is_unauthorized() {
            dioxus_logger::tracing::warn!("Backend rejected credential, signing out");
            CookieCredentials.clear();
            let mut session = self.session;
            session.write().expire();
        }
        Err(error)
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, ApiError> {
        let builder = Request::get(&Self::url(path)).query(query.iter().copied());
        self.read(Self::authorize(builder).send().await).await
    }

    async fn post_empty(&self, path: &str) -> Result<String, ApiError> {
        let builder = Request::post(&Self::url(path));
        self.read(Self::authorize(builder).send().await).await
    }
}

#[async_trait(?Send)]
impl TraceApi for HttpTraceApi {
    async fn login(&self, request: &LoginRequest) -> Result<String, ApiError> {
        let request = Self::authorize(Request::post(&Self::url(LOGIN_PATH)))
            .json(request)
            .map_err(|e| ApiError::Network(format!("Failed to serialize request: {e}")))?;
        let body = self.read(request.send().await).await?;
        Ok(decode_text(&body))
    }

    async fn default_gateway(&self, ip: &str) -> Result<String, ApiError> {
        let body = self.get(DEFAULT_GATEWAY_PATH, &[("ip", ip)]).await?;
        Ok(decode_text(&body))
    }

    async fn mac_trace(&self, ip: &str, gateway: &str) -> Result<Vec<Hop>, ApiError> {
        let body = self
            .get(MAC_TRACE_PATH, &[("ip", ip), ("dg", gateway)])
            .await?;
        decode_hops(&body)
    }

    async fn route_trace(&self, query: &RouteTraceQuery) -> Result<Vec<Hop>, ApiError> {
        let body = self
            .get(ROUTE_TRACE_PATH, &query.to_query_pairs())
            .await?;
        decode_hops(&body)
    }

    async fn user_routes(&self) -> Result<Vec<RawHistoryEntry>, ApiError> {
        let body = self.post_empty(USER_ROUTES_PATH).await?;
        decode_history(&body)
    }

    async fn all_routes(&self) -> Result<Vec<RawHistoryEntry>, ApiError> {
        let body = self.post_empty(ALL_ROUTES_PATH).await?;
        decode_history(&body)
    }
}
