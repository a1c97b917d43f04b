//! REST implementation of [`MapDataProvider`]

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::{HttpUtils, create_http_client};
use crate::traits::MapDataProvider;
use crate::types::{
    AtlasEntity, AtlasEntityKind, AtlasEntityPatch, AtlasType, CreatePinRequest, Group,
    NearbyQuery, Pin, PinQuery, StatsSummary,
};

/// Retries applied to idempotent calls.
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Talks to the hosted JSON API under `{base_url}/api`.
pub struct RestProvider {
    client: Client,
    base_url: String,
    api_token: Option<String>,
    max_retries: u32,
}

// Keeps the token out of logs.
impl std::fmt::Debug for RestProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestProvider")
            .field("base_url", &self.base_url)
            .field("has_token", &self.api_token.is_some())
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl RestProvider {
    /// `base_url` is the site origin, with or without a trailing slash.
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Result<Self> {
        Ok(Self::with_client(create_http_client()?, base_url, api_token))
    }

    /// Use a preconfigured client (tests, shared connection pools).
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_token: Option<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_token: api_token.filter(|t| !t.is_empty()),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.url(path))
            .header("Accept", "application/json");
        match self.api_token {
            Some(ref token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Execute and parse a JSON response, mapping non-2xx statuses.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        endpoint: &str,
        method_name: &str,
        retries: u32,
        target: Option<(&str, &str)>,
    ) -> Result<T> {
        let (status, body) =
            HttpUtils::execute_request_with_retry(builder, endpoint, method_name, retries).await?;
        if !(200..300).contains(&status) {
            return Err(HttpUtils::status_error(status, &body, endpoint, target));
        }
        HttpUtils::parse_json(&body, endpoint)
    }

    fn json_body<B: Serialize>(endpoint: &str, body: &B) -> Result<String> {
        serde_json::to_string(body).map_err(|e| ProviderError::SerializationError {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        })
    }

    fn atlas_entity_path(kind: AtlasEntityKind, id: &str) -> String {
        format!(
            "/atlas/{}/entities/{}",
            kind.slug(),
            urlencoding::encode(id)
        )
    }
}

#[async_trait]
impl MapDataProvider for RestProvider {
    fn id(&self) -> &'static str {
        "rest"
    }

    async fn list_pins(&self, query: &PinQuery) -> Result<Vec<Pin>> {
        let builder = self
            .request(Method::GET, "/pins")
            .query(&query.to_query_pairs());
        self.fetch_json(builder, "pins", "GET", self.max_retries, None)
            .await
    }

    async fn create_pin(&self, req: &CreatePinRequest) -> Result<Pin> {
        if !(-90.0..=90.0).contains(&req.lat) || !(-180.0..=180.0).contains(&req.lng) {
            return Err(ProviderError::InvalidParameter {
                endpoint: "pins".to_string(),
                param: "lat/lng".to_string(),
                detail: format!("({}, {}) is not a valid coordinate", req.lat, req.lng),
            });
        }
        let body = Self::json_body("pins", req)?;
        let builder = self
            .request(Method::POST, "/pins")
            .header("Content-Type", "application/json")
            .body(body);
        // not idempotent: never retried
        self.fetch_json(builder, "pins", "POST", 0, None).await
    }

    async fn nearby_pins(&self, query: &NearbyQuery) -> Result<Vec<Pin>> {
        let builder = self.request(Method::GET, "/pins/nearby").query(&[
            ("lat", query.lat.to_string()),
            ("lng", query.lng.to_string()),
            ("radius", query.radius_m.to_string()),
        ]);
        self.fetch_json(builder, "pins/nearby", "GET", self.max_retries, None)
            .await
    }

    async fn list_groups(&self) -> Result<Vec<Group>> {
        let builder = self.request(Method::GET, "/groups");
        self.fetch_json(builder, "groups", "GET", self.max_retries, None)
            .await
    }

    async fn stats_summary(&self) -> Result<StatsSummary> {
        let builder = self.request(Method::GET, "/analytics/stats");
        self.fetch_json(builder, "analytics/stats", "GET", self.max_retries, None)
            .await
    }

    async fn list_atlas_types(&self) -> Result<Vec<AtlasType>> {
        let builder = self.request(Method::GET, "/atlas/types");
        self.fetch_json(builder, "atlas/types", "GET", self.max_retries, None)
            .await
    }

    async fn list_atlas_entities(&self, kind: AtlasEntityKind) -> Result<Vec<AtlasEntity>> {
        let endpoint = format!("atlas/{}", kind.slug());
        let builder = self.request(Method::GET, &format!("/atlas/{}/entities", kind.slug()));
        self.fetch_json(builder, &endpoint, "GET", self.max_retries, None)
            .await
    }

    async fn update_atlas_entity(
        &self,
        kind: AtlasEntityKind,
        id: &str,
        patch: &AtlasEntityPatch,
    ) -> Result<AtlasEntity> {
        let endpoint = format!("atlas/{}", kind.slug());
        if patch.is_empty() {
            return Err(ProviderError::InvalidParameter {
                endpoint,
                param: "patch".to_string(),
                detail: "no fields to update".to_string(),
            });
        }
        let body = Self::json_body(&endpoint, patch)?;
        let builder = self
            .request(Method::PATCH, &Self::atlas_entity_path(kind, id))
            .header("Content-Type", "application/json")
            .body(body);
        self.fetch_json(
            builder,
            &endpoint,
            "PATCH",
            self.max_retries,
            Some((kind.label(), id)),
        )
        .await
    }

    async fn delete_atlas_entity(&self, kind: AtlasEntityKind, id: &str) -> Result<()> {
        let endpoint = format!("atlas/{}", kind.slug());
        let builder = self.request(Method::DELETE, &Self::atlas_entity_path(kind, id));
        let (status, body) =
            HttpUtils::execute_request_with_retry(builder, &endpoint, "DELETE", self.max_retries)
                .await?;
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(HttpUtils::status_error(
                status,
                &body,
                &endpoint,
                Some((kind.label(), id)),
            ))
        }
    }
}
