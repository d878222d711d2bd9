use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::{
    AnalysisRequest, CompareRequest, ComparisonResponse, ProgressResponse,
    ShareableMomentsResponse, StrengthsResponse,
};

/// Every current call site asks the service for the same window.
pub const MATCH_COUNT: u32 = 50;

/// Transport failures and non-2xx replies stay distinguishable here; the
/// views collapse them into one user-facing message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to analytics service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("analytics service returned {status}: {body}")]
    Server { status: StatusCode, body: String },
}

pub struct AnalyticsClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalyticsClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        AnalyticsClient { http, base_url }
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<no response>"));
            return Err(ApiError::Server { status, body });
        }
        Result::Ok(response.json::<T>().await?)
    }

    pub async fn progress(
        &self,
        puuid: &str,
        match_count: u32,
    ) -> Result<ProgressResponse, ApiError> {
        self.post(
            "/api/analysis/progress",
            &AnalysisRequest {
                puuid: puuid.to_string(),
                match_count,
            },
        )
        .await
    }

    pub async fn strengths_weaknesses(
        &self,
        puuid: &str,
        match_count: u32,
    ) -> Result<StrengthsResponse, ApiError> {
        self.post(
            "/api/analysis/strengths-weaknesses",
            &AnalysisRequest {
                puuid: puuid.to_string(),
                match_count,
            },
        )
        .await
    }

    pub async fn compare(
        &self,
        puuid1: &str,
        puuid2: &str,
        match_count: u32,
    ) -> Result<ComparisonResponse, ApiError> {
        self.post(
            "/api/social/compare",
            &CompareRequest {
                puuid1: puuid1.to_string(),
                puuid2: puuid2.to_string(),
                match_count,
            },
        )
        .await
    }

    pub async fn shareable_moments(
        &self,
        puuid: &str,
        match_count: u32,
    ) -> Result<ShareableMomentsResponse, ApiError> {
        self.post(
            "/api/social/shareable-moments",
            &AnalysisRequest {
                puuid: puuid.to_string(),
                match_count,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slashes_from_base_url() {
        let client = AnalyticsClient::new(reqwest::Client::new(), "http://localhost:8000///");
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[test]
    fn server_error_keeps_status_and_body() {
        let err = ApiError::Server {
            status: StatusCode::BAD_GATEWAY,
            body: String::from("upstream riot fetch failed"),
        };
        assert_eq!(
            err.to_string(),
            "analytics service returned 502 Bad Gateway: upstream riot fetch failed"
        );
    }
}
