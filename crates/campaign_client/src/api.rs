use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use url::Url;

use crate::types::{
    map_reqwest_error, AddNumbersRequest, ApiError, BulkOutcome, BulkRequest, CallStatus,
    CountQuery, ImportReport, NumberRecord, PageQuery, StatsResponse, StatusUpdateRequest,
};

/// Connection settings for the campaign service.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    /// Bearer token attached to every request when present. Obtaining the
    /// token is the login screen's problem, not ours.
    pub auth_token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ApiSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            auth_token: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Everything the numbers screen asks of the service.
#[async_trait::async_trait]
pub trait CampaignApi: Send + Sync {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<NumberRecord>, ApiError>;
    async fn fetch_count(&self, query: &CountQuery) -> Result<u64, ApiError>;
    async fn update_status(&self, id: u64, status: CallStatus) -> Result<NumberRecord, ApiError>;
    async fn reset(&self, id: u64) -> Result<NumberRecord, ApiError>;
    async fn delete(&self, id: u64) -> Result<(), ApiError>;
    async fn bulk(&self, request: &BulkRequest) -> Result<BulkOutcome, ApiError>;
    async fn submit_numbers(&self, numbers: &[String]) -> Result<ImportReport, ApiError>;
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<ImportReport, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCampaignApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestCampaignApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.settings
            .base_url
            .join(path)
            .map_err(|err| ApiError::InvalidRequest(err.to_string()))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.settings.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl CampaignApi for ReqwestCampaignApi {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<NumberRecord>, ApiError> {
        let url = self.endpoint("/api/numbers")?;
        let response = self.send(self.client.get(url).query(query)).await?;
        response.json().await.map_err(map_reqwest_error)
    }

    async fn fetch_count(&self, query: &CountQuery) -> Result<u64, ApiError> {
        let url = self.endpoint("/api/numbers/stats")?;
        let response = self.send(self.client.get(url).query(query)).await?;
        let stats: StatsResponse = response.json().await.map_err(map_reqwest_error)?;
        Ok(stats.total)
    }

    async fn update_status(&self, id: u64, status: CallStatus) -> Result<NumberRecord, ApiError> {
        let url = self.endpoint(&format!("/api/numbers/{id}/status"))?;
        let body = StatusUpdateRequest { status };
        let response = self.send(self.client.put(url).json(&body)).await?;
        response.json().await.map_err(map_reqwest_error)
    }

    async fn reset(&self, id: u64) -> Result<NumberRecord, ApiError> {
        let url = self.endpoint(&format!("/api/numbers/{id}/reset"))?;
        let response = self.send(self.client.post(url)).await?;
        response.json().await.map_err(map_reqwest_error)
    }

    async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/api/numbers/{id}"))?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn bulk(&self, request: &BulkRequest) -> Result<BulkOutcome, ApiError> {
        let url = self.endpoint("/api/numbers/bulk")?;
        let response = self.send(self.client.post(url).json(request)).await?;
        response.json().await.map_err(map_reqwest_error)
    }

    async fn submit_numbers(&self, numbers: &[String]) -> Result<ImportReport, ApiError> {
        let url = self.endpoint("/api/numbers")?;
        let body = AddNumbersRequest {
            phone_numbers: numbers.to_vec(),
        };
        let response = self.send(self.client.post(url).json(&body)).await?;
        response.json().await.map_err(map_reqwest_error)
    }

    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<ImportReport, ApiError> {
        let url = self.endpoint("/api/numbers/upload")?;
        let part = Part::bytes(bytes).file_name(filename.to_owned());
        let form = Form::new().part("file", part);
        let response = self.send(self.client.post(url).multipart(form)).await?;
        response.json().await.map_err(map_reqwest_error)
    }
}
