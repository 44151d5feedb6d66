//! HTTP client for the upstream services.
//!
//! Every request to the extraction, search, CareerJet, reviews and alert
//! services goes through [`JobCipherClient`]. Nothing is retried.

use common::{
    AlertSubscription, CareerJetJob, CompanyReviews, ExtractedProfile, JobData,
    PrimarySearchResponse, ReviewRequest, ReviewsResponse, ValidationError, clean_search_term,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Endpoints;

const EXTRACTION: &str = "Resume extraction";
const JOB_SEARCH: &str = "Job search";
const CAREERJET: &str = "CareerJet search";
const REVIEWS: &str = "Company reviews";
const ALERTS: &str = "Job alert subscription";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{endpoint} request failed: {source}")]
    Http {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} failed! Status: {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("{endpoint} returned an unexpected body: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No information could be extracted from the resume")]
    NoExtraction,

    #[error("No review data found")]
    NoReviews,
}

impl ClientError {
    /// Upstream HTTP status, when the failure was a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct JobCipherClient {
    http: Client,
    endpoints: Endpoints,
}

impl JobCipherClient {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            http: Client::new(),
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Uploads a résumé and returns what the extraction service found.
    pub async fn extract_resume(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<ExtractedProfile, ClientError> {
        let form = Form::new().part("file", Part::bytes(contents).file_name(file_name.to_string()));
        let request = self.http.post(self.endpoints.extract_url()).multipart(form);

        let profile: ExtractedProfile = decode(EXTRACTION, send(EXTRACTION, request).await?).await?;
        debug!(?profile, "Extracted resume data");

        if !profile.has_extracted_info() {
            return Err(ClientError::NoExtraction);
        }
        Ok(profile)
    }

    /// Primary search, returning the LinkedIn and Naukri payloads.
    pub async fn search_primary(
        &self,
        data: &JobData,
    ) -> Result<PrimarySearchResponse, ClientError> {
        let request = self.http.post(self.endpoints.search_url()).json(data);
        decode(JOB_SEARCH, send(JOB_SEARCH, request).await?).await
    }

    /// CareerJet listings for a keyword and location.
    ///
    /// Both terms are cleaned of list-marker prefixes before sending.
    pub async fn search_careerjet(
        &self,
        keyword: &str,
        location: &str,
    ) -> Result<Vec<CareerJetJob>, ClientError> {
        let keyword = clean_search_term(keyword);
        let location = clean_search_term(location);
        let request = self
            .http
            .get(self.endpoints.careerjet_url())
            .query(&[("keyword", keyword.as_str()), ("location", location.as_str())]);

        decode(CAREERJET, send(CAREERJET, request).await?).await
    }

    pub async fn company_reviews(&self, company_name: &str) -> Result<CompanyReviews, ClientError> {
        let body = ReviewRequest::new(company_name)?;
        let request = self.http.post(self.endpoints.reviews_url()).json(&body);

        let response: ReviewsResponse = decode(REVIEWS, send(REVIEWS, request).await?).await?;
        response.review.ok_or(ClientError::NoReviews)
    }

    /// Any 2xx counts as subscribed; the response body is ignored.
    pub async fn subscribe_alert(&self, alert: &AlertSubscription) -> Result<(), ClientError> {
        let request = self.http.post(self.endpoints.alerts_url()).json(alert);
        send(ALERTS, request).await?;
        Ok(())
    }
}

async fn send(endpoint: &'static str, request: RequestBuilder) -> Result<Response, ClientError> {
    let response = request
        .send()
        .await
        .map_err(|source| ClientError::Http { endpoint, source })?;

    let status = response.status();
    if !status.is_success() {
        warn!(endpoint, status = status.as_u16(), "Upstream returned an error status");
        return Err(ClientError::Status {
            endpoint,
            status: status.as_u16(),
        });
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(
    endpoint: &'static str,
    response: Response,
) -> Result<T, ClientError> {
    let body = response
        .text()
        .await
        .map_err(|source| ClientError::Http { endpoint, source })?;
    serde_json::from_str(&body).map_err(|source| ClientError::Decode { endpoint, source })
}
