use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Body of a company reviews request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub company_name: String,
}

impl ReviewRequest {
    /// Rejects blank names; the name is sent trimmed.
    pub fn new(company_name: &str) -> Result<Self, ValidationError> {
        let company_name = company_name.trim();
        if company_name.is_empty() {
            return Err(ValidationError::EmptyCompanyName);
        }
        Ok(Self {
            company_name: company_name.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewsResponse {
    #[serde(default)]
    pub review: Option<CompanyReviews>,
}

/// Review text and a "read more" link, each keyed by platform name.
///
/// Platforms keep the order the reviews service listed them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyReviews {
    #[serde(default)]
    pub reviews: Map<String, Value>,
    #[serde(default)]
    pub links: Map<String, Value>,
}

impl CompanyReviews {
    /// (platform, review, link) for every platform with a text review.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, Option<&str>)> {
        self.reviews.iter().filter_map(|(platform, review)| {
            let link = self.links.get(platform).and_then(Value::as_str);
            Some((platform.as_str(), review.as_str()?, link))
        })
    }
}
