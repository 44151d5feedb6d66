//! Wire types of the search flow: extraction result, search request and
//! the primary search response.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::collection::JobCollection;
use crate::normalize::parse_jobs_csv;
use crate::record::{CareerJetJob, JobRecord};

/// Strips a leading list marker such as "4. " and trims whitespace.
///
/// The extraction service numbers the items it pulls from a résumé, and
/// those prefixes must not reach the job sources.
pub fn clean_search_term(term: &str) -> String {
    static LIST_MARKER: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("list marker pattern is valid"));

    LIST_MARKER.replace(term, "").trim().to_string()
}

/// Response of the résumé extraction service.
///
/// Only `extracted_info` is guaranteed to mean anything; the rest are hints
/// that fall back to defaults in [`JobData::from_profile`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExtractedProfile {
    pub extracted_info: Option<Value>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub branch: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub college: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub keyword: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_u32")]
    pub experience: Option<u32>,
    #[serde(deserialize_with = "lenient_string")]
    pub job_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub remote: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub date_posted: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub industry: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub ctc_filters: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub radius: Option<String>,
}

impl ExtractedProfile {
    /// False when the service answered but found nothing usable.
    pub fn has_extracted_info(&self) -> bool {
        match &self.extracted_info {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_f64() != Some(0.0),
            Some(_) => true,
        }
    }
}

/// Body of the primary job search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobData {
    pub name: String,
    pub branch: String,
    pub college: String,
    pub keyword: String,
    pub location: String,
    pub experience: u32,
    pub job_type: String,
    pub remote: String,
    pub date_posted: String,
    pub company: String,
    pub industry: String,
    pub ctc_filters: String,
    pub radius: String,
}

impl JobData {
    /// Fills the request from extracted hints, defaulting whatever is missing.
    pub fn from_profile(profile: &ExtractedProfile) -> Self {
        let or = |value: &Option<String>, default: &str| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        Self {
            name: or(&profile.name, "N/A"),
            branch: or(&profile.branch, "CSE"),
            college: or(&profile.college, "N/A"),
            keyword: or(&profile.keyword, "Python"),
            location: or(&profile.location, "India"),
            experience: profile.experience.unwrap_or(0),
            job_type: or(&profile.job_type, "fulltime"),
            remote: or(&profile.remote, "on-site"),
            date_posted: or(&profile.date_posted, "week"),
            company: or(&profile.company, ""),
            industry: or(&profile.industry, ""),
            ctc_filters: or(&profile.ctc_filters, ""),
            radius: or(&profile.radius, "10"),
        }
    }

    /// Replaces keyword and/or location when the user supplied their own.
    pub fn with_overrides(mut self, keyword: Option<&str>, location: Option<&str>) -> Self {
        if let Some(keyword) = keyword.map(str::trim).filter(|k| !k.is_empty()) {
            self.keyword = keyword.to_string();
        }
        if let Some(location) = location.map(str::trim).filter(|l| !l.is_empty()) {
            self.location = location.to_string();
        }
        self
    }

    pub fn cleaned_keyword(&self) -> String {
        clean_search_term(&self.keyword)
    }

    pub fn cleaned_location(&self) -> String {
        clean_search_term(&self.location)
    }
}

/// One source's payload in the primary search response: CSV text, or
/// records that are already structured.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SourcePayload {
    Csv(String),
    Records(Vec<Map<String, Value>>),
}

impl SourcePayload {
    pub fn into_records(self) -> Vec<JobRecord> {
        match self {
            SourcePayload::Csv(text) => parse_jobs_csv(&text),
            SourcePayload::Records(objects) => {
                objects.into_iter().map(JobRecord::from_json_object).collect()
            }
        }
    }
}

/// Response of the primary job search service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrimarySearchResponse {
    #[serde(rename = "LinkedIn Jobs", default)]
    pub linkedin: Option<SourcePayload>,
    #[serde(rename = "Naukri Jobs", default)]
    pub naukri: Option<SourcePayload>,
}

impl PrimarySearchResponse {
    /// Merges the primary results with CareerJet's into one collection.
    pub fn into_collection(self, careerjet: Vec<CareerJetJob>) -> JobCollection {
        let records = |payload: Option<SourcePayload>| {
            payload.map(SourcePayload::into_records).unwrap_or_default()
        };
        JobCollection::new(
            records(self.linkedin),
            records(self.naukri),
            careerjet.into_iter().map(JobRecord::from).collect(),
        )
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
