use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::collection::JobSource;

/// Field names used by the normalized record.
///
/// LinkedIn and Naukri name the same things differently, so a few concepts
/// have two keys. The normalizer fills both and the accessors below resolve
/// whichever is present.
pub mod keys {
    pub const TITLE: &str = "Title";
    pub const JOB_TITLE: &str = "JobTitle";
    pub const COMPANY: &str = "Company";
    pub const COMPANY_NAME: &str = "CompanyName";
    pub const COMPANY_LINK: &str = "CompanyLink";
    pub const LOCATION: &str = "Location";
    pub const TIME_POSTED: &str = "TimePosted";
    pub const JOB_LINK: &str = "JobLink";
    pub const JOB_POSTING_LINK: &str = "JobPostingLink";
    pub const RATING: &str = "Rating";
    pub const EXPERIENCE: &str = "Experience";
    pub const TECH_STACK: &str = "TechStack";
    pub const DESCRIPTION: &str = "Description";
    pub const SALARY: &str = "Salary";
    pub const WORK_MODE: &str = "WorkMode";
}

/// One job listing, whatever source it came from.
///
/// Only non-empty values are stored, so a missing key always means the
/// upstream did not provide the field. Nothing is required: a record with
/// no fields at all is still a valid record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobRecord {
    fields: BTreeMap<String, String>,
}

impl JobRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field. Empty values are dropped so they read back as absent.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        self.fields.insert(key.into(), value);
    }

    /// Builder-style [`JobRecord::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builds a record from an already-structured JSON object.
    ///
    /// Strings are kept as-is, numbers and booleans are stringified, and
    /// nulls, arrays and nested objects are skipped.
    pub fn from_json_object(object: Map<String, Value>) -> Self {
        let mut record = Self::new();
        for (key, value) in object {
            match value {
                Value::String(s) => record.insert(key, s),
                Value::Number(n) => record.insert(key, n.to_string()),
                Value::Bool(b) => record.insert(key, b.to_string()),
                _ => {}
            }
        }
        record
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn title(&self) -> Option<&str> {
        self.get(keys::TITLE).or_else(|| self.get(keys::JOB_TITLE))
    }

    pub fn company(&self) -> Option<&str> {
        self.get(keys::COMPANY).or_else(|| self.get(keys::COMPANY_NAME))
    }

    pub fn link(&self) -> Option<&str> {
        self.get(keys::JOB_LINK)
            .or_else(|| self.get(keys::JOB_POSTING_LINK))
    }

    pub fn location(&self) -> Option<&str> {
        self.get(keys::LOCATION)
    }

    pub fn posted_time(&self) -> Option<&str> {
        self.get(keys::TIME_POSTED)
    }

    pub fn description(&self) -> Option<&str> {
        self.get(keys::DESCRIPTION)
    }

    pub fn experience(&self) -> Option<&str> {
        self.get(keys::EXPERIENCE)
    }

    pub fn salary(&self) -> Option<&str> {
        self.get(keys::SALARY)
    }

    pub fn work_mode(&self) -> Option<&str> {
        self.get(keys::WORK_MODE)
    }

    /// Display projection used by the CLI and the session API.
    pub fn card(&self, source: JobSource) -> JobCard {
        let text = |v: Option<&str>| v.unwrap_or_default().to_string();
        JobCard {
            title: text(self.title()),
            company: text(self.company()),
            location: text(self.location()),
            url: text(self.link()),
            posted: text(self.posted_time()),
            description: text(self.description()),
            source,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for JobRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// What a job card shows. Absent fields render as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobCard {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub posted: String,
    pub description: String,
    pub source: JobSource,
}

/// A listing as the CareerJet proxy returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CareerJetJob {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Company")]
    pub company: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "JobLink")]
    pub job_link: Option<String>,
    #[serde(rename = "TimePosted")]
    pub time_posted: Option<String>,
}

impl From<CareerJetJob> for JobRecord {
    fn from(job: CareerJetJob) -> Self {
        [
            (keys::TITLE, job.title),
            (keys::COMPANY, job.company),
            (keys::LOCATION, job.location),
            (keys::DESCRIPTION, job.description),
            (keys::JOB_LINK, job.job_link),
            (keys::TIME_POSTED, job.time_posted),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_values_are_absent() {
        let record = JobRecord::new().with(keys::TITLE, "").with(keys::COMPANY, "Acme");
        assert_eq!(record.get(keys::TITLE), None);
        assert_eq!(record.company(), Some("Acme"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_aliases_resolve_either_key() {
        let naukri = JobRecord::new()
            .with(keys::JOB_TITLE, "Data Engineer")
            .with(keys::COMPANY_NAME, "Infosys")
            .with(keys::JOB_POSTING_LINK, "https://naukri.example/1");
        assert_eq!(naukri.title(), Some("Data Engineer"));
        assert_eq!(naukri.company(), Some("Infosys"));
        assert_eq!(naukri.link(), Some("https://naukri.example/1"));
    }

    #[test]
    fn test_from_json_object_skips_non_scalars() {
        let value = json!({
            "Title": "Rust Developer",
            "Rating": 4.2,
            "Remote": true,
            "Tags": ["a", "b"],
            "Company": null
        });
        let Value::Object(object) = value else {
            unreachable!()
        };
        let record = JobRecord::from_json_object(object);
        assert_eq!(record.title(), Some("Rust Developer"));
        assert_eq!(record.get("Rating"), Some("4.2"));
        assert_eq!(record.get("Remote"), Some("true"));
        assert_eq!(record.get("Tags"), None);
        assert_eq!(record.company(), None);
    }

    #[test]
    fn test_card_uses_empty_strings_for_missing_fields() {
        let card = JobRecord::new()
            .with(keys::TITLE, "QA Engineer")
            .card(JobSource::LinkedIn);
        assert_eq!(card.title, "QA Engineer");
        assert_eq!(card.company, "");
        assert_eq!(card.url, "");
        assert_eq!(card.source, JobSource::LinkedIn);
    }

    #[test]
    fn test_careerjet_job_conversion() {
        let job: CareerJetJob = serde_json::from_value(json!({
            "Title": "Backend Developer",
            "Company": "Zoho",
            "Location": "Chennai",
            "JobLink": "https://careerjet.example/42",
            "Unused": "ignored"
        }))
        .unwrap();
        let record = JobRecord::from(job);
        assert_eq!(record.title(), Some("Backend Developer"));
        assert_eq!(record.link(), Some("https://careerjet.example/42"));
        assert_eq!(record.description(), None);
        assert_eq!(record.len(), 4);
    }
}
