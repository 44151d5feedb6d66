//! Client-side filtering of a [`JobCollection`].
//!
//! All active criteria are AND-combined. Each source is filtered on its
//! own and record order is preserved.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::collection::JobCollection;
use crate::error::FilterError;
use crate::record::JobRecord;

/// User-chosen constraints. A `None` or blank field means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Maximum years of experience. Zero counts as unset.
    pub experience: Option<u32>,
    /// Matched against the job title.
    pub job_type: Option<String>,
    /// Work mode, e.g. "remote" or "on-site".
    pub remote: Option<String>,
    pub date_posted: Option<String>,
    pub company: Option<String>,
    pub industry: Option<String>,
    /// Minimum compensation.
    pub ctc_filters: Option<String>,
    pub radius: Option<String>,
    pub keyword: Option<String>,
    pub location: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        CompiledFilter::new(self).is_ok_and(|f| f.is_empty())
    }
}

/// [`FilterCriteria`] with its matchers built, ready to test records.
#[derive(Debug, Clone, Default)]
pub struct CompiledFilter {
    keyword: Option<Regex>,
    location: Option<Regex>,
    company: Option<Regex>,
    job_type: Option<Regex>,
    experience_ceiling: Option<u64>,
    ctc_floor: Option<u64>,
    work_mode: Option<String>,
}

impl CompiledFilter {
    pub fn new(criteria: &FilterCriteria) -> Result<Self, FilterError> {
        let ctc_floor = match active(&criteria.ctc_filters) {
            Some(raw) => Some(
                parse_compensation_floor(raw)
                    .ok_or_else(|| FilterError::InvalidCompensation(raw.to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            keyword: compile("keyword", &criteria.keyword)?,
            location: compile("location", &criteria.location)?,
            company: compile("company", &criteria.company)?,
            job_type: compile("job_type", &criteria.job_type)?,
            experience_ceiling: criteria.experience.filter(|&years| years > 0).map(u64::from),
            ctc_floor,
            work_mode: active(&criteria.remote).map(str::to_lowercase),
        })
    }

    /// Returns true if no constraint is active.
    pub fn is_empty(&self) -> bool {
        self.keyword.is_none()
            && self.location.is_none()
            && self.company.is_none()
            && self.job_type.is_none()
            && self.experience_ceiling.is_none()
            && self.ctc_floor.is_none()
            && self.work_mode.is_none()
    }

    /// Check if a single record satisfies every active constraint.
    pub fn matches(&self, record: &JobRecord) -> bool {
        let title = record.title().unwrap_or_default();
        let company = record.company().unwrap_or_default();

        if let Some(ref re) = self.keyword {
            let description = record.description().unwrap_or_default();
            if !(re.is_match(title) || re.is_match(company) || re.is_match(description)) {
                return false;
            }
        }

        if let Some(ref re) = self.location {
            if !re.is_match(record.location().unwrap_or_default()) {
                return false;
            }
        }

        if let Some(ref re) = self.company {
            if !re.is_match(company) {
                return false;
            }
        }

        // No dedicated job-type field upstream, so the title stands in.
        if let Some(ref re) = self.job_type {
            if !re.is_match(title) {
                return false;
            }
        }

        if let Some(ceiling) = self.experience_ceiling {
            match record.experience().and_then(parse_experience) {
                Some(years) if years <= ceiling => {}
                _ => return false,
            }
        }

        if let Some(floor) = self.ctc_floor {
            match record.salary().and_then(extract_amount) {
                Some(amount) if amount >= floor => {}
                _ => return false,
            }
        }

        if let Some(ref mode) = self.work_mode {
            let matches = record
                .work_mode()
                .is_some_and(|m| m.to_lowercase().contains(mode.as_str()));
            if !matches {
                return false;
            }
        }

        true
    }

    /// Matching records, in their original order.
    pub fn apply(&self, records: &[JobRecord]) -> Vec<JobRecord> {
        if self.is_empty() {
            return records.to_vec();
        }
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Filters every source of `collection`, producing a new collection.
pub fn apply_filters(
    collection: &JobCollection,
    criteria: &FilterCriteria,
) -> Result<JobCollection, FilterError> {
    let filter = CompiledFilter::new(criteria)?;
    Ok(collection.map_sources(|_, records| filter.apply(records)))
}

/// Case-insensitive matcher that treats `term` literally.
pub fn search_regex(term: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
}

/// Years of experience from free text: every digit, concatenated.
///
/// "5+ years" gives 5. Ranges collapse ("2-4 Yrs" gives 24), which is how
/// the dashboard has always read them.
pub fn parse_experience(text: &str) -> Option<u64> {
    parse_digits(text)
}

/// Amount of a salary string: every digit, concatenated.
///
/// Grouping commas vanish ("₹5,00,000" gives 500000) and ranges collapse
/// the same way experience does ("3-8 Lacs PA" gives 38).
pub fn extract_amount(salary_raw: &str) -> Option<u64> {
    parse_digits(salary_raw)
}

/// Leading whole number of the compensation criterion, so "4.5" gives 4.
pub fn parse_compensation_floor(raw: &str) -> Option<u64> {
    static LEADING: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\s*(\d+)").expect("floor pattern is valid"));

    LEADING.captures(raw)?.get(1)?.as_str().parse().ok()
}

fn parse_digits(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn compile(field: &'static str, value: &Option<String>) -> Result<Option<Regex>, FilterError> {
    active(value)
        .map(|term| {
            search_regex(term).map_err(|source| FilterError::InvalidPattern {
                field,
                pattern: term.to_string(),
                source,
            })
        })
        .transpose()
}
