use thiserror::Error;

/// Errors raised while turning [`crate::FilterCriteria`] into matchers.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid {field} pattern '{pattern}': {source}")]
    InvalidPattern {
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("compensation floor '{0}' contains no number")]
    InvalidCompensation(String),
}

/// User input rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a file to upload")]
    MissingFile,

    #[error("Please enter a company name")]
    EmptyCompanyName,

    #[error("Please login to create job alerts")]
    MissingEmail,
}
