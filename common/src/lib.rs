//! Shared job-search types and the pure pieces of the pipeline.
//!
//! Everything here is free of I/O: record normalization, the per-source
//! collection, filter application and the wire shapes exchanged with the
//! upstream services. The `aggregator` and `server` crates build on it.

pub mod alert;
pub mod collection;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod record;
pub mod reviews;
pub mod search;

pub use alert::AlertSubscription;
pub use collection::{JobCollection, JobSource};
pub use error::{FilterError, ValidationError};
pub use filter::{CompiledFilter, FilterCriteria, apply_filters};
pub use normalize::parse_jobs_csv;
pub use record::{CareerJetJob, JobCard, JobRecord};
pub use reviews::{CompanyReviews, ReviewRequest, ReviewsResponse};
pub use search::{ExtractedProfile, JobData, PrimarySearchResponse, clean_search_term};
