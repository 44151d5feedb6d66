//! Job source aggregation for JobCipher.
//!
//! Talks to the résumé extraction service and the job sources, and merges
//! their answers into a [`common::JobCollection`].

pub mod aggregate;
pub mod client;
pub mod config;
pub mod logging;

pub use aggregate::{ResumeSearch, SearchOverrides, aggregate, search_with_resume};
pub use client::{ClientError, JobCipherClient};
pub use config::{Config, Endpoints};
