use std::sync::Arc;

use aggregator::JobCipherClient;
use common::{FilterCriteria, FilterError, JobCollection, apply_filters};
use tokio::sync::RwLock;

/// One dashboard session: the last search, the active filters and the
/// filtered view derived from them.
///
/// Collections are shared behind `Arc` and only ever swapped whole.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub jobs: Arc<JobCollection>,
    pub filtered: Arc<JobCollection>,
    pub criteria: FilterCriteria,
    pub status: String,
}

/// Shared application state injected into all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: JobCipherClient,
    session: Arc<RwLock<Session>>,
}

impl AppState {
    pub fn new(client: JobCipherClient) -> Self {
        Self {
            client,
            session: Arc::default(),
        }
    }

    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn set_status(&self, status: impl Into<String>) {
        self.session.write().await.status = status.into();
    }

    /// Installs a fresh search result. The filtered view shows it unfiltered.
    pub async fn replace_results(&self, jobs: JobCollection, status: impl Into<String>) -> Session {
        let jobs = Arc::new(jobs);
        let mut session = self.session.write().await;
        session.filtered = Arc::clone(&jobs);
        session.jobs = jobs;
        session.status = status.into();
        session.clone()
    }

    /// Filters the current results. On error nothing changes.
    pub async fn apply_criteria(&self, criteria: FilterCriteria) -> Result<Session, FilterError> {
        let mut session = self.session.write().await;
        let filtered = apply_filters(&session.jobs, &criteria)?;
        session.filtered = Arc::new(filtered);
        session.criteria = criteria;
        Ok(session.clone())
    }

    pub async fn reset_filters(&self) -> Session {
        let mut session = self.session.write().await;
        session.criteria = FilterCriteria::default();
        session.filtered = Arc::clone(&session.jobs);
        session.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aggregator::Endpoints;
    use common::{JobRecord, JobSource, record::keys};

    fn state() -> AppState {
        AppState::new(JobCipherClient::new(Endpoints::default()))
    }

    fn jobs() -> JobCollection {
        JobCollection::new(
            vec![
                JobRecord::new().with(keys::TITLE, "Rust Engineer"),
                JobRecord::new().with(keys::TITLE, "Java Engineer"),
            ],
            vec![],
            vec![],
        )
    }

    #[tokio::test]
    async fn test_replace_results_resets_view() {
        let state = state();
        let session = state.replace_results(jobs(), "done").await;
        assert!(Arc::ptr_eq(&session.jobs, &session.filtered));
        assert_eq!(session.status, "done");
    }

    #[tokio::test]
    async fn test_apply_and_reset() {
        let state = state();
        state.replace_results(jobs(), "done").await;

        let criteria = FilterCriteria {
            keyword: Some("rust".to_string()),
            ..Default::default()
        };
        let session = state.apply_criteria(criteria.clone()).await.unwrap();
        assert_eq!(session.filtered.get(JobSource::LinkedIn).len(), 1);
        assert_eq!(session.jobs.total(), 2);
        assert_eq!(session.criteria, criteria);

        let session = state.reset_filters().await;
        assert_eq!(session.filtered.total(), 2);
        assert_eq!(session.criteria, FilterCriteria::default());
    }

    #[tokio::test]
    async fn test_bad_criteria_leave_session_untouched() {
        let state = state();
        state.replace_results(jobs(), "done").await;
        let bad = FilterCriteria {
            ctc_filters: Some("n/a".to_string()),
            ..Default::default()
        };
        assert!(state.apply_criteria(bad).await.is_err());
        let session = state.snapshot().await;
        assert_eq!(session.filtered.total(), 2);
        assert_eq!(session.criteria, FilterCriteria::default());
    }
}
