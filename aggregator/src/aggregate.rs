//! Fan-out over the job sources and the résumé-driven search flow.

use common::{CareerJetJob, ExtractedProfile, JobCollection, JobData, JobSource};
use tracing::{info, warn};

use crate::client::{ClientError, JobCipherClient};

/// Runs the primary search and the CareerJet search concurrently and
/// merges them into one collection.
///
/// A CareerJet failure only empties the CareerJet list. A primary search
/// failure fails the whole aggregation and CareerJet's results are dropped.
pub async fn aggregate(
    client: &JobCipherClient,
    data: &JobData,
) -> Result<JobCollection, ClientError> {
    info!(keyword = %data.keyword, location = %data.location, "Searching for jobs");

    let careerjet = async {
        Ok::<_, ClientError>(careerjet_or_empty(client, &data.keyword, &data.location).await)
    };
    let (primary, careerjet) = tokio::try_join!(client.search_primary(data), careerjet)?;

    let collection = primary.into_collection(careerjet);
    info!(
        linkedin = collection.get(JobSource::LinkedIn).len(),
        naukri = collection.get(JobSource::Naukri).len(),
        careerjet = collection.get(JobSource::CareerJet).len(),
        "Job search complete"
    );
    Ok(collection)
}

async fn careerjet_or_empty(
    client: &JobCipherClient,
    keyword: &str,
    location: &str,
) -> Vec<CareerJetJob> {
    match client.search_careerjet(keyword, location).await {
        Ok(jobs) => {
            if jobs.is_empty() {
                warn!("No CareerJet jobs found for the given keyword and location");
            }
            jobs
        }
        Err(e) => {
            warn!(error = %e, "Error fetching CareerJet jobs, continuing without them");
            Vec::new()
        }
    }
}

/// User-supplied replacements for the extracted keyword and location.
#[derive(Debug, Clone, Default)]
pub struct SearchOverrides {
    pub keyword: Option<String>,
    pub location: Option<String>,
}

/// Everything one résumé search produced.
#[derive(Debug, Clone)]
pub struct ResumeSearch {
    pub profile: ExtractedProfile,
    pub query: JobData,
    pub jobs: JobCollection,
}

/// Upload, extract, build the query, then aggregate.
pub async fn search_with_resume(
    client: &JobCipherClient,
    file_name: &str,
    contents: Vec<u8>,
    overrides: &SearchOverrides,
) -> Result<ResumeSearch, ClientError> {
    info!(file_name, bytes = contents.len(), "Uploading and extracting information");
    let profile = client.extract_resume(file_name, contents).await?;

    let query = JobData::from_profile(&profile)
        .with_overrides(overrides.keyword.as_deref(), overrides.location.as_deref());
    let jobs = aggregate(client, &query).await?;

    Ok(ResumeSearch { profile, query, jobs })
}
