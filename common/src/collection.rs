use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{JobCard, JobRecord};

/// Upstream provider a listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JobSource {
    #[serde(rename = "LinkedIn Jobs")]
    LinkedIn,
    #[serde(rename = "Naukri Jobs")]
    Naukri,
    #[serde(rename = "CareerJet Jobs")]
    CareerJet,
}

impl JobSource {
    pub const ALL: [JobSource; 3] = [JobSource::LinkedIn, JobSource::Naukri, JobSource::CareerJet];

    pub fn label(self) -> &'static str {
        match self {
            JobSource::LinkedIn => "LinkedIn Jobs",
            JobSource::Naukri => "Naukri Jobs",
            JobSource::CareerJet => "CareerJet Jobs",
        }
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Listings of one search, grouped by source in upstream order.
///
/// All three sources are always present, possibly empty. A collection is
/// never patched: a new search or a new filter pass builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCollection {
    #[serde(rename = "LinkedIn Jobs", default)]
    linkedin: Vec<JobRecord>,
    #[serde(rename = "Naukri Jobs", default)]
    naukri: Vec<JobRecord>,
    #[serde(rename = "CareerJet Jobs", default)]
    careerjet: Vec<JobRecord>,
}

impl JobCollection {
    pub fn new(
        linkedin: Vec<JobRecord>,
        naukri: Vec<JobRecord>,
        careerjet: Vec<JobRecord>,
    ) -> Self {
        Self {
            linkedin,
            naukri,
            careerjet,
        }
    }

    pub fn get(&self, source: JobSource) -> &[JobRecord] {
        match source {
            JobSource::LinkedIn => &self.linkedin,
            JobSource::Naukri => &self.naukri,
            JobSource::CareerJet => &self.careerjet,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (JobSource, &[JobRecord])> {
        JobSource::ALL.into_iter().map(|source| (source, self.get(source)))
    }

    /// Builds a new collection by transforming each source's list independently.
    pub fn map_sources<F>(&self, mut f: F) -> Self
    where
        F: FnMut(JobSource, &[JobRecord]) -> Vec<JobRecord>,
    {
        Self {
            linkedin: f(JobSource::LinkedIn, &self.linkedin),
            naukri: f(JobSource::Naukri, &self.naukri),
            careerjet: f(JobSource::CareerJet, &self.careerjet),
        }
    }

    pub fn counts(&self) -> BTreeMap<JobSource, usize> {
        self.iter().map(|(source, jobs)| (source, jobs.len())).collect()
    }

    pub fn total(&self) -> usize {
        self.linkedin.len() + self.naukri.len() + self.careerjet.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Card projection of every record, keyed by source.
    pub fn cards(&self) -> BTreeMap<JobSource, Vec<JobCard>> {
        self.iter()
            .map(|(source, jobs)| (source, jobs.iter().map(|job| job.card(source)).collect()))
            .collect()
    }
}
