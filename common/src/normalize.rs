//! CSV to [`JobRecord`] normalization.
//!
//! The primary search service returns LinkedIn and Naukri results as CSV
//! text. The header row decides which record keys each column fills.

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::record::{JobRecord, keys};

/// Known headers (lowercased) and the record keys they populate.
const HEADER_ALIASES: &[(&[&str], &[&str])] = &[
    (&["job title", "title"], &[keys::TITLE, keys::JOB_TITLE]),
    (&["company", "company name"], &[keys::COMPANY, keys::COMPANY_NAME]),
    (&["company link"], &[keys::COMPANY_LINK]),
    (&["location"], &[keys::LOCATION]),
    (&["time posted", "posted"], &[keys::TIME_POSTED]),
    (&["job link", "job posting link"], &[keys::JOB_LINK, keys::JOB_POSTING_LINK]),
    (&["rating"], &[keys::RATING]),
    (&["experience"], &[keys::EXPERIENCE]),
    (&["tech stack", "skills"], &[keys::TECH_STACK]),
];

/// Parses CSV job listings into records, one per data row.
///
/// Never fails: empty or header-only input and tokenizer errors both give
/// an empty list.
pub fn parse_jobs_csv(text: &str) -> Vec<JobRecord> {
    let rows = match read_rows(text) {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, "Failed to parse job CSV, treating it as empty");
            return Vec::new();
        }
    };

    let Some((header, data)) = rows.split_first() else {
        return Vec::new();
    };
    if data.is_empty() {
        debug!("Job CSV has no data rows");
        return Vec::new();
    }

    let columns: Vec<Vec<String>> = header.iter().map(column_keys).collect();

    data.iter()
        .map(|row| {
            let mut record = JobRecord::new();
            for (targets, value) in columns.iter().zip(row.iter()) {
                for key in targets {
                    record.insert(key.as_str(), value);
                }
            }
            record
        })
        .collect()
}

fn read_rows(text: &str) -> Result<Vec<StringRecord>, csv::Error> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes())
        .records()
        .collect()
}

/// Record keys for one header cell. Unknown headers keep their literal text.
fn column_keys(header: &str) -> Vec<String> {
    let normalized = header.trim().to_lowercase();
    HEADER_ALIASES
        .iter()
        .find(|(names, _)| names.contains(&normalized.as_str()))
        .map(|(_, targets)| targets.iter().map(|k| k.to_string()).collect())
        .unwrap_or_else(|| vec![header.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse_jobs_csv("").is_empty());
    }

    #[test]
    fn test_header_only() {
        assert!(parse_jobs_csv("Title,Company,Location\n").is_empty());
    }

    #[test]
    fn test_one_record_per_data_row() {
        let csv = "Title,Company,Location\n\
                   Rust Developer,Acme,Pune\n\
                   Go Developer,Globex,Delhi\n\
                   SRE,Initech,Remote\n";
        let records = parse_jobs_csv(csv);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].title(), Some("Rust Developer"));
        assert_eq!(records[1].company(), Some("Globex"));
        assert_eq!(records[2].location(), Some("Remote"));
    }

    #[test]
    fn test_aliases_fill_both_keys() {
        let csv = "Job Title,Company Name,Job Posting Link\n\
                   ML Engineer,Flipkart,https://jobs.example/ml\n";
        let records = parse_jobs_csv(csv);
        let record = &records[0];
        assert_eq!(record.get(keys::TITLE), Some("ML Engineer"));
        assert_eq!(record.get(keys::JOB_TITLE), Some("ML Engineer"));
        assert_eq!(record.get(keys::COMPANY), Some("Flipkart"));
        assert_eq!(record.get(keys::COMPANY_NAME), Some("Flipkart"));
        assert_eq!(record.get(keys::JOB_LINK), Some("https://jobs.example/ml"));
        assert_eq!(record.get(keys::JOB_POSTING_LINK), Some("https://jobs.example/ml"));
    }

    #[test]
    fn test_header_matching_ignores_case_and_padding() {
        let csv = " EXPERIENCE ,Skills,posted\n2-4 Yrs,\"Rust, Tokio\",1 day ago\n";
        let record = &parse_jobs_csv(csv)[0];
        assert_eq!(record.experience(), Some("2-4 Yrs"));
        assert_eq!(record.get(keys::TECH_STACK), Some("Rust, Tokio"));
        assert_eq!(record.posted_time(), Some("1 day ago"));
    }

    #[test]
    fn test_unknown_header_passes_through() {
        let record = &parse_jobs_csv("Title,Salary Range\nDevOps,10-15 LPA\n")[0];
        assert_eq!(record.get("Salary Range"), Some("10-15 LPA"));
    }

    #[test]
    fn test_short_row_leaves_trailing_fields_absent() {
        let records = parse_jobs_csv("Title,Company,Location\nFrontend Dev\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), Some("Frontend Dev"));
        assert_eq!(records[0].company(), None);
        assert_eq!(records[0].location(), None);
    }

    #[test]
    fn test_empty_cells_are_absent() {
        let record = &parse_jobs_csv("Title,Company,Location\nAnalyst,,Mumbai\n")[0];
        assert_eq!(record.company(), None);
        assert_eq!(record.location(), Some("Mumbai"));
    }

    #[test]
    fn test_quoted_fields_keep_embedded_commas() {
        let csv = "Title,Location\n\"Engineer, Platform\",\"Bengaluru, Karnataka, India\"\n";
        let record = &parse_jobs_csv(csv)[0];
        assert_eq!(record.title(), Some("Engineer, Platform"));
        assert_eq!(record.location(), Some("Bengaluru, Karnataka, India"));
    }
}
