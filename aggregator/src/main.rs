//! JobCipher command line
//!
//! Uploads a résumé, searches LinkedIn, Naukri and CareerJet, filters the
//! results locally and saves them to data/jobs.json. Also looks up company
//! reviews and subscribes to job alerts.

use std::fs;
use std::path::{Path, PathBuf};

use aggregator::{Config, JobCipherClient, SearchOverrides, logging, search_with_resume};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use common::{AlertSubscription, FilterCriteria, JobCollection, apply_filters};

#[derive(Debug, Parser)]
#[command(
    name = "jobcipher",
    version,
    about = "Resume-driven job search across LinkedIn, Naukri and CareerJet"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload a resume and search all job sources.
    Search(SearchArgs),
    /// Fetch reviews for a company.
    Reviews {
        company: String,
    },
    /// Subscribe to daily job alerts.
    Alert {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        keyword: String,
        #[arg(long, default_value = "")]
        location: String,
    },
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Resume file to upload (PDF).
    resume: PathBuf,

    /// Search keyword, replacing the one extracted from the resume.
    #[arg(long)]
    keyword: Option<String>,

    /// Search location, replacing the one extracted from the resume.
    #[arg(long)]
    location: Option<String>,

    #[command(flatten)]
    filters: FilterArgs,

    /// Where to save the filtered results.
    #[arg(long, default_value = "data/jobs.json")]
    output: PathBuf,

    /// Cards to print per source.
    #[arg(long, default_value_t = 10)]
    limit: usize,
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// Keep jobs whose title, company or description contains this.
    #[arg(long)]
    filter_keyword: Option<String>,
    #[arg(long)]
    filter_location: Option<String>,
    #[arg(long)]
    company: Option<String>,
    /// Matched against the job title.
    #[arg(long)]
    job_type: Option<String>,
    /// Maximum years of experience.
    #[arg(long)]
    experience: Option<u32>,
    /// Minimum compensation.
    #[arg(long)]
    ctc: Option<String>,
    /// Work mode, e.g. remote or on-site.
    #[arg(long)]
    remote: Option<String>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        FilterCriteria {
            experience: args.experience,
            job_type: args.job_type,
            remote: args.remote,
            company: args.company,
            ctc_filters: args.ctc,
            keyword: args.filter_keyword,
            location: args.filter_location,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    logging::init(cli.debug, &config.rust_log);

    let client = JobCipherClient::new(config.endpoints);

    match cli.command {
        Command::Search(args) => run_search(&client, args).await,
        Command::Reviews { company } => run_reviews(&client, &company).await,
        Command::Alert {
            email,
            keyword,
            location,
        } => run_alert(&client, &email, &keyword, &location).await,
    }
}

async fn run_search(client: &JobCipherClient, args: SearchArgs) -> Result<()> {
    println!("🔍 Uploading and extracting information...\n");

    let contents = fs::read(&args.resume)
        .with_context(|| format!("Failed to read resume {:?}", args.resume))?;
    let file_name = args
        .resume
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume.pdf".to_string());

    let overrides = SearchOverrides {
        keyword: args.keyword,
        location: args.location,
    };
    let search = search_with_resume(client, &file_name, contents, &overrides).await?;
    println!(
        "✅ Job search successful for '{}' in '{}'\n",
        search.query.keyword, search.query.location
    );

    let criteria = FilterCriteria::from(args.filters);
    let filtered = apply_filters(&search.jobs, &criteria)?;
    if !criteria.is_empty() {
        println!("🧹 Filters kept {} of {} jobs\n", filtered.total(), search.jobs.total());
    }

    print_collection(&filtered, args.limit);
    save_collection(&filtered, &args.output)?;

    println!("\n✨ Search complete!");
    Ok(())
}

fn print_collection(collection: &JobCollection, limit: usize) {
    for (source, cards) in collection.cards() {
        println!("📋 {} ({})", source, cards.len());
        if cards.is_empty() {
            println!("   No jobs found");
        }
        for card in cards.iter().take(limit) {
            println!("   • {} at {}", card.title, card.company);
            if !card.location.is_empty() {
                println!("     📍 {}", card.location);
            }
            if !card.url.is_empty() {
                println!("     🔗 {}", card.url);
            }
        }
        if cards.len() > limit {
            println!("   … and {} more", cards.len() - limit);
        }
        println!();
    }
}

fn save_collection(collection: &JobCollection, output: &Path) -> Result<()> {
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            fs::create_dir_all(dir).with_context(|| format!("Failed to create {dir:?}"))?;
            println!("📁 Created {dir:?} directory");
        }
    }

    let json_output =
        serde_json::to_string_pretty(collection).context("Failed to serialize jobs to JSON")?;
    fs::write(output, json_output).with_context(|| format!("Failed to write {output:?}"))?;

    println!("💾 Saved {} jobs to {:?}", collection.total(), output);
    Ok(())
}

async fn run_reviews(client: &JobCipherClient, company: &str) -> Result<()> {
    let reviews = client.company_reviews(company).await?;

    println!("🏢 Reviews for {}\n", company.trim());
    for (platform, review, link) in reviews.entries() {
        println!("== {platform}");
        println!("{review}");
        if let Some(link) = link {
            println!("Read more on {platform}: {link}");
        }
        println!();
    }
    Ok(())
}

async fn run_alert(
    client: &JobCipherClient,
    email: &str,
    keyword: &str,
    location: &str,
) -> Result<()> {
    let alert = AlertSubscription::new(keyword, location, email, Utc::now())?;
    client.subscribe_alert(&alert).await?;

    println!(
        "🔔 Job alert created! You will receive daily updates for {} jobs in {}.",
        alert.keyword, alert.location
    );
    Ok(())
}
