use std::io::Read;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use bizassist::fetch::{fetch_clean_text, HttpFetcher};
use bizassist::parser::clean::clean_html;
use bizassist::parser::competitors::aggregate_competitors;
use bizassist::parser::fields::extract_fields;
use bizassist::parser::recommendations::parse_recommendations;
use bizassist::parser::sections::parse_sections;
use bizassist::records::{CompetitorContext, SearchResult};

#[derive(Parser)]
#[command(name = "bizassist", about = "Business profile and recommendation parsing tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a page (or read a saved one) and print its cleaned text
    Clean {
        /// Page URL
        url: Option<String>,
        /// Local HTML file instead of a URL
        #[arg(short, long, conflicts_with = "url")]
        file: Option<String>,
    },
    /// Parse "Label: value" lines into a business profile (JSON)
    Fields {
        /// Input file, or "-" for stdin
        #[arg(default_value = "-")]
        input: String,
    },
    /// Parse a "###"-sectioned answer (JSON)
    Sections {
        #[arg(default_value = "-")]
        input: String,
    },
    /// Parse numbered "Type|Value|Rationale" recommendation lines
    Recommendations {
        #[arg(default_value = "-")]
        input: String,
    },
    /// Aggregate competitor candidates from saved search results
    Competitors {
        /// The business being compared
        #[arg(long)]
        name: String,
        #[arg(long)]
        industry: String,
        /// JSON hits of the industry search
        #[arg(long)]
        industry_results: String,
        /// JSON hits of the name search
        #[arg(long)]
        name_results: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clean { url, file } => {
            let text = match (url, file) {
                (_, Some(path)) => clean_html(&read_input(&path)?),
                (Some(url), None) => {
                    let fetcher = HttpFetcher::new()?;
                    fetch_clean_text(&fetcher, &url).await?
                }
                (None, None) => anyhow::bail!("Pass a URL or --file"),
            };
            println!("{}", text);
            Ok(())
        }
        Commands::Fields { input } => {
            let record = extract_fields(&read_input(&input)?);
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Commands::Sections { input } => {
            let doc = parse_sections(&read_input(&input)?);
            if doc.is_empty() {
                println!("No sections found.");
                return Ok(());
            }
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(())
        }
        Commands::Recommendations { input } => {
            let recs = parse_recommendations(&read_input(&input)?);
            if recs.is_empty() {
                println!("No recommendations found.");
                return Ok(());
            }

            println!("{:>2} | {:<14} | {:<28} | {:<40}", "#", "Type", "Recommendation", "Why");
            println!("{}", "-".repeat(92));
            for (i, r) in recs.iter().enumerate() {
                let known = if r.recommendation_type().is_ok() { "" } else { " (?)" };
                println!(
                    "{:>2} | {:<14} | {:<28} | {:<40}",
                    i + 1,
                    truncate(&format!("{}{}", r.kind, known), 14),
                    truncate(&r.value, 28),
                    truncate(&r.rationale, 40)
                );
            }
            Ok(())
        }
        Commands::Competitors {
            name,
            industry,
            industry_results,
            name_results,
        } => {
            let industry_hits = load_hits(&industry_results)?;
            let name_hits = match name_results {
                Some(path) => load_hits(&path)?,
                None => Vec::new(),
            };
            let ctx = CompetitorContext {
                business_name: name,
                industry,
            };
            let list = aggregate_competitors(&industry_hits, &name_hits, &ctx);
            if list.is_empty() {
                println!("No competitors found.");
                return Ok(());
            }

            println!("{:>2} | {:<28} | {:<36} | {:<16}", "#", "Competitor", "Website", "Industry");
            println!("{}", "-".repeat(90));
            for (i, c) in list.iter().enumerate() {
                println!(
                    "{:>2} | {:<28} | {:<36} | {:<16}",
                    i + 1,
                    truncate(&c.name, 28),
                    truncate(&c.source_url, 36),
                    truncate(&c.industry, 16)
                );
            }
            println!(
                "\n{} candidates from {} search hits",
                list.len(),
                industry_hits.len() + name_hits.len()
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
    }
}

/// Search hits saved either as a bare array or as `{"results": [...]}`.
fn load_hits(path: &str) -> anyhow::Result<Vec<SearchResult>> {
    let raw = read_input(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path))?;
    let list = match value.get("results") {
        Some(results) => results.clone(),
        None => value,
    };
    Ok(serde_json::from_value(list)?)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
