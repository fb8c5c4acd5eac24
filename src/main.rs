use anyhow::Context;
use dotenv::dotenv;
use log::{LevelFilter, info, warn};
use sectioneer::{CsvSink, ScrapingContext};
use tokio::fs::{self, File};
use tokio::io::BufWriter;

extern crate env_logger;
extern crate log;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let context = ScrapingContext::new()?;
    let output_path = context.scraping_config.output_path.clone();
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = File::create(&output_path)
        .await
        .with_context(|| format!("failed to create {}", output_path.display()))?;

    let scraper = context.into_scraper();
    let sink = CsvSink::new(BufWriter::new(file));
    let summary = scraper.run(&sink).await?;

    info!(
        "Wrote {} row(s) to {}",
        summary.rows_written,
        output_path.display()
    );
    info!(
        "{} department(s), {} course(s), {} section(s) listed, {} filtered out",
        summary.departments, summary.courses, summary.sections, summary.sections_filtered
    );
    if summary.departments_failed + summary.courses_failed + summary.enrolments_failed > 0 {
        warn!(
            "Skipped {} department(s), {} course(s) and {} enrolment page(s) after errors",
            summary.departments_failed, summary.courses_failed, summary.enrolments_failed
        );
    }
    Ok(())
}
