use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use screen::{
    GrowthCriteria, GrowthScreen, NseEquityListing, ScreenConfig, ScreeningPipeline,
    UniverseSource, YahooProvider, rank_price_gaps, read_price_points, resolve_universe,
    write_growth_csv,
};
use tracing::info;

use crate::GrowthArgs;
use crate::report;

pub(crate) async fn fundamentals(source: &UniverseSource, config: ScreenConfig) -> Result<()> {
    report::banner(&config.thresholds);

    let symbols = resolve_universe(source, Some(&config.market_suffix))
        .await
        .context("no stock symbols available to screen")?;
    report::prepared(&symbols, config.limit);

    let pipeline = ScreeningPipeline::new(Arc::new(YahooProvider::new()), config);
    let screened = pipeline.run_with(&symbols, report::progress).await;

    report::summary(&screened);
    report::disclaimer();
    Ok(())
}

pub(crate) async fn growth(source: &UniverseSource, args: &GrowthArgs) -> Result<()> {
    let symbols = resolve_universe(source, Some(&args.source.suffix))
        .await
        .context("could not load the symbol list")?;
    println!("Analyzing {} symbols...", symbols.len());

    let screen = GrowthScreen::new(Arc::new(YahooProvider::new()))
        .with_criteria(GrowthCriteria::default().with_min_growth_pct(args.min_growth))
        .with_pause(Duration::from_millis(args.pause_ms))
        .with_limit(args.source.limit);
    let end = chrono::Local::now().date_naive();

    let records = screen
        .run_with(&symbols, end, |done, total| {
            if done % 100 == 0 || done == total {
                info!(done, total, "Growth screen progress");
            }
        })
        .await;

    if records.is_empty() {
        println!("\nNo doubling stocks found in the analysis");
        return Ok(());
    }

    write_growth_csv(&records, &args.output)
        .with_context(|| format!("could not write {}", args.output.display()))?;
    report::growth_table(&records);
    println!("\nSaved to {}", args.output.display());
    Ok(())
}

pub(crate) async fn count(url: &str) -> Result<()> {
    let listing = NseEquityListing::with_url(url);
    let count = listing
        .count()
        .await
        .context("could not fetch the NSE listing; check the connection or try again later")?;
    println!("Currently listed stocks on NSE: {count}");
    Ok(())
}

pub(crate) fn gaps(input: &Path, top: usize) -> Result<()> {
    let file = File::open(input).with_context(|| format!("could not open {}", input.display()))?;
    let prices = read_price_points(file)
        .with_context(|| format!("could not read prices from {}", input.display()))?;

    let gaps = rank_price_gaps(&prices, top);
    report::gaps(top, &gaps);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_gaps_reads_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,price").unwrap();
        writeln!(file, "stock9,10").unwrap();
        writeln!(file, "stock5,30").unwrap();
        writeln!(file, "stock8,200").unwrap();

        assert!(gaps(file.path(), 3).is_ok());
    }

    #[test]
    fn test_gaps_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = gaps(&dir.path().join("prices.csv"), 3).unwrap_err();
        assert!(err.to_string().contains("could not open"));
    }
}
