//! Human-readable output on stdout.

use screen::{
    GrowthRecord, Outcome, PriceGap, ScreeningReport, ScreeningResult, Symbol, ThresholdConfig,
    group_thousands,
};

const RULE_WIDTH: usize = 50;

fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

pub(crate) fn banner(thresholds: &ThresholdConfig) {
    println!("{}", rule('='));
    println!("NSE Stock Screener");
    println!("{}", rule('='));
    println!("Criteria:");
    println!(
        "1. Consistently Profitable (net income > 0 for last {} years)",
        thresholds.profitable_years
    );
    println!(
        "2. Low Debt (Debt-to-Equity < {})",
        thresholds.debt_to_equity_ceiling
    );
    println!(
        "3. Good Returns (ROE > {:.0}% AND ROCE > {:.0}%)",
        thresholds.roe_floor * 100.0,
        thresholds.roce_floor * 100.0
    );
    println!("{}", "-".repeat(30));
}

pub(crate) fn prepared(symbols: &[Symbol], limit: Option<usize>) {
    let example = symbols.first().map_or("N/A", Symbol::as_str);
    println!(
        "\nPrepared {} unique symbols for screening (e.g., {example}).",
        symbols.len()
    );
    if let Some(limit) = limit.filter(|l| *l < symbols.len()) {
        println!("Screening only the first {limit} symbols.");
    }
    println!();
}

pub(crate) fn progress(position: usize, total: usize, result: &ScreeningResult) {
    println!("--- ({position}/{total}) {} ---", result.symbol);
    match result.outcome {
        Outcome::Qualified => println!("--- {} QUALIFIED ---", result.symbol),
        Outcome::Unavailable => println!("  - Skipping due to no data from provider."),
        Outcome::Rejected(_) => {
            for reason in &result.reasons {
                println!("  - {reason}");
            }
        }
    }
}

pub(crate) fn summary(report: &ScreeningReport) {
    println!("\n{}", "=".repeat(30));
    println!("SCREENING COMPLETE");
    println!("{}", "=".repeat(30));

    let qualified: Vec<&Symbol> = report.qualified().collect();
    if qualified.is_empty() {
        println!(
            "\nNo stocks passed all criteria ({} screened, {} without data).",
            report.len(),
            report.count(Outcome::Unavailable)
        );
        return;
    }

    println!("\n{} stocks passed all criteria:", qualified.len());
    for symbol in qualified {
        println!("- {symbol}");
    }
}

pub(crate) fn disclaimer() {
    println!("\nDisclaimer: financial data for Indian stocks can be incomplete or delayed.");
    println!("Always cross-verify with official sources before making investment decisions.");
    println!("This tool is for educational purposes and is not financial advice.");
}

pub(crate) fn growth_table(records: &[GrowthRecord]) {
    println!("\nFound {} stocks that doubled:", records.len());
    println!(
        "{:<16} {:>10} {:>12} {:>10} {:>15}",
        "Symbol", "Growth %", "Start Price", "End Price", "3M Avg Volume"
    );
    for record in records {
        println!(
            "{:<16} {:>10.2} {:>12.2} {:>10.2} {:>15}",
            record.symbol.as_str(),
            record.growth_pct,
            record.start_price,
            record.end_price,
            group_thousands(record.avg_volume)
        );
    }
}

pub(crate) fn gaps(top: usize, gaps: &[PriceGap]) {
    println!("Top {top} percentage differences:");
    for gap in gaps {
        println!(
            "Percentage difference between {} and {}: {}%",
            gap.higher, gap.lower, gap.gap_pct
        );
    }
}
