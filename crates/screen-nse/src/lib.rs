#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! NSE symbol sources.
//!
//! # Example
//!
//! ```no_run
//! use screen_nse::{UniverseSource, resolve_universe};
//!
//! # async fn example() -> screen_core::Result<()> {
//! let source = UniverseSource::File("nifty_500_constituents.csv".into());
//! let symbols = resolve_universe(&source, Some(".NS")).await?;
//! println!("{} symbols, first: {:?}", symbols.len(), symbols.first());
//! # Ok(())
//! # }
//! ```

mod constituents;
mod listing;
mod table;

use std::path::PathBuf;

use screen_core::{DataError, Result, Symbol, UniverseProvider};
use tracing::info;

pub use constituents::{ConstituentsFile, DEFAULT_CONSTITUENTS_FILE};
pub use listing::{EQUITY_LISTING_URL, NseEquityListing};
pub use table::{SYMBOL_COLUMNS, count_rows, prepare_for_lookup, symbols_from_table};

/// Default market qualifier appended before provider lookups.
pub const NSE_SUFFIX: &str = ".NS";

/// Where a symbol universe comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UniverseSource {
    /// A local constituents CSV.
    File(PathBuf),
    /// A listing CSV served over HTTP.
    Remote(String),
}

impl UniverseSource {
    /// The provider that loads this source.
    #[must_use]
    pub fn provider(&self) -> Box<dyn UniverseProvider> {
        match self {
            Self::File(path) => Box::new(ConstituentsFile::new(path)),
            Self::Remote(url) => Box::new(NseEquityListing::with_url(url.clone())),
        }
    }
}

/// Resolves a source into a deduplicated, ascending list of symbols.
///
/// When `market_suffix` is given it is appended to every symbol before
/// deduplication. Fails with [`DataError::SourceUnavailable`] when the source
/// cannot be read, has no symbol column, or yields no usable symbol.
pub async fn resolve_universe(
    source: &UniverseSource,
    market_suffix: Option<&str>,
) -> Result<Vec<Symbol>> {
    let provider = source.provider();
    let raw = provider.universe().await?;
    let raw_count = raw.len();
    let symbols = prepare_for_lookup(raw, market_suffix);

    if symbols.is_empty() {
        return Err(DataError::source_unavailable(
            provider.source_name(),
            "the symbol column contained no usable symbols",
        ));
    }

    info!(
        raw = raw_count,
        unique = symbols.len(),
        source = provider.source_name(),
        "Resolved symbol universe"
    );
    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_resolve_universe_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Symbol,Series").unwrap();
        writeln!(file, "wipro,EQ").unwrap();
        writeln!(file, "INFY,EQ").unwrap();
        writeln!(file, "WIPRO,EQ").unwrap();

        let source = UniverseSource::File(file.path().to_path_buf());
        let symbols = resolve_universe(&source, Some(NSE_SUFFIX)).await.unwrap();

        assert_eq!(symbols, vec![Symbol::new("INFY.NS"), Symbol::new("WIPRO.NS")]);
    }

    #[tokio::test]
    async fn test_resolve_universe_from_listing() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/EQUITY_L.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "SYMBOL,NAME OF COMPANY, SERIES\n\
                 TCS,Tata Consultancy Services Limited,EQ\n\
                 abb,ABB India Limited,EQ\n\
                 TCS,Tata Consultancy Services Limited,EQ\n",
            ))
            .mount(&server)
            .await;

        let source = UniverseSource::Remote(format!("{}/EQUITY_L.csv", server.uri()));
        let symbols = resolve_universe(&source, Some(NSE_SUFFIX)).await.unwrap();

        assert_eq!(symbols, vec![Symbol::new("ABB.NS"), Symbol::new("TCS.NS")]);
    }

    #[tokio::test]
    async fn test_resolve_universe_empty_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Symbol").unwrap();
        writeln!(file, "nan").unwrap();

        let source = UniverseSource::File(file.path().to_path_buf());
        let err = resolve_universe(&source, None).await.unwrap_err();
        assert!(matches!(err, DataError::SourceUnavailable { .. }));
    }
}
