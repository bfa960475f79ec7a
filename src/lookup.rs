//! Resolution of user queries against a [`VersionDb`]
//!
//! An exact `package symbol` lookup is tried first. When it fails, the leaf
//! name of what was asked is searched across every package instead.

use crate::versiondb::{QueryError, SearchHit, SymbolInfo, VersionDb};

/// Normalized `package` / `symbol` pair, `symbol` empty for a package query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub package: String,
    pub symbol: String,
}

impl Query {
    /// Accepts `<pkg>`, `<sym>`, `<pkg>.<sym>[.<member>]` as a single argument
    /// or `<pkg> <sym>[.<member>]` as two.
    pub fn parse(first: &str, second: Option<&str>) -> Self {
        let (package, symbol) = match second {
            Some(symbol) => (first, symbol),
            None => first.split_once('.').unwrap_or((first, "")),
        };

        Self {
            package: package.to_lowercase(),
            symbol: symbol.to_lowercase(),
        }
    }

    /// Leaf name to search when the exact lookup failed with `error`.
    pub fn fallback_key(&self, error: &QueryError) -> &str {
        match error {
            QueryError::UnknownPackage(_) if self.symbol.is_empty() => {
                self.package.rsplit('/').next().unwrap_or(&self.package)
            }
            _ => self.symbol.rsplit('.').next().unwrap_or(&self.symbol),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Exact(SymbolInfo),
    /// Leaf name matches, at least one.
    Matches(Vec<SearchHit>),
    NotFound(QueryError),
}

pub fn resolve(db: &VersionDb, query: &Query) -> Lookup {
    let error = match db.since(&query.package, &query.symbol) {
        Ok(info) => return Lookup::Exact(info),
        Err(error) => error,
    };

    let hits = db.search(query.fallback_key(&error));
    if hits.is_empty() {
        Lookup::NotFound(error)
    } else {
        Lookup::Matches(hits)
    }
}
