use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::versiondb::error::{FetchError, LoadError, QueryError};
use crate::versiondb::grammar::{ApiLine, parse_line};
use crate::versiondb::source::ApiSource;
use crate::versiondb::version::VersionTag;

/// Release data of one package or symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymbolInfo {
    pub since: VersionTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<VersionTag>,
}

impl SymbolInfo {
    fn introduced(since: VersionTag) -> Self {
        Self {
            since,
            deprecated: None,
        }
    }
}

/// Result of a leaf name search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// `net/http` for a package, `net/http Client.Get` for a symbol.
    pub name: String,
    #[serde(flatten)]
    pub info: SymbolInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexEntry {
    name: String,
    package: String,
    symbol: String,
}

/// Lowercased symbol name to release data, `""` being the package itself
type PackageTable = IndexMap<String, SymbolInfo>;

/// Release data of every package and symbol of the Go api files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionDb {
    packages: IndexMap<String, PackageTable>,
    index: HashMap<String, Vec<IndexEntry>>,
}

impl VersionDb {
    /// Reads `go1`, then `go1.1`, `go1.2`... until the source reports the end
    /// of the series. Any other failure aborts the whole load.
    pub async fn load(source: &dyn ApiSource) -> Result<Self, LoadError> {
        let mut db = Self::default();
        let mut version = VersionTag::BASE;

        loop {
            match source.fetch(version).await {
                Ok(data) => {
                    db.ingest(version, &String::from_utf8_lossy(&data))?;
                    version = version.next();
                }
                Err(FetchError::EndOfSeries) if version == VersionTag::BASE => {
                    return Err(LoadError::MissingBaseVersion);
                }
                Err(FetchError::EndOfSeries) => break,
                Err(source) => return Err(LoadError::Fetch { version, source }),
            }
        }

        info!(
            "Loaded {} releases: {} packages, {} symbols",
            version.minor_number(),
            db.package_count(),
            db.symbol_count()
        );
        Ok(db)
    }

    /// Looks up lowercased names, `symbol` being empty for the package itself.
    pub fn since(&self, package: &str, symbol: &str) -> Result<SymbolInfo, QueryError> {
        let table = self
            .packages
            .get(package)
            .ok_or_else(|| QueryError::UnknownPackage(package.to_string()))?;

        table
            .get(symbol)
            .copied()
            .ok_or_else(|| QueryError::UnknownSymbol {
                package: package.to_string(),
                symbol: symbol.to_string(),
            })
    }

    /// Every package and symbol whose lowercased leaf name is `leaf`, in
    /// the order they were introduced.
    pub fn search(&self, leaf: &str) -> Vec<SearchHit> {
        let Some(entries) = self.index.get(leaf) else {
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|entry| {
                let info = self.packages.get(&entry.package)?.get(&entry.symbol)?;
                Some(SearchHit {
                    name: entry.name.clone(),
                    info: *info,
                })
            })
            .collect()
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Number of symbols, package entries excluded.
    pub fn symbol_count(&self) -> usize {
        self.packages.values().map(|table| table.len() - 1).sum()
    }

    pub(crate) fn ingest(&mut self, version: VersionTag, text: &str) -> Result<(), LoadError> {
        debug!("Parsing {} api file", version);

        for (line_num, line) in text.lines().enumerate() {
            let parsed = parse_line(line).map_err(|source| LoadError::Grammar {
                version,
                line: line_num + 1,
                source,
            })?;

            if let Some(api_line) = parsed {
                self.register(version, api_line);
            }
        }

        Ok(())
    }

    fn register(&mut self, version: VersionTag, line: ApiLine) {
        let package_key = line.package.to_lowercase();
        let symbol_key = line.symbol.to_lowercase();

        if line.deprecated {
            self.deprecate(version, &package_key, &symbol_key);
            return;
        }

        if !self.packages.contains_key(&package_key) {
            let table = IndexMap::from([(String::new(), SymbolInfo::introduced(version))]);
            self.packages.insert(package_key.clone(), table);
            self.add_index_entry(
                leaf(&package_key, '/'),
                line.package.clone(),
                &package_key,
                "",
            );
        }

        let Some(table) = self.packages.get_mut(&package_key) else {
            return;
        };
        if table.contains_key(&symbol_key) {
            return;
        }
        table.insert(symbol_key.clone(), SymbolInfo::introduced(version));

        self.add_index_entry(
            leaf(&symbol_key, '.'),
            format!("{} {}", line.package, line.symbol),
            &package_key,
            &symbol_key,
        );
    }

    /// Only an already known symbol can be deprecated, and only once.
    fn deprecate(&mut self, version: VersionTag, package: &str, symbol: &str) {
        let known = self
            .packages
            .get_mut(package)
            .and_then(|table| table.get_mut(symbol));

        match known {
            Some(info) if info.deprecated.is_none() => info.deprecated = Some(version),
            Some(_) => {}
            None => warn!(
                "Ignoring deprecation of unknown symbol {} {} in {}",
                package, symbol, version
            ),
        }
    }

    fn add_index_entry(&mut self, key: &str, name: String, package: &str, symbol: &str) {
        self.index
            .entry(key.to_string())
            .or_default()
            .push(IndexEntry {
                name,
                package: package.to_string(),
                symbol: symbol.to_string(),
            });
    }
}

fn leaf(name: &str, separator: char) -> &str {
    name.rsplit(separator).next().unwrap_or(name)
}
