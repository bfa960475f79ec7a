use std::path::PathBuf;

use thiserror::Error;

use crate::versiondb::version::VersionTag;

/// Failure while splitting a declaration into fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("unexpected closing delimiter '{0}'")]
    UnexpectedClosingDelimiter(char),

    #[error("unterminated group, expected '{0}'")]
    UnterminatedGroup(char),

    #[error("unterminated literal, expected '{0}'")]
    UnterminatedLiteral(char),

    #[error("unexpected third field in definition")]
    UnexpectedThirdField,
}

/// Failure while reading one line of an api file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("line does not start with \"pkg \"")]
    MalformedLinePrefix,

    #[error("no comma after package path")]
    MissingFieldSeparator,

    #[error("unknown symbol kind {0:?}")]
    UnknownSymbolKind(String),

    #[error("missing symbol name")]
    EmptyName,

    #[error("missing method receiver")]
    EmptyReceiver,

    #[error("missing receiver type name")]
    EmptyReceiverName,

    #[error("missing method name")]
    EmptyMethodName,

    #[error("missing member name")]
    EmptySubName,

    #[error(transparent)]
    Split(#[from] SplitError),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The remote source has no file for the requested release.
    #[error("no such release")]
    EndOfSeries,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("can not retrieve {version} information: {source}")]
    Fetch {
        version: VersionTag,
        #[source]
        source: FetchError,
    },

    #[error("can not retrieve go1 information")]
    MissingBaseVersion,

    #[error("parsing failure in {version} line {line}: {source}")]
    Grammar {
        version: VersionTag,
        line: usize,
        #[source]
        source: GrammarError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("package not found: {0}")]
    UnknownPackage(String),

    #[error("symbol not found: {package} {symbol}")]
    UnknownSymbol { package: String, symbol: String },
}
