//! Api file line grammar
//!
//! Each significant line of a Go api file has the shape
//! `pkg <package>, <kind> <declaration>[ //deprecated]`, for example:
//!
//! ```text
//! pkg net/http, func Get(string) (*Response, error)
//! pkg net/http, method (*Client) Get(string) (*Response, error)
//! pkg io, type Reader interface, Read([]byte) (int, error)
//! pkg reflect, type SliceHeader //deprecated
//! ```
//!
//! Lines starting with `#` are comments and a trailing `#...` is dropped.

use crate::versiondb::error::GrammarError;
use crate::versiondb::split::{Node, split};

const PACKAGE_PREFIX: &str = "pkg ";
const DEPRECATED_SUFFIX: &str = "//deprecated";

/// Declaration category of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Const,
    Var,
    Func,
    Method,
    Type,
    /// Field or method of a struct or interface type, named `Type.Member`.
    Member,
}

/// Structured content of one api line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiLine {
    /// Package path without any platform qualifier.
    pub package: String,
    /// Canonical symbol name in its original casing.
    pub symbol: String,
    pub kind: SymbolKind,
    pub deprecated: bool,
}

/// Parses one line, returning `None` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<ApiLine>, GrammarError> {
    let line = strip_comment(line).trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (line, deprecated) = match line.strip_suffix(DEPRECATED_SUFFIX) {
        Some(rest) => (rest.trim_end(), true),
        None => (line, false),
    };

    let line = line
        .strip_prefix(PACKAGE_PREFIX)
        .ok_or(GrammarError::MalformedLinePrefix)?;
    let (package, description) = line
        .split_once(',')
        .ok_or(GrammarError::MissingFieldSeparator)?;

    let fields = split(description.trim())?;
    let (symbol, kind) = parse_symbol(&fields.primary, &fields.secondary)?;

    Ok(Some(ApiLine {
        package: without_platform(package.trim()).to_string(),
        symbol,
        kind,
        deprecated,
    }))
}

fn parse_symbol(
    primary: &[Node],
    secondary: &[Node],
) -> Result<(String, SymbolKind), GrammarError> {
    let kind = primary.first().and_then(Node::as_atom).unwrap_or_default();

    match kind {
        "const" => Ok((name_at(primary, 1)?.to_string(), SymbolKind::Const)),
        "var" => Ok((name_at(primary, 1)?.to_string(), SymbolKind::Var)),
        "func" => Ok((name_at(primary, 1)?.to_string(), SymbolKind::Func)),
        "method" => {
            let receiver = primary
                .get(1)
                .and_then(Node::as_group)
                .ok_or(GrammarError::EmptyReceiver)?;
            let receiver_name = receiver
                .first()
                .and_then(Node::as_atom)
                .map(|name| without_generic(name.trim_start_matches('*')))
                .filter(|name| !name.is_empty())
                .ok_or(GrammarError::EmptyReceiverName)?;
            let method_name = primary
                .get(2)
                .and_then(Node::as_atom)
                .map(without_generic)
                .filter(|name| !name.is_empty())
                .ok_or(GrammarError::EmptyMethodName)?;

            Ok((format!("{receiver_name}.{method_name}"), SymbolKind::Method))
        }
        "type" => {
            let type_name = name_at(primary, 1)?;
            match member_name(secondary)? {
                Some(member) => Ok((format!("{type_name}.{member}"), SymbolKind::Member)),
                None => Ok((type_name.to_string(), SymbolKind::Type)),
            }
        }
        other => Err(GrammarError::UnknownSymbolKind(other.to_string())),
    }
}

fn name_at(primary: &[Node], index: usize) -> Result<&str, GrammarError> {
    primary
        .get(index)
        .and_then(Node::as_atom)
        .map(without_generic)
        .filter(|name| !name.is_empty())
        .ok_or(GrammarError::EmptyName)
}

/// Member introduced by the secondary fields of a type line, if any.
///
/// `unexported methods` names no member; `embedded pkg.T` names `T`.
fn member_name(secondary: &[Node]) -> Result<Option<&str>, GrammarError> {
    let Some(first) = secondary.first() else {
        return Ok(None);
    };

    let name = match (first.as_atom(), secondary.get(1).and_then(Node::as_atom)) {
        (Some("unexported"), Some("methods")) => return Ok(None),
        (Some("embedded"), embedded) => embedded.map(|name| {
            let name = without_generic(name.trim_start_matches('*'));
            name.rsplit('.').next().unwrap_or(name)
        }),
        (name, _) => name,
    };

    name.filter(|name| !name.is_empty())
        .map(Some)
        .ok_or(GrammarError::EmptySubName)
}

fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    bytes
        .iter()
        .enumerate()
        .find(|&(i, &b)| b == b'#' && (i == 0 || bytes[i - 1] != b'\\'))
        .map_or(line, |(i, _)| &line[..i])
}

/// `Clone[S ~[]E, E any]` -> `Clone`
fn without_generic(name: &str) -> &str {
    name.split_once('[').map_or(name, |(base, _)| base)
}

/// `syscall (darwin-386)` -> `syscall`
fn without_platform(package: &str) -> &str {
    package
        .split_once(" (")
        .map_or(package, |(base, _)| base.trim_end())
}
