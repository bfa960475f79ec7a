//! Go release identifiers

use std::fmt;

use serde::Serialize;

/// A Go release tag: `go1` for the base release, `go1.N` for later minors.
///
/// Ordering follows the minor number, which is also the order the api
/// files are loaded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct VersionTag {
    minor: u32,
}

impl VersionTag {
    /// The `go1` release, whose api file must always exist.
    pub const BASE: VersionTag = VersionTag { minor: 0 };

    pub fn minor(minor: u32) -> Self {
        Self { minor }
    }

    pub fn minor_number(&self) -> u32 {
        self.minor
    }

    /// The tag following this one in the series.
    pub fn next(&self) -> Self {
        Self {
            minor: self.minor + 1,
        }
    }

    /// Name of the api file describing this release (`go1.txt`, `go1.N.txt`).
    pub fn file_name(&self) -> String {
        format!("{self}.txt")
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minor == 0 {
            f.write_str("go1")
        } else {
            write!(f, "go1.{}", self.minor)
        }
    }
}

impl From<VersionTag> for String {
    fn from(tag: VersionTag) -> Self {
        tag.to_string()
    }
}
