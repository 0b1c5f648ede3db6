//! Supported database dialects
//!
//! The registry is fixed at compile time. Every dialect ships its own
//! bootstrap and upgrade scripts, and the order of [`Dialect::ALL`] is the
//! order in which a bump processes them.

use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A database product the schema scripts are maintained for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Db2,
    H2,
    MariaDb,
    MsSql,
    MySql,
    Oracle,
    Postgres,
}

impl Dialect {
    /// Every supported dialect, in processing order
    pub const ALL: [Dialect; 7] = [
        Dialect::Db2,
        Dialect::H2,
        Dialect::MariaDb,
        Dialect::MsSql,
        Dialect::MySql,
        Dialect::Oracle,
        Dialect::Postgres,
    ];

    /// Identifier used in file names
    pub const fn as_str(self) -> &'static str {
        match self {
            Dialect::Db2 => "db2",
            Dialect::H2 => "h2",
            Dialect::MariaDb => "mariadb",
            Dialect::MsSql => "mssql",
            Dialect::MySql => "mysql",
            Dialect::Oracle => "oracle",
            Dialect::Postgres => "postgres",
        }
    }

    fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == name)
            .ok_or_else(|| CoreError::UnsupportedDialect {
                name: s.trim().to_string(),
                supported: Self::supported_list(),
            })
    }
}

/// A non-empty set of dialects, always iterated in registry order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialectSet(Vec<Dialect>);

impl DialectSet {
    /// All supported dialects
    pub fn all() -> Self {
        Self(Dialect::ALL.to_vec())
    }

    /// Build a set from individual dialects, dropping duplicates.
    ///
    /// Returns `EmptyDialectSet` if nothing is left.
    pub fn new(dialects: impl IntoIterator<Item = Dialect>) -> CoreResult<Self> {
        let mut dialects: Vec<Dialect> = dialects.into_iter().collect();
        dialects.sort();
        dialects.dedup();
        if dialects.is_empty() {
            return Err(CoreError::EmptyDialectSet);
        }
        Ok(Self(dialects))
    }

    /// Parse a comma-separated list such as `h2,postgres`.
    ///
    /// Blank entries are ignored; any unknown name fails the whole list.
    pub fn parse_list(list: &str) -> CoreResult<Self> {
        let dialects = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Dialect::from_str)
            .collect::<CoreResult<Vec<_>>>()?;
        Self::new(dialects)
    }

    pub fn iter(&self) -> impl Iterator<Item = Dialect> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no dialects; construction rejects empty sets
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, dialect: Dialect) -> bool {
        self.0.contains(&dialect)
    }
}

impl fmt::Display for DialectSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|d| d.as_str()).collect();
        f.write_str(&names.join(","))
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
