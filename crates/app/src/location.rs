//! Navigation locations: `#/path?query` strings.

use std::collections::BTreeMap;

/// A parsed navigation target.
///
/// Routing only looks at `path`; views read `query` themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: BTreeMap<String, String>,
}

impl Location {
    /// Parse `#/students/edit?id=7`, `/students/edit?id=7` or `students`.
    ///
    /// An empty location is `/`. Trailing slashes are dropped (`/students/`
    /// routes like `/students`).
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        let (path, query) = raw.split_once('?').unwrap_or((raw, ""));

        let trimmed = path.trim_matches('/');
        let path = format!("/{trimmed}");

        let query = query
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(k), decode(v))
            })
            .collect();

        Self { path, query }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.path)?;
        let mut sep = '?';
        for (k, v) in &self.query {
            write!(f, "{sep}{}={}", urlencoding::encode(k), urlencoding::encode(v))?;
            sep = '&';
        }
        Ok(())
    }
}

fn decode(s: &str) -> String {
    urlencoding::decode(s)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| s.to_string())
}
