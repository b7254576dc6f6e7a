use encoding::percent::{self, escape};
use std::{fmt, str::FromStr};

use crate::error::frame::FrameError;

/// Decoded `name=value` pairs of a query string or form body, in wire order.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

/// Path part of a url. Components are kept exactly as written so a request
/// target can be reproduced byte for byte.
#[derive(Debug, PartialEq, Clone)]
pub struct Path {
    pub raw_path: String,
    pub raw_query: Option<String>,
    pub raw_fragment: Option<String>,
}

impl Query {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", escape(key), escape(value))?;
        }
        Ok(())
    }
}

impl FromStr for Query {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut query = Query::default();

        for entry in s.split('&').filter(|e| !e.is_empty()) {
            let (key, value) = entry.split_once('=').unwrap_or((entry, ""));
            query
                .pairs
                .push((percent::unescape(key)?, percent::unescape(value)?));
        }

        Ok(query)
    }
}

impl Path {
    /// Request target as written on a request line: path plus query, never the fragment.
    pub fn target(&self) -> String {
        let mut res = self.raw_path.clone();
        if let Some(query) = &self.raw_query {
            res.push('?');
            res.push_str(query);
        }
        res
    }

    pub fn query(&self) -> Result<Query, FrameError> {
        match &self.raw_query {
            Some(raw) => Query::from_str(raw),
            None => Ok(Query::default()),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.target())?;
        if let Some(fragment) = &self.raw_fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut path = Path::default();

        let mut raw = s;
        if let Some((r, f)) = s.split_once('#') {
            if !f.is_empty() {
                path.raw_fragment = Some(f.to_string());
            }
            raw = r
        }

        match raw.split_once('?') {
            None => path.raw_path = raw.to_string(),
            Some((raw_path, raw_query)) => {
                path.raw_path = raw_path.to_string();
                path.raw_query = Some(raw_query.to_string());
            }
        }

        if path.raw_path.is_empty() {
            path.raw_path.push('/');
        }
        if !path.raw_path.starts_with('/') {
            return Err(FrameError::Invalid {
                subject: "path",
                reason: "path should start with '/'",
            });
        }
        Ok(path)
    }
}

impl Default for Path {
    fn default() -> Self {
        Self {
            raw_path: "/".to_string(),
            raw_query: None,
            raw_fragment: None,
        }
    }
}
