//! Helpers over raw header lines (`Name: value`), kept verbatim and in order.

use tracing::trace;

/// Name part of a header line, `None` for a line without a colon.
pub fn name(line: &str) -> Option<&str> {
    line.split_once(':').map(|(name, _)| name.trim())
}

pub fn value(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, value)| value.trim())
}

/// Header names compare case-insensitively.
pub fn is_named(line: &str, wanted: &str) -> bool {
    matches!(name(line), Some(n) if n.eq_ignore_ascii_case(wanted.trim()))
}

/// Value of the first header called `name`.
pub fn find<'a, S: AsRef<str>>(headers: &'a [S], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .map(|h| h.as_ref())
        .find(|line| is_named(line, name))
        .and_then(value)
}

/// Replaces the first header called `name` in place, or appends one.
pub fn set(headers: &mut Vec<String>, name: &str, value: &str) {
    let line = format!("{}: {}", name, value);
    match headers.iter_mut().find(|h| is_named(h, name)) {
        Some(existing) => *existing = line,
        None => headers.push(line),
    }
}

/// Replaces the first header sharing the name of `line`, or appends it.
pub fn set_line(headers: &mut Vec<String>, line: &str) {
    let existing = name(line).and_then(|n| headers.iter_mut().find(|h| is_named(h, n)));
    match existing {
        Some(existing) => *existing = line.to_string(),
        None => headers.push(line.to_string()),
    }
}

/// Keeps the `original` headers not named by any of `overrides`, then
/// appends `overrides`.
pub fn merge<S: AsRef<str>>(original: &[String], overrides: &[S]) -> Vec<String> {
    let ignored: Vec<&str> = overrides
        .iter()
        .filter_map(|line| name(line.as_ref()))
        .collect();

    let mut res: Vec<String> = original
        .iter()
        .filter(|line| {
            let replaced = ignored.iter().any(|n| is_named(line, n));
            if replaced {
                trace!(header = line.as_str(), "dropping overridden header");
            }
            !replaced
        })
        .cloned()
        .collect();

    res.extend(overrides.iter().map(|line| line.as_ref().to_string()));
    res
}

/// A header line the builder is willing to carry: one line, bounded length.
pub fn is_valid(line: &str, max_size: usize) -> bool {
    !line.is_empty() && line.len() <= max_size && !line.contains(['\r', '\n'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Host: example.com", Some("Host"), Some("example.com"))]
    #[case("X-Empty:", Some("X-Empty"), Some(""))]
    #[case("Referer: http://a/b", Some("Referer"), Some("http://a/b"))]
    #[case("GET / HTTP/1.1", None, None)]
    fn test_header_parts(#[case] line: &str, #[case] n: Option<&str>, #[case] v: Option<&str>) {
        assert_eq!(name(line), n);
        assert_eq!(value(line), v);
    }

    #[rstest]
    #[case("Host: a", "host", true)]
    #[case("HOST: a", "Host", true)]
    #[case("Hostname: a", "Host", false)]
    #[case("X-Host: a", "Host", false)]
    fn test_is_named(#[case] line: &str, #[case] wanted: &str, #[case] expected: bool) {
        assert_eq!(is_named(line, wanted), expected);
    }

    #[test]
    fn test_merge_overrides_keep_order() {
        let original = vec![
            "Cookie: a=b".to_string(),
            "Host: example.com".to_string(),
            "Accept: */*".to_string(),
            "Hostname: keep".to_string(),
        ];
        let merged = merge(&original, &["host: new.example.com", "X-Token: 1"]);
        assert_eq!(
            merged,
            vec![
                "Cookie: a=b",
                "Accept: */*",
                "Hostname: keep",
                "host: new.example.com",
                "X-Token: 1",
            ]
        );
    }

    #[test]
    fn test_set_replaces_first() {
        let mut headers = vec!["Content-Length: 3".to_string(), "Accept: */*".to_string()];
        set(&mut headers, "Content-Length", "10");
        set(&mut headers, "Content-Type", "text/plain");
        assert_eq!(
            headers,
            vec!["Content-Length: 10", "Accept: */*", "Content-Type: text/plain"]
        );
        assert_eq!(find(&headers, "content-length"), Some("10"));
    }

    #[rstest]
    #[case("X-A: 1", true)]
    #[case("", false)]
    #[case("X-A: 1\r\nX-B: 2", false)]
    fn test_is_valid(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_valid(line, 64), expected);
    }
}
