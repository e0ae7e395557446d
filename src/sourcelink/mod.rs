//! Source Link document mapping.
//!
//! A Source Link document is the JSON the compiler embeds into a PDB to map local
//! document paths onto the URLs their content can be downloaded from:
//!
//! ```json
//! {
//!   "documents": {
//!     "C:\\src\\project\\*": "https://raw.githubusercontent.com/org/project/0123abc/*",
//!     "C:\\src\\generated.cs": "https://example.com/generated.cs"
//!   }
//! }
//! ```
//!
//! A key ending in `*` is a prefix pattern whose matched remainder replaces the `*` of the
//! URI; any other key must match the whole path and maps to its URI unchanged. Matching
//! ignores ASCII case, and the longest pattern wins.
//!
//! # Examples
//!
//! ```rust
//! use pdbscope::sourcelink::{PatternMap, SourceLinkMap};
//!
//! let map = SourceLinkMap::parse(r#"{"documents":{"/src/*":"https://example.com/raw/*"}}"#)?;
//! assert_eq!(
//!     map.lookup("/src/app/Program Main.cs").as_deref(),
//!     Some("https://example.com/raw/app/Program%20Main.cs")
//! );
//! assert_eq!(map.lookup("/other/Program.cs"), None);
//! # Ok::<(), pdbscope::Error>(())
//! ```

use std::fmt::Write;

use serde::Deserialize;

use crate::{Error, Result};

/// Derives a download URI from a document name.
pub trait PatternMap {
    /// Returns the URI of `document_name`, `None` if no pattern matches.
    fn lookup(&self, document_name: &str) -> Option<String>;
}

/// One validated `documents` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLinkEntry {
    /// The path pattern without its trailing `*`
    pub path: String,
    /// `true` if the pattern ended in `*`
    pub is_prefix: bool,
    /// URI text before the `*`, or the whole URI of an exact pattern
    pub uri_prefix: String,
    /// URI text after the `*`, empty for exact patterns
    pub uri_suffix: String,
}

impl SourceLinkEntry {
    fn parse(path: &str, uri: &str) -> Result<SourceLinkEntry> {
        if path.is_empty() {
            return Err(Error::SourceLink("empty document path pattern".to_string()));
        }

        let (path, is_prefix) = match path.find('*') {
            Some(star) if star == path.len() - 1 => (&path[..star], true),
            Some(_) => {
                return Err(Error::SourceLink(format!(
                    "'*' is only allowed at the end of a path pattern - {path}"
                )))
            }
            None => (path, false),
        };

        let (uri_prefix, uri_suffix) = match uri.split_once('*') {
            Some((_, suffix)) if suffix.contains('*') => {
                return Err(Error::SourceLink(format!("URI holds more than one '*' - {uri}")))
            }
            Some(_) if !is_prefix => {
                return Err(Error::SourceLink(format!(
                    "URI of an exact path pattern must not hold '*' - {uri}"
                )))
            }
            Some((prefix, suffix)) => (prefix, suffix),
            None if is_prefix => {
                return Err(Error::SourceLink(format!(
                    "URI of a prefix path pattern must hold '*' - {uri}"
                )))
            }
            None => (uri, ""),
        };

        Ok(SourceLinkEntry {
            path: path.to_string(),
            is_prefix,
            uri_prefix: uri_prefix.to_string(),
            uri_suffix: uri_suffix.to_string(),
        })
    }

    fn apply(&self, document_name: &str) -> Option<String> {
        if !self.is_prefix {
            return document_name
                .eq_ignore_ascii_case(&self.path)
                .then(|| self.uri_prefix.clone());
        }

        let head = document_name.as_bytes().get(..self.path.len())?;
        if !head.eq_ignore_ascii_case(self.path.as_bytes()) {
            return None;
        }

        let remainder = document_name.get(self.path.len()..)?;
        let mut uri = self.uri_prefix.clone();
        escape_path(remainder, &mut uri);
        uri.push_str(&self.uri_suffix);
        Some(uri)
    }
}

#[derive(Deserialize)]
struct SourceLinkJson {
    #[serde(default)]
    documents: serde_json::Map<String, serde_json::Value>,
}

/// The parsed `documents` mapping of a Source Link document.
#[derive(Debug, Clone, Default)]
pub struct SourceLinkMap {
    entries: Vec<SourceLinkEntry>,
}

impl SourceLinkMap {
    /// Parses a Source Link JSON document.
    ///
    /// # Errors
    /// Returns [`crate::Error::SourceLink`] if `json` is not a JSON object, if its
    /// `documents` member is not an object of strings, or if a pattern breaks the
    /// wildcard rules. A missing `documents` member yields an empty map, and a comma
    /// before a closing `}` or `]` is accepted.
    pub fn parse(json: &str) -> Result<SourceLinkMap> {
        let document: SourceLinkJson = serde_json::from_str(&strip_trailing_commas(json))?;

        let mut entries = Vec::with_capacity(document.documents.len());
        for (path, uri) in &document.documents {
            let Some(uri) = uri.as_str() else {
                return Err(Error::SourceLink(format!("URI of '{path}' is not a string")));
            };
            entries.push(SourceLinkEntry::parse(path, uri)?);
        }

        // Stable, so equally long patterns keep document order
        entries.sort_by(|left, right| right.path.len().cmp(&left.path.len()));

        log::debug!("Source Link map with {} entries", entries.len());
        Ok(SourceLinkMap { entries })
    }

    /// The entries in match order.
    #[must_use]
    pub fn entries(&self) -> &[SourceLinkEntry] {
        &self.entries
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PatternMap for SourceLinkMap {
    fn lookup(&self, document_name: &str) -> Option<String> {
        if document_name.contains('*') {
            return None;
        }

        self.entries
            .iter()
            .find_map(|entry| entry.apply(document_name))
    }
}

/// Drops commas that directly precede a closing `}` or `]`, leaving string contents alone.
///
/// A comma right after an opening bracket or another comma is kept so that the JSON
/// parser still rejects it.
fn strip_trailing_commas(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut held_comma: Option<usize> = None;
    let mut last = None;
    let mut in_string = false;
    let mut escaped = false;

    for ch in json.chars() {
        if in_string {
            out.push(ch);
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            ',' if held_comma.is_none() && !matches!(last, None | Some('{' | '[')) => {
                held_comma = Some(out.len());
                last = Some(ch);
                continue;
            }
            '}' | ']' => held_comma = None,
            _ if ch.is_whitespace() => {
                out.push(ch);
                continue;
            }
            _ => {
                if let Some(at) = held_comma.take() {
                    out.insert(at, ',');
                }
                in_string = ch == '"';
            }
        }

        out.push(ch);
        last = Some(ch);
    }

    if let Some(at) = held_comma {
        out.insert(at, ',');
    }
    out
}

/// Percent-escapes every segment of `path`, splitting on both separators and joining
/// with `/`. Only RFC 3986 unreserved characters are kept.
fn escape_path(path: &str, out: &mut String) {
    for (index, segment) in path.split(['/', '\\']).enumerate() {
        if index > 0 {
            out.push('/');
        }

        for byte in segment.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
                out.push(char::from(byte));
            } else {
                // Writing to a String cannot fail
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(documents: &str) -> SourceLinkMap {
        SourceLinkMap::parse(&format!(r#"{{"documents":{documents}}}"#)).unwrap()
    }

    #[test]
    fn prefix_pattern() {
        let map = map(r#"{"C:\\src\\*":"https://raw.example.com/org/repo/abc/*"}"#);

        assert_eq!(
            map.lookup("C:\\src\\lib\\Parser.cs").as_deref(),
            Some("https://raw.example.com/org/repo/abc/lib/Parser.cs")
        );
        assert_eq!(map.lookup("D:\\src\\Parser.cs"), None);
    }

    #[test]
    fn suffix_after_star() {
        let map = map(r#"{"/build/*":"https://example.com/*?raw=true"}"#);

        assert_eq!(
            map.lookup("/build/a/b.cs").as_deref(),
            Some("https://example.com/a/b.cs?raw=true")
        );
    }

    #[test]
    fn longest_pattern_wins() {
        let map = map(
            r#"{
                "/src/*": "https://example.com/main/*",
                "/src/vendor/*": "https://example.com/vendor/*",
                "/src/vendor/lib.cs": "https://example.com/exact.cs"
            }"#,
        );

        assert_eq!(map.entries()[0].path, "/src/vendor/lib.cs");
        assert_eq!(
            map.lookup("/src/vendor/lib.cs").as_deref(),
            Some("https://example.com/exact.cs")
        );
        assert_eq!(
            map.lookup("/src/vendor/other.cs").as_deref(),
            Some("https://example.com/vendor/other.cs")
        );
        assert_eq!(
            map.lookup("/src/app.cs").as_deref(),
            Some("https://example.com/main/app.cs")
        );
    }

    #[test]
    fn equal_length_keeps_document_order() {
        let map = map(r#"{"/SRC/*":"https://first/*","/src/*":"https://second/*"}"#);

        assert_eq!(map.lookup("/src/a.cs").as_deref(), Some("https://first/a.cs"));
    }

    #[test]
    fn case_insensitive() {
        let map = map(r#"{"C:\\Src\\*":"https://example.com/*","C:\\Readme.md":"https://example.com/readme"}"#);

        assert_eq!(
            map.lookup("c:\\SRC\\Program.cs").as_deref(),
            Some("https://example.com/Program.cs")
        );
        assert_eq!(
            map.lookup("C:\\README.MD").as_deref(),
            Some("https://example.com/readme")
        );
    }

    #[test]
    fn escaping() {
        let map = map(r#"{"/src/*":"https://example.com/*"}"#);

        assert_eq!(
            map.lookup("/src/My Dir\\Ünïcode#1.cs").as_deref(),
            Some("https://example.com/My%20Dir/%C3%9Cn%C3%AFcode%231.cs")
        );
        assert_eq!(
            map.lookup("/src/a-b_c.d~e").as_deref(),
            Some("https://example.com/a-b_c.d~e")
        );
    }

    #[test]
    fn star_in_path_never_matches() {
        let map = map(r#"{"/src/*":"https://example.com/*"}"#);

        assert_eq!(map.lookup("/src/*.cs"), None);
    }

    #[test]
    fn empty_map() {
        let map = map("{}");

        assert!(map.is_empty());
        assert_eq!(map.lookup("/src/a.cs"), None);
        assert!(SourceLinkMap::default().lookup("a").is_none());
    }

    #[test]
    fn invalid_patterns() {
        for documents in [
            r#"{"/src/*/x":"https://example.com/*"}"#,
            r#"{"/src/*":"https://example.com/*/*"}"#,
            r#"{"/src/*":"https://example.com/"}"#,
            r#"{"/src/a.cs":"https://example.com/*"}"#,
            r#"{"":"https://example.com/"}"#,
            r#"{"/src/*":42}"#,
        ] {
            let json = format!(r#"{{"documents":{documents}}}"#);
            assert!(
                matches!(SourceLinkMap::parse(&json), Err(Error::SourceLink(_))),
                "accepted {documents}"
            );
        }
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(
            SourceLinkMap::parse("not json"),
            Err(Error::SourceLink(_))
        ));
        assert!(matches!(
            SourceLinkMap::parse(r#"{"documents":[]}"#),
            Err(Error::SourceLink(_))
        ));
    }

    #[test]
    fn missing_documents_is_empty() {
        for json in ["{}", r#"{"version":1}"#, r#"{"other":{}}"#] {
            let map = SourceLinkMap::parse(json).unwrap();
            assert!(map.entries().is_empty(), "{json}");
            assert_eq!(map.lookup("/src/a.cs"), None);
        }
    }

    #[test]
    fn trailing_commas() {
        let map = SourceLinkMap::parse(
            "{\"documents\":{\"/src/*\":\"https://x/*\",\n  },\t}",
        )
        .unwrap();
        assert_eq!(map.lookup("/src/a.cs").as_deref(), Some("https://x/a.cs"));

        // commas inside strings are data
        let map = SourceLinkMap::parse(r#"{"documents":{"/a,}/*":"https://x/,]/*",}}"#).unwrap();
        assert_eq!(map.lookup("/a,}/b").as_deref(), Some("https://x/,]/b"));

        assert_eq!(
            strip_trailing_commas(r#"{"a":[1,2 , ],"b":"\",}",}"#),
            r#"{"a":[1,2  ],"b":"\",}"}"#
        );
        assert!(matches!(
            SourceLinkMap::parse(r#"{"documents":{,}}"#),
            Err(Error::SourceLink(_))
        ));
    }

    #[test]
    fn extra_members_ignored() {
        let map = SourceLinkMap::parse(
            r#"{"version":1,"documents":{"/src/*":"https://example.com/*"}}"#,
        )
        .unwrap();

        assert_eq!(map.entries().len(), 1);
    }
}
