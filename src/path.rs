//! Path addressing into parsed JSON values.
//!
//! A path is an ordered sequence of member keys and array indices.
//! Resolution never fails: a segment that has nothing to address
//! short-circuits the whole walk to absence.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

static INDEX_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A\[(\d+)\]\z").unwrap());

/// One step in a path: an object member name or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    /// Parse a literal segment. `[N]` addresses array index N; any other
    /// text is a member key.
    pub fn parse(text: &str) -> Self {
        if let Some(caps) = INDEX_SEGMENT.captures(text) {
            if let Ok(index) = caps[1].parse() {
                return PathSegment::Index(index);
            }
        }
        PathSegment::Key(text.to_string())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// An ordered sequence of segments locating a value inside a JSON
/// structure. An empty path addresses the whole current region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The empty path, which resolves to the current region itself.
    pub fn empty() -> Self {
        Path::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Path {
            segments: segments
                .into_iter()
                .map(|s| PathSegment::parse(s.as_ref()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Walk `root` left to right. Absence (`None`) is distinct from a
    /// present null (`Some(Value::Null)`): a missing member, an index out
    /// of bounds, or a segment applied to the wrong shape all yield
    /// absence for the rest of the walk.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.segments {
            current = match segment {
                PathSegment::Key(key) => current.as_object()?.get(key)?,
                PathSegment::Index(index) => current.as_array()?.get(*index)?,
            };
        }
        Some(current)
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    /// Parse a dotted literal, e.g. `"status.statusCode"` or
    /// `"shipments.[0]"`. The empty literal is the empty path.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Ok(Path::empty());
        }
        Ok(Path::from_segments(text.split('.')))
    }
}

impl<S: AsRef<str>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Path::from_segments(iter)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keyed_resolution() {
        let doc = json!({"status": {"statusCode": "transit"}});
        let path = Path::from_segments(["status", "statusCode"]);
        assert_eq!(path.resolve(&doc), Some(&json!("transit")));
    }

    #[test]
    fn test_indexed_resolution() {
        let doc = json!({"shipments": [{"id": "a"}, {"id": "b"}]});
        let path = Path::from_segments(["shipments", "[1]", "id"]);
        assert_eq!(path.resolve(&doc), Some(&json!("b")));
    }

    #[test]
    fn test_absent_member_short_circuits() {
        let doc = json!({"a": null});
        let path = Path::from_segments(["a", "b", "c"]);
        assert_eq!(path.resolve(&doc), None);
    }

    #[test]
    fn test_present_null_is_not_absence() {
        let doc = json!({"a": null});
        let path = Path::from_segments(["a"]);
        assert_eq!(path.resolve(&doc), Some(&Value::Null));
    }

    #[test]
    fn test_index_out_of_bounds_is_absent() {
        let doc = json!({"items": [1]});
        let path = Path::from_segments(["items", "[4]"]);
        assert_eq!(path.resolve(&doc), None);
    }

    #[test]
    fn test_wrong_shape_is_absent() {
        let doc = json!({"items": {"0": "x"}});
        assert_eq!(Path::from_segments(["items", "[0]"]).resolve(&doc), None);
        assert_eq!(Path::from_segments(["items", "x", "y"]).resolve(&doc), None);
    }

    #[test]
    fn test_empty_path_is_identity() {
        let doc = json!({"a": 1});
        assert_eq!(Path::empty().resolve(&doc), Some(&doc));
    }

    #[test]
    fn test_dotted_literal() {
        let path: Path = "location.address.addressLocality".parse().unwrap();
        assert_eq!(path.segments().len(), 3);
        let indexed: Path = "shipments.[0]".parse().unwrap();
        assert_eq!(
            indexed.segments(),
            &[
                PathSegment::Key("shipments".into()),
                PathSegment::Index(0)
            ]
        );
    }

    #[test]
    fn test_display_round_trip() {
        let path: Path = "shipments.[0].status".parse().unwrap();
        assert_eq!(path.to_string(), "shipments.[0].status");
    }
}
