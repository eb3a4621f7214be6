//! Deep assignment into JSON values.
//!
//! Missing or non-container intermediates are replaced by a fresh container:
//! an array when the next segment is an index, an object otherwise.

use serde_json::{Map, Value};

/// Largest index written as an array slot. Bigger indexes are treated as
/// object keys so a single assignment cannot allocate an arbitrarily large
/// array.
pub const MAX_ARRAY_INDEX: usize = 65_535;

/// One step of a nested path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    fn empty_container(&self) -> Value {
        match self {
            PathSegment::Key(_) => Value::Object(Map::new()),
            PathSegment::Index(_) => Value::Array(Vec::new()),
        }
    }

    /// Turn indexes above [`MAX_ARRAY_INDEX`] into keys.
    fn bounded(&self) -> PathSegment {
        match self {
            PathSegment::Index(index) if *index > MAX_ARRAY_INDEX => {
                PathSegment::Key(index.to_string())
            }
            other => other.clone(),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Split `a.b[0].c` into segments.
///
/// Bracketed all-digit parts become indexes, and so do all-digit dotted parts
/// (`a.0`) as long as they do not exceed [`MAX_ARRAY_INDEX`]. Empty parts are
/// dropped.
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    for part in path.split('.') {
        let mut rest = part;
        if let Some(open) = rest.find('[') {
            push_part(&mut segments, &rest[..open]);
            rest = &rest[open..];
            while let Some(stripped) = rest.strip_prefix('[') {
                let Some(close) = stripped.find(']') else {
                    push_part(&mut segments, stripped);
                    rest = "";
                    break;
                };
                let inner = stripped[..close].trim_matches(&['"', '\''][..]);
                push_part(&mut segments, inner);
                rest = &stripped[close + 1..];
            }
            push_part(&mut segments, rest);
        } else {
            push_part(&mut segments, rest);
        }
    }
    segments
}

fn push_part(segments: &mut Vec<PathSegment>, part: &str) {
    if part.is_empty() {
        return;
    }
    if part.bytes().all(|b| b.is_ascii_digit())
        && let Ok(index) = part.parse::<usize>()
        && index <= MAX_ARRAY_INDEX
    {
        segments.push(PathSegment::Index(index));
        return;
    }
    segments.push(PathSegment::Key(part.to_string()));
}

/// Write `value` at `path` under `root`, creating intermediates as needed.
///
/// The last segment overwrites whatever was stored there. An empty path
/// replaces `root` itself. Indexes above [`MAX_ARRAY_INDEX`] are written as
/// object keys.
pub fn set_nested_field(root: &mut Value, path: &[PathSegment], value: Value) {
    let path: Vec<PathSegment> = path.iter().map(PathSegment::bounded).collect();
    let Some((last, parents)) = path.split_last() else {
        *root = value;
        return;
    };

    let mut current = root;
    for (pos, segment) in parents.iter().enumerate() {
        let next = path.get(pos + 1).unwrap_or(last);
        current = child_slot(current, segment, next);
    }
    *slot(current, last) = value;
}

/// Return the slot for `segment`, coercing `current` into a fitting container
/// and the child into a container suited for `next`.
fn child_slot<'a>(
    current: &'a mut Value,
    segment: &PathSegment,
    next: &PathSegment,
) -> &'a mut Value {
    let child = slot(current, segment);
    let fits = match next {
        PathSegment::Key(_) => child.is_object(),
        PathSegment::Index(_) => child.is_array(),
    };
    if !fits {
        *child = next.empty_container();
    }
    child
}

fn slot<'a>(current: &'a mut Value, segment: &PathSegment) -> &'a mut Value {
    let fits = match segment {
        PathSegment::Key(_) => current.is_object(),
        PathSegment::Index(_) => current.is_array(),
    };
    if !fits {
        *current = segment.empty_container();
    }
    match (current, segment) {
        (Value::Object(map), PathSegment::Key(key)) => {
            map.entry(key.clone()).or_insert(Value::Null)
        }
        (Value::Array(items), PathSegment::Index(index)) => {
            if items.len() <= *index {
                items.resize(*index + 1, Value::Null);
            }
            &mut items[*index]
        }
        _ => unreachable!("container was coerced to match the segment"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_path_handles_dots_and_brackets() {
        assert_eq!(
            parse_path("a.b[0].c"),
            vec![
                PathSegment::Key("a".into()),
                PathSegment::Key("b".into()),
                PathSegment::Index(0),
                PathSegment::Key("c".into()),
            ]
        );
        assert_eq!(
            parse_path("_JOVO_AUDIO_"),
            vec![PathSegment::Key("_JOVO_AUDIO_".into())]
        );
        assert_eq!(
            parse_path("a.1"),
            vec![PathSegment::Key("a".into()), PathSegment::Index(1)]
        );
        assert!(parse_path("").is_empty());
    }

    #[test]
    fn creates_missing_objects() {
        let mut root = json!({});
        set_nested_field(&mut root, &parse_path("a.b.c"), json!(1));
        assert_eq!(root, json!({ "a": { "b": { "c": 1 } } }));
    }

    #[test]
    fn creates_arrays_for_index_segments() {
        let mut root = json!({});
        set_nested_field(&mut root, &parse_path("list[2].name"), json!("x"));
        assert_eq!(root, json!({ "list": [null, null, { "name": "x" }] }));
    }

    #[test]
    fn overwrites_existing_value_and_keeps_siblings() {
        let mut root = json!({ "keep": true, "target": { "old": 1 } });
        set_nested_field(&mut root, &parse_path("target"), json!({ "new": 2 }));
        assert_eq!(root, json!({ "keep": true, "target": { "new": 2 } }));
    }

    #[test]
    fn replaces_scalar_intermediates() {
        let mut root = json!({ "a": "text" });
        set_nested_field(&mut root, &parse_path("a.b"), json!(3));
        assert_eq!(root, json!({ "a": { "b": 3 } }));
    }

    #[test]
    fn coerces_non_object_root() {
        let mut root = Value::Null;
        set_nested_field(&mut root, &parse_path("k"), json!("v"));
        assert_eq!(root, json!({ "k": "v" }));
    }

    #[test]
    fn oversized_index_is_written_as_key() {
        let mut root = json!({});
        set_nested_field(&mut root, &parse_path("a[18446744073709551615]"), json!(1));
        assert_eq!(root, json!({ "a": { "18446744073709551615": 1 } }));

        let mut root = json!({});
        set_nested_field(&mut root, &[PathSegment::Index(usize::MAX)], json!(2));
        assert_eq!(root, json!({ "18446744073709551615": 2 }));

        let mut root = json!({});
        set_nested_field(&mut root, &parse_path("list[65536]"), json!(3));
        assert_eq!(root, json!({ "list": { "65536": 3 } }));
    }

    #[test]
    fn index_at_limit_still_grows_array() {
        let mut root = json!({});
        set_nested_field(&mut root, &parse_path("list[65535]"), json!(true));
        let list = root["list"].as_array().unwrap();
        assert_eq!(list.len(), MAX_ARRAY_INDEX + 1);
        assert_eq!(list[MAX_ARRAY_INDEX], json!(true));
    }

    #[test]
    fn empty_path_replaces_root() {
        let mut root = json!({ "a": 1 });
        set_nested_field(&mut root, &[], json!([1, 2]));
        assert_eq!(root, json!([1, 2]));
    }
}
