//! JSON path parsing and in-process edit semantics.
//!
//! The dialect is the one SQLite JSON1 accepts: `$` for the root, `.key`
//! (optionally `."quoted key"`) for object steps, `[i]` for array steps.
//!
//! The edit functions mirror the JSON1 edit family so that [`MemoryStore`]
//! and [`SqliteStore`] agree:
//!
//! - insert never overwrites an existing location; replace never creates
//!   one; set does both;
//! - an array index at or past the end appends for insert/set;
//! - missing object keys along an insert/set path are created as nested
//!   objects; intermediate array positions are never fabricated;
//! - edits addressing a location of the wrong container kind are silent
//!   no-ops.
//!
//! [`MemoryStore`]: crate::memory::MemoryStore
//! [`SqliteStore`]: crate::sqlite::SqliteStore

use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};

/// One step of a parsed path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// A parsed JSON path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

impl JsonPath {
    /// Parse a `$`-rooted path.
    pub fn parse(raw: &str) -> StoreResult<Self> {
        let invalid = |reason: &str| StoreError::InvalidPath {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        let bytes = raw.as_bytes();
        if bytes.first() != Some(&b'$') {
            return Err(invalid("path must start with '$'"));
        }

        let mut segments = Vec::new();
        let mut i = 1;
        while i < raw.len() {
            match bytes[i] {
                b'.' => {
                    i += 1;
                    if i < raw.len() && bytes[i] == b'"' {
                        let start = i + 1;
                        let end = raw[start..]
                            .find('"')
                            .map(|off| start + off)
                            .ok_or_else(|| invalid("unterminated quoted key"))?;
                        if end == start {
                            return Err(invalid("empty object key"));
                        }
                        segments.push(Segment::Key(raw[start..end].to_string()));
                        i = end + 1;
                    } else {
                        let start = i;
                        while i < raw.len() && bytes[i] != b'.' && bytes[i] != b'[' {
                            i += 1;
                        }
                        if i == start {
                            return Err(invalid("empty object key"));
                        }
                        segments.push(Segment::Key(raw[start..i].to_string()));
                    }
                }
                b'[' => {
                    let start = i + 1;
                    let end = raw[start..]
                        .find(']')
                        .map(|off| start + off)
                        .ok_or_else(|| invalid("unterminated array index"))?;
                    let index: usize = raw[start..end]
                        .parse()
                        .map_err(|_| invalid("array index must be a non-negative integer"))?;
                    segments.push(Segment::Index(index));
                    i = end + 1;
                }
                _ => return Err(invalid("expected '.' or '[' after a path step")),
            }
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// `true` for the bare root path `$`.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

/// How an edit treats an existing or missing target location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditMode {
    /// Write only if the location does not exist.
    Insert,
    /// Write only if the location exists.
    Replace,
    /// Write unconditionally.
    Set,
}

/// Read the value at `path`, or `None` if the path matches nothing.
pub fn extract<'a>(doc: &'a Value, path: &JsonPath) -> Option<&'a Value> {
    let mut cur = doc;
    for seg in path.segments() {
        cur = match seg {
            Segment::Key(k) => cur.as_object()?.get(k)?,
            Segment::Index(i) => cur.as_array()?.get(*i)?,
        };
    }
    Some(cur)
}

/// Write `value` at `path` according to `mode`. Edits that cannot apply
/// leave the document untouched; callers detect no-ops by comparison.
pub fn edit(doc: &mut Value, path: &JsonPath, value: Value, mode: EditMode) {
    if path.is_root() {
        // The root always exists: insert is a no-op, replace and set
        // overwrite the whole document.
        if mode != EditMode::Insert {
            *doc = value;
        }
        return;
    }

    let Some((last, parents)) = path.segments().split_last() else {
        return;
    };
    let mut cur = doc;
    for seg in parents {
        match seg {
            Segment::Key(k) => match cur {
                Value::Object(map) => {
                    if !map.contains_key(k) {
                        if mode == EditMode::Replace {
                            return;
                        }
                        map.insert(k.clone(), Value::Object(Map::new()));
                    }
                    match map.get_mut(k) {
                        Some(next) => cur = next,
                        None => return,
                    }
                }
                _ => return,
            },
            Segment::Index(i) => match cur {
                Value::Array(arr) => match arr.get_mut(*i) {
                    Some(next) => cur = next,
                    None => return,
                },
                _ => return,
            },
        }
    }

    match last {
        Segment::Key(k) => {
            if let Value::Object(map) = cur {
                let exists = map.contains_key(k);
                let write = match mode {
                    EditMode::Insert => !exists,
                    EditMode::Replace => exists,
                    EditMode::Set => true,
                };
                if write {
                    map.insert(k.clone(), value);
                }
            }
        }
        Segment::Index(i) => {
            if let Value::Array(arr) = cur {
                if *i < arr.len() {
                    if mode != EditMode::Insert {
                        arr[*i] = value;
                    }
                } else if mode != EditMode::Replace {
                    // JSON1 appends when the index is at or past the end.
                    arr.push(value);
                }
            }
        }
    }
}

/// Delete the value at `path`. Removing the root is a no-op (the SQL
/// template's guard rejects it the same way).
pub fn remove(doc: &mut Value, path: &JsonPath) {
    let Some((last, parents)) = path.segments().split_last() else {
        return;
    };
    let mut cur = doc;
    for seg in parents {
        match seg {
            Segment::Key(k) => match cur {
                Value::Object(map) => match map.get_mut(k) {
                    Some(next) => cur = next,
                    None => return,
                },
                _ => return,
            },
            Segment::Index(i) => match cur {
                Value::Array(arr) => match arr.get_mut(*i) {
                    Some(next) => cur = next,
                    None => return,
                },
                _ => return,
            },
        }
    }
    match last {
        Segment::Key(k) => {
            if let Value::Object(map) = cur {
                map.remove(k);
            }
        }
        Segment::Index(i) => {
            if let Value::Array(arr) = cur {
                if *i < arr.len() {
                    arr.remove(*i);
                }
            }
        }
    }
}

/// RFC 7396 merge patch: objects merge recursively, null removes a key,
/// anything else replaces the target wholesale.
pub fn merge_patch(doc: &mut Value, patch: &Value) {
    match patch {
        Value::Object(patch_map) => {
            if !doc.is_object() {
                *doc = Value::Object(Map::new());
            }
            if let Value::Object(map) = doc {
                for (k, v) in patch_map {
                    if v.is_null() {
                        map.remove(k);
                    } else if let Some(existing) = map.get_mut(k) {
                        merge_patch(existing, v);
                    } else {
                        let mut fresh = Value::Null;
                        merge_patch(&mut fresh, v);
                        map.insert(k.clone(), fresh);
                    }
                }
            }
        }
        other => *doc = other.clone(),
    }
}
