//! The nested token tree built for one collection (or one collection mode).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TreeError;

pub const NAME_KEY: &str = "name";
pub const MODE_KEY: &str = "mode";

/// A JSON object keyed by variable path segments, in insertion order.
///
/// Segments are used verbatim as keys. Re-assigning an existing leaf replaces
/// it; descending through a leaf or replacing a group with a leaf is a
/// [`TreeError::PathConflict`] and leaves the tree untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenTree {
    root: Map<String, Value>,
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn for_collection(name: &str) -> Self {
        let mut tree = Self::new();
        tree.root
            .insert(NAME_KEY.to_string(), Value::String(name.to_string()));
        tree
    }
    pub fn for_mode(name: &str, mode: &str) -> Self {
        let mut tree = Self::for_collection(name);
        tree.root
            .insert(MODE_KEY.to_string(), Value::String(mode.to_string()));
        tree
    }

    pub fn name(&self) -> Option<&str> {
        self.root.get(NAME_KEY).and_then(Value::as_str)
    }
    pub fn mode(&self) -> Option<&str> {
        self.root.get(MODE_KEY).and_then(Value::as_str)
    }
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Places `value` at the path given by `segments`, creating intermediate
    /// objects as needed. Returns the same tree for chained accumulation.
    pub fn insert<S: AsRef<str>>(
        &mut self,
        segments: &[S],
        value: Value,
    ) -> Result<&mut Self, TreeError> {
        let (last, parents) = segments.split_last().ok_or(TreeError::EmptyPath)?;
        self.check_path(segments)?;

        let mut node = &mut self.root;
        for segment in parents {
            let child = node
                .entry(segment.as_ref().to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            node = match child {
                Value::Object(map) => map,
                // check_path already rejects this
                _ => {
                    return Err(TreeError::PathConflict {
                        path: join(segments),
                        at: segment.as_ref().to_string(),
                        existing: "token",
                    })
                }
            };
        }
        node.insert(last.as_ref().to_string(), value);
        Ok(self)
    }

    fn check_path<S: AsRef<str>>(&self, segments: &[S]) -> Result<(), TreeError> {
        let conflict = |depth: usize, existing: &'static str| TreeError::PathConflict {
            path: join(segments),
            at: join(&segments[..=depth]),
            existing,
        };
        let mut node = &self.root;
        for (depth, segment) in segments.iter().enumerate() {
            let is_last = depth + 1 == segments.len();
            match node.get(segment.as_ref()) {
                None => return Ok(()),
                Some(Value::Object(map)) if is_last => {
                    if map.is_empty() {
                        return Ok(());
                    }
                    return Err(conflict(depth, "group"));
                }
                Some(Value::Object(map)) => node = map,
                Some(_) if is_last => return Ok(()),
                Some(_) => return Err(conflict(depth, "token")),
            }
        }
        Ok(())
    }

    pub fn get<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Value> {
        let (last, parents) = segments.split_last()?;
        let mut node = &self.root;
        for segment in parents {
            node = node.get(segment.as_ref())?.as_object()?;
        }
        node.get(last.as_ref())
    }
}

fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|segment| segment.as_ref())
        .collect::<Vec<_>>()
        .join("/")
}

impl From<TokenTree> for Value {
    fn from(tree: TokenTree) -> Self {
        tree.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn nests_segments() {
        let mut tree = TokenTree::for_collection("Core");
        tree.insert(&["color", "brand", "primary"], json!("#ff0000"))
            .unwrap()
            .insert(&["color", "brand", "secondary"], json!("#00ff00"))
            .unwrap()
            .insert(&["radius"], json!(4))
            .unwrap();
        assert_eq!(
            tree.into_value(),
            json!({
                "name": "Core",
                "color": { "brand": { "primary": "#ff0000", "secondary": "#00ff00" } },
                "radius": 4
            })
        );
    }

    #[test]
    fn keeps_insertion_order() {
        let mut tree = TokenTree::for_mode("core", "Light");
        tree.insert(&["z"], json!(1)).unwrap();
        tree.insert(&["a"], json!(2)).unwrap();
        let keys: Vec<_> = tree.as_map().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "mode", "z", "a"]);
        assert_eq!(
            serde_json::to_string(&tree).unwrap(),
            r#"{"name":"core","mode":"Light","z":1,"a":2}"#
        );
    }

    #[test]
    fn leaf_is_last_write_wins() {
        let mut tree = TokenTree::new();
        tree.insert(&["a", "b"], json!(1)).unwrap();
        tree.insert(&["a", "b"], json!(2)).unwrap();
        assert_eq!(tree.get(&["a", "b"]), Some(&json!(2)));
    }

    #[test]
    fn rejects_descending_through_leaf() {
        let mut tree = TokenTree::new();
        tree.insert(&["a", "b"], json!("x")).unwrap();
        let err = tree.insert(&["a", "b", "c"], json!("y")).unwrap_err();
        assert_eq!(
            err,
            TreeError::PathConflict {
                path: "a/b/c".into(),
                at: "a/b".into(),
                existing: "token",
            }
        );
        assert_eq!(tree.into_value(), json!({ "a": { "b": "x" } }));
    }

    #[test]
    fn rejects_replacing_group() {
        let mut tree = TokenTree::new();
        tree.insert(&["a", "b", "c"], json!("y")).unwrap();
        let err = tree.insert(&["a", "b"], json!("x")).unwrap_err();
        assert!(matches!(err, TreeError::PathConflict { existing: "group", .. }));
        assert_eq!(tree.get(&["a", "b", "c"]), Some(&json!("y")));
    }

    #[test]
    fn seeded_keys_behave_like_leaves() {
        let mut tree = TokenTree::for_mode("core", "Light");
        tree.insert(&["name"], json!("renamed")).unwrap();
        assert_eq!(tree.name(), Some("renamed"));
        let err = tree.insert(&["mode", "x"], json!(1)).unwrap_err();
        assert!(matches!(err, TreeError::PathConflict { existing: "token", .. }));
        assert_eq!(tree.mode(), Some("Light"));
    }

    #[test]
    fn empty_path() {
        let mut tree = TokenTree::new();
        let segments: [&str; 0] = [];
        assert_eq!(tree.insert(&segments, json!(1)).unwrap_err(), TreeError::EmptyPath);
    }

    #[test]
    fn get_missing() {
        let mut tree = TokenTree::new();
        tree.insert(&["a", "b"], json!(1)).unwrap();
        assert_eq!(tree.get(&["a", "c"]), None);
        assert_eq!(tree.get(&["a", "b", "c"]), None);
        assert_eq!(tree.get(&["a"]), Some(&json!({ "b": 1 })));
    }
}
