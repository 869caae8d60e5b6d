//! Alias reference strings, `{Collection['segment']['segment']}`.

use std::fmt;

use itertools::Itertools;
use serde_json::Value;

use crate::{tree::TokenTree, walker::normalize_collection_name};

/// A parsed alias reference: the owning collection and the referenced variable's path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRef {
    pub collection: String,
    pub segments: Vec<String>,
}

impl AliasRef {
    pub fn new(collection: impl Into<String>, segments: Vec<String>) -> Self {
        Self {
            collection: collection.into(),
            segments,
        }
    }
    pub fn parse(value: &str) -> Option<AliasRef> {
        alias_parser::alias(value).ok()
    }
    pub fn is_alias(value: &str) -> bool {
        Self::parse(value).is_some()
    }
}

impl fmt::Display for AliasRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&alias_string(&self.collection, &self.segments))
    }
}

/// Builds the alias string for a variable, quoting every segment in brackets.
pub fn alias_string<S: AsRef<str>>(collection_name: &str, segments: &[S]) -> String {
    let path = segments
        .iter()
        .map(|segment| format!("['{}']", segment.as_ref().replace('"', "\\\"")))
        .join("");
    format!("{{{collection_name}{path}}}")
}

/// Finds the value an alias points at within a batch of exported trees.
///
/// Per-mode trees carry the normalised collection name, so both spellings match.
pub fn find_alias_target<'a>(trees: &'a [TokenTree], alias: &AliasRef) -> Option<&'a Value> {
    let normalized = normalize_collection_name(&alias.collection);
    trees
        .iter()
        .filter(|tree| {
            tree.name()
                .map_or(false, |name| name == alias.collection || name == normalized)
        })
        .find_map(|tree| tree.get(&alias.segments))
}

/// Alias strings in `trees` whose target is not part of the same batch.
///
/// Aliases into collections that were not exported (a library file, an
/// empty collection) show up here, in tree order.
pub fn dangling_aliases(trees: &[TokenTree]) -> Vec<AliasRef> {
    let mut aliases = Vec::new();
    for tree in trees {
        collect_aliases(tree.as_map().values(), &mut aliases);
    }
    aliases.retain(|alias| find_alias_target(trees, alias).is_none());
    aliases
}

fn collect_aliases<'a>(values: impl Iterator<Item = &'a Value>, out: &mut Vec<AliasRef>) {
    for value in values {
        match value {
            Value::String(s) => out.extend(AliasRef::parse(s)),
            Value::Object(map) => collect_aliases(map.values(), out),
            _ => {}
        }
    }
}

peg::parser! {
  grammar alias_parser() for str {
    rule segment() -> String = s:$((!"']" [_])*) { s.replace("\\\"", "\"") }

    pub(crate) rule alias() -> AliasRef
        = "{" c:$((!"['" !"}" [_])+) s:("['" seg:segment() "']" { seg })+ "}" {
            AliasRef { collection: c.to_string(), segments: s }
        }
  }
}
