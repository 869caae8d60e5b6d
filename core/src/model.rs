use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}
fn opaque() -> f64 {
    1.0
}
impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// Marker for the host's alias record, `{"type": "VARIABLE_ALIAS", "id": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AliasType {
    #[serde(rename = "VARIABLE_ALIAS")]
    VariableAlias,
}

/// A variable's value under one mode.
///
/// The variant is decided once, when the host data is deserialised. Aliases
/// and colors are composite and go through the resolver; the scalar variants
/// land in the token tree unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Alias {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        type_: Option<AliasType>,
        id: String,
    },
    Color(Rgba),
    Boolean(bool),
    Float(f64),
    String(String),
}
impl RawValue {
    pub fn alias(id: impl Into<String>) -> Self {
        RawValue::Alias {
            type_: Some(AliasType::VariableAlias),
            id: id.into(),
        }
    }
    pub fn color(r: f64, g: f64, b: f64, a: f64) -> Self {
        RawValue::Color(Rgba::new(r, g, b, a))
    }
    pub fn is_composite(&self) -> bool {
        matches!(self, RawValue::Alias { .. } | RawValue::Color(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub mode_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    pub id: String,
    pub name: String,
    pub default_mode_id: String,
    #[serde(default)]
    pub modes: Vec<Mode>,
    #[serde(default)]
    pub variable_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    pub name: String,
    pub variable_collection_id: String,
    #[serde(default)]
    pub values_by_mode: IndexMap<String, RawValue>,
}
impl Variable {
    /// Path segments of the variable name, split on `/`. Empty segments are dropped.
    pub fn segments(&self) -> Vec<String> {
        split_path(&self.name)
    }
    pub fn value_for_mode(&self, mode_id: &str) -> Option<&RawValue> {
        self.values_by_mode.get(mode_id)
    }
}

pub fn split_path(name: &str) -> Vec<String> {
    name.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
        .collect()
}
