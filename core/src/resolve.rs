use tracing::{debug, warn};

use crate::{
    alias::alias_string, color::rgba_to_hex, config::ExportConfig, error::SourceError,
    model::RawValue, source::VariableSource,
};

/// Turns a composite value into a string: an alias reference for
/// [`RawValue::Alias`], a hex color for [`RawValue::Color`].
///
/// Never fails. An alias whose variable or collection can't be found, or
/// whose lookup errors, is logged and resolves to `config.fallback_color`.
pub async fn resolve_value<S>(source: &S, raw: &RawValue, config: &ExportConfig) -> String
where
    S: VariableSource + ?Sized,
{
    match raw {
        RawValue::Color(rgba) => return rgba_to_hex(rgba, config.color_format),
        RawValue::Alias { id, .. } => match resolve_alias(source, id).await {
            Ok(Some(alias)) => return alias,
            Ok(None) => warn!(alias = %id, "aliased variable or its collection not found"),
            Err(err) => warn!("Error parsing value: {}", err),
        },
        other => debug!(value = ?other, "scalar value passed to resolver"),
    }
    config.fallback_color.clone()
}

/// Looks up the aliased variable and its owning collection.
pub async fn resolve_alias<S>(source: &S, id: &str) -> Result<Option<String>, SourceError>
where
    S: VariableSource + ?Sized,
{
    let Some(variable) = source.variable_by_id(id).await? else {
        return Ok(None);
    };
    let Some(collection) = source
        .collection_by_id(&variable.variable_collection_id)
        .await?
    else {
        return Ok(None);
    };
    Ok(Some(alias_string(&collection.name, &variable.segments())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Mode, Variable, VariableCollection};

    fn source() -> crate::source::MemorySource {
        crate::source::MemorySource::new()
            .with_collection(VariableCollection {
                id: "c1".into(),
                name: "Core".into(),
                default_mode_id: "m1".into(),
                modes: vec![Mode {
                    mode_id: "m1".into(),
                    name: "Default".into(),
                }],
                variable_ids: vec!["v1".into(), "orphan".into()],
            })
            .with_variable(Variable {
                id: "v1".into(),
                name: "a/b".into(),
                variable_collection_id: "c1".into(),
                values_by_mode: Default::default(),
            })
            .with_variable(Variable {
                id: "orphan".into(),
                name: "x".into(),
                variable_collection_id: "gone".into(),
                values_by_mode: Default::default(),
            })
    }

    #[tokio::test]
    async fn alias_to_reference_string() {
        let value = resolve_value(&source(), &RawValue::alias("v1"), &ExportConfig::default()).await;
        assert_eq!(value, "{Core['a']['b']}");
    }

    #[tokio::test]
    async fn missing_variable_falls_back() {
        let config = ExportConfig::default();
        let value = resolve_value(&source(), &RawValue::alias("nope"), &config).await;
        assert_eq!(value, "#000000");
    }

    #[tokio::test]
    async fn missing_collection_falls_back() {
        let config = ExportConfig::default();
        let value = resolve_value(&source(), &RawValue::alias("orphan"), &config).await;
        assert_eq!(value, "#000000");
    }

    #[tokio::test]
    async fn lookup_error_falls_back() {
        let source = source().with_failing_lookup("v1");
        let config = ExportConfig {
            fallback_color: "#ff00ff".into(),
            ..Default::default()
        };
        let value = resolve_value(&source, &RawValue::alias("v1"), &config).await;
        assert_eq!(value, "#ff00ff");
    }

    #[tokio::test]
    async fn colors() {
        let config = ExportConfig::default();
        let black = resolve_value(&source(), &RawValue::color(0.0, 0.0, 0.0, 1.0), &config).await;
        let white = resolve_value(&source(), &RawValue::color(1.0, 1.0, 1.0, 1.0), &config).await;
        assert_eq!(black, "#000000");
        assert_eq!(white, "#ffffff");
    }
}
