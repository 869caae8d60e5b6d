use serde_json::Value;

use crate::{
    config::ExportConfig,
    error::TreeError,
    model::{split_path, RawValue},
    resolve::resolve_value,
    source::VariableSource,
    tree::TokenTree,
};

/// Resolves `raw` and inserts it into `tree` under the `/`-separated `name`.
///
/// The same tree is handed back so callers can accumulate many variables.
pub async fn insert_variable<'t, S>(
    source: &S,
    tree: &'t mut TokenTree,
    name: &str,
    raw: &RawValue,
    config: &ExportConfig,
) -> Result<&'t mut TokenTree, TreeError>
where
    S: VariableSource + ?Sized,
{
    let segments = split_path(name);
    if segments.is_empty() {
        return Err(TreeError::EmptyPath);
    }
    let value = match raw {
        RawValue::Alias { .. } | RawValue::Color(_) => {
            Value::String(resolve_value(source, raw, config).await)
        }
        RawValue::Float(n) if config.round_numbers => number_value(round_half_up(*n)),
        RawValue::Float(n) => number_value(*n),
        RawValue::Boolean(b) => Value::Bool(*b),
        RawValue::String(s) => Value::String(s.clone()),
    };
    tree.insert(&segments, value)
}

fn round_half_up(n: f64) -> f64 {
    // `(n + 0.5).floor()` is off just below one half and above 2^52
    let whole = n.floor();
    if n - whole >= 0.5 {
        whole + 1.0
    } else {
        whole
    }
}

/// Whole numbers are written without a fractional part, like the host does.
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}
