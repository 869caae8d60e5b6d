//! Walks every collection and builds the token trees handed to the sink.
//!
//! Collections are visited in source order, variables within a collection in
//! source order, and each variable (including any alias lookups) finishes
//! before the next one starts. A failing variable is logged and skipped;
//! only a failed collection enumeration aborts the walk.

use tracing::{debug, warn};

use crate::{
    config::ExportConfig,
    error::{ExportWarning, SourceError},
    flatten::insert_variable,
    model::{Variable, VariableCollection},
    source::VariableSource,
    tree::TokenTree,
};

/// Trees produced by a walk, plus the warnings to report alongside them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExportReport {
    pub trees: Vec<TokenTree>,
    pub warnings: Vec<ExportWarning>,
}

/// One tree per collection, filled from the collection's default mode.
pub async fn export_token_collections<S>(
    source: &S,
    config: &ExportConfig,
) -> Result<ExportReport, SourceError>
where
    S: VariableSource + ?Sized,
{
    let collections = source.local_collections().await?;
    let mut report = ExportReport::default();
    if collections.is_empty() {
        report.warnings.push(ExportWarning::NoCollections);
        return Ok(report);
    }

    for collection in &collections {
        let mut tree = TokenTree::for_collection(&collection.name);
        fill_tree(source, &mut tree, collection, &collection.default_mode_id, config).await;
        report.trees.push(tree);
    }
    Ok(report)
}

/// One tree per (collection, mode) pair, named after the normalised collection name.
pub async fn export_mode_collections<S>(
    source: &S,
    config: &ExportConfig,
) -> Result<ExportReport, SourceError>
where
    S: VariableSource + ?Sized,
{
    let collections = source.local_collections().await?;
    let mut report = ExportReport::default();
    if collections.is_empty() {
        report.warnings.push(ExportWarning::NoCollections);
        return Ok(report);
    }

    for collection in &collections {
        if collection.variable_ids.is_empty() {
            warn!(collection = %collection.name, "collection has no variables");
            report.warnings.push(ExportWarning::EmptyCollection {
                name: collection.name.clone(),
            });
            continue;
        }
        let name = normalize_collection_name(&collection.name);
        for mode in &collection.modes {
            let mut tree = TokenTree::for_mode(&name, &mode.name);
            fill_tree(source, &mut tree, collection, &mode.mode_id, config).await;
            report.trees.push(tree);
        }
    }
    Ok(report)
}

/// Strips all whitespace and lowercases the first character: `"Brand Colors"` → `"brandColors"`.
pub fn normalize_collection_name(name: &str) -> String {
    let mut chars = name.chars().filter(|c| !c.is_whitespace());
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fetches each variable of `collection` and inserts its `mode_id` value,
/// one variable at a time.
async fn fill_tree<S>(
    source: &S,
    tree: &mut TokenTree,
    collection: &VariableCollection,
    mode_id: &str,
    config: &ExportConfig,
) where
    S: VariableSource + ?Sized,
{
    for id in &collection.variable_ids {
        match source.variable_by_id(id).await {
            Ok(Some(variable)) => add_variable(source, tree, &variable, mode_id, config).await,
            Ok(None) => debug!(variable = %id, collection = %collection.name, "variable not found"),
            Err(err) => warn!("Error retrieving variable: {}", err),
        }
    }
}

async fn add_variable<S>(
    source: &S,
    tree: &mut TokenTree,
    variable: &Variable,
    mode_id: &str,
    config: &ExportConfig,
) where
    S: VariableSource + ?Sized,
{
    let Some(raw) = variable.value_for_mode(mode_id) else {
        warn!(variable = %variable.name, mode = %mode_id, "variable has no value for mode");
        return;
    };
    if let Err(err) = insert_variable(source, tree, &variable.name, raw, config).await {
        warn!(variable = %variable.name, "skipping variable: {}", err);
    }
}
