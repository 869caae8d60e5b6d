//! Exports a design tool's variables as nested JSON token trees.
//!
//! Variable names such as `color/brand/primary` become nested objects, colors
//! become hex strings and aliases become `{Collection['color']['red']}`
//! references. Host lookups go through [`VariableSource`]; results go to a
//! [`MessageSink`].

use tracing::{error, info};

pub mod alias;
pub mod color;
pub mod config;
pub mod error;
pub mod flatten;
pub mod message;
pub mod model;
pub mod resolve;
pub mod source;
pub mod tree;
pub mod walker;

pub use alias::{alias_string, dangling_aliases, find_alias_target, AliasRef};
pub use config::{ColorFormat, ExportConfig};
pub use error::{ExportWarning, SourceError, TreeError};
pub use message::{Command, MessageSink, PluginMessage};
pub use model::{Mode, RawValue, Rgba, Variable, VariableCollection};
pub use source::{MemorySource, Snapshot, VariableSource};
pub use tree::TokenTree;
pub use walker::{export_mode_collections, export_token_collections, ExportReport};

/// Runs the export `command` selects and posts its results to `sink`.
///
/// Warnings are posted first, then the batch of trees if there is one. A
/// failure to enumerate collections is logged and nothing is posted.
pub async fn handle_command<S, K>(source: &S, sink: &mut K, command: Command, config: &ExportConfig)
where
    S: VariableSource + ?Sized,
    K: MessageSink + ?Sized,
{
    let report = match command {
        Command::CreateTokens => export_token_collections(source, config).await,
        Command::CreateVariables => export_mode_collections(source, config).await,
    };
    let report = match report {
        Ok(report) => report,
        Err(err) => {
            error!("Error retrieving collections: {}", err);
            return;
        }
    };

    for warning in report.warnings {
        sink.post_message(warning.into());
    }
    if report.trees.is_empty() {
        return;
    }
    info!(trees = report.trees.len(), ?command, "export finished");
    let data = report.trees;
    sink.post_message(match command {
        Command::CreateTokens => PluginMessage::AllTokenCollections { data },
        Command::CreateVariables => PluginMessage::AllCollections { data },
    });
}
