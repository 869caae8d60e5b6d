use serde::{Deserialize, Serialize};

use crate::{error::ExportWarning, tree::TokenTree};

/// Inbound command that starts an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Command {
    /// One tree per collection, default mode only.
    CreateTokens,
    /// One tree per collection mode.
    CreateVariables,
}

/// Outbound message delivered to the sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PluginMessage {
    AllTokenCollections { data: Vec<TokenTree> },
    AllCollections { data: Vec<TokenTree> },
    Error { message: String },
}

impl From<ExportWarning> for PluginMessage {
    fn from(warning: ExportWarning) -> Self {
        PluginMessage::Error {
            message: warning.to_string(),
        }
    }
}

/// Receiver of the export's results.
pub trait MessageSink {
    fn post_message(&mut self, message: PluginMessage);
}

impl MessageSink for Vec<PluginMessage> {
    fn post_message(&mut self, message: PluginMessage) {
        self.push(message);
    }
}
