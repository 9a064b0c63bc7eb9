//! Wire types for the command endpoint.

use serde::{Deserialize, Serialize};

/// JSON body of the command POST: `{"command": "<string>"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandRequest {
    pub command: String,
}

/// Body the server may attach to a refused command. The field keeps the
/// Portuguese wire name used by the server this panel speaks to.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandResponse {
    #[serde(default, rename = "mensagem")]
    pub message: Option<String>,
}
