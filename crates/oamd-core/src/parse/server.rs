use serde::Deserialize;

/// A server URL definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Server {
    pub url: String,

    pub description: Option<String>,
}
