use serde_json::Value;
use utoipa::ToSchema;

/// A natural-language question about the invoice data.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct ChatQuery {
    #[serde(default)]
    pub query: String,
}

/// The collaborator's answer, passed through as-is.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct ChatAnswer {
    /// The SQL the collaborator generated, if it shared it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    /// The rows the generated query returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Value>,
    pub message: String,
}
