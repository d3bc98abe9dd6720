use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Raw registry entry as returned by the product lookup.
///
/// The registry owns this data; the client only ever holds a request-scoped
/// copy. Fields the engine does not know about are kept in `extra` so they
/// survive into the verification result untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(rename = "id", alias = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacture_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_verified: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Explicit `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lookup response envelope: `{ "data": ProductRecord | null }`.
#[derive(Debug, Deserialize)]
pub struct RegistryEnvelope {
    #[serde(default)]
    pub data: Option<ProductRecord>,
}

/// Error body the registry sends alongside non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct RegistryErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
