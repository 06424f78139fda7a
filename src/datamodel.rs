use serde::{Deserialize, Deserializer};

/// The `data` container of a `current_token_datas_v2` query.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TokenDatas {
    #[serde(deserialize_with = "nullable")]
    pub current_token_datas_v2: Vec<TokenData>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TokenData {
    #[serde(deserialize_with = "nullable")]
    pub token_name: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub current_token_ownerships: Vec<TokenOwnership>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TokenOwnership {
    #[serde(deserialize_with = "nullable")]
    pub owner_address: String,
    /// Kept as the indexer formats it, e.g. `2024-01-16T00:00:00.000000`.
    #[serde(deserialize_with = "nullable")]
    pub last_transaction_timestamp: String,
}

/// Treats an explicit `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
