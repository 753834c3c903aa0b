//! Product transaction document and report row types

use serde::{Deserialize, Deserializer, Serialize};

/// A single product sale record as stored in the collection.
///
/// Every field tolerates absence; the seed source is inserted verbatim and
/// nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold: Option<bool>,
    /// ISO-like date text, e.g. `2021-11-27T20:29:54+05:30`. Never parsed.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date_of_sale: String,
}

/// Text fields arrive as `null` in some seed records; store them as empty
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProductTransaction {
    /// Price rendered the way a document store renders a number as text
    /// (`150` for whole values, `109.95` otherwise).
    pub fn price_text(&self) -> Option<String> {
        self.price.map(|p| p.to_string())
    }
}

/// Category membership count for the pie chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Option<String>,
    pub count: u64,
}
