//! Schema catalog injected into generation prompts.
//!
//! Maps fully-qualified table names to ordered column names. Loaded once per
//! process and immutable afterwards; it grounds SQL generation but is never
//! validated against the live database.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static table-to-columns mapping used to ground SQL generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SchemaCatalog {
    tables: BTreeMap<String, Vec<String>>,
}

impl SchemaCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table with its ordered column names.
    pub fn with_table(
        mut self,
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.tables
            .insert(name.into(), columns.into_iter().map(Into::into).collect());
        self
    }

    /// The built-in demo catalog for the sample retail database.
    pub fn demo() -> Self {
        Self::new()
            .with_table(
                "public.customer_shopping",
                [
                    "invoice_no",
                    "customer_id",
                    "gender",
                    "age",
                    "category",
                    "quantity",
                    "price",
                    "payment_method",
                    "invoice_date",
                    "shopping_mall",
                ],
            )
            .with_table(
                "public.datablist_customers",
                [
                    "index_no",
                    "customer_id",
                    "first_name",
                    "last_name",
                    "company",
                    "city",
                    "country",
                    "phone1",
                    "phone2",
                    "email",
                    "subscription_date",
                    "website",
                ],
            )
    }

    /// Returns true if the catalog has no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Number of tables in the catalog.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Serializes the catalog as compact JSON for prompt embedding.
    pub fn to_prompt_json(&self) -> String {
        // BTreeMap keys serialize in sorted order, so the prompt is stable
        // across runs. Serialization of a string map cannot fail.
        serde_json::to_string(&self.tables).unwrap_or_else(|_| "{}".to_string())
    }
}

impl<K, V, C> FromIterator<(K, C)> for SchemaCatalog
where
    K: Into<String>,
    V: Into<String>,
    C: IntoIterator<Item = V>,
{
    fn from_iter<T: IntoIterator<Item = (K, C)>>(iter: T) -> Self {
        Self {
            tables: iter
                .into_iter()
                .map(|(k, cols)| (k.into(), cols.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }
}
