//! Dataset rows and the column schema used to read them

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Names of the columns the query engine reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Institution display name column
    #[serde(default = "default_name_column")]
    pub name: String,
    /// State column
    #[serde(default = "default_state_column")]
    pub state: String,
    /// District column
    #[serde(default = "default_district_column")]
    pub district: String,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            name: default_name_column(),
            state: default_state_column(),
            district: default_district_column(),
        }
    }
}

impl Schema {
    /// Create a schema from explicit column names
    pub fn new<N, S, D>(name: N, state: S, district: D) -> Self
    where
        N: Into<String>,
        S: Into<String>,
        D: Into<String>,
    {
        Self {
            name: name.into(),
            state: state.into(),
            district: district.into(),
        }
    }

    /// Columns every record must provide
    pub fn required_columns(&self) -> [&str; 3] {
        [&self.name, &self.state, &self.district]
    }
}

fn default_name_column() -> String {
    "name".to_string()
}

fn default_state_column() -> String {
    "state".to_string()
}

fn default_district_column() -> String {
    "district".to_string()
}

/// One institution, fields kept verbatim and in source column order.
///
/// Serializes as a flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// Build a record from `(column, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of a column, empty when the column is absent
    pub fn field(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    /// Iterate over `(column, value)` in source order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy of this record with one column replaced, position preserved
    pub fn with_field(&self, column: &str, value: String) -> Self {
        let mut fields = self.fields.clone();
        if let Some(slot) = fields.get_mut(column) {
            *slot = value;
        } else {
            fields.insert(column.to_string(), value);
        }
        Self { fields }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no columns
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record::from_pairs([
            ("name", "ABC College (Id:12)"),
            ("state", "X"),
            ("district", "D1"),
            ("website", "abc.example"),
        ])
    }

    #[test]
    fn test_schema_default() {
        let schema = Schema::default();
        assert_eq!(schema.required_columns(), ["name", "state", "district"]);
    }

    #[test]
    fn test_field_lookup() {
        let record = sample();
        assert_eq!(record.field("state"), "X");
        assert_eq!(record.field("missing"), "");
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn test_with_field_keeps_order() {
        let record = sample().with_field("name", "ABC College".to_string());
        let columns: Vec<&str> = record.fields().map(|(k, _)| k).collect();
        assert_eq!(columns, vec!["name", "state", "district", "website"]);
        assert_eq!(record.field("name"), "ABC College");
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"ABC College (Id:12)","state":"X","district":"D1","website":"abc.example"}"#
        );
    }
}
