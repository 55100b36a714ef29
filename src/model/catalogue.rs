//! Field catalogue: the options the user can filter on for the active scope.

use serde::{Deserialize, Serialize};

/// Value type of a catalogue field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Boolean,
    Number,
    #[serde(other)]
    Other,
}

/// Describes one filterable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub field: String,
    #[serde(default)]
    pub label: String,
    /// Number of records carrying the field in the current scope
    #[serde(default)]
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
}

impl FieldDescriptor {
    /// A boolean field descriptor.
    pub fn boolean(field: impl Into<String>, label: impl Into<String>, count: u64) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            count,
            min: None,
            max: None,
            field_type: FieldType::Boolean,
        }
    }

    /// A numeric field descriptor with its observed bounds.
    pub fn numeric(
        field: impl Into<String>,
        label: impl Into<String>,
        count: u64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            count,
            min,
            max,
            field_type: FieldType::Number,
        }
    }

    /// Label for display, falling back to the field key.
    #[must_use]
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.field
        } else {
            &self.label
        }
    }
}

/// Options available for a category scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalogue {
    pub boolean_fields: Vec<FieldDescriptor>,
    pub numeric_fields: Vec<FieldDescriptor>,
    pub country_domain: Vec<String>,
    pub category_domain: Vec<String>,
}

impl Catalogue {
    /// Create an empty catalogue
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn boolean_field(&self, field: &str) -> Option<&FieldDescriptor> {
        self.boolean_fields.iter().find(|f| f.field == field)
    }

    #[must_use]
    pub fn numeric_field(&self, field: &str) -> Option<&FieldDescriptor> {
        self.numeric_fields.iter().find(|f| f.field == field)
    }

    /// Whether the catalogue has no fields and no domains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boolean_fields.is_empty()
            && self.numeric_fields.is_empty()
            && self.country_domain.is_empty()
            && self.category_domain.is_empty()
    }
}

/// Key of a catalogue fetch: the category selection it was issued for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatalogueScope {
    /// Sorted, de-duplicated category values; empty = unrestricted
    pub categories: Vec<String>,
}

impl CatalogueScope {
    /// Build a scope from any category list.
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories: Vec<String> = categories.into_iter().map(Into::into).collect();
        categories.sort();
        categories.dedup();
        Self { categories }
    }

    /// Stable text key, used for cache file names and logs.
    #[must_use]
    pub fn key(&self) -> String {
        if self.categories.is_empty() {
            "all".to_string()
        } else {
            self.categories.join(",")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_is_order_insensitive() {
        assert_eq!(
            CatalogueScope::new(["paper", "steel", "paper"]),
            CatalogueScope::new(["steel", "paper"])
        );
        assert_eq!(CatalogueScope::default().key(), "all");
    }

    #[test]
    fn test_catalogue_wire_shape() {
        let json = r#"{
            "booleanFields": [{"field": "recycled", "label": "Recycled", "count": 12, "type": "boolean"}],
            "numericFields": [{"field": "capacity_tph", "label": "Capacity", "count": 4, "min": 1, "max": 90, "type": "number"}],
            "countryDomain": ["DE", "FR"]
        }"#;
        let catalogue: Catalogue = serde_json::from_str(json).unwrap();
        assert_eq!(catalogue.boolean_field("recycled").map(|f| f.count), Some(12));
        assert_eq!(
            catalogue.numeric_field("capacity_tph").and_then(|f| f.max),
            Some(90.0)
        );
        assert!(catalogue.category_domain.is_empty());
    }

    #[test]
    fn test_unknown_field_type() {
        let field: FieldDescriptor =
            serde_json::from_str(r#"{"field":"grade","type":"enum"}"#).unwrap();
        assert_eq!(field.field_type, FieldType::Other);
        assert_eq!(field.display_label(), "grade");
    }
}
