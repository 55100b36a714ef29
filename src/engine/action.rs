//! Serializable UI actions.
//!
//! Every user or owner interaction with the engine has an [`EngineAction`]
//! form, so a recorded session can be replayed headlessly:
//!
//! ```yaml
//! - action: set_boolean
//!   group: 0
//!   field: recycled
//!   value: true
//! - action: toggle
//!   dimension: status
//!   value: APPROVED
//! - action: external_groups
//!   groups: []
//! ```

use crate::model::{deserialize_bound, Catalogue, Dimension, FilterContext, FilterGroup, NumericMode};
use serde::{Deserialize, Serialize};

/// How an action names its target group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupRef {
    /// Position in the current group list
    Index(usize),
    /// Group id
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EngineAction {
    AddGroup,
    DeleteGroup {
        #[serde(default)]
        group: Option<GroupRef>,
    },
    DuplicateGroup {
        #[serde(default)]
        group: Option<GroupRef>,
    },
    RenameGroup {
        #[serde(default)]
        group: Option<GroupRef>,
        name: String,
    },
    SelectGroup {
        group: GroupRef,
    },
    ClearGroup {
        #[serde(default)]
        group: Option<GroupRef>,
    },
    SetBoolean {
        #[serde(default)]
        group: Option<GroupRef>,
        field: String,
        /// `null` or missing = don't care
        #[serde(default)]
        value: Option<bool>,
    },
    SetNumeric {
        #[serde(default)]
        group: Option<GroupRef>,
        field: String,
        #[serde(default)]
        mode: NumericMode,
        #[serde(default, deserialize_with = "deserialize_bound")]
        value: Option<f64>,
        #[serde(default, deserialize_with = "deserialize_bound")]
        min: Option<f64>,
        #[serde(default, deserialize_with = "deserialize_bound")]
        max: Option<f64>,
    },
    ClearNumeric {
        #[serde(default)]
        group: Option<GroupRef>,
        field: String,
    },
    Toggle {
        dimension: Dimension,
        value: String,
    },
    SelectAll {
        dimension: Dimension,
    },
    Reset,
    /// The owner supplied a draft
    ExternalGroups {
        #[serde(default)]
        groups: Vec<FilterGroup>,
    },
    /// The owner supplied a dimension value
    ExternalDimension {
        dimension: Dimension,
        #[serde(default)]
        values: Vec<String>,
    },
    SetContext {
        context: FilterContext,
    },
    /// The owner supplied a catalogue directly
    SetCatalogue {
        catalogue: Catalogue,
    },
    /// Ask for a catalogue refresh of the current category scope
    RefreshCatalogue,
}

impl EngineAction {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddGroup => "add_group",
            Self::DeleteGroup { .. } => "delete_group",
            Self::DuplicateGroup { .. } => "duplicate_group",
            Self::RenameGroup { .. } => "rename_group",
            Self::SelectGroup { .. } => "select_group",
            Self::ClearGroup { .. } => "clear_group",
            Self::SetBoolean { .. } => "set_boolean",
            Self::SetNumeric { .. } => "set_numeric",
            Self::ClearNumeric { .. } => "clear_numeric",
            Self::Toggle { .. } => "toggle",
            Self::SelectAll { .. } => "select_all",
            Self::Reset => "reset",
            Self::ExternalGroups { .. } => "external_groups",
            Self::ExternalDimension { .. } => "external_dimension",
            Self::SetContext { .. } => "set_context",
            Self::SetCatalogue { .. } => "set_catalogue",
            Self::RefreshCatalogue => "refresh_catalogue",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_actions() {
        let yaml = r#"
- action: set_boolean
  group: 0
  field: recycled
  value: true
- action: set_numeric
  group: "g-1"
  field: capacity_tph
  mode: range
  min: "10"
  max: ""
- action: toggle
  dimension: status
  value: APPROVED
- action: reset
"#;
        let actions: Vec<EngineAction> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(actions.len(), 4);
        assert!(matches!(
            &actions[0],
            EngineAction::SetBoolean { group: Some(GroupRef::Index(0)), value: Some(true), .. }
        ));
        match &actions[1] {
            EngineAction::SetNumeric { group, mode, min, max, .. } => {
                assert_eq!(group, &Some(GroupRef::Id("g-1".to_string())));
                assert_eq!(*mode, NumericMode::Range);
                assert_eq!(*min, Some(10.0));
                assert_eq!(*max, None);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(actions[3].name(), "reset");
    }

    #[test]
    fn test_missing_group_means_active() {
        let action: EngineAction =
            serde_json::from_str(r#"{"action":"clear_group"}"#).unwrap();
        assert_eq!(action, EngineAction::ClearGroup { group: None });
    }
}
