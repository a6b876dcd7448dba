use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One entry of the `files` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileGroupConfig {
    /// Output artifact (or pattern → output routing) for this group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_to: Option<JoinTo>,

    /// Source patterns owned by this group; defaults exist for the
    /// well-known `javascripts`, `stylesheets` and `templates` groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,

    /// Concatenation ordering rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderConfig>,
}

/// `joinTo` is either one output path or an ordered pattern → output map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JoinTo {
    Single(String),
    Mapping(IndexMap<String, String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderConfig {
    /// Files placed first, in rule order
    #[serde(default)]
    pub before: Vec<String>,

    /// Files placed last, in rule order
    #[serde(default)]
    pub after: Vec<String>,
}
