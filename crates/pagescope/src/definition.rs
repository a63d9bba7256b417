//! Declarative page definitions (YAML or JSON).
//!
//! ```yaml
//! page: login
//! scope: .login-form
//! children:
//!   username:
//!     property: value
//!     selector: input[name=username]
//!   remember:
//!     property: hasClass
//!     class: is-checked
//!     selector: .remember
//!     testContainer: "#alternate-pagescope-testing"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::page_object::{NodeBuilder, PageObject, PropertyKind, DEFAULT_ROOT_NAME};
use crate::result::{PageError, PageResult};
use crate::scope::QueryOptions;

/// Property kinds as written in a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyName {
    /// `value`
    Value,
    /// `text`
    Text,
    /// `attribute` (needs `name`)
    Attribute,
    /// `hasClass` (needs `class`)
    HasClass,
    /// `notHasClass` (needs `class`)
    NotHasClass,
    /// `contains` (needs `text`)
    Contains,
    /// `isPresent`
    IsPresent,
    /// `count`
    Count,
}

/// One node of a definition document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NodeDefinition {
    /// Own selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    /// Scope selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Test container override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_container: Option<String>,
    /// Discard inherited scope
    #[serde(default)]
    pub reset_scope: bool,
    /// Accept any number of matches
    #[serde(default)]
    pub multiple: bool,
    /// Match index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<usize>,
    /// What the node reads, absent for components
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyName>,
    /// Attribute name for `attribute`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Class for `hasClass` / `notHasClass`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Text for `contains`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Child nodes by name, in document order
    #[serde(default, with = "ordered_map", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<(String, NodeDefinition)>,
}

/// Root of a definition document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDefinition {
    /// Root name used in property paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Root node
    #[serde(flatten)]
    pub root: NodeDefinition,
}

impl PageDefinition {
    /// Parse a definition from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Definition`] if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> PageResult<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| PageError::definition(e.to_string()))
    }

    /// Parse a definition from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Definition`] if the JSON is malformed.
    pub fn from_json(json: &str) -> PageResult<Self> {
        serde_json::from_str(json).map_err(|e| PageError::definition(e.to_string()))
    }

    /// Load a definition file; `.json` is parsed as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Io`] if the file cannot be read, or
    /// [`PageError::Definition`] if it does not parse.
    pub fn from_path(path: &Path) -> PageResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Build the page object this definition describes.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Definition`] for missing property arguments or
    /// invalid names.
    pub fn build(&self) -> PageResult<PageObject> {
        let name = self.page.as_deref().unwrap_or(DEFAULT_ROOT_NAME);
        let root = self.root.to_builder(name)?;
        PageObject::named(name, root)
    }
}

impl NodeDefinition {
    fn options(&self) -> QueryOptions {
        QueryOptions {
            scope: self.scope.clone(),
            test_container: self.test_container.clone(),
            reset_scope: self.reset_scope,
            multiple: self.multiple,
            at: self.at,
        }
    }

    fn kind(&self, path: &str) -> PageResult<Option<PropertyKind>> {
        let required = |value: &Option<String>, key: &str, property: &str| {
            value.clone().ok_or_else(|| {
                PageError::definition(format!("'{path}': property '{property}' requires '{key}'"))
            })
        };

        let kind = match self.property {
            None => return Ok(None),
            Some(PropertyName::Value) => PropertyKind::Value,
            Some(PropertyName::Text) => PropertyKind::Text,
            Some(PropertyName::Attribute) => {
                PropertyKind::Attribute(required(&self.name, "name", "attribute")?)
            }
            Some(PropertyName::HasClass) => {
                PropertyKind::HasClass(required(&self.class, "class", "hasClass")?)
            }
            Some(PropertyName::NotHasClass) => {
                PropertyKind::NotHasClass(required(&self.class, "class", "notHasClass")?)
            }
            Some(PropertyName::Contains) => {
                PropertyKind::Contains(required(&self.text, "text", "contains")?)
            }
            Some(PropertyName::IsPresent) => PropertyKind::IsPresent,
            Some(PropertyName::Count) => PropertyKind::Count,
        };
        Ok(Some(kind))
    }

    fn to_builder(&self, path: &str) -> PageResult<NodeBuilder> {
        let mut builder = NodeBuilder::new().with_options(self.options());
        if let Some(selector) = &self.selector {
            builder = builder.with_selector(selector.clone());
        }
        if let Some(kind) = self.kind(path)? {
            builder = builder.with_kind(kind);
        }
        for (name, child) in &self.children {
            builder = builder.with_child(name.clone(), child.to_builder(&format!("{path}.{name}"))?);
        }
        Ok(builder)
    }
}

/// A YAML/JSON map kept as ordered entries, so children read and render in
/// the order they were written.
mod ordered_map {
    use std::fmt;
    use std::marker::PhantomData;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, V>(entries: &[(String, V)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Vec<(String, V)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of named child nodes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

impl PageObject {
    /// Build a page object from a YAML definition.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Definition`] if the definition is invalid.
    pub fn from_yaml(yaml: &str) -> PageResult<Self> {
        PageDefinition::from_yaml(yaml)?.build()
    }

    /// Build a page object from a JSON definition.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Definition`] if the definition is invalid.
    pub fn from_json(json: &str) -> PageResult<Self> {
        PageDefinition::from_json(json)?.build()
    }

    /// Build a page object from a definition file.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Io`] or [`PageError::Definition`].
    pub fn from_path(path: &Path) -> PageResult<Self> {
        PageDefinition::from_path(path)?.build()
    }
}
