//! The catalogue of widgets a document may embed.
//!
//! A registry is built once, either from the built-in table or from a JSON
//! description, then shared behind an `Arc`. Nothing mutates it afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use ecow::EcoString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

mod builtin;

/// Editor control used for a prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropType {
    /// Free text.
    String,
    /// A number, optionally bounded by `min`/`max` with a `step`.
    Number,
    /// A checkbox.
    Boolean,
    /// A CSS color.
    Color,
    /// One of a fixed set of `options`.
    Select,
}

/// Grouping used by the editor's component picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Simulations such as cellular automata.
    Simulation,
    /// Static or animated visualizations.
    Visualization,
    /// Interactive widgets.
    Interactive,
    /// Utilities.
    Tool,
}

impl Category {
    /// All categories, in picker order.
    pub const ALL: [Category; 4] = [
        Category::Simulation,
        Category::Visualization,
        Category::Interactive,
        Category::Tool,
    ];

    /// The lowercase name used in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Simulation => "simulation",
            Category::Visualization => "visualization",
            Category::Interactive => "interactive",
            Category::Tool => "tool",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = EcoString;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ecow::eco_format!("unknown component category: {s:?}"))
    }
}

/// Editor metadata for a single prop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropSchema {
    /// The editor control.
    #[serde(rename = "type")]
    pub kind: PropType,
    /// Value used when a new embed is inserted.
    #[serde(default)]
    pub default: Value,
    /// Human-readable label.
    pub label: EcoString,
    /// Help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<EcoString>,
    /// Choices for [`PropType::Select`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,
    /// Lower bound for [`PropType::Number`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound for [`PropType::Number`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Increment for [`PropType::Number`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl PropSchema {
    /// A prop without bounds, options or description.
    pub fn new(kind: PropType, label: impl Into<EcoString>, default: impl Into<Value>) -> Self {
        Self {
            kind,
            default: default.into(),
            label: label.into(),
            description: None,
            options: None,
            min: None,
            max: None,
            step: None,
        }
    }

    /// A bounded number prop.
    pub fn number(
        label: impl Into<EcoString>,
        default: impl Into<Value>,
        (min, max, step): (f64, f64, f64),
    ) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            step: Some(step),
            ..Self::new(PropType::Number, label, default)
        }
    }

    /// Sets the help text.
    pub fn describe(mut self, description: impl Into<EcoString>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the choices of a select prop.
    pub fn with_options<I, V>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }
}

/// Everything the editor and the page hydrator know about one widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    /// Unique name; embeds refer to the widget by it.
    #[serde(default)]
    pub name: EcoString,
    /// Display name in the picker.
    pub label: EcoString,
    /// Short explanation.
    #[serde(default)]
    pub description: EcoString,
    /// Picker group.
    pub category: Category,
    /// Configurable props by name.
    #[serde(default)]
    pub props: BTreeMap<EcoString, PropSchema>,
    /// Reads values other widgets on the page publish.
    #[serde(default)]
    pub consumes_context: bool,
    /// Keys this widget publishes to the shared context.
    #[serde(default)]
    pub provides_context: Vec<EcoString>,
}

impl ComponentDescriptor {
    /// Each prop's default value, keyed by prop name.
    pub fn default_props(&self) -> Map<String, Value> {
        self.props
            .iter()
            .map(|(name, prop)| (name.to_string(), prop.default.clone()))
            .collect()
    }
}

/// Accepted shapes for a registry file: a list of descriptors, or an object
/// keyed by component name.
#[derive(Deserialize)]
#[serde(untagged)]
enum RegistrySource {
    List(Vec<ComponentDescriptor>),
    Map(BTreeMap<EcoString, ComponentDescriptor>),
}

/// An immutable set of widgets keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentRegistry {
    components: BTreeMap<EcoString, ComponentDescriptor>,
}

impl ComponentRegistry {
    /// Builds a registry from descriptors. A later descriptor replaces an
    /// earlier one with the same name.
    pub fn new(components: impl IntoIterator<Item = ComponentDescriptor>) -> Self {
        let mut map = BTreeMap::new();
        for component in components {
            if let Some(previous) = map.insert(component.name.clone(), component) {
                log::warn!("component {:?} registered twice; keeping the later entry", previous.name);
            }
        }
        Self { components: map }
    }

    /// The widgets shipped with the blog.
    pub fn builtin() -> Self {
        Self::new(builtin::components())
    }

    /// Parses a registry description.
    ///
    /// In the object form, the key is the component name and overrides any
    /// `name` field inside the descriptor.
    pub fn from_json(text: &str) -> Result<Self> {
        let source: RegistrySource = serde_json::from_str(text)?;
        Ok(match source {
            RegistrySource::List(components) => Self::new(components),
            RegistrySource::Map(components) => {
                Self::new(components.into_iter().map(|(name, mut component)| {
                    component.name = name;
                    component
                }))
            }
        })
    }

    /// Finds a widget by exact name.
    pub fn lookup(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.components.get(name)
    }

    /// Whether a widget with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// All names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(EcoString::as_str)
    }

    /// All descriptors, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDescriptor> {
        self.components.values()
    }

    /// Number of registered widgets.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Widgets in `category`, sorted by name.
    pub fn by_category(&self, category: Category) -> Vec<&ComponentDescriptor> {
        self.iter()
            .filter(|component| component.category == category)
            .collect()
    }

    /// Categories that have at least one widget, in picker order.
    pub fn categories(&self) -> Vec<Category> {
        self.iter()
            .map(|component| component.category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Default props for `name`; empty when the widget is unknown.
    pub fn default_props(&self, name: &str) -> Map<String, Value> {
        self.lookup(name)
            .map(ComponentDescriptor::default_props)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtin_table_is_complete() {
        let registry = ComponentRegistry::builtin();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            ["CSSArtwork", "FireSim", "FireSim2", "FireSimControl", "Sphere", "SphereControl"]
        );
        assert!(registry.contains("FireSim"));
        assert!(!registry.contains("firesim"));
        assert!(registry.lookup("Missing").is_none());
    }

    #[test]
    fn defaults_come_from_the_prop_table() {
        let registry = ComponentRegistry::builtin();
        let props = registry.default_props("FireSim");
        assert_eq!(props.get("gridWidth"), Some(&json!(50)));
        assert_eq!(props.get("autoPlay"), Some(&json!(false)));
        assert_eq!(props.get("fireSpreadChance"), Some(&json!(0.33)));
        assert_eq!(props.len(), 12);

        assert!(registry.default_props("FireSim2").is_empty());
        assert!(registry.default_props("Missing").is_empty());
    }

    #[test]
    fn categories_group_widgets() {
        let registry = ComponentRegistry::builtin();
        assert_eq!(
            registry.categories(),
            [Category::Simulation, Category::Visualization]
        );
        let names: Vec<_> = registry
            .by_category(Category::Visualization)
            .into_iter()
            .map(|component| component.name.as_str())
            .collect();
        assert_eq!(names, ["CSSArtwork", "Sphere", "SphereControl"]);
        assert!(registry.by_category(Category::Tool).is_empty());
    }

    #[test]
    fn context_metadata_is_kept() {
        let registry = ComponentRegistry::builtin();
        let control = registry.lookup("SphereControl").unwrap();
        assert!(control.consumes_context);
        assert!(control.provides_context.iter().any(|key| key == "diameter"));

        let art = registry.lookup("CSSArtwork").unwrap();
        assert!(!art.consumes_context);
        let piece = &art.props["piece"];
        assert_eq!(piece.kind, PropType::Select);
        assert_eq!(piece.options.as_ref().map(Vec::len), Some(5));
    }

    #[test]
    fn loads_both_json_shapes() {
        let list = ComponentRegistry::from_json(
            r#"[{ "name": "Clock", "label": "Clock", "category": "tool",
                 "props": { "tz": { "type": "string", "default": "UTC", "label": "Zone" } } }]"#,
        )
        .unwrap();
        assert_eq!(list.default_props("Clock").get("tz"), Some(&json!("UTC")));

        let map = ComponentRegistry::from_json(
            r#"{ "Clock": { "name": "ignored", "label": "Clock", "category": "interactive" } }"#,
        )
        .unwrap();
        assert_eq!(map.names().collect::<Vec<_>>(), ["Clock"]);
        assert_eq!(map.categories(), [Category::Interactive]);
    }

    #[test]
    fn rejects_unknown_categories() {
        let err = ComponentRegistry::from_json(
            r#"[{ "name": "X", "label": "X", "category": "game" }]"#,
        );
        assert!(err.is_err());
        assert_eq!("tool".parse::<Category>(), Ok(Category::Tool));
        assert!("game".parse::<Category>().is_err());
    }
}
