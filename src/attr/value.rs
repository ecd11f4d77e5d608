//! Typed property values and the ordered property map.

use compact_str::CompactString;

use super::case::param_case;

/// Declarations of a `style` attribute, in source order.
pub type Style = Vec<(CompactString, String)>;

// =============================================================================
// PropertyValue
// =============================================================================

/// A decoded attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Boolean and overloaded-boolean attributes
    Bool(bool),
    /// Numeric attributes; malformed input decodes to `NaN`
    Number(f64),
    /// Plain attributes
    String(String),
    /// Space- or comma-separated token lists
    List(Vec<String>),
    /// Parsed `style` declarations
    Style(Style),
}

impl PropertyValue {
    /// Borrow as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow as a token list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Borrow as style declarations.
    pub fn as_style(&self) -> Option<&Style> {
        match self {
            Self::Style(style) => Some(style),
            _ => None,
        }
    }

    /// Truthiness for boolean-kind attributes: `false`, `0`, `NaN`, empty
    /// strings and empty lists are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::List(_) | Self::Style(_) => true,
        }
    }

    /// Look up one declaration in a style value. Accepts either
    /// `background-color` or `backgroundColor`.
    pub fn style_property(&self, name: &str) -> Option<&str> {
        let wanted = param_case(name);
        self.as_style()?
            .iter()
            .find(|(prop, _)| param_case(prop) == wanted)
            .map(|(_, value)| value.as_str())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for PropertyValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_owned).collect())
    }
}

impl From<Style> for PropertyValue {
    fn from(value: Style) -> Self {
        Self::Style(value)
    }
}

// =============================================================================
// Properties
// =============================================================================

/// Ordered mapping of property name to typed value.
///
/// Iteration order is insertion order, which is the order the attributes
/// appeared in the source and the order they render in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: Vec<(CompactString, PropertyValue)>,
}

impl Properties {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by property name.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Get a value by property name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut PropertyValue> {
        self.entries.iter_mut().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Check if a property exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Set a value (update in place if it exists, append if not).
    pub fn set(&mut self, name: impl Into<CompactString>, value: impl Into<PropertyValue>) {
        let name = name.into();
        let value = value.into();
        match self.get_mut(&name) {
            Some(slot) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Set a value only if the property is not present yet. Returns whether
    /// the value was stored.
    pub fn insert_if_absent(
        &mut self,
        name: impl Into<CompactString>,
        value: impl Into<PropertyValue>,
    ) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push((name, value.into()));
        true
    }

    /// Remove a property, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        self.entries
            .iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.entries.remove(pos).1)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no property is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<CompactString>,
    V: Into<PropertyValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (k, v) in iter {
            props.set(k, v);
        }
        props
    }
}

// =============================================================================
// Tests
// =============================================================================
