use std::fmt;

use indexmap::IndexMap;

use crate::value::PropertyData;

/// The name and value of an individual property.
///
/// The value does not need to have the final type of the property it will be applied to:
/// the [`crate::beans::PropertyAccessor`] converts it on write, as this object knows nothing
/// about the beans it will be applied to.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    name: String,
    value: PropertyData,
}

impl PropertyValue {
    /// Create a new property value
    ///
    /// ## Arguments
    /// * `name`  - Name of the property
    /// * `value` - Value of the property, possibly before type conversion
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<PropertyData>) -> Self {
        PropertyValue {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The name of the property
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value of the property
    #[must_use]
    pub fn value(&self) -> &PropertyData {
        &self.value
    }

    /// Split into name and value
    #[must_use]
    pub fn into_parts(self) -> (String, PropertyData) {
        (self.name, self.value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyValue: name='{}'; value=[{}]", self.name, self.value)
    }
}

/// An ordered, name-unique collection of [`PropertyValue`]s comprising one update.
///
/// Adding a value under a name that is already present replaces the existing entry in place,
/// keeping its position. Iteration follows insertion order.
///
/// # Examples
///
/// ```rust
/// use beanprop::value::{PropertyData, PropertyValueSet};
///
/// let before = PropertyValueSet::new()
///     .with("host", "localhost")
///     .with("port", 80u16);
/// let after = before.clone().with("port", 8080u16);
///
/// let changes = after.changes_since(&before);
/// assert_eq!(changes.len(), 1);
/// assert_eq!(changes.get("port"), Some(&PropertyData::U16(8080)));
/// assert!(before.changes_since(&before).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyValueSet {
    values: IndexMap<String, PropertyValue>,
}

impl PropertyValueSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property value, replacing an existing value of the same name in place
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<PropertyData>) {
        self.add_property_value(PropertyValue::new(name, value));
    }

    /// Add a complete [`PropertyValue`], replacing an existing value of the same name in place
    pub fn add_property_value(&mut self, value: PropertyValue) {
        self.values.insert(value.name.clone(), value);
    }

    /// Builder form of [`PropertyValueSet::add`]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyData>) -> Self {
        self.add(name, value);
        self
    }

    /// Returns the value of the named property
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyData> {
        self.values.get(name).map(PropertyValue::value)
    }

    /// Returns the named [`PropertyValue`]
    #[must_use]
    pub fn property_value(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    /// Is there a value for this property?
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Remove the named property, keeping the order of the remaining entries
    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        self.values.shift_remove(name)
    }

    /// Number of property values
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the set holds no values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the property values in order
    pub fn iter(&self) -> impl Iterator<Item = &PropertyValue> {
        self.values.values()
    }

    /// Iterate over the property names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Return the changes since a previous set.
    ///
    /// The result holds every entry of `self` that is absent from `old`, or present there with
    /// a different value. Entries only present in `old` are never reported, so this is a
    /// one-directional diff. An empty result means there are no changes.
    #[must_use]
    pub fn changes_since(&self, old: &PropertyValueSet) -> PropertyValueSet {
        self.iter()
            .filter(|value| old.property_value(value.name()) != Some(*value))
            .cloned()
            .collect()
    }

    /// Overlay `overrides` on top of this set.
    ///
    /// Entries of `self` keep their position and take the value of a same-named override;
    /// override-only names follow in the order of `overrides`.
    #[must_use]
    pub fn overlaid_with(&self, overrides: &PropertyValueSet) -> PropertyValueSet {
        let mut merged = self.clone();
        merged.extend(overrides.iter().cloned());
        merged
    }
}

impl FromIterator<PropertyValue> for PropertyValueSet {
    fn from_iter<I: IntoIterator<Item = PropertyValue>>(iter: I) -> Self {
        let mut set = PropertyValueSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<PropertyValue> for PropertyValueSet {
    fn extend<I: IntoIterator<Item = PropertyValue>>(&mut self, iter: I) {
        for value in iter {
            self.add_property_value(value);
        }
    }
}

impl IntoIterator for PropertyValueSet {
    type Item = PropertyValue;
    type IntoIter = indexmap::map::IntoValues<String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_values()
    }
}

impl<'a> IntoIterator for &'a PropertyValueSet {
    type Item = &'a PropertyValue;
    type IntoIter = indexmap::map::Values<'a, String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.values()
    }
}
