//! Bean definitions and parent-child property overlay.
//!
//! A [`BeanDefinition`] carries the property values to apply to a bean together with its
//! singleton flag. A child definition names a parent definition instead of repeating its values;
//! its effective property set is the parent's effective set with the child's own values laid on
//! top. Definitions are stored by an external registry, which the resolver reaches only through a
//! lookup function from parent name to definition.
//!
//! # Examples
//!
//! ```rust
//! use std::collections::HashMap;
//! use beanprop::{beans::{effective_properties_of, BeanDefinition}, value::{PropertyData, PropertyValueSet}};
//!
//! let mut registry = HashMap::new();
//! registry.insert(
//!     "base".to_string(),
//!     BeanDefinition::new(true, PropertyValueSet::new().with("host", "x").with("port", 80u16)),
//! );
//!
//! let child = BeanDefinition::child("base", true, PropertyValueSet::new().with("port", 8080u16));
//! let effective = effective_properties_of(&child, |name| registry.get(name))?;
//!
//! assert_eq!(effective.names().collect::<Vec<_>>(), ["host", "port"]);
//! assert_eq!(effective.get("port"), Some(&PropertyData::U16(8080)));
//! # Ok::<(), beanprop::Error>(())
//! ```

use std::collections::HashSet;

use crate::{value::PropertyValueSet, BeanConfig, Error, Result};

/// The declaration of one bean: its property values and whether it is shared.
///
/// Equality is deliberately weaker than structural equality: two definitions are equal if their
/// singleton flags and parent names match and neither property set has changes relative to the
/// other. Order of the property values does not matter.
#[derive(Debug, Clone)]
pub struct BeanDefinition {
    singleton: bool,
    properties: PropertyValueSet,
    parent_name: Option<String>,
}

impl BeanDefinition {
    /// Create a definition without parent
    ///
    /// ## Arguments
    /// * `singleton`  - Whether one shared instance is used, or a new one per request
    /// * `properties` - The property values to apply
    #[must_use]
    pub fn new(singleton: bool, properties: PropertyValueSet) -> Self {
        BeanDefinition {
            singleton,
            properties,
            parent_name: None,
        }
    }

    /// Create a definition that inherits the properties of the definition named `parent`
    ///
    /// ## Arguments
    /// * `parent`     - The name the registry knows the parent definition by
    /// * `singleton`  - Whether one shared instance is used, or a new one per request
    /// * `properties` - The property values overriding or extending the parent's
    #[must_use]
    pub fn child(parent: impl Into<String>, singleton: bool, properties: PropertyValueSet) -> Self {
        BeanDefinition {
            singleton,
            properties,
            parent_name: Some(parent.into()),
        }
    }

    /// Returns true if the bean is shared
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.singleton
    }

    /// The definition's own property values, without inherited ones
    #[must_use]
    pub fn properties(&self) -> &PropertyValueSet {
        &self.properties
    }

    /// Replace the definition's own property values
    pub fn set_properties(&mut self, properties: PropertyValueSet) {
        self.properties = properties;
    }

    /// The name of the parent definition, if this is a child definition
    #[must_use]
    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    /// Returns true if this definition inherits from a parent
    #[must_use]
    pub fn is_child(&self) -> bool {
        self.parent_name.is_some()
    }

    /// Resolve the parent chain into a definition without parent
    ///
    /// The result carries the effective property set and this definition's own singleton flag.
    ///
    /// # Errors
    /// See [`DefinitionResolver::effective_properties`].
    pub fn merged<'r, F>(&self, lookup: F) -> Result<BeanDefinition>
    where
        F: Fn(&str) -> Option<&'r BeanDefinition>,
    {
        Ok(BeanDefinition::new(
            self.singleton,
            effective_properties_of(self, lookup)?,
        ))
    }
}

impl PartialEq for BeanDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.singleton == other.singleton
            && self.parent_name == other.parent_name
            && self.properties.changes_since(&other.properties).is_empty()
            && other.properties.changes_since(&self.properties).is_empty()
    }
}

/// Resolves the effective property set of (child) definitions
#[derive(Debug, Clone, Copy, Default)]
pub struct DefinitionResolver {
    config: BeanConfig,
}

impl DefinitionResolver {
    /// Create a resolver; only [`BeanConfig::max_definition_depth`] is used
    #[must_use]
    pub fn new(config: BeanConfig) -> Self {
        DefinitionResolver { config }
    }

    /// Compute the effective property set of `definition`
    ///
    /// A definition without parent yields its own set. A child yields its parent's effective
    /// set, with values of the same name replaced by the child's and the child's other values
    /// appended in the child's order.
    ///
    /// ## Arguments
    /// * `definition` - The definition to resolve
    /// * `lookup`     - Maps a parent name to its definition
    ///
    /// # Errors
    /// Returns [`crate::Error::ParentNotFound`] if `lookup` does not know a parent,
    /// [`crate::Error::ConfigurationCycle`] if a parent name repeats within the chain, or
    /// [`crate::Error::RecursionLimit`] if an acyclic chain has more ancestors than
    /// [`BeanConfig::max_definition_depth`].
    pub fn effective_properties<'r, F>(
        &self,
        definition: &BeanDefinition,
        lookup: F,
    ) -> Result<PropertyValueSet>
    where
        F: Fn(&str) -> Option<&'r BeanDefinition>,
    {
        let mut ancestors: Vec<&'r BeanDefinition> = Vec::new();
        let mut chain: Vec<String> = Vec::new();
        let mut next = definition.parent_name().map(str::to_string);

        while let Some(parent) = next {
            if chain.contains(&parent) {
                chain.push(parent);
                return Err(Error::ConfigurationCycle { chain });
            }
            if ancestors.len() >= self.config.max_definition_depth {
                return Err(self.beyond_depth_limit(chain, parent, &lookup));
            }

            let found = lookup(&parent).ok_or_else(|| Error::ParentNotFound {
                parent: parent.clone(),
            })?;
            tracing::trace!(parent = parent.as_str(), depth = chain.len(), "resolved parent");

            next = found.parent_name().map(str::to_string);
            chain.push(parent);
            ancestors.push(found);
        }

        let mut effective = match ancestors.pop() {
            Some(root) => root.properties().clone(),
            None => return Ok(definition.properties().clone()),
        };
        while let Some(ancestor) = ancestors.pop() {
            effective = effective.overlaid_with(ancestor.properties());
        }
        let effective = effective.overlaid_with(definition.properties());

        tracing::debug!(
            parents = chain.len(),
            properties = effective.len(),
            "resolved effective properties"
        );
        Ok(effective)
    }

    /// Classify a chain that outgrew the depth limit
    ///
    /// Walks the remaining parent names without overlaying anything. A repeated name is still a
    /// cycle; only an acyclic chain is a [`crate::Error::RecursionLimit`].
    fn beyond_depth_limit<'r, F>(&self, mut chain: Vec<String>, parent: String, lookup: &F) -> Error
    where
        F: Fn(&str) -> Option<&'r BeanDefinition>,
    {
        let mut seen: HashSet<String> = chain.iter().cloned().collect();
        let mut next = Some(parent);

        while let Some(parent) = next {
            if !seen.insert(parent.clone()) {
                chain.push(parent);
                return Error::ConfigurationCycle { chain };
            }
            next = lookup(&parent).and_then(|found| found.parent_name().map(str::to_string));
            chain.push(parent);
        }

        Error::RecursionLimit(self.config.max_definition_depth)
    }
}

/// Compute the effective property set of `definition` with the default configuration
///
/// # Errors
/// See [`DefinitionResolver::effective_properties`].
pub fn effective_properties_of<'r, F>(
    definition: &BeanDefinition,
    lookup: F,
) -> Result<PropertyValueSet>
where
    F: Fn(&str) -> Option<&'r BeanDefinition>,
{
    DefinitionResolver::default().effective_properties(definition, lookup)
}
