use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;

use crate::error::ConfigurationError;
use crate::property::{Property, PropertyInfo};

/// A type whose instances can be produced by a [`TypedBuilder`].
///
/// Implemented by `#[derive(Buildable)]`, which generates one typed
/// [`Property`] key per named field and collects the runtime
/// [`PropertyInfo`] descriptors in field declaration order.
pub trait Buildable: Sized + 'static {
    /// Short type name, used in error messages.
    const TYPE_NAME: &'static str;

    /// Descriptors for every declared property, in declaration order.
    const PROPERTIES: &'static [PropertyInfo<Self>];

    fn builder() -> TypedBuilder<Self>
    where
        Self: Default,
    {
        TypedBuilder::new()
    }
}

/// Accumulates property assignments for `T` and produces validated
/// instances on demand.
///
/// Creating a builder requires `T: Default`; the factory is resolved once,
/// at creation, and never re-checked. Assignments are keyed by property
/// name, so setting the same property twice keeps only the last value.
/// [`build`](TypedBuilder::build) borrows the builder, which stays usable
/// for further assignments and further builds.
pub struct TypedBuilder<T: Buildable> {
    factory: fn() -> T,
    assignments: HashMap<&'static str, Box<dyn Fn(&mut T)>>,
}

impl<T: Buildable> TypedBuilder<T> {
    pub fn new() -> Self
    where
        T: Default,
    {
        Self {
            factory: T::default,
            assignments: HashMap::new(),
        }
    }

    /// Records `value` for the property named by `property`, replacing any
    /// earlier assignment to it. No instance is touched until
    /// [`build`](TypedBuilder::build).
    pub fn set<V, I>(mut self, property: Property<T, V>, value: I) -> Self
    where
        V: Clone + 'static,
        I: Into<V>,
    {
        let value: V = value.into();
        let write = property.write();
        self.assignments
            .insert(property.name(), Box::new(move |x| write(x, value.clone())));
        self
    }

    /// String-keyed counterpart of [`set`](TypedBuilder::set) for callers
    /// that do not hold a typed property key.
    ///
    /// The name and the supplied value type are validated against
    /// `T::PROPERTIES` immediately; on failure the assignment map is left
    /// untouched.
    pub fn set_named<V>(&mut self, name: &str, value: V) -> Result<&mut Self, ConfigurationError>
    where
        V: Any + Clone,
    {
        let Some(info) = T::PROPERTIES.iter().find(|info| info.name == name) else {
            return Err(ConfigurationError::UnknownProperty {
                type_name: T::TYPE_NAME,
                selector: name.to_string(),
            });
        };

        if (info.value_type)() != TypeId::of::<V>() {
            return Err(ConfigurationError::ValueTypeMismatch {
                type_name: T::TYPE_NAME,
                property: info.name,
                supplied: type_name::<V>(),
            });
        }

        let write = info.write_any;
        self.assignments.insert(
            info.name,
            Box::new(move |x| {
                write(x, &value);
            }),
        );
        Ok(self)
    }

    /// Constructs a fresh default-initialized instance, applies every
    /// recorded assignment, and validates all remaining properties.
    ///
    /// Properties are visited in declaration order. An assignment overrides
    /// unconditionally, even when the recorded value is `None`. An unset
    /// required property fails regardless of its current value; an unset,
    /// currently-null property declared non-nullable fails as well. The
    /// first violation aborts the build.
    pub fn build(&self) -> Result<T, ConfigurationError> {
        let mut instance = (self.factory)();

        for info in T::PROPERTIES {
            if let Some(assignment) = self.assignments.get(info.name) {
                assignment(&mut instance);
                continue;
            }

            if info.required {
                return Err(ConfigurationError::RequiredNotSet {
                    property: info.name,
                });
            }

            if !(info.is_null)(&instance) {
                continue;
            }

            if !info.nullable {
                return Err(ConfigurationError::NonNullableNull {
                    property: info.name,
                });
            }
        }

        Ok(instance)
    }
}

impl<T: Buildable> std::fmt::Debug for TypedBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedBuilder")
            .field("type", &T::TYPE_NAME)
            .finish_non_exhaustive()
    }
}

impl<T: Buildable + Default> Default for TypedBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
