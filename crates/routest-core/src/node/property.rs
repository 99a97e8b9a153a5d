//! Schema-declared property values

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A property declared by a schema.
///
/// Every declared property starts out `Unset` and becomes `Set` only when the
/// data document provides a value (or a parent cascades one down).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Property<T> {
    #[default]
    Unset,
    Set(T),
}

impl<T> Property<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset => None,
        }
    }

    /// Mutable access, turning `Unset` into `Set(T::default())` first.
    pub fn get_or_insert_default(&mut self) -> &mut T
    where
        T: Default,
    {
        match self {
            Self::Set(value) => value,
            Self::Unset => {
                *self = Self::Set(T::default());
                self.get_or_insert_default()
            }
        }
    }
}

impl<T: DeserializeOwned> Property<T> {
    /// Read a property from a document value. `null` leaves it unset.
    pub fn from_value(value: &Value) -> serde_json::Result<Self> {
        if value.is_null() {
            return Ok(Self::Unset);
        }
        serde_json::from_value(value.clone()).map(Self::Set)
    }
}

impl<T> From<Option<T>> for Property<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Self::Set)
    }
}

impl<T: Serialize> Serialize for Property<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Set(value) => value.serialize(serializer),
            Self::Unset => serializer.serialize_none(),
        }
    }
}
