//! Closed symbolic enumerations with name and value lookup.
//!
//! Every enumeration is backed by a static table of [`Symbol`] records built
//! at compile time. Lookup scans the table in declaration order; equality and
//! ordering follow the numeric value.

use thiserror::Error;


/// Immutable record describing one enumeration member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    /// Unique name, as used on the wire.
    pub name: &'static str,
    /// Unique numeric value.
    pub value: i32,
    /// Human readable label.
    pub display_name: &'static str,
}

/// Enumeration lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerationError {
    /// No member carries the requested name or value.
    #[error("'{value}' is not a valid {kind} in {type_name}")]
    NotFound {
        /// The requested name or value.
        value: String,
        /// `name` or `value`.
        kind: &'static str,
        /// Enumeration type name.
        type_name: &'static str,
    },
}

/// A closed set of symbolic values.
pub trait Enumeration: Copy + Eq + 'static {
    /// Type name used in lookup errors.
    const TYPE_NAME: &'static str;

    /// All members in declaration order.
    fn all() -> &'static [Self];

    /// The record backing this member.
    fn symbol(&self) -> &'static Symbol;

    /// Member name.
    fn name(&self) -> &'static str {
        self.symbol().name
    }

    /// Member value.
    fn value(&self) -> i32 {
        self.symbol().value
    }

    /// Member label.
    fn display_name(&self) -> &'static str {
        self.symbol().display_name
    }

    /// Finds the member with the given name. Blank names never match.
    fn try_by_name(name: &str) -> Option<Self> {
        if name.trim().is_empty() {
            return None;
        }
        Self::all().iter().copied().find(|item| item.name() == name)
    }

    /// Finds the member with the given value.
    fn try_by_value(value: i32) -> Option<Self> {
        Self::all().iter().copied().find(|item| item.value() == value)
    }

    /// Finds the member with the given name.
    ///
    /// # Errors
    /// Returns [`EnumerationError::NotFound`] when no member matches.
    fn by_name(name: &str) -> Result<Self, EnumerationError> {
        Self::try_by_name(name).ok_or_else(|| EnumerationError::NotFound {
            value: name.to_string(),
            kind: "name",
            type_name: Self::TYPE_NAME,
        })
    }

    /// Finds the member with the given value.
    ///
    /// # Errors
    /// Returns [`EnumerationError::NotFound`] when no member matches.
    fn by_value(value: i32) -> Result<Self, EnumerationError> {
        Self::try_by_value(value).ok_or_else(|| EnumerationError::NotFound {
            value: value.to_string(),
            kind: "value",
            type_name: Self::TYPE_NAME,
        })
    }
}

/// Lists every member of `T` in declaration order.
#[must_use]
pub fn all<T: Enumeration>() -> &'static [T] {
    T::all()
}

/// Declares a closed enumeration backed by a static symbol table.
///
/// Members serialize as their name and deserialize through
/// [`Enumeration::by_name`].
macro_rules! enumeration {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = ($value:expr, $display:expr)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            const SYMBOLS: &'static [$crate::enumeration::Symbol] = &[
                $(
                    $crate::enumeration::Symbol {
                        name: stringify!($variant),
                        value: $value,
                        display_name: $display,
                    },
                )+
            ];

            const MEMBERS: &'static [$name] = &[$($name::$variant,)+];
        }

        impl $crate::enumeration::Enumeration for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn all() -> &'static [Self] {
                Self::MEMBERS
            }

            fn symbol(&self) -> &'static $crate::enumeration::Symbol {
                &Self::SYMBOLS[*self as usize]
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                $crate::enumeration::Enumeration::value(self)
                    .cmp(&$crate::enumeration::Enumeration::value(other))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::enumeration::Enumeration::name(self))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::enumeration::Enumeration::name(self))
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let name = String::deserialize(deserializer)?;
                <$name as $crate::enumeration::Enumeration>::by_name(&name)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use enumeration;
