//! Remote collection identifiers.

use serde::{Deserialize, Serialize};

/// How often a collection is expected to change.
///
/// The class decides which TTL the cache applies to a snapshot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum CollectionClass {
    /// Reference data that rarely changes (categories, currencies)
    Static,
    /// Data the user mutates during a session (friends, groups)
    Volatile,
}

/// A named remote collection whose snapshot can be cached and resolved
/// against.
///
/// # Examples
///
/// ```
/// use tally_core::{CollectionClass, CollectionKey};
/// use std::str::FromStr;
///
/// let key = CollectionKey::from_str("friends").unwrap();
/// assert_eq!(key, CollectionKey::Friends);
/// assert_eq!(key.to_string(), "friends");
/// assert_eq!(key.class(), CollectionClass::Volatile);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CollectionKey {
    /// The current user's friends
    Friends,
    /// Groups the current user belongs to
    Groups,
    /// Expense categories, including subcategories
    Categories,
    /// Supported currencies
    Currencies,
}

impl CollectionKey {
    /// Returns the change-frequency class of this collection.
    pub fn class(&self) -> CollectionClass {
        match self {
            CollectionKey::Friends | CollectionKey::Groups => CollectionClass::Volatile,
            CollectionKey::Categories | CollectionKey::Currencies => CollectionClass::Static,
        }
    }

    /// Returns the key's canonical string form.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
