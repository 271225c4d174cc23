//! Language-keyed content bundles and the fallback resolver
//!
//! Every consumer resolves localized content through [`resolve`], so the
//! fallback order (requested, then default, then first authored language,
//! then an empty record) is defined in exactly one place.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ids::LanguageCode;

/// Insertion-ordered map of language code to localized record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations<T> {
    entries: Vec<(LanguageCode, T)>,
}

impl<T> Translations<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder-style insert, used heavily by fixtures
    pub fn with(mut self, language: impl Into<LanguageCode>, record: T) -> Self {
        self.insert(language.into(), record);
        self
    }

    /// Insert or replace a record. Replacing keeps the original position.
    pub fn insert(&mut self, language: LanguageCode, record: T) {
        match self.entries.iter_mut().find(|(code, _)| *code == language) {
            Some((_, existing)) => *existing = record,
            None => self.entries.push((language, record)),
        }
    }

    pub fn get(&self, language: &LanguageCode) -> Option<&T> {
        self.entries
            .iter()
            .find(|(code, _)| code == language)
            .map(|(_, record)| record)
    }

    pub fn contains(&self, language: &LanguageCode) -> bool {
        self.get(language).is_some()
    }

    /// First authored entry, in insertion order
    pub fn first(&self) -> Option<&T> {
        self.entries.first().map(|(_, record)| record)
    }

    pub fn languages(&self) -> impl Iterator<Item = &LanguageCode> {
        self.entries.iter().map(|(code, _)| code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LanguageCode, &T)> {
        self.entries.iter().map(|(code, record)| (code, record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Translations<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Default> Translations<T> {
    /// Resolve against the crate-wide default language
    pub fn resolve(&self, requested: &LanguageCode) -> Cow<'_, T> {
        resolve(self, requested, &LanguageCode::default_language())
    }
}

/// Resolve a bundle to a concrete record.
///
/// Order: `requested`, then `default`, then the first entry in insertion
/// order, then `T::default()`. Never fails; callers treat missing fields as
/// empty.
pub fn resolve<'a, T: Clone + Default>(
    bundle: &'a Translations<T>,
    requested: &LanguageCode,
    default: &LanguageCode,
) -> Cow<'a, T> {
    bundle
        .get(requested)
        .or_else(|| bundle.get(default))
        .or_else(|| bundle.first())
        .map(Cow::Borrowed)
        .unwrap_or_default()
}

impl<T: Serialize> Serialize for Translations<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, record) in &self.entries {
            map.serialize_entry(code, record)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Translations<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TranslationsVisitor(PhantomData))
    }
}

struct TranslationsVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for TranslationsVisitor<T> {
    type Value = Translations<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object keyed by language code, or null")
    }

    // Backends aggregate translations with a LEFT JOIN, so a record with no
    // localized rows arrives as `null`.
    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Translations::new())
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Translations::new())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut translations = Translations::new();
        while let Some((code, record)) = access.next_entry::<LanguageCode, T>()? {
            translations.insert(code, record);
        }
        Ok(translations)
    }
}

/// Treat an explicit JSON `null` the same as a missing field
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
