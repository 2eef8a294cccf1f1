//! Locales and locale-keyed values.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Cultures the event site is published in.
///
/// Declaration order is the serialization order of [`Localized`] maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "ar")]
    Ar,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::EnUs, Locale::Ar];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::Ar => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A value that varies by culture, serialized as `{"en-US": .., "ar": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Localized<T>(BTreeMap<Locale, T>);

impl<T> Localized<T> {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builds a value for every locale in [`Locale::ALL`].
    pub fn from_fn(mut f: impl FnMut(Locale) -> T) -> Self {
        Self(Locale::ALL.into_iter().map(|l| (l, f(l))).collect())
    }

    pub fn get(&self, locale: Locale) -> Option<&T> {
        self.0.get(&locale)
    }

    pub fn insert(&mut self, locale: Locale, value: T) -> Option<T> {
        self.0.insert(locale, value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Locale, &T)> {
        self.0.iter().map(|(l, v)| (*l, v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Maps every present locale's value, keeping the key set.
    pub fn map<U>(&self, mut f: impl FnMut(Locale, &T) -> U) -> Localized<U> {
        Localized(self.0.iter().map(|(l, v)| (*l, f(*l, v))).collect())
    }
}

impl<T: Clone> Localized<T> {
    /// The same value in every locale. No translation is performed.
    pub fn uniform(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl<T> Default for Localized<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(Locale, T)> for Localized<T> {
    fn from_iter<I: IntoIterator<Item = (Locale, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// Cultures we don't publish in are ignored rather than rejected.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Localized<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, T>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(code, value)| Locale::from_code(&code).map(|l| (l, value)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_serialization_order() {
        let title = Localized::uniform("Expo".to_string());
        let json = serde_json::to_string(&title).unwrap();
        assert_eq!(json, r#"{"en-US":"Expo","ar":"Expo"}"#);
    }

    #[test]
    fn test_unknown_culture_ignored() {
        let parsed: Localized<String> =
            serde_json::from_str(r#"{"ar":"a","fr-FR":"f","en-US":"e"}"#).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get(Locale::EnUs).map(String::as_str), Some("e"));
        assert_eq!(parsed.get(Locale::Ar).map(String::as_str), Some("a"));
    }

    #[test]
    fn test_locale_codes() {
        assert_eq!(Locale::from_code("en-US"), Some(Locale::EnUs));
        assert_eq!(Locale::from_code("ar"), Some(Locale::Ar));
        assert_eq!(Locale::from_code("en"), None);
        assert_eq!(Locale::Ar.to_string(), "ar");
    }

    #[test]
    fn test_map_keeps_keys() {
        let mut partial = Localized::new();
        partial.insert(Locale::Ar, 2);
        let doubled = partial.map(|_, v| v * 2);
        assert_eq!(doubled.get(Locale::Ar), Some(&4));
        assert_eq!(doubled.get(Locale::EnUs), None);
    }
}
