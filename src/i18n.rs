//! Locale bundles and template translation.
//!
//! A [`Translator`] is bound to one [`Locale`] at construction and holds that
//! locale's bundle for its whole lifetime. Lookups never fail: a key missing
//! from the bundle resolves to itself, so partial catalogs degrade to the
//! source text instead of blocking output.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, UiError};
use crate::template::{ParamMap, substitute};

/// Built-in locales.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    /// English, the source language of every template.
    #[default]
    EnUs,
    /// French.
    FrFr,
}

/// Ordered list of built-in locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::EnUs, Locale::FrFr];

impl Locale {
    /// Canonical identifier (`en-US`, `fr-FR`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::FrFr => "fr-FR",
        }
    }

    /// Parse a locale identifier.
    ///
    /// Case-insensitive, accepts `-` or `_` separators, ignores an encoding
    /// suffix (`fr_FR.UTF-8`) and maps a bare language (`fr`) to its
    /// built-in region.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let value = value.split(['.', '@']).next().unwrap_or("");
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::EnUs),
            "fr" => Some(Self::FrFr),
            _ => None,
        }
    }

    fn builtin_bundle(self) -> &'static str {
        match self {
            Self::EnUs => include_str!("../locales/en-US.all.json"),
            Self::FrFr => include_str!("../locales/fr-FR.all.json"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a bundle file.
#[derive(Debug, Deserialize)]
struct BundleEntry {
    id: String,
    #[serde(default)]
    translation: String,
}

fn parse_bundle(json: &str) -> std::result::Result<HashMap<String, String>, serde_json::Error> {
    let entries: Vec<BundleEntry> = serde_json::from_str(json)?;
    Ok(entries
        .into_iter()
        .filter(|e| !e.translation.is_empty())
        .map(|e| (e.id, e.translation))
        .collect())
}

/// Resolves template keys for one locale and substitutes parameters.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    locale: Locale,
    entries: HashMap<String, String>,
}

impl Translator {
    /// Create a translator for a built-in locale.
    pub fn new(locale: Locale) -> Self {
        // Checked by test_builtin_bundles_parse.
        let entries = parse_bundle(locale.builtin_bundle()).unwrap_or_default();
        Self { locale, entries }
    }

    /// Create a translator from a locale identifier.
    ///
    /// Returns the translator and whether the identifier was recognized;
    /// unknown or absent identifiers fall back to `en-US`.
    pub fn for_identifier(identifier: Option<&str>) -> (Self, bool) {
        match identifier.map(Locale::parse) {
            Some(Some(locale)) => (Self::new(locale), true),
            Some(None) => (Self::new(Locale::EnUs), false),
            None => (Self::new(Locale::EnUs), true),
        }
    }

    /// Create a translator with an explicit set of entries.
    pub fn with_entries<K, V>(locale: Locale, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            locale,
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(_, v): &(String, String)| !v.is_empty())
                .collect(),
        }
    }

    /// Merge a bundle file over the current entries.
    pub fn extend_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let json =
            std::fs::read_to_string(path).map_err(|e| UiError::locale_bundle(path, e))?;
        let entries = parse_bundle(&json).map_err(|e| UiError::locale_bundle(path, e))?;
        let count = entries.len();
        self.entries.extend(entries);
        Ok(count)
    }

    /// Active locale.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Look up `key`, echoing it when the bundle has no entry.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Whether `key` has an entry in the active bundle.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Resolve `template` and substitute parameters from the first map.
    pub fn translate(&self, template: &str, maps: &[ParamMap]) -> String {
        substitute(self.resolve(template), maps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use std::io::Write;

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("fr-FR"), Some(Locale::FrFr));
        assert_eq!(Locale::parse("fr_FR.UTF-8"), Some(Locale::FrFr));
        assert_eq!(Locale::parse("FR"), Some(Locale::FrFr));
        assert_eq!(Locale::parse("en_GB"), Some(Locale::EnUs));
        assert_eq!(Locale::parse("ja-JP"), None);
        assert_eq!(Locale::parse(""), None);
        assert_eq!(Locale::parse(".UTF-8"), None);
    }

    #[test]
    fn test_locale_display() {
        assert_eq!(Locale::FrFr.to_string(), "fr-FR");
        assert_eq!(SUPPORTED_LOCALES.len(), 2);
    }

    #[test]
    fn test_builtin_bundles_parse() {
        for locale in SUPPORTED_LOCALES {
            assert!(parse_bundle(locale.builtin_bundle()).is_ok(), "{locale}");
        }
    }

    #[test]
    fn test_english_echoes_key() {
        let translator = Translator::new(Locale::EnUs);
        assert_eq!(translator.resolve("some-template"), "some-template");
    }

    #[test]
    fn test_french_translation() {
        let translator = Translator::new(Locale::FrFr);
        assert_eq!(
            translator.resolve("   View allowable quotas with 'CF_NAME quotas'"),
            "   Affichez les quotas pouvant être alloués avec 'CF_NAME quotas'"
        );
    }

    #[test]
    fn test_unknown_key_degrades_to_key() {
        let translator = Translator::new(Locale::FrFr);
        assert_eq!(translator.resolve("no such key"), "no such key");
        assert!(!translator.contains("no such key"));
    }

    #[test]
    fn test_empty_translation_is_ignored() {
        let translator = Translator::new(Locale::FrFr);
        assert_eq!(translator.resolve("Not translated yet"), "Not translated yet");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let translator = Translator::new(Locale::FrFr);
        let first = translator.resolve("FEATURE FLAGS").to_string();
        let second = translator.resolve("FEATURE FLAGS").to_string();
        assert_eq!(first, second);
        assert_eq!(first, "INDICATEURS DE FONCTION");
    }

    #[test]
    fn test_translate_substitutes_after_lookup() {
        let translator = Translator::new(Locale::FrFr);
        let out = translator.translate(
            "\nTIP: Use '{{.Command}}' to target new org",
            &[params! { "Command" => "foo" }],
        );
        assert_eq!(
            out,
            "\nASTUCE : utilisez 'foo' pour cibler une nouvelle organisation"
        );
    }

    #[test]
    fn test_for_identifier_fallback() {
        let (translator, recognized) = Translator::for_identifier(Some("fr_FR.UTF-8"));
        assert_eq!(translator.locale(), Locale::FrFr);
        assert!(recognized);

        let (translator, recognized) = Translator::for_identifier(Some("tlh-KLINGON"));
        assert_eq!(translator.locale(), Locale::EnUs);
        assert!(!recognized);

        let (translator, recognized) = Translator::for_identifier(None);
        assert_eq!(translator.locale(), Locale::EnUs);
        assert!(recognized);
    }

    #[test]
    fn test_with_entries() {
        let translator = Translator::with_entries(Locale::FrFr, [("hello", "bonjour"), ("skip", "")]);
        assert_eq!(translator.resolve("hello"), "bonjour");
        assert_eq!(translator.resolve("skip"), "skip");
    }

    #[test]
    fn test_extend_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "FEATURE FLAGS", "translation": "DRAPEAUX"}}, {{"id": "hello", "translation": "salut"}}]"#
        )
        .unwrap();

        let mut translator = Translator::new(Locale::FrFr);
        let count = translator.extend_from_file(file.path()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(translator.resolve("FEATURE FLAGS"), "DRAPEAUX");
        assert_eq!(translator.resolve("hello"), "salut");
        assert_eq!(translator.resolve("ADVANCED"), "AVANCE");
    }

    #[test]
    fn test_extend_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let mut translator = Translator::new(Locale::FrFr);
        let err = translator.extend_from_file(file.path()).unwrap_err();
        assert!(matches!(err, UiError::LocaleBundle { .. }));

        let err = translator
            .extend_from_file("/definitely/not/here.json")
            .unwrap_err();
        assert!(matches!(err, UiError::LocaleBundle { .. }));
    }
}
