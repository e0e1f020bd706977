/// Static catalog of categories and their candidate words
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use anyhow::Context as _;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use thiserror::Error;

/// Built-in catalog used when no word file is supplied
const DEFAULT_WORDS: &[(&str, &[&str])] = &[
    ("animals", &["ELEPHANT", "GIRAFFE", "PENGUIN", "DOLPHIN", "KANGAROO"]),
    ("countries", &["FRANCE", "JAPAN", "BRAZIL", "CANADA", "EGYPT"]),
    ("fruits", &["APPLE", "BANANA", "ORANGE", "MANGO", "GRAPE"]),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordBankError {
    #[error("word bank has no categories")]
    Empty,
    #[error("category name must not be blank")]
    BlankCategory,
    #[error("category '{0}' is listed more than once")]
    DuplicateCategory(String),
    #[error("category '{0}' has no words")]
    EmptyCategory(String),
    #[error("category '{0}' contains an empty word")]
    EmptyWord(String),
    #[error("word '{word}' in category '{category}' must contain only letters A-Z")]
    InvalidWord { category: String, word: String },
    #[error("invalid word bank JSON: {0}")]
    Json(String),
}

/// Name of a group of candidate words, e.g. "animals"
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Uppercase `word` and check it is a non-empty run of A-Z
pub(crate) fn normalize_word(category: &str, word: &str) -> Result<String, WordBankError> {
    let word = word.trim().to_ascii_uppercase();
    if word.is_empty() {
        return Err(WordBankError::EmptyWord(category.to_string()));
    }
    if !word.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(WordBankError::InvalidWord {
            category: category.to_string(),
            word,
        });
    }
    Ok(word)
}

/// Category entries in document order, repeated keys included
struct RawBank(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for RawBank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawBankVisitor;

        impl<'de> Visitor<'de> for RawBankVisitor {
            type Value = RawBank;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category names to word lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawBank, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Vec<String>>()? {
                    entries.push(entry);
                }
                Ok(RawBank(entries))
            }
        }

        deserializer.deserialize_map(RawBankVisitor)
    }
}

impl TryFrom<RawBank> for WordBank {
    type Error = WordBankError;

    fn try_from(raw: RawBank) -> Result<Self, Self::Error> {
        Self::new(raw.0)
    }
}

/// Validated mapping from category to its uppercase words.
///
/// Categories iterate in lexicographic order so seeded selection is
/// reproducible regardless of how the bank was built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawBank")]
pub struct WordBank {
    // Sorted by category, never empty, no category without words
    categories: Vec<(Category, Vec<String>)>,
}

impl WordBank {
    /// Build a bank from raw category/word pairs, normalizing words to uppercase.
    ///
    /// Category names are trimmed; two names that trim to the same text are
    /// rejected rather than merged. Repeated words within a category are kept.
    pub fn new<C, W, I>(entries: I) -> Result<Self, WordBankError>
    where
        I: IntoIterator<Item = (C, Vec<W>)>,
        C: Into<String>,
        W: AsRef<str>,
    {
        let mut categories: BTreeMap<Category, Vec<String>> = BTreeMap::new();

        for (name, words) in entries {
            let name: String = name.into();
            let name = name.trim();
            if name.is_empty() {
                return Err(WordBankError::BlankCategory);
            }
            if words.is_empty() {
                return Err(WordBankError::EmptyCategory(name.to_string()));
            }
            let category = Category::new(name);
            if categories.contains_key(&category) {
                return Err(WordBankError::DuplicateCategory(name.to_string()));
            }

            let normalized = words
                .iter()
                .map(|word| normalize_word(name, word.as_ref()))
                .collect::<Result<Vec<_>, _>>()?;
            categories.insert(category, normalized);
        }

        if categories.is_empty() {
            return Err(WordBankError::Empty);
        }

        Ok(Self {
            categories: categories.into_iter().collect(),
        })
    }

    /// Parse a JSON object of the form `{"animals": ["cat", "dog"]}`.
    /// A category key that appears twice is an error.
    pub fn from_json(json: &str) -> Result<Self, WordBankError> {
        let raw: RawBank =
            serde_json::from_str(json).map_err(|e| WordBankError::Json(e.to_string()))?;
        Self::try_from(raw)
    }

    /// Read and parse a JSON word bank from disk
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word bank from {}", path.display()))?;
        let bank = Self::from_json(&contents)
            .with_context(|| format!("Failed to load word bank {}", path.display()))?;
        Ok(bank)
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().map(|(c, _)| c)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn words(&self, category: &Category) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, w)| w.as_slice())
    }

    /// Category at `index` in iteration order, with its words.
    /// Panics if `index >= category_count()`.
    pub(crate) fn entry(&self, index: usize) -> (&Category, &[String]) {
        let (category, words) = &self.categories[index];
        (category, words)
    }

    pub fn contains(&self, category: &Category, word: &str) -> bool {
        self.words(category)
            .is_some_and(|words| words.iter().any(|w| w == word))
    }
}

impl Default for WordBank {
    fn default() -> Self {
        let categories = DEFAULT_WORDS
            .iter()
            .map(|(name, words)| {
                (
                    Category::new(*name),
                    words.iter().map(|w| w.to_string()).collect(),
                )
            })
            .collect();
        Self { categories }
    }
}
