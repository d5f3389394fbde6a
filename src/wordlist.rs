//! Language-keyed BIP39 wordlist registry.
//!
//! The registry is populated once at startup from a directory of wordlist
//! files (one file per language, named after the language identifier) and is
//! read-only afterwards. Files whose base name is not a supported language
//! identifier are ignored, as are files that do not hold exactly 2048 words.

use crate::error::GeneratorError;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use std::{fmt, fs, io};

/// Number of words in a BIP39 wordlist.
pub const WORDLIST_LEN: usize = 2048;

/// Languages the registry recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    English,
    ChineseSimplified,
}

impl Language {
    /// All recognized languages.
    pub const ALL: [Language; 2] = [Language::English, Language::ChineseSimplified];

    /// Lowercase identifier, used as the wordlist file base name.
    pub fn identifier(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::ChineseSimplified => "chinese_simplified",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Language {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.identifier().eq_ignore_ascii_case(s))
            .ok_or_else(|| GeneratorError::UnsupportedLanguage(s.to_string()))
    }
}

/// Immutable mapping from language to its ordered 2048-word list.
#[derive(Debug, Clone)]
pub struct WordlistRegistry {
    words: BTreeMap<Language, Vec<String>>,
}

impl WordlistRegistry {
    /// Builds a registry from an already-assembled word table.
    pub fn from_words(words: BTreeMap<Language, Vec<String>>) -> Self {
        Self { words }
    }

    /// Reads every wordlist file from `dir`.
    ///
    /// A file is loaded when its base name (extension stripped) parses as a
    /// [`Language`] and its whitespace-separated contents hold exactly 2048
    /// words; anything else is skipped.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> io::Result<Self> {
        let mut words = BTreeMap::new();
        for entry in fs::read_dir(dir.as_ref())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(language) = Language::from_str(stem) else {
                continue;
            };
            let contents = fs::read_to_string(&path)?;
            let list: Vec<String> = contents.split_whitespace().map(str::to_string).collect();
            if list.len() != WORDLIST_LEN {
                log::warn!(
                    "skipping wordlist {}: {} words, expected {}",
                    path.display(),
                    list.len(),
                    WORDLIST_LEN
                );
                continue;
            }
            words.insert(language, list);
        }
        Ok(Self { words })
    }

    /// Languages with a loaded wordlist.
    pub fn languages(&self) -> Vec<Language> {
        self.words.keys().copied().collect()
    }

    /// Case-insensitive query: is a wordlist loaded for the named language?
    pub fn is_supported(&self, name: &str) -> bool {
        Language::from_str(name)
            .map(|lang| self.words.contains_key(&lang))
            .unwrap_or(false)
    }

    /// The ordered word sequence for `language`.
    pub fn words_for(&self, language: Language) -> Result<&[String], GeneratorError> {
        self.words
            .get(&language)
            .map(Vec::as_slice)
            .ok_or_else(|| GeneratorError::UnsupportedLanguage(language.to_string()))
    }
}
