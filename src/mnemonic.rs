//! BIP39 mnemonic generation.
//!
//! Turns freshly drawn entropy into a checksummed, word-list-encoded phrase:
//! 1. draw 128 or 256 bits from the OS random source;
//! 2. append the first `entropy_bits / 32` bits of SHA-256(entropy) as checksum;
//! 3. slice the combined bitstring into 11-bit indices;
//! 4. map each index to a word of the selected wordlist.
//!
//! See <https://github.com/bitcoin/bips/blob/master/bip-0039.mediawiki>.

use crate::error::GeneratorError;
use crate::wordlist::{Language, WordlistRegistry};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Supported mnemonic lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// 12-word mnemonic (128 bits of entropy)
    Words12 = 12,
    /// 24-word mnemonic (256 bits of entropy)
    Words24 = 24,
}

impl WordCount {
    /// Numeric value of the word count.
    pub fn value(&self) -> usize {
        *self as usize
    }

    /// Entropy bit length for this word count (32 * words / 3).
    pub fn entropy_bits(&self) -> usize {
        self.value() * 32 / 3
    }
}

impl TryFrom<usize> for WordCount {
    type Error = GeneratorError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        match count {
            12 => Ok(WordCount::Words12),
            24 => Ok(WordCount::Words24),
            other => Err(GeneratorError::UnsupportedWordCount(other)),
        }
    }
}

/// Generates mnemonic phrases against an injected wordlist registry.
#[derive(Debug, Clone)]
pub struct MnemonicEngine {
    registry: Arc<WordlistRegistry>,
}

impl MnemonicEngine {
    pub fn new(registry: Arc<WordlistRegistry>) -> Self {
        Self { registry }
    }

    /// Generates a fresh mnemonic phrase of `count` words in `language`.
    ///
    /// The wordlist lookup happens before any entropy is drawn, so an
    /// unsupported language never consumes randomness. Random-source failure
    /// surfaces as [`GeneratorError::EntropyUnavailable`].
    pub fn new_mnemonic(
        &self,
        language: Language,
        count: WordCount,
    ) -> Result<String, GeneratorError> {
        // Fail fast on an unloaded language.
        self.registry.words_for(language)?;
        let entropy = draw_entropy(count.entropy_bits() / 8)?;
        self.mnemonic_from_entropy(language, &entropy)
    }

    /// Encodes fixed entropy bytes as a mnemonic phrase.
    ///
    /// Deterministic for fixed input; the standard BIP39 vectors apply.
    pub fn mnemonic_from_entropy(
        &self,
        language: Language,
        entropy: &[u8],
    ) -> Result<String, GeneratorError> {
        let words = self.registry.words_for(language)?;
        let indices = word_indices(entropy)?;
        let phrase: Vec<&str> = indices.iter().map(|&i| words[i as usize].as_str()).collect();
        Ok(phrase.join(" "))
    }
}

/// Draws `len` cryptographically secure random bytes.
fn draw_entropy(len: usize) -> Result<Vec<u8>, GeneratorError> {
    let mut buf = vec![0u8; len];
    OsRng.try_fill_bytes(&mut buf).map_err(|e| {
        log::error!("OS random source failed: {}", e);
        GeneratorError::EntropyUnavailable(e.to_string())
    })?;
    Ok(buf)
}

/// Splits entropy ∥ checksum into big-endian 11-bit word indices.
///
/// Checksum length is `entropy_bits / 32`; the combined bit length must be
/// divisible by 11 or [`GeneratorError::ChecksumSplit`] is returned.
pub(crate) fn word_indices(entropy: &[u8]) -> Result<Vec<u16>, GeneratorError> {
    let entropy_bits = entropy.len() * 8;
    let checksum_bits = entropy_bits / 32;
    let total_bits = entropy_bits + checksum_bits;
    if total_bits % 11 != 0 {
        return Err(GeneratorError::ChecksumSplit(total_bits));
    }

    let digest = Sha256::digest(entropy);
    let mut indices = Vec::with_capacity(total_bits / 11);
    let mut acc: u32 = 0;
    let mut nbits: usize = 0;

    for &byte in entropy {
        acc = (acc << 8) | byte as u32;
        nbits += 8;
        while nbits >= 11 {
            indices.push(((acc >> (nbits - 11)) & 0x7FF) as u16);
            nbits -= 11;
        }
    }

    let mut remaining = checksum_bits;
    for &byte in digest.iter() {
        if remaining == 0 {
            break;
        }
        let take = remaining.min(8);
        acc = (acc << take) | (byte >> (8 - take)) as u32;
        nbits += take;
        remaining -= take;
        while nbits >= 11 {
            indices.push(((acc >> (nbits - 11)) & 0x7FF) as u16);
            nbits -= 11;
        }
    }

    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlist::WordlistRegistry;

    fn test_engine() -> MnemonicEngine {
        let registry = WordlistRegistry::load_from_dir(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/wordlists"
        ))
        .unwrap();
        MnemonicEngine::new(Arc::new(registry))
    }

    #[test]
    fn test_mnemonic_from_entropy_vectors() {
        // Standard BIP39 English test vectors.
        let engine = test_engine();

        let zeros12 = engine
            .mnemonic_from_entropy(Language::English, &[0u8; 16])
            .unwrap();
        assert_eq!(
            zeros12,
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
        );

        let sevens = engine
            .mnemonic_from_entropy(Language::English, &[0x7f; 16])
            .unwrap();
        assert_eq!(
            sevens,
            "legal winner thank year wave sausage worth useful legal winner thank yellow"
        );

        let eighties = engine
            .mnemonic_from_entropy(Language::English, &[0x80; 16])
            .unwrap();
        assert_eq!(
            eighties,
            "letter advice cage absurd amount doctor acute avoid letter advice cage above"
        );

        let zeros24 = engine
            .mnemonic_from_entropy(Language::English, &[0u8; 32])
            .unwrap();
        assert_eq!(
            zeros24,
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon \
             abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art"
        );
    }

    #[test]
    fn test_new_mnemonic_shape() {
        let engine = test_engine();
        let registry = WordlistRegistry::load_from_dir(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/wordlists"
        ))
        .unwrap();
        let words = registry.words_for(Language::English).unwrap();

        for count in [WordCount::Words12, WordCount::Words24] {
            let phrase = engine.new_mnemonic(Language::English, count).unwrap();
            let parts: Vec<&str> = phrase.split(' ').collect();
            assert_eq!(parts.len(), count.value());
            for word in parts {
                assert!(words.iter().any(|w| w == word), "unknown word: {}", word);
            }
        }
    }

    #[test]
    fn test_word_indices_bit_accounting() {
        // 128 + 4 = 132 = 12 * 11; 256 + 8 = 264 = 24 * 11.
        assert_eq!(word_indices(&[0u8; 16]).unwrap().len(), 12);
        assert_eq!(word_indices(&[0u8; 32]).unwrap().len(), 24);

        // 136 + 4 = 140 is not divisible by 11.
        let err = word_indices(&[0u8; 17]).unwrap_err();
        assert!(matches!(err, GeneratorError::ChecksumSplit(140)));
    }

    #[test]
    fn test_word_indices_in_range() {
        let indices = word_indices(&[0xff; 32]).unwrap();
        assert!(indices.iter().all(|&i| i < 2048));
    }

    #[test]
    fn test_unsupported_word_count() {
        assert!(matches!(
            WordCount::try_from(15),
            Err(GeneratorError::UnsupportedWordCount(15))
        ));
        assert_eq!(WordCount::try_from(12).unwrap(), WordCount::Words12);
        assert_eq!(WordCount::try_from(24).unwrap(), WordCount::Words24);
    }

    #[test]
    fn test_unsupported_language_fails_before_entropy() {
        let engine = test_engine();
        let err = engine
            .new_mnemonic(Language::ChineseSimplified, WordCount::Words12)
            .unwrap_err();
        assert!(matches!(err, GeneratorError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_entropy_bits() {
        assert_eq!(WordCount::Words12.entropy_bits(), 128);
        assert_eq!(WordCount::Words24.entropy_bits(), 256);
    }
}
