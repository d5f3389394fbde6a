//! Crate-wide error type for wallet generation operations.

use std::error::Error as StdError;
use std::fmt;

/// Custom error type covering mnemonic, seed, derivation, and multisig operations.
#[derive(Debug)]
pub enum GeneratorError {
    /// The facade was invoked with an empty or incomplete argument set
    ArgsMustBeNotNull,
    /// The requested language has no loaded wordlist
    UnsupportedLanguage(String),
    /// The requested mnemonic word count is not 12 or 24
    UnsupportedWordCount(usize),
    /// Entropy + checksum bit length is not divisible by 11 (internal invariant breach)
    ChecksumSplit(usize),
    /// The secure random source failed to produce entropy
    EntropyUnavailable(String),
    /// A derivation path segment is not a decimal index with optional hardening marker
    InvalidPathSegment(String),
    /// The path's purpose code is not one of the accepted hardened purposes (44', 49', 84')
    UnsupportedPurpose(String),
    /// Error propagated from the BIP32 key-derivation primitive
    KeyDerivation(bitcoin::bip32::Error),
    /// A required multisig argument (n, m, or the public-key list) is absent
    MultisigArgsMissing(&'static str),
    /// N or M is outside the accepted bounds (1 <= N <= 16, M >= N, M >= 1)
    MultisigBoundsInvalid { n: u8, m: u8 },
    /// The public-key list length does not equal M
    MultisigKeyCountMismatch { expected: usize, actual: usize },
    /// Hex-encoded input (seed or public key) could not be decoded
    HexDecode(hex::FromHexError),
    /// Error from the address/script encoding primitive
    Encoding(String),
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::ArgsMustBeNotNull => {
                write!(f, "Input args must be not null")
            }
            GeneratorError::UnsupportedLanguage(lang) => {
                write!(f, "Unsupported wordlist language: {}", lang)
            }
            GeneratorError::UnsupportedWordCount(count) => {
                write!(f, "Unsupported word count: {}. Expected 12 or 24", count)
            }
            GeneratorError::ChecksumSplit(bits) => {
                write!(f, "Checksum split error: {} bits is not divisible by 11", bits)
            }
            GeneratorError::EntropyUnavailable(msg) => {
                write!(f, "Secure random source unavailable: {}", msg)
            }
            GeneratorError::InvalidPathSegment(segment) => {
                write!(f, "Invalid derivation path segment: {}", segment)
            }
            GeneratorError::UnsupportedPurpose(path) => {
                write!(
                    f,
                    "Unsupported purpose in derivation path: {}. Expected one of: 44', 49', 84'",
                    path
                )
            }
            GeneratorError::KeyDerivation(e) => write!(f, "Key derivation error: {}", e),
            GeneratorError::MultisigArgsMissing(name) => {
                write!(f, "n-out-of-m multisig argument must not be empty: {}", name)
            }
            GeneratorError::MultisigBoundsInvalid { n, m } => {
                write!(f, "n-out-of-m multisig: invalid N or M (n={}, m={})", n, m)
            }
            GeneratorError::MultisigKeyCountMismatch { expected, actual } => {
                write!(
                    f,
                    "n-out-of-m multisig: expected {} public keys, got {}",
                    expected, actual
                )
            }
            GeneratorError::HexDecode(e) => write!(f, "Hex decode error: {}", e),
            GeneratorError::Encoding(msg) => write!(f, "Encoding error: {}", msg),
        }
    }
}

impl StdError for GeneratorError {}

// From traits for error conversions
impl From<bitcoin::bip32::Error> for GeneratorError {
    fn from(err: bitcoin::bip32::Error) -> Self {
        GeneratorError::KeyDerivation(err)
    }
}

impl From<hex::FromHexError> for GeneratorError {
    fn from(err: hex::FromHexError) -> Self {
        GeneratorError::HexDecode(err)
    }
}
