//! Address-generation facade.
//!
//! Two generator variants share one "generate address from named arguments"
//! contract: HD-SegWit (mnemonic/seed -> hierarchical derivation -> P2WPKH)
//! and N-of-M multisig (redeem script -> P2SH). Dispatch is an enum rather
//! than a string-keyed lookup so the variant set is checked at compile time.

use crate::error::GeneratorError;
use crate::mnemonic::{MnemonicEngine, WordCount};
use crate::multisig::{self, MultisigSpec};
use crate::path::{self, DerivationPath};
use crate::seed;
use crate::wordlist::{Language, WordlistRegistry};
use bitcoin::Network;
use bitcoin::bip32::Xpub;
use bitcoin::key::CompressedPublicKey;
use bitcoin::secp256k1::Secp256k1;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use zeroize::Zeroizing;

const DEFAULT_NETWORK: Network = Network::Bitcoin;
const DEFAULT_PASSPHRASE: &str = "";
const DEFAULT_LANGUAGE: Language = Language::English;
const DEFAULT_WORD_COUNT: WordCount = WordCount::Words12;

/// Named arguments for a generate call. All fields are optional; each
/// generator variant validates the presence of what it requires.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateArgs {
    /// Derivation path, e.g. "m/84'/0'/0'/0/0" (HD-SegWit)
    pub path: Option<String>,
    /// BIP39 passphrase (HD-SegWit, defaults to empty)
    pub password: Option<String>,
    /// Mnemonic phrase to derive the seed from (HD-SegWit)
    pub mnemonic: Option<String>,
    /// Hex-encoded seed, used directly and taking precedence over `mnemonic`
    pub seed: Option<String>,
    /// Required signature count N (multisig)
    pub n: Option<u8>,
    /// Total key count M (multisig)
    pub m: Option<u8>,
    /// Hex-encoded public keys, order-significant (multisig)
    pub public_keys: Option<Vec<String>>,
}

impl GenerateArgs {
    fn is_empty(&self) -> bool {
        self.path.is_none()
            && self.password.is_none()
            && self.mnemonic.is_none()
            && self.seed.is_none()
            && self.n.is_none()
            && self.m.is_none()
            && self.public_keys.is_none()
    }
}

/// Result of a generate call. Optional fields are populated only when
/// meaningful for the generator variant and are omitted from JSON otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// The generated address string
    pub address: String,
    /// Serialized (Base58) extended public key of the leaf
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// Serialized (Base58) extended private key of the master
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// The mnemonic phrase that was used or generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
    /// Hex-encoded seed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

/// The generator variants, dispatched by explicit match.
#[derive(Debug, Clone)]
pub enum AddressGenerator {
    HdSegwit(HdSegwitGenerator),
    Multisig(MultisigGenerator),
}

impl AddressGenerator {
    /// An HD-SegWit generator over the given wordlist registry.
    pub fn hd_segwit(registry: Arc<WordlistRegistry>) -> Self {
        AddressGenerator::HdSegwit(HdSegwitGenerator::new(registry))
    }

    /// An N-of-M multisig generator.
    pub fn multisig() -> Self {
        AddressGenerator::Multisig(MultisigGenerator)
    }

    /// Generates an address from named arguments.
    pub fn generate(&self, args: &GenerateArgs) -> Result<Address, GeneratorError> {
        match self {
            AddressGenerator::HdSegwit(generator) => generator.generate(args),
            AddressGenerator::Multisig(generator) => generator.generate(args),
        }
    }
}

/// Produces HD SegWit addresses from a mnemonic, a raw seed, or a freshly
/// generated 12-word phrase.
#[derive(Debug, Clone)]
pub struct HdSegwitGenerator {
    engine: MnemonicEngine,
}

impl HdSegwitGenerator {
    pub fn new(registry: Arc<WordlistRegistry>) -> Self {
        Self {
            engine: MnemonicEngine::new(registry),
        }
    }

    /// Generates a P2WPKH address for the requested derivation path.
    ///
    /// Requires `path`; `password` defaults to empty. A hex `seed` argument
    /// is used directly and takes precedence over `mnemonic`; with neither, a
    /// fresh 12-word English mnemonic is generated. Paths whose purpose is
    /// not a hardened member of {44, 49, 84} are rejected before any
    /// derivation work.
    pub fn generate(&self, args: &GenerateArgs) -> Result<Address, GeneratorError> {
        if args.is_empty() {
            return Err(GeneratorError::ArgsMustBeNotNull);
        }
        let path_str = args
            .path
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(GeneratorError::ArgsMustBeNotNull)?;
        log::info!("hd segwit generate request, path={}", path_str);

        let parsed: DerivationPath = path_str.parse()?;
        if !parsed.has_standard_purpose() {
            return Err(GeneratorError::UnsupportedPurpose(path_str.to_string()));
        }
        let password = args.password.as_deref().unwrap_or(DEFAULT_PASSPHRASE);
        let (mnemonic, seed_bytes) = self.mnemonic_and_seed(password, args)?;

        let secp = Secp256k1::new();
        let master = path::master_key(&seed_bytes)?;
        let master_b58 = master.to_string();
        let leaf = path::derive_path(&secp, master, &parsed)?;

        let xpub = Xpub::from_priv(&secp, &leaf);
        let compressed = CompressedPublicKey::from_slice(&xpub.public_key.serialize())
            .map_err(|e| GeneratorError::Encoding(format!("compressed public key: {}", e)))?;
        let address = bitcoin::Address::p2wpkh(&compressed, DEFAULT_NETWORK);

        Ok(Address {
            address: address.to_string(),
            public_key: Some(xpub.to_string()),
            private_key: Some(master_b58),
            mnemonic,
            seed: Some(hex::encode(&seed_bytes[..])),
        })
    }

    /// Resolves the seed source: raw hex seed, supplied mnemonic, or a fresh
    /// mnemonic, in that order of precedence.
    fn mnemonic_and_seed(
        &self,
        password: &str,
        args: &GenerateArgs,
    ) -> Result<(Option<String>, Zeroizing<Vec<u8>>), GeneratorError> {
        if let Some(seed_hex) = args.seed.as_deref().filter(|s| !s.is_empty()) {
            let seed_bytes = Zeroizing::new(hex::decode(seed_hex)?);
            return Ok((None, seed_bytes));
        }
        log::info!("request seed not found");
        match args.mnemonic.as_deref().filter(|m| !m.is_empty()) {
            Some(phrase) => {
                let seed_bytes = seed::derive_seed(phrase, password);
                Ok((Some(phrase.to_string()), Zeroizing::new(seed_bytes.to_vec())))
            }
            None => {
                log::info!("request mnemonic not found, generating a fresh phrase");
                let phrase = self
                    .engine
                    .new_mnemonic(DEFAULT_LANGUAGE, DEFAULT_WORD_COUNT)?;
                let seed_bytes = seed::derive_seed(&phrase, password);
                Ok((Some(phrase), Zeroizing::new(seed_bytes.to_vec())))
            }
        }
    }
}

/// Produces N-of-M multisig P2SH addresses.
#[derive(Debug, Clone)]
pub struct MultisigGenerator;

impl MultisigGenerator {
    /// Validates the multisig arguments and delegates to the assembler.
    ///
    /// Result carries only the address string.
    pub fn generate(&self, args: &GenerateArgs) -> Result<Address, GeneratorError> {
        if args.is_empty() {
            return Err(GeneratorError::ArgsMustBeNotNull);
        }
        let n = args.n.ok_or(GeneratorError::MultisigArgsMissing("n"))?;
        let m = args.m.ok_or(GeneratorError::MultisigArgsMissing("m"))?;
        multisig::check_bounds(n, m)?;
        let keys_hex = args
            .public_keys
            .as_ref()
            .filter(|keys| !keys.is_empty())
            .ok_or(GeneratorError::MultisigArgsMissing("publicKeys"))?;
        let public_keys = keys_hex
            .iter()
            .map(|key| hex::decode(key))
            .collect::<Result<Vec<Vec<u8>>, _>>()?;

        let spec = MultisigSpec {
            required: n,
            total: m,
            public_keys,
        };
        let address = multisig::multisig_address(&spec)?;
        Ok(Address {
            address: address.to_string(),
            public_key: None,
            private_key: None,
            mnemonic: None,
            seed: None,
        })
    }
}
