//! Deterministic Bitcoin wallet-material generation.
//!
//! This library derives wallet material from user-supplied or freshly
//! generated entropy:
//! - BIP39 mnemonic generation against a language-keyed wordlist registry
//! - Mnemonic/passphrase seed stretching (PBKDF2-HMAC-SHA512)
//! - Hierarchical (BIP32) key derivation along a textual path
//! - Address generation: single-key native SegWit and N-of-M multisig P2SH
//!
//! The wordlist registry is loaded once at startup and injected into the
//! generators; every generate call is a self-contained, synchronous
//! computation over exclusively owned data, so concurrent calls need no
//! coordination.
//!
//! ```no_run
//! use bitcoin_wallet_generator::{AddressGenerator, GenerateArgs, WordlistRegistry};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(WordlistRegistry::load_from_dir("./wordlists")?);
//! let generator = AddressGenerator::hd_segwit(registry);
//! let address = generator.generate(&GenerateArgs {
//!     path: Some("m/84'/0'/0'/0/0".to_string()),
//!     ..GenerateArgs::default()
//! })?;
//! println!("{}", address.address);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod generator;
pub mod mnemonic;
pub mod multisig;
pub mod path;
pub mod seed;
pub mod wordlist;

pub use error::GeneratorError;
pub use generator::{Address, AddressGenerator, GenerateArgs, HdSegwitGenerator, MultisigGenerator};
pub use mnemonic::{MnemonicEngine, WordCount};
pub use multisig::{MultisigSpec, multisig_address, redeem_script};
pub use path::{DerivationPath, derive_path, master_key};
pub use seed::{SEED_LEN, derive_seed};
pub use wordlist::{Language, WordlistRegistry};
