//! Hierarchical derivation path parsing and key walking.
//!
//! Paths are slash-delimited (`m/44'/0'/0'/0/0`); the first segment is the
//! root marker and is discarded. Each remaining segment is a decimal child
//! index, hardened when it carries a trailing apostrophe. The walk is an
//! iterative fold over the segments, one child derivation per step, with
//! each intermediate key consumed by the next.

use crate::error::GeneratorError;
use bitcoin::Network;
use bitcoin::bip32::{ChildNumber, Xpriv};
use bitcoin::secp256k1::{Secp256k1, Signing};
use std::str::FromStr;

const HARDENED_MARKER: char = '\'';

/// Purpose codes accepted for address derivation (BIP44/49/84).
const STANDARD_PURPOSES: [u32; 3] = [44, 49, 84];

/// A parsed derivation path: the ordered child-index specifiers after the
/// root marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    segments: Vec<ChildNumber>,
}

impl DerivationPath {
    pub fn segments(&self) -> &[ChildNumber] {
        &self.segments
    }

    /// True when the path has at least two segments and its first segment is
    /// a hardened member of the accepted purpose set (44', 49', 84').
    ///
    /// Callers reject a path before deriving when this returns false.
    pub fn has_standard_purpose(&self) -> bool {
        if self.segments.len() < 2 {
            return false;
        }
        match self.segments[0] {
            ChildNumber::Hardened { index } => STANDARD_PURPOSES.contains(&index),
            ChildNumber::Normal { .. } => false,
        }
    }
}

impl FromStr for DerivationPath {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        // Root marker ("m"), discarded.
        parts.next();
        let segments = parts
            .map(parse_segment)
            .collect::<Result<Vec<ChildNumber>, GeneratorError>>()?;
        Ok(Self { segments })
    }
}

fn parse_segment(segment: &str) -> Result<ChildNumber, GeneratorError> {
    let invalid = || GeneratorError::InvalidPathSegment(segment.to_string());
    let (digits, hardened) = match segment.strip_suffix(HARDENED_MARKER) {
        Some(rest) => (rest, true),
        None => (segment, false),
    };
    let index: u32 = digits.parse().map_err(|_| invalid())?;
    let child = if hardened {
        ChildNumber::from_hardened_idx(index)
    } else {
        ChildNumber::from_normal_idx(index)
    };
    child.map_err(|_| invalid())
}

/// Produces the master extended key for a seed on the default network.
pub fn master_key(seed: &[u8]) -> Result<Xpriv, GeneratorError> {
    Xpriv::new_master(Network::Bitcoin, seed).map_err(GeneratorError::from)
}

/// Walks `path` from `master`, returning the leaf extended key.
///
/// One child derivation per segment; each result feeds forward as the parent
/// for the next. Primitive-level errors surface unchanged as
/// [`GeneratorError::KeyDerivation`].
pub fn derive_path<C: Signing>(
    secp: &Secp256k1<C>,
    master: Xpriv,
    path: &DerivationPath,
) -> Result<Xpriv, GeneratorError> {
    path.segments().iter().try_fold(master, |parent, &child| {
        parent
            .derive_priv(secp, &[child])
            .map_err(GeneratorError::from)
    })
}
