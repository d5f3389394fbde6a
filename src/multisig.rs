//! N-of-M multisignature redeem-script assembly and P2SH address encoding.

use crate::error::GeneratorError;
use bitcoin::script::{Builder, PushBytesBuf, ScriptBuf};
use bitcoin::hashes::{Hash, hash160};
use bitcoin::opcodes::all::OP_CHECKMULTISIG;
use bitcoin::{Address, Network, ScriptHash};

/// Largest N a standard CHECKMULTISIG script can require.
pub const MAX_REQUIRED_SIGNATURES: u8 = 16;

/// An N-of-M multisignature spending policy over an ordered public-key set.
#[derive(Debug, Clone)]
pub struct MultisigSpec {
    /// Required signature count (N).
    pub required: u8,
    /// Total key count (M).
    pub total: u8,
    /// Serialized public keys, order-significant.
    pub public_keys: Vec<Vec<u8>>,
}

impl MultisigSpec {
    /// Validates the spec, failing on the first violation.
    ///
    /// Order: N in [1, 16], then M >= N and M >= 1, then key count == M.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        check_bounds(self.required, self.total)?;
        if self.public_keys.len() != self.total as usize {
            return Err(GeneratorError::MultisigKeyCountMismatch {
                expected: self.total as usize,
                actual: self.public_keys.len(),
            });
        }
        Ok(())
    }
}

/// Bounds portion of spec validation: N in [1, 16], M >= N, M >= 1.
pub(crate) fn check_bounds(required: u8, total: u8) -> Result<(), GeneratorError> {
    if required < 1 || required > MAX_REQUIRED_SIGNATURES {
        return Err(GeneratorError::MultisigBoundsInvalid {
            n: required,
            m: total,
        });
    }
    if required > total || total < 1 {
        return Err(GeneratorError::MultisigBoundsInvalid {
            n: required,
            m: total,
        });
    }
    Ok(())
}

/// Builds the redeem script: OP_N, each public key as a data push in the
/// given order, OP_M, OP_CHECKMULTISIG.
pub fn redeem_script(spec: &MultisigSpec) -> Result<ScriptBuf, GeneratorError> {
    let mut builder = Builder::new().push_int(i64::from(spec.required));
    for key in &spec.public_keys {
        let data = PushBytesBuf::try_from(key.clone())
            .map_err(|e| GeneratorError::Encoding(format!("public key push: {}", e)))?;
        builder = builder.push_slice(data);
    }
    let script = builder
        .push_int(i64::from(spec.total))
        .push_opcode(OP_CHECKMULTISIG)
        .into_script();
    Ok(script)
}

/// Validates the spec, assembles the redeem script, and encodes its hash160
/// as a mainnet script-hash address.
pub fn multisig_address(spec: &MultisigSpec) -> Result<Address, GeneratorError> {
    spec.validate()?;
    let script = redeem_script(spec)?;
    let redeem_hash = hash160::Hash::hash(script.as_bytes());
    let address = Address::p2sh_from_hash(ScriptHash::from_raw_hash(redeem_hash), Network::Bitcoin);
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keys(count: usize) -> Vec<Vec<u8>> {
        [
            "020f8796e0f870a9a3b269be3b1e78e380c9b569885f0de98a9ff061c4a66e79d2",
            "02dfa8990f3f015ff20e9b31b85ea36d47470220615fb2ac1597e20fc830727b25",
            "03fbfbdc5df9c60e4b747805552686199e85299a5e87804dbb66a14597ddabcf29",
        ]
        .iter()
        .take(count)
        .map(|k| hex::decode(k).unwrap())
        .collect()
    }

    fn spec(n: u8, m: u8, keys: usize) -> MultisigSpec {
        MultisigSpec {
            required: n,
            total: m,
            public_keys: test_keys(keys),
        }
    }

    #[test]
    fn test_bounds_validation() {
        for (n, m) in [(0, 3), (17, 17), (3, 2), (1, 0)] {
            let err = spec(n, m, 3).validate().unwrap_err();
            assert!(
                matches!(err, GeneratorError::MultisigBoundsInvalid { .. }),
                "n={} m={} should be out of bounds",
                n,
                m
            );
        }
    }

    #[test]
    fn test_key_count_mismatch() {
        let err = spec(2, 3, 2).validate().unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::MultisigKeyCountMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_redeem_script_layout() {
        let script = redeem_script(&spec(2, 3, 3)).unwrap();
        let bytes = script.as_bytes();
        // OP_2 ... OP_3 OP_CHECKMULTISIG
        assert_eq!(bytes[0], 0x52);
        assert_eq!(bytes[bytes.len() - 2], 0x53);
        assert_eq!(bytes[bytes.len() - 1], 0xae);
        // 2 + 3 keys * (1 push-length byte + 33 key bytes)
        assert_eq!(bytes.len(), 3 + 3 * 34);
    }

    #[test]
    fn test_key_order_is_preserved() {
        let keys = test_keys(3);
        let forward = redeem_script(&MultisigSpec {
            required: 2,
            total: 3,
            public_keys: keys.clone(),
        })
        .unwrap();
        let mut reversed_keys = keys;
        reversed_keys.reverse();
        let reversed = redeem_script(&MultisigSpec {
            required: 2,
            total: 3,
            public_keys: reversed_keys,
        })
        .unwrap();
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_two_of_three_address() {
        let address = multisig_address(&spec(2, 3, 3)).unwrap();
        let encoded = address.to_string();
        assert!(encoded.starts_with('3'), "not a mainnet P2SH address: {}", encoded);

        // Deterministic for a fixed spec.
        let again = multisig_address(&spec(2, 3, 3)).unwrap();
        assert_eq!(encoded, again.to_string());
    }

    #[test]
    fn test_one_of_one_address() {
        let address = multisig_address(&spec(1, 1, 1)).unwrap();
        assert!(address.to_string().starts_with('3'));
    }
}
