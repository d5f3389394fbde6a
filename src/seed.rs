//! Mnemonic-to-seed stretching (BIP39).

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::Zeroizing;

/// Length of a derived seed in bytes.
pub const SEED_LEN: usize = 64;

const PBKDF2_ROUNDS: u32 = 2048;
const SALT_PREFIX: &str = "mnemonic";

/// Stretches a mnemonic phrase and passphrase into a 64-byte seed.
///
/// PBKDF2-HMAC-SHA512 with 2048 iterations; password is the UTF-8 phrase,
/// salt is the literal "mnemonic" followed by the passphrase (which may be
/// empty). Deterministic and infallible.
pub fn derive_seed(phrase: &str, passphrase: &str) -> Zeroizing<[u8; SEED_LEN]> {
    let salt = Zeroizing::new(format!("{}{}", SALT_PREFIX, passphrase));
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2_hmac::<Sha512>(
        phrase.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ROUNDS,
        &mut seed[..],
    );
    seed
}
