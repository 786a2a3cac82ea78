use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

/// 32 bytes of entropy, 64 hex characters on the wire.
const KEY_BYTES: usize = 32;

/// Generate a long-lived opaque API key.
///
/// Keys are random, carry no structure, and are only ever compared by exact
/// match against the store. Rotation replaces the stored value; there is no
/// expiry.
pub fn generate() -> String {
    let mut bytes = [0u8; KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);

    let mut key = String::with_capacity(KEY_BYTES * 2);
    for byte in bytes {
        key.push_str(&format!("{:02x}", byte));
    }
    key
}
