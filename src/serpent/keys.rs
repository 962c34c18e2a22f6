use byteorder::{ByteOrder, LE};
use zeroize::Zeroizing;

use super::transforms::{apply_s_hat, Words};
use super::{PHI, ROUNDS};

pub(crate) type Key = [u8; 32];
pub(crate) type Subkey = Words;
pub(crate) type Subkeys = [Subkey; ROUNDS + 1];

/// Pads a key of at most 256 bits to the full 256 bits by appending a
/// single one bit followed by zeros.
pub(crate) fn expand_key(source: &[u8]) -> Zeroizing<Key> {
    debug_assert!(source.len() <= 32);

    let mut key = Zeroizing::new([0u8; 32]);
    key[..source.len()].copy_from_slice(source);
    if source.len() < 32 {
        key[source.len()] = 1;
    }
    key
}

pub(crate) fn derive_subkeys(key: &Key) -> Subkeys {
    let mut w = Zeroizing::new([0u32; 140]);
    LE::read_u32_into(key, &mut w[..8]);

    for i in 0..132 {
        let slot = i + 8;
        w[slot] = (w[slot - 8] ^ w[slot - 5] ^ w[slot - 3] ^ w[slot - 1] ^ PHI ^ i as u32)
            .rotate_left(11);
    }

    let mut subkeys = [[0u32; 4]; ROUNDS + 1];
    for (i, subkey) in subkeys.iter_mut().enumerate() {
        let s_idx = (ROUNDS + 3 - i) % ROUNDS;
        let base = 8 + 4 * i;
        let prekey = [w[base], w[base + 1], w[base + 2], w[base + 3]];
        *subkey = apply_s_hat(s_idx, &prekey);
    }
    subkeys
}
