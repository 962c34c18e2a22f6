//! Serpent, 128-bit blocks with 128, 192 or 256-bit keys.
//!
//! Blocks are read as four little-endian 32-bit words and run through the
//! bitsliced form of the cipher, which needs no initial or final
//! permutation.

mod keys;
mod tables;
mod transforms;

use block_cipher_trait::generic_array::typenum::{U1, U16, U32};
use block_cipher_trait::generic_array::GenericArray;
use block_cipher_trait::{BlockCipher, InvalidKeyLength};
use byteorder::{ByteOrder, LE};
use log::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::context::{self, CipherContext, CryptMode};
use crate::error::Error;
use crate::modes;

use transforms::{
    apply_linear_transform, apply_linear_transform_inv, apply_s_hat, apply_s_hat_inv, apply_xor,
    Words,
};

const PHI: u32 = 0x9e37_79b9;
const ROUNDS: usize = 32;

/// The Serpent cipher context.
///
/// Implements a friendly `u128` block interface, byte-buffer ECB and CBC
/// chaining, and the `block_cipher_trait::BlockCipher` trait.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Serpent {
    subkeys: keys::Subkeys,
}

impl Default for Serpent {
    fn default() -> Self {
        Serpent {
            subkeys: [[0u32; 4]; ROUNDS + 1],
        }
    }
}

impl Serpent {
    pub const BLOCK_SIZE: usize = 16;
    pub const KEY_BIT_SIZES: [usize; 3] = [128, 192, 256];

    fn schedule(&mut self, key: &[u8]) {
        let expanded_key = keys::expand_key(key);
        self.subkeys = keys::derive_subkeys(&expanded_key);
    }

    /// Easy encryption of a block stored in a 128-bit little-endian integer
    pub fn encrypt_block(&self, block: u128) -> u128 {
        words_to_block(self.encrypt_words(block_to_words(block)))
    }

    /// Easy decryption of a block stored in a 128-bit little-endian integer
    pub fn decrypt_block(&self, block: u128) -> u128 {
        words_to_block(self.decrypt_words(block_to_words(block)))
    }

    fn encrypt_words(&self, words: Words) -> Words {
        let mut b_hat = words;
        for i in 0..ROUNDS {
            b_hat = do_round(i, b_hat, &self.subkeys);
        }
        b_hat
    }

    fn decrypt_words(&self, words: Words) -> Words {
        let mut b_hat = words;
        for i in (0..ROUNDS).rev() {
            b_hat = do_round_inv(i, b_hat, &self.subkeys);
        }
        b_hat
    }

    fn crypt_bytes(&self, mode: CryptMode, block: &mut [u8]) {
        let mut words = [0u32; 4];
        LE::read_u32_into(block, &mut words);
        let words = match mode {
            CryptMode::Encrypt => self.encrypt_words(words),
            CryptMode::Decrypt => self.decrypt_words(words),
        };
        LE::write_u32_into(&words, block);
    }

    /// Electronic codebook over every 16-byte block of `input`, written to
    /// the front of `output`.
    ///
    /// # Errors
    /// - [`Error::ValueTooSmall`] if `input` is shorter than one block.
    /// - [`Error::ValueOutOfBounds`] if `input` is not a whole number of
    ///   blocks.
    /// - [`Error::OutputTooSmall`] if `output` is shorter than `input`.
    pub fn crypt_ecb(&self, mode: CryptMode, input: &[u8], output: &mut [u8]) -> Result<(), Error> {
        modes::crypt_ecb(self, mode, input, output)
    }

    /// Electronic codebook over `data` in place.
    ///
    /// # Errors
    /// As [`crypt_ecb`](Self::crypt_ecb), without the output size check.
    pub fn crypt_ecb_in_place(&self, mode: CryptMode, data: &mut [u8]) -> Result<(), Error> {
        modes::crypt_ecb_in_place(self, mode, data)
    }

    /// Cipher block chaining starting from the 16-byte `iv`.
    ///
    /// The context is not modified, so consecutive calls each start a
    /// fresh chain.
    ///
    /// # Errors
    /// As [`crypt_ecb`](Self::crypt_ecb), plus [`Error::ValueOutOfBounds`]
    /// if `iv` is not exactly 16 bytes.
    pub fn crypt_cbc(
        &self,
        mode: CryptMode,
        iv: &[u8],
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), Error> {
        modes::crypt_cbc(self, mode, iv, input, output)
    }

    /// Cipher block chaining over `data` in place.
    ///
    /// # Errors
    /// As [`crypt_cbc`](Self::crypt_cbc), without the output size check.
    pub fn crypt_cbc_in_place(&self, mode: CryptMode, iv: &[u8], data: &mut [u8]) -> Result<(), Error> {
        modes::crypt_cbc_in_place(self, mode, iv, data)
    }
}

impl CipherContext for Serpent {
    const NAME: &'static str = "serpent";

    fn supports_key_bit_size(key_bit_size: usize) -> bool {
        Self::KEY_BIT_SIZES.contains(&key_bit_size)
    }

    fn set_key(&mut self, key: &[u8], key_bit_size: usize) -> Result<(), Error> {
        let key = context::key_bytes::<Self>(key, key_bit_size)?;
        self.schedule(key);
        debug!("{}: derived subkeys for {}-bit key", Self::NAME, key_bit_size);
        Ok(())
    }
}

/// Implements BlockCipher with 256-bit keys as the favoured fixed key length,
/// `new_varkey` also takes 128 and 192-bit keys.
impl BlockCipher for Serpent {
    type KeySize = U32;
    type BlockSize = U16;
    type ParBlocks = U1;

    fn new(key: &GenericArray<u8, U32>) -> Self {
        let mut serpent = Serpent::default();
        serpent.schedule(key);
        serpent
    }

    fn new_varkey(key: &[u8]) -> Result<Self, InvalidKeyLength> {
        if !Self::supports_key_bit_size(key.len() * 8) {
            return Err(InvalidKeyLength);
        }
        let mut serpent = Serpent::default();
        serpent.schedule(key);
        Ok(serpent)
    }

    fn encrypt_block(&self, block: &mut GenericArray<u8, Self::BlockSize>) {
        self.crypt_bytes(CryptMode::Encrypt, block);
    }

    fn decrypt_block(&self, block: &mut GenericArray<u8, Self::BlockSize>) {
        self.crypt_bytes(CryptMode::Decrypt, block);
    }
}

fn block_to_words(block: u128) -> Words {
    [
        block as u32,
        (block >> 32) as u32,
        (block >> 64) as u32,
        (block >> 96) as u32,
    ]
}

fn words_to_block(words: Words) -> u128 {
    u128::from(words[0])
        | u128::from(words[1]) << 32
        | u128::from(words[2]) << 64
        | u128::from(words[3]) << 96
}

fn do_round(i: usize, b_hat_i: Words, k_hat: &keys::Subkeys) -> Words {
    let xored = apply_xor(b_hat_i, &k_hat[i]);
    let s_hat_i = apply_s_hat(i, &xored);
    if i <= ROUNDS - 2 {
        apply_linear_transform(s_hat_i)
    } else {
        apply_xor(s_hat_i, &k_hat[ROUNDS])
    }
}

fn do_round_inv(i: usize, b_hat_i_plus_1: Words, k_hat: &keys::Subkeys) -> Words {
    let s_hat_i = if i <= ROUNDS - 2 {
        apply_linear_transform_inv(b_hat_i_plus_1)
    } else {
        apply_xor(b_hat_i_plus_1, &k_hat[ROUNDS])
    };
    let xored = apply_s_hat_inv(i, &s_hat_i);
    apply_xor(xored, &k_hat[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_words_layout() {
        let block = 0x0f0e0d0c_0b0a0908_07060504_03020100u128;
        let words = block_to_words(block);
        assert_eq!(words, [0x03020100, 0x07060504, 0x0b0a0908, 0x0f0e0d0c]);
        assert_eq!(words_to_block(words), block);

        let mut bytes = [0u8; 16];
        LE::write_u32_into(&words, &mut bytes);
        assert_eq!(u128::from_le_bytes(bytes), block);
    }

    #[test]
    fn zeroize_clears_subkeys() {
        let mut serpent = Serpent::with_key(&[7u8; 16]).unwrap();
        assert!(serpent.subkeys.iter().any(|subkey| *subkey != [0; 4]));
        serpent.zeroize();
        assert!(serpent.subkeys.iter().all(|subkey| *subkey == [0; 4]));
    }

    #[test]
    fn rejects_unsupported_key_sizes() {
        let mut serpent = Serpent::default();
        assert_eq!(
            serpent.set_key(&[0u8; 32], 64),
            Err(Error::UnsupportedValue("key bit size"))
        );
        assert_eq!(
            serpent.set_key(&[0u8; 32], 129),
            Err(Error::UnsupportedValue("key bit size"))
        );
        assert!(Serpent::new_varkey(&[0u8; 20]).is_err());
        assert!(Serpent::new_varkey(&[0u8; 24]).is_ok());
    }
}
