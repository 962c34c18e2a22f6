//! Triple DES in encrypt-decrypt-encrypt form over 64-bit blocks.
//!
//! Keys of 56, 112 and 168 bits are packed 7-byte DES keys without parity
//! bits; keys of 64, 128 and 192 bits are 8-byte DES keys whose parity
//! bits are ignored. One and two-key forms reuse the first key where a
//! later one is missing, so a 56 or 64-bit key degenerates to single DES.

mod tables;

use block_cipher_trait::generic_array::typenum::{U1, U24, U8};
use block_cipher_trait::generic_array::GenericArray;
use block_cipher_trait::{BlockCipher, InvalidKeyLength};
use byteorder::{ByteOrder, BE};
use log::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::context::{self, CipherContext, CryptMode};
use crate::error::Error;
use crate::modes;

use tables::{
    EXPANSION, FINAL_PERMUTATION, INITIAL_PERMUTATION, KEY_ROTATIONS, PERMUTED_CHOICE1,
    PERMUTED_CHOICE2, SBOXES, SBOX_PERMUTATION,
};

const ROUNDS: usize = 16;

type SubKeys = [u64; ROUNDS];

/// The Triple DES cipher context: the round sub keys of all three DES
/// keys.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct Des3 {
    sub_keys: [SubKeys; 3],
}

impl Des3 {
    pub const BLOCK_SIZE: usize = 8;
    pub const KEY_BIT_SIZES: [usize; 6] = [56, 64, 112, 128, 168, 192];

    fn schedule(&mut self, key: &[u8]) {
        let mut keys = split_keys(key);
        for (sub_keys, key) in self.sub_keys.iter_mut().zip(keys.iter()) {
            *sub_keys = expand_sub_keys(*key);
        }
        keys.zeroize();
    }

    fn crypt_value(&self, mode: CryptMode, value: u64) -> u64 {
        let [first, second, third] = &self.sub_keys;
        match mode {
            CryptMode::Encrypt => {
                let value = crypt_block(first, CryptMode::Encrypt, value);
                let value = crypt_block(second, CryptMode::Decrypt, value);
                crypt_block(third, CryptMode::Encrypt, value)
            }
            CryptMode::Decrypt => {
                let value = crypt_block(third, CryptMode::Decrypt, value);
                let value = crypt_block(second, CryptMode::Encrypt, value);
                crypt_block(first, CryptMode::Decrypt, value)
            }
        }
    }

    fn crypt_bytes(&self, mode: CryptMode, block: &mut [u8]) {
        let value = self.crypt_value(mode, BE::read_u64(block));
        BE::write_u64(block, value);
    }

    /// Runs every 8-byte block of `input` through Triple DES, writing the
    /// result to the front of `output`.
    ///
    /// # Errors
    /// - [`Error::ValueTooSmall`] if `input` is shorter than one block.
    /// - [`Error::ValueOutOfBounds`] if `input` is not a whole number of
    ///   blocks.
    /// - [`Error::OutputTooSmall`] if `output` is shorter than `input`.
    pub fn crypt(&self, mode: CryptMode, input: &[u8], output: &mut [u8]) -> Result<(), Error> {
        modes::crypt_ecb(self, mode, input, output)
    }

    /// Like [`crypt`](Self::crypt), transforming `data` in place.
    ///
    /// # Errors
    /// As [`crypt`](Self::crypt), without the output size check.
    pub fn crypt_in_place(&self, mode: CryptMode, data: &mut [u8]) -> Result<(), Error> {
        modes::crypt_ecb_in_place(self, mode, data)
    }
}

impl CipherContext for Des3 {
    const NAME: &'static str = "des3";

    fn supports_key_bit_size(key_bit_size: usize) -> bool {
        Self::KEY_BIT_SIZES.contains(&key_bit_size)
    }

    fn set_key(&mut self, key: &[u8], key_bit_size: usize) -> Result<(), Error> {
        let key = context::key_bytes::<Self>(key, key_bit_size)?;
        self.schedule(key);
        debug!("{}: derived sub keys for {}-bit key", Self::NAME, key_bit_size);
        Ok(())
    }
}

/// 192-bit keys are the fixed key length; `new_varkey` takes every
/// supported length.
impl BlockCipher for Des3 {
    type KeySize = U24;
    type BlockSize = U8;
    type ParBlocks = U1;

    fn new(key: &GenericArray<u8, U24>) -> Self {
        let mut des3 = Des3::default();
        des3.schedule(key);
        des3
    }

    fn new_varkey(key: &[u8]) -> Result<Self, InvalidKeyLength> {
        if !Self::supports_key_bit_size(key.len() * 8) {
            return Err(InvalidKeyLength);
        }
        let mut des3 = Des3::default();
        des3.schedule(key);
        Ok(des3)
    }

    fn encrypt_block(&self, block: &mut GenericArray<u8, U8>) {
        self.crypt_bytes(CryptMode::Encrypt, block);
    }

    fn decrypt_block(&self, block: &mut GenericArray<u8, U8>) {
        self.crypt_bytes(CryptMode::Decrypt, block);
    }
}

/// Splits key material of a supported length into three 64-bit DES keys.
fn split_keys(key: &[u8]) -> [u64; 3] {
    match key.len() {
        7 => {
            let first = BE::read_uint(key, 7);
            [first, first, first]
        }
        8 => {
            let first = BE::read_u64(key);
            [first, first, first]
        }
        14 => {
            let first = BE::read_uint(&key[..7], 7);
            [first, BE::read_uint(&key[7..], 7), first]
        }
        16 => {
            let first = BE::read_u64(&key[..8]);
            [first, BE::read_u64(&key[8..]), first]
        }
        21 => [
            BE::read_uint(&key[..7], 7),
            BE::read_uint(&key[7..14], 7),
            BE::read_uint(&key[14..], 7),
        ],
        _ => [
            BE::read_u64(&key[..8]),
            BE::read_u64(&key[8..16]),
            BE::read_u64(&key[16..24]),
        ],
    }
}

/// Picks bit `table[i]` of the `width`-bit `input` as output bit `i`, both
/// counted from the most significant end.
fn permute(input: u64, table: &[u8], width: u32) -> u64 {
    table.iter().fold(0, |output, &position| {
        output << 1 | (input >> (width - u32::from(position))) & 1
    })
}

fn rotate_half(half: u64, count: u32) -> u64 {
    (half << count | half >> (28 - count)) & 0x0fff_ffff
}

fn expand_sub_keys(key: u64) -> SubKeys {
    let selected = permute(key, &PERMUTED_CHOICE1, 64);
    let mut left = selected >> 28 & 0x0fff_ffff;
    let mut right = selected & 0x0fff_ffff;

    let mut sub_keys = [0u64; ROUNDS];
    for (sub_key, &count) in sub_keys.iter_mut().zip(KEY_ROTATIONS.iter()) {
        left = rotate_half(left, count);
        right = rotate_half(right, count);
        *sub_key = permute(left << 28 | right, &PERMUTED_CHOICE2, 56);
    }
    sub_keys
}

fn feistel(half: u32, sub_key: u64) -> u32 {
    let expanded = permute(u64::from(half), &EXPANSION, 32) ^ sub_key;

    let mut substituted = 0u32;
    for (index, sbox) in SBOXES.iter().enumerate() {
        let six = (expanded >> (42 - 6 * index) & 0x3f) as usize;
        let row = (six >> 4 & 0x02) | (six & 0x01);
        let column = six >> 1 & 0x0f;
        substituted = substituted << 4 | u32::from(sbox[row * 16 + column]);
    }
    permute(u64::from(substituted), &SBOX_PERMUTATION, 32) as u32
}

/// Single DES over one block.
fn crypt_block(sub_keys: &SubKeys, mode: CryptMode, block: u64) -> u64 {
    let permuted = permute(block, &INITIAL_PERMUTATION, 64);
    let mut left = (permuted >> 32) as u32;
    let mut right = permuted as u32;

    for round in 0..ROUNDS {
        let sub_key = match mode {
            CryptMode::Encrypt => sub_keys[round],
            CryptMode::Decrypt => sub_keys[ROUNDS - 1 - round],
        };
        let next = left ^ feistel(right, sub_key);
        left = right;
        right = next;
    }
    permute(
        u64::from(right) << 32 | u64::from(left),
        &FINAL_PERMUTATION,
        64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sub_key() {
        let sub_keys = expand_sub_keys(0x1334_5779_9bbc_dff1);
        assert_eq!(sub_keys[0], 0x1b02_effc_7072);
        assert_eq!(sub_keys[15], 0xcb3d_8b0e_17f5);
    }

    #[test]
    fn single_des_block() {
        let sub_keys = expand_sub_keys(0x1334_5779_9bbc_dff1);
        let ciphertext = crypt_block(&sub_keys, CryptMode::Encrypt, 0x0123_4567_89ab_cdef);
        assert_eq!(ciphertext, 0x85e8_1354_0f0a_b405);
        assert_eq!(
            crypt_block(&sub_keys, CryptMode::Decrypt, ciphertext),
            0x0123_4567_89ab_cdef
        );
    }

    #[test]
    fn split_packed_keys() {
        let key: Vec<u8> = (1..=21).collect();
        assert_eq!(
            split_keys(&key),
            [0x0001_0203_0405_0607, 0x0008_090a_0b0c_0d0e, 0x000f_1011_1213_1415]
        );
        assert_eq!(
            split_keys(&key[..14]),
            [0x0001_0203_0405_0607, 0x0008_090a_0b0c_0d0e, 0x0001_0203_0405_0607]
        );
        assert_eq!(split_keys(&key[..7]), [0x0001_0203_0405_0607; 3]);
    }

    #[test]
    fn split_parity_keys() {
        let key: Vec<u8> = (1..=24).collect();
        assert_eq!(
            split_keys(&key),
            [0x0102_0304_0506_0708, 0x090a_0b0c_0d0e_0f10, 0x1112_1314_1516_1718]
        );
        assert_eq!(
            split_keys(&key[..16]),
            [0x0102_0304_0506_0708, 0x090a_0b0c_0d0e_0f10, 0x0102_0304_0506_0708]
        );
        assert_eq!(split_keys(&key[..8]), [0x0102_0304_0506_0708; 3]);
    }

    #[test]
    fn zeroize_clears_sub_keys() {
        let mut des3 = Des3::with_key(&[0x5a; 24]).unwrap();
        assert!(des3.sub_keys.iter().flatten().any(|&sub_key| sub_key != 0));
        des3.zeroize();
        assert!(des3.sub_keys.iter().flatten().all(|&sub_key| sub_key == 0));
    }
}
