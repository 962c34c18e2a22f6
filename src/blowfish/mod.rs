//! Blowfish, 64-bit blocks with keys of 32 to 448 bits.

mod tables;

use std::mem;

use block_cipher_trait::generic_array::typenum::{U1, U56, U8};
use block_cipher_trait::generic_array::GenericArray;
use block_cipher_trait::{BlockCipher, InvalidKeyLength};
use byteorder::{ByteOrder, BE};
use log::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::context::{self, CipherContext, CryptMode};
use crate::error::Error;
use crate::modes;

const ROUNDS: usize = 16;

/// The Blowfish cipher context: the keyed P-array and four S-boxes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Blowfish {
    p: [u32; ROUNDS + 2],
    s: [[u32; 256]; 4],
}

impl Default for Blowfish {
    fn default() -> Self {
        Blowfish {
            p: [0; ROUNDS + 2],
            s: [[0; 256]; 4],
        }
    }
}

impl Blowfish {
    pub const BLOCK_SIZE: usize = 8;
    pub const MIN_KEY_BIT_SIZE: usize = 32;
    pub const MAX_KEY_BIT_SIZE: usize = 448;

    fn schedule(&mut self, key: &[u8]) {
        self.p = tables::P_ARRAY;
        self.s = tables::S_BOXES;

        let mut key_index = 0;
        for p in self.p.iter_mut() {
            let mut word = 0u32;
            for _ in 0..4 {
                word = word << 8 | u32::from(key[key_index]);
                key_index = (key_index + 1) % key.len();
            }
            *p ^= word;
        }

        let (mut left, mut right) = (0u32, 0u32);
        for i in (0..ROUNDS + 2).step_by(2) {
            let (l, r) = self.encrypt_values(left, right);
            left = l;
            right = r;
            self.p[i] = left;
            self.p[i + 1] = right;
        }
        for sbox in 0..4 {
            for i in (0..256).step_by(2) {
                let (l, r) = self.encrypt_values(left, right);
                left = l;
                right = r;
                self.s[sbox][i] = left;
                self.s[sbox][i + 1] = right;
            }
        }
    }

    fn f(&self, x: u32) -> u32 {
        let a = self.s[0][(x >> 24) as usize];
        let b = self.s[1][(x >> 16 & 0xff) as usize];
        let c = self.s[2][(x >> 8 & 0xff) as usize];
        let d = self.s[3][(x & 0xff) as usize];
        (a.wrapping_add(b) ^ c).wrapping_add(d)
    }

    /// Encrypts one block given as its big-endian left and right halves.
    pub fn encrypt_values(&self, left: u32, right: u32) -> (u32, u32) {
        let (mut left, mut right) = (left, right);
        for i in 0..ROUNDS {
            left ^= self.p[i];
            right ^= self.f(left);
            mem::swap(&mut left, &mut right);
        }
        mem::swap(&mut left, &mut right);
        right ^= self.p[ROUNDS];
        left ^= self.p[ROUNDS + 1];
        (left, right)
    }

    /// Decrypts one block given as its big-endian left and right halves.
    pub fn decrypt_values(&self, left: u32, right: u32) -> (u32, u32) {
        let (mut left, mut right) = (left, right);
        for i in (2..ROUNDS + 2).rev() {
            left ^= self.p[i];
            right ^= self.f(left);
            mem::swap(&mut left, &mut right);
        }
        mem::swap(&mut left, &mut right);
        right ^= self.p[1];
        left ^= self.p[0];
        (left, right)
    }

    fn crypt_bytes(&self, mode: CryptMode, block: &mut [u8]) {
        let left = BE::read_u32(&block[..4]);
        let right = BE::read_u32(&block[4..8]);
        let (left, right) = match mode {
            CryptMode::Encrypt => self.encrypt_values(left, right),
            CryptMode::Decrypt => self.decrypt_values(left, right),
        };
        BE::write_u32(&mut block[..4], left);
        BE::write_u32(&mut block[4..8], right);
    }

    /// Electronic codebook over every 8-byte block of `input`, written to
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

    /// Cipher block chaining starting from the 8-byte `iv`.
    ///
    /// # Errors
    /// As [`crypt_ecb`](Self::crypt_ecb), plus [`Error::ValueOutOfBounds`]
    /// if `iv` is not exactly 8 bytes.
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

impl CipherContext for Blowfish {
    const NAME: &'static str = "blowfish";

    fn supports_key_bit_size(key_bit_size: usize) -> bool {
        (Self::MIN_KEY_BIT_SIZE..=Self::MAX_KEY_BIT_SIZE).contains(&key_bit_size)
            && key_bit_size % 8 == 0
    }

    fn set_key(&mut self, key: &[u8], key_bit_size: usize) -> Result<(), Error> {
        let key = context::key_bytes::<Self>(key, key_bit_size)?;
        self.schedule(key);
        debug!("{}: derived schedule for {}-bit key", Self::NAME, key_bit_size);
        Ok(())
    }
}

/// 448-bit keys are the fixed key length; `new_varkey` takes any length
/// from 4 to 56 bytes.
impl BlockCipher for Blowfish {
    type KeySize = U56;
    type BlockSize = U8;
    type ParBlocks = U1;

    fn new(key: &GenericArray<u8, U56>) -> Self {
        let mut blowfish = Blowfish::default();
        blowfish.schedule(key);
        blowfish
    }

    fn new_varkey(key: &[u8]) -> Result<Self, InvalidKeyLength> {
        if !Self::supports_key_bit_size(key.len() * 8) {
            return Err(InvalidKeyLength);
        }
        let mut blowfish = Blowfish::default();
        blowfish.schedule(key);
        Ok(blowfish)
    }

    fn encrypt_block(&self, block: &mut GenericArray<u8, U8>) {
        self.crypt_bytes(CryptMode::Encrypt, block);
    }

    fn decrypt_block(&self, block: &mut GenericArray<u8, U8>) {
        self.crypt_bytes(CryptMode::Decrypt, block);
    }
}
