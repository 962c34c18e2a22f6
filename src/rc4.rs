//! RC4 stream cipher.
//!
//! The permutation table and both stream indices advance with every byte
//! processed, so consecutive calls on one context continue a single
//! keystream. Re-key the context before starting an unrelated stream.

use log::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::context::{self, CipherContext};
use crate::error::Error;

/// The RC4 cipher context.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Rc4 {
    permutations: [u8; 256],
    index1: u8,
    index2: u8,
}

impl Default for Rc4 {
    fn default() -> Self {
        Rc4 {
            permutations: [0; 256],
            index1: 0,
            index2: 0,
        }
    }
}

impl Rc4 {
    pub const MIN_KEY_BIT_SIZE: usize = 40;
    pub const MAX_KEY_BIT_SIZE: usize = 2048;

    fn schedule(&mut self, key: &[u8]) {
        for (index, value) in self.permutations.iter_mut().enumerate() {
            *value = index as u8;
        }

        let mut swap_index = 0u8;
        for index in 0..256 {
            swap_index = swap_index
                .wrapping_add(self.permutations[index])
                .wrapping_add(key[index % key.len()]);
            self.permutations.swap(index, swap_index as usize);
        }
        self.index1 = 0;
        self.index2 = 0;
    }

    fn next_keystream_byte(&mut self) -> u8 {
        self.index1 = self.index1.wrapping_add(1);
        self.index2 = self
            .index2
            .wrapping_add(self.permutations[self.index1 as usize]);
        self.permutations
            .swap(self.index1 as usize, self.index2 as usize);

        let index = self.permutations[self.index1 as usize]
            .wrapping_add(self.permutations[self.index2 as usize]);
        self.permutations[index as usize]
    }

    /// XORs `input` with the keystream into the front of `output`.
    ///
    /// Encryption and decryption are the same operation. An empty `input`
    /// is accepted and leaves the keystream where it was.
    ///
    /// # Errors
    /// Returns [`Error::OutputTooSmall`] if `output` is shorter than
    /// `input`; the keystream does not advance in that case.
    pub fn crypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), Error> {
        if output.len() < input.len() {
            return Err(Error::OutputTooSmall {
                input: input.len(),
                output: output.len(),
            });
        }
        for (output_byte, input_byte) in output.iter_mut().zip(input) {
            *output_byte = input_byte ^ self.next_keystream_byte();
        }
        Ok(())
    }

    /// XORs the keystream over `data` in place.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            *byte ^= self.next_keystream_byte();
        }
    }
}

impl CipherContext for Rc4 {
    const NAME: &'static str = "rc4";

    fn supports_key_bit_size(key_bit_size: usize) -> bool {
        (Self::MIN_KEY_BIT_SIZE..=Self::MAX_KEY_BIT_SIZE).contains(&key_bit_size)
            && key_bit_size % 8 == 0
    }

    fn set_key(&mut self, key: &[u8], key_bit_size: usize) -> Result<(), Error> {
        let key = context::key_bytes::<Self>(key, key_bit_size)?;
        self.schedule(key);
        debug!("{}: scheduled {}-bit key", Self::NAME, key_bit_size);
        Ok(())
    }
}
