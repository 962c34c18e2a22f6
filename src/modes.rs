//! ECB and CBC chaining over any [`BlockCipher`].
//!
//! Every entry point validates its buffers completely before the first
//! block is touched, so a rejected call leaves the output untouched.
//! Two-buffer calls copy the input into the output and then run the
//! in-place transform over it.

use block_cipher_trait::generic_array::typenum::Unsigned;
use block_cipher_trait::generic_array::GenericArray;
use block_cipher_trait::BlockCipher;
use zeroize::Zeroizing;

use crate::context::CryptMode;
use crate::error::Error;

/// Largest block size of the engines in this crate (Serpent).
const MAX_BLOCK_SIZE: usize = 16;

fn block_size<C: BlockCipher>() -> usize {
    let block_size = C::BlockSize::to_usize();
    debug_assert!(block_size <= MAX_BLOCK_SIZE);
    block_size
}

fn check_input_size(block_size: usize, input_size: usize) -> Result<(), Error> {
    if input_size < block_size {
        return Err(Error::ValueTooSmall("input data size"));
    }
    if input_size % block_size != 0 {
        return Err(Error::ValueOutOfBounds("input data size"));
    }
    Ok(())
}

fn check_output_size(input_size: usize, output_size: usize) -> Result<(), Error> {
    if output_size < input_size {
        return Err(Error::OutputTooSmall {
            input: input_size,
            output: output_size,
        });
    }
    Ok(())
}

fn check_initialization_vector(block_size: usize, iv: &[u8]) -> Result<(), Error> {
    if iv.len() != block_size {
        return Err(Error::ValueOutOfBounds("initialization vector size"));
    }
    Ok(())
}

/// Electronic codebook from `input` into the front of `output`.
pub(crate) fn crypt_ecb<C: BlockCipher>(
    cipher: &C,
    mode: CryptMode,
    input: &[u8],
    output: &mut [u8],
) -> Result<(), Error> {
    check_input_size(block_size::<C>(), input.len())?;
    check_output_size(input.len(), output.len())?;

    let output = &mut output[..input.len()];
    output.copy_from_slice(input);
    transform_ecb(cipher, mode, output);
    Ok(())
}

/// Electronic codebook over `data` in place.
pub(crate) fn crypt_ecb_in_place<C: BlockCipher>(
    cipher: &C,
    mode: CryptMode,
    data: &mut [u8],
) -> Result<(), Error> {
    check_input_size(block_size::<C>(), data.len())?;
    transform_ecb(cipher, mode, data);
    Ok(())
}

/// Cipher block chaining from `input` into the front of `output`.
pub(crate) fn crypt_cbc<C: BlockCipher>(
    cipher: &C,
    mode: CryptMode,
    iv: &[u8],
    input: &[u8],
    output: &mut [u8],
) -> Result<(), Error> {
    let block_size = block_size::<C>();
    check_initialization_vector(block_size, iv)?;
    check_input_size(block_size, input.len())?;
    check_output_size(input.len(), output.len())?;

    let output = &mut output[..input.len()];
    output.copy_from_slice(input);
    transform_cbc(cipher, mode, iv, output);
    Ok(())
}

/// Cipher block chaining over `data` in place.
pub(crate) fn crypt_cbc_in_place<C: BlockCipher>(
    cipher: &C,
    mode: CryptMode,
    iv: &[u8],
    data: &mut [u8],
) -> Result<(), Error> {
    let block_size = block_size::<C>();
    check_initialization_vector(block_size, iv)?;
    check_input_size(block_size, data.len())?;
    transform_cbc(cipher, mode, iv, data);
    Ok(())
}

fn transform_ecb<C: BlockCipher>(cipher: &C, mode: CryptMode, data: &mut [u8]) {
    for chunk in data.chunks_exact_mut(block_size::<C>()) {
        let block = GenericArray::from_mut_slice(chunk);
        match mode {
            CryptMode::Encrypt => cipher.encrypt_block(block),
            CryptMode::Decrypt => cipher.decrypt_block(block),
        }
    }
}

fn transform_cbc<C: BlockCipher>(cipher: &C, mode: CryptMode, iv: &[u8], data: &mut [u8]) {
    let block_size = block_size::<C>();

    // Both scratch buffers are cleared when they go out of scope.
    let mut chain_buffer = Zeroizing::new([0u8; MAX_BLOCK_SIZE]);
    let mut saved_buffer = Zeroizing::new([0u8; MAX_BLOCK_SIZE]);
    let chain = &mut chain_buffer[..block_size];
    let saved = &mut saved_buffer[..block_size];
    chain.copy_from_slice(iv);

    for chunk in data.chunks_exact_mut(block_size) {
        match mode {
            CryptMode::Encrypt => {
                xor_in_place(chunk, chain);
                cipher.encrypt_block(GenericArray::from_mut_slice(chunk));
                chain.copy_from_slice(chunk);
            }
            CryptMode::Decrypt => {
                saved.copy_from_slice(chunk);
                cipher.decrypt_block(GenericArray::from_mut_slice(chunk));
                xor_in_place(chunk, chain);
                chain.copy_from_slice(saved);
            }
        }
    }
}

fn xor_in_place(block: &mut [u8], chain: &[u8]) {
    for (byte, chain_byte) in block.iter_mut().zip(chain) {
        *byte ^= chain_byte;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use block_cipher_trait::generic_array::typenum::{U1, U4};
    use block_cipher_trait::generic_array::GenericArray;

    /// Adds a constant to every byte; enough to observe chaining order.
    struct AddCipher(u8);

    impl BlockCipher for AddCipher {
        type KeySize = U1;
        type BlockSize = U4;
        type ParBlocks = U1;

        fn new(key: &GenericArray<u8, U1>) -> Self {
            AddCipher(key[0])
        }

        fn encrypt_block(&self, block: &mut GenericArray<u8, U4>) {
            for byte in block.iter_mut() {
                *byte = byte.wrapping_add(self.0);
            }
        }

        fn decrypt_block(&self, block: &mut GenericArray<u8, U4>) {
            for byte in block.iter_mut() {
                *byte = byte.wrapping_sub(self.0);
            }
        }
    }

    #[test]
    fn ecb_rejects_bad_sizes() {
        let cipher = AddCipher(1);
        let mut output = [0u8; 8];
        assert_eq!(
            crypt_ecb(&cipher, CryptMode::Encrypt, &[0; 3], &mut output),
            Err(Error::ValueTooSmall("input data size"))
        );
        assert_eq!(
            crypt_ecb(&cipher, CryptMode::Encrypt, &[0; 6], &mut output),
            Err(Error::ValueOutOfBounds("input data size"))
        );
        assert_eq!(
            crypt_ecb(&cipher, CryptMode::Encrypt, &[0; 8], &mut output[..4]),
            Err(Error::OutputTooSmall {
                input: 8,
                output: 4
            })
        );
        assert_eq!(output, [0u8; 8]);
    }

    #[test]
    fn ecb_leaves_output_tail_alone() {
        let cipher = AddCipher(1);
        let mut output = [0xaa; 12];
        crypt_ecb(&cipher, CryptMode::Encrypt, &[0; 8], &mut output).unwrap();
        assert_eq!(output, [1, 1, 1, 1, 1, 1, 1, 1, 0xaa, 0xaa, 0xaa, 0xaa]);
    }

    #[test]
    fn cbc_chains_previous_ciphertext() {
        let cipher = AddCipher(1);
        let iv = [0x10, 0x20, 0x30, 0x40];
        let input = [0u8; 8];
        let mut output = [0u8; 8];
        crypt_cbc(&cipher, CryptMode::Encrypt, &iv, &input, &mut output).unwrap();
        assert_eq!(output, [0x11, 0x21, 0x31, 0x41, 0x12, 0x22, 0x32, 0x42]);

        let mut plain = [0xffu8; 8];
        crypt_cbc(&cipher, CryptMode::Decrypt, &iv, &output, &mut plain).unwrap();
        assert_eq!(plain, input);
    }

    #[test]
    fn cbc_in_place_matches_two_buffer() {
        let cipher = AddCipher(7);
        let iv = [1, 2, 3, 4];
        let input = [9u8, 8, 7, 6, 5, 4, 3, 2, 1, 0, 1, 2];
        let mut output = [0u8; 12];
        crypt_cbc(&cipher, CryptMode::Encrypt, &iv, &input, &mut output).unwrap();

        let mut data = input;
        crypt_cbc_in_place(&cipher, CryptMode::Encrypt, &iv, &mut data).unwrap();
        assert_eq!(data, output);

        crypt_cbc_in_place(&cipher, CryptMode::Decrypt, &iv, &mut data).unwrap();
        assert_eq!(data, input);
    }

    #[test]
    fn cbc_rejects_bad_iv() {
        let cipher = AddCipher(1);
        let mut data = [0u8; 8];
        assert_eq!(
            crypt_cbc_in_place(&cipher, CryptMode::Encrypt, &[0; 3], &mut data),
            Err(Error::ValueOutOfBounds("initialization vector size"))
        );
        assert_eq!(
            crypt_cbc_in_place(&cipher, CryptMode::Decrypt, &[0; 5], &mut data),
            Err(Error::ValueOutOfBounds("initialization vector size"))
        );
    }
}
