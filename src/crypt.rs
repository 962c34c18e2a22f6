//! Allocating wrappers that return the transformed data as a new buffer.
//!
//! Each function validates exactly as the context method it wraps. On
//! failure no buffer is returned.

use crate::blowfish::Blowfish;
use crate::context::CryptMode;
use crate::des3::Des3;
use crate::error::Error;
use crate::rc4::Rc4;
use crate::serpent::Serpent;

/// Blowfish ECB into a new buffer.
///
/// # Errors
/// As [`Blowfish::crypt_ecb`].
pub fn blowfish_ecb(context: &Blowfish, mode: CryptMode, data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut output = vec![0u8; data.len()];
    context.crypt_ecb(mode, data, &mut output)?;
    Ok(output)
}

/// Blowfish CBC into a new buffer.
///
/// # Errors
/// As [`Blowfish::crypt_cbc`].
pub fn blowfish_cbc(
    context: &Blowfish,
    mode: CryptMode,
    iv: &[u8],
    data: &[u8],
) -> Result<Vec<u8>, Error> {
    let mut output = vec![0u8; data.len()];
    context.crypt_cbc(mode, iv, data, &mut output)?;
    Ok(output)
}

/// Triple DES over every block of `data` into a new buffer.
///
/// # Errors
/// As [`Des3::crypt`].
pub fn des3(context: &Des3, mode: CryptMode, data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut output = vec![0u8; data.len()];
    context.crypt(mode, data, &mut output)?;
    Ok(output)
}

/// Continues the keystream of `context` over `data`.
pub fn rc4(context: &mut Rc4, data: &[u8]) -> Vec<u8> {
    let mut output = data.to_vec();
    context.apply_keystream(&mut output);
    output
}

/// Serpent ECB into a new buffer.
///
/// # Errors
/// As [`Serpent::crypt_ecb`].
pub fn serpent_ecb(context: &Serpent, mode: CryptMode, data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut output = vec![0u8; data.len()];
    context.crypt_ecb(mode, data, &mut output)?;
    Ok(output)
}

/// Serpent CBC into a new buffer.
///
/// # Errors
/// As [`Serpent::crypt_cbc`].
pub fn serpent_cbc(
    context: &Serpent,
    mode: CryptMode,
    iv: &[u8],
    data: &[u8],
) -> Result<Vec<u8>, Error> {
    let mut output = vec![0u8; data.len()];
    context.crypt_cbc(mode, iv, data, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CipherContext;

    #[test]
    fn wrappers_match_context_methods() {
        let blowfish = Blowfish::with_key(b"wrapper key").unwrap();
        let data = [0x42u8; 16];
        let mut expected = [0u8; 16];
        blowfish
            .crypt_cbc(CryptMode::Encrypt, &[1; 8], &data, &mut expected)
            .unwrap();
        assert_eq!(
            blowfish_cbc(&blowfish, CryptMode::Encrypt, &[1; 8], &data).unwrap(),
            expected
        );

        let serpent = Serpent::with_key(&[3; 16]).unwrap();
        let encrypted = serpent_ecb(&serpent, CryptMode::Encrypt, &data).unwrap();
        assert_eq!(
            serpent_ecb(&serpent, CryptMode::Decrypt, &encrypted).unwrap(),
            data
        );
    }

    #[test]
    fn wrappers_propagate_errors() {
        let context = Des3::with_key(&[9; 24]).unwrap();
        assert_eq!(
            des3(&context, CryptMode::Encrypt, &[0; 12]),
            Err(Error::ValueOutOfBounds("input data size"))
        );

        let serpent = Serpent::with_key(&[3; 32]).unwrap();
        assert_eq!(
            serpent_cbc(&serpent, CryptMode::Decrypt, &[0; 8], &[0; 16]),
            Err(Error::ValueOutOfBounds("initialization vector size"))
        );
    }

    #[test]
    fn rc4_wrapper_round_trips() {
        let mut encryptor = Rc4::with_key(b"stream key").unwrap();
        let mut decryptor = Rc4::with_key(b"stream key").unwrap();
        let ciphertext = rc4(&mut encryptor, b"attack at dawn");
        assert_ne!(&ciphertext[..], &b"attack at dawn"[..]);
        assert_eq!(rc4(&mut decryptor, &ciphertext), b"attack at dawn".to_vec());
    }
}
