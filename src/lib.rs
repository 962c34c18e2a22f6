//! # Legacy ciphers
//!
//! `legacy-ciphers` implements four classic symmetric ciphers behind one
//! context lifecycle:
//!
//! - [Blowfish](https://www.schneier.com/academic/blowfish/) with ECB and
//!   CBC chaining,
//! - Triple DES in encrypt-decrypt-encrypt form,
//! - the RC4 stream cipher,
//! - [Serpent](https://www.cl.cam.ac.uk/~rja14/serpent.html) with ECB and
//!   CBC chaining.
//!
//! A context starts out zeroed, is keyed with
//! [`CipherContext::set_key`] and is zeroized when destroyed or dropped.
//! Buffer operations validate their arguments completely before any data
//! is written and report failures as [`Error`].
//!
//! ```
//! use legacy_ciphers::{CipherContext, CryptMode, Serpent};
//!
//! let serpent = Serpent::with_key(&[0x80; 16]).unwrap();
//! let iv = [0u8; 16];
//! let mut data = *b"thirty-two bytes of secret data!";
//! serpent.crypt_cbc_in_place(CryptMode::Encrypt, &iv, &mut data).unwrap();
//! serpent.crypt_cbc_in_place(CryptMode::Decrypt, &iv, &mut data).unwrap();
//! assert_eq!(&data, b"thirty-two bytes of secret data!");
//! ```
//!
//! For easy interoperation with Rust crypto the block ciphers implement
//! the `BlockCipher` trait from the `block-cipher-trait` crate.

mod blowfish;
mod context;
pub mod crypt;
mod des3;
mod error;
mod modes;
mod rc4;
mod serpent;

pub use block_cipher_trait;
pub use block_cipher_trait::generic_array;
pub use generic_array::typenum;

pub use blowfish::Blowfish;
pub use context::{create, destroy, CipherContext, CryptMode};
pub use des3::Des3;
pub use error::{Error, ErrorDomain};
pub use rc4::Rc4;
pub use serpent::Serpent;
