//! Context lifecycle shared by all engines.
//!
//! A context is an owned value holding derived key material. The
//! [`create`]/[`destroy`] pair manages it behind an `Option<Box<_>>` slot
//! for callers that hand contexts across a binding boundary; plain Rust
//! callers can use `Default` and let the value drop, which zeroizes it.

use std::convert::TryFrom;

use log::trace;
use zeroize::Zeroize;

use crate::error::Error;

/// Direction of a cipher operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CryptMode {
    Decrypt,
    Encrypt,
}

impl TryFrom<i32> for CryptMode {
    type Error = Error;

    /// Maps the integer mode values used by bindings, decrypt = 0 and
    /// encrypt = 1.
    fn try_from(value: i32) -> Result<Self, Error> {
        match value {
            0 => Ok(CryptMode::Decrypt),
            1 => Ok(CryptMode::Encrypt),
            _ => Err(Error::UnsupportedValue("mode")),
        }
    }
}

/// Lifecycle and keying contract every engine implements.
///
/// A freshly created context holds an all-zero schedule. `set_key` either
/// replaces the whole schedule or fails without touching it.
pub trait CipherContext: Default + Zeroize {
    /// Algorithm name used in log records.
    const NAME: &'static str;

    /// Whether `key_bit_size` is one of the sizes `set_key` accepts.
    fn supports_key_bit_size(key_bit_size: usize) -> bool;

    /// Derives the key schedule from the first `key_bit_size / 8` bytes of
    /// `key`.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`] if `key` is empty.
    /// - [`Error::UnsupportedValue`] if `key_bit_size` is not accepted.
    /// - [`Error::ValueTooSmall`] if `key` holds fewer bytes than
    ///   `key_bit_size` requires.
    fn set_key(&mut self, key: &[u8], key_bit_size: usize) -> Result<(), Error>;

    /// Creates a context keyed with all of `key`.
    fn with_key(key: &[u8]) -> Result<Self, Error> {
        let mut context = Self::default();
        context.set_key(key, key.len() * 8)?;
        Ok(context)
    }
}

/// Allocates a zeroed context into an empty slot.
///
/// # Errors
/// Returns [`Error::AlreadySet`] if `slot` already holds a context.
pub fn create<C: CipherContext>(slot: &mut Option<Box<C>>) -> Result<(), Error> {
    if slot.is_some() {
        return Err(Error::AlreadySet("context"));
    }
    *slot = Some(Box::new(C::default()));
    trace!("{}: context created", C::NAME);
    Ok(())
}

/// Zeroizes the context held in `slot`, releases it and leaves the slot
/// empty.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] if `slot` is empty.
pub fn destroy<C: CipherContext>(slot: &mut Option<Box<C>>) -> Result<(), Error> {
    let mut context = slot.take().ok_or(Error::InvalidArgument("context"))?;
    context.zeroize();
    drop(context);
    trace!("{}: context destroyed", C::NAME);
    Ok(())
}

/// Validates key arguments and returns the bytes the schedule consumes.
pub(crate) fn key_bytes<C: CipherContext>(key: &[u8], key_bit_size: usize) -> Result<&[u8], Error> {
    if key.is_empty() {
        return Err(Error::InvalidArgument("key"));
    }
    if !C::supports_key_bit_size(key_bit_size) {
        return Err(Error::UnsupportedValue("key bit size"));
    }
    let key_byte_size = key_bit_size / 8;
    if key.len() < key_byte_size {
        return Err(Error::ValueTooSmall("key size"));
    }
    Ok(&key[..key_byte_size])
}
