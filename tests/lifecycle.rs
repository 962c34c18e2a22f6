use std::convert::TryFrom;

use legacy_ciphers::{
    create, destroy, Blowfish, CipherContext, CryptMode, Des3, Error, ErrorDomain, Rc4, Serpent,
};
use zeroize::Zeroize;

fn lifecycle<C: CipherContext>(key: &[u8]) {
    let mut slot: Option<Box<C>> = None;
    assert_eq!(destroy(&mut slot), Err(Error::InvalidArgument("context")));

    create(&mut slot).unwrap();
    assert_eq!(create(&mut slot), Err(Error::AlreadySet("context")));

    if let Some(context) = slot.as_mut() {
        context.set_key(key, key.len() * 8).unwrap();
    }
    destroy(&mut slot).unwrap();
    assert!(slot.is_none());

    create(&mut slot).unwrap();
    destroy(&mut slot).unwrap();
}

#[test]
fn create_and_destroy_every_engine() {
    lifecycle::<Blowfish>(b"blowfish key");
    lifecycle::<Des3>(&[0x13; 24]);
    lifecycle::<Rc4>(b"rc4 key");
    lifecycle::<Serpent>(&[0x17; 32]);
}

#[test]
fn zeroized_context_matches_fresh_one() {
    let mut serpent = Serpent::with_key(&[0x80; 16]).unwrap();
    let fresh = Serpent::default();
    assert_ne!(serpent.encrypt_block(0x1234), fresh.encrypt_block(0x1234));
    serpent.zeroize();
    assert_eq!(serpent.encrypt_block(0x1234), fresh.encrypt_block(0x1234));

    let mut blowfish = Blowfish::with_key(b"blowfish key").unwrap();
    blowfish.zeroize();
    assert_eq!(blowfish.encrypt_values(5, 6), Blowfish::default().encrypt_values(5, 6));

    let mut des3 = Des3::with_key(&[0x13; 24]).unwrap();
    des3.zeroize();
    let mut zeroized = [0u8; 8];
    let mut expected = [0u8; 8];
    des3.crypt(CryptMode::Encrypt, b"8 bytes!", &mut zeroized)
        .unwrap();
    Des3::default()
        .crypt(CryptMode::Encrypt, b"8 bytes!", &mut expected)
        .unwrap();
    assert_eq!(zeroized, expected);
}

#[test]
fn failed_set_key_keeps_previous_schedule() {
    let mut serpent = Serpent::with_key(&[0x80; 16]).unwrap();
    let before = serpent.encrypt_block(42);
    assert_eq!(
        serpent.set_key(&[0x01; 16], 100),
        Err(Error::UnsupportedValue("key bit size"))
    );
    assert_eq!(serpent.encrypt_block(42), before);

    let mut rc4 = Rc4::with_key(b"rc4 key").unwrap();
    let mut reference = Rc4::with_key(b"rc4 key").unwrap();
    assert_eq!(rc4.set_key(b"rc4", 24), Err(Error::UnsupportedValue("key bit size")));
    let mut stream = [0u8; 16];
    let mut expected = [0u8; 16];
    rc4.apply_keystream(&mut stream);
    reference.apply_keystream(&mut expected);
    assert_eq!(stream, expected);
}

#[test]
fn modes_from_binding_values() {
    assert_eq!(CryptMode::try_from(0), Ok(CryptMode::Decrypt));
    assert_eq!(CryptMode::try_from(1), Ok(CryptMode::Encrypt));
    let error = CryptMode::try_from(7).unwrap_err();
    assert_eq!(error, Error::UnsupportedValue("mode"));
    assert_eq!(error.domain(), ErrorDomain::Arguments);
    assert_eq!(error.to_string(), "unsupported mode");
}

#[test]
fn error_classification() {
    let serpent = Serpent::with_key(&[0x80; 16]).unwrap();
    let error = serpent
        .crypt_ecb(CryptMode::Encrypt, &[0; 32], &mut [0; 16])
        .unwrap_err();
    assert_eq!(error.domain(), ErrorDomain::Runtime);
    assert_eq!(error.code(), 12);

    let error = serpent
        .crypt_ecb(CryptMode::Encrypt, &[0; 20], &mut [0; 32])
        .unwrap_err();
    assert_eq!(error.domain(), ErrorDomain::Arguments);
    assert_eq!(error.code(), 7);
}
