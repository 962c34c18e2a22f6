use legacy_ciphers::{Blowfish, CipherContext, CryptMode, Error, Serpent};

fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + 3) as u8).collect()
}

#[test]
fn cbc_round_trips() {
    let blowfish = Blowfish::with_key(b"chaining key").unwrap();
    let serpent = Serpent::with_key(&[0x11; 24]).unwrap();
    let plain = sample(96);

    let mut encrypted = vec![0u8; 96];
    let mut decrypted = vec![0u8; 96];
    blowfish
        .crypt_cbc(CryptMode::Encrypt, &[9; 8], &plain, &mut encrypted)
        .unwrap();
    blowfish
        .crypt_cbc(CryptMode::Decrypt, &[9; 8], &encrypted, &mut decrypted)
        .unwrap();
    assert_eq!(decrypted, plain);

    serpent
        .crypt_cbc(CryptMode::Encrypt, &[9; 16], &plain, &mut encrypted)
        .unwrap();
    serpent
        .crypt_cbc(CryptMode::Decrypt, &[9; 16], &encrypted, &mut decrypted)
        .unwrap();
    assert_eq!(decrypted, plain);
}

#[test]
fn iv_change_only_touches_first_decrypted_block() {
    let serpent = Serpent::with_key(&[0x22; 16]).unwrap();
    let ciphertext = sample(64);
    let first_iv = [0u8; 16];
    let second_iv = [0xffu8; 16];

    let mut first = vec![0u8; 64];
    let mut second = vec![0u8; 64];
    serpent
        .crypt_cbc(CryptMode::Decrypt, &first_iv, &ciphertext, &mut first)
        .unwrap();
    serpent
        .crypt_cbc(CryptMode::Decrypt, &second_iv, &ciphertext, &mut second)
        .unwrap();

    for (a, b) in first[..16].iter().zip(&second[..16]) {
        assert_eq!(a ^ b, 0xff);
    }
    assert_eq!(first[16..], second[16..]);
}

#[test]
fn iv_change_alters_encryption() {
    let blowfish = Blowfish::with_key(b"chaining key").unwrap();
    let plain = sample(32);
    let mut first = vec![0u8; 32];
    let mut second = vec![0u8; 32];
    blowfish
        .crypt_cbc(CryptMode::Encrypt, &[1; 8], &plain, &mut first)
        .unwrap();
    blowfish
        .crypt_cbc(CryptMode::Encrypt, &[2; 8], &plain, &mut second)
        .unwrap();
    assert_ne!(first[..8], second[..8]);
}

#[test]
fn ecb_repeats_where_cbc_does_not() {
    let serpent = Serpent::with_key(&[0x33; 32]).unwrap();
    let plain = [0x5au8; 32];

    let mut ecb = [0u8; 32];
    serpent.crypt_ecb(CryptMode::Encrypt, &plain, &mut ecb).unwrap();
    assert_eq!(ecb[..16], ecb[16..]);

    let mut cbc = [0u8; 32];
    serpent
        .crypt_cbc(CryptMode::Encrypt, &[0; 16], &plain, &mut cbc)
        .unwrap();
    assert_ne!(cbc[..16], cbc[16..]);
}

#[test]
fn cbc_calls_start_fresh_chains() {
    let blowfish = Blowfish::with_key(b"chaining key").unwrap();
    let plain = sample(16);
    let mut first = vec![0u8; 16];
    let mut second = vec![0u8; 16];
    blowfish
        .crypt_cbc(CryptMode::Encrypt, &[3; 8], &plain, &mut first)
        .unwrap();
    blowfish
        .crypt_cbc(CryptMode::Encrypt, &[3; 8], &plain, &mut second)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn in_place_matches_two_buffer() {
    let serpent = Serpent::with_key(&[0x44; 16]).unwrap();
    let iv = [0x10u8; 16];
    let plain = sample(48);

    let mut expected = vec![0u8; 48];
    serpent
        .crypt_cbc(CryptMode::Encrypt, &iv, &plain, &mut expected)
        .unwrap();
    let mut data = plain.clone();
    serpent
        .crypt_cbc_in_place(CryptMode::Encrypt, &iv, &mut data)
        .unwrap();
    assert_eq!(data, expected);
    serpent
        .crypt_cbc_in_place(CryptMode::Decrypt, &iv, &mut data)
        .unwrap();
    assert_eq!(data, plain);

    serpent.crypt_ecb(CryptMode::Encrypt, &plain, &mut expected).unwrap();
    let mut data = plain.clone();
    serpent
        .crypt_ecb_in_place(CryptMode::Encrypt, &mut data)
        .unwrap();
    assert_eq!(data, expected);
}

#[test]
fn larger_output_keeps_tail() {
    let blowfish = Blowfish::with_key(b"chaining key").unwrap();
    let mut output = [0xeeu8; 24];
    blowfish
        .crypt_cbc(CryptMode::Encrypt, &[0; 8], &[0; 16], &mut output)
        .unwrap();
    assert_eq!(output[16..], [0xeeu8; 8]);
}

#[test]
fn serpent_buffer_validation() {
    let serpent = Serpent::with_key(&[0x55; 16]).unwrap();
    let mut output = [0u8; 32];
    assert_eq!(
        serpent.crypt_cbc(CryptMode::Encrypt, &[0; 16], &[0; 8], &mut output),
        Err(Error::ValueTooSmall("input data size"))
    );
    assert_eq!(
        serpent.crypt_cbc(CryptMode::Encrypt, &[0; 16], &[0; 24], &mut output),
        Err(Error::ValueOutOfBounds("input data size"))
    );
    assert_eq!(
        serpent.crypt_cbc(CryptMode::Encrypt, &[0; 16], &[0; 32], &mut output[..16]),
        Err(Error::OutputTooSmall {
            input: 32,
            output: 16
        })
    );
    assert_eq!(
        serpent.crypt_cbc(CryptMode::Encrypt, &[0; 8], &[0; 32], &mut output),
        Err(Error::ValueOutOfBounds("initialization vector size"))
    );
    assert_eq!(
        serpent.crypt_ecb_in_place(CryptMode::Decrypt, &mut [0; 17]),
        Err(Error::ValueOutOfBounds("input data size"))
    );
    assert_eq!(output, [0u8; 32]);
}
