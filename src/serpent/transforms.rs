use super::tables;

/// A 128-bit block or subkey as four little-endian words, `x0` first.
pub(crate) type Words = [u32; 4];

pub(crate) fn apply_s(s_idx: usize, nibble: u8) -> u8 {
    tables::SBOX[s_idx % 8][nibble as usize]
}

pub(crate) fn apply_s_inv(s_idx: usize, nibble: u8) -> u8 {
    tables::SBOX_INV[s_idx % 8][nibble as usize]
}

/// Applies S-box `s_idx` to each of the 32 bit columns of `source`.
pub(crate) fn apply_s_hat(s_idx: usize, source: &Words) -> Words {
    let mut res = [0u32; 4];
    for bit_idx in 0..32 {
        let nibble = apply_s(s_idx, gather_nibble(source, bit_idx));
        scatter_nibble(nibble, &mut res, bit_idx);
    }
    res
}

pub(crate) fn apply_s_hat_inv(s_idx: usize, source: &Words) -> Words {
    let mut res = [0u32; 4];
    for bit_idx in 0..32 {
        let nibble = apply_s_inv(s_idx, gather_nibble(source, bit_idx));
        scatter_nibble(nibble, &mut res, bit_idx);
    }
    res
}

pub(crate) fn apply_linear_transform(words: Words) -> Words {
    let [mut x0, mut x1, mut x2, mut x3] = words;
    x0 = x0.rotate_left(13);
    x2 = x2.rotate_left(3);
    x1 ^= x0 ^ x2;
    x3 ^= x2 ^ (x0 << 3);
    x1 = x1.rotate_left(1);
    x3 = x3.rotate_left(7);
    x0 ^= x1 ^ x3;
    x2 ^= x3 ^ (x1 << 7);
    x0 = x0.rotate_left(5);
    x2 = x2.rotate_left(22);
    [x0, x1, x2, x3]
}

pub(crate) fn apply_linear_transform_inv(words: Words) -> Words {
    let [mut x0, mut x1, mut x2, mut x3] = words;
    x2 = x2.rotate_right(22);
    x0 = x0.rotate_right(5);
    x2 ^= x3 ^ (x1 << 7);
    x0 ^= x1 ^ x3;
    x3 = x3.rotate_right(7);
    x1 = x1.rotate_right(1);
    x3 ^= x2 ^ (x0 << 3);
    x1 ^= x0 ^ x2;
    x2 = x2.rotate_right(3);
    x0 = x0.rotate_right(13);
    [x0, x1, x2, x3]
}

pub(crate) fn apply_xor(words: Words, subkey: &Words) -> Words {
    [
        words[0] ^ subkey[0],
        words[1] ^ subkey[1],
        words[2] ^ subkey[2],
        words[3] ^ subkey[3],
    ]
}

/// Collects bit `bit_idx` of each word into a nibble, `x0` as the low bit.
fn gather_nibble(words: &Words, bit_idx: usize) -> u8 {
    let mut output = 0u8;
    for (i, word) in words.iter().enumerate() {
        let bit = ((word >> bit_idx) & 1) as u8;
        output |= bit << i;
    }
    output
}

fn scatter_nibble(nibble: u8, words: &mut Words, out_bit_idx: usize) {
    for (i, word) in words.iter_mut().enumerate() {
        let bit = u32::from((nibble >> i) & 1);
        *word |= bit << out_bit_idx;
    }
}
