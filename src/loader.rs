//! Binary image loading
//!
//! An image is a flat file of 4-byte big-endian instruction words,
//! placed contiguously from the base of the instruction segment. A
//! trailing partial word is padded with zero bytes.

use std::fs;
use std::io;
use std::path::Path;

use itertools::Itertools;

/// Exit status used when the image file cannot be read
pub const EXIT_FILE_ERROR: i32 = -21;

/// Read an image file into instruction words
pub fn load_image<P: AsRef<Path>>(path: P) -> io::Result<Vec<u32>> {
    Ok(words_from_bytes(fs::read(path)?))
}

fn words_from_bytes(bytes: Vec<u8>) -> Vec<u32> {
    let padded_length = (bytes.len() + 3) / 4 * 4;
    bytes
        .into_iter()
        .pad_using(padded_length, |_| 0)
        .tuples()
        .map(|(b0, b1, b2, b3)| {
            (u32::from(b0) << 24) | (u32::from(b1) << 16) | (u32::from(b2) << 8) | u32::from(b3)
        })
        .collect()
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn check_words_are_big_endian() {
        let words = words_from_bytes(vec![0x12, 0x34, 0x56, 0x78, 0xaa, 0xbb, 0xcc, 0xdd]);
        assert_eq!(words, vec![0x1234_5678, 0xaabb_ccdd]);
    }

    #[test]
    fn check_partial_word_is_zero_padded() {
        let words = words_from_bytes(vec![0x12, 0x34, 0x56, 0x78, 0xaa]);
        assert_eq!(words, vec![0x1234_5678, 0xaa00_0000]);
    }

    #[test]
    fn check_empty_image() {
        assert_eq!(words_from_bytes(vec![]), vec![]);
    }
}
