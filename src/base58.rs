use thiserror::Error;

/// Bitcoin Base58 alphabet. Excludes `0`, `O`, `I` and `l` so encoded
/// strings cannot be misread.
const BASE58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Inverse of [`BASE58_ALPHABET`], indexed by ASCII byte.
const BASE58_INVERSE: [Option<u8>; 128] = build_inverse();

const fn build_inverse() -> [Option<u8>; 128] {
    let mut table: [Option<u8>; 128] = [None; 128];
    let mut index = 0;
    while index < BASE58_ALPHABET.len() {
        table[BASE58_ALPHABET[index] as usize] = Some(index as u8);
        index += 1;
    }
    table
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid base58 character '{character}' at index {index}")]
    InvalidCharacter { character: char, index: usize },
    #[error("non-ascii byte {byte:#04x} at index {index}")]
    NonAsciiByte { byte: u8, index: usize },
}

pub struct Base58Codec;

impl Base58Codec {
    /// Encodes arbitrary bytes as Base58.
    ///
    /// The input is read as a big-endian unsigned integer and converted to
    /// base 58 by repeated long division over a byte vector, so the input
    /// length is unbounded. Leading `0x00` bytes carry no numeric weight
    /// and are mapped one-for-one to leading `1` characters.
    pub fn encode<T>(&self, input: T) -> String
    where
        T: AsRef<[u8]>,
    {
        let input = input.as_ref();

        let leading_zeros = input.iter().take_while(|&&b| b == 0).count();

        // Big integer in base 256, most significant byte first.
        let mut num = input[leading_zeros..].to_vec();

        let mut encoded = Vec::new();

        while !num.is_empty() {
            let mut remainder = 0u32;
            let mut quotient = Vec::with_capacity(num.len());

            // Long division by 58.
            for &byte in &num {
                let accumulator = (remainder << 8) + byte as u32;
                let digit = accumulator / 58;
                remainder = accumulator % 58;

                if !quotient.is_empty() || digit != 0 {
                    quotient.push(digit as u8);
                }
            }

            encoded.push(BASE58_ALPHABET[remainder as usize]);
            num = quotient;
        }

        encoded.reverse();

        let mut result = vec![BASE58_ALPHABET[0]; leading_zeros];
        result.extend(encoded);

        String::from_utf8(result).unwrap()
    }

    /// Decodes a Base58 string back into bytes.
    ///
    /// Fails on the first character outside the alphabet, reporting the
    /// character and its position. Leading `1` characters become leading
    /// `0x00` bytes, mirroring [`Base58Codec::encode`].
    pub fn decode<T>(&self, input: T) -> Result<Vec<u8>, DecodeError>
    where
        T: AsRef<[u8]>,
    {
        let bytes = input.as_ref();

        let leading_zeros = bytes
            .iter()
            .take_while(|&&c| c == BASE58_ALPHABET[0])
            .count();

        // Little-endian big integer in base 256.
        let mut num: Vec<u8> = Vec::new();

        for (index, &c) in bytes.iter().enumerate() {
            if c >= 128 {
                return Err(DecodeError::NonAsciiByte { byte: c, index });
            }
            let value = match BASE58_INVERSE[c as usize] {
                Some(v) => v as u32,
                None => {
                    return Err(DecodeError::InvalidCharacter {
                        character: c as char,
                        index,
                    })
                }
            };

            // Multiply by 58 and add the digit. Leading '1's decode to
            // zero here and are restored positionally below.
            let mut carry = value;
            for digit in num.iter_mut() {
                let acc = *digit as u32 * 58 + carry;
                *digit = (acc & 0xFF) as u8;
                carry = acc >> 8;
            }
            while carry > 0 {
                num.push((carry & 0xFF) as u8);
                carry >>= 8;
            }
        }

        let mut result = vec![0u8; leading_zeros];
        result.extend(num.iter().rev());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::{Base58Codec, DecodeError};
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    #[test]
    fn empty_input() {
        let codec = Base58Codec;
        let input: &[u8] = &[];
        let encoded = codec.encode(input);
        assert_eq!(encoded, "");
        let decoded = codec.decode(encoded.as_bytes()).unwrap();
        assert_eq!(decoded, Vec::<u8>::new());
    }

    #[test]
    fn all_zero_input() {
        let codec = Base58Codec;
        let input = vec![0, 0, 0, 0];
        let encoded = codec.encode(&input);
        assert_eq!(encoded, "1111");
        let decoded = codec.decode(encoded.as_bytes()).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn leading_zeros_preserved() {
        let codec = Base58Codec;
        assert_eq!(codec.encode([0x00, 0x00, 0x01]), "112");
        assert_eq!(codec.encode([0x00, 0x01, 0x02]), "15T");
        assert_eq!(codec.decode("112").unwrap(), vec![0x00, 0x00, 0x01]);
        assert_eq!(codec.decode("15T").unwrap(), vec![0x00, 0x01, 0x02]);
    }

    #[test]
    fn known_vectors() {
        let codec = Base58Codec;
        assert_eq!(codec.encode(b"abc"), "ZiCa");
        assert_eq!(codec.encode(b"Hello World!"), "2NEpo7TZRRrLZSi2U");
        assert_eq!(codec.encode([0x00, 0x00, 0x28, 0x7f, 0xb4, 0xcd]), "11233QC4");
        assert_eq!(
            codec.encode(b"The quick brown fox jumps over the lazy dog."),
            "USm3fpXnKG5EUBx2ndxBDMPVciP5hGey2Jh4NDv6gmeo1LkMeiKrLJUUBk6Z"
        );
        assert_eq!(codec.decode("ZiCa").unwrap(), b"abc");
        assert_eq!(codec.decode("2NEpo7TZRRrLZSi2U").unwrap(), b"Hello World!");
    }

    #[test]
    fn single_byte_inputs() {
        let codec = Base58Codec;
        for b in 0u8..=255 {
            let input = [b];
            let encoded = codec.encode(input);
            let decoded = codec.decode(encoded.as_bytes()).unwrap();
            assert_eq!(decoded, input, "Failed for byte value: {b}");
        }
    }

    #[test]
    fn large_random_inputs() {
        let codec = Base58Codec;

        let mut rng = StdRng::seed_from_u64(42);

        for size in &[1usize, 10, 100, 1000, 5000] {
            let mut input = vec![0u8; *size];
            rng.fill_bytes(&mut input);
            let encoded = codec.encode(&input);
            let decoded = codec.decode(encoded.as_bytes()).unwrap();
            assert_eq!(decoded, input, "Failed for size: {size}");
        }
    }

    #[test]
    fn decode_rejects_ambiguous_characters() {
        let codec = Base58Codec;
        assert_eq!(
            codec.decode("0OIl"),
            Err(DecodeError::InvalidCharacter {
                character: '0',
                index: 0
            })
        );
        assert_eq!(
            codec.decode("2NEpO"),
            Err(DecodeError::InvalidCharacter {
                character: 'O',
                index: 4
            })
        );
        // Non-ASCII input is reported as the offending byte, not a
        // reinterpreted character.
        assert_eq!(
            codec.decode("abc\u{2603}"),
            Err(DecodeError::NonAsciiByte {
                byte: 0xE2,
                index: 3
            })
        );
    }

    #[test]
    fn encoded_length_grows_with_input() {
        let codec = Base58Codec;
        let mut previous = 0;
        for size in 1..64usize {
            let input = vec![0xFF; size];
            let len = codec.encode(&input).len();
            assert!(len >= previous, "length shrank at size {size}");
            previous = len;
        }
    }

    #[test]
    fn encode_is_stable_across_round_trips() {
        let codec = Base58Codec;
        let input = b"\x00\x00round trip stability\xff";
        let first = codec.encode(input);
        let second = codec.encode(codec.decode(first.as_bytes()).unwrap());
        assert_eq!(first, second);
    }
}
