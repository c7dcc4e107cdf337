use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose, Engine as _};

use crate::base58::Base58Codec;
use crate::util;

/// Textual encodings supported by `encode`/`decode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Base64,
    Base64Url,
    Base32,
    Hex,
    Base85,
    Base58,
    Url,
}

impl Encoding {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "base64" => Some(Self::Base64),
            "base64url" => Some(Self::Base64Url),
            "base32" => Some(Self::Base32),
            "hex" => Some(Self::Hex),
            "base85" => Some(Self::Base85),
            "base58" => Some(Self::Base58),
            "url" => Some(Self::Url),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::Base64Url => "base64url",
            Self::Base32 => "base32",
            Self::Hex => "hex",
            Self::Base85 => "base85",
            Self::Base58 => "base58",
            Self::Url => "url",
        }
    }
}

pub fn encode(encoding: Encoding, data: &[u8]) -> String {
    match encoding {
        Encoding::Base64 => general_purpose::STANDARD.encode(data),
        Encoding::Base64Url => general_purpose::URL_SAFE.encode(data),
        Encoding::Base32 => data_encoding::BASE32.encode(data),
        Encoding::Hex => hex::encode(data),
        Encoding::Base85 => base85::encode(data),
        Encoding::Base58 => Base58Codec.encode(data),
        Encoding::Url => urlencoding::encode_binary(data).into_owned(),
    }
}

pub fn decode(encoding: Encoding, data: &str) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Base64 => general_purpose::STANDARD
            .decode(repad(data, 4))
            .context("base64 decode failed"),
        Encoding::Base64Url => general_purpose::URL_SAFE
            .decode(repad(data, 4))
            .context("base64url decode failed"),
        Encoding::Base32 => data_encoding::BASE32
            .decode(repad(data, 8).as_bytes())
            .context("base32 decode failed"),
        Encoding::Hex => {
            // Tolerate odd-length input by assuming a missing leading nibble.
            if data.len() % 2 != 0 {
                hex::decode(format!("0{data}"))
            } else {
                hex::decode(data)
            }
            .context("hex decode failed")
        }
        Encoding::Base85 => base85::decode(data).map_err(|e| anyhow!("base85 decode failed: {e}")),
        Encoding::Base58 => Base58Codec
            .decode(data.as_bytes())
            .context("base58 decode failed"),
        Encoding::Url => Ok(urlencoding::decode_binary(data.as_bytes()).into_owned()),
    }
}

/// Restores stripped `=` padding so truncated base64/base32 input still decodes.
fn repad(data: &str, block: usize) -> String {
    let missing = (block - data.len() % block) % block;
    let mut padded = data.to_string();
    padded.extend(std::iter::repeat('=').take(missing));
    padded
}

/// Encodes `input` (a file path or a literal string) `repeat` times, each
/// round re-encoding the previous round's output.
pub fn run_encode(encoding: Encoding, input: &str, repeat: usize) -> Result<String> {
    let data = util::read_data(input)?;
    let mut out = String::new();
    let mut current = data;
    for _ in 0..repeat.max(1) {
        out = encode(encoding, &current);
        current = out.clone().into_bytes();
    }

    if util::file_exists(input) {
        log::info!("Operation : encode");
        log::info!("Algorithm : {}", encoding.name());
        log::info!("InputType : file ({})", util::base_name(input));
    } else {
        log::info!("Operation : encode");
        log::info!("Algorithm : {}", encoding.name());
        log::info!("InputType : string");
        log::info!("InputLen  : {}", input.len());
    }
    log::info!("Repeat    : {}", repeat.max(1));
    log::info!("OutputLen : {}", out.len());

    Ok(out)
}

/// Decodes `input` `repeat` times. Intermediate rounds must produce valid
/// UTF-8, since every decoder consumes text; the final round may yield
/// arbitrary bytes.
pub fn run_decode(encoding: Encoding, input: &str, repeat: usize) -> Result<Vec<u8>> {
    let data = util::read_data(input)?;
    let mut current =
        String::from_utf8(data).context("decode input is not valid UTF-8 text")?;
    let mut out = Vec::new();
    let repeat = repeat.max(1);
    for round in 0..repeat {
        // Round outputs feed the next round byte-for-byte; only the
        // initial input was trimmed by read_data.
        out = decode(encoding, &current)?;
        if round + 1 < repeat {
            current = String::from_utf8(out.clone()).with_context(|| {
                format!("intermediate output of round {} is not valid UTF-8", round + 1)
            })?;
        }
    }

    if util::file_exists(input) {
        log::info!("Operation : decode");
        log::info!("Algorithm : {}", encoding.name());
        log::info!("InputType : file ({})", util::base_name(input));
    } else {
        log::info!("Operation : decode");
        log::info!("Algorithm : {}", encoding.name());
        log::info!("InputType : string");
        log::info!("InputLen  : {}", input.len());
    }
    log::info!("Repeat    : {repeat}");
    log::info!("OutputLen : {}", out.len());

    Ok(out)
}
