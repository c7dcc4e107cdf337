use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Blake2b512, Blake2s256};
use crc::{Algorithm, Crc, CRC_32_ISCSI, CRC_32_ISO_HDLC};
use md5::Md5;
use sha1::Sha1;
use sha2::digest::DynDigest;
use sha2::{Digest, Sha256, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

use crate::util;

type Blake2b256 = Blake2b<U32>;

/// CRC-32 with the Koopman polynomial and the usual init/xorout of the
/// IEEE variant (poly 0x741b8cd7, reflected, init and xorout 0xffffffff).
const CRC_32_KOOPMAN: Algorithm<u32> = Algorithm {
    width: 32,
    poly: 0x741b_8cd7,
    init: 0xffff_ffff,
    refin: true,
    refout: true,
    xorout: 0xffff_ffff,
    check: 0x2d3d_d0ae,
    residue: 0x0000_0000,
};

static CRC32_IEEE: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);
static CRC32_CASTAGNOLI: Crc<u32> = Crc::<u32>::new(&CRC_32_ISCSI);
static CRC32_KOOPMAN: Crc<u32> = Crc::<u32>::new(&CRC_32_KOOPMAN);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Crc32Ieee,
    Crc32Castagnoli,
    Crc32Koopman,
    Blake2b256,
    Blake2b512,
    Blake2s256,
}

impl HashAlgorithm {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "md5" => Some(Self::Md5),
            "sha1" => Some(Self::Sha1),
            "sha256" => Some(Self::Sha256),
            "sha512" => Some(Self::Sha512),
            "sha3-224" => Some(Self::Sha3_224),
            "sha3-256" => Some(Self::Sha3_256),
            "sha3-384" => Some(Self::Sha3_384),
            "sha3-512" => Some(Self::Sha3_512),
            "crc32-ieee" => Some(Self::Crc32Ieee),
            "crc32-castagnoli" => Some(Self::Crc32Castagnoli),
            "crc32-koopman" => Some(Self::Crc32Koopman),
            "blake2b-256" => Some(Self::Blake2b256),
            "blake2b-512" => Some(Self::Blake2b512),
            "blake2s-256" => Some(Self::Blake2s256),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Sha3_224 => "sha3-224",
            Self::Sha3_256 => "sha3-256",
            Self::Sha3_384 => "sha3-384",
            Self::Sha3_512 => "sha3-512",
            Self::Crc32Ieee => "crc32-ieee",
            Self::Crc32Castagnoli => "crc32-castagnoli",
            Self::Crc32Koopman => "crc32-koopman",
            Self::Blake2b256 => "blake2b-256",
            Self::Blake2b512 => "blake2b-512",
            Self::Blake2s256 => "blake2s-256",
        }
    }
}

/// A running digest, either a cryptographic hash or a CRC.
enum Hasher {
    Digest(Box<dyn DynDigest>),
    Crc32(crc::Digest<'static, u32>),
}

impl Hasher {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Md5 => Self::Digest(Box::new(Md5::new())),
            HashAlgorithm::Sha1 => Self::Digest(Box::new(Sha1::new())),
            HashAlgorithm::Sha256 => Self::Digest(Box::new(Sha256::new())),
            HashAlgorithm::Sha512 => Self::Digest(Box::new(Sha512::new())),
            HashAlgorithm::Sha3_224 => Self::Digest(Box::new(Sha3_224::new())),
            HashAlgorithm::Sha3_256 => Self::Digest(Box::new(Sha3_256::new())),
            HashAlgorithm::Sha3_384 => Self::Digest(Box::new(Sha3_384::new())),
            HashAlgorithm::Sha3_512 => Self::Digest(Box::new(Sha3_512::new())),
            HashAlgorithm::Crc32Ieee => Self::Crc32(CRC32_IEEE.digest()),
            HashAlgorithm::Crc32Castagnoli => Self::Crc32(CRC32_CASTAGNOLI.digest()),
            HashAlgorithm::Crc32Koopman => Self::Crc32(CRC32_KOOPMAN.digest()),
            HashAlgorithm::Blake2b256 => Self::Digest(Box::new(Blake2b256::new())),
            HashAlgorithm::Blake2b512 => Self::Digest(Box::new(Blake2b512::new())),
            HashAlgorithm::Blake2s256 => Self::Digest(Box::new(Blake2s256::new())),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Digest(digest) => digest.update(data),
            Self::Crc32(digest) => digest.update(data),
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            Self::Digest(digest) => digest.finalize().to_vec(),
            Self::Crc32(digest) => digest.finalize().to_be_bytes().to_vec(),
        }
    }
}

/// Hashes an in-memory buffer, returning the lowercase hex digest.
pub fn hash_bytes(algorithm: HashAlgorithm, data: &[u8]) -> String {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Hashes a file by streaming it through a fixed-size buffer.
pub fn hash_file(algorithm: HashAlgorithm, path: &Path) -> Result<String> {
    let mut file =
        File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut hasher = Hasher::new(algorithm);
    let mut buffer = [0u8; 64 * 1024];
    loop {
        let n = file
            .read(&mut buffer)
            .with_context(|| format!("cannot read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Hashes `input`, treating it as a file path when one exists and as a
/// literal string otherwise.
pub fn run_hash(algorithm: HashAlgorithm, input: &str) -> Result<String> {
    let sum = if util::file_exists(input) {
        let sum = hash_file(algorithm, Path::new(input))?;
        log::info!("Operation : hash");
        log::info!("Algorithm : {}", algorithm.name());
        log::info!("InputType : file ({})", util::base_name(input));
        sum
    } else {
        let sum = hash_bytes(algorithm, input.as_bytes());
        log::info!("Operation : hash");
        log::info!("Algorithm : {}", algorithm.name());
        log::info!("InputType : string");
        log::info!("InputLen  : {}", input.len());
        sum
    };
    log::info!("OutputLen : {}", sum.len());
    Ok(sum)
}

/// Compares the digests of every pair of files, returning whether all of
/// them match plus a `[ OK ]`/`[FAIL]` report line per pair.
pub fn run_compare(algorithm: HashAlgorithm, files: &[String]) -> Result<(bool, String)> {
    if files.len() < 2 {
        bail!("compare requires at least 2 files");
    }

    let mut digests = Vec::with_capacity(files.len());
    for file in files {
        digests.push(hash_file(algorithm, Path::new(file))?);
    }

    let mut all_equal = true;
    let mut report = String::new();
    for i in 0..files.len() - 1 {
        for j in i + 1..files.len() {
            if digests[i] == digests[j] {
                report.push_str(&format!("[ OK ] {} == {}\n", files[i], files[j]));
            } else {
                report.push_str(&format!("[FAIL] {} != {}\n", files[i], files[j]));
                all_equal = false;
            }
        }
    }

    Ok((all_equal, report))
}
