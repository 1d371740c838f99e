use crate::errors::{ExtractError, ExtractResult};
use sha1::Sha1;
use sha2::{Digest as _, Sha256};
use std::{fmt, fs::File, io, path::Path, str::FromStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Sha1,
    Sha256,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
        }
    }

    fn hex_len(self) -> usize {
        match self {
            Algorithm::Sha1 => 40,
            Algorithm::Sha256 => 64,
        }
    }
}

/// An expected content digest, as handed to the extractor alongside a blob id.
///
/// Accepts a bare 40 character hex string (sha1) or an `<algorithm>:<hex>` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Digest {
    algorithm: Algorithm,
    hex: String,
}

impl Digest {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Hash the file at `path` and compare. Blocking.
    pub fn verify_file(&self, path: &Path) -> ExtractResult<()> {
        let mut file = File::open(path)?;
        let actual = match self.algorithm {
            Algorithm::Sha1 => {
                let mut hasher = Sha1::new();
                io::copy(&mut file, &mut hasher)?;
                hex::encode(hasher.finalize())
            }
            Algorithm::Sha256 => {
                let mut hasher = Sha256::new();
                io::copy(&mut file, &mut hasher)?;
                hex::encode(hasher.finalize())
            }
        };
        if actual != self.hex {
            return Err(ExtractError::DigestMismatch {
                path: path.to_path_buf(),
                algorithm: self.algorithm.name(),
                expected: self.hex.clone(),
                actual,
            });
        }
        Ok(())
    }
}

impl FromStr for Digest {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ExtractError::InvalidDigest(s.to_string());
        let (algorithm, hex) = match s.split_once(':') {
            Some(("sha1", hex)) => (Algorithm::Sha1, hex),
            Some(("sha256", hex)) => (Algorithm::Sha256, hex),
            Some(_) => return Err(invalid()),
            None => (Algorithm::Sha1, s),
        };
        if hex.len() != algorithm.hex_len() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        Ok(Self {
            algorithm,
            hex: hex.to_ascii_lowercase(),
        })
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.algorithm {
            Algorithm::Sha1 => write!(f, "{}", self.hex),
            Algorithm::Sha256 => write!(f, "sha256:{}", self.hex),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // sha1("hello") and sha256("hello")
    const HELLO_SHA1: &str = "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d";
    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn parses_bare_and_prefixed_digests() {
        let bare: Digest = HELLO_SHA1.parse().unwrap();
        assert_eq!(bare.algorithm(), Algorithm::Sha1);

        let prefixed: Digest = format!("sha256:{}", HELLO_SHA256.to_uppercase())
            .parse()
            .unwrap();
        assert_eq!(prefixed.algorithm(), Algorithm::Sha256);
        assert_eq!(prefixed.to_string(), format!("sha256:{}", HELLO_SHA256));
    }

    #[test]
    fn rejects_garbage() {
        let short_sha256 = format!("sha256:{}", HELLO_SHA1);
        for bad in ["", "abc", "md5:abcd", "sha256:nothex", short_sha256.as_str()] {
            assert!(
                matches!(bad.parse::<Digest>(), Err(ExtractError::InvalidDigest(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn verifies_file_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("blob");
        std::fs::write(&file, b"hello").unwrap();

        let sha1: Digest = HELLO_SHA1.parse().unwrap();
        sha1.verify_file(&file).unwrap();
        let sha256: Digest = format!("sha256:{}", HELLO_SHA256).parse().unwrap();
        sha256.verify_file(&file).unwrap();

        std::fs::write(&file, b"tampered").unwrap();
        match sha1.verify_file(&file) {
            Err(ExtractError::DigestMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, HELLO_SHA1);
                assert_ne!(actual, HELLO_SHA1);
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }
}
