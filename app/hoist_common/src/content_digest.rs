/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::fmt;

use allocative::Allocative;
use dupe::Dupe;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

/// The number of bytes required by a SHA-256 hash
pub const SHA256_SIZE: usize = 32;

/// The content identity of a file: the SHA-256 of its bytes and its size.
///
/// Renders as `HASH:SIZE` with the hash in lowercase hex, and parses back
/// from the same form.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Allocative, Clone)]
pub struct ContentDigest {
    hash: [u8; SHA256_SIZE],
    size: u64,
}

// We consider copying 40 bytes cheap enough not to qualify for Dupe
impl Dupe for ContentDigest {}

impl ContentDigest {
    pub fn new(hash: [u8; SHA256_SIZE], size: u64) -> Self {
        Self { hash, size }
    }

    pub fn from_content(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self::new(hasher.finalize().into(), bytes.len() as u64)
    }

    pub fn parse(s: &str) -> Result<Self, ContentDigestParseError> {
        let (hash, size) = s
            .split_once(':')
            .ok_or(ContentDigestParseError::MissingSizeSeparator)?;

        let mut bytes = [0; SHA256_SIZE];
        hex::decode_to_slice(hash, &mut bytes).map_err(ContentDigestParseError::InvalidHash)?;
        let size = size.parse().map_err(ContentDigestParseError::InvalidSize)?;

        Ok(Self::new(bytes, size))
    }

    pub fn hash(&self) -> &[u8; SHA256_SIZE] {
        &self.hash
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", hex::encode(self.hash), self.size)
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Error, Debug)]
pub enum ContentDigestParseError {
    #[error("The digest is missing a size separator, it should look like `HASH:SIZE`")]
    MissingSizeSeparator,

    #[error("The hash part of the digest is invalid")]
    InvalidHash(#[source] hex::FromHexError),

    #[error("The size part of the digest is invalid")]
    InvalidSize(#[source] std::num::ParseIntError),
}
