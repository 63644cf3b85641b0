/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use allocative::Allocative;
use derive_more::Display;
use dupe::Dupe;

use crate::content_digest::ContentDigest;

/// Metadata of a regular file that exists.
#[derive(Debug, Dupe, Hash, PartialEq, Eq, Clone, Display, Allocative)]
#[display("File(digest={}, is_executable={})", digest, is_executable)]
pub struct FileMetadata {
    pub digest: ContentDigest,
    pub is_executable: bool,
}

impl FileMetadata {
    /// Metadata of an empty file
    pub fn empty() -> Self {
        Self {
            digest: ContentDigest::from_content(&[]),
            is_executable: false,
        }
    }

    pub fn with_executable(mut self, executable: bool) -> Self {
        self.is_executable = executable;
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::file_metadata::FileMetadata;

    #[test]
    fn display_is_stable() {
        let metadata = FileMetadata::empty().with_executable(true);
        assert_eq!(
            format!(
                "File(digest={}, is_executable=true)",
                metadata.digest
            ),
            metadata.to_string()
        );
    }
}
