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
use dupe::Dupe;
use gazebo::variants::VariantName;
use hoist_common::content_digest::ContentDigest;
use hoist_common::file_metadata::FileMetadata;

/// Metadata of one input that exists.
#[derive(Debug, PartialEq, Dupe, Eq, Clone, Allocative, VariantName)]
pub enum InputMetadata {
    File(FileMetadata),
    /// A directory placeholder. Carries no content digest of its own.
    Directory,
}

impl InputMetadata {
    pub fn digest(&self) -> Option<&ContentDigest> {
        match self {
            Self::File(file) => Some(&file.digest),
            Self::Directory => None,
        }
    }
}

/// What an index records for one declared artifact.
///
/// "Declared but missing" is an explicit variant, never an absent value;
/// absence of a record is reserved for "this index was not given
/// information about the artifact at all".
#[derive(Debug, PartialEq, Dupe, Eq, Clone, Allocative, VariantName)]
pub enum DeclaredMetadata {
    Exists(InputMetadata),
    Missing,
}

/// The three possible outcomes of an index lookup.
#[derive(Debug, PartialEq, Dupe, Eq, Clone, Allocative, VariantName)]
pub enum MetadataLookup {
    /// The artifact is tracked and exists.
    Found(InputMetadata),
    /// The artifact is tracked and provably does not exist.
    KnownMissing,
    /// The index holds no information about the artifact.
    Unknown,
}
