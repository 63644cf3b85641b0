/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::sync::Arc;

use allocative::Allocative;
use dupe::Dupe;
use hoist_core::fs::paths::forward_rel_path::ForwardRelativePathBuf;

use crate::metadata::InputMetadata;

/// One materialized entry of an expanded fileset.
#[derive(Clone, Debug, PartialEq, Eq, Allocative)]
pub struct FilesetEntry {
    /// Where the entry lives, relative to the exec root.
    pub path: ForwardRelativePathBuf,
    pub metadata: InputMetadata,
}

impl FilesetEntry {
    pub fn new(path: ForwardRelativePathBuf, metadata: InputMetadata) -> Self {
        Self { path, metadata }
    }
}

/// The manifest a fileset artifact expanded to.
///
/// Entry order is meaningful: when several entries name the same path, the
/// later one describes what actually ends up on disk.
#[derive(Clone, Dupe, Debug, PartialEq, Eq, Allocative)]
pub struct FilesetOutput {
    pub entries: Arc<[FilesetEntry]>,
}

impl FilesetOutput {
    pub fn new(entries: Vec<FilesetEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
