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
use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
use hoist_core::fs::paths::forward_rel_path::ForwardRelativePathBuf;
use starlark_map::small_map::SmallMap;

use crate::metadata::InputMetadata;

/// A runfiles tree: the symlink forest a tool expects next to its binary,
/// described as tree-relative paths and the metadata of their targets.
///
/// Cloning is cheap, the contents are stored as an `Arc`.
#[derive(Clone, Debug, Dupe, PartialEq, Eq, Allocative)]
pub struct RunfilesTree(Arc<RunfilesTreeData>);

#[derive(Debug, PartialEq, Eq, Allocative)]
struct RunfilesTreeData {
    exec_path: ForwardRelativePathBuf,
    files: SmallMap<ForwardRelativePathBuf, InputMetadata>,
}

impl RunfilesTree {
    pub fn new(
        exec_path: ForwardRelativePathBuf,
        files: SmallMap<ForwardRelativePathBuf, InputMetadata>,
    ) -> Self {
        Self(Arc::new(RunfilesTreeData { exec_path, files }))
    }

    /// The root the tree is laid out under, relative to the exec root.
    pub fn exec_path(&self) -> &ForwardRelativePath {
        &self.0.exec_path
    }

    pub fn files(&self) -> &SmallMap<ForwardRelativePathBuf, InputMetadata> {
        &self.0.files
    }
}
