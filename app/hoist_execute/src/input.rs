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
use hoist_artifact::artifact::Artifact;
use hoist_core::fs::paths::exec_path::ExecPath;
use hoist_core::fs::paths::exec_path::ExecPathBuf;

/// The identity of one thing an action reads.
///
/// Inputs are either artifacts tracked by the build graph, or bare paths
/// that carry no graph identity of their own, such as individual files
/// inside a dynamically produced symlink tree.
#[derive(Clone, Debug, Display, PartialEq, Eq, Hash, Allocative)]
pub enum ActionInput {
    Artifact(Artifact),
    UntrackedPath(ExecPathBuf),
}

impl ActionInput {
    /// The path this input occupies during execution. Tracked artifacts
    /// always have exec-root-relative paths; untracked ones may be
    /// absolute.
    pub fn exec_path(&self) -> &ExecPath {
        match self {
            Self::Artifact(artifact) => artifact.exec_path().into(),
            Self::UntrackedPath(path) => path,
        }
    }
}
