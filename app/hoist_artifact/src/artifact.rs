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
use derive_more::Display;
use dupe::Dupe;
use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
use hoist_core::fs::paths::forward_rel_path::ForwardRelativePathBuf;
use static_assertions::assert_eq_size;

/// An `Artifact` is a file or directory tracked by the build graph, with a
/// stable identity across builds. The underlying data is not very large
/// here, but we store many copies of it, which is why we store this as an
/// Arc.
#[derive(Clone, Debug, Display, Dupe, Allocative, PartialEq, Eq, Hash)]
pub struct Artifact(Arc<ArtifactData>);

#[derive(Clone, Debug, Display, Allocative, Hash, Eq, PartialEq)]
#[display("{exec_path}")]
struct ArtifactData {
    /// Where the artifact materializes relative to the exec root.
    exec_path: ForwardRelativePathBuf,
}

assert_eq_size!(ArtifactData, [usize; 3]);

impl Artifact {
    pub fn new(exec_path: ForwardRelativePathBuf) -> Self {
        Artifact(Arc::new(ArtifactData { exec_path }))
    }

    pub fn exec_path(&self) -> &ForwardRelativePath {
        &self.0.exec_path
    }
}

#[cfg(test)]
mod tests {
    use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;

    use crate::artifact::Artifact;

    #[test]
    fn display_is_the_exec_path() -> anyhow::Result<()> {
        let artifact = Artifact::new(ForwardRelativePath::new("out/gen/foo")?.to_buf());

        assert_eq!("out/gen/foo", artifact.to_string());
        assert_eq!(ForwardRelativePath::new("out/gen/foo")?, artifact.exec_path());

        Ok(())
    }

    #[test]
    fn identity_follows_the_data() -> anyhow::Result<()> {
        let a = Artifact::new(ForwardRelativePath::new("out/a")?.to_buf());
        let b = Artifact::new(ForwardRelativePath::new("out/a")?.to_buf());
        let c = Artifact::new(ForwardRelativePath::new("out/c")?.to_buf());

        assert_eq!(a, b);
        assert_ne!(a, c);

        Ok(())
    }
}
