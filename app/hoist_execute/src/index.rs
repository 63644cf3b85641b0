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
use dupe::IterDupedExt;
use dupe::OptionDupedExt;
use hoist_artifact::artifact::Artifact;
use hoist_core::fs::paths::exec_path::ExecPath;
use hoist_core::fs::paths::forward_rel_path::ForwardRelativePathBuf;
use starlark_map::small_map::SmallMap;

use crate::input::ActionInput;
use crate::metadata::DeclaredMetadata;
use crate::metadata::InputMetadata;
use crate::metadata::MetadataLookup;
use crate::runfiles::RunfilesTree;

/// Read-only access to everything the scheduler recorded about an action's
/// declared inputs.
///
/// Implementations are fully populated before execution starts and never
/// mutated afterwards, so every operation is a cheap pure read.
pub trait ArtifactMetadataIndex: Send + Sync {
    /// The stored metadata for a tracked artifact.
    ///
    /// `Unknown` means this index holds no information about the artifact.
    /// That is different from `KnownMissing`, the explicit record that the
    /// artifact was declared and does not exist. `Err` carries a failure of
    /// the underlying metadata computation.
    fn metadata(&self, artifact: &Artifact) -> anyhow::Result<MetadataLookup>;

    /// The runfiles tree owned by this input, if it has one. Untracked
    /// paths never own one.
    fn runfiles_metadata(&self, input: &ActionInput) -> Option<RunfilesTree>;

    /// Every runfiles tree registered for the action.
    fn runfiles_trees(&self) -> Vec<RunfilesTree>;

    /// Maps an exec path back to the input declared at it. Keys are
    /// exec-root-relative, so absolute paths never match.
    fn resolve_exec_path(&self, path: &ExecPath) -> Option<ActionInput>;

    /// How many tracked artifacts the index holds. For diagnostics only.
    fn tracked_count(&self) -> usize;
}

/// The index the scheduler assembles while walking an action's inputs.
#[derive(Debug, Default, Allocative)]
pub struct ActionInputIndex {
    metadata: SmallMap<Artifact, DeclaredMetadata>,
    runfiles: SmallMap<Artifact, RunfilesTree>,
    by_exec_path: SmallMap<ForwardRelativePathBuf, ActionInput>,
}

impl ActionInputIndex {
    pub fn builder() -> ActionInputIndexBuilder {
        ActionInputIndexBuilder::default()
    }
}

impl ArtifactMetadataIndex for ActionInputIndex {
    fn metadata(&self, artifact: &Artifact) -> anyhow::Result<MetadataLookup> {
        Ok(match self.metadata.get(artifact) {
            Some(DeclaredMetadata::Exists(metadata)) => MetadataLookup::Found(metadata.dupe()),
            Some(DeclaredMetadata::Missing) => MetadataLookup::KnownMissing,
            None => MetadataLookup::Unknown,
        })
    }

    fn runfiles_metadata(&self, input: &ActionInput) -> Option<RunfilesTree> {
        match input {
            ActionInput::Artifact(artifact) => self.runfiles.get(artifact).duped(),
            ActionInput::UntrackedPath(..) => None,
        }
    }

    fn runfiles_trees(&self) -> Vec<RunfilesTree> {
        self.runfiles.values().duped().collect()
    }

    fn resolve_exec_path(&self, path: &ExecPath) -> Option<ActionInput> {
        let path = path.as_forward_relative()?;
        self.by_exec_path.get(path).cloned()
    }

    fn tracked_count(&self) -> usize {
        self.metadata.len()
    }
}

/// Accumulates input declarations, then freezes into an immutable
/// [`ActionInputIndex`].
#[derive(Debug, Default)]
pub struct ActionInputIndexBuilder {
    index: ActionInputIndex,
}

impl ActionInputIndexBuilder {
    /// Declares an artifact that exists with the given metadata.
    /// Redeclaring an artifact replaces its previous record.
    pub fn declare(&mut self, artifact: &Artifact, metadata: InputMetadata) {
        self.record(artifact, DeclaredMetadata::Exists(metadata));
    }

    /// Declares an artifact known not to exist.
    pub fn declare_missing(&mut self, artifact: &Artifact) {
        self.record(artifact, DeclaredMetadata::Missing);
    }

    /// Registers the runfiles tree an artifact owns.
    pub fn add_runfiles(&mut self, artifact: &Artifact, tree: RunfilesTree) {
        self.index.runfiles.insert(artifact.dupe(), tree);
    }

    fn record(&mut self, artifact: &Artifact, metadata: DeclaredMetadata) {
        self.index.metadata.insert(artifact.dupe(), metadata);
        self.index.by_exec_path.insert(
            artifact.exec_path().to_buf(),
            ActionInput::Artifact(artifact.dupe()),
        );
    }

    pub fn build(self) -> ActionInputIndex {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use dupe::Dupe;
    use hoist_artifact::artifact::Artifact;
    use hoist_common::content_digest::ContentDigest;
    use hoist_common::file_metadata::FileMetadata;
    use hoist_core::fs::paths::exec_path::ExecPath;
    use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
    use starlark_map::small_map::SmallMap;

    use crate::index::ActionInputIndex;
    use crate::index::ArtifactMetadataIndex;
    use crate::input::ActionInput;
    use crate::metadata::InputMetadata;
    use crate::metadata::MetadataLookup;
    use crate::runfiles::RunfilesTree;

    fn artifact(path: &str) -> Artifact {
        Artifact::new(ForwardRelativePath::unchecked_new(path).to_buf())
    }

    fn file(content: &[u8]) -> InputMetadata {
        InputMetadata::File(FileMetadata {
            digest: ContentDigest::from_content(content),
            is_executable: false,
        })
    }

    #[test]
    fn lookup_distinguishes_the_three_states() -> anyhow::Result<()> {
        let present = artifact("out/present");
        let missing = artifact("out/missing");
        let undeclared = artifact("out/undeclared");

        let mut builder = ActionInputIndex::builder();
        builder.declare(&present, file(b"present"));
        builder.declare_missing(&missing);
        let index = builder.build();

        assert_matches!(index.metadata(&present)?, MetadataLookup::Found(..));
        assert_matches!(index.metadata(&missing)?, MetadataLookup::KnownMissing);
        assert_matches!(index.metadata(&undeclared)?, MetadataLookup::Unknown);

        Ok(())
    }

    #[test]
    fn redeclaring_replaces_the_record() -> anyhow::Result<()> {
        let a = artifact("out/a");

        let mut builder = ActionInputIndex::builder();
        builder.declare(&a, file(b"first"));
        builder.declare(&a, file(b"second"));
        let index = builder.build();

        assert_eq!(MetadataLookup::Found(file(b"second")), index.metadata(&a)?);
        assert_eq!(1, index.tracked_count());

        Ok(())
    }

    #[test]
    fn exec_paths_resolve_to_declared_inputs() -> anyhow::Result<()> {
        let a = artifact("out/gen/a");

        let mut builder = ActionInputIndex::builder();
        builder.declare(&a, file(b"a"));
        let index = builder.build();

        assert_eq!(
            Some(ActionInput::Artifact(a)),
            index.resolve_exec_path(ExecPath::new("out/gen/a")?)
        );
        assert_eq!(None, index.resolve_exec_path(ExecPath::new("out/gen/b")?));
        // Keys are relative; an absolute path cannot match them.
        assert_eq!(None, index.resolve_exec_path(ExecPath::new("/out/gen/a")?));

        Ok(())
    }

    #[test]
    fn runfiles_are_keyed_by_owning_artifact() -> anyhow::Result<()> {
        let owner = artifact("out/tool.runfiles");
        let other = artifact("out/other");
        let tree = RunfilesTree::new(owner.exec_path().to_buf(), SmallMap::new());

        let mut builder = ActionInputIndex::builder();
        builder.declare(&owner, InputMetadata::Directory);
        builder.declare(&other, file(b"other"));
        builder.add_runfiles(&owner, tree.dupe());
        let index = builder.build();

        assert_eq!(
            Some(tree.dupe()),
            index.runfiles_metadata(&ActionInput::Artifact(owner))
        );
        assert_eq!(
            None,
            index.runfiles_metadata(&ActionInput::Artifact(other))
        );
        assert_eq!(
            None,
            index.runfiles_metadata(&ActionInput::UntrackedPath("/x/y".to_owned().try_into()?))
        );
        assert_eq!(vec![tree], index.runfiles_trees());

        Ok(())
    }
}
