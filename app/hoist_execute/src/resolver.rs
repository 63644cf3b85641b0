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

use dupe::Dupe;
use gazebo::variants::VariantName;
use hoist_artifact::artifact::Artifact;
use hoist_core::fs::paths::exec_path::ExecPath;
use hoist_core::fs::paths::exec_path::ExecPathBuf;
use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
use thiserror::Error;

use crate::expansion::FilesetExpansionCache;
use crate::fileset::FilesetOutput;
use crate::index::ArtifactMetadataIndex;
use crate::input::ActionInput;
use crate::metadata::InputMetadata;
use crate::metadata::MetadataLookup;
use crate::runfiles::RunfilesTree;

#[derive(Debug, Error)]
pub enum InputMetadataError {
    /// The artifact was declared and the index recorded it as not existing.
    #[error("Declared input `{0}` does not exist")]
    MissingInput(Artifact),
    /// The index itself failed to produce an answer.
    #[error(transparent)]
    Index(#[from] anyhow::Error),
}

/// Answers "does this input exist, and what is its content identity?" for
/// everything one action attempt reads.
///
/// One resolver serves exactly one attempt: it is constructed once the
/// attempt's input dependencies have resolved and discarded when the attempt
/// ends. The index stays with the caller, the resolver only borrows it.
pub struct InputMetadataResolver<'a> {
    exec_root: ExecPathBuf,
    index: &'a dyn ArtifactMetadataIndex,
    filesets: FilesetExpansionCache,
}

impl<'a> InputMetadataResolver<'a> {
    /// `exec_root` is the prefix untracked paths may carry; `filesets` must
    /// be final, its order decides which entry wins a path collision.
    pub fn new(
        exec_root: ExecPathBuf,
        index: &'a dyn ArtifactMetadataIndex,
        filesets: Vec<(Artifact, FilesetOutput)>,
    ) -> Self {
        Self {
            exec_root,
            index,
            filesets: FilesetExpansionCache::new(filesets),
        }
    }

    /// The metadata of one input.
    ///
    /// Untracked paths are answered from the flattened filesets, where
    /// absence is an ordinary `Ok(None)`. Tracked artifacts are answered
    /// from the index, where a recorded missing-sentinel becomes
    /// [`InputMetadataError::MissingInput`].
    pub fn lookup_metadata(
        &self,
        input: &ActionInput,
    ) -> Result<Option<InputMetadata>, InputMetadataError> {
        match input {
            ActionInput::UntrackedPath(path) => {
                let found = self
                    .fileset_key(path)
                    .and_then(|key| self.filesets.lookup(key));
                match found {
                    Some(file) => tracing::trace!("Untracked path `{}`: {}", path, file),
                    None => tracing::trace!("Untracked path `{}`: no fileset entry", path),
                }
                Ok(found.map(|file| InputMetadata::File(file.dupe())))
            }
            ActionInput::Artifact(artifact) => {
                let lookup = self.index.metadata(artifact)?;
                tracing::trace!("Artifact `{}`: {}", artifact, lookup.variant_name());
                match lookup {
                    MetadataLookup::Found(metadata) => Ok(Some(metadata)),
                    MetadataLookup::KnownMissing => {
                        Err(InputMetadataError::MissingInput(artifact.dupe()))
                    }
                    // Tracked artifacts are supposed to be in the index; an
                    // absent one is the caller's contract violation,
                    // tolerated rather than escalated.
                    MetadataLookup::Unknown => Ok(None),
                }
            }
        }
    }

    /// The runfiles tree owned by this input, straight from the index.
    pub fn lookup_runfiles_metadata(&self, input: &ActionInput) -> Option<RunfilesTree> {
        self.index.runfiles_metadata(input)
    }

    /// Every runfiles tree of the action, straight from the index.
    pub fn runfiles_trees(&self) -> Vec<RunfilesTree> {
        self.index.runfiles_trees()
    }

    /// Maps an exec path back to the input declared at it.
    pub fn resolve_by_path(&self, path: &ExecPath) -> Option<ActionInput> {
        self.index.resolve_exec_path(path)
    }

    /// A bounded diagnostic summary. Never dumps contents.
    pub fn describe(&self) -> String {
        format!("{self:?}")
    }

    // Untracked paths may come with the exec root prefix attached; fileset
    // mappings are keyed relative to it.
    fn fileset_key<'p>(&self, path: &'p ExecPath) -> Option<&'p ForwardRelativePath> {
        match path.strip_prefix(&self.exec_root) {
            Some(key) => Some(key),
            None => path.as_forward_relative(),
        }
    }
}

impl fmt::Debug for InputMetadataResolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputMetadataResolver")
            .field("exec_root", &self.exec_root)
            .field("tracked_artifacts", &self.index.tracked_count())
            .field("filesets", &self.filesets.fileset_count())
            .field("filesets_expanded", &self.filesets.is_expanded())
            .finish()
    }
}
