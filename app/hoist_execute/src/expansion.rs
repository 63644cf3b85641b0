/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

use dupe::Dupe;
use hoist_artifact::artifact::Artifact;
use hoist_common::file_metadata::FileMetadata;
use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
use hoist_core::fs::paths::forward_rel_path::ForwardRelativePathBuf;
use once_cell::sync::OnceCell;
use starlark_map::small_map::SmallMap;

use crate::fileset::FilesetOutput;
use crate::metadata::InputMetadata;

/// The flattened view of an action's filesets: target path to file metadata.
pub type FilesetMapping = SmallMap<ForwardRelativePathBuf, FileMetadata>;

/// Lazily flattens an action's filesets into one [`FilesetMapping`].
///
/// The flattening cost is paid at most once per cache instance: the first
/// lookup from any thread runs it, concurrent first lookups block until that
/// one computation publishes, and every later lookup reads the published
/// mapping.
#[derive(Debug)]
pub struct FilesetExpansionCache {
    filesets: Vec<(Artifact, FilesetOutput)>,
    mapping: OnceCell<FilesetMapping>,
    expansions: AtomicU32,
}

impl FilesetExpansionCache {
    /// Collection order is preserved; it decides which entry wins when
    /// several name the same target path.
    pub fn new(filesets: Vec<(Artifact, FilesetOutput)>) -> Self {
        Self {
            filesets,
            mapping: OnceCell::new(),
            expansions: AtomicU32::new(0),
        }
    }

    /// Looks up the file metadata a fileset placed at `path`, flattening the
    /// filesets first if no lookup has done so yet.
    pub fn lookup(&self, path: &ForwardRelativePath) -> Option<&FileMetadata> {
        self.mapping().get(path)
    }

    pub fn fileset_count(&self) -> usize {
        self.filesets.len()
    }

    /// Whether some lookup has already flattened the filesets.
    pub fn is_expanded(&self) -> bool {
        self.mapping.get().is_some()
    }

    /// How many times the flattening ran. At most 1 by construction; the
    /// counter exists so tests and diagnostics can assert it.
    pub fn expansion_count(&self) -> u32 {
        self.expansions.load(Ordering::Relaxed)
    }

    fn mapping(&self) -> &FilesetMapping {
        // Racing initializers block here and only one executes.
        self.mapping.get_or_init(|| self.flatten())
    }

    fn flatten(&self) -> FilesetMapping {
        self.expansions.fetch_add(1, Ordering::Relaxed);

        let mut mapping = FilesetMapping::new();
        for (artifact, output) in &self.filesets {
            let before = mapping.len();
            for entry in output.entries.iter() {
                // Directory placeholders carry no digest, so they never
                // enter the mapping.
                let InputMetadata::File(file) = &entry.metadata else {
                    continue;
                };
                // Two entries for one target path: the later visit wins.
                mapping.insert(entry.path.clone(), file.dupe());
            }
            tracing::debug!(
                "Flattened fileset `{}`: {} entries, {} new paths",
                artifact,
                output.len(),
                mapping.len() - before
            );
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;

    use dupe::Dupe;
    use dupe::OptionDupedExt;
    use hoist_artifact::artifact::Artifact;
    use hoist_common::content_digest::ContentDigest;
    use hoist_common::file_metadata::FileMetadata;
    use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;

    use crate::expansion::FilesetExpansionCache;
    use crate::fileset::FilesetEntry;
    use crate::fileset::FilesetOutput;
    use crate::metadata::InputMetadata;

    fn artifact(path: &str) -> Artifact {
        Artifact::new(ForwardRelativePath::unchecked_new(path).to_buf())
    }

    fn file(content: &[u8]) -> FileMetadata {
        FileMetadata {
            digest: ContentDigest::from_content(content),
            is_executable: false,
        }
    }

    fn entry(path: &str, metadata: FileMetadata) -> FilesetEntry {
        FilesetEntry::new(
            ForwardRelativePath::unchecked_new(path).to_buf(),
            InputMetadata::File(metadata),
        )
    }

    #[test]
    fn disjoint_filesets_flatten_to_their_union() {
        let first = (
            artifact("out/first"),
            FilesetOutput::new(vec![entry("out/a", file(b"a")), entry("out/b", file(b"b"))]),
        );
        let second = (
            artifact("out/second"),
            FilesetOutput::new(vec![entry("out/c", file(b"c"))]),
        );

        for filesets in [
            vec![first.clone(), second.clone()],
            vec![second.clone(), first.clone()],
        ] {
            let cache = FilesetExpansionCache::new(filesets);
            for (path, content) in [("out/a", b"a" as &[u8]), ("out/b", b"b"), ("out/c", b"c")] {
                assert_eq!(
                    Some(&file(content)),
                    cache.lookup(ForwardRelativePath::unchecked_new(path))
                );
            }
        }
    }

    #[test]
    fn later_entry_wins_on_path_collision() {
        let first = (
            artifact("out/first"),
            FilesetOutput::new(vec![entry("out/x", file(b"one"))]),
        );
        let second = (
            artifact("out/second"),
            FilesetOutput::new(vec![entry("out/x", file(b"two"))]),
        );

        let cache = FilesetExpansionCache::new(vec![first.clone(), second.clone()]);
        assert_eq!(
            Some(&file(b"two")),
            cache.lookup(ForwardRelativePath::unchecked_new("out/x"))
        );

        let reversed = FilesetExpansionCache::new(vec![second, first]);
        assert_eq!(
            Some(&file(b"one")),
            reversed.lookup(ForwardRelativePath::unchecked_new("out/x"))
        );
    }

    #[test]
    fn later_entry_wins_within_one_fileset() {
        let fileset = (
            artifact("out/fs"),
            FilesetOutput::new(vec![entry("out/x", file(b"one")), entry("out/x", file(b"two"))]),
        );

        let cache = FilesetExpansionCache::new(vec![fileset]);
        assert_eq!(
            Some(&file(b"two")),
            cache.lookup(ForwardRelativePath::unchecked_new("out/x"))
        );
    }

    #[test]
    fn directory_entries_are_dropped() {
        let fileset = (
            artifact("out/fs"),
            FilesetOutput::new(vec![
                FilesetEntry::new(
                    ForwardRelativePath::unchecked_new("out/dir").to_buf(),
                    InputMetadata::Directory,
                ),
                entry("out/file", file(b"kept")),
            ]),
        );

        let cache = FilesetExpansionCache::new(vec![fileset]);
        assert_eq!(None, cache.lookup(ForwardRelativePath::unchecked_new("out/dir")));
        assert_eq!(
            Some(&file(b"kept")),
            cache.lookup(ForwardRelativePath::unchecked_new("out/file"))
        );
    }

    #[test]
    fn expansion_happens_once_under_concurrent_lookups() {
        const THREADS: usize = 100;

        let expected = file(b"raced");
        let cache = FilesetExpansionCache::new(vec![(
            artifact("out/fs"),
            FilesetOutput::new(vec![entry("out/raced", expected.dupe())]),
        )]);

        let barrier = Barrier::new(THREADS);
        let results: Vec<Option<FileMetadata>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        cache
                            .lookup(ForwardRelativePath::unchecked_new("out/raced"))
                            .duped()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(1, cache.expansion_count());
        for result in results {
            assert_eq!(Some(expected.dupe()), result);
        }
    }

    #[test]
    fn expansion_state_is_observable() {
        let cache = FilesetExpansionCache::new(vec![(
            artifact("out/fs"),
            FilesetOutput::new(vec![entry("out/a", file(b"a"))]),
        )]);

        assert!(!cache.is_expanded());
        assert_eq!(0, cache.expansion_count());
        assert_eq!(1, cache.fileset_count());

        cache.lookup(ForwardRelativePath::unchecked_new("out/a"));

        assert!(cache.is_expanded());
        assert_eq!(1, cache.expansion_count());

        cache.lookup(ForwardRelativePath::unchecked_new("out/a"));
        assert_eq!(1, cache.expansion_count());
    }

    #[test]
    fn empty_collection_flattens_to_nothing() {
        let cache = FilesetExpansionCache::new(Vec::new());

        assert_eq!(0, cache.fileset_count());
        assert_eq!(None, cache.lookup(ForwardRelativePath::unchecked_new("out/a")));
        assert!(cache.is_expanded());
        assert_eq!(1, cache.expansion_count());
    }
}
