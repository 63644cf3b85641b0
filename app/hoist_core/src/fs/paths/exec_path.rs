/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::borrow::Borrow;
use std::ops::Deref;

use allocative::Allocative;
use derive_more::Display;
use ref_cast::RefCast;

use crate::fs::paths::forward_rel_path::ForwardRelativePath;
use crate::fs::paths::forward_rel_path::ForwardRelativePathBuf;

/// A normalized path as actions see it during execution: either absolute
/// (leading `/`) or relative to the exec root.
///
/// A relative `ExecPath` is always also a valid [`ForwardRelativePath`];
/// no `.` or `..` segments, no empty segments, no trailing `/`.
#[derive(Display, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, RefCast, Allocative)]
#[repr(transparent)]
pub struct ExecPath(str);

/// The owned version of [`ExecPath`].
#[derive(Clone, Display, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Allocative)]
pub struct ExecPathBuf(String);

#[derive(Debug, thiserror::Error)]
enum ExecPathError {
    #[error("expected a normalized path but got an un-normalized path instead: `{0}`")]
    PathNotNormalized(String),
}

impl ExecPath {
    #[inline]
    pub fn unchecked_new<S: ?Sized + AsRef<str>>(s: &S) -> &Self {
        ExecPath::ref_cast(s.as_ref())
    }

    /// Creates an `ExecPath` if the given string represents a normalized
    /// absolute or relative path, otherwise error.
    ///
    /// ```
    /// use hoist_core::fs::paths::exec_path::ExecPath;
    ///
    /// assert!(ExecPath::new("/exec/out/gen").is_ok());
    /// assert!(ExecPath::new("out/gen").is_ok());
    /// assert!(ExecPath::new("/").is_ok());
    /// assert!(ExecPath::new("").is_ok());
    /// assert!(ExecPath::new("/exec/./out").is_err());
    /// assert!(ExecPath::new("/exec//out").is_err());
    /// assert!(ExecPath::new("out/gen/").is_err());
    /// assert!(ExecPath::new("../out").is_err());
    /// ```
    pub fn new<S: ?Sized + AsRef<str>>(s: &S) -> anyhow::Result<&ExecPath> {
        let s = s.as_ref();
        ExecPath::verify(s)?;
        Ok(ExecPath::unchecked_new(s))
    }

    fn verify(s: &str) -> anyhow::Result<()> {
        let rel = s.strip_prefix('/').unwrap_or(s);
        if !rel.is_empty() {
            for segment in rel.split('/') {
                if segment.is_empty() || segment == "." || segment == ".." {
                    return Err(ExecPathError::PathNotNormalized(s.to_owned()).into());
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    /// The path reinterpreted as exec-root relative; `None` when absolute.
    ///
    /// ```
    /// use hoist_core::fs::paths::exec_path::ExecPath;
    /// use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
    ///
    /// assert_eq!(
    ///     Some(ForwardRelativePath::new("out/gen")?),
    ///     ExecPath::new("out/gen")?.as_forward_relative()
    /// );
    /// assert_eq!(None, ExecPath::new("/exec/out")?.as_forward_relative());
    ///
    /// # anyhow::Ok(())
    /// ```
    pub fn as_forward_relative(&self) -> Option<&ForwardRelativePath> {
        if self.is_absolute() {
            None
        } else {
            Some(ForwardRelativePath::unchecked_new(&self.0))
        }
    }

    /// Strips `base` off the front of `self`, considering whole path
    /// segments only. `None` when `base` is not a prefix, including the
    /// absolute/relative mismatch cases.
    ///
    /// ```
    /// use hoist_core::fs::paths::exec_path::ExecPath;
    /// use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
    ///
    /// let path = ExecPath::new("/exec/out/gen/foo")?;
    ///
    /// assert_eq!(
    ///     Some(ForwardRelativePath::new("out/gen/foo")?),
    ///     path.strip_prefix(ExecPath::new("/exec")?)
    /// );
    /// assert_eq!(
    ///     Some(ForwardRelativePath::new("exec/out/gen/foo")?),
    ///     path.strip_prefix(ExecPath::new("/")?)
    /// );
    /// assert_eq!(
    ///     Some(ForwardRelativePath::empty()),
    ///     path.strip_prefix(ExecPath::new("/exec/out/gen/foo")?)
    /// );
    /// // A prefix only in the string sense does not count.
    /// assert_eq!(None, path.strip_prefix(ExecPath::new("/exec/out/ge")?));
    /// assert_eq!(None, ExecPath::new("/execx/foo")?.strip_prefix(ExecPath::new("/exec")?));
    /// // Mixed absolute and relative never match.
    /// assert_eq!(None, path.strip_prefix(ExecPath::new("exec")?));
    /// assert_eq!(None, ExecPath::new("out/gen")?.strip_prefix(ExecPath::new("/exec")?));
    ///
    /// # anyhow::Ok(())
    /// ```
    pub fn strip_prefix<P: AsRef<ExecPath>>(&self, base: P) -> Option<&ForwardRelativePath> {
        let base = base.as_ref();
        if self.is_absolute() != base.is_absolute() {
            return None;
        }
        if base.0.is_empty() {
            return self.as_forward_relative();
        }
        let rest = self.0.strip_prefix(&base.0)?;
        if rest.is_empty() {
            return Some(ForwardRelativePath::empty());
        }
        if base.0.ends_with('/') {
            // Only the root `/` ends with a separator.
            return Some(ForwardRelativePath::unchecked_new(rest));
        }
        rest.strip_prefix('/').map(ForwardRelativePath::unchecked_new)
    }

    #[inline]
    pub fn to_buf(&self) -> ExecPathBuf {
        self.to_owned()
    }
}

impl ExecPathBuf {
    #[inline]
    pub fn unchecked_new(s: String) -> Self {
        ExecPathBuf(s)
    }

    #[inline]
    pub fn as_path(&self) -> &ExecPath {
        self
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<'a> From<&'a ForwardRelativePath> for &'a ExecPath {
    /// no allocation conversion
    ///
    /// ```
    /// use hoist_core::fs::paths::exec_path::ExecPath;
    /// use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
    ///
    /// let path = ForwardRelativePath::new("out/gen")?;
    ///
    /// assert_eq!(<&ExecPath>::from(path), ExecPath::new("out/gen")?);
    ///
    /// # anyhow::Ok(())
    /// ```
    #[inline]
    fn from(p: &'a ForwardRelativePath) -> &'a ExecPath {
        ExecPath::unchecked_new(p.as_str())
    }
}

impl From<ForwardRelativePathBuf> for ExecPathBuf {
    #[inline]
    fn from(p: ForwardRelativePathBuf) -> ExecPathBuf {
        ExecPathBuf(p.into_string())
    }
}

impl<'a> TryFrom<&'a str> for &'a ExecPath {
    type Error = anyhow::Error;

    /// no allocation conversion
    ///
    /// ```
    /// use hoist_core::fs::paths::exec_path::ExecPath;
    ///
    /// assert!(<&ExecPath>::try_from("/exec/out").is_ok());
    /// assert!(<&ExecPath>::try_from("out/gen").is_ok());
    /// assert!(<&ExecPath>::try_from("/exec/../out").is_err());
    /// ```
    #[inline]
    fn try_from(s: &'a str) -> anyhow::Result<&'a ExecPath> {
        ExecPath::new(s)
    }
}

impl TryFrom<String> for ExecPathBuf {
    type Error = anyhow::Error;

    /// no allocation conversion
    ///
    /// ```
    /// use hoist_core::fs::paths::exec_path::ExecPathBuf;
    ///
    /// assert!(ExecPathBuf::try_from("/exec/out".to_owned()).is_ok());
    /// assert!(ExecPathBuf::try_from("out//gen".to_owned()).is_err());
    /// ```
    #[inline]
    fn try_from(s: String) -> anyhow::Result<ExecPathBuf> {
        ExecPath::verify(&s)?;
        Ok(ExecPathBuf(s))
    }
}

impl AsRef<str> for ExecPath {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ExecPathBuf {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<ExecPath> for ExecPath {
    #[inline]
    fn as_ref(&self) -> &ExecPath {
        self
    }
}

impl AsRef<ExecPath> for ExecPathBuf {
    #[inline]
    fn as_ref(&self) -> &ExecPath {
        ExecPath::unchecked_new(&self.0)
    }
}

impl Borrow<ExecPath> for ExecPathBuf {
    #[inline]
    fn borrow(&self) -> &ExecPath {
        self.as_ref()
    }
}

impl Deref for ExecPathBuf {
    type Target = ExecPath;

    #[inline]
    fn deref(&self) -> &ExecPath {
        ExecPath::unchecked_new(&self.0)
    }
}

impl ToOwned for ExecPath {
    type Owned = ExecPathBuf;

    #[inline]
    fn to_owned(&self) -> ExecPathBuf {
        ExecPathBuf(self.0.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use crate::fs::paths::exec_path::ExecPath;
    use crate::fs::paths::forward_rel_path::ForwardRelativePath;

    #[test]
    fn strip_prefix_requires_segment_boundary() -> anyhow::Result<()> {
        let root = ExecPath::new("/exec")?;

        assert_eq!(
            Some(ForwardRelativePath::new("out/gen/foo")?),
            ExecPath::new("/exec/out/gen/foo")?.strip_prefix(root)
        );
        assert_eq!(None, ExecPath::new("/execx/foo")?.strip_prefix(root));
        assert_eq!(None, ExecPath::new("/exe")?.strip_prefix(root));

        Ok(())
    }

    #[test]
    fn relative_paths_strip_relative_bases() -> anyhow::Result<()> {
        assert_eq!(
            Some(ForwardRelativePath::new("gen/foo")?),
            ExecPath::new("out/gen/foo")?.strip_prefix(ExecPath::new("out")?)
        );
        assert_eq!(
            Some(ForwardRelativePath::new("out/gen/foo")?),
            ExecPath::new("out/gen/foo")?.strip_prefix(ExecPath::new("")?)
        );

        Ok(())
    }

    #[test]
    fn absoluteness_is_preserved() -> anyhow::Result<()> {
        assert!(ExecPath::new("/exec/out")?.is_absolute());
        assert!(!ExecPath::new("out")?.is_absolute());
        assert!(ExecPath::new("/")?.is_absolute());
        assert!(!ExecPath::new("")?.is_absolute());

        assert!(ExecPath::new("/exec/out")?.as_forward_relative().is_none());
        assert_eq!(
            Some(ForwardRelativePath::new("")?),
            ExecPath::new("")?.as_forward_relative()
        );

        Ok(())
    }
}
