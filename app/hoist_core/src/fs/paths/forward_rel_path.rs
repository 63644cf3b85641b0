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
use std::str::Split;

use allocative::Allocative;
use derive_more::Display;
use ref_cast::RefCast;

/// A forward pointing, fully normalized relative path.
///
/// The path is relative (no leading `/`), uses `/` as the only separator,
/// and contains no `.` or `..` segments and no empty segments. The empty
/// path is allowed and denotes the base directory itself.
#[derive(Display, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, RefCast, Allocative)]
#[repr(transparent)]
pub struct ForwardRelativePath(str);

/// The owned version of [`ForwardRelativePath`].
#[derive(Clone, Display, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Allocative)]
pub struct ForwardRelativePathBuf(String);

#[derive(Debug, thiserror::Error)]
enum ForwardRelativePathError {
    #[error("expected a relative path but got an absolute path instead: `{0}`")]
    PathNotRelative(String),
    #[error("expected a normalized path but got an un-normalized path instead: `{0}`")]
    PathNotNormalized(String),
    #[error("`{0}` is not a prefix of `{1}`")]
    StripPrefix(String, String),
}

impl ForwardRelativePath {
    #[inline]
    pub fn unchecked_new<S: ?Sized + AsRef<str>>(s: &S) -> &Self {
        ForwardRelativePath::ref_cast(s.as_ref())
    }

    #[inline]
    pub fn empty() -> &'static ForwardRelativePath {
        ForwardRelativePath::unchecked_new("")
    }

    /// Creates a `ForwardRelativePath` if the given string represents a
    /// forward, normalized relative path, otherwise error.
    ///
    /// ```
    /// use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
    ///
    /// assert!(ForwardRelativePath::new("foo/bar").is_ok());
    /// assert!(ForwardRelativePath::new("").is_ok());
    /// assert!(ForwardRelativePath::new("/abs/bar").is_err());
    /// assert!(ForwardRelativePath::new("normalize/./bar").is_err());
    /// assert!(ForwardRelativePath::new("normalize/../bar").is_err());
    /// assert!(ForwardRelativePath::new("foo//bar").is_err());
    /// assert!(ForwardRelativePath::new("foo/bar/").is_err());
    /// ```
    #[inline]
    pub fn new<S: ?Sized + AsRef<str>>(s: &S) -> anyhow::Result<&ForwardRelativePath> {
        let s = s.as_ref();
        ForwardRelativePath::verify(s)?;
        Ok(ForwardRelativePath::unchecked_new(s))
    }

    fn verify(s: &str) -> anyhow::Result<()> {
        if s.starts_with('/') {
            return Err(ForwardRelativePathError::PathNotRelative(s.to_owned()).into());
        }
        if !s.is_empty() {
            for segment in s.split('/') {
                if segment.is_empty() || segment == "." || segment == ".." {
                    return Err(ForwardRelativePathError::PathNotNormalized(s.to_owned()).into());
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
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Creates an owned `ForwardRelativePathBuf` with `path` adjoined to
    /// `self`.
    ///
    /// ```
    /// use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
    /// use hoist_core::fs::paths::forward_rel_path::ForwardRelativePathBuf;
    ///
    /// let path = ForwardRelativePath::new("foo/bar")?;
    /// let other = ForwardRelativePath::new("baz")?;
    /// assert_eq!(
    ///     ForwardRelativePathBuf::unchecked_new("foo/bar/baz".to_owned()),
    ///     path.join(other)
    /// );
    /// assert_eq!(path.to_buf(), path.join(ForwardRelativePath::empty()));
    /// assert_eq!(
    ///     other.to_buf(),
    ///     ForwardRelativePath::empty().join(other)
    /// );
    ///
    /// # anyhow::Ok(())
    /// ```
    pub fn join<P: AsRef<ForwardRelativePath>>(&self, path: P) -> ForwardRelativePathBuf {
        let path = path.as_ref();
        if self.is_empty() {
            path.to_buf()
        } else if path.is_empty() {
            self.to_buf()
        } else {
            let mut buf = String::with_capacity(self.0.len() + 1 + path.0.len());
            buf.push_str(&self.0);
            buf.push('/');
            buf.push_str(&path.0);
            ForwardRelativePathBuf(buf)
        }
    }

    /// Determines whether `base` is a prefix of `self`, considering whole
    /// path segments only.
    ///
    /// ```
    /// use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
    ///
    /// let path = ForwardRelativePath::new("some/foo")?;
    ///
    /// assert!(path.starts_with(ForwardRelativePath::new("some")?));
    /// assert!(path.starts_with(ForwardRelativePath::new("some/foo")?));
    /// assert!(path.starts_with(ForwardRelativePath::empty()));
    /// assert!(!path.starts_with(ForwardRelativePath::new("som")?));
    ///
    /// # anyhow::Ok(())
    /// ```
    pub fn starts_with<P: AsRef<ForwardRelativePath>>(&self, base: P) -> bool {
        self.strip_prefix_opt(base).is_some()
    }

    /// Returns a path that, when joined onto `base`, yields `self`. Error
    /// if `base` is not a prefix of `self`.
    ///
    /// ```
    /// use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
    ///
    /// let path = ForwardRelativePath::new("test/haha/foo.txt")?;
    ///
    /// assert_eq!(
    ///     path.strip_prefix(ForwardRelativePath::new("test")?)?,
    ///     ForwardRelativePath::new("haha/foo.txt")?
    /// );
    /// assert!(path.strip_prefix(ForwardRelativePath::new("asdf")?).is_err());
    ///
    /// # anyhow::Ok(())
    /// ```
    pub fn strip_prefix<P: AsRef<ForwardRelativePath>>(
        &self,
        base: P,
    ) -> anyhow::Result<&ForwardRelativePath> {
        let base = base.as_ref();
        match self.strip_prefix_opt(base) {
            Some(path) => Ok(path),
            None => Err(ForwardRelativePathError::StripPrefix(
                base.as_str().to_owned(),
                self.as_str().to_owned(),
            )
            .into()),
        }
    }

    /// Same as [`strip_prefix`](Self::strip_prefix), but returns `None`
    /// when `base` is not a prefix.
    ///
    /// ```
    /// use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
    ///
    /// let path = ForwardRelativePath::new("out/gen/foo")?;
    ///
    /// assert_eq!(
    ///     Some(ForwardRelativePath::new("gen/foo")?),
    ///     path.strip_prefix_opt(ForwardRelativePath::new("out")?)
    /// );
    /// assert_eq!(
    ///     Some(ForwardRelativePath::empty()),
    ///     path.strip_prefix_opt(ForwardRelativePath::new("out/gen/foo")?)
    /// );
    /// assert_eq!(Some(path), path.strip_prefix_opt(ForwardRelativePath::empty()));
    /// assert_eq!(None, path.strip_prefix_opt(ForwardRelativePath::new("out/ge")?));
    ///
    /// # anyhow::Ok(())
    /// ```
    pub fn strip_prefix_opt<P: AsRef<ForwardRelativePath>>(
        &self,
        base: P,
    ) -> Option<&ForwardRelativePath> {
        let base = base.as_ref();
        if base.is_empty() {
            Some(self)
        } else if self.0 == base.0 {
            Some(ForwardRelativePath::empty())
        } else if self.0.len() > base.0.len()
            && self.0.as_bytes()[base.0.len()] == b'/'
            && self.0.starts_with(&base.0)
        {
            Some(ForwardRelativePath::unchecked_new(
                &self.0[base.0.len() + 1..],
            ))
        } else {
            None
        }
    }

    /// Iterator over the segments of this path.
    ///
    /// ```
    /// use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
    ///
    /// let path = ForwardRelativePath::new("foo/bar/baz")?;
    /// let mut it = path.iter();
    ///
    /// assert_eq!(it.next(), Some("foo"));
    /// assert_eq!(it.next(), Some("bar"));
    /// assert_eq!(it.next(), Some("baz"));
    /// assert_eq!(it.next(), None);
    ///
    /// assert_eq!(ForwardRelativePath::empty().iter().next(), None);
    ///
    /// # anyhow::Ok(())
    /// ```
    #[inline]
    pub fn iter(&self) -> ForwardRelativePathIter<'_> {
        ForwardRelativePathIter(self.0.split('/'))
    }

    #[inline]
    pub fn to_buf(&self) -> ForwardRelativePathBuf {
        self.to_owned()
    }
}

/// Iterator over forward relative path segments.
pub struct ForwardRelativePathIter<'a>(Split<'a, char>);

impl<'a> Iterator for ForwardRelativePathIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        // The only empty segment a valid path can produce is the one the
        // empty path splits into.
        match self.0.next() {
            None | Some("") => None,
            Some(segment) => Some(segment),
        }
    }
}

impl ForwardRelativePathBuf {
    #[inline]
    pub fn unchecked_new(s: String) -> Self {
        ForwardRelativePathBuf(s)
    }

    #[inline]
    pub fn as_path(&self) -> &ForwardRelativePath {
        self
    }

    /// Pushes a `ForwardRelativePath` to the existing buffer.
    ///
    /// ```
    /// use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
    /// use hoist_core::fs::paths::forward_rel_path::ForwardRelativePathBuf;
    ///
    /// let mut path = ForwardRelativePathBuf::unchecked_new("foo".to_owned());
    /// path.push(ForwardRelativePath::new("bar")?);
    /// assert_eq!("foo/bar", path.as_str());
    ///
    /// # anyhow::Ok(())
    /// ```
    pub fn push<P: AsRef<ForwardRelativePath>>(&mut self, path: P) {
        let path = path.as_ref();
        if path.is_empty() {
            return;
        }
        if !self.0.is_empty() {
            self.0.push('/');
        }
        self.0.push_str(path.as_str());
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<'a> TryFrom<&'a str> for &'a ForwardRelativePath {
    type Error = anyhow::Error;

    /// no allocation conversion
    ///
    /// ```
    /// use hoist_core::fs::paths::forward_rel_path::ForwardRelativePath;
    ///
    /// assert!(<&ForwardRelativePath>::try_from("foo/bar").is_ok());
    /// assert!(<&ForwardRelativePath>::try_from("").is_ok());
    /// assert!(<&ForwardRelativePath>::try_from("/abs/bar").is_err());
    /// assert!(<&ForwardRelativePath>::try_from("normalize/./bar").is_err());
    /// ```
    #[inline]
    fn try_from(s: &'a str) -> anyhow::Result<&'a ForwardRelativePath> {
        ForwardRelativePath::new(s)
    }
}

impl TryFrom<String> for ForwardRelativePathBuf {
    type Error = anyhow::Error;

    /// no allocation conversion
    ///
    /// ```
    /// use hoist_core::fs::paths::forward_rel_path::ForwardRelativePathBuf;
    ///
    /// assert!(ForwardRelativePathBuf::try_from("foo/bar".to_owned()).is_ok());
    /// assert!(ForwardRelativePathBuf::try_from("".to_owned()).is_ok());
    /// assert!(ForwardRelativePathBuf::try_from("/abs/bar".to_owned()).is_err());
    /// assert!(ForwardRelativePathBuf::try_from("normalize/../bar".to_owned()).is_err());
    /// ```
    #[inline]
    fn try_from(s: String) -> anyhow::Result<ForwardRelativePathBuf> {
        ForwardRelativePath::verify(&s)?;
        Ok(ForwardRelativePathBuf(s))
    }
}

impl AsRef<str> for ForwardRelativePath {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ForwardRelativePathBuf {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<ForwardRelativePath> for ForwardRelativePath {
    #[inline]
    fn as_ref(&self) -> &ForwardRelativePath {
        self
    }
}

impl AsRef<ForwardRelativePath> for ForwardRelativePathBuf {
    #[inline]
    fn as_ref(&self) -> &ForwardRelativePath {
        ForwardRelativePath::unchecked_new(&self.0)
    }
}

impl Borrow<ForwardRelativePath> for ForwardRelativePathBuf {
    #[inline]
    fn borrow(&self) -> &ForwardRelativePath {
        self.as_ref()
    }
}

impl Deref for ForwardRelativePathBuf {
    type Target = ForwardRelativePath;

    #[inline]
    fn deref(&self) -> &ForwardRelativePath {
        ForwardRelativePath::unchecked_new(&self.0)
    }
}

impl ToOwned for ForwardRelativePath {
    type Owned = ForwardRelativePathBuf;

    #[inline]
    fn to_owned(&self) -> ForwardRelativePathBuf {
        ForwardRelativePathBuf(self.0.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::fs::paths::forward_rel_path::ForwardRelativePath;
    use crate::fs::paths::forward_rel_path::ForwardRelativePathBuf;

    #[test]
    fn paths_work_in_maps() -> anyhow::Result<()> {
        let mut map = HashMap::new();

        let p1 = ForwardRelativePath::new("foo")?;
        let p2 = ForwardRelativePath::new("bar")?;

        map.insert(p1.to_buf(), p2.to_buf());

        assert_eq!(Some(p2), map.get(p1).map(|p| p.as_path()));

        Ok(())
    }

    #[test]
    fn path_is_comparable() -> anyhow::Result<()> {
        let path1_buf = ForwardRelativePathBuf::unchecked_new("foo".into());
        let path2_buf = ForwardRelativePathBuf::unchecked_new("foo".into());
        let path3_buf = ForwardRelativePathBuf::unchecked_new("bar".into());

        let path1 = ForwardRelativePath::new("foo")?;
        let path2 = ForwardRelativePath::new("foo")?;
        let path3 = ForwardRelativePath::new("bar")?;

        let str2 = "foo";
        let str3 = "bar";
        let str_abs = "/ble";

        let string2 = "foo".to_owned();
        let string3 = "bar".to_owned();
        let string_abs = "/ble".to_owned();

        assert_eq!(path1_buf, path2_buf);
        assert_ne!(path1_buf, path3_buf);

        assert_eq!(path1, path2);
        assert_ne!(path1, path3);

        assert_eq!(path1_buf, path2);
        assert_ne!(path1, path3_buf);

        assert_eq!(path1_buf, str2);
        assert_ne!(path1_buf, str3);
        assert_ne!(path1_buf, str_abs);

        assert_eq!(path1, str2);
        assert_ne!(path1, str3);
        assert_ne!(path1, str_abs);

        assert_eq!(path1_buf, string2);
        assert_ne!(path1_buf, string3);
        assert_ne!(path1_buf, string_abs);

        assert_eq!(path1, string2);
        assert_ne!(path1, string3);
        assert_ne!(path1, string_abs);

        Ok(())
    }

    #[test]
    fn strip_prefix_is_segment_aware() -> anyhow::Result<()> {
        let path = ForwardRelativePath::new("out/gen/foo")?;

        assert_eq!(
            Some(ForwardRelativePath::new("foo")?),
            path.strip_prefix_opt(ForwardRelativePath::new("out/gen")?)
        );
        assert_eq!(None, path.strip_prefix_opt(ForwardRelativePath::new("out/g")?));
        assert_eq!(None, path.strip_prefix_opt(ForwardRelativePath::new("out/gen/foo/x")?));

        Ok(())
    }

    #[test]
    fn push_onto_empty_adds_no_separator() -> anyhow::Result<()> {
        let mut path = ForwardRelativePathBuf::unchecked_new(String::new());
        path.push(ForwardRelativePath::new("foo")?);
        path.push(ForwardRelativePath::empty());
        path.push(ForwardRelativePath::new("bar/baz")?);
        assert_eq!("foo/bar/baz", path.as_str());

        Ok(())
    }
}
