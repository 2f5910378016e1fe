//! Locations of nodes inside a document.

use std::fmt;

use smallvec::SmallVec;

/// One step from a container to a child.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member.
    Key(String),
    /// Array element.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Path from the document root to a node. The empty path is the root.
///
/// Documents are rarely deeper than eight levels, so segments live inline.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct DocPath {
    segments: SmallVec<[PathSegment; 8]>,
}

impl DocPath {
    #[inline]
    pub fn root() -> Self {
        DocPath::default()
    }

    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        DocPath {
            segments: segments.into_iter().collect(),
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[inline]
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Path of the enclosing container, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<DocPath> {
        if self.is_root() {
            return None;
        }
        let mut parent = self.clone();
        parent.segments.pop();
        Some(parent)
    }

    #[must_use]
    pub fn child(&self, segment: PathSegment) -> DocPath {
        let mut child = self.clone();
        child.segments.push(segment);
        child
    }

    #[must_use]
    pub fn key(&self, key: &str) -> DocPath {
        self.child(PathSegment::Key(key.to_string()))
    }

    #[must_use]
    pub fn index(&self, index: usize) -> DocPath {
        self.child(PathSegment::Index(index))
    }

    /// Whether `self` is `other` or lies inside it.
    pub fn starts_with(&self, other: &DocPath) -> bool {
        self.segments.starts_with(&other.segments)
    }
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Renders as `$` for the root, otherwise `a.b[2]["odd key"]`.
impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("$");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if is_plain_key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Key(key) => write!(f, "[{key:?}]")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromIterator<PathSegment> for DocPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        DocPath::from_segments(iter)
    }
}
