use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Sub};

/// Largest number of vertices accepted in an input digraph
pub const MAX_VERTICES: usize = 32;

/// Number of vertices a [VertexSet] can hold
///
/// Leaves room for the additional sink vertex of an extended digraph.
pub const SET_CAPACITY: usize = u64::BITS as usize;

/// Set of vertices packed into a single machine word
///
/// Vertex `v` is stored in bit `v`.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexSet(u64);

impl VertexSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn singleton(v: usize) -> Self {
        debug_assert!(v < SET_CAPACITY);
        Self(1 << v)
    }

    /// The set `{0, 1, ..., n - 1}`
    pub fn full(n: usize) -> Self {
        debug_assert!(n <= SET_CAPACITY);
        if n == SET_CAPACITY {
            Self(u64::MAX)
        } else {
            Self((1 << n) - 1)
        }
    }

    pub fn contains(self, v: usize) -> bool {
        v < SET_CAPACITY && self.0 & (1 << v) != 0
    }

    pub fn insert(&mut self, v: usize) {
        *self |= Self::singleton(v)
    }

    pub fn remove(&mut self, v: usize) {
        self.0 &= !Self::singleton(v).0
    }

    /// The set with the membership of `v` flipped
    pub fn toggled(self, v: usize) -> Self {
        Self(self.0 ^ Self::singleton(v).0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn first(self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.0.trailing_zeros() as usize)
        }
    }

    pub fn is_disjoint(self, other: Self) -> bool {
        (self & other).is_empty()
    }

    pub fn is_subset(self, other: Self) -> bool {
        (self - other).is_empty()
    }

    /// Iterate over the members in ascending order
    pub fn iter(self) -> Iter {
        Iter(self.0)
    }
}

impl BitOr for VertexSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for VertexSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl BitAnd for VertexSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Set difference
impl Sub for VertexSet {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }
}

impl FromIterator<usize> for VertexSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::empty();
        for v in iter {
            set.insert(v);
        }
        set
    }
}

impl IntoIterator for VertexSet {
    type Item = usize;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl fmt::Debug for VertexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Iter(u64);

impl Iterator for Iter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let v = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}
