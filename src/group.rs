//! Permutation groups given by coset representatives
//!
//! nauty describes the automorphism group it finds as a chain of point
//! stabilisers. For each level it fixes one point and lists one
//! representative for every image of that point. Every group element
//! is a product with one representative per level.
use std::ops::{ControlFlow, Index};

/// Permutation of `0..n`, mapping `i` to `self[i]`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn identity(n: usize) -> Self {
        Self(Vec::from_iter(0..n))
    }

    /// Build a permutation from its images
    ///
    /// Returns `None` if `images` is not a permutation of `0..images.len()`.
    pub fn from_images(images: Vec<usize>) -> Option<Self> {
        let n = images.len();
        let mut seen = vec![false; n];
        for &i in &images {
            if i >= n || std::mem::replace(&mut seen[i], true) {
                return None;
            }
        }
        Some(Self(images))
    }

    pub(crate) fn from_images_unchecked(images: Vec<usize>) -> Self {
        debug_assert!(Self::from_images(images.clone()).is_some());
        Self(images)
    }

    pub fn degree(&self) -> usize {
        self.0.len()
    }

    pub fn images(&self) -> &[usize] {
        &self.0
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &j)| i == j)
    }

    /// The permutation applying `self` first and `other` second
    pub fn then(&self, other: &Self) -> Self {
        debug_assert_eq!(self.degree(), other.degree());
        Self(self.0.iter().map(|&i| other.0[i]).collect())
    }

    /// Act on a colouring: position `i` receives the colour of `self[i]`
    pub fn apply_to<T: Copy>(&self, colouring: &[T]) -> Vec<T> {
        self.0.iter().map(|&i| colouring[i]).collect()
    }
}

impl Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, i: usize) -> &usize {
        &self.0[i]
    }
}

/// One level of a stabiliser chain
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    fixed_point: usize,
    // representatives[0] maps the fixed point to itself and is `None`
    representatives: Vec<Option<Permutation>>,
}

impl Level {
    /// `representatives` must start with `None` for the identity
    pub(crate) fn new(fixed_point: usize, representatives: Vec<Option<Permutation>>) -> Self {
        debug_assert!(matches!(representatives.first(), Some(None)));
        Self {
            fixed_point,
            representatives,
        }
    }

    pub fn fixed_point(&self) -> usize {
        self.fixed_point
    }

    /// Size of the orbit of the fixed point
    pub fn orbit_size(&self) -> usize {
        self.representatives.len()
    }
}

/// Permutation group with generators and a stabiliser chain
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermGroup {
    degree: usize,
    generators: Vec<Permutation>,
    levels: Vec<Level>,
    order: u128,
}

impl PermGroup {
    /// The trivial group acting on `0..degree`
    pub fn trivial(degree: usize) -> Self {
        Self {
            degree,
            generators: Vec::new(),
            levels: Vec::new(),
            order: 1,
        }
    }

    /// Assemble a group from its stabiliser chain
    ///
    /// `levels[0]` is the top of the chain. `order` is the group order
    /// as reported by the caller.
    pub(crate) fn from_chain(
        degree: usize,
        generators: Vec<Permutation>,
        levels: Vec<Level>,
        order: u128,
    ) -> Self {
        Self {
            degree,
            generators,
            levels,
            order,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn generators(&self) -> &[Permutation] {
        &self.generators
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Group order, saturating at `u128::MAX`
    pub fn order(&self) -> u128 {
        self.order
    }

    /// Call `f` for every group element, stopping early on `Break`
    ///
    /// The identity is visited first.
    pub fn try_for_each_element<B, F>(&self, mut f: F) -> ControlFlow<B>
    where
        F: FnMut(&Permutation) -> ControlFlow<B>,
    {
        let id = Permutation::identity(self.degree);
        match self.levels.len() {
            0 => f(&id),
            depth => self.walk(depth - 1, &id, &mut f),
        }
    }

    // products from the bottom of the chain upwards
    fn walk<B, F>(&self, level: usize, before: &Permutation, f: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&Permutation) -> ControlFlow<B>,
    {
        for rep in &self.levels[level].representatives {
            match rep {
                None => self.step(level, before, f)?,
                Some(rep) => self.step(level, &before.then(rep), f)?,
            }
        }
        ControlFlow::Continue(())
    }

    fn step<B, F>(&self, level: usize, p: &Permutation, f: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&Permutation) -> ControlFlow<B>,
    {
        if level == 0 {
            f(p)
        } else {
            self.walk(level - 1, p, f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ahash::AHashSet;

    fn perm(images: &[usize]) -> Permutation {
        Permutation::from_images(images.to_vec()).unwrap()
    }

    fn elements(g: &PermGroup) -> Vec<Permutation> {
        let mut res = Vec::new();
        let _ = g.try_for_each_element(|p| -> ControlFlow<()> {
            res.push(p.clone());
            ControlFlow::Continue(())
        });
        res
    }

    // Sym({0, 1, 2}) fixing 3: stabilise 0, then 1
    fn sym3() -> PermGroup {
        let top = Level::new(
            0,
            vec![None, Some(perm(&[1, 0, 2, 3])), Some(perm(&[2, 1, 0, 3]))],
        );
        let bottom = Level::new(1, vec![None, Some(perm(&[0, 2, 1, 3]))]);
        let generators = vec![perm(&[0, 2, 1, 3]), perm(&[1, 0, 2, 3])];
        PermGroup::from_chain(4, generators, vec![top, bottom], 6)
    }

    #[test]
    fn permutation_basics() {
        let p = perm(&[1, 2, 0]);
        assert_eq!(p.then(&p), perm(&[2, 0, 1]));
        assert_eq!(p.then(&p).then(&p), Permutation::identity(3));
        assert_eq!(p.apply_to(&[5, 6, 7]), [6, 7, 5]);
        assert_eq!(p[2], 0);
        assert!(Permutation::from_images(vec![0, 0]).is_none());
        assert!(Permutation::from_images(vec![0, 2]).is_none());
    }

    #[test]
    fn trivial() {
        let g = PermGroup::trivial(4);
        assert_eq!(g.order(), 1);
        assert_eq!(elements(&g), [Permutation::identity(4)]);
    }

    #[test]
    fn symmetric() {
        let g = sym3();
        let elems = elements(&g);
        assert_eq!(elems.len(), 6);
        assert!(elems[0].is_identity());
        let distinct: AHashSet<_> = elems.iter().collect();
        assert_eq!(distinct.len(), 6);
        assert!(elems.iter().all(|p| p[3] == 3));
        let orbit_sizes: Vec<_> = g.levels().iter().map(|l| l.orbit_size()).collect();
        assert_eq!(orbit_sizes, [3, 2]);
        assert_eq!(g.levels()[0].fixed_point(), 0);
    }

    #[test]
    fn early_abort() {
        let g = sym3();
        let mut visited = 0;
        let res = g.try_for_each_element(|p| {
            visited += 1;
            if p.is_identity() {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(p.clone())
            }
        });
        assert_eq!(visited, 2);
        assert!(matches!(res, ControlFlow::Break(p) if !p.is_identity()));
    }
}
