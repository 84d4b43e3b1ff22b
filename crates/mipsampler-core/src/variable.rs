//! Variable identifiers and canonical interaction keys.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Bound for anything usable as a model variable label.
///
/// Labels need a total order so interaction keys can be stored canonically,
/// and `Display` so solver-side variables get readable names.
pub trait Variable: Clone + Eq + Hash + Ord + Debug + Display + Send + Sync {}

impl<T> Variable for T where T: Clone + Eq + Hash + Ord + Debug + Display + Send + Sync {}

/// An unordered pair of distinct variables, stored smaller label first.
///
/// # Examples
///
/// ```
/// use mipsampler_core::Pair;
///
/// let a = Pair::new(3, 1).unwrap();
/// let b = Pair::new(1, 3).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.first(), &1);
/// assert!(Pair::new(2, 2).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair<V> {
    u: V,
    v: V,
}

impl<V: Ord> Pair<V> {
    /// Creates a canonical pair. Returns `None` for a self-pair.
    pub fn new(a: V, b: V) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Pair { u: a, v: b }),
            std::cmp::Ordering::Greater => Some(Pair { u: b, v: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The smaller label.
    pub fn first(&self) -> &V {
        &self.u
    }

    /// The larger label.
    pub fn second(&self) -> &V {
        &self.v
    }

    /// Both labels, smaller first.
    pub fn as_tuple(&self) -> (&V, &V) {
        (&self.u, &self.v)
    }

    /// Returns true if `x` is one of the two labels.
    pub fn contains(&self, x: &V) -> bool {
        &self.u == x || &self.v == x
    }
}
