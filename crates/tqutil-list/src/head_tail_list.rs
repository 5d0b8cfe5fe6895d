use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tqutil_core::{UtilError, UtilResult};

/// An immutable singly-linked list with structural sharing.
///
/// Every operation that looks like a mutation returns a new list; the
/// receiver is never changed. New lists reuse the nodes of the lists they
/// were built from wherever the suffix is unchanged, so `clone` and `add`
/// are O(1). Index 0 is the head, i.e. the element added last.
///
/// The empty list carries no allocation. Equality is structural.
pub struct HeadTailList<T> {
    node: Option<Arc<Node<T>>>,
}

struct Node<T> {
    head: T,
    tail: HeadTailList<T>,
    size: usize,
}

impl<T> HeadTailList<T> {
    pub const fn empty() -> Self {
        Self { node: None }
    }

    pub const fn new() -> Self {
        Self::empty()
    }

    /// A new list with `element` in front of this one.
    pub fn add(&self, element: T) -> Self {
        Self {
            node: Some(Arc::new(Node {
                head: element,
                tail: self.clone(),
                size: self.len() + 1,
            })),
        }
    }

    pub fn head(&self) -> Option<&T> {
        self.node.as_ref().map(|node| &node.head)
    }

    /// Everything but the head. The tail of the empty list is the empty list.
    pub fn tail(&self) -> Self {
        match &self.node {
            Some(node) => node.tail.clone(),
            None => Self::empty(),
        }
    }

    pub fn len(&self) -> usize {
        self.node.as_ref().map_or(0, |node| node.size)
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// The element `index` steps away from the head.
    pub fn get(&self, index: usize) -> UtilResult<&T> {
        self.iter().nth(index).ok_or_else(|| UtilError::IndexOutOfRange {
            index,
            size: self.len(),
        })
    }

    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|e| e == element)
    }

    /// Same as `tail().add(element)`.
    pub fn replace_head(&self, element: T) -> Self {
        self.tail().add(element)
    }

    /// Traverse head to tail. Each call starts a fresh traversal.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.node.as_deref(),
            remaining: self.len(),
        }
    }

    /// Whether both lists are the very same nodes (or both empty).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.node, &other.node) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Clone> HeadTailList<T> {
    /// Build a list whose head-to-tail order equals the slice order.
    pub fn from_slice(elements: &[T]) -> Self {
        elements
            .iter()
            .rev()
            .fold(Self::empty(), |list, e| list.add(e.clone()))
    }

    pub fn revert(&self) -> Self {
        self.iter().fold(Self::empty(), |list, e| list.add(e.clone()))
    }

    /// A list holding the elements of `other` followed by those of `self`.
    /// `self` becomes the shared tail of the result.
    pub fn prepend(&self, other: &Self) -> Self {
        let front: Vec<&T> = other.iter().collect();
        push_all(self.clone(), front)
    }

    /// A list holding the elements of `self` followed by those of `other`.
    pub fn append(&self, other: &Self) -> Self {
        other.prepend(self)
    }

    /// Interleave both lists head first. Once the shorter list runs out,
    /// the rest of the longer one is shared as the tail of the result.
    pub fn merge(&self, other: &Self) -> Self {
        let mut front = Vec::with_capacity(2 * self.len().min(other.len()));
        let (mut a, mut b) = (self, other);
        let rest = loop {
            match (&a.node, &b.node) {
                (Some(na), Some(nb)) => {
                    front.push(&na.head);
                    front.push(&nb.head);
                    a = &na.tail;
                    b = &nb.tail;
                }
                (Some(_), None) => break a.clone(),
                (None, _) => break b.clone(),
            }
        };
        push_all(rest, front)
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Clone + PartialEq> HeadTailList<T> {
    /// A list without any element equal to `element`. Returns a clone of
    /// `self` when nothing matches; otherwise the part after the last match
    /// is shared.
    pub fn remove(&self, element: &T) -> Self {
        let mut kept = Vec::new();
        let mut pending = Vec::new();
        let mut rest = None;
        let mut cursor = self;
        while let Some(node) = &cursor.node {
            if node.head == *element {
                kept.append(&mut pending);
                rest = Some(&node.tail);
            } else {
                pending.push(&node.head);
            }
            cursor = &node.tail;
        }

        match rest {
            Some(rest) => push_all(rest.clone(), kept),
            None => self.clone(),
        }
    }
}

/// Add `front` onto `list` so that `front[0]` ends up as the head.
fn push_all<T: Clone>(list: HeadTailList<T>, front: Vec<&T>) -> HeadTailList<T> {
    front
        .into_iter()
        .rev()
        .fold(list, |list, e| list.add(e.clone()))
}

impl<T> Clone for HeadTailList<T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
        }
    }
}

impl<T> Default for HeadTailList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

// Unlink uniquely owned nodes one at a time so long lists don't recurse.
impl<T> Drop for HeadTailList<T> {
    fn drop(&mut self) {
        let mut next = self.node.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.tail.node.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T: PartialEq> PartialEq for HeadTailList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && (self.ptr_eq(other) || self.iter().eq(other.iter()))
    }
}

impl<T: Eq> Eq for HeadTailList<T> {}

impl<T: Hash> Hash for HeadTailList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for e in self {
            e.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for HeadTailList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for HeadTailList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, e) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{e}")?;
        }
        f.write_str("]")
    }
}

impl<T> FromIterator<T> for HeadTailList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let elements: Vec<T> = iter.into_iter().collect();
        elements
            .into_iter()
            .rev()
            .fold(Self::empty(), |list, e| list.add(e))
    }
}

impl<T> From<Vec<T>> for HeadTailList<T> {
    fn from(elements: Vec<T>) -> Self {
        elements.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a HeadTailList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Serialize> Serialize for HeadTailList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for HeadTailList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}

/// Head-to-tail iterator over a [`HeadTailList`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.tail.node.as_deref();
        self.remaining -= 1;
        Some(&node.head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            remaining: self.remaining,
        }
    }
}
