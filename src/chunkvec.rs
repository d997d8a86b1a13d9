//! A sequence stored in fixed-capacity chunks, indexed by a tree of counts.
//!
//! The sweep's status needs positional inserts and removals in the middle of
//! a sequence that's kept sorted by a comparison that changes as the sweep
//! moves. The elements live in chunks of at most `B`, and the chunks hang off
//! a B-tree whose branches record how many elements are below each child.
//! Finding a position, inserting and removing all walk a single root-to-leaf
//! path, so they take `O(B log n)` time.

use arrayvec::ArrayVec;
use serde::ser::SerializeSeq;

/// A sequence of `T`, stored in a B-tree with chunks of at most `B` elements.
#[derive(Clone, Debug)]
pub struct ChunkVec<T, const B: usize> {
    root: Node<T, B>,
    len: usize,
}

#[derive(Clone, Debug)]
enum Node<T, const B: usize> {
    Chunk(ArrayVec<T, B>),
    Branch {
        // counts[i] is the number of elements under children[i].
        counts: ArrayVec<usize, B>,
        children: ArrayVec<Box<Node<T, B>>, B>,
    },
}

// Inserts into an array, splitting it in half first if it's full. The upper
// half is returned, and it goes immediately after `v`.
fn insert_or_split<U, const B: usize>(
    v: &mut ArrayVec<U, B>,
    idx: usize,
    x: U,
) -> Option<ArrayVec<U, B>> {
    if !v.is_full() {
        v.insert(idx, x);
        return None;
    }
    let mut upper: ArrayVec<U, B> = v.drain(B / 2..).collect();
    if idx <= B / 2 {
        v.insert(idx, x);
    } else {
        upper.insert(idx - B / 2, x);
    }
    Some(upper)
}

// The child containing position `idx`, and the position within that child.
fn locate(counts: &[usize], mut idx: usize) -> Option<(usize, usize)> {
    for (i, &count) in counts.iter().enumerate() {
        if idx < count {
            return Some((i, idx));
        }
        idx -= count;
    }
    None
}

impl<T, const B: usize> Node<T, B> {
    // The number of chunk elements or children.
    fn width(&self) -> usize {
        match self {
            Node::Chunk(data) => data.len(),
            Node::Branch { children, .. } => children.len(),
        }
    }

    fn count(&self) -> usize {
        match self {
            Node::Chunk(data) => data.len(),
            Node::Branch { counts, .. } => counts.iter().sum(),
        }
    }

    fn get(&self, idx: usize) -> Option<&T> {
        match self {
            Node::Chunk(data) => data.get(idx),
            Node::Branch { counts, children } => {
                let (i, idx) = locate(counts, idx)?;
                children[i].get(idx)
            }
        }
    }

    fn last(&self) -> Option<&T> {
        match self {
            Node::Chunk(data) => data.last(),
            Node::Branch { children, .. } => children.last()?.last(),
        }
    }

    // Returns the new right sibling if this node had to split.
    fn insert(&mut self, mut idx: usize, x: T) -> Option<Node<T, B>> {
        match self {
            Node::Chunk(data) => insert_or_split(data, idx, x).map(Node::Chunk),
            Node::Branch { counts, children } => {
                // Inserting at the end of a child is fine, so this is `<=`
                // where `locate` has `<`.
                let mut i = 0;
                while i + 1 < counts.len() && idx > counts[i] {
                    idx -= counts[i];
                    i += 1;
                }

                let Some(sibling) = children[i].insert(idx, x) else {
                    counts[i] += 1;
                    return None;
                };
                counts[i] = children[i].count();
                let upper_counts = insert_or_split(counts, i + 1, sibling.count());
                let upper_children = insert_or_split(children, i + 1, Box::new(sibling));
                match (upper_counts, upper_children) {
                    (Some(counts), Some(children)) => Some(Node::Branch { counts, children }),
                    _ => None,
                }
            }
        }
    }

    fn remove(&mut self, idx: usize) -> Option<T> {
        let (counts, children) = match self {
            Node::Chunk(data) => return (idx < data.len()).then(|| data.remove(idx)),
            Node::Branch { counts, children } => (counts, children),
        };

        let (i, child_idx) = locate(counts, idx)?;
        let ret = children[i].remove(child_idx)?;
        counts[i] -= 1;

        // Drop empty children, and merge small neighbors so that the tree
        // stays shallow.
        if children[i].width() == 0 {
            children.remove(i);
            counts.remove(i);
        } else if i > 0 && children[i - 1].width() + children[i].width() <= B / 2 {
            Self::merge(counts, children, i - 1);
        } else if i + 1 < children.len() && children[i].width() + children[i + 1].width() <= B / 2
        {
            Self::merge(counts, children, i);
        }
        Some(ret)
    }

    // Moves everything in `children[i + 1]` to the end of `children[i]`.
    fn merge(
        counts: &mut ArrayVec<usize, B>,
        children: &mut ArrayVec<Box<Node<T, B>>, B>,
        i: usize,
    ) {
        let next = children.remove(i + 1);
        let next_count = counts.remove(i + 1);
        counts[i] += next_count;
        match (&mut *children[i], *next) {
            (Node::Chunk(data), Node::Chunk(next)) => data.extend(next),
            (
                Node::Branch { counts, children },
                Node::Branch {
                    counts: next_counts,
                    children: next_children,
                },
            ) => {
                counts.extend(next_counts);
                children.extend(next_children);
            }
            // All chunks are at the same depth, so siblings have the same kind.
            _ => unreachable!("merging nodes of different heights"),
        }
    }

    fn iter(&self) -> Box<dyn DoubleEndedIterator<Item = &T> + '_> {
        match self {
            Node::Chunk(data) => Box::new(data.iter()),
            Node::Branch { children, .. } => Box::new(children.iter().flat_map(|c| c.iter())),
        }
    }

    fn partition_point<P: FnMut(&T) -> bool>(&self, pred: &mut P) -> usize {
        match self {
            Node::Chunk(data) => data.partition_point(|x| pred(x)),
            Node::Branch { counts, children } => {
                // The partition point is in the first child whose last element fails.
                let i = children.partition_point(|c| c.last().is_some_and(|x| pred(x)));
                let before: usize = counts[..i].iter().sum();
                match children.get(i) {
                    Some(child) => before + child.partition_point(pred),
                    None => before,
                }
            }
        }
    }

    // Returns the number of elements and the height.
    fn check(&self, is_root: bool) -> (usize, usize) {
        match self {
            Node::Chunk(data) => {
                assert!(is_root || !data.is_empty(), "empty chunk");
                (data.len(), 0)
            }
            Node::Branch { counts, children } => {
                assert_eq!(counts.len(), children.len());
                assert!(!children.is_empty(), "empty branch");
                assert!(!is_root || children.len() > 1, "root with a single child");
                let mut height = None;
                for (count, child) in counts.iter().zip(children) {
                    let (child_count, child_height) = child.check(false);
                    assert_eq!(*count, child_count);
                    assert_eq!(*height.get_or_insert(child_height), child_height);
                }
                (counts.iter().sum(), height.unwrap_or(0) + 1)
            }
        }
    }
}

impl<T: serde::Serialize, const B: usize> serde::Serialize for ChunkVec<T, B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for x in self.iter() {
            seq.serialize_element(x)?;
        }
        seq.end()
    }
}

impl<T, const B: usize> Default for ChunkVec<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const B: usize> ChunkVec<T, B> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        debug_assert!(B >= 2, "chunks must hold at least 2 elements");
        ChunkVec {
            root: Node::Chunk(ArrayVec::new()),
            len: 0,
        }
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is it empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The element at position `idx`, if there is one.
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.root.get(idx)
    }

    /// Inserts an element at position `idx`, shifting everything after it.
    ///
    /// # Panics
    ///
    /// Panics if `idx > len`.
    pub fn insert(&mut self, idx: usize, element: T) {
        assert!(idx <= self.len, "insertion index {idx} out of bounds");
        if let Some(sibling) = self.root.insert(idx, element) {
            let old_root = std::mem::replace(&mut self.root, Node::Chunk(ArrayVec::new()));
            let mut counts = ArrayVec::new();
            counts.push(old_root.count());
            counts.push(sibling.count());
            let mut children = ArrayVec::new();
            children.push(Box::new(old_root));
            children.push(Box::new(sibling));
            self.root = Node::Branch { counts, children };
        }
        self.len += 1;
    }

    /// Removes and returns the element at position `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= len`.
    pub fn remove(&mut self, idx: usize) -> T {
        let Some(ret) = self.root.remove(idx) else {
            panic!("removal index {idx} out of bounds");
        };
        self.len -= 1;

        // A branch with one child is just a taller version of its child.
        while let Node::Branch { children, .. } = &mut self.root {
            if children.len() != 1 {
                break;
            }
            let Some(child) = children.pop() else {
                break;
            };
            self.root = *child;
        }
        ret
    }

    /// Iterates over all the elements, in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.root.iter()
    }

    /// Returns the index of the first element for which `pred` is false,
    /// assuming that `pred` is true for some prefix of the sequence and
    /// false afterwards.
    pub fn partition_point<P: FnMut(&T) -> bool>(&self, mut pred: P) -> usize {
        self.root.partition_point(&mut pred)
    }

    /// Checks our internal invariants, panicking if any are violated.
    pub fn check_invariants(&self) {
        let (count, _) = self.root.check(true);
        assert_eq!(self.len, count);
    }

    #[cfg(test)]
    fn height(&self) -> usize {
        self.root.check(true).1
    }
}

impl<T, const B: usize> FromIterator<T> for ChunkVec<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ret = ChunkVec::new();
        for x in iter {
            ret.insert(ret.len(), x);
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn insert_and_remove() {
        let mut v: ChunkVec<u32, 4> = ChunkVec::new();
        assert!(v.is_empty());
        for i in 0..10 {
            v.insert(v.len(), i);
        }
        v.check_invariants();
        assert_eq!(
            v.iter().copied().collect::<Vec<_>>(),
            (0..10u32).collect::<Vec<_>>()
        );

        v.insert(0, 100);
        v.insert(5, 200);
        assert_eq!(v.get(0), Some(&100));
        assert_eq!(v.get(5), Some(&200));
        assert_eq!(v.get(12), None);
        assert_eq!(v.len(), 12);

        assert_eq!(v.remove(5), 200);
        assert_eq!(v.remove(0), 100);
        while !v.is_empty() {
            v.remove(v.len() / 2);
            v.check_invariants();
        }
        assert_eq!(v.iter().count(), 0);
        assert_eq!(v.height(), 0);
    }

    #[test]
    fn grows_and_shrinks() {
        let mut v: ChunkVec<u32, 4> = (0..1000).collect();
        v.check_invariants();
        // With chunks of 4, a thousand elements need several levels of branches.
        assert!(v.height() >= 4);
        assert_eq!(v.get(777), Some(&777));
        assert_eq!(v.iter().rev().next(), Some(&999));

        for i in (0..1000).rev().step_by(3) {
            v.remove(i);
        }
        v.check_invariants();
        assert_eq!(v.len(), 666);
        while v.len() > 1 {
            v.remove(0);
        }
        v.check_invariants();
        assert_eq!(v.height(), 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn remove_out_of_bounds() {
        let mut v: ChunkVec<u32, 4> = (0..20).collect();
        v.remove(20);
    }

    #[test]
    fn partition() {
        let v: ChunkVec<u32, 4> = (0..20).map(|x| 2 * x).collect();
        assert_eq!(v.partition_point(|_| false), 0);
        assert_eq!(v.partition_point(|&x| x < 7), 4);
        assert_eq!(v.partition_point(|&x| x <= 8), 5);
        assert_eq!(v.partition_point(|&x| x < 100), 20);

        let empty: ChunkVec<u32, 4> = ChunkVec::new();
        assert_eq!(empty.partition_point(|_| true), 0);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(usize, u8),
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (any::<usize>(), any::<u8>()).prop_map(|(i, x)| Op::Insert(i, x)),
            any::<usize>().prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn matches_vec(ops in proptest::collection::vec(op(), 0..400)) {
            let mut v: ChunkVec<u8, 4> = ChunkVec::new();
            let mut reference = Vec::new();
            for op in ops {
                match op {
                    Op::Insert(i, x) => {
                        let i = i % (reference.len() + 1);
                        v.insert(i, x);
                        reference.insert(i, x);
                    }
                    Op::Remove(i) => {
                        if !reference.is_empty() {
                            let i = i % reference.len();
                            prop_assert_eq!(v.remove(i), reference.remove(i));
                        }
                    }
                }
                v.check_invariants();
                prop_assert_eq!(v.len(), reference.len());
                for (i, x) in reference.iter().enumerate() {
                    prop_assert_eq!(v.get(i), Some(x));
                }
                prop_assert_eq!(v.get(reference.len()), None);
            }
            prop_assert_eq!(v.iter().copied().collect::<Vec<_>>(), reference.clone());
            prop_assert_eq!(
                v.iter().rev().copied().collect::<Vec<_>>(),
                reference.iter().rev().copied().collect::<Vec<_>>()
            );
        }

        #[test]
        fn partition_matches_vec(
            mut xs in proptest::collection::vec(0..50u32, 0..300),
            pivot in 0..50u32,
        ) {
            xs.sort();
            let v: ChunkVec<u32, 4> = xs.iter().copied().collect();
            prop_assert_eq!(
                v.partition_point(|&x| x < pivot),
                xs.partition_point(|&x| x < pivot)
            );
        }
    }
}
