//! An unbalanced BST. Every node exclusively owns its two children through a
//! `Box`, so there is no sharing, no parent pointer and no `unsafe`. The tree
//! never rotates: its shape is decided entirely by insertion order, which is
//! what makes it a useful baseline next to the balanced and hashed containers
//! of the standard library.
//!
//! # Examples
//!
//! ```
//! use strbst::tree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.search("apple"));
//!
//! tree.insert("banana".to_string());
//! tree.insert("apple".to_string());
//! tree.insert("cherry".to_string());
//! assert!(tree.search("apple"));
//!
//! // Inserting an existing key does nothing.
//! assert!(!tree.insert("apple".to_string()));
//! assert_eq!(tree.len(), 3);
//!
//! // Deleting reports whether the key was there.
//! assert!(tree.delete("apple"));
//! assert!(!tree.delete("apple"));
//!
//! let keys: Vec<_> = tree.iter().map(String::as_str).collect();
//! assert_eq!(keys, ["banana", "cherry"]);
//!
//! // Tear the tree down, learning how many nodes were freed.
//! assert_eq!(tree.dispose(), 2);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

/// An owning child slot: either empty or the only owner of one `Node`.
type Link<K> = Option<Box<Node<K>>>;

/// A Binary Search Tree over keys of type `K`. This can be used for
/// inserting, searching and deleting keys. Keys are unique; the tree never
/// rebalances.
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of keys stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts `key` into the tree and returns `true`. If the key is already
    /// present the tree is left untouched and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use strbst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        let slot = descend(&mut self.root, |node| key.cmp(&node.key));
        if slot.is_some() {
            return false;
        }

        *slot = Some(Node::new_boxed(key));
        self.len += 1;
        true
    }

    /// Returns whether a node with the given key is in the tree. At most
    /// `height` keys are compared.
    ///
    /// # Examples
    ///
    /// ```
    /// use strbst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert("kiwi".to_string());
    ///
    /// assert!(tree.search("kiwi"));
    /// assert!(!tree.search("lime"));
    /// ```
    pub fn search<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = &self.root;
        while let Some(node) = link {
            link = match key.cmp(node.key.borrow()) {
                Ordering::Less => &node.left,
                Ordering::Equal => return true,
                Ordering::Greater => &node.right,
            };
        }

        false
    }

    /// Deletes the node containing the given key and returns `true`. If the
    /// tree does not contain the key, nothing happens and `false` is
    /// returned.
    ///
    /// A node with at most one child is replaced in its parent's slot by that
    /// child. A node with two children stays where it is and takes over the
    /// key of its in-order successor, which is then unlinked from the right
    /// subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use strbst::tree::Tree;
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert!(tree.delete(&2));
    /// assert!(!tree.search(&2));
    /// assert!(tree.search(&1) && tree.search(&3));
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let slot = descend(&mut self.root, |node| key.cmp(node.key.borrow()));
        let Some(node) = slot.as_mut() else {
            return false;
        };

        if node.left.is_none() {
            *slot = node.right.take();
        } else if node.right.is_none() {
            *slot = node.left.take();
        } else {
            // The successor is the leftmost node of the right subtree. It has
            // no left child, so unlinking it only promotes its right child.
            let successor = descend(&mut node.right, |n| match n.left {
                Some(_) => Ordering::Less,
                None => Ordering::Equal,
            });
            if let Some(successor_node) = successor.take() {
                let Node {
                    key: successor_key,
                    right,
                    ..
                } = *successor_node;
                *successor = right;
                node.key = successor_key;
            }
        }

        self.len -= 1;
        true
    }

    /// Destroys every node, children before their parent, and returns how
    /// many nodes were freed.
    ///
    /// # Examples
    ///
    /// ```
    /// use strbst::tree::Tree;
    ///
    /// let tree: Tree<_> = (0..10).collect();
    /// assert_eq!(tree.dispose(), 10);
    ///
    /// assert_eq!(Tree::<u8>::new().dispose(), 0);
    /// ```
    pub fn dispose(mut self) -> usize {
        self.clear()
    }

    /// Removes every key, leaving an empty tree behind. Returns how many
    /// nodes were freed.
    ///
    /// The teardown keeps its own stack instead of recursing so a degenerate
    /// tree (e.g. built from sorted input) cannot overflow the call stack.
    pub fn clear(&mut self) -> usize {
        let mut freed = 0;
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();

        while let Some(top) = stack.last_mut() {
            if let Some(left) = top.left.take() {
                stack.push(left);
            } else if let Some(right) = top.right.take() {
                stack.push(right);
            } else {
                // Both children are gone, so nothing can reach this node anymore.
                stack.pop();
                freed += 1;
            }
        }

        self.len = 0;
        freed
    }

    /// The smallest key in the tree.
    pub fn first(&self) -> Option<&K> {
        self.root.as_deref().map(|root| &root.min().key)
    }

    /// The number of nodes on the longest path from the root to a leaf. An
    /// empty tree has a height of 0.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<K>, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }

        height
    }

    /// Visits the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root.as_deref(), self.len)
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walks down from `link`, letting `step` pick a direction at every node,
/// until `step` answers `Equal` or an empty slot is reached. That slot is
/// returned so the caller can fill it, empty it, or splice into it.
fn descend<'a, K, F>(mut link: &'a mut Link<K>, mut step: F) -> &'a mut Link<K>
where
    F: FnMut(&Node<K>) -> Ordering,
{
    loop {
        let ord = match link.as_deref() {
            Some(node) => step(node),
            None => return link,
        };

        link = match (ord, link) {
            (Ordering::Equal, link) => return link,
            (Ordering::Less, Some(node)) => &mut node.left,
            (Ordering::Greater, Some(node)) => &mut node.right,
            (_, None) => unreachable!("`step` only sees occupied slots"),
        };
    }
}

/// One key in the tree together with the subtrees it owns.
struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn new_boxed(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
        })
    }

    /// The leftmost node of this subtree, i.e. the one with the smallest key.
    fn min(&self) -> &Self {
        let mut node = self;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        node
    }
}

/// In-order iterator over the keys of a [`Tree`], created by [`Tree::iter`].
pub struct Iter<'a, K> {
    /// Nodes whose key hasn't been yielded yet but whose left subtree has
    /// been pushed (or is empty).
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    fn new(root: Option<&'a Node<K>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
