//! This crate benchmarks a hand-written, unbalanced Binary Search Tree (BST)
//! of strings against the associative containers of the standard library.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! sometimes has child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)` (where `height` is the longest path from the
//! root `Node` to a leaf `Node`). The [`tree::Tree`] in this crate never
//! rebalances, so its height depends on insertion order alone: random keys
//! give a height of roughly `O(lg N)`, sorted keys give a height of `N`. That
//! is the point of comparing it with `BTreeSet`, `BTreeMap` and `HashSet`.
//!
//! ## Benchmark
//!
//! The [`workload`] module drives a container through the phases
//! insert-all, shuffle, search-all, shuffle, delete-all, timing each bulk
//! phase. The keys come from a newline-delimited data file, see [`keys`].

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod config;
pub mod error;
pub mod keys;
pub mod tree;
pub mod workload;

pub use error::{Error, Result};
