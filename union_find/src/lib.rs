//! This crate defines a structure [`UnionFind`] tracking a partition of the dense universe `0..n`
//! under merges.

#[doc(inline)]
pub use union_find::UnionFind;

pub mod union_find;
