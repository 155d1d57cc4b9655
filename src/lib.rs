extern crate rand;

pub use crate::error::{TreapError};
pub use crate::tree::{Iter, Visit};

use crate::tree::{Insertion, Treap};

use rand::prelude::{Rng, thread_rng};
use rand::distributions::{Distribution, Standard};
use rand::SeedableRng;
use rand::rngs::{StdRng};

use std::cmp::{Ordering};
use std::fmt;
use std::iter::{FromIterator};
use std::mem::{replace};

mod error;
mod tree;

/// A map entry, ordered by its key alone.
#[derive(Clone, Debug)]
pub struct KV<K, V> {
  pub k: K,
  pub v: V,
}

impl<K, V> PartialEq<K> for KV<K, V> where K: PartialEq {
  fn eq(&self, other_k: &K) -> bool {
    self.k.eq(other_k)
  }
}

impl<K, V> PartialEq for KV<K, V> where K: PartialEq {
  fn eq(&self, other: &KV<K, V>) -> bool {
    self.k.eq(&other.k)
  }
}

impl<K, V> Eq for KV<K, V> where K: Eq {
}

impl<K, V> PartialOrd<K> for KV<K, V> where K: PartialOrd {
  fn partial_cmp(&self, other_k: &K) -> Option<Ordering> {
    self.k.partial_cmp(other_k)
  }
}

impl<K, V> PartialOrd for KV<K, V> where K: PartialOrd {
  fn partial_cmp(&self, other: &KV<K, V>) -> Option<Ordering> {
    self.k.partial_cmp(&other.k)
  }
}

impl<K, V> Ord for KV<K, V> where K: Ord {
  fn cmp(&self, other: &KV<K, V>) -> Ordering {
    self.k.cmp(&other.k)
  }
}

/// An ordered set kept as a treap. Each set owns the random source that
/// draws node priorities.
#[derive(Clone)]
pub struct TreapSet<K, P=usize, R=StdRng> {
  tree: Treap<K, P, R>,
}

impl<K> Default for TreapSet<K> {
  fn default() -> TreapSet<K> {
    TreapSet::new()
  }
}

impl<K> TreapSet<K> {
  pub fn new() -> TreapSet<K> {
    TreapSet::seeded(thread_rng().gen())
  }

  /// A set whose priorities, and therefore whose shape, are reproducible.
  pub fn seeded(seed: u64) -> TreapSet<K> {
    TreapSet::with_rng(StdRng::seed_from_u64(seed))
  }
}

impl<K, P, R> TreapSet<K, P, R> {
  pub fn with_rng(rng: R) -> TreapSet<K, P, R> {
    TreapSet{tree: Treap::with_rng(rng)}
  }

  pub fn len(&self) -> usize {
    self.tree.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tree.len() == 0
  }

  pub fn clear(&mut self) {
    self.tree.clear();
  }

  /// Keys in ascending order.
  pub fn iter(&self) -> Iter<K, P> {
    self.tree.iter()
  }

  pub fn depth(&self) -> usize {
    self.tree.depth()
  }

  /// Every node in pre-order, with its priority and its children's keys.
  /// Meant for debugging and tests.
  pub fn traverse(&self) -> Vec<Visit<K, P>> where P: Copy {
    self.tree.traverse()
  }
}

impl<K, P, R> TreapSet<K, P, R> where K: Ord {
  pub fn contains(&self, key: &K) -> bool {
    self.tree.find(key).is_some()
  }
}

impl<K, P, R> TreapSet<K, P, R> where K: Ord, P: Ord {
  /// Removes `key`, returning it, or `TreapError::NotFound` with the set
  /// left untouched.
  pub fn remove(&mut self, key: &K) -> Result<K, TreapError> {
    match self.tree.remove(key) {
      None => Err(TreapError::NotFound),
      Some((_, k)) => Ok(k),
    }
  }

  pub fn validate(&self) -> Result<(), TreapError> {
    self.tree.validate()
  }
}

impl<K, P, R> TreapSet<K, P, R>
where K: Ord,
      P: Copy + Ord,
      R: Rng,
      Standard: Distribution<P>,
{
  /// Adds `key`, returning whether it was absent. Inserting a key that is
  /// already present changes nothing.
  pub fn insert(&mut self, key: K) -> bool {
    match self.tree.insert(key) {
      Insertion::Fresh => true,
      Insertion::Occupied(..) => false,
    }
  }
}

impl<K, P, R> Extend<K> for TreapSet<K, P, R>
where K: Ord,
      P: Copy + Ord,
      R: Rng,
      Standard: Distribution<P>,
{
  fn extend<I: IntoIterator<Item=K>>(&mut self, keys: I) {
    for key in keys {
      self.insert(key);
    }
  }
}

impl<K> FromIterator<K> for TreapSet<K> where K: Ord {
  fn from_iter<I: IntoIterator<Item=K>>(keys: I) -> TreapSet<K> {
    let mut set = TreapSet::new();
    set.extend(keys);
    set
  }
}

impl<'a, K, P, R> IntoIterator for &'a TreapSet<K, P, R> {
  type Item = &'a K;
  type IntoIter = Iter<'a, K, P>;

  fn into_iter(self) -> Iter<'a, K, P> {
    self.iter()
  }
}

impl<K, P, R> fmt::Debug for TreapSet<K, P, R> where K: fmt::Debug {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}

/// An ordered map kept as a treap over `KV` entries.
#[derive(Clone)]
pub struct TreapMap<K, V, P=usize, R=StdRng> {
  tree: Treap<KV<K, V>, P, R>,
}

impl<K, V> Default for TreapMap<K, V> {
  fn default() -> TreapMap<K, V> {
    TreapMap::new()
  }
}

impl<K, V> TreapMap<K, V> {
  pub fn new() -> TreapMap<K, V> {
    TreapMap::seeded(thread_rng().gen())
  }

  pub fn seeded(seed: u64) -> TreapMap<K, V> {
    TreapMap::with_rng(StdRng::seed_from_u64(seed))
  }
}

impl<K, V, P, R> TreapMap<K, V, P, R> {
  pub fn with_rng(rng: R) -> TreapMap<K, V, P, R> {
    TreapMap{tree: Treap::with_rng(rng)}
  }

  pub fn len(&self) -> usize {
    self.tree.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tree.len() == 0
  }

  pub fn clear(&mut self) {
    self.tree.clear();
  }

  pub fn iter(&self) -> MapIter<K, V, P> {
    MapIter{inner: self.tree.iter()}
  }

  pub fn depth(&self) -> usize {
    self.tree.depth()
  }

  pub fn traverse(&self) -> Vec<Visit<KV<K, V>, P>> where P: Copy {
    self.tree.traverse()
  }
}

impl<K, V, P, R> TreapMap<K, V, P, R> where K: Ord {
  pub fn contains_key(&self, key: &K) -> bool {
    self.tree.find(key).is_some()
  }

  pub fn get(&self, key: &K) -> Option<&V> {
    let ix = self.tree.find(key)?;
    Some(&self.tree.item(ix).v)
  }

  pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
    let ix = self.tree.find(key)?;
    Some(&mut self.tree.item_mut(ix).v)
  }
}

impl<K, V, P, R> TreapMap<K, V, P, R> where K: Ord, P: Ord {
  pub fn remove(&mut self, key: &K) -> Result<V, TreapError> {
    match self.tree.remove(key) {
      None => Err(TreapError::NotFound),
      Some((_, kv)) => Ok(kv.v),
    }
  }

  pub fn validate(&self) -> Result<(), TreapError> {
    self.tree.validate()
  }
}

impl<K, V, P, R> TreapMap<K, V, P, R>
where K: Ord,
      P: Copy + Ord,
      R: Rng,
      Standard: Distribution<P>,
{
  /// Inserts `val` under `key`. If the key is already present its value is
  /// swapped in place and the old value returned; the node keeps its
  /// priority and position.
  pub fn insert(&mut self, key: K, val: V) -> Option<V> {
    match self.tree.insert(KV{k: key, v: val}) {
      Insertion::Fresh => None,
      Insertion::Occupied(ix, kv) => {
        Some(replace(&mut self.tree.item_mut(ix).v, kv.v))
      }
    }
  }
}

impl<K, V, P, R> Extend<(K, V)> for TreapMap<K, V, P, R>
where K: Ord,
      P: Copy + Ord,
      R: Rng,
      Standard: Distribution<P>,
{
  fn extend<I: IntoIterator<Item=(K, V)>>(&mut self, entries: I) {
    for (k, v) in entries {
      self.insert(k, v);
    }
  }
}

impl<K, V, P, R> fmt::Debug for TreapMap<K, V, P, R> where K: fmt::Debug, V: fmt::Debug {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_map().entries(self.iter()).finish()
  }
}

/// In-order iterator over the entries of a `TreapMap`.
pub struct MapIter<'a, K, V, P> {
  inner: Iter<'a, KV<K, V>, P>,
}

impl<'a, K, V, P> Iterator for MapIter<'a, K, V, P> {
  type Item = (&'a K, &'a V);

  fn next(&mut self) -> Option<(&'a K, &'a V)> {
    self.inner.next().map(|kv| (&kv.k, &kv.v))
  }
}
