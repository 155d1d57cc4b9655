use crate::error::{TreapError};

use log::{debug, trace};
use rand::prelude::{Rng};
use rand::distributions::{Distribution, Standard};

use std::cmp::{Ordering};

pub(crate) type NodeIx = usize;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Side {
  Left,
  Right,
}

#[derive(Clone)]
struct TreapNode<Item, P> {
  priority: P,
  item:     Item,
  parent:   Option<NodeIx>,
  left:     Option<NodeIx>,
  right:    Option<NodeIx>,
}

impl<Item, P> TreapNode<Item, P> {
  fn leaf(priority: P, item: Item, parent: Option<NodeIx>) -> TreapNode<Item, P> {
    TreapNode{
      priority,
      item,
      parent,
      left:     None,
      right:    None,
    }
  }

  fn child(&self, side: Side) -> Option<NodeIx> {
    match side {
      Side::Left => self.left,
      Side::Right => self.right,
    }
  }

  fn child_mut(&mut self, side: Side) -> &mut Option<NodeIx> {
    match side {
      Side::Left => &mut self.left,
      Side::Right => &mut self.right,
    }
  }
}

// Where a descent stopped: on the matching node, or at the empty child slot
// a new node for the key would fill (`None` for an empty tree).
enum Descent {
  Found(NodeIx),
  Vacant(Option<(NodeIx, Side)>),
}

pub(crate) enum Insertion<Item> {
  Fresh,
  Occupied(NodeIx, Item),
}

/// One node as seen by `traverse`: its item and priority, and the items of
/// its children if it has any.
#[derive(Debug)]
pub struct Visit<'a, Item, P> {
  pub item:     &'a Item,
  pub priority: P,
  pub left:     Option<&'a Item>,
  pub right:    Option<&'a Item>,
}

/// Arena-backed treap. Nodes are addressed by their index in `nodes`; the
/// arena is kept dense, so removing a node moves the last node into its slot.
#[derive(Clone)]
pub(crate) struct Treap<Item, P, R> {
  nodes:    Vec<TreapNode<Item, P>>,
  root:     Option<NodeIx>,
  rng:      R,
}

impl<Item, P, R> Treap<Item, P, R> {
  pub(crate) fn with_rng(rng: R) -> Treap<Item, P, R> {
    Treap{
      nodes:    Vec::new(),
      root:     None,
      rng,
    }
  }

  pub(crate) fn len(&self) -> usize {
    self.nodes.len()
  }

  pub(crate) fn clear(&mut self) {
    self.nodes.clear();
    self.root = None;
  }

  pub(crate) fn item(&self, ix: NodeIx) -> &Item {
    &self.nodes[ix].item
  }

  pub(crate) fn item_mut(&mut self, ix: NodeIx) -> &mut Item {
    &mut self.nodes[ix].item
  }

  pub(crate) fn iter(&self) -> Iter<Item, P> {
    Iter::new(&self.nodes, self.root)
  }

  /// Number of nodes on the longest root-to-leaf path.
  pub(crate) fn depth(&self) -> usize {
    let mut max_depth = 0;
    let mut stack = Vec::new();
    if let Some(root) = self.root {
      stack.push((root, 1));
    }
    while let Some((ix, d)) = stack.pop() {
      if d > max_depth {
        max_depth = d;
      }
      let node = &self.nodes[ix];
      if let Some(l) = node.left {
        stack.push((l, d + 1));
      }
      if let Some(r) = node.right {
        stack.push((r, d + 1));
      }
    }
    max_depth
  }

  pub(crate) fn traverse(&self) -> Vec<Visit<Item, P>> where P: Copy {
    let mut visits = Vec::with_capacity(self.nodes.len());
    let mut stack: Vec<NodeIx> = self.root.into_iter().collect();
    while let Some(ix) = stack.pop() {
      let node = &self.nodes[ix];
      visits.push(Visit{
        item:     &node.item,
        priority: node.priority,
        left:     node.left.map(|l| &self.nodes[l].item),
        right:    node.right.map(|r| &self.nodes[r].item),
      });
      if let Some(r) = node.right {
        stack.push(r);
      }
      if let Some(l) = node.left {
        stack.push(l);
      }
    }
    visits
  }

  fn _parent_side(&self, ix: NodeIx) -> Option<(NodeIx, Side)> {
    let p = self.nodes[ix].parent?;
    let parent = &self.nodes[p];
    if parent.left == Some(ix) {
      Some((p, Side::Left))
    } else if parent.right == Some(ix) {
      Some((p, Side::Right))
    } else {
      panic!("node {} is not a child of its parent {}", ix, p);
    }
  }

  // Points the given child slot (or the root, for `None`) at `new_child`.
  fn _replace_child(&mut self, slot: Option<(NodeIx, Side)>, new_child: Option<NodeIx>) {
    match slot {
      None => self.root = new_child,
      Some((p, side)) => *self.nodes[p].child_mut(side) = new_child,
    }
  }

  fn _rotate_up(&mut self, ix: NodeIx) {
    match self._parent_side(ix) {
      None => panic!("cannot rotate the root node {}", ix),
      Some((p, Side::Left)) => self._rotate_right(ix, p),
      Some((p, Side::Right)) => self._rotate_left(ix, p),
    }
  }

  // `ix` is the left child of `p`; `ix` takes the place of `p`.
  fn _rotate_right(&mut self, ix: NodeIx, p: NodeIx) {
    let up = self._parent_side(p);
    let inner = self.nodes[ix].right;
    self.nodes[p].left = inner;
    if let Some(b) = inner {
      self.nodes[b].parent = Some(p);
    }
    self.nodes[ix].right = Some(p);
    self.nodes[p].parent = Some(ix);
    self.nodes[ix].parent = up.map(|(g, _)| g);
    self._replace_child(up, Some(ix));
    trace!("rotate right: node {} over {}", ix, p);
  }

  // `ix` is the right child of `p`; `ix` takes the place of `p`.
  fn _rotate_left(&mut self, ix: NodeIx, p: NodeIx) {
    let up = self._parent_side(p);
    let inner = self.nodes[ix].left;
    self.nodes[p].right = inner;
    if let Some(b) = inner {
      self.nodes[b].parent = Some(p);
    }
    self.nodes[ix].left = Some(p);
    self.nodes[p].parent = Some(ix);
    self.nodes[ix].parent = up.map(|(g, _)| g);
    self._replace_child(up, Some(ix));
    trace!("rotate left: node {} over {}", ix, p);
  }

  // Frees the slot of a node that is already unlinked from the tree. The
  // last node in the arena moves into the freed slot.
  fn _release(&mut self, ix: NodeIx) -> (P, Item) {
    let last = self.nodes.len() - 1;
    if ix != last {
      let (parent, left, right) = {
        let moved = &self.nodes[last];
        (moved.parent, moved.left, moved.right)
      };
      match parent {
        None => self.root = Some(ix),
        Some(p) => {
          let parent_node = &mut self.nodes[p];
          if parent_node.left == Some(last) {
            parent_node.left = Some(ix);
          } else {
            parent_node.right = Some(ix);
          }
        }
      }
      for c in left.into_iter().chain(right) {
        self.nodes[c].parent = Some(ix);
      }
    }
    let node = self.nodes.swap_remove(ix);
    (node.priority, node.item)
  }
}

impl<Item, P, R> Treap<Item, P, R> {
  fn _descend<K: ?Sized>(&self, key: &K) -> Descent where Item: PartialOrd<K> {
    let mut cur = match self.root {
      None => return Descent::Vacant(None),
      Some(root) => root,
    };
    loop {
      let node = &self.nodes[cur];
      let side = match node.item.partial_cmp(key) {
        None => panic!("keys must be totally ordered"),
        Some(Ordering::Equal) => return Descent::Found(cur),
        Some(Ordering::Greater) => Side::Left,
        Some(Ordering::Less) => Side::Right,
      };
      match node.child(side) {
        None => return Descent::Vacant(Some((cur, side))),
        Some(next) => cur = next,
      }
    }
  }

  pub(crate) fn find<K: ?Sized>(&self, key: &K) -> Option<NodeIx> where Item: PartialOrd<K> {
    match self._descend(key) {
      Descent::Found(ix) => Some(ix),
      Descent::Vacant(_) => None,
    }
  }
}

impl<Item, P, R> Treap<Item, P, R>
where Item: Ord,
      P: Copy + Ord,
{
  fn _insert_with<F>(&mut self, item: Item, draw: F) -> Insertion<Item>
  where F: FnOnce(&mut R) -> P,
  {
    match self._descend(&item) {
      Descent::Found(ix) => {
        debug!("insert: key already held by node {}", ix);
        Insertion::Occupied(ix, item)
      }
      Descent::Vacant(slot) => {
        let priority = draw(&mut self.rng);
        self._attach(slot, priority, item);
        Insertion::Fresh
      }
    }
  }

  #[cfg(test)]
  pub(crate) fn insert_with_priority(&mut self, priority: P, item: Item) -> Insertion<Item> {
    self._insert_with(item, |_| priority)
  }

  fn _attach(&mut self, slot: Option<(NodeIx, Side)>, priority: P, item: Item) {
    let ix = self.nodes.len();
    self.nodes.push(TreapNode::leaf(priority, item, slot.map(|(p, _)| p)));
    self._replace_child(slot, Some(ix));
    trace!("insert: node {} placed at {:?}", ix, slot);
    self._heapify_up(ix);
  }

  fn _heapify_up(&mut self, ix: NodeIx) {
    while let Some(p) = self.nodes[ix].parent {
      if self.nodes[ix].priority <= self.nodes[p].priority {
        break;
      }
      self._rotate_up(ix);
    }
  }
}

impl<Item, P, R> Treap<Item, P, R>
where Item: Ord,
      P: Copy + Ord,
      R: Rng,
      Standard: Distribution<P>,
{
  pub(crate) fn insert(&mut self, item: Item) -> Insertion<Item> {
    self._insert_with(item, |rng| rng.sample(&Standard))
  }
}

impl<Item, P, R> Treap<Item, P, R> where P: Ord {
  pub(crate) fn remove<K: ?Sized>(&mut self, key: &K) -> Option<(P, Item)> where Item: PartialOrd<K> {
    let ix = match self._descend(key) {
      Descent::Found(ix) => ix,
      Descent::Vacant(_) => {
        debug!("remove: key not found");
        return None;
      }
    };
    self._sift_to_leaf(ix);
    let up = self._parent_side(ix);
    self._replace_child(up, None);
    trace!("remove: node {} unlinked", ix);
    Some(self._release(ix))
  }

  // Rotates `ix` down, always promoting the child with the larger priority,
  // until `ix` has no children. Equal priorities promote the right child.
  fn _sift_to_leaf(&mut self, ix: NodeIx) {
    loop {
      let node = &self.nodes[ix];
      let promoted = match (node.left, node.right) {
        (None, None) => break,
        (Some(l), None) => l,
        (None, Some(r)) => r,
        (Some(l), Some(r)) => {
          if self.nodes[l].priority > self.nodes[r].priority {
            l
          } else {
            r
          }
        }
      };
      self._rotate_up(promoted);
    }
  }
}

impl<Item, P, R> Treap<Item, P, R> where Item: Ord, P: Ord {
  pub(crate) fn validate(&self) -> Result<(), TreapError> {
    if let Some(root) = self.root {
      if self.nodes[root].parent.is_some() {
        return Err(TreapError::BrokenParentLink(root));
      }
    }
    let mut iter = self.iter();
    let mut prev: Option<NodeIx> = None;
    let mut reachable = 0;
    while let Some(ix) = iter._next_ix() {
      reachable += 1;
      let node = &self.nodes[ix];
      if let Some(prev) = prev {
        if self.nodes[prev].item >= node.item {
          return Err(TreapError::OrderViolation(ix));
        }
      }
      for c in node.left.into_iter().chain(node.right) {
        let child = &self.nodes[c];
        if child.parent != Some(ix) {
          return Err(TreapError::BrokenParentLink(c));
        }
        if child.priority > node.priority {
          return Err(TreapError::HeapViolation(c));
        }
      }
      prev = Some(ix);
    }
    if reachable != self.nodes.len() {
      return Err(TreapError::Unreachable{reachable, len: self.nodes.len()});
    }
    Ok(())
  }
}

/// In-order (ascending) iterator over the items of a treap.
pub struct Iter<'a, Item, P> {
  nodes:    &'a [TreapNode<Item, P>],
  stack:    Vec<NodeIx>,
  cur:      Option<NodeIx>,
}

impl<'a, Item, P> Iter<'a, Item, P> {
  fn new(nodes: &'a [TreapNode<Item, P>], root: Option<NodeIx>) -> Iter<'a, Item, P> {
    Iter{
      nodes,
      stack:    Vec::new(),
      cur:      root,
    }
  }

  fn _next_ix(&mut self) -> Option<NodeIx> {
    while let Some(ix) = self.cur {
      self.stack.push(ix);
      self.cur = self.nodes[ix].left;
    }
    let ix = self.stack.pop()?;
    self.cur = self.nodes[ix].right;
    Some(ix)
  }
}

impl<'a, Item, P> Iterator for Iter<'a, Item, P> {
  type Item = &'a Item;

  fn next(&mut self) -> Option<&'a Item> {
    let nodes = self.nodes;
    self._next_ix().map(|ix| &nodes[ix].item)
  }
}
