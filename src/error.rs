use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TreapError {
  #[error("key not found")]
  NotFound,
  #[error("keys out of order at node {0}")]
  OrderViolation(usize),
  #[error("node {0} outranks its parent")]
  HeapViolation(usize),
  #[error("node {0} disagrees with its parent link")]
  BrokenParentLink(usize),
  #[error("{reachable} of {len} nodes reachable from the root")]
  Unreachable{reachable: usize, len: usize},
}
