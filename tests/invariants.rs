use rotreap::TreapSet;

use proptest::prelude::*;

use std::collections::{BTreeSet};

#[derive(Clone, Debug)]
enum Op {
  Insert(u16),
  Remove(u16),
}

fn op() -> impl Strategy<Value=Op> {
  prop_oneof![
    (0u16..128).prop_map(Op::Insert),
    (0u16..128).prop_map(Op::Remove),
  ]
}

proptest! {
  #[test]
  fn mutations_keep_invariants(seed in any::<u64>(), ops in prop::collection::vec(op(), 0..300)) {
    let mut set = TreapSet::seeded(seed);
    let mut model = BTreeSet::new();
    for op in ops {
      match op {
        Op::Insert(k) => {
          prop_assert_eq!(set.insert(k), model.insert(k));
        }
        Op::Remove(k) => {
          prop_assert_eq!(set.remove(&k).is_ok(), model.remove(&k));
        }
      }
      prop_assert_eq!(set.validate(), Ok(()));
      prop_assert_eq!(set.len(), model.len());
    }
    let keys: Vec<u16> = set.iter().cloned().collect();
    let expected: Vec<u16> = model.iter().cloned().collect();
    prop_assert_eq!(keys, expected);
    for k in 0u16..128 {
      prop_assert_eq!(set.contains(&k), model.contains(&k));
    }
  }
}
