use rotreap::{TreapError, TreapMap};

#[test]
fn insert_get_and_replace() {
  let mut map = TreapMap::seeded(11);
  assert_eq!(map.insert(2, "two"), None);
  assert_eq!(map.insert(1, "one"), None);
  assert_eq!(map.insert(3, "three"), None);
  assert_eq!(map.get(&2), Some(&"two"));
  assert!(map.contains_key(&3));
  assert!(!map.contains_key(&4));

  let before: Vec<_> = map.traverse().iter().map(|v| (v.item.k, v.priority)).collect();
  assert_eq!(map.insert(2, "deux"), Some("two"));
  let after: Vec<_> = map.traverse().iter().map(|v| (v.item.k, v.priority)).collect();
  assert_eq!(before, after);
  assert_eq!(map.get(&2), Some(&"deux"));
  assert_eq!(map.len(), 3);
}

#[test]
fn get_mut_updates_in_place() {
  let mut map: TreapMap<&str, u32> = TreapMap::seeded(5);
  map.extend(vec![("a", 1), ("b", 2)]);
  if let Some(v) = map.get_mut(&"b") {
    *v += 40;
  }
  assert_eq!(map.get(&"b"), Some(&42));
  assert_eq!(map.get_mut(&"z"), None);
}

#[test]
fn remove_returns_value() {
  let mut map = TreapMap::seeded(9);
  for k in 0..32u32 {
    map.insert(k, k * k);
  }
  assert_eq!(map.remove(&5), Ok(25));
  assert_eq!(map.remove(&5), Err(TreapError::NotFound));
  assert_eq!(map.get(&5), None);
  assert_eq!(map.len(), 31);
  assert_eq!(map.validate(), Ok(()));
  let entries: Vec<(u32, u32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
  assert_eq!(entries.len(), 31);
  assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
  assert!(entries.iter().all(|&(k, v)| v == k * k));
}

#[test]
fn debug_lists_entries_in_order() {
  let mut map = TreapMap::seeded(2);
  map.insert(2, 'b');
  map.insert(1, 'a');
  assert_eq!(format!("{:?}", map), "{1: 'a', 2: 'b'}");
  map.clear();
  assert!(map.is_empty());
}
