use rotreap::TreapSet;

use rand::SeedableRng;
use rand::rngs::{StdRng};
use rand::seq::{SliceRandom};

const N: u32 = 1024;
const TRIALS: u64 = 40;

fn depths(shuffle: bool) -> Vec<usize> {
  let mut order_rng = StdRng::seed_from_u64(0xdead_beef);
  let mut depths: Vec<usize> = (0..TRIALS).map(|trial| {
    let mut keys: Vec<u32> = (0..N).collect();
    if shuffle {
      keys.shuffle(&mut order_rng);
    }
    let mut set = TreapSet::seeded(trial);
    set.extend(keys);
    assert_eq!(set.len(), N as usize);
    set.depth()
  }).collect();
  depths.sort();
  depths
}

fn check_logarithmic(depths: &[usize]) {
  let log_n = (N as f64).log2();
  let median = depths[depths.len() / 2] as f64;
  assert!(median >= log_n, "median depth {} below log2(n)", median);
  assert!(median <= 4.0 * log_n, "median depth {} above 4 log2(n)", median);
  let worst = depths[depths.len() - 1] as f64;
  assert!(worst <= 6.0 * log_n, "worst depth {} above 6 log2(n)", worst);
}

#[test]
fn depth_is_logarithmic_for_random_order() {
  check_logarithmic(&depths(true));
}

#[test]
fn depth_is_logarithmic_for_sorted_order() {
  check_logarithmic(&depths(false));
}
