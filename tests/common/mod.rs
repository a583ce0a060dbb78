#![allow(dead_code)]

use itertools::Itertools;
use path_splay::{SplayError, SplayTree};
use rand::{self, Rng};
use std::collections::BTreeMap;

/// The reference model: for every key, its values in the order the tree
/// should iterate them. A newly inserted duplicate goes before the older ones.
#[derive(Clone, Default, Debug)]
pub struct Model {
    map: BTreeMap<i32, Vec<u32>>,
    len: usize,
}

impl Model {
    pub fn insert(&mut self, key: i32, value: u32) {
        self.map.entry(key).or_default().insert(0, value);
        self.len += 1;
    }

    /// Removes the given occurrence of `key`.
    pub fn remove(&mut self, key: i32, value: u32) {
        let values = self
            .map
            .get_mut(&key)
            .expect("the tree removed a key the model doesn't have");
        let position = values
            .iter()
            .position(|v| *v == value)
            .expect("the tree removed a value the model doesn't have");
        values.remove(position);
        if values.is_empty() {
            self.map.remove(&key);
        }
        self.len -= 1;
    }

    pub fn contains(&self, key: i32) -> bool {
        self.map.contains_key(&key)
    }

    pub fn values(&self, key: i32) -> &[u32] {
        self.map.get(&key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn keys(&self) -> Vec<i32> {
        self.map.keys().cloned().collect()
    }

    pub fn pairs(&self) -> Vec<(i32, u32)> {
        self.map
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (*key, *value)))
            .collect()
    }

    /// The largest key below `key` and the smallest key above it.
    /// A search that misses `key` ends at a node holding one of them.
    pub fn neighbours(&self, key: i32) -> (Option<i32>, Option<i32>) {
        let below = self.map.range(..key).next_back().map(|(k, _)| *k);
        let above = self.map.range(key + 1..).next().map(|(k, _)| *k);
        (below, above)
    }
}

pub fn root_key(tree: &SplayTree<i32, u32>) -> Option<i32> {
    tree.root().map(|(k, _)| *k)
}

/// Checks the tree's invariants, and that its contents equal the model's.
pub fn assert_matches_model(tree: &SplayTree<i32, u32>, model: &Model) {
    tree.assert_correctness();
    assert_eq!(tree.len(), model.len());
    assert_eq!(tree.is_empty(), model.len() == 0);

    let pairs = tree.iter().map(|(k, v)| (*k, *v)).collect_vec();
    assert!(pairs.iter().tuple_windows().all(|(a, b)| a.0 <= b.0));
    assert_eq!(pairs, model.pairs());
}

/// After a search for an absent key, the root must be the last node the
/// search visited, which holds the key's predecessor or successor.
pub fn assert_root_after_miss(tree: &SplayTree<i32, u32>, model: &Model, key: i32) {
    assert!(!model.contains(key));
    match root_key(tree) {
        None => assert_eq!(model.len(), 0),
        Some(root) => {
            let (below, above) = model.neighbours(key);
            assert!(
                Some(root) == below || Some(root) == above,
                "root {} after missing {} is neither {:?} nor {:?}",
                root,
                key,
                below,
                above
            );
        }
    }
}

/// One operation on the tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Op {
    Insert(i32),
    Remove(i32),
    Find(i32),
    Exists(i32),
    ValueMut(i32),
}

/// Performs the operation on both the tree and the model, and checks that
/// they agree on the result and that the tree splayed the right node.
/// `value` is used by insertions, and should be unique.
pub fn apply(tree: &mut SplayTree<i32, u32>, model: &mut Model, op: Op, value: u32) {
    match op {
        Op::Insert(key) => {
            tree.insert(key, value);
            model.insert(key, value);
            assert_eq!(tree.root(), Some((&key, &value)));
        }
        Op::Remove(key) => match tree.remove(&key) {
            Some(removed) => {
                assert!(model.values(key).contains(&removed));
                model.remove(key, removed);
            }
            None => assert_root_after_miss(tree, model, key),
        },
        Op::Find(key) => match tree.find(&key).map(|(k, v)| (*k, *v)) {
            Some((found_key, found_value)) => {
                assert_eq!(found_key, key);
                assert!(model.values(key).contains(&found_value));
                assert_eq!(tree.root(), Some((&key, &found_value)));
            }
            None => assert_root_after_miss(tree, model, key),
        },
        Op::Exists(key) => {
            let exists = tree.exists(&key);
            assert_eq!(exists, model.contains(key));
            if exists {
                assert_eq!(root_key(tree), Some(key));
            } else {
                assert_root_after_miss(tree, model, key);
            }
        }
        Op::ValueMut(key) => match tree.try_value_mut(&key).map(|v| *v) {
            Ok(value) => {
                assert!(model.values(key).contains(&value));
                assert_eq!(tree.root(), Some((&key, &value)));
            }
            Err(err) => {
                assert_eq!(err, SplayError::KeyNotFound);
                assert_root_after_miss(tree, model, key);
            }
        },
    }
}

fn random_op(rng: &mut impl Rng, max_key: i32) -> Op {
    let key = rng.gen_range(0..max_key);
    match rng.gen_range(0..8) {
        0..=2 => Op::Insert(key),
        3..=4 => Op::Remove(key),
        5 => Op::Find(key),
        6 => Op::Exists(key),
        _ => Op::ValueMut(key),
    }
}

/// Runs random operations against the model, checking the whole tree
/// every `check_every` rounds.
pub fn check_consistency(rounds: usize, max_key: i32, check_every: usize) {
    let mut rng = rand::thread_rng();
    let mut tree = SplayTree::new();
    let mut model = Model::default();

    for round in 0..rounds {
        let op = random_op(&mut rng, max_key);
        apply(&mut tree, &mut model, op, round as u32);
        if round % check_every == 0 {
            assert_matches_model(&tree, &model);
        }
    }
    assert_matches_model(&tree, &model);

    // empty it out
    for key in model.clone().keys() {
        for _ in 0..model.values(key).len() {
            apply(&mut tree, &mut model, Op::Remove(key), 0);
        }
    }
    assert_matches_model(&tree, &model);
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.to_string(), "-");
}
