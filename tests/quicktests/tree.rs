use strbst::tree::Tree;

use std::collections::{BTreeSet, HashSet};

use quickcheck::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both. Returns whether every
/// insert and delete reported the same outcome as the set did.
fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, set: &mut BTreeSet<K>) -> bool
where
    K: Ord + Clone,
{
    ops.iter().all(|op| match op {
        Op::Insert(k) => bst.insert(k.clone()) == set.insert(k.clone()),
        Op::Remove(k) => bst.delete(k) == set.remove(k),
    })
}

fn is_strictly_ascending<K: Ord>(tree: &Tree<K>) -> bool {
    let keys: Vec<_> = tree.iter().collect();
    keys.windows(2).all(|w| w[0] < w[1])
}

quickcheck! {
    fn fuzz_multiple_operations_string(ops: Vec<Op<String>>) -> bool {
        let mut tree = Tree::new();
        let mut set = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut set)
            && set.iter().all(|key| tree.search(key.as_str()))
            && tree.iter().eq(set.iter())
            && tree.len() == set.len()
    }

    fn stays_ordered(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut set = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut set) && is_strictly_ascending(&tree)
    }

    fn outcomes_match_btree_set(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut set = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut set) && tree.len() == set.len()
    }

    fn contains(xs: Vec<String>) -> bool {
        let tree: Tree<_> = xs.iter().cloned().collect();

        xs.iter().all(|x| tree.search(x.as_str()))
    }

    fn contains_not(xs: Vec<String>, nots: Vec<String>) -> bool {
        let tree: Tree<_> = xs.iter().cloned().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.search(x.as_str()))
    }

    fn insert_twice_is_insert_once(xs: Vec<String>) -> bool {
        let mut once: Tree<String> = xs.iter().cloned().collect();
        let twice: Tree<String> = xs.iter().chain(xs.iter()).cloned().collect();

        let same = once.iter().eq(twice.iter()) && once.len() == twice.len();
        let fresh = xs.iter().all(|x| !once.insert(x.clone()));
        same && fresh
    }

    fn with_deletions(xs: Vec<String>, deletes: Vec<String>) -> bool {
        let mut tree: Tree<_> = xs.iter().cloned().collect();
        for delete in &deletes {
            tree.delete(delete.as_str());
        }

        let mut still_present = xs;
        for delete in &deletes {
            // We may have inserted the same value multiple times - delete each one.
            while let Some(pos) = still_present.iter().position(|x| x == delete) {
                still_present.swap_remove(pos);
            }
        }

        deletes.iter().all(|x| !tree.search(x.as_str()))
            && still_present.iter().all(|x| tree.search(x.as_str()))
    }

    fn delete_absent_changes_nothing(xs: Vec<i8>, absent: i8) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().filter(|x| *x != absent).collect();
        let before: Vec<i8> = tree.iter().copied().collect();

        !tree.delete(&absent) && tree.iter().copied().eq(before.into_iter())
    }

    fn round_trip_empties_the_tree(xs: HashSet<String>, order: Vec<usize>) -> bool {
        let mut keys: Vec<String> = xs.into_iter().collect();
        let mut tree: Tree<_> = keys.iter().cloned().collect();

        // Delete in an arbitrary order driven by `order`.
        for (i, o) in order.into_iter().enumerate().take(keys.len()) {
            let j = i + o % (keys.len() - i);
            keys.swap(i, j);
        }
        let all_deleted = keys.iter().all(|k| tree.delete(k.as_str()));

        all_deleted && tree.is_empty() && tree.len() == 0 && tree.dispose() == 0
    }

    fn dispose_frees_every_node(xs: Vec<String>) -> bool {
        let tree: Tree<_> = xs.into_iter().collect();
        let len = tree.len();

        tree.dispose() == len
    }
}
