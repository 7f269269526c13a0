//! Height-balanced (AVL) ordered map over string keys.
//!
//! This is the ring's ordered map: a self-balancing BST keyed by `String`
//! token, ordered lexicographically, carrying a `V` payload per node.
//! This collapses the tree to a conventional root-of-nodes shape — each
//! [`Node`] owns its children directly via `Option<Box<Node<V>>>` — and
//! maintains height only along the O(log n) recursion path on every
//! insert/remove, rather than recomputing heights and balances for the
//! whole tree after every mutation.
//!
//! # Invariants
//! - BST ordering by `Ord` on the `String` key (lexicographic).
//! - `|left.height - right.height| <= 1` at every node.
//! - `height == 1 + max(left.height, right.height)`, empty subtree height `-1`.
//! - Keys are unique; inserting an existing key is a no-op.

use std::cmp::Ordering;

struct Node<V> {
    key: String,
    value: V,
    height: i64,
    left: Option<Box<Node<V>>>,
    right: Option<Box<Node<V>>>,
}

impl<V> Node<V> {
    fn new(key: String, value: V) -> Self {
        Node {
            key,
            value,
            height: 0,
            left: None,
            right: None,
        }
    }
}

fn height<V>(node: &Option<Box<Node<V>>>) -> i64 {
    node.as_ref().map_or(-1, |n| n.height)
}

fn balance_factor<V>(node: &Node<V>) -> i64 {
    height(&node.left) - height(&node.right)
}

fn update_height<V>(node: &mut Node<V>) {
    node.height = 1 + height(&node.left).max(height(&node.right));
}

/// A height-balanced ordered map, keyed by `String`, ordered as the ring
/// requires: lexicographic string comparison of the key.
pub struct AvlTree<V> {
    root: Option<Box<Node<V>>>,
}

impl<V> Default for AvlTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> AvlTree<V> {
    pub fn new() -> Self {
        AvlTree { root: None }
    }

    /// Number of entries in the map.
    pub fn size(&self) -> usize {
        fn count<V>(node: &Option<Box<Node<V>>>) -> usize {
            match node {
                None => 0,
                Some(n) => 1 + count(&n.left) + count(&n.right),
            }
        }
        count(&self.root)
    }

    /// Height of the tree; `-1` for an empty tree.
    pub fn height(&self) -> i64 {
        height(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts `(key, value)`. A no-op if `key` already exists.
    pub fn insert(&mut self, key: String, value: V) {
        self.root = insert(self.root.take(), key, value);
    }

    /// Removes the entry for `key`, if present.
    pub fn remove(&mut self, key: &str) {
        self.root = remove(self.root.take(), key);
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let mut cur = self.root.as_deref();
        while let Some(n) = cur {
            cur = match key.cmp(n.key.as_str()) {
                Ordering::Equal => return Some(&n.value),
                Ordering::Less => n.left.as_deref(),
                Ordering::Greater => n.right.as_deref(),
            };
        }
        None
    }

    /// The entry with the smallest key greater than or equal to `key`,
    /// wrapping to the overall smallest key if none qualifies. `None`
    /// iff the tree is empty. This is the ring's `Lookup` primitive.
    pub fn ceiling(&self, key: &str) -> Option<(&str, &V)> {
        let mut cur = self.root.as_deref();
        let mut best: Option<&Node<V>> = None;
        while let Some(n) = cur {
            match key.cmp(n.key.as_str()) {
                Ordering::Equal => return Some((n.key.as_str(), &n.value)),
                Ordering::Less => {
                    best = Some(n);
                    cur = n.left.as_deref();
                }
                Ordering::Greater => cur = n.right.as_deref(),
            }
        }
        match best {
            Some(n) => Some((n.key.as_str(), &n.value)),
            None => self.min(),
        }
    }

    fn min(&self) -> Option<(&str, &V)> {
        let mut cur = self.root.as_deref()?;
        while let Some(n) = cur.left.as_deref() {
            cur = n;
        }
        Some((cur.key.as_str(), &cur.value))
    }

    pub fn in_order(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.size());
        in_order(&self.root, &mut out);
        out
    }

    pub fn pre_order(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.size());
        pre_order(&self.root, &mut out);
        out
    }

    pub fn post_order(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.size());
        post_order(&self.root, &mut out);
        out
    }

    /// All `(key, value)` pairs in in-order (token) order.
    pub fn entries(&self) -> Vec<(&str, &V)> {
        let mut out = Vec::with_capacity(self.size());
        entries(&self.root, &mut out);
        out
    }
}

fn in_order<V>(node: &Option<Box<Node<V>>>, out: &mut Vec<String>) {
    if let Some(n) = node {
        in_order(&n.left, out);
        out.push(n.key.clone());
        in_order(&n.right, out);
    }
}

fn pre_order<V>(node: &Option<Box<Node<V>>>, out: &mut Vec<String>) {
    if let Some(n) = node {
        out.push(n.key.clone());
        pre_order(&n.left, out);
        pre_order(&n.right, out);
    }
}

fn post_order<V>(node: &Option<Box<Node<V>>>, out: &mut Vec<String>) {
    if let Some(n) = node {
        post_order(&n.left, out);
        post_order(&n.right, out);
        out.push(n.key.clone());
    }
}

fn entries<'a, V>(node: &'a Option<Box<Node<V>>>, out: &mut Vec<(&'a str, &'a V)>) {
    if let Some(n) = node {
        entries(&n.left, out);
        out.push((n.key.as_str(), &n.value));
        entries(&n.right, out);
    }
}

fn insert<V>(node: Option<Box<Node<V>>>, key: String, value: V) -> Option<Box<Node<V>>> {
    let mut node = match node {
        None => return Some(Box::new(Node::new(key, value))),
        Some(n) => n,
    };
    match key.cmp(&node.key) {
        Ordering::Less => node.left = insert(node.left.take(), key, value),
        Ordering::Greater => node.right = insert(node.right.take(), key, value),
        Ordering::Equal => return Some(node), // existing token: no-op
    }
    Some(rebalance(node))
}

fn remove<V>(node: Option<Box<Node<V>>>, key: &str) -> Option<Box<Node<V>>> {
    let mut node = node?;
    match key.cmp(node.key.as_str()) {
        Ordering::Less => {
            node.left = remove(node.left.take(), key);
            Some(rebalance(node))
        }
        Ordering::Greater => {
            node.right = remove(node.right.take(), key);
            Some(rebalance(node))
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => None,
            (Some(l), None) => Some(l),
            (None, Some(r)) => Some(r),
            (Some(l), Some(r)) => {
                // Replace payload with the in-order successor (leftmost of
                // the right subtree), then remove that successor from the
                // right subtree.
                let (successor_key, successor_val, new_right) = take_min(r);
                node.left = Some(l);
                node.key = successor_key;
                node.value = successor_val;
                node.right = new_right;
                Some(rebalance(node))
            }
        },
    }
}

/// Removes and returns the leftmost (key, value) of `node`'s subtree,
/// along with the subtree that remains after removal.
fn take_min<V>(mut node: Box<Node<V>>) -> (String, V, Option<Box<Node<V>>>) {
    match node.left.take() {
        None => (node.key, node.value, node.right.take()),
        Some(left) => {
            let (k, v, new_left) = take_min(left);
            node.left = new_left;
            (k, v, Some(rebalance(node)))
        }
    }
}

fn rebalance<V>(mut node: Box<Node<V>>) -> Box<Node<V>> {
    update_height(&mut node);
    let bf = balance_factor(&node);

    if bf > 1 {
        let left = node.left.as_deref().expect("balance > 1 implies a left child");
        if balance_factor(left) < 0 {
            node.left = Some(rotate_left(node.left.take().unwrap()));
        }
        return rotate_right(node);
    }

    if bf < -1 {
        let right = node.right.as_deref().expect("balance < -1 implies a right child");
        if balance_factor(right) > 0 {
            node.right = Some(rotate_right(node.right.take().unwrap()));
        }
        return rotate_left(node);
    }

    node
}

fn rotate_right<V>(mut node: Box<Node<V>>) -> Box<Node<V>> {
    let mut new_root = node.left.take().expect("rotate_right requires a left child");
    node.left = new_root.right.take();
    update_height(&mut node);
    new_root.right = Some(node);
    update_height(&mut new_root);
    new_root
}

fn rotate_left<V>(mut node: Box<Node<V>>) -> Box<Node<V>> {
    let mut new_root = node.right.take().expect("rotate_left requires a right child");
    node.right = new_root.left.take();
    update_height(&mut node);
    new_root.left = Some(node);
    update_height(&mut new_root);
    new_root
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tree_of(keys: &[&str]) -> AvlTree<()> {
        let mut t = AvlTree::new();
        for k in keys {
            t.insert(k.to_string(), ());
        }
        t
    }

    fn root_key<V>(t: &AvlTree<V>) -> &str {
        t.root.as_ref().unwrap().key.as_str()
    }

    #[test]
    fn scenario_1_root_after_left_rotation() {
        let t = tree_of(&["3", "2", "1"]);
        assert_eq!(root_key(&t), "2");
    }

    #[test]
    fn scenario_2_right_child_after_right_rotation() {
        let t = tree_of(&["3", "2", "1", "4", "5"]);
        let root = t.root.as_ref().unwrap();
        assert_eq!(root.right.as_ref().unwrap().key, "4");
    }

    #[test]
    fn scenario_3_remove_two_child_root() {
        let mut t = tree_of(&["4", "2", "1", "3"]);
        t.remove("2");
        assert_eq!(root_key(&t), "3");
    }

    #[test]
    fn scenario_4_traversals() {
        let t = tree_of(&["4", "2", "1", "3"]);
        assert_eq!(t.in_order(), vec!["1", "2", "3", "4"]);
        assert_eq!(t.pre_order(), vec!["2", "1", "3", "4"]);
        assert_eq!(t.post_order(), vec!["1", "3", "4", "2"]);
    }

    #[test]
    fn insert_existing_key_is_noop() {
        let mut t = AvlTree::new();
        t.insert("1".into(), "first");
        t.insert("1".into(), "second");
        assert_eq!(t.get("1"), Some(&"first"));
        assert_eq!(t.size(), 1);
    }

    #[test]
    fn remove_leaf_and_single_child() {
        let mut t = tree_of(&["2", "1"]);
        t.remove("1");
        assert_eq!(root_key(&t), "2");
        assert_eq!(t.size(), 1);

        let mut t = tree_of(&["2", "1"]);
        t.remove("2");
        assert_eq!(root_key(&t), "1");
    }

    #[test]
    fn insert_then_remove_same_token_restores_shape() {
        let mut t = tree_of(&["5", "3", "8", "1", "4", "7", "9"]);
        let before_in_order = t.in_order();
        let before_height = t.height();

        t.insert("6".into(), ());
        t.remove("6");

        assert_eq!(t.in_order(), before_in_order);
        assert_eq!(t.height(), before_height);
    }

    #[test]
    fn ceiling_wraps_to_minimum() {
        let t = tree_of(&["10", "20", "30"]);
        assert_eq!(t.ceiling("05").map(|(k, _)| k), Some("10"));
        assert_eq!(t.ceiling("15").map(|(k, _)| k), Some("20"));
        assert_eq!(t.ceiling("99").map(|(k, _)| k), Some("10")); // wrap-around
        assert_eq!(t.ceiling("20").map(|(k, _)| k), Some("20")); // exact match
    }

    #[test]
    fn ceiling_on_empty_tree_is_none() {
        let t: AvlTree<()> = AvlTree::new();
        assert_eq!(t.ceiling("anything"), None);
    }

    proptest::proptest! {
        #[test]
        fn in_order_matches_sorted(mut keys: Vec<String>) {
            keys.sort();
            keys.dedup();
            let mut t = AvlTree::new();
            for k in &keys {
                t.insert(k.clone(), ());
            }
            proptest::prop_assert_eq!(t.in_order(), keys);
        }

        #[test]
        fn balance_factor_always_within_one(ops in proptest::collection::vec((any::<u16>(), proptest::bool::ANY), 0..200)) {
            let mut t = AvlTree::new();
            for (k, do_insert) in ops {
                let key = k.to_string();
                if do_insert {
                    t.insert(key, ());
                } else {
                    t.remove(&key);
                }
                proptest::prop_assert!(check_balanced(&t.root));
            }
        }
    }

    fn check_balanced<V>(node: &Option<Box<Node<V>>>) -> bool {
        match node {
            None => true,
            Some(n) => {
                let bf = balance_factor(n);
                bf.abs() <= 1 && check_balanced(&n.left) && check_balanced(&n.right)
            }
        }
    }
}
