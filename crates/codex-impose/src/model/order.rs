use std::collections::HashMap;
use std::hash::Hash;

/// Append-only sequence remembering insertion order, with O(1) lookup of
/// membership and position
#[derive(Debug, Clone)]
pub struct Order<T> {
    items: Vec<T>,
    positions: HashMap<T, usize>,
}

impl<T> Default for Order<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> Order<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Returns false if it was already present.
    pub fn push(&mut self, item: T) -> bool {
        if self.positions.contains_key(&item) {
            return false;
        }
        self.positions.insert(item.clone(), self.items.len());
        self.items.push(item);
        true
    }

    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.positions.get(item).copied()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.positions.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for Order<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut order = Order::new();
        for item in iter {
            order.push(item);
        }
        order
    }
}

impl<'a, T: Eq + Hash + Clone> IntoIterator for &'a Order<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_ignores_duplicates() {
        let mut order = Order::new();
        assert!(order.push("b"));
        assert!(order.push("a"));
        assert!(!order.push("b"));

        assert_eq!(order.len(), 2);
        assert_eq!(order.index_of(&"b"), Some(0));
        assert_eq!(order.index_of(&"a"), Some(1));
        assert_eq!(order.index_of(&"c"), None);
        assert_eq!(order.as_slice(), &["b", "a"]);
    }

    #[test]
    fn test_collect_keeps_first_occurrence() {
        let order: Order<u8> = [3, 1, 3, 2].into_iter().collect();
        assert_eq!(order.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert!(order.contains(&2));
    }
}
