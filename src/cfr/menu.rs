use crate::MENU_CAPACITY;

/// A fixed-capacity list of legal actions.
///
/// Menus are built at every decision node of every traversal, so they live
/// on the stack. Slot order is meaningful: regret and strategy tables are
/// indexed by slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Menu<E> {
    edges: [Option<E>; MENU_CAPACITY],
    len: usize,
}

impl<E: Copy> Menu<E> {
    pub fn new() -> Self {
        Self {
            edges: [None; MENU_CAPACITY],
            len: 0,
        }
    }
    /// append an edge; false once the menu is full
    pub fn push(&mut self, edge: E) -> bool {
        match self.len < MENU_CAPACITY {
            true => {
                self.edges[self.len] = Some(edge);
                self.len += 1;
                true
            }
            false => false,
        }
    }
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn get(&self, slot: usize) -> Option<E> {
        self.edges.get(slot).copied().flatten()
    }
    pub fn iter(&self) -> impl Iterator<Item = E> + '_ {
        self.edges.iter().take(self.len).filter_map(|e| *e)
    }
}

impl<E: Copy + PartialEq> Menu<E> {
    pub fn contains(&self, edge: &E) -> bool {
        self.position(edge).is_some()
    }
    pub fn position(&self, edge: &E) -> Option<usize> {
        self.iter().position(|e| e == *edge)
    }
}

impl<E: Copy> Default for Menu<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Copy> FromIterator<E> for Menu<E> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        let mut menu = Self::new();
        for edge in iter {
            if !menu.push(edge) {
                log::warn!("menu overflow at {} edges", MENU_CAPACITY);
                break;
            }
        }
        menu
    }
}

impl<E: Copy + std::fmt::Display> std::fmt::Display for Menu<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let edges = self.iter().map(|e| e.to_string()).collect::<Vec<_>>();
        write!(f, "[{}]", edges.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_enforced() {
        let mut menu = Menu::new();
        for i in 0..MENU_CAPACITY {
            assert!(menu.push(i));
        }
        assert!(!menu.push(99));
        assert_eq!(menu.len(), MENU_CAPACITY);
        assert_eq!(menu.get(MENU_CAPACITY), None);
    }

    #[test]
    fn slots_keep_order() {
        let menu = [3u8, 1, 2].into_iter().collect::<Menu<_>>();
        assert_eq!(menu.position(&1), Some(1));
        assert_eq!(menu.iter().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert!(!menu.contains(&7));
    }
}
