//! generation checked storage for schematic elements.
//! insertion order is z-order: the last inserted element is drawn on top and hit-tested first.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// a copyable reference to an element stored in an [`Arena`].
/// compares by identity: two handles are equal only if they name the same slot and generation.
pub struct Handle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(index: u32, generation: u32) -> Self {
        Handle {
            index,
            generation,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}
impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}v{})", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    item: Option<T>,
}

#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    /// live handles, bottom to top
    order: Vec<Handle<T>>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Arena {
            slots: vec![],
            free: vec![],
            order: vec![],
        }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// places the item on top of the z-order
    pub fn insert(&mut self, item: T) -> Handle<T> {
        let h = if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.item = Some(item);
            Handle::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                item: Some(item),
            });
            Handle::new(index, 0)
        };
        self.order.push(h);
        h
    }

    /// removes exactly the element named by `h`. returns None if the handle is stale.
    pub fn remove(&mut self, h: Handle<T>) -> Option<T> {
        let slot = self.slots.get_mut(h.index as usize)?;
        if slot.generation != h.generation {
            return None;
        }
        let item = slot.item.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(h.index);
        self.order.retain(|&o| o != h);
        Some(item)
    }

    pub fn get(&self, h: Handle<T>) -> Option<&T> {
        self.slots
            .get(h.index as usize)
            .filter(|s| s.generation == h.generation)
            .and_then(|s| s.item.as_ref())
    }

    pub fn get_mut(&mut self, h: Handle<T>) -> Option<&mut T> {
        self.slots
            .get_mut(h.index as usize)
            .filter(|s| s.generation == h.generation)
            .and_then(|s| s.item.as_mut())
    }

    pub fn contains(&self, h: Handle<T>) -> bool {
        self.get(h).is_some()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// drops every element. all outstanding handles become stale.
    pub fn clear(&mut self) {
        for h in self.order.drain(..) {
            let slot = &mut self.slots[h.index as usize];
            slot.item = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(h.index);
        }
    }

    /// handles bottom to top
    pub fn handles(&self) -> &[Handle<T>] {
        &self.order
    }

    /// elements bottom to top, i.e. draw order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Handle<T>, &T)> + '_ {
        self.order.iter().filter_map(move |&h| self.get(h).map(|t| (h, t)))
    }

    /// elements top to bottom, i.e. hit-test order
    pub fn iter_top_down(&self) -> impl Iterator<Item = (Handle<T>, &T)> + '_ {
        self.iter().rev()
    }

    /// consumes the arena, yielding its elements bottom to top
    pub fn into_items(self) -> impl Iterator<Item = T> {
        let Arena { mut slots, order, .. } = self;
        order.into_iter().filter_map(move |h| {
            slots
                .get_mut(h.index as usize)
                .filter(|s| s.generation == h.generation)
                .and_then(|s| s.item.take())
        })
    }

    /// topmost element satisfying `f`
    pub fn find_top(&self, mut f: impl FnMut(&T) -> bool) -> Option<Handle<T>> {
        self.iter_top_down().find(|(_, t)| f(t)).map(|(h, _)| h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removal_is_by_identity() {
        let mut a = Arena::new();
        let h0 = a.insert(7);
        let h1 = a.insert(7);
        assert_ne!(h0, h1);

        assert_eq!(a.remove(h1), Some(7));
        assert_eq!(a.len(), 1);
        assert_eq!(a.handles(), &[h0]);
        assert!(a.contains(h0));
        assert!(!a.contains(h1));
    }

    #[test]
    fn into_items_moves_out_in_z_order() {
        let mut a = Arena::new();
        let h0 = a.insert(String::from("bottom"));
        a.insert(String::from("middle"));
        a.insert(String::from("top"));
        a.remove(h0);
        a.insert(String::from("new top"));
        let items: Vec<String> = a.into_items().collect();
        assert_eq!(items, ["middle", "top", "new top"]);
    }

    #[test]
    fn stale_handles_do_not_alias_reused_slots() {
        let mut a = Arena::new();
        let h0 = a.insert("a");
        a.remove(h0);
        let h1 = a.insert("b");
        // same slot, new generation
        assert_eq!(a.get(h0), None);
        assert_eq!(a.get(h1), Some(&"b"));
        assert_eq!(a.remove(h0), None);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn z_order() {
        let mut a = Arena::new();
        let hs: Vec<_> = (0..4).map(|i| a.insert(i)).collect();
        a.remove(hs[1]);
        let bottom_up: Vec<_> = a.iter().map(|(_, &v)| v).collect();
        assert_eq!(bottom_up, vec![0, 2, 3]);
        let top_down: Vec<_> = a.iter_top_down().map(|(_, &v)| v).collect();
        assert_eq!(top_down, vec![3, 2, 0]);
        assert_eq!(a.find_top(|&v| v % 2 == 0), Some(hs[2]));
    }

    #[test]
    fn clear_invalidates_everything() {
        let mut a = Arena::new();
        let h0 = a.insert(1);
        let h1 = a.insert(2);
        a.clear();
        assert!(a.is_empty());
        assert!(a.get(h0).is_none());
        assert!(a.get(h1).is_none());
        let h2 = a.insert(3);
        assert_ne!(h2, h0);
        assert_ne!(h2, h1);
        assert_eq!(a.get(h2), Some(&3));
    }
}
