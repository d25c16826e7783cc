use alloc::vec::Vec;

use tracing::debug;

use super::handle::Handle;

/// A slot plus the number of times it has been vacated.
///
/// The generation lets a stale handle be told apart from a handle to whatever
/// was allocated into the same slot later. A slot whose generation would wrap
/// is retired instead of reused, so a `(handle, generation)` pair never
/// denotes two different elements.
#[derive(Clone)]
struct Slot<T> {
    generation: u32,
    element: Option<T>,
}

#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.element.is_some()).count()
    }

    /// The handle the next call to [`alloc`](Self::alloc) will return.
    ///
    /// Lets two arenas whose elements point at each other be filled without a
    /// placeholder handle.
    pub(crate) fn next_handle(&self) -> Handle {
        match self.free.last() {
            Some(&h) => h,
            None => Handle::from_index(self.slots.len()),
        }
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            let slot = &mut self.slots[h.to_index()];
            debug_assert!(slot.element.is_none(), "`Arena::alloc()` - free slot is occupied!");
            slot.element = Some(element);
            h
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Slot {
                generation: 0,
                element: Some(element),
            });
            Handle::from_index(self.slots.len() - 1)
        }
    }

    /// Generation of the slot behind `handle`.
    #[inline]
    pub(crate) fn generation(&self, handle: Handle) -> u32 {
        self.slots[handle.to_index()].generation
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].element.as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    /// Returns the element only if `handle` is in range, occupied, and still on
    /// `generation`.
    pub(crate) fn get_checked(&self, handle: Handle, generation: u32) -> Option<&T> {
        self.slots
            .get(handle.to_index())
            .filter(|slot| slot.generation == generation)
            .and_then(|slot| slot.element.as_ref())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].element.as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Number of slots ever allocated, occupied or not. Every live handle's
    /// index is below this.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Mutable access to every occupied slot, in slot order.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.element.as_mut().map(|element| (Handle::from_index(index), element)))
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = &mut self.slots[handle.to_index()];
        let element = slot.element.take().expect("`Arena::take()` - `handle` is invalid!");
        if let Some(generation) = slot.generation.checked_add(1) {
            slot.generation = generation;
            self.free.push(handle);
        } else {
            debug!(index = handle.to_index(), "retired exhausted arena slot");
        }
        element
    }

    #[cfg(test)]
    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
