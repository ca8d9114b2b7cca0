/// Slot storage with stable indices.
///
/// Removing an element frees its slot without moving any other element, so the indices of
/// live elements never change. Freed slots are kept on a free-list and handed out again by
/// later insertions (most recently freed first).
#[derive(Clone, Debug)]
pub(crate) struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    live: usize,
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        SlotArena {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }
}

impl<T> SlotArena<T> {
    /// Store `value` and return its slot index.
    pub fn insert(&mut self, value: T) -> usize {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            self.slots[index] = Some(value);
            index
        } else {
            self.slots.push(Some(value));
            self.slots.len() - 1
        }
    }

    /// Free the slot at `index`, returning its value. Returns `None` for free or
    /// out-of-range slots.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let value = self.slots.get_mut(index)?.take()?;
        self.free.push(index);
        self.live -= 1;
        Some(value)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)?.as_ref()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)?.as_mut()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Number of slots (live or free). Every index ever returned by `insert` is below this.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Live elements in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|value| (index, value)))
    }
}
