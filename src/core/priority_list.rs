//! Priority-ordered plugin collection
//!
//! Used for both processors and writers: items are extracted highest
//! priority first, and among equal priorities the most recently inserted
//! item comes first. That order decides which processor enriches an event
//! first and which writer receives it first, so it must hold exactly.

/// Collection mapping inserted items to an integer priority.
#[derive(Debug)]
pub struct PriorityList<T> {
    items: Vec<Entry<T>>,
    next_seq: u64,
}

#[derive(Debug)]
struct Entry<T> {
    item: T,
    priority: i32,
    seq: u64,
}

impl<T> PriorityList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn insert(&mut self, item: T, priority: i32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.items.push(Entry {
            item,
            priority,
            seq,
        });
        // Highest priority first, LIFO among equals.
        self.items
            .sort_by(|a, b| b.priority.cmp(&a.priority).then(b.seq.cmp(&a.seq)));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in extraction order without consuming the collection
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|entry| &entry.item)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut().map(|entry| &mut entry.item)
    }

    /// Remove and return every item in extraction order
    pub fn drain(&mut self) -> Vec<T> {
        self.items.drain(..).map(|entry| entry.item).collect()
    }
}

impl<T> Default for PriorityList<T> {
    fn default() -> Self {
        Self::new()
    }
}
