//! Category registry
//!
//! The list of known category names offered for new transactions. Names are
//! unique ignoring case and kept sorted. Interested parties subscribe to be
//! told about additions and removals.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::error::LedgerResult;
use crate::models::Category;

/// Change notification sent to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryEvent {
    Added(Category),
    Removed(Category),
}

/// Handle returned by [`CategoryRegistry::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&CategoryEvent)>;

/// Sorted, case-insensitively unique list of category names
#[derive(Default)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
    listeners: BTreeMap<ListenerId, Listener>,
    next_listener: u64,
    revision: u64,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with `names`; blank names and duplicates are skipped
    pub fn with_defaults<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for name in names {
            match Category::new(name) {
                Ok(category) if !registry.contains(category.name()) => registry.insert(category),
                _ => {}
            }
        }
        registry.revision = 0;
        registry
    }

    /// Add a category name
    ///
    /// Returns `Ok(false)` when a name equal ignoring case already exists.
    pub fn add(&mut self, name: &str) -> LedgerResult<bool> {
        let category = Category::new(name)?;
        if self.contains(category.name()) {
            return Ok(false);
        }
        self.insert(category.clone());
        debug!(%category, "category added");
        self.notify(&CategoryEvent::Added(category));
        Ok(true)
    }

    /// Remove a category by exact name
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(index) = self.categories.iter().position(|c| c.name() == name) else {
            return false;
        };
        let category = self.categories.remove(index);
        self.revision += 1;
        debug!(%category, "category removed");
        self.notify(&CategoryEvent::Removed(category));
        true
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Case-insensitive membership test
    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.matches(name))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Counter bumped on every change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&CategoryEvent) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    fn insert(&mut self, category: Category) {
        let index = self
            .categories
            .binary_search_by(|c| sort_key(c).cmp(&sort_key(&category)))
            .unwrap_or_else(|i| i);
        self.categories.insert(index, category);
        self.revision += 1;
    }

    fn notify(&mut self, event: &CategoryEvent) {
        for listener in self.listeners.values_mut() {
            listener(event);
        }
    }
}

fn sort_key(category: &Category) -> (String, &str) {
    (category.name().to_lowercase(), category.name())
}

impl fmt::Debug for CategoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryRegistry")
            .field("categories", &self.categories)
            .field("listeners", &self.listeners.len())
            .field("revision", &self.revision)
            .finish()
    }
}
