/// Cache key type
pub type KeyType = String;

/// Cache value associated with a key
pub type ValueType = String;

/// An abstraction over a bounded key <=> value cache shared between connections.
pub trait Cache {
    /// Returns the value stored under `key` and marks it as most recently used.
    /// `None` means the key is not cached, an empty string is a stored value.
    fn get(&self, key: &str) -> Option<ValueType>;

    /// Stores `value` under `key` and marks it as most recently used, evicting
    /// the least recently used entry when a new key does not fit.
    fn set(&self, key: KeyType, value: ValueType);

    /// Number of key value pairs currently cached
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of key value pairs
    fn capacity(&self) -> usize;
}
