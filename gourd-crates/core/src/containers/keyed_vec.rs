use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// Types which identify a slot in a [`KeyedVec`].
pub trait StorageKey: Clone {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

/// A vector which is indexed by a typed id instead of a `usize`, so ids of one kind of object
/// cannot be used to look up another.
#[derive(Debug, Hash, PartialEq, Eq)]
pub struct KeyedVec<Key, Value> {
    values: Vec<Value>,
    key: PhantomData<Key>,
}

impl<Key, Value> Default for KeyedVec<Key, Value> {
    fn default() -> Self {
        KeyedVec {
            values: Vec::new(),
            key: PhantomData,
        }
    }
}

impl<Key, Value: Clone> Clone for KeyedVec<Key, Value> {
    fn clone(&self) -> Self {
        KeyedVec {
            values: self.values.clone(),
            key: PhantomData,
        }
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    /// Stores `value` in a new slot and returns its key.
    pub fn push(&mut self, value: Value) -> Key {
        let key = Key::create_from_index(self.values.len());
        self.values.push(value);
        key
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> {
        (0..self.values.len()).map(Key::create_from_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'_ Value> {
        self.values.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &'_ mut Value> {
        self.values.iter_mut()
    }

    pub(crate) fn get(&self, key: Key) -> Option<&Value> {
        self.values.get(key.index())
    }
}

impl<Key: StorageKey, Value: Clone> KeyedVec<Key, Value> {
    /// Makes sure `key` has a slot, filling any new slots with `fill`.
    pub(crate) fn grow_to_include(&mut self, key: Key, fill: Value) {
        let required = key.index() + 1;
        if self.values.len() < required {
            self.values.resize(required, fill);
        }
    }
}

impl<Key: StorageKey, Value> Index<Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, key: Key) -> &Value {
        &self.values[key.index()]
    }
}

impl<Key: StorageKey, Value> Index<&Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, key: &Key) -> &Value {
        &self.values[key.index()]
    }
}

impl<Key: StorageKey, Value> IndexMut<Key> for KeyedVec<Key, Value> {
    fn index_mut(&mut self, key: Key) -> &mut Value {
        &mut self.values[key.index()]
    }
}
