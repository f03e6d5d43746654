use crate::error::AppError;

/// Something a [`Repository`] can hold: it has a lookup key and a name for
/// error messages.
pub trait Record {
    const KIND: &'static str;

    fn key(&self) -> &str;
}

/// Insertion-ordered list with linear lookup. No indexes, no duplicate checks.
#[derive(Debug, Clone)]
pub struct Repository<T> {
    records: Vec<T>,
}

impl<T> Default for Repository<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> Repository<T> {
    pub fn add(&mut self, record: T) {
        self.records.push(record);
    }

    pub fn get(&self, key: &str) -> Result<&T, AppError> {
        self.records
            .iter()
            .find(|r| r.key() == key)
            .ok_or_else(|| Self::not_found(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut T, AppError> {
        self.records
            .iter_mut()
            .find(|r| r.key() == key)
            .ok_or_else(|| Self::not_found(key))
    }

    pub fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().find(|r| predicate(*r))
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().filter(|r| predicate(*r)).collect()
    }

    /// Removes the first record with `key`. Returns false when nothing matched.
    pub fn delete(&mut self, key: &str) -> bool {
        match self.records.iter().position(|r| r.key() == key) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.records.clear();
    }

    pub fn all(&self) -> &[T] {
        &self.records
    }

    fn not_found(key: &str) -> AppError {
        AppError::NotFound(format!("{} {} not found", T::KIND, key))
    }
}
