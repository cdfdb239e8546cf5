use hashbrown::HashMap;

use super::PoolConstant;
use crate::Vec;

/// De-duplicating pool of `ldc` constants.
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    entries: Vec<PoolConstant>,

    /// Maps each constant to its index in `entries`.
    index: HashMap<PoolConstant, usize>,
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constant to the pool (or reuse an existing entry) and return its index.
    pub fn intern(&mut self, constant: &PoolConstant) -> usize {
        if let Some(&existing) = self.index.get(constant) {
            return existing;
        }
        let index = self.entries.len();
        self.entries.push(constant.clone());
        self.index.insert(constant.clone(), index);
        index
    }

    pub fn index_of(&self, constant: &PoolConstant) -> Option<usize> {
        self.index.get(constant).copied()
    }

    pub fn get(&self, index: usize) -> Option<&PoolConstant> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoolConstant> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_deduplication() {
        let mut pool = ConstantPool::new();
        assert_eq!(pool.intern(&PoolConstant::Int(100_000)), 0);
        assert_eq!(pool.intern(&PoolConstant::Long(100_000)), 1);
        assert_eq!(pool.intern(&PoolConstant::Int(100_000)), 0);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.index_of(&PoolConstant::Long(100_000)), Some(1));
        assert_eq!(pool.get(1), Some(&PoolConstant::Long(100_000)));
    }
}
