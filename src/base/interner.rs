//! String interner for element/attribute names.
//!
//! Uses `Arc<str>` rather than `Rc<str>` so that [`crate::driver::Workspace`]
//! can process documents in parallel (see spec §5) without wrapping every
//! name in an additional `Send`-safe container.

use rustc_hash::FxHashSet;
use std::sync::Arc;

/// An interned string: cheap to clone (an `Arc` refcount bump), and two
/// `Name`s compare equal iff they were interned from equal strings.
pub type Name = Arc<str>;

/// Deduplicating string pool.
#[derive(Debug, Default)]
pub struct Interner {
    strings: FxHashSet<Arc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning the canonical `Arc` for this string.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(existing) = self.strings.get(s) {
            return Arc::clone(existing);
        }
        let name: Arc<str> = Arc::from(s);
        self.strings.insert(Arc::clone(&name));
        name
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_string_returns_same_allocation() {
        let mut interner = Interner::new();
        let a = interner.intern("Vehicle");
        let b = interner.intern("Vehicle");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn distinct_strings_intern_separately() {
        let mut interner = Interner::new();
        let a = interner.intern("A");
        let b = interner.intern("B");
        assert_ne!(a, b);
        assert_eq!(interner.len(), 2);
    }
}
