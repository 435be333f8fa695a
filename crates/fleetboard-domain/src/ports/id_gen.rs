//! ID generator port for producing unique identifiers.

use std::cell::Cell;

/// Generates unique identifiers for members, fleets and stops.
///
/// Swapping the generator gives tests and scripted sessions predictable ids.
pub trait IdGenerator {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn generate_id(&self) -> String {
        (**self).generate_id()
    }
}

/// Deterministic generator producing `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: Cell<u64>,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: Cell::new(1),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGenerator for SequentialIds {
    fn generate_id(&self) -> String {
        let n = self.next.get();
        self.next.set(n + 1);
        format!("{}-{}", self.prefix, n)
    }
}
