//! Replacement policies for the statistics cache.
//!
//! Only LRU is modeled. The cache talks to it through [`ReplacementPolicy`].

/// Age-stamp LRU.
pub mod lru;

pub use lru::LruPolicy;

/// Victim selection within one set.
pub trait ReplacementPolicy: Send + Sync {
    /// Records an access to `way` of `set`, on a hit or a fill.
    fn touch(&mut self, set: usize, way: usize);

    /// Way of `set` to refill on a miss.
    fn victim(&self, set: usize) -> usize;

    /// Forgets all access history.
    fn reset(&mut self);
}
