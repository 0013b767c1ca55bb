//! Worker Context

use crate::rng::*;
use bumpalo::Bump;

/// Per-thread mutable state used while evaluating rays. The arena holds
/// every BSDF allocated for one primary ray and is reset once that ray's
/// radiance is known. The random number generator is created on first use.
pub struct WorkerContext {
    /// Arena for BSDF allocations.
    pub arena: Bump,

    /// Lazily created random number generator.
    rng: Option<RNG>,

    /// Sequence index used to seed the random number generator.
    seed: u64,
}

impl WorkerContext {
    /// Create a new `WorkerContext`.
    ///
    /// * `seed` - Sequence index for the random number generator, usually the
    ///            worker index.
    pub fn new(seed: u64) -> Self {
        Self {
            arena: Bump::new(),
            rng: None,
            seed,
        }
    }

    /// Returns the seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the random number generator, creating it if needed.
    pub fn rng(&mut self) -> &mut RNG {
        let seed = self.seed;
        self.rng.get_or_insert_with(|| RNG::new(seed))
    }

    /// Splits the context into the arena and the random number generator so
    /// both can be borrowed at once.
    pub fn split(&mut self) -> (&Bump, &mut RNG) {
        let seed = self.seed;
        let rng = self.rng.get_or_insert_with(|| RNG::new(seed));
        (&self.arena, rng)
    }

    /// Releases every allocation made in the arena. The memory blocks are
    /// kept for reuse.
    pub fn reset(&mut self) {
        self.arena.reset();
    }

    /// Returns the number of bytes currently reserved by the arena.
    pub fn allocated_bytes(&self) -> usize {
        self.arena.allocated_bytes()
    }
}

impl Default for WorkerContext {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_is_seeded_from_worker_index() {
        let mut a = WorkerContext::new(3);
        let mut b = WorkerContext::new(3);
        let mut c = WorkerContext::new(4);
        let va = a.rng().uniform_u32();
        assert_eq!(va, b.rng().uniform_u32());
        assert_ne!(va, c.rng().uniform_u32());
        assert_eq!(a.seed(), 3);
    }

    #[test]
    fn reset_keeps_the_rng_state() {
        let mut ctx = WorkerContext::new(1);
        ctx.rng().uniform_u32();
        let _ = ctx.arena.alloc([0u64; 64]);
        assert!(ctx.allocated_bytes() >= 512);
        ctx.reset();

        let mut fresh = RNG::new(1);
        fresh.uniform_u32();
        assert_eq!(ctx.rng().uniform_u32(), fresh.uniform_u32());
    }
}
