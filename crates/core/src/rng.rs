//! RNG module - seeded randomness for spawning.
//!
//! A small LCG drives both the spawn-column choice and a 7-bag piece
//! randomizer: each bag holds one of every kind, shuffled, and draws refill
//! the bag when it empties. Everything is deterministic per seed, which is
//! what the tests lean on.

use blockfall_types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG.
/// Uses constants from Numerical Recipes.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u32) -> Self {
        // Avoid a 0 seed which would produce all zeros.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate the next random u32.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate a random value in [0, max).
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    bag: [PieceKind; 7],
    bag_index: usize,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed.
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        queue.refill_bag();
        queue
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece kind, refilling the bag when exhausted.
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }
        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        kind
    }

    /// The kind the next `draw` will return, without consuming it.
    pub fn peek(&self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            // The refill shuffle has not happened yet; report the first kind
            // of the fresh bag a draw would produce.
            let mut copy = self.clone();
            copy.refill_bag();
            copy.bag[0]
        } else {
            self.bag[self.bag_index]
        }
    }
}
