//! RNG module - 7-bag piece generation with a lookahead queue
//!
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled.
//! Pieces are dealt from the bag until it is empty, then a fresh bag is
//! shuffled. A fixed-length lookahead queue sits in front of the bag so the
//! upcoming pieces can be shown to the player.
//!
//! Also provides a simple LCG so a seed reproduces the same sequence.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{PieceKind, DEFAULT_PREVIEW_COUNT, MAX_PREVIEW_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator with a lookahead queue
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    /// Remaining pieces of the current bag, drawn from the back
    bag: ArrayVec<PieceKind, 7>,
    /// Upcoming pieces, front first
    queue: ArrayVec<PieceKind, MAX_PREVIEW_COUNT>,
    preview_count: usize,
    rng: SimpleRng,
}

impl PieceGenerator {
    /// Create a generator with the default preview length
    pub fn new(seed: u32) -> Self {
        Self::with_preview(seed, DEFAULT_PREVIEW_COUNT)
    }

    /// Create a generator showing `preview_count` upcoming pieces
    /// (clamped to `1..=MAX_PREVIEW_COUNT`)
    pub fn with_preview(seed: u32, preview_count: usize) -> Self {
        let mut generator = Self {
            bag: ArrayVec::new(),
            queue: ArrayVec::new(),
            preview_count: preview_count.clamp(1, MAX_PREVIEW_COUNT),
            rng: SimpleRng::new(seed),
        };
        while generator.queue.len() < generator.preview_count {
            let kind = generator.draw_from_bag();
            generator.queue.push(kind);
        }
        generator
    }

    /// Shuffle a fresh bag, deal its first kind and keep the rest.
    fn start_new_bag(&mut self) -> PieceKind {
        let mut bag = PieceKind::ALL;
        self.rng.shuffle(&mut bag);
        let [first, rest @ ..] = bag;
        // Stored reversed so pop() deals the shuffled order front to back.
        self.bag.clear();
        self.bag.extend(rest.into_iter().rev());
        first
    }

    fn draw_from_bag(&mut self) -> PieceKind {
        match self.bag.pop() {
            Some(kind) => kind,
            None => self.start_new_bag(),
        }
    }

    /// Take the front of the lookahead queue as a piece at the spawn anchor,
    /// topping the queue back up from the bag.
    pub fn get_next_piece(&mut self) -> Piece {
        let kind = self.queue.remove(0);
        let refill = self.draw_from_bag();
        self.queue.push(refill);
        Piece::new(kind)
    }

    /// Upcoming pieces, front first
    pub fn peek_next_pieces(&self) -> &[PieceKind] {
        &self.queue
    }

    pub fn preview_count(&self) -> usize {
        self.preview_count
    }

    /// Current bag remainder, in deal order (for testing/debugging)
    #[cfg(test)]
    pub fn current_bag(&self) -> Vec<PieceKind> {
        self.bag.iter().rev().copied().collect()
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..20 {
            for _ in 0..50 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_queue_holds_preview_count() {
        let mut generator = PieceGenerator::with_preview(1, 3);
        assert_eq!(generator.peek_next_pieces().len(), 3);

        for _ in 0..20 {
            generator.get_next_piece();
            assert_eq!(generator.peek_next_pieces().len(), 3);
        }
    }

    #[test]
    fn test_preview_count_is_clamped() {
        assert_eq!(PieceGenerator::with_preview(1, 0).preview_count(), 1);
        assert_eq!(
            PieceGenerator::with_preview(1, 99).preview_count(),
            MAX_PREVIEW_COUNT
        );
    }

    #[test]
    fn test_peek_matches_next_draw() {
        let mut generator = PieceGenerator::new(42);
        let upcoming: Vec<PieceKind> = generator.peek_next_pieces().to_vec();
        for kind in upcoming {
            assert_eq!(generator.get_next_piece().kind, kind);
        }
    }

    #[test]
    fn test_initial_bag_partially_consumed_by_queue() {
        let generator = PieceGenerator::with_preview(1, 3);
        assert_eq!(generator.current_bag().len(), 4);
    }

    #[test]
    fn test_first_seven_draws_are_a_permutation() {
        let mut generator = PieceGenerator::new(1);
        let mut drawn: Vec<PieceKind> = (0..7).map(|_| generator.get_next_piece().kind).collect();
        drawn.sort_by_key(|k| k.id());
        assert_eq!(drawn, PieceKind::ALL.to_vec());
    }

    #[test]
    fn test_draws_follow_the_shuffled_bag_order() {
        let mut expected = PieceKind::ALL;
        SimpleRng::new(99).shuffle(&mut expected);

        let mut generator = PieceGenerator::new(99);
        let drawn: Vec<PieceKind> = (0..7).map(|_| generator.get_next_piece().kind).collect();
        assert_eq!(drawn, expected.to_vec());
    }

    #[test]
    fn test_bag_empties_then_starts_over() {
        let mut generator = PieceGenerator::with_preview(3, 1);
        for _ in 0..6 {
            generator.get_next_piece();
        }
        assert!(generator.current_bag().is_empty());

        generator.get_next_piece();
        assert_eq!(generator.current_bag().len(), 6);
    }

    #[test]
    fn test_pieces_spawn_at_anchor() {
        let mut generator = PieceGenerator::new(5);
        let piece = generator.get_next_piece();
        assert_eq!((piece.x, piece.y), crate::types::SPAWN_POSITION);
        assert_eq!(piece.rotation.index(), 0);
    }
}
