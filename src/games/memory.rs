//! Memory matching game
//!
//! 16 face-down cards, each symbol twice. Flip two per turn: a match stays
//! face up and pays out, a mismatch is shown briefly then hidden again.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::Reward;
use crate::consts::*;

/// Cards per round
pub const DECK_SIZE: usize = MEMORY_ITEMS.len() * 2;

/// Which side of a card is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardFace {
    Down,
    Up,
    Matched,
}

/// A card on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Index into `MEMORY_ITEMS`
    pub symbol: u8,
    pub face: CardFace,
}

impl Card {
    pub fn symbol_str(&self) -> &'static str {
        MEMORY_ITEMS[self.symbol as usize]
    }
}

/// What a flip did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlipOutcome {
    /// Locked, out of range, or card not face down
    Ignored,
    /// First card of a pair turned up
    Revealed { pos: usize },
    /// Second card matched the first
    Matched {
        first: usize,
        second: usize,
        reward: Reward,
        /// Last pair found; bonus claimable after `CELEBRATION_DELAY_MS`
        round_complete: bool,
    },
    /// Second card differs; call `hide_mismatch` after `hide_after_ms`
    Mismatched {
        first: usize,
        second: usize,
        hide_after_ms: u32,
    },
}

/// One round of the memory game
#[derive(Debug, Clone, Serialize)]
pub struct MemoryGame {
    cards: Vec<Card>,
    /// Face-up, unmatched positions (0-2)
    face_up: Vec<usize>,
    matched_pairs: u32,
    /// No flips accepted while set
    locked: bool,
    bonus_pending: bool,
}

impl MemoryGame {
    /// Deal a freshly shuffled round
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut game = Self {
            cards: Vec::with_capacity(DECK_SIZE),
            face_up: Vec::with_capacity(2),
            matched_pairs: 0,
            locked: false,
            bonus_pending: false,
        };
        game.reset(rng);
        game
    }

    /// Throw away the current round and deal a new one
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.cards.clear();
        for _ in 0..2 {
            for symbol in 0..MEMORY_ITEMS.len() {
                self.cards.push(Card {
                    symbol: symbol as u8,
                    face: CardFace::Down,
                });
            }
        }
        self.cards.shuffle(rng);
        self.face_up.clear();
        self.matched_pairs = 0;
        self.locked = false;
        self.bonus_pending = false;
        log::debug!("Memory round dealt");
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn symbol_at(&self, pos: usize) -> Option<&'static str> {
        self.cards.get(pos).map(Card::symbol_str)
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs as usize == MEMORY_ITEMS.len()
    }

    /// Turn a card face up
    pub fn flip(&mut self, pos: usize) -> FlipOutcome {
        if self.locked {
            return FlipOutcome::Ignored;
        }
        match self.cards.get(pos) {
            Some(card) if card.face == CardFace::Down => {}
            _ => return FlipOutcome::Ignored,
        }

        self.cards[pos].face = CardFace::Up;
        self.face_up.push(pos);

        if self.face_up.len() < 2 {
            return FlipOutcome::Revealed { pos };
        }

        self.locked = true;
        self.evaluate_pair()
    }

    fn evaluate_pair(&mut self) -> FlipOutcome {
        let (first, second) = (self.face_up[0], self.face_up[1]);

        if self.cards[first].symbol != self.cards[second].symbol {
            return FlipOutcome::Mismatched {
                first,
                second,
                hide_after_ms: MISMATCH_REVEAL_MS,
            };
        }

        self.cards[first].face = CardFace::Matched;
        self.cards[second].face = CardFace::Matched;
        self.matched_pairs += 1;
        self.face_up.clear();
        self.locked = false;

        let round_complete = self.is_complete();
        if round_complete {
            self.bonus_pending = true;
            log::info!("Memory round complete");
        }

        FlipOutcome::Matched {
            first,
            second,
            reward: Reward::new(PAIR_XP, PAIR_GOLD),
            round_complete,
        }
    }

    /// Turn a mismatched pair back down and unlock. Returns false if no
    /// mismatch was waiting.
    pub fn hide_mismatch(&mut self) -> bool {
        if !self.locked || self.face_up.len() != 2 {
            return false;
        }
        for pos in self.face_up.drain(..) {
            self.cards[pos].face = CardFace::Down;
        }
        self.locked = false;
        true
    }

    /// Take the round-complete bonus. Yields it once per round.
    pub fn claim_completion_bonus(&mut self) -> Option<Reward> {
        if !self.bonus_pending {
            return None;
        }
        self.bonus_pending = false;
        Some(Reward::new(MEMORY_BONUS_XP, MEMORY_BONUS_GOLD))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn game(seed: u64) -> MemoryGame {
        MemoryGame::new(&mut Pcg32::seed_from_u64(seed))
    }

    /// Positions holding `symbol`
    fn pair_of(game: &MemoryGame, symbol: u8) -> (usize, usize) {
        let mut positions = game
            .cards()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.symbol == symbol)
            .map(|(i, _)| i);
        (positions.next().unwrap(), positions.next().unwrap())
    }

    /// Two positions with different symbols
    fn mismatch(game: &MemoryGame) -> (usize, usize) {
        let first = game.cards()[0].symbol;
        let other = game.cards().iter().position(|c| c.symbol != first).unwrap();
        (0, other)
    }

    #[test]
    fn test_every_symbol_twice() {
        for seed in 0..20 {
            let g = game(seed);
            assert_eq!(g.cards().len(), DECK_SIZE);
            for symbol in 0..MEMORY_ITEMS.len() as u8 {
                let count = g.cards().iter().filter(|c| c.symbol == symbol).count();
                assert_eq!(count, 2);
            }
            assert!(g.cards().iter().all(|c| c.face == CardFace::Down));
        }
    }

    #[test]
    fn test_shuffle_depends_on_seed() {
        let a = game(1);
        let b = game(1);
        let c = game(2);
        assert_eq!(a.cards(), b.cards());
        // Not a proof, but 16!/2^8 orderings make a collision vanishingly rare
        assert_ne!(a.cards(), c.cards());
    }

    #[test]
    fn test_same_card_twice_is_not_a_pair() {
        let mut g = game(3);
        assert_eq!(g.flip(5), FlipOutcome::Revealed { pos: 5 });
        assert_eq!(g.flip(5), FlipOutcome::Ignored);
        assert!(!g.is_locked());
        assert_eq!(g.matched_pairs(), 0);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut g = game(3);
        assert_eq!(g.flip(DECK_SIZE), FlipOutcome::Ignored);
    }

    #[test]
    fn test_match_pays_and_unlocks() {
        let mut g = game(4);
        let (a, b) = pair_of(&g, 2);
        g.flip(a);
        let outcome = g.flip(b);
        assert_eq!(
            outcome,
            FlipOutcome::Matched {
                first: a,
                second: b,
                reward: Reward::new(PAIR_XP, PAIR_GOLD),
                round_complete: false,
            }
        );
        assert!(!g.is_locked());
        assert_eq!(g.matched_pairs(), 1);
        assert_eq!(g.cards()[a].face, CardFace::Matched);
        // Matched cards can't be flipped again
        assert_eq!(g.flip(a), FlipOutcome::Ignored);
    }

    #[test]
    fn test_mismatch_locks_until_hidden() {
        let mut g = game(5);
        let (a, b) = mismatch(&g);
        g.flip(a);
        assert!(matches!(
            g.flip(b),
            FlipOutcome::Mismatched {
                hide_after_ms: MISMATCH_REVEAL_MS,
                ..
            }
        ));
        assert!(g.is_locked());

        // Third flip during the reveal is rejected
        let third = (0..DECK_SIZE).find(|&p| p != a && p != b).unwrap();
        assert_eq!(g.flip(third), FlipOutcome::Ignored);

        assert!(g.hide_mismatch());
        assert!(!g.is_locked());
        assert_eq!(g.cards()[a].face, CardFace::Down);
        assert_eq!(g.cards()[b].face, CardFace::Down);
        assert!(!g.hide_mismatch());
        assert_eq!(g.flip(third), FlipOutcome::Revealed { pos: third });
    }

    #[test]
    fn test_full_round_bonus_once() {
        let mut g = game(6);
        assert_eq!(g.claim_completion_bonus(), None);

        let mut last = FlipOutcome::Ignored;
        for symbol in 0..MEMORY_ITEMS.len() as u8 {
            let (a, b) = pair_of(&g, symbol);
            g.flip(a);
            last = g.flip(b);
        }
        assert!(matches!(
            last,
            FlipOutcome::Matched {
                round_complete: true,
                ..
            }
        ));
        assert!(g.is_complete());
        assert_eq!(
            g.claim_completion_bonus(),
            Some(Reward::new(MEMORY_BONUS_XP, MEMORY_BONUS_GOLD))
        );
        assert_eq!(g.claim_completion_bonus(), None);
    }

    #[test]
    fn test_reset_clears_round() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut g = MemoryGame::new(&mut rng);
        let (a, b) = mismatch(&g);
        g.flip(a);
        g.flip(b);
        assert!(g.is_locked());

        g.reset(&mut rng);
        assert!(!g.is_locked());
        assert_eq!(g.matched_pairs(), 0);
        assert!(g.cards().iter().all(|c| c.face == CardFace::Down));
        assert!(!g.hide_mismatch());
    }
}
