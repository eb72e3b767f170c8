use super::bucket::Bucket;
use crate::cards::*;
use crate::gameplay::Game;
use rand::Rng;

/// One sampled realisation of every hidden card in a hand.
///
/// Known pockets are kept; unknown pockets of live seats are dealt from the
/// remaining deck, and the board is completed to the river. Boards are kept
/// per street so that a subgame can reveal them one street at a time.
///
/// Buckets are filled in afterwards by the [`Pool`](super::Pool), which
/// computes equity once per distinct observation rather than once per world.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    holes: Vec<Option<Hole>>,
    boards: [Board; 4],
    buckets: Vec<[Bucket; 4]>,
    strengths: Vec<Strength>,
}

impl World {
    /// Deals the hidden cards of `game`. `None` if the deck runs dry,
    /// which a validated game with at most ten seats never does.
    pub fn deal<R: Rng>(game: &Game, rng: &mut R) -> Option<Self> {
        let known = game
            .seats()
            .iter()
            .map(|s| s.pocket().hand())
            .fold(Hand::from(game.board()), Hand::add);
        let mut deck = Deck::without(known);
        let holes = game
            .seats()
            .iter()
            .map(|seat| match (seat.pocket().hole(), seat.state().is_active()) {
                (Some(hole), _) => Some(Some(hole)),
                (None, true) => deck.hole(rng).map(Some),
                (None, false) => Some(None),
            })
            .collect::<Option<Vec<_>>>()?;
        let mut boards = [game.board(); 4];
        let mut board = game.board();
        for &street in Street::all() {
            if street > board.street() {
                let cards = deck.deal(street.n_observed() - board.size(), rng)?;
                board = board.extend(cards).ok()?;
            }
            boards[street as usize] = board;
        }
        let river = Hand::from(boards[Street::Rive as usize]);
        let strengths = holes
            .iter()
            .map(|hole| hole.map(Hand::from).unwrap_or_default())
            .map(|pocket| Strength::from(Hand::add(pocket, river)))
            .collect();
        Some(Self {
            buckets: vec![[Bucket::default(); 4]; holes.len()],
            holes,
            boards,
            strengths,
        })
    }

    /// Every (hole, board) pair this world needs a bucket for.
    pub fn observations(&self, streets: &[Street]) -> Vec<Observation> {
        self.holes
            .iter()
            .flatten()
            .flat_map(|hole| streets.iter().map(move |s| (*hole, *s)))
            .map(|(hole, street)| Observation::from((hole, self.board(street))))
            .collect()
    }

    /// Assigns buckets for the given streets through a lookup.
    pub fn classify<F>(&mut self, streets: &[Street], lookup: F)
    where
        F: Fn(&Observation) -> Bucket,
    {
        for (seat, hole) in self.holes.iter().enumerate() {
            if let Some(hole) = hole {
                for &street in streets {
                    let observation = Observation::from((*hole, self.boards[street as usize]));
                    self.buckets[seat][street as usize] = lookup(&observation);
                }
            }
        }
    }
}

impl World {
    pub fn hole(&self, seat: usize) -> Option<Hole> {
        self.holes.get(seat).copied().flatten()
    }
    /// The board as it stands once `street` is dealt.
    pub fn board(&self, street: Street) -> Board {
        self.boards[street as usize]
    }
    pub fn runout(&self) -> Board {
        self.board(Street::Rive)
    }
    pub fn bucket(&self, seat: usize, street: Street) -> Bucket {
        self.buckets
            .get(seat)
            .map(|b| b[street as usize])
            .unwrap_or_default()
    }
    /// Showdown strength of every seat on the complete board.
    pub fn strengths(&self) -> &[Strength] {
        &self.strengths
    }
}
