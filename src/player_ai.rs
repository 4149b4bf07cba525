use rand::rngs::SmallRng;

use crate::{
    ai,
    player::{Action, Player, TargetView},
};

/// Player that fires wherever the targeting advisor suggests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AiPlayer;

impl AiPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for AiPlayer {
    fn select_action(&mut self, rng: &mut SmallRng, view: &TargetView) -> Action {
        match ai::calc_pdf_and_guess(&view.hits, &view.misses, &view.remaining, rng) {
            Some((r, c)) => Action::Fire(r, c),
            None => Action::Quit,
        }
    }
}
