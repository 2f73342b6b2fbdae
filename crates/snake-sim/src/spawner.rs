//! Consumable spawners.
//!
//! A spawner runs a claim loop for the whole game:
//!
//! 1. pick a random free block and fill it with its consumable,
//! 2. wait on every cell of the block at once,
//! 3. once a claim arrives, collect any others already made, drop the
//!    remaining waits and clear what is left of the block,
//! 4. apply the effect to the earliest claimant and start over.
//!
//! Only one block per spawner is ever on the board.

use std::cell::RefCell;

use futures::FutureExt;
use futures::future::select_all;
use snake_core::{Consumable, Position, SimRng, SpawnerConfig};
use snake_spatial::{SpatialError, Tile};
use tracing::{debug, info, warn};

use crate::{Claim, GameOutcome, World};

pub struct Spawner {
    config: SpawnerConfig,
    rng: SimRng,
    attempts: u32,
    claims: u64,
}

impl Spawner {
    pub fn new(config: SpawnerConfig, rng: SimRng, attempts: u32) -> Self {
        Self { config, rng, attempts, claims: 0 }
    }

    pub fn kind(&self) -> Consumable {
        self.config.kind
    }

    /// Blocks claimed so far.
    pub fn claims(&self) -> u64 {
        self.claims
    }

    /// Place one block.  Fails when no free block can be found.
    pub fn place(&mut self, world: &mut World) -> Result<Position, SpatialError> {
        let SpawnerConfig { kind, width, height } = self.config;
        let origin = world.grid.random_free_rect(&mut self.rng, self.attempts, width, height)?;
        world.grid.occupy_rect(origin, width, height, Tile::Consumable(kind));
        debug!(%kind, %origin, "consumable placed");
        Ok(origin)
    }

    /// Run the claim loop.  Returns only when the game should end.
    pub async fn run(&mut self, world: &RefCell<World>) -> GameOutcome {
        let SpawnerConfig { kind, width, height } = self.config;
        loop {
            let (origin, waiters) = {
                let mut w = world.borrow_mut();
                let origin = match self.place(&mut w) {
                    Ok(origin) => origin,
                    Err(e) => {
                        info!(%kind, error = %e, "no room for another block");
                        return GameOutcome::BoardFull { winner: None };
                    }
                };
                let cells: Vec<Position> = w.grid.rect_cells(origin, width, height).collect();
                let waiters: Vec<_> = cells.into_iter().map(|p| w.waits.wait(p)).collect();
                (origin, waiters)
            };

            // Several heads may land on the block before this task runs
            // again; the lowest index is not necessarily the first.
            let (ready, _, rest) = select_all(waiters).await;
            let claimant = rest
                .into_iter()
                .filter_map(|waiter| waiter.now_or_never().flatten())
                .chain(ready)
                .min_by_key(|claim| claim.seq);

            let mut w = world.borrow_mut();
            w.waits.prune();
            w.grid.clear_rect_if(origin, width, height, Tile::Consumable(kind));
            let Some(Claim { agent, .. }) = claimant else {
                warn!(%kind, %origin, "wait cancelled without a claimant");
                continue;
            };
            self.claims += 1;
            debug!(%kind, %agent, claims = self.claims, "consumable claimed");
            if let Some(outcome) = w.apply_effect(agent, kind) {
                return outcome;
            }
        }
    }
}
