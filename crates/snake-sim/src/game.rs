//! `Game` — the assembled arena and its top-level run loop.

use std::cell::RefCell;
use std::sync::Arc;

use futures::future::{join_all, pending, select_all};
use futures::stream::LocalBoxStream;
use snake_agent::HumanController;
use snake_core::Key;
use snake_sync::{Lockstep, LockstepConsumer};
use tokio::sync::watch;
use tracing::info;

use crate::{GameObserver, GameOutcome, GameReport, Spawner, TurnScheduler, World};

// ── StopHandle ────────────────────────────────────────────────────────────────

/// Requests an early end to a running game.
///
/// Cheap to clone and `Send`, so it can be handed to a signal handler or
/// another thread.  The game notices the request at its next suspension
/// point (at the latest, during the next pacing pause) and ends with
/// [`GameOutcome::Interrupted`].
#[derive(Clone, Debug)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    fn new() -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        (Self { tx: Arc::new(tx) }, rx)
    }

    pub fn request_stop(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_stop_requested(&self) -> bool {
        *self.tx.borrow()
    }
}

async fn stop_requested(mut rx: watch::Receiver<bool>) {
    if rx.wait_for(|stop| *stop).await.is_err() {
        pending::<()>().await;
    }
}

// ── Game ──────────────────────────────────────────────────────────────────────

/// A ready-to-run game.  Build with [`GameBuilder`][crate::GameBuilder].
pub struct Game {
    pub(crate) world: World,
    pub(crate) scheduler: TurnScheduler,
    pub(crate) spawners: Vec<Spawner>,
    pub(crate) input: Option<LocalBoxStream<'static, Key>>,
    pub(crate) lockstep: Lockstep<Key>,
    pub(crate) listeners: Vec<(HumanController, LockstepConsumer<Key>)>,
    pub(crate) stop: StopHandle,
    pub(crate) stop_rx: watch::Receiver<bool>,
}

impl Game {
    pub(crate) fn assemble(
        world: World,
        scheduler: TurnScheduler,
        spawners: Vec<Spawner>,
        input: Option<LocalBoxStream<'static, Key>>,
    ) -> Self {
        let (stop, stop_rx) = StopHandle::new();
        Self {
            world,
            scheduler,
            spawners,
            input,
            lockstep: Lockstep::new(),
            listeners: Vec::new(),
            stop,
            stop_rx,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Subscribe `controller` to the key stream.  Every key is delivered to
    /// all subscribers in lockstep.
    pub fn register_controller(&mut self, controller: HumanController) {
        let consumer = self.lockstep.register();
        self.listeners.push((controller, consumer));
    }

    /// An extra lockstep consumer of the key stream (e.g. for a renderer's
    /// own hotkeys).  It must keep pulling, or the other consumers stall.
    pub fn subscribe_keys(&self) -> LockstepConsumer<Key> {
        self.lockstep.register()
    }

    /// Run the scheduler, the spawners, the key broadcaster and every human
    /// listener on the current task until one of them ends the game or a
    /// stop is requested.
    pub async fn run_until_game_over<O: GameObserver>(self, observer: &mut O) -> GameReport {
        let Game {
            world,
            mut scheduler,
            mut spawners,
            input,
            lockstep,
            listeners,
            stop: _stop,
            stop_rx,
        } = self;
        let world = RefCell::new(world);

        info!(
            agents = world.borrow().roster.len(),
            spawners = spawners.len(),
            humans = listeners.len(),
            "game started"
        );

        let outcome = {
            let broadcast = async {
                if let Some(source) = input {
                    lockstep.consume(source).await;
                }
                pending::<GameOutcome>().await
            };
            let listen = async {
                join_all(listeners.into_iter().map(|(human, keys)| human.listen(keys))).await;
                pending::<GameOutcome>().await
            };
            let spawn = async {
                if spawners.is_empty() {
                    return pending::<GameOutcome>().await;
                }
                select_all(spawners.iter_mut().map(|s| Box::pin(s.run(&world)))).await.0
            };

            tokio::select! {
                biased;
                () = stop_requested(stop_rx) => GameOutcome::Interrupted,
                outcome = scheduler.run(&world, observer) => outcome,
                outcome = spawn => outcome,
                outcome = broadcast => outcome,
                outcome = listen => outcome,
            }
        };

        lockstep.stop();
        scheduler.refresh(&world, observer);
        let world = world.into_inner();
        let report = GameReport {
            outcome,
            final_tick: scheduler.timeline(),
            iterations: scheduler.iterations(),
            agents: world.stats(),
        };
        info!(
            outcome = %report.outcome,
            tick = %report.final_tick,
            iterations = report.iterations,
            claims = spawners.iter().map(Spawner::claims).sum::<u64>(),
            "game over"
        );
        observer.on_game_over(&report);
        report
    }
}
