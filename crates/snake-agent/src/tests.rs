//! Unit tests for snake-agent.

use snake_core::{AgentId, Direction, Position};

use crate::{Agent, AgentSpec, AutoPilot, Controller, HumanController, Keymap};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn auto_spec(start: Position, length: usize) -> AgentSpec {
    AgentSpec {
        controller: Controller::Auto(AutoPilot::new()),
        start,
        heading: Direction::Right,
        speed: 1,
        length,
    }
}

// ── BodyRing ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod body {
    use snake_core::Position;

    use crate::BodyRing;

    fn p(x: i32) -> Position {
        Position::new(x, 0)
    }

    #[test]
    fn starts_stacked() {
        let ring = BodyRing::new(p(3), 4);
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.head(), p(3));
        assert_eq!(ring.tail(), p(3));
        assert!(!ring.tail_is_vacated());
        assert_eq!(BodyRing::new(p(0), 0).len(), 1);
    }

    #[test]
    fn advance_overwrites_oldest() {
        let mut ring = BodyRing::new(p(0), 3);
        assert_eq!(ring.advance(p(1)), p(0));
        assert_eq!(ring.advance(p(2)), p(0));
        assert_eq!(ring.advance(p(3)), p(0));
        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![p(1), p(2), p(3)]);
        assert_eq!(ring.head(), p(3));
        assert_eq!(ring.tail(), p(1));
        assert!(ring.tail_is_vacated());
        assert_eq!(ring.advance(p(4)), p(1));
        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![p(2), p(3), p(4)]);
    }

    #[test]
    fn grow_duplicates_tail_without_moving_segments() {
        let mut ring = BodyRing::new(p(0), 3);
        for x in 1..=4 {
            ring.advance(p(x));
        }
        // Oldest → newest: 2, 3, 4.
        ring.grow();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![p(2), p(2), p(3), p(4)]);
        assert_eq!(ring.head(), p(4));
        assert!(!ring.tail_is_vacated());

        // The next step keeps cell 2 occupied; the one after frees it.
        assert_eq!(ring.advance(p(5)), p(2));
        assert!(ring.contains(p(2)));
        assert!(ring.tail_is_vacated());
        assert_eq!(ring.advance(p(6)), p(2));
        assert!(!ring.contains(p(2)));
        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![p(3), p(4), p(5), p(6)]);
    }

    #[test]
    fn iterator_is_exact_size() {
        let ring = BodyRing::new(p(0), 5);
        let mut it = ring.iter();
        assert_eq!(it.len(), 5);
        it.next();
        assert_eq!(it.len(), 4);
        assert_eq!((&ring).into_iter().count(), 5);
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod agent {
    use super::*;
    use crate::length_factor;

    #[test]
    fn length_factor_follows_ceil_log2() {
        let expected =
            [(1, 1), (2, 1), (3, 2), (4, 2), (5, 3), (8, 3), (9, 4), (16, 4), (17, 5), (1024, 10)];
        for (len, factor) in expected {
            assert_eq!(length_factor(len), factor, "len {len}");
        }
    }

    #[test]
    fn step_cost_scales_with_speed_and_length() {
        let spec = AgentSpec { speed: 3, ..auto_spec(Position::ORIGIN, 4) };
        let mut a = Agent::new(AgentId(0), spec);
        assert_eq!(a.step_cost(), 6);
        a.lengthen();
        assert_eq!(a.step_cost(), 9);
        assert_eq!(a.foods_eaten(), 1);
    }

    #[test]
    fn speed_never_drops_below_one() {
        let spec = AgentSpec { speed: 2, ..auto_spec(Position::ORIGIN, 1) };
        let mut a = Agent::new(AgentId(0), spec);
        a.faster();
        a.faster();
        assert_eq!(a.speed, 1);
        a.slower();
        assert_eq!(a.speed, 2);
    }

    #[test]
    fn stay_heading_defaults_to_right() {
        let spec = AgentSpec { heading: Direction::Stay, ..auto_spec(Position::ORIGIN, 2) };
        let a = Agent::new(AgentId(1), spec);
        assert_eq!(a.prev_dir, Direction::Right);
    }

    #[test]
    fn spec_constructors_use_defaults() {
        let auto = AgentSpec::auto(Position::new(3, 4), Direction::Up);
        assert_eq!((auto.speed, auto.length), (crate::DEFAULT_SPEED, crate::DEFAULT_LENGTH));
        let controller = HumanController::new(Keymap::wasd());
        let human = AgentSpec::human(Position::ORIGIN, Direction::Left, controller)
            .with_speed(3)
            .with_length(2);
        assert!(human.controller.as_human().is_some());
        assert_eq!((human.speed, human.length), (3, 2));
    }
}

// ── Human controller ──────────────────────────────────────────────────────────

#[cfg(test)]
mod human {
    use futures::stream;

    use snake_core::Key;
    use snake_spatial::Grid;
    use snake_sync::Lockstep;

    use super::*;
    use crate::StepContext;

    fn ctx(grid: &Grid, prev_dir: Direction) -> StepContext<'_> {
        StepContext { grid, head: Position::ORIGIN, prev_dir, body_len: 4, speed: 1 }
    }

    #[test]
    fn keymap_maps_four_keys() {
        let k = Keymap::wasd();
        assert_eq!(k.direction(Key::ascii('w')), Some(Direction::Up));
        assert_eq!(k.direction(Key::ascii('d')), Some(Direction::Right));
        assert_eq!(k.direction(Key::ascii('x')), None);
        assert_eq!(Keymap::default().direction(Key::ARROW_LEFT), Some(Direction::Left));
    }

    #[test]
    fn reversal_gives_up_the_turn() {
        let grid = Grid::new(10, 10);
        let human = HumanController::new(Keymap::wasd());
        assert!(human.apply_key(Key::ascii('a')));
        assert_eq!(human.propose_direction(&ctx(&grid, Direction::Right)), Direction::Stay);
        assert_eq!(human.propose_direction(&ctx(&grid, Direction::Up)), Direction::Left);
    }

    #[test]
    fn placement_seeds_intent_with_heading() {
        let human = HumanController::new(Keymap::default());
        let spec = AgentSpec::human(Position::ORIGIN, Direction::Left, human.clone());
        let a = Agent::new(AgentId(0), spec);
        assert_eq!(human.intent(), Direction::Left);
        let grid = Grid::new(10, 10);
        assert_eq!(human.propose_direction(&ctx(&grid, a.prev_dir)), Direction::Left);
    }

    #[test]
    fn clones_share_intent() {
        let human = HumanController::new(Keymap::default());
        let respawned = Controller::Human(human.clone()).fresh();
        human.apply_key(Key::ARROW_DOWN);
        assert_eq!(respawned.as_human().unwrap().intent(), Direction::Down);
    }

    #[tokio::test(start_paused = true)]
    async fn listen_follows_the_last_mapped_key() {
        let lock = Lockstep::new();
        let human = HumanController::new(Keymap::wasd());
        let listener = human.clone().listen(lock.register());
        let keys = [Key::ascii('w'), Key::ascii('q'), Key::ascii('a'), Key(999)];
        tokio::join!(lock.consume(stream::iter(keys)), listener);
        assert_eq!(human.intent(), Direction::Left);
    }
}

// ── Autopilot ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod autopilot {
    use snake_core::Consumable;
    use snake_spatial::{Grid, Tile};

    use super::*;

    fn placed(grid: &mut Grid, spec: AgentSpec) -> Agent {
        let a = Agent::new(AgentId(0), spec);
        grid.occupy(a.head(), Tile::Body(a.id));
        a
    }

    #[test]
    fn heads_for_food_at_speed_one() {
        let mut g = Grid::new(10, 10);
        g.occupy(Position::new(5, 2), Tile::Consumable(Consumable::Food));
        g.occupy(Position::new(2, 5), Tile::Consumable(Consumable::Faster));
        let mut a = placed(&mut g, auto_spec(Position::new(2, 2), 1));
        assert_eq!(a.propose_direction(&g), Direction::Right);
    }

    #[test]
    fn slow_autopilot_hunts_faster() {
        let mut g = Grid::new(10, 10);
        g.occupy(Position::new(5, 2), Tile::Consumable(Consumable::Food));
        g.occupy(Position::new(2, 5), Tile::Consumable(Consumable::Faster));
        let mut a = placed(&mut g, AgentSpec { speed: 4, ..auto_spec(Position::new(2, 2), 1) });
        assert_eq!(a.propose_direction(&g), Direction::Down);
    }

    #[test]
    fn replans_when_target_vanishes() {
        let mut g = Grid::new(10, 10);
        let food_a = Position::new(6, 2);
        g.occupy(food_a, Tile::Consumable(Consumable::Food));
        let mut a = placed(&mut g, auto_spec(Position::new(2, 2), 1));
        assert_eq!(a.propose_direction(&g), Direction::Right);

        // Someone else eats it; new food appears below.
        g.clear(food_a);
        g.occupy(Position::new(2, 4), Tile::Consumable(Consumable::Food));
        assert_eq!(a.propose_direction(&g), Direction::Down);
        if let Controller::Auto(pilot) = &a.controller {
            assert_eq!(pilot.route().target, Some(Position::new(2, 4)));
            assert_eq!(pilot.route().len(), 1);
        }
    }

    #[test]
    fn replans_when_next_step_is_blocked() {
        // Tall board so the way round through the top edge is never shorter.
        let mut g = Grid::new(10, 20);
        g.occupy(Position::new(2, 6), Tile::Consumable(Consumable::Food));
        let mut a = placed(&mut g, auto_spec(Position::new(2, 2), 1));
        assert_eq!(a.propose_direction(&g), Direction::Down);

        // Pretend we did not move, but a body now blocks straight down.
        g.occupy(Position::new(2, 3), Tile::Body(AgentId(7)));
        let d = a.propose_direction(&g);
        assert!(d == Direction::Left || d == Direction::Right, "{d}");
    }

    #[test]
    fn escapes_when_nothing_is_reachable() {
        let mut g = Grid::new(10, 10);
        let spec = AgentSpec { heading: Direction::Up, ..auto_spec(Position::new(5, 5), 6) };
        let mut a = placed(&mut g, spec);
        assert_eq!(a.propose_direction(&g), Direction::Up);
        if let Controller::Auto(pilot) = &a.controller {
            assert_eq!(pilot.route().target, None);
            assert_eq!(pilot.route().len(), 2);
        }
    }

    #[test]
    fn gives_up_when_boxed_in() {
        let mut g = Grid::new(10, 10);
        let head = Position::new(5, 5);
        for dir in Direction::CARDINALS {
            let n = head.offset(dir);
            g.occupy(n, Tile::Body(AgentId(9)));
        }
        let mut a = placed(&mut g, auto_spec(head, 4));
        assert_eq!(a.propose_direction(&g), Direction::Stay);
    }
}
