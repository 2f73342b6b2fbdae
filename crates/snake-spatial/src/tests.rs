//! Unit tests for snake-spatial.
//!
//! All tests build small boards by hand; body walls are written directly
//! into the grid.

#[cfg(test)]
mod helpers {
    use snake_core::{AgentId, Position};

    use crate::{Grid, Tile};

    pub const WALL: Tile = Tile::Body(AgentId(99));

    /// Surround `center` with body cells on all four sides.
    pub fn boxed_in(grid: &mut Grid, center: Position) {
        for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
            grid.occupy(Position::new(center.x + dx, center.y + dy), WALL);
        }
    }
}

// ── Grid occupancy & journal ──────────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use snake_core::{AgentId, Consumable, Direction, Position, SimRng};

    use crate::{Grid, SpatialError, Tile};

    #[test]
    fn empty_board() {
        let g = Grid::new(20, 10);
        assert_eq!(g.cell_count(), 200);
        assert_eq!(g.occupied_count(), 0);
        assert!(g.is_free(Position::new(3, 3)));
    }

    #[test]
    fn occupy_and_clear_round_trip() {
        let mut g = Grid::new(5, 5);
        let p = Position::new(2, 2);
        g.occupy(p, Tile::Body(AgentId(1)));
        assert_eq!(g.tile_at(p), Tile::Body(AgentId(1)));
        assert!(!g.is_free(p));
        g.clear(p);
        assert!(g.is_free(p));
        assert_eq!(g.occupied_count(), 0);
    }

    #[test]
    fn tile_lookup_wraps() {
        let mut g = Grid::new(5, 5);
        g.occupy(Position::new(0, 0), Tile::Consumable(Consumable::Food));
        assert_eq!(g.tile_at(Position::new(5, -5)), Tile::Consumable(Consumable::Food));
    }

    #[test]
    fn clear_if_respects_current_contents() {
        let mut g = Grid::new(5, 5);
        let p = Position::new(1, 1);
        let food = Tile::Consumable(Consumable::Food);
        g.occupy(p, Tile::Body(AgentId(0)));
        assert!(!g.clear_if(p, food));
        assert_eq!(g.tile_at(p), Tile::Body(AgentId(0)));
        assert!(g.clear_if(p, Tile::Body(AgentId(0))));
        assert!(g.is_free(p));
    }

    #[test]
    fn journal_records_only_real_changes() {
        let mut g = Grid::new(5, 5);
        let p = Position::new(1, 1);
        g.occupy(p, Tile::Body(AgentId(0)));
        g.occupy(p, Tile::Body(AgentId(0)));
        g.clear(Position::new(4, 4));
        g.clear(p);
        assert_eq!(
            g.drain_changes(),
            vec![(p, Tile::Body(AgentId(0))), (p, Tile::Empty)]
        );
        assert_eq!(g.pending_changes(), 0);
    }

    #[test]
    fn resolve_wraps_both_axes() {
        let g = Grid::new(20, 20);
        assert_eq!(g.resolve(Position::new(19, 0), Direction::Right), Position::new(0, 0));
        assert_eq!(g.resolve(Position::new(0, 0), Direction::Up), Position::new(0, 19));
        assert_eq!(g.resolve(Position::new(4, 4), Direction::Stay), Position::new(4, 4));
    }

    #[test]
    fn resolve_then_opposite_returns_home_without_portals() {
        let g = Grid::new(7, 5);
        for x in 0..7 {
            for y in 0..5 {
                let p = Position::new(x, y);
                for d in Direction::CARDINALS {
                    assert_eq!(g.resolve(g.resolve(p, d), d.opposite()), p, "{p} {d}");
                }
            }
        }
    }

    #[test]
    fn portal_applies_before_wrap() {
        let mut g = Grid::new(10, 10);
        // Leaving the left edge of row 5 lands mid-board instead of wrapping.
        g.add_portal(Position::new(-1, 5), Position::new(4, 4)).unwrap();
        g.add_portal(Position::new(2, 2), Position::new(8, 8)).unwrap();
        assert_eq!(g.resolve(Position::new(0, 5), Direction::Left), Position::new(4, 4));
        assert_eq!(g.resolve(Position::new(0, 6), Direction::Left), Position::new(9, 6));
        assert_eq!(g.resolve(Position::new(1, 2), Direction::Right), Position::new(8, 8));
    }

    #[test]
    fn portal_endpoints_are_validated() {
        let mut g = Grid::new(10, 10);
        assert!(matches!(
            g.add_portal(Position::new(0, 0), Position::new(10, 0)),
            Err(SpatialError::PortalOutOfBounds(_))
        ));
        assert!(g.add_portal(Position::new(-2, 0), Position::new(1, 1)).is_err());
        assert_eq!(g.portal_count(), 0);
    }

    #[test]
    fn rect_operations() {
        let mut g = Grid::new(6, 6);
        let food = Tile::Consumable(Consumable::Food);
        let origin = Position::new(1, 1);
        assert!(g.free_rect(origin, 2, 2));
        g.occupy_rect(origin, 2, 2, food);
        assert!(!g.free_rect(origin, 2, 2));
        assert!(!g.free_rect(Position::new(0, 0), 2, 2));
        assert_eq!(g.occupied_count(), 4);

        // One cell has been eaten and replaced by a body segment.
        g.occupy(Position::new(2, 2), Tile::Body(AgentId(3)));
        assert_eq!(g.clear_rect_if(origin, 2, 2, food), 3);
        assert_eq!(g.tile_at(Position::new(2, 2)), Tile::Body(AgentId(3)));
        assert_eq!(g.occupied_count(), 1);
    }

    #[test]
    fn random_free_finds_the_only_hole() {
        let mut g = Grid::new(3, 3);
        let hole = Position::new(2, 1);
        for x in 0..3 {
            for y in 0..3 {
                if Position::new(x, y) != hole {
                    g.occupy(Position::new(x, y), Tile::Body(AgentId(0)));
                }
            }
        }
        let mut rng = SimRng::new(7);
        assert_eq!(g.random_free(&mut rng, 10_000, |_| true).unwrap(), hole);
    }

    #[test]
    fn random_free_gives_up_on_full_board() {
        let mut g = Grid::new(2, 2);
        g.occupy_rect(Position::ORIGIN, 2, 2, Tile::Body(AgentId(0)));
        let mut rng = SimRng::new(7);
        assert!(matches!(
            g.random_free(&mut rng, 50, |_| true),
            Err(SpatialError::BoardFull { attempts: 50 })
        ));
        assert!(g.random_free_rect(&mut rng, 50, 1, 1).is_err());
    }

    #[test]
    fn random_free_rect_stays_on_board() {
        let g = Grid::new(4, 3);
        let mut rng = SimRng::new(11);
        for _ in 0..100 {
            let o = g.random_free_rect(&mut rng, 10, 2, 2).unwrap();
            assert!(o.x <= 2 && o.y <= 1, "{o}");
        }
        assert!(matches!(
            g.random_free_rect(&mut rng, 10, 5, 1),
            Err(SpatialError::RectTooLarge { .. })
        ));
    }
}

// ── Breadth-first routing ─────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use snake_core::{AgentId, Consumable, Direction, Position};

    use crate::{Grid, Tile, shortest_path_to};

    const FOOD: Tile = Tile::Consumable(Consumable::Food);

    fn walk(g: &Grid, mut p: Position, route: &crate::Route) -> Position {
        for d in route.directions() {
            p = g.resolve(p, d);
        }
        p
    }

    #[test]
    fn path_length_equals_torus_distance_on_empty_board() {
        let start = Position::new(2, 3);
        let targets =
            [Position::new(9, 3), Position::new(18, 17), Position::new(5, 12), Position::new(2, 4)];
        for target in targets {
            let mut g = Grid::new(20, 20);
            g.occupy(start, Tile::Body(AgentId(0)));
            g.occupy(target, FOOD);
            let route = shortest_path_to(&g, start, FOOD).unwrap();
            assert_eq!(route.target, Some(target));
            assert_eq!(route.len() as u32, start.torus_distance(target, 20, 20), "to {target}");
            assert_eq!(walk(&g, start, &route), target);
        }
    }

    #[test]
    fn next_step_is_last_element() {
        let mut g = Grid::new(10, 10);
        g.occupy(Position::new(3, 0), FOOD);
        let mut route = shortest_path_to(&g, Position::new(0, 0), FOOD).unwrap();
        assert_eq!(route.peek(), Some(Direction::Right));
        assert_eq!(route.pop(), Some(Direction::Right));
        assert_eq!(route.len(), 2);
    }

    #[test]
    fn ties_follow_cardinal_order() {
        // Two foods at equal distance: above and to the right.  Up is
        // expanded first.
        let mut g = Grid::new(10, 10);
        g.occupy(Position::new(5, 4), FOOD);
        g.occupy(Position::new(6, 5), FOOD);
        let route = shortest_path_to(&g, Position::new(5, 5), FOOD).unwrap();
        assert_eq!(route.target, Some(Position::new(5, 4)));
    }

    #[test]
    fn bodies_block_but_target_cell_terminates() {
        let mut g = Grid::new(5, 1);
        g.occupy(Position::new(1, 0), Tile::Body(AgentId(1)));
        g.occupy(Position::new(3, 0), FOOD);
        // Right is blocked at x=1; going left wraps 0→4→3.
        let route = shortest_path_to(&g, Position::new(0, 0), FOOD).unwrap();
        assert_eq!(route.directions().collect::<Vec<_>>(), vec![Direction::Left, Direction::Left]);
    }

    #[test]
    fn consumables_of_other_kinds_block() {
        let mut g = Grid::new(3, 1);
        g.occupy(Position::new(1, 0), Tile::Consumable(Consumable::Slower));
        g.occupy(Position::new(2, 0), Tile::Consumable(Consumable::Slower));
        g.occupy(Position::new(0, 0), Tile::Body(AgentId(0)));
        assert!(shortest_path_to(&g, Position::new(0, 0), FOOD).is_none());
    }

    #[test]
    fn routes_through_portals() {
        let mut g = Grid::new(20, 1);
        g.add_portal(Position::new(1, 0), Position::new(15, 0)).unwrap();
        g.occupy(Position::new(16, 0), FOOD);
        let route = shortest_path_to(&g, Position::new(0, 0), FOOD).unwrap();
        assert_eq!(route.len(), 2);
        assert_eq!(walk(&g, Position::new(0, 0), &route), Position::new(16, 0));
    }

    #[test]
    fn enclosed_agent_has_no_route() {
        let mut g = Grid::new(9, 9);
        let head = Position::new(4, 4);
        g.occupy(head, Tile::Body(AgentId(0)));
        super::helpers::boxed_in(&mut g, head);
        g.occupy(Position::new(0, 0), FOOD);
        assert!(shortest_path_to(&g, head, FOOD).is_none());
    }
}

// ── Local escape ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod escape {
    use snake_core::{Direction, Position};

    use crate::{ESCAPE_HORIZON, Grid, local_escape};

    use super::helpers::{WALL, boxed_in};

    #[test]
    fn goes_straight_on_open_board() {
        let g = Grid::new(30, 30);
        let moves = local_escape(&g, Position::new(5, 5), Direction::Up, 8);
        assert_eq!(moves, vec![Direction::Up; 4]);
    }

    #[test]
    fn horizon_is_capped() {
        let g = Grid::new(50, 50);
        assert_eq!(local_escape(&g, Position::ORIGIN, Direction::Right, 100).len(), ESCAPE_HORIZON);
        assert_eq!(local_escape(&g, Position::ORIGIN, Direction::Right, 1).len(), 1);
    }

    #[test]
    fn prefers_right_turn_then_left() {
        let mut g = Grid::new(10, 10);
        let head = Position::new(5, 5);
        g.occupy(Position::new(5, 4), WALL); // ahead (heading up)
        assert_eq!(local_escape(&g, head, Direction::Up, 2), vec![Direction::Right]);

        g.occupy(Position::new(6, 5), WALL); // right
        assert_eq!(local_escape(&g, head, Direction::Up, 2), vec![Direction::Left]);
    }

    #[test]
    fn stays_when_fully_blocked() {
        let mut g = Grid::new(9, 9);
        let head = Position::new(4, 4);
        boxed_in(&mut g, head);
        assert_eq!(local_escape(&g, head, Direction::Up, 20), vec![Direction::Stay]);
    }

    #[test]
    fn non_empty_when_one_candidate_is_free() {
        // Enclosed apart from the left-turn cell.
        let mut g = Grid::new(9, 9);
        let head = Position::new(4, 4);
        boxed_in(&mut g, head);
        g.clear(Position::new(3, 4));
        let moves = local_escape(&g, head, Direction::Up, 20);
        assert_eq!(moves[0], Direction::Left);
        assert!(!moves.contains(&Direction::Stay));
    }

    #[test]
    fn stops_early_in_a_dead_end() {
        // A corridor of length 2 to the right, walled everywhere else.
        let mut g = Grid::new(5, 3);
        for x in 0..5 {
            g.occupy(Position::new(x, 0), WALL);
            g.occupy(Position::new(x, 2), WALL);
        }
        g.occupy(Position::new(3, 1), WALL);
        let moves = local_escape(&g, Position::new(0, 1), Direction::Right, 20);
        // (0,1)→(1,1)→(2,1) then blocked ahead, right and left.
        assert_eq!(moves, vec![Direction::Right, Direction::Right]);
    }
}
