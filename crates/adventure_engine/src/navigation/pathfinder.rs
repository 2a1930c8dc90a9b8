//! A* search over the ground grid
//!
//! A cell is walkable when a clearance cube of the agent's radius, centered
//! on the cell's center at waypoint height, is clear of obstacles. Only the
//! center is sampled, so an obstacle thinner than a cell that falls between
//! centers is invisible to the search.
//!
//! The search is 8-connected with unit orthogonal and `sqrt(2)` diagonal
//! steps. It is guided by the Manhattan distance, which overestimates
//! diagonal routes: returned paths are valid but not guaranteed shortest.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use log::{debug, warn};
use ordered_float::OrderedFloat;

use super::grid::GridCell;
use crate::config::PathfindingConfig;
use crate::foundation::math::Vec3;
use crate::physics::CollisionProbe;

/// Frontier entry: lowest score first, then earliest first insertion
type OpenEntry = (Reverse<OrderedFloat<f32>>, Reverse<u64>, GridCell);

/// Plans routes for one agent size over a level's obstacles
#[derive(Debug, Clone)]
pub struct GridPathfinder<'a> {
    probe: CollisionProbe<'a>,
    config: PathfindingConfig,
    agent_radius: f32,
}

impl<'a> GridPathfinder<'a> {
    /// Create a pathfinder for an agent of the given clearance radius
    pub fn new(probe: CollisionProbe<'a>, config: &PathfindingConfig, agent_radius: f32) -> Self {
        Self {
            probe,
            config: config.clone(),
            agent_radius,
        }
    }

    /// Cell containing a world position
    pub fn to_grid(&self, position: Vec3) -> GridCell {
        GridCell::containing(position, self.config.cell_size)
    }

    /// Waypoint for a cell: its center at waypoint height
    pub fn to_world(&self, cell: GridCell) -> Vec3 {
        cell.center(self.config.cell_size, self.config.waypoint_height)
    }

    /// Can the agent stand at the center of `cell`?
    pub fn is_walkable(&self, cell: GridCell) -> bool {
        self.probe.is_clear(self.to_world(cell), self.agent_radius)
    }

    /// First walkable cell on the rings around `cell`
    ///
    /// Rings are searched outwards from radius 1 up to the configured repair
    /// radius; `cell` itself is not considered.
    pub fn find_nearest_walkable(&self, cell: GridCell) -> Option<GridCell> {
        (1..=self.config.goal_repair_radius)
            .flat_map(|radius| cell.ring(radius))
            .find(|&candidate| self.is_walkable(candidate))
    }

    /// Plan a route from `start` to `goal`
    ///
    /// Returns the waypoints from the start cell to the goal cell, both
    /// included. A blocked goal is moved to the nearest walkable cell. When
    /// both ends share a cell the result is `goal` itself. An empty result
    /// means no route: the start is blocked, the goal cannot be repaired,
    /// the reachable area ran out or the expansion budget was spent.
    pub fn find_path(&self, start: Vec3, goal: Vec3) -> Vec<Vec3> {
        let start_cell = self.to_grid(start);
        if !self.is_walkable(start_cell) {
            warn!("Path start {:?} is not walkable", start_cell);
            return Vec::new();
        }

        let mut goal_cell = self.to_grid(goal);
        if !self.is_walkable(goal_cell) {
            match self.find_nearest_walkable(goal_cell) {
                Some(repaired) => {
                    debug!("Path goal {:?} blocked, using {:?}", goal_cell, repaired);
                    goal_cell = repaired;
                }
                None => {
                    warn!("Path goal {:?} is blocked with no walkable cell nearby", goal_cell);
                    return Vec::new();
                }
            }
        }

        if start_cell == goal_cell {
            return vec![goal];
        }

        self.search(start_cell, goal_cell)
            .map(|cells| cells.into_iter().map(|cell| self.to_world(cell)).collect())
            .unwrap_or_default()
    }

    fn search(&self, start: GridCell, goal: GridCell) -> Option<Vec<GridCell>> {
        let prune_distance = self.config.max_search_distance / self.config.cell_size;

        let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
        let mut first_seen: HashMap<GridCell, u64> = HashMap::new();
        let mut g_scores: HashMap<GridCell, f32> = HashMap::new();
        let mut came_from: HashMap<GridCell, GridCell> = HashMap::new();
        let mut closed: HashSet<GridCell> = HashSet::new();
        let mut next_seq = 0_u64;
        let mut expansions = 0_usize;

        first_seen.insert(start, next_seq);
        g_scores.insert(start, 0.0);
        open.push((Reverse(OrderedFloat(heuristic(start, goal))), Reverse(next_seq), start));
        next_seq += 1;

        while let Some((_, _, current)) = open.pop() {
            // Superseded entries for a cell come out after it is closed
            if !closed.insert(current) {
                continue;
            }

            if current == goal {
                debug!("Path found after {} expansions", expansions);
                return Some(reconstruct_path(&came_from, goal));
            }

            if start.manhattan(current) as f32 > prune_distance {
                continue;
            }

            if self.config.max_expansions.is_some_and(|limit| expansions >= limit) {
                debug!("Path search gave up after {} expansions", expansions);
                return None;
            }
            expansions += 1;

            let current_g = g_scores.get(&current).copied().unwrap_or(f32::INFINITY);

            for neighbor in current.neighbors() {
                if closed.contains(&neighbor) || !self.is_walkable(neighbor) {
                    continue;
                }

                let tentative_g = current_g + step_cost(current, neighbor);
                let seq = match first_seen.get(&neighbor) {
                    Some(&seq) => {
                        let known_g = g_scores.get(&neighbor).copied().unwrap_or(f32::INFINITY);
                        if tentative_g >= known_g {
                            continue;
                        }
                        seq
                    }
                    None => {
                        let seq = next_seq;
                        next_seq += 1;
                        first_seen.insert(neighbor, seq);
                        seq
                    }
                };

                came_from.insert(neighbor, current);
                g_scores.insert(neighbor, tentative_g);
                let f_score = tentative_g + heuristic(neighbor, goal);
                open.push((Reverse(OrderedFloat(f_score)), Reverse(seq), neighbor));
            }
        }

        debug!("Path search exhausted after {} expansions", expansions);
        None
    }
}

fn heuristic(from: GridCell, to: GridCell) -> f32 {
    from.manhattan(to) as f32
}

fn step_cost(from: GridCell, to: GridCell) -> f32 {
    if from.x != to.x && from.z != to.z {
        std::f32::consts::SQRT_2
    } else {
        1.0
    }
}

fn reconstruct_path(came_from: &HashMap<GridCell, GridCell>, goal: GridCell) -> Vec<GridCell> {
    let mut path = vec![goal];
    let mut cursor = goal;
    while let Some(&previous) = came_from.get(&cursor) {
        path.push(previous);
        cursor = previous;
    }
    path.reverse();
    path
}
