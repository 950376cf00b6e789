//! Shortest-path providers on 4-connected grids.

use super::map::{Cell, Grid};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Finds a shortest obstacle-free path between two cells.
///
/// The returned path starts at `start` and ends at `goal`; consecutive cells
/// are 4-neighbours. `None` means no path exists (or an endpoint is blocked).
pub trait ShortestPath {
    fn shortest_path(&self, grid: &Grid, start: Cell, goal: Cell) -> Option<Vec<Cell>>;
}

/// Uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

/// Best-first search guided by the Manhattan distance to the goal.
///
/// The heuristic is admissible and consistent on a 4-connected unit-cost
/// grid, so paths are as short as Dijkstra's.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl ShortestPath for Dijkstra {
    fn shortest_path(&self, grid: &Grid, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
        best_first(grid, start, goal, |_| 0)
    }
}

impl ShortestPath for AStar {
    fn shortest_path(&self, grid: &Grid, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
        best_first(grid, start, goal, |cell| cell.manhattan(goal))
    }
}

/// Open-list entry. Ordered so that `BinaryHeap` pops the lowest priority.
#[derive(Debug, PartialEq, Eq)]
struct Frontier {
    priority: u32,
    cost: u32,
    index: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            // prefer deeper nodes on ties, then a fixed index order
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn best_first<H>(grid: &Grid, start: Cell, goal: Cell, heuristic: H) -> Option<Vec<Cell>>
where
    H: Fn(Cell) -> u32,
{
    let start_idx = grid.index(start).filter(|_| grid.is_free(start))?;
    let goal_idx = grid.index(goal).filter(|_| grid.is_free(goal))?;

    let mut dist = vec![u32::MAX; grid.len()];
    let mut parent: Vec<Option<usize>> = vec![None; grid.len()];
    let mut heap = BinaryHeap::new();

    dist[start_idx] = 0;
    heap.push(Frontier {
        priority: heuristic(start),
        cost: 0,
        index: start_idx,
    });

    while let Some(Frontier { cost, index, .. }) = heap.pop() {
        if index == goal_idx {
            return Some(reconstruct(grid, &parent, goal_idx));
        }
        if cost > dist[index] {
            continue;
        }
        let cell = grid.cell_at(index);
        for next in grid.neighbors(cell) {
            // neighbours are free, hence in bounds
            let Some(next_idx) = grid.index(next) else {
                continue;
            };
            let next_cost = cost + 1;
            if next_cost < dist[next_idx] {
                dist[next_idx] = next_cost;
                parent[next_idx] = Some(index);
                heap.push(Frontier {
                    priority: next_cost + heuristic(next),
                    cost: next_cost,
                    index: next_idx,
                });
            }
        }
    }

    None
}

fn reconstruct(grid: &Grid, parent: &[Option<usize>], goal_idx: usize) -> Vec<Cell> {
    let mut path = vec![grid.cell_at(goal_idx)];
    let mut current = goal_idx;
    while let Some(prev) = parent[current] {
        path.push(grid.cell_at(prev));
        current = prev;
    }
    path.reverse();
    path
}
