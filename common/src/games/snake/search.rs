use std::collections::VecDeque;

use super::occupancy::OccupancyGrid;
use super::types::{Direction, Point};

struct Node {
    point: Point,
    action: Direction,
    parent: Option<usize>,
}

/// Shortest-path search from the enemy head over an occupancy grid.
///
/// Neighbours are expanded in [`Direction::ALL`] order, so equally short
/// paths always resolve the same way.
pub struct BreadthFirstSearch<'a> {
    grid: &'a OccupancyGrid,
    start: Point,
}

impl<'a> BreadthFirstSearch<'a> {
    pub fn new(grid: &'a OccupancyGrid, start: Point) -> Self {
        Self { grid, start }
    }

    pub fn neighbours(&self, point: Point) -> impl Iterator<Item = (Direction, Point)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |direction| (direction, point.step(direction)))
            .filter(move |(_, next)| self.grid.is_passable(*next))
    }

    /// Returns the actions leading from the start to `goal`, or an empty list
    /// when the goal cannot be reached. The root carries `current_direction`
    /// only as bookkeeping; it is never part of the result.
    pub fn solve(&self, goal: Point, current_direction: Direction) -> Vec<Direction> {
        let width = self.grid.width();
        let height = self.grid.height();
        let mut explored = vec![vec![false; width]; height];
        let mut queued = vec![vec![false; width]; height];

        let mut nodes = vec![Node {
            point: self.start,
            action: current_direction,
            parent: None,
        }];
        let mut frontier = VecDeque::from([0usize]);
        if self.grid.field_size().contains(self.start) {
            queued[self.start.y as usize][self.start.x as usize] = true;
        }

        while let Some(index) = frontier.pop_front() {
            let point = nodes[index].point;
            if self.grid.field_size().contains(point) {
                explored[point.y as usize][point.x as usize] = true;
            }

            if point == goal {
                return Self::trace(&nodes, index);
            }

            for (direction, next) in self.neighbours(point) {
                let (x, y) = (next.x as usize, next.y as usize);
                if explored[y][x] || queued[y][x] {
                    continue;
                }
                queued[y][x] = true;
                nodes.push(Node {
                    point: next,
                    action: direction,
                    parent: Some(index),
                });
                frontier.push_back(nodes.len() - 1);
            }
        }

        Vec::new()
    }

    fn trace(nodes: &[Node], mut index: usize) -> Vec<Direction> {
        let mut actions = Vec::new();
        while let Some(parent) = nodes[index].parent {
            actions.push(nodes[index].action);
            index = parent;
        }
        actions.reverse();
        actions
    }
}

pub fn shortest_path(
    grid: &OccupancyGrid,
    start: Point,
    goal: Point,
    current_direction: Direction,
) -> Vec<Direction> {
    BreadthFirstSearch::new(grid, start).solve(goal, current_direction)
}
