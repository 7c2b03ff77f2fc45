use super::entity::Snake;
use super::types::{FieldSize, Point};

/// Passability matrix indexed `[y][x]`; `true` means a cell can be entered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    field_size: FieldSize,
    cells: Vec<Vec<bool>>,
}

impl OccupancyGrid {
    pub fn open(field_size: FieldSize) -> Self {
        Self {
            field_size,
            cells: vec![vec![true; field_size.width]; field_size.height],
        }
    }

    pub fn build<'a>(
        field_size: FieldSize,
        walls: impl IntoIterator<Item = &'a Point>,
        bodies: impl IntoIterator<Item = &'a Snake>,
    ) -> Self {
        let mut grid = Self::open(field_size);
        for wall in walls {
            grid.block(*wall);
        }
        for snake in bodies {
            for segment in snake.segments() {
                grid.block(*segment);
            }
        }
        grid
    }

    pub fn field_size(&self) -> FieldSize {
        self.field_size
    }

    pub fn width(&self) -> usize {
        self.field_size.width
    }

    pub fn height(&self) -> usize {
        self.field_size.height
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.cells
    }

    pub fn is_passable(&self, point: Point) -> bool {
        self.field_size.contains(point) && self.cells[point.y as usize][point.x as usize]
    }

    pub fn block(&mut self, point: Point) {
        self.set(point, false);
    }

    pub fn release(&mut self, point: Point) {
        self.set(point, true);
    }

    pub fn passable_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&cell| cell).count()
    }

    fn set(&mut self, point: Point, passable: bool) {
        if self.field_size.contains(point) {
            self.cells[point.y as usize][point.x as usize] = passable;
        }
    }
}
