#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Movement direction. `y` grows downwards, so `Up` decreases it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Ready,
    Playing,
    /// Never entered by the engine itself; reserved for the hosting layer.
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl GridSize {
    pub fn contains(&self, point: Point) -> bool {
        (0..self.width).contains(&point.x) && (0..self.height).contains(&point.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        assert!(Direction::Up.is_opposite(&Direction::Down));
        assert!(Direction::Left.is_opposite(&Direction::Right));
        assert!(!Direction::Up.is_opposite(&Direction::Left));
        assert!(!Direction::Right.is_opposite(&Direction::Right));
    }

    #[test]
    fn test_offset_moves_one_cell() {
        let origin = Point::new(5, 5);
        for direction in Direction::ALL {
            let next = origin.offset(direction);
            assert_eq!((next.x - origin.x).abs() + (next.y - origin.y).abs(), 1);
        }
        assert_eq!(origin.offset(Direction::Up), Point::new(5, 4));
    }

    #[test]
    fn test_grid_contains() {
        let grid = GridSize { width: 20, height: 10 };
        assert!(grid.contains(Point::new(0, 0)));
        assert!(grid.contains(Point::new(19, 9)));
        assert!(!grid.contains(Point::new(20, 5)));
        assert!(!grid.contains(Point::new(5, 10)));
        assert!(!grid.contains(Point::new(-1, 0)));
        assert_eq!(grid.center(), Point::new(10, 5));
    }
}
