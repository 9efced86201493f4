use std::collections::VecDeque;

use super::types::{Direction, Point};

#[derive(Clone, Debug)]
pub struct Snake {
    pub body: VecDeque<Point>,
    pub direction: Direction,
}

impl Snake {
    /// Lays `length` segments out behind `head`, opposite to `direction`.
    pub fn new(head: Point, direction: Direction, length: usize) -> Self {
        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(length + 1);
        let mut segment = head;
        for _ in 0..length {
            body.push_back(segment);
            segment = segment.offset(behind);
        }

        Self { body, direction }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn occupies(&self, point: &Point) -> bool {
        self.body.contains(point)
    }

    /// Pushes a new head one cell ahead and returns it. The tail is left in place.
    pub fn push_head(&mut self) -> Point {
        let next = self.head().offset(self.direction);
        self.body.push_front(next);
        next
    }

    pub fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    pub fn head_hits_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }
}
