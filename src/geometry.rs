use serde::{Deserialize, Serialize};

/// Integer rectangle in screen coordinates (position + size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Intersection of two rectangles, or `None` when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 > x1 && y2 > y1 {
            Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0, 0, 100, 50);
        assert!(r.contains(0, 0));
        assert!(r.contains(99, 49));
        assert!(!r.contains(100, 0));
        assert!(!r.contains(0, 50));
        assert!(!r.contains(-1, 10));
    }

    #[test]
    fn intersect_overlapping() {
        let a = Rect::new(0, 0, 1920, 1080);
        let b = Rect::new(0, 30, 1920, 1050);
        assert_eq!(a.intersect(&b), Some(Rect::new(0, 30, 1920, 1050)));
    }

    #[test]
    fn intersect_disjoint_is_none() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(200, 0, 100, 100);
        assert_eq!(a.intersect(&b), None);
        // Edge-touching rectangles do not overlap either.
        let c = Rect::new(100, 0, 50, 100);
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn intersect_is_commutative() {
        let a = Rect::new(-100, -100, 300, 300);
        let b = Rect::new(0, 0, 100, 400);
        assert_eq!(a.intersect(&b), b.intersect(&a));
    }
}
