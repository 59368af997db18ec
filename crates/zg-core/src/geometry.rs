// ABOUTME: Geometry primitives in f32 layout units.
// ABOUTME: Vectors and rectangles with the center/direction math the zoom transition needs.

/// 2D vector in layout units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Sum of absolute components, cheap degenerate-direction check
    pub fn manhattan_length(&self) -> f32 {
        self.x.abs() + self.y.abs()
    }

    /// Unit vector in the same direction. A near-zero vector falls back to
    /// the fixed diagonal (1,1) normalized, so callers never divide by zero.
    pub fn normalized_or_diagonal(&self) -> Vec2 {
        let v = if self.manhattan_length() < f32::EPSILON {
            Vec2::new(1.0, 1.0)
        } else {
            *self
        };
        let len = v.length();
        Vec2::new(v.x / len, v.y / len)
    }

    pub fn scaled(&self, factor: f32) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Rectangle in layout units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// This rect shrunk by per-edge margins (container rect minus contents margins)
    pub fn inset(&self, left: f32, top: f32, right: f32, bottom: f32) -> Rect {
        Rect::new(
            self.x + left,
            self.y + top,
            self.width - left - right,
            self.height - top - bottom,
        )
    }

    /// Rect of the same size positioned so its center lands on `center`
    pub fn with_center(&self, center: Vec2) -> Rect {
        Rect::new(
            center.x - self.width / 2.0,
            center.y - self.height / 2.0,
            self.width,
            self.height,
        )
    }

    /// Component-wise linear interpolation toward `other`
    pub fn lerp(&self, other: &Rect, t: f32) -> Rect {
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        Rect::new(
            lerp(self.x, other.x),
            lerp(self.y, other.y),
            lerp(self.width, other.width),
            lerp(self.height, other.height),
        )
    }

    /// True when every component is within `epsilon` of `other`
    pub fn approx_eq(&self, other: &Rect, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.width - other.width).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_rect() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.center(), Vec2::new(60.0, 45.0));
    }

    #[test]
    fn inset_shrinks_by_margins() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = r.inset(5.0, 10.0, 15.0, 20.0);
        assert_eq!(inner, Rect::new(5.0, 10.0, 80.0, 70.0));
    }

    #[test]
    fn with_center_keeps_size() {
        let r = Rect::new(0.0, 0.0, 40.0, 20.0);
        let moved = r.with_center(Vec2::new(100.0, 100.0));
        assert_eq!(moved, Rect::new(80.0, 90.0, 40.0, 20.0));
        assert_eq!(moved.center(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn degenerate_direction_falls_back_to_diagonal() {
        let dir = Vec2::new(0.0, 0.0).normalized_or_diagonal();
        let expected = 1.0 / 2.0_f32.sqrt();
        assert!((dir.x - expected).abs() < 1e-6);
        assert!((dir.y - expected).abs() < 1e-6);
    }

    #[test]
    fn normalized_has_unit_length() {
        let dir = Vec2::new(3.0, 4.0).normalized_or_diagonal();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.x - 0.6).abs() < 1e-6);
        assert!((dir.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(100.0, 50.0, 20.0, 30.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), Rect::new(50.0, 25.0, 15.0, 20.0));
    }
}
