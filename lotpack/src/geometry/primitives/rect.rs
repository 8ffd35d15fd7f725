use crate::geometry::geo_traits::{CollidesWith, Overlaps};
use crate::geometry::primitives::Point;
use anyhow::Result;
use anyhow::ensure;

///Axis-aligned rectangle
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    pub fn try_new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self> {
        ensure!(
            x_min < x_max && y_min < y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Smallest rectangle containing all `points`, or `None` if there are none.
    /// The result can be degenerate (zero width or height) for collinear input.
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, Point(x, y)| match acc {
            None => Some(Rect {
                x_min: x,
                y_min: y,
                x_max: x,
                y_max: y,
            }),
            Some(r) => Some(Rect {
                x_min: r.x_min.min(x),
                y_min: r.y_min.min(y),
                x_max: r.x_max.max(x),
                y_max: r.y_max.max(y),
            }),
        })
    }

    /// Returns a new rectangle with the same centroid but scaled by `factor`.
    pub fn scale(self, factor: f64) -> Self {
        let dx = (self.x_max - self.x_min) * (factor - 1.0) / 2.0;
        let dy = (self.y_max - self.y_min) * (factor - 1.0) / 2.0;
        self.resize_by(dx, dy).unwrap_or(self)
    }

    /// Returns a new rectangle with the same centroid as `self` but expanded by `dx` in both x-directions and by `dy` in both y-directions.
    /// Negative values shrink the rectangle.
    /// If the new rectangle is invalid (x_min >= x_max or y_min >= y_max), returns None.
    pub fn resize_by(mut self, dx: f64, dy: f64) -> Option<Self> {
        self.x_min -= dx;
        self.y_min -= dy;
        self.x_max += dx;
        self.y_max += dy;

        if self.x_min < self.x_max && self.y_min < self.y_max {
            Some(self)
        } else {
            //resizing would lead to invalid rectangle
            None
        }
    }

    /// Returns the four corners of `self`, counterclockwise starting from the top right.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point(self.x_max, self.y_max),
            Point(self.x_min, self.y_max),
            Point(self.x_min, self.y_min),
            Point(self.x_max, self.y_min),
        ]
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn centroid(&self) -> Point {
        Point(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    pub fn area(&self) -> f64 {
        (self.x_max - self.x_min) * (self.y_max - self.y_min)
    }
}

impl CollidesWith<Point> for Rect {
    #[inline(always)]
    fn collides_with(&self, point: &Point) -> bool {
        let Point(x, y) = *point;
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

impl Overlaps<Rect> for Rect {
    #[inline(always)]
    fn overlaps(&self, other: &Rect) -> bool {
        f64::max(self.x_min, other.x_min) < f64::min(self.x_max, other.x_max)
            && f64::max(self.y_min, other.y_min) < f64::min(self.y_max, other.y_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::try_new(0.0, 0.0, 2.5, 5.0).unwrap();
        let b = Rect::try_new(2.5, 0.0, 5.0, 5.0).unwrap();
        assert!(!a.overlaps(&b));
        let c = Rect::try_new(2.4, 4.9, 6.0, 6.0).unwrap();
        assert!(a.overlaps(&c));
    }

    #[test]
    fn shrinking_past_zero_is_none() {
        let r = Rect::try_new(0.0, 0.0, 10.0, 4.0).unwrap();
        assert!(r.resize_by(-2.0, -2.0).is_none());
        let inner = r.resize_by(-1.0, -1.0).unwrap();
        assert_eq!(inner, Rect::try_new(1.0, 1.0, 9.0, 3.0).unwrap());
        assert_eq!(inner.centroid(), r.centroid());
    }

    #[test]
    fn degenerate_rect_is_rejected() {
        assert!(Rect::try_new(1.0, 0.0, 1.0, 3.0).is_err());
    }
}
