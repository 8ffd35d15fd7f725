use anyhow::{Result, ensure};
use itertools::Itertools;

use crate::geometry::geo_traits::{CollidesWith, Shape};
use crate::geometry::primitives::Edge;
use crate::geometry::primitives::Point;
use crate::geometry::primitives::Rect;

/// Geometric primitive representing a simple polygon: <https://en.wikipedia.org/wiki/Simple_polygon>
///
/// Simplicity is assumed, not verified. A self-intersecting or zero-area ring is accepted,
/// it simply contains fewer (or no) points.
#[derive(Clone, Debug)]
pub struct SPolygon {
    /// Vertices of the polygon, counterclockwise, without a repeated closing vertex
    pub vertices: Vec<Point>,
    /// Bounding box
    pub bbox: Rect,
    pub area: f64,
}

impl SPolygon {
    /// Creates a new simple polygon from a ring of points.
    /// A closing vertex equal to the first one and consecutive duplicates are dropped.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        let mut vertices = points.into_iter().dedup().collect_vec();
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        ensure!(
            vertices.len() >= 3,
            "simple polygon must have at least 3 distinct vertices, got {}",
            vertices.len()
        );

        let area = match SPolygon::calculate_area(&vertices) {
            area if area < 0.0 => {
                //edges should always be ordered counterclockwise (positive area)
                vertices.reverse();
                -area
            }
            area => area,
        };
        let bbox = SPolygon::generate_bounding_box(&vertices);

        Ok(SPolygon {
            vertices,
            bbox,
            area,
        })
    }

    pub fn edge(&self, i: usize) -> Edge {
        let j = (i + 1) % self.n_vertices();
        Edge {
            start: self.vertices[i],
            end: self.vertices[j],
        }
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n_vertices()).map(move |i| self.edge(i))
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn generate_bounding_box(points: &[Point]) -> Rect {
        Rect::enclosing(points.iter().copied()).unwrap_or(Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: 0.0,
            y_max: 0.0,
        })
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    //counterclockwise = positive area, clockwise = negative area
    pub fn calculate_area(points: &[Point]) -> f64 {
        let mut sigma: f64 = 0.0;
        for i in 0..points.len() {
            //next point
            let j = (i + 1) % points.len();

            let (x_i, y_i) = points[i].into();
            let (x_j, y_j) = points[j].into();

            sigma += (y_i + y_j) * (x_i - x_j)
        }

        0.5 * sigma
    }
}

impl Shape for SPolygon {
    fn centroid(&self) -> Point {
        //based on: https://en.wikipedia.org/wiki/Centroid#Of_a_polygon
        if self.area == 0.0 {
            //degenerate ring, fall back to the vertex average
            let n = self.n_vertices() as f64;
            let (s_x, s_y) = self
                .vertices
                .iter()
                .fold((0.0, 0.0), |(s_x, s_y), p| (s_x + p.0, s_y + p.1));
            return Point(s_x / n, s_y / n);
        }

        let mut c_x = 0.0;
        let mut c_y = 0.0;
        for edge in self.edge_iter() {
            let Point(x_i, y_i) = edge.start;
            let Point(x_j, y_j) = edge.end;
            c_x += (x_i + x_j) * (x_i * y_j - x_j * y_i);
            c_y += (y_i + y_j) * (x_i * y_j - x_j * y_i);
        }
        c_x /= 6.0 * self.area;
        c_y /= 6.0 * self.area;

        Point(c_x, c_y)
    }

    fn area(&self) -> f64 {
        self.area
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl CollidesWith<Point> for SPolygon {
    fn collides_with(&self, point: &Point) -> bool {
        //based on the ray casting algorithm: https://en.wikipedia.org/wiki/Point_in_polygon#Ray_casting_algorithm
        match self.bbox.collides_with(point) {
            false => false,
            true => {
                //horizontal ray shot to the right, every crossed edge flips the parity
                self.edge_iter()
                    .filter(|edge| edge.crossed_by_ray_from(point))
                    .count()
                    % 2
                    == 1
            }
        }
    }
}

impl From<Rect> for SPolygon {
    fn from(r: Rect) -> Self {
        let vertices = vec![
            Point(r.x_min, r.y_min),
            Point(r.x_max, r.y_min),
            Point(r.x_max, r.y_max),
            Point(r.x_min, r.y_max),
        ];
        SPolygon {
            bbox: r,
            area: r.area(),
            vertices,
        }
    }
}
