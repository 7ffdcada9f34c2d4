use geo::BoundingRect as _;
use serde::{Deserialize, Serialize};

use crate::geometry::{Coord, Geometry};
use crate::io::geo::geometry_to_geo;

/// An axis-aligned bounding box in longitude/latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Build a box from any two opposite corners.
    pub fn from_corners(a: Coord, b: Coord) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Coord {
        Coord::new(
            (self.min_x + self.max_x) / 2.,
            (self.min_y + self.max_y) / 2.,
        )
    }

    /// Whether `coord` lies inside the box or on its boundary.
    pub fn contains(&self, coord: &Coord) -> bool {
        (self.min_x..=self.max_x).contains(&coord.x) && (self.min_y..=self.max_y).contains(&coord.y)
    }

    /// The box as a closed, counter-clockwise polygon ring starting at the lower left corner.
    pub fn to_polygon(&self) -> Geometry {
        Geometry::Polygon(vec![vec![
            Coord::new(self.min_x, self.min_y),
            Coord::new(self.max_x, self.min_y),
            Coord::new(self.max_x, self.max_y),
            Coord::new(self.min_x, self.max_y),
            Coord::new(self.min_x, self.min_y),
        ]])
    }

    /// The GeoJSON `bbox` member order: `[west, south, east, north]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }
}

impl From<geo::Rect> for BoundingBox {
    fn from(value: geo::Rect) -> Self {
        Self {
            min_x: value.min().x,
            min_y: value.min().y,
            max_x: value.max().x,
            max_y: value.max().y,
        }
    }
}

/// Calculation of the bounding rectangle of a geometry.
pub trait BoundingRect {
    /// Return the bounding rectangle of a geometry, or `None` when it has no coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use geowidgets::algorithm::BoundingRect;
    /// use geowidgets::io::wkt::read_wkt;
    ///
    /// let line = read_wkt("LINESTRING(40.02 116.34, 42.02 116.34, 42.02 118.34)").unwrap();
    /// let bbox = line.bounding_rect().unwrap();
    ///
    /// assert_eq!(bbox.min_x, 40.02);
    /// assert_eq!(bbox.max_y, 118.34);
    /// ```
    fn bounding_rect(&self) -> Option<BoundingBox>;
}

impl BoundingRect for Geometry {
    fn bounding_rect(&self) -> Option<BoundingBox> {
        geometry_to_geo(self).bounding_rect().map(BoundingBox::from)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::geometry;

    #[test]
    fn polygon() {
        let bbox = geometry::polygon().bounding_rect().unwrap();
        assert_eq!(bbox.to_array(), [0., 0., 10., 10.]);
    }

    #[test]
    fn collection() {
        let bbox = geometry::collection().bounding_rect().unwrap();
        assert_eq!(bbox.to_array(), [4., 6., 7., 10.]);
        assert_eq!(bbox.center(), Coord::new(5.5, 8.));
    }

    #[test]
    fn empty_collection() {
        assert!(Geometry::GeometryCollection(vec![])
            .bounding_rect()
            .is_none());
    }

    #[test]
    fn corners_in_any_order() {
        let bbox = BoundingBox::from_corners(Coord::new(5., -1.), Coord::new(-2., 3.));
        assert_eq!(bbox.to_array(), [-2., -1., 5., 3.]);
        assert_eq!(bbox.width(), 7.);
        assert_eq!(bbox.height(), 4.);
        assert!(bbox.contains(&Coord::new(0., 0.)));
        assert!(bbox.contains(&Coord::new(5., 3.)));
        assert!(!bbox.contains(&Coord::new(5.1, 3.)));
    }

    #[test]
    fn polygon_round_trips_through_bounding_rect() {
        let bbox = BoundingBox::from_corners(Coord::new(13.3, 52.4), Coord::new(13.5, 52.6));
        let polygon = bbox.to_polygon();
        assert_eq!(polygon.bounding_rect(), Some(bbox));
    }
}
