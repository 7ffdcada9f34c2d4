/// A single two-dimensional position.
///
/// `x` is the longitude and `y` the latitude. Both WKT (`"x y"`) and GeoJSON (`[x, y]`) store
/// the ordinates in this order, so no conversion ever swaps them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns a tuple that contains the x/horizontal & y/vertical component of the coord.
    pub fn x_y(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Coord {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Coord> for [f64; 2] {
    fn from(value: Coord) -> Self {
        [value.x, value.y]
    }
}
