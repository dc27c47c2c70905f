mod locator;

pub use locator::NodeLocator;

use num_traits::Float;


/// Mean earth radius in kilometres, used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;


/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}

/// Great-circle distance between two (lat, lng) pairs given in degrees
/// https://en.wikipedia.org/wiki/Haversine_formula
/// Result is in the unit of `radius`
pub fn haversine<T>(lat1: T, lng1: T, lat2: T, lng2: T, radius: T) -> T
where
    T: Float,
    {
    let two = T::one() + T::one();
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / two).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / two).sin().powi(2);
    let c = two * a.sqrt().atan2((T::one() - a).sqrt());

    radius * c
}


/// 2D Point in surface-local coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        euclidean(self.x, self.y, other.x, other.y)
    }

    /// Point halfway between self and other, where edge weights are drawn
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
