use std::fmt;

/// A point on the globe, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    /// Whether both coordinates are real numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Represents an airport city with its name and geographical position.
#[derive(Clone, Debug, PartialEq)]
pub struct Airport {
    pub name: String,
    pub position: GeoPoint,
}

impl Airport {
    pub fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Airport {
            name: name.to_string(),
            position: GeoPoint::new(latitude, longitude),
        }
    }
}
