/// A geographical position in degrees (WGS 84).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub const LAT_DEG_MAX: f64 = 90.0;
    pub const LAT_DEG_MIN: f64 = -90.0;
    pub const LNG_DEG_MAX: f64 = 180.0;
    pub const LNG_DEG_MIN: f64 = -180.0;

    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Option<Self> {
        let pos = Self { lat, lng };
        pos.is_valid().then_some(pos)
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    pub const fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (Self::LAT_DEG_MIN..=Self::LAT_DEG_MAX).contains(&self.lat)
            && (Self::LNG_DEG_MIN..=Self::LNG_DEG_MAX).contains(&self.lng)
    }
}
