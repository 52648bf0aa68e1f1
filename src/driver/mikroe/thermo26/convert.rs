//! Raw count to temperature conversion.

/// Full scale of a raw reading.
pub const DATA_RESOLUTION: f32 = 65535.0;
/// Temperature at raw count 0, in degrees Celsius.
pub const ABS_MIN_TEMP: f32 = -45.0;
/// Temperature at raw count 65535, in degrees Celsius.
pub const ABS_MAX_TEMP: f32 = 130.0;

/// Get temperature in Celsius.
pub fn to_celsius(raw: u16) -> f32 {
    ABS_MIN_TEMP + (ABS_MAX_TEMP - ABS_MIN_TEMP) * f32::from(raw) / DATA_RESOLUTION
}

#[cfg(test)]
mod test {
    use super::to_celsius;

    #[test]
    fn range_endpoints() {
        assert!((to_celsius(0) - -45.0).abs() < f32::EPSILON);
        assert!((to_celsius(u16::MAX) - 130.0).abs() < 1e-4);
    }

    #[test]
    fn midpoint() {
        assert!((to_celsius(32767) - 42.4987).abs() < 1e-3);
    }

    #[test]
    fn monotonic() {
        let mut last = to_celsius(0);
        for raw in 1..=u16::MAX {
            let t = to_celsius(raw);
            assert!(t >= last);
            last = t;
        }
    }
}
