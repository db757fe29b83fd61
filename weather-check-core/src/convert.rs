//! Temperature conversions. No rounding happens here; comparisons apply
//! their own tolerance.

pub const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    (kelvin - KELVIN_OFFSET) * 1.8 + 32.0
}

pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

pub fn fahrenheit_to_kelvin(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) / 1.8 + KELVIN_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kelvin_to_celsius_is_exact() {
        for k in [0.0, 273.15, 288.4, 300.0, 1000.0] {
            assert_eq!(kelvin_to_celsius(k), k - 273.15);
        }
        assert_eq!(kelvin_to_celsius(273.15), 0.0);
    }

    #[test]
    fn kelvin_to_fahrenheit_is_exact() {
        for k in [0.0, 255.372, 273.15, 310.15] {
            assert_eq!(kelvin_to_fahrenheit(k), (k - 273.15) * 1.8 + 32.0);
        }
        assert_eq!(kelvin_to_fahrenheit(273.15), 32.0);
    }

    #[test]
    fn boiling_point() {
        assert!((kelvin_to_fahrenheit(373.15) - 212.0).abs() < 1e-9);
    }

    #[test]
    fn celsius_round_trip() {
        for k in [0.0, 200.5, 273.15, 291.37, 330.0] {
            let back = celsius_to_kelvin(kelvin_to_celsius(k));
            assert!((back - k).abs() < 1e-9, "{k} came back as {back}");
        }
    }

    #[test]
    fn fahrenheit_round_trip() {
        for k in [0.0, 250.0, 273.15, 305.9] {
            let back = fahrenheit_to_kelvin(kelvin_to_fahrenheit(k));
            assert!((back - k).abs() < 1e-9, "{k} came back as {back}");
        }
    }
}
