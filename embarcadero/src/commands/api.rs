//! Miscellaneous bridge calls that do not touch the printing stack.

/// Bridge liveness probe. Echoes the value back rounded to three
/// decimals so the UI can confirm the call crossed the boundary.
pub fn say_hello(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::say_hello;

    #[test]
    fn echoes_rounded_to_three_decimals() {
        assert_eq!(say_hello(1.23456), 1.235);
        assert_eq!(say_hello(2.0), 2.0);
        assert_eq!(say_hello(-0.0004), -0.0);
    }
}
