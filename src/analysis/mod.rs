pub mod stats;
pub mod streak;

/// `round(100 * part / whole)` with halves rounded up, 0 for an empty whole.
pub fn rounded_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((200 * part + whole) / (2 * whole)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_percent() {
        assert_eq!(rounded_percent(1, 2), 50);
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(1, 8), 13);
        assert_eq!(rounded_percent(0, 0), 0);
    }
}
