//! Bounded prefix slices for summary surfaces.

/// Rentals on the home screen.
pub const HOUSING_SPOTLIGHT: usize = 3;
pub const SCHOOLS_SPOTLIGHT: usize = 6;
pub const ESSENTIALS_SPOTLIGHT: usize = 6;
pub const EVENTS_SPOTLIGHT: usize = 4;
/// Rows listed in the map's bottom sheet.
pub const MAP_SHEET_SPOTLIGHT: usize = 6;

/// The first `min(n, len)` records, in input order.
pub fn spotlight<T>(records: &[T], n: usize) -> &[T] {
    &records[..n.min(records.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spotlight_is_bounded_prefix() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(spotlight(&items, ESSENTIALS_SPOTLIGHT), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(spotlight(&items, 0), &[] as &[u32]);
        assert_eq!(spotlight(&items, 25).len(), 10);
        assert_eq!(spotlight::<u32>(&[], HOUSING_SPOTLIGHT).len(), 0);
    }
}
