use super::GiftId;

/// Largest id in `ids`, or 0 when there are none.
pub fn max_id<I>(ids: I) -> GiftId
where
    I: IntoIterator<Item = GiftId>,
{
    ids.into_iter().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::max_id;

    #[test]
    fn empty_sequence_yields_zero() {
        assert_eq!(max_id([]), 0);
    }

    #[test]
    fn returns_largest_element() {
        assert_eq!(max_id([1, 2, 3]), 3);
        assert_eq!(max_id([7, 2, 5]), 7);
    }

    #[test]
    fn handles_negative_and_duplicate_values() {
        assert_eq!(max_id([-4, -9]), -4);
        assert_eq!(max_id([2, 2, 1]), 2);
    }
}
