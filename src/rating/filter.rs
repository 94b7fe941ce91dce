use crate::models::RatingItem;

/// Keeps the items the predicate does NOT match, preserving order.
///
/// The predicate names users to exclude (banned, opted out), so `true`
/// means "drop this item".
pub fn filter_rating<F>(rating: &[RatingItem], exclude: F) -> Vec<RatingItem>
where
    F: Fn(&RatingItem) -> bool,
{
    rating.iter().filter(|item| !exclude(item)).copied().collect()
}
