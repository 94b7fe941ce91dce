use crate::models::{RatingItem, RawScore};

/// Turns raw aggregated scores into a rank-dense rating list.
///
/// Higher value ranks first; ties break toward the smaller user id so the
/// ordering is total. Rank is the final position + 1.
pub fn rank_scores(mut scores: Vec<RawScore>) -> Vec<RatingItem> {
    scores.sort_by(|a, b| b.value.cmp(&a.value).then(a.user_id.cmp(&b.user_id)));

    scores
        .iter()
        .enumerate()
        .map(|(idx, score)| RatingItem::new(score.user_id, idx as u32 + 1, score.value))
        .collect()
}
