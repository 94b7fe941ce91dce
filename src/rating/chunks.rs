use crate::models::{
    ChunkAssignment, ChunkId, RankRange, RatingEngineError, RatingItem, Result, UNASSIGNED_CHUNK,
};

/// 1-based index of the first range containing `rank`, or
/// [`UNASSIGNED_CHUNK`] when no range does.
///
/// Rank 0 is rejected as an error rather than trapping: ranks can reach this
/// lookup from caller-influenced data.
pub fn chunk_for_rank(rank: u32, ranges: &[RankRange]) -> Result<ChunkId> {
    if rank == 0 {
        return Err(RatingEngineError::InvalidRank(rank));
    }
    for (idx, range) in ranges.iter().enumerate() {
        if range.contains(rank) {
            return Ok(idx as ChunkId + 1);
        }
    }
    Ok(UNASSIGNED_CHUNK)
}

/// Chunk assignment keyed by user id.
///
/// The rank used for the lookup is the item's position in the supplied
/// sequence (+1), not its stored rank field: the caller hands the list
/// ordered by ascending rank, and the board may be sparse.
pub fn assign_chunks(rating: &[RatingItem], ranges: &[RankRange]) -> Result<ChunkAssignment> {
    let mut assignment = ChunkAssignment::with_capacity(rating.len());
    for (idx, item) in rating.iter().enumerate() {
        let chunk = chunk_for_rank(idx as u32 + 1, ranges)?;
        assignment.insert(item.user_id, chunk);
    }
    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(bounds: &[(u32, u32)]) -> Vec<RankRange> {
        bounds.iter().map(|&b| RankRange::from(b)).collect()
    }

    #[test]
    fn first_containing_range_wins() {
        let chunks = ranges(&[(1, 5), (6, 10)]);

        for (rank, expected) in [(1, 1), (5, 1), (6, 2), (100, UNASSIGNED_CHUNK)] {
            assert_eq!(chunk_for_rank(rank, &chunks).unwrap(), expected, "rank {rank}");
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let chunks = ranges(&[(3, 7)]);

        assert_eq!(chunk_for_rank(3, &chunks).unwrap(), 1);
        assert_eq!(chunk_for_rank(7, &chunks).unwrap(), 1);
        assert_eq!(chunk_for_rank(2, &chunks).unwrap(), UNASSIGNED_CHUNK);
        assert_eq!(chunk_for_rank(8, &chunks).unwrap(), UNASSIGNED_CHUNK);
    }

    #[test]
    fn zero_rank_is_an_error_not_a_panic() {
        let err = chunk_for_rank(0, &ranges(&[(1, 5)])).unwrap_err();
        assert!(matches!(err, RatingEngineError::InvalidRank(0)));
    }

    #[test]
    fn assignment_keys_off_position_not_stored_rank() {
        let chunks = ranges(&[(1, 2), (3, 10)]);
        // Stored ranks are sparse (1, 3, 100); positions are 1, 2, 3.
        let rating = vec![
            RatingItem::new(1, 1, 100),
            RatingItem::new(25, 3, 10),
            RatingItem::new(50, 100, 1),
        ];

        let assignment = assign_chunks(&rating, &chunks).unwrap();

        assert_eq!(assignment.len(), 3);
        assert_eq!(assignment[&1], 1);
        assert_eq!(assignment[&25], 1);
        assert_eq!(assignment[&50], 2);
    }

    #[test]
    fn gaps_between_ranges_yield_unassigned() {
        let chunks = ranges(&[(1, 1), (3, 3)]);
        let rating = vec![
            RatingItem::new(7, 1, 30),
            RatingItem::new(8, 2, 20),
            RatingItem::new(9, 3, 10),
        ];

        let assignment = assign_chunks(&rating, &chunks).unwrap();

        assert_eq!(assignment[&7], 1);
        assert_eq!(assignment[&8], UNASSIGNED_CHUNK);
        assert_eq!(assignment[&9], 2);
    }
}
