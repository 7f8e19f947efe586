//! Fixed-ratio merge of the two candidate pools.

use perch_types::EnrichedPost;

/// Share of a feed page reserved for the followed-authors pool. The
/// remainder goes to the interest pool. Fixed policy, not configurable per
/// call.
pub const FOLLOWED_POOL_SHARE: f64 = 0.7;

/// Quota for the followed-authors pool: floor(amount * 0.7).
pub fn followed_quota(amount: i64) -> i64 {
    (amount as f64 * FOLLOWED_POOL_SHARE).floor() as i64
}

/// Quota for the interest pool: the remainder of the page.
pub fn interest_quota(amount: i64) -> i64 {
    amount - followed_quota(amount)
}

/// Merge two already-limited pools: concatenate, re-sort by recency
/// (post id as tiebreak), drop duplicates, truncate to `amount`.
///
/// When a pool returns fewer rows than its quota the shortfall is NOT
/// backfilled from the other pool, so a page may be shorter than `amount`
/// even when more eligible posts exist. Deliberate, documented policy;
/// callers must not assume full pages.
pub fn merge(
    followed: Vec<EnrichedPost>,
    interest: Vec<EnrichedPost>,
    amount: i64,
) -> Vec<EnrichedPost> {
    let mut merged = followed;
    merged.extend(interest);
    merged.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then(b.post_id.cmp(&a.post_id))
    });
    // The pools are disjoint by construction; this keeps the invariant
    // explicit rather than trusting the queries forever.
    merged.dedup_by_key(|post| post.post_id);
    merged.truncate(amount.max(0) as usize);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use perch_types::UserSummary;
    use proptest::prelude::*;

    fn post(post_id: i64, minutes_ago: i64) -> EnrichedPost {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        EnrichedPost {
            post_id,
            poster: UserSummary {
                id: 1,
                username: "wren".into(),
            },
            creator: UserSummary {
                id: 1,
                username: "wren".into(),
            },
            content_id: post_id,
            text: Some("hello".into()),
            image: None,
            created_at: base - Duration::minutes(minutes_ago),
            hashtags: vec![],
            mentions: vec![],
            number_likes: 0,
            number_reposts: 0,
            did_i_like: false,
            did_i_repost: false,
            did_i_favorite: false,
        }
    }

    #[test]
    fn quotas_split_seventy_thirty() {
        assert_eq!(followed_quota(10), 7);
        assert_eq!(interest_quota(10), 3);
        assert_eq!(followed_quota(9), 6);
        assert_eq!(interest_quota(9), 3);
        assert_eq!(followed_quota(1), 0);
        assert_eq!(interest_quota(1), 1);
    }

    #[test]
    fn quotas_always_cover_the_page() {
        for amount in 0..100 {
            assert_eq!(followed_quota(amount) + interest_quota(amount), amount);
        }
    }

    #[test]
    fn merges_by_recency() {
        let followed = vec![post(1, 10), post(2, 30)];
        let interest = vec![post(3, 20)];

        let merged = merge(followed, interest, 10);
        let ids: Vec<i64> = merged.iter().map(|p| p.post_id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn truncates_to_amount() {
        let followed = vec![post(1, 1), post(2, 2), post(3, 3)];
        let interest = vec![post(4, 4), post(5, 5)];

        let merged = merge(followed, interest, 4);
        assert_eq!(merged.len(), 4);
        assert_eq!(merged.last().unwrap().post_id, 4);
    }

    #[test]
    fn shortfall_is_not_backfilled() {
        // Interest pool came back empty; the page stays short even though
        // the followed pool had more rows than its quota upstream.
        let followed = vec![post(1, 1), post(2, 2)];
        let merged = merge(followed, Vec::new(), 10);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn duplicate_posts_collapse() {
        let merged = merge(vec![post(1, 5)], vec![post(1, 5)], 10);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn same_timestamp_breaks_ties_by_post_id() {
        let merged = merge(vec![post(1, 5)], vec![post(9, 5)], 10);
        let ids: Vec<i64> = merged.iter().map(|p| p.post_id).collect();
        assert_eq!(ids, vec![9, 1]);
    }

    proptest! {
        #[test]
        fn merged_pages_are_bounded_and_sorted(
            followed_ages in proptest::collection::vec(0i64..10_000, 0..20),
            interest_ages in proptest::collection::vec(0i64..10_000, 0..20),
            amount in 0i64..40,
        ) {
            let followed: Vec<_> = followed_ages
                .iter()
                .enumerate()
                .map(|(i, age)| post(i as i64, *age))
                .collect();
            let interest: Vec<_> = interest_ages
                .iter()
                .enumerate()
                .map(|(i, age)| post(1000 + i as i64, *age))
                .collect();

            let merged = merge(followed, interest, amount);
            prop_assert!(merged.len() as i64 <= amount);
            for pair in merged.windows(2) {
                prop_assert!(pair[0].created_at >= pair[1].created_at);
            }
        }
    }
}
