//! Feed composition: candidate pools, fixed-ratio merge, enrichment, and
//! the visibility gates in front of every engagement write.

pub mod candidates;
pub mod merge;
pub mod visibility;

use chrono::{DateTime, Utc};
use perch_types::{EnrichedPost, Post, TrendingHashtag, UserStatistics};
use std::time::Duration;

use crate::db::error::{Result, StoreError};
use crate::db::repositories::{
    FavoriteRepository, LikeRepository, PostRepository,
};
use crate::db::Database;

/// Hard cap on the administrative listing page size.
pub const MAX_ADMIN_PAGE_SIZE: i64 = 25;

/// Deadline applied to each candidate pool query. The underlying store
/// imposes no timeout of its own, so an unbounded feed query would hold a
/// worker forever.
const POOL_QUERY_DEADLINE: Duration = Duration::from_secs(5);

/// Request-scoped feed engine. Holds only the connection pool; every call
/// checks out its own connections, so nothing is shared across concurrent
/// requests beyond the store itself.
#[derive(Clone)]
pub struct FeedService {
    db: Database,
}

impl FeedService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Compose a feed page for the viewer: posts from followed authors and
    /// interest matches, merged 70/30, newest first, strictly older than
    /// `oldest`.
    ///
    /// The two pool queries share no data dependency and run concurrently,
    /// each under its own deadline.
    pub async fn get_feed(
        &self,
        viewer: i64,
        oldest: DateTime<Utc>,
        amount: i64,
    ) -> Result<Vec<EnrichedPost>> {
        if amount <= 0 {
            return Err(StoreError::InvalidAmount);
        }
        visibility::ensure_active_viewer(&*self.db.connection()?, viewer)?;

        let followed_limit = merge::followed_quota(amount);
        let interest_limit = merge::interest_quota(amount);

        let followed = self.run_pool(move |conn| {
            candidates::followed_pool(conn, viewer, oldest, followed_limit)
        });
        let interest = self.run_pool(move |conn| {
            candidates::interest_pool(conn, viewer, oldest, interest_limit)
        });
        let (followed, interest) = tokio::join!(followed, interest);

        Ok(merge::merge(followed?, interest?, amount))
    }

    /// Posts on a visited user's profile, newest first. Visibility against
    /// the visited user is resolved once, up front; an empty profile is an
    /// empty page, not an error.
    pub fn get_profile_posts(
        &self,
        viewer: i64,
        visited: i64,
        oldest: DateTime<Utc>,
        amount: i64,
        only_reposts: bool,
    ) -> Result<Vec<EnrichedPost>> {
        if amount <= 0 {
            return Err(StoreError::InvalidAmount);
        }
        let conn = self.db.connection()?;
        visibility::ensure_active_viewer(&conn, viewer)?;
        visibility::can_view(&conn, viewer, visited)?;
        candidates::profile_posts(&conn, viewer, visited, oldest, amount, only_reposts)
    }

    /// Original posts the visited user has favorited, same visibility rules
    /// as the profile.
    pub fn get_favorites_of(
        &self,
        viewer: i64,
        visited: i64,
        oldest: DateTime<Utc>,
        amount: i64,
    ) -> Result<Vec<EnrichedPost>> {
        if amount <= 0 {
            return Err(StoreError::InvalidAmount);
        }
        let conn = self.db.connection()?;
        visibility::ensure_active_viewer(&conn, viewer)?;
        visibility::can_view(&conn, viewer, visited)?;
        candidates::favorites_of(&conn, viewer, visited, oldest, amount)
    }

    /// Original posts carrying any of the given hashtags, offset-paginated.
    pub fn get_posts_by_hashtags(
        &self,
        viewer: i64,
        hashtags: &[String],
        offset: i64,
        amount: i64,
    ) -> Result<Vec<EnrichedPost>> {
        if amount <= 0 {
            return Err(StoreError::InvalidAmount);
        }
        let conn = self.db.connection()?;
        visibility::ensure_active_viewer(&conn, viewer)?;
        candidates::by_hashtags(&conn, viewer, hashtags, offset.max(0), amount)
    }

    /// Case-insensitive substring search over post text, offset-paginated.
    pub fn get_posts_by_text(
        &self,
        viewer: i64,
        text: &str,
        offset: i64,
        amount: i64,
    ) -> Result<Vec<EnrichedPost>> {
        if amount <= 0 {
            return Err(StoreError::InvalidAmount);
        }
        let conn = self.db.connection()?;
        visibility::ensure_active_viewer(&conn, viewer)?;
        candidates::by_text(&conn, viewer, text, offset.max(0), amount)
    }

    /// A single post enriched for the viewer, after a per-post visibility
    /// check against its creator.
    pub fn get_post_by_id(&self, viewer: i64, post_id: i64) -> Result<EnrichedPost> {
        let conn = self.db.connection()?;
        visibility::ensure_active_viewer(&conn, viewer)?;

        let post = self
            .posts()
            .get_post_row(post_id)?
            .ok_or(StoreError::PostNotFound)?;
        visibility::can_view(&conn, viewer, post.user_creator_id)?;

        candidates::single_post(&conn, viewer, post_id)?.ok_or(StoreError::PostNotFound)
    }

    /// Activity counters for the viewer over [from, to].
    pub fn get_statistics(
        &self,
        viewer: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<UserStatistics> {
        visibility::ensure_active_viewer(&*self.db.connection()?, viewer)?;
        self.posts().statistics(viewer, from, to)
    }

    /// Administrative listing of every post, no visibility filter, hard
    /// page cap.
    pub fn get_posts_for_admin(&self, offset: i64, amount: i64) -> Result<Vec<EnrichedPost>> {
        if amount <= 0 {
            return Err(StoreError::InvalidAmount);
        }
        if amount > MAX_ADMIN_PAGE_SIZE {
            return Err(StoreError::PageTooLarge);
        }
        candidates::admin_listing(&*self.db.connection()?, offset.max(0), amount)
    }

    /// Most-used hashtags over the given window.
    pub fn get_trending_hashtags(
        &self,
        since: DateTime<Utc>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TrendingHashtag>> {
        if limit <= 0 {
            return Err(StoreError::InvalidAmount);
        }
        crate::db::repositories::HashtagRepository::new(self.db.pool.clone())
            .trending(since, limit, offset.max(0))
    }

    // --- engagement writes, visibility-gated ---

    pub fn create_post(
        &self,
        viewer: i64,
        text: Option<&str>,
        image: Option<&str>,
    ) -> Result<Post> {
        visibility::ensure_active_viewer(&*self.db.connection()?, viewer)?;
        self.posts().create_post(viewer, text, image)
    }

    pub fn update_post(
        &self,
        viewer: i64,
        post_id: i64,
        text: Option<&str>,
        image: Option<&str>,
    ) -> Result<()> {
        visibility::ensure_active_viewer(&*self.db.connection()?, viewer)?;
        self.posts().update_post(post_id, viewer, text, image)
    }

    pub fn delete_post(&self, viewer: i64, post_id: i64) -> Result<()> {
        visibility::ensure_active_viewer(&*self.db.connection()?, viewer)?;
        self.posts().delete_post(post_id, viewer)
    }

    pub fn repost(&self, viewer: i64, post_id: i64) -> Result<Post> {
        self.gate_engagement(viewer, post_id)?;
        self.posts().create_repost(viewer, post_id)
    }

    pub fn unrepost(&self, viewer: i64, post_id: i64) -> Result<()> {
        visibility::ensure_active_viewer(&*self.db.connection()?, viewer)?;
        self.posts().delete_repost(viewer, post_id)
    }

    pub fn like(&self, viewer: i64, post_id: i64) -> Result<()> {
        self.gate_engagement(viewer, post_id)?;
        LikeRepository::new(self.db.pool.clone()).like(viewer, post_id)
    }

    pub fn unlike(&self, viewer: i64, post_id: i64) -> Result<()> {
        visibility::ensure_active_viewer(&*self.db.connection()?, viewer)?;
        LikeRepository::new(self.db.pool.clone()).unlike(viewer, post_id)
    }

    pub fn favorite(&self, viewer: i64, post_id: i64) -> Result<()> {
        self.gate_engagement(viewer, post_id)?;
        FavoriteRepository::new(self.db.pool.clone()).favorite(viewer, post_id)
    }

    pub fn unfavorite(&self, viewer: i64, post_id: i64) -> Result<()> {
        visibility::ensure_active_viewer(&*self.db.connection()?, viewer)?;
        FavoriteRepository::new(self.db.pool.clone()).unfavorite(viewer, post_id)
    }

    /// A viewer may only engage with content whose creator they can see.
    fn gate_engagement(&self, viewer: i64, post_id: i64) -> Result<()> {
        let conn = self.db.connection()?;
        visibility::ensure_active_viewer(&conn, viewer)?;
        let post = self
            .posts()
            .get_post_row(post_id)?
            .ok_or(StoreError::PostNotFound)?;
        visibility::can_view(&conn, viewer, post.user_creator_id)
    }

    fn posts(&self) -> PostRepository {
        PostRepository::new(self.db.pool.clone())
    }

    async fn run_pool<F>(&self, query: F) -> Result<Vec<EnrichedPost>>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<Vec<EnrichedPost>> + Send + 'static,
    {
        let db = self.db.clone();
        let task = tokio::task::spawn_blocking(move || {
            let conn = db.connection()?;
            query(&*conn)
        });
        match tokio::time::timeout(POOL_QUERY_DEADLINE, task).await {
            Err(_elapsed) => Err(StoreError::Timeout),
            Ok(Err(join_err)) => Err(StoreError::Internal(join_err.to_string())),
            Ok(Ok(result)) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{FollowRepository, InterestRepository};
    use crate::db::testing::{add_user, backdate_post, block_user, mem_db};
    use chrono::Duration;

    struct Fixture {
        db: Database,
        service: FeedService,
    }

    fn fixture() -> Fixture {
        let db = mem_db();
        let service = FeedService::new(db.clone());
        Fixture { db, service }
    }

    impl Fixture {
        fn follow(&self, follower: i64, followed: i64) {
            FollowRepository::new(self.db.pool.clone())
                .follow(follower, followed)
                .unwrap();
        }

        fn interests(&self, user: i64, interests: &[&str]) {
            InterestRepository::new(self.db.pool.clone())
                .set_interests(user, &interests.iter().map(|s| s.to_string()).collect::<Vec<_>>())
                .unwrap();
        }

        fn post_at(&self, user: i64, text: &str, minutes_ago: i64) -> Post {
            let post = self
                .service
                .create_post(user, Some(text), None)
                .unwrap();
            backdate_post(
                &self.db,
                post.post_id,
                Utc::now() - Duration::minutes(minutes_ago),
            );
            post
        }

        fn cursor(&self) -> DateTime<Utc> {
            Utc::now() + Duration::minutes(1)
        }
    }

    #[tokio::test]
    async fn feed_combines_follow_and_interest_by_recency() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let followed_author = add_user(&f.db, "followed", true);
        let interest_author = add_user(&f.db, "catposter", true);

        f.follow(viewer, followed_author);
        f.interests(viewer, &["cats"]);

        // followed author posted more recently than the interest match
        let hello = f.post_at(followed_author, "hello", 10);
        let cats = f.post_at(interest_author, "cats are great #cats", 20);

        let feed = f.service.get_feed(viewer, f.cursor(), 10).await.unwrap();
        let ids: Vec<i64> = feed.iter().map(|p| p.post_id).collect();
        assert_eq!(ids, vec![hello.post_id, cats.post_id]);
    }

    #[tokio::test]
    async fn private_unfollowed_author_is_excluded() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let private_author = add_user(&f.db, "private", false);

        f.interests(viewer, &["cats"]);
        f.post_at(private_author, "secret cat pics #cats", 5);

        let feed = f.service.get_feed(viewer, f.cursor(), 10).await.unwrap();
        assert!(feed.is_empty());
    }

    #[tokio::test]
    async fn merge_ratio_bounds_each_pool() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let followed_author = add_user(&f.db, "followed", true);
        let interest_author = add_user(&f.db, "tagged", true);

        f.follow(viewer, followed_author);
        f.interests(viewer, &["rust"]);

        for i in 0..9 {
            f.post_at(followed_author, &format!("followed {i}"), 100 + i);
        }
        for i in 0..5 {
            f.post_at(interest_author, &format!("interest {i} #rust"), 200 + i);
        }

        let feed = f.service.get_feed(viewer, f.cursor(), 10).await.unwrap();
        assert_eq!(feed.len(), 10);

        let from_followed = feed
            .iter()
            .filter(|p| p.poster.id == followed_author)
            .count();
        let from_interest = feed
            .iter()
            .filter(|p| p.poster.id == interest_author)
            .count();
        assert_eq!(from_followed, 7);
        assert_eq!(from_interest, 3);

        for pair in feed.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn shortfall_is_not_backfilled_from_the_other_pool() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let interest_author = add_user(&f.db, "tagged", true);

        f.interests(viewer, &["rust"]);
        for i in 0..10 {
            f.post_at(interest_author, &format!("interest {i} #rust"), 100 + i);
        }

        // Followed pool is empty; interest quota for amount=10 is 3 and the
        // shortfall stays unfilled.
        let feed = f.service.get_feed(viewer, f.cursor(), 10).await.unwrap();
        assert_eq!(feed.len(), 3);
    }

    #[tokio::test]
    async fn cursor_is_strictly_exclusive() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let author = add_user(&f.db, "author", true);
        f.follow(viewer, author);

        for i in 0..6 {
            f.post_at(author, &format!("post {i}"), 10 * (i + 1));
        }

        let page1 = f.service.get_feed(viewer, f.cursor(), 3).await.unwrap();
        // amount=3 gives the followed pool a quota of 2
        assert_eq!(page1.len(), 2);

        let next_cursor = page1.last().unwrap().created_at;
        let page2 = f.service.get_feed(viewer, next_cursor, 3).await.unwrap();

        for post in &page2 {
            assert!(post.created_at < next_cursor);
        }
        let ids1: Vec<i64> = page1.iter().map(|p| p.post_id).collect();
        for post in &page2 {
            assert!(!ids1.contains(&post.post_id), "page overlap at {}", post.post_id);
        }
    }

    #[tokio::test]
    async fn repost_visibility_follows_the_creator_not_the_poster() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let reposter = add_user(&f.db, "reposter", true);
        let private_creator = add_user(&f.db, "private", false);
        let public_creator = add_user(&f.db, "public", true);

        f.follow(viewer, reposter);
        // the reposter can see the private creator, the viewer cannot
        f.follow(reposter, private_creator);

        let hidden = f.post_at(private_creator, "hidden", 30);
        let visible = f.post_at(public_creator, "visible", 40);
        f.service.repost(reposter, hidden.post_id).unwrap();
        f.service.repost(reposter, visible.post_id).unwrap();

        let feed = f.service.get_feed(viewer, f.cursor(), 10).await.unwrap();
        assert_eq!(feed.len(), 1);
        let only = &feed[0];
        assert!(only.is_repost());
        assert_eq!(only.creator.id, public_creator);
        assert_eq!(only.poster.id, reposter);
    }

    #[tokio::test]
    async fn interest_pool_never_surfaces_followed_authors() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let author = add_user(&f.db, "author", true);

        f.follow(viewer, author);
        f.interests(viewer, &["rust"]);
        f.post_at(author, "both pools? #rust", 5);

        // amount=1 gives the followed pool a quota of 0; the post must not
        // leak back in through the interest pool.
        let feed = f.service.get_feed(viewer, f.cursor(), 1).await.unwrap();
        assert!(feed.is_empty());
    }

    #[tokio::test]
    async fn enrichment_counts_and_flags() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let author = add_user(&f.db, "author", true);
        let reposter_a = add_user(&f.db, "ra", true);
        let reposter_b = add_user(&f.db, "rb", true);

        f.follow(viewer, author);
        let post = f.post_at(author, "popular #rust @viewer", 10);

        f.service.like(viewer, post.post_id).unwrap();
        f.service.like(reposter_a, post.post_id).unwrap();
        f.service.like(reposter_b, post.post_id).unwrap();
        f.service.repost(reposter_a, post.post_id).unwrap();
        f.service.repost(reposter_b, post.post_id).unwrap();
        f.service.favorite(viewer, post.post_id).unwrap();

        let feed = f.service.get_feed(viewer, f.cursor(), 10).await.unwrap();
        let enriched = feed
            .iter()
            .find(|p| p.post_id == post.post_id)
            .expect("original missing from feed");

        assert_eq!(enriched.number_likes, 3);
        assert_eq!(enriched.number_reposts, 2);
        assert_eq!(enriched.hashtags, vec!["rust"]);
        assert_eq!(enriched.mentions, vec![viewer]);
        assert!(enriched.did_i_like);
        assert!(enriched.did_i_favorite);
        assert!(!enriched.did_i_repost);
        assert_eq!(enriched.poster, enriched.creator);
    }

    #[tokio::test]
    async fn blocked_viewer_cannot_fetch_a_feed() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        block_user(&f.db, viewer);

        let err = f.service.get_feed(viewer, f.cursor(), 10).await.unwrap_err();
        assert!(matches!(err, StoreError::ViewerBlocked));
    }

    #[tokio::test]
    async fn blocked_author_drops_out_of_the_feed() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let author = add_user(&f.db, "author", true);

        f.follow(viewer, author);
        f.post_at(author, "about to be moderated", 5);
        block_user(&f.db, author);

        let feed = f.service.get_feed(viewer, f.cursor(), 10).await.unwrap();
        assert!(feed.is_empty());
    }

    #[tokio::test]
    async fn invalid_amount_is_rejected() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);

        assert!(matches!(
            f.service.get_feed(viewer, f.cursor(), 0).await,
            Err(StoreError::InvalidAmount)
        ));
        assert!(matches!(
            f.service.get_profile_posts(viewer, viewer, f.cursor(), -3, false),
            Err(StoreError::InvalidAmount)
        ));
    }

    #[test]
    fn profile_requires_visibility_but_empty_is_ok() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let private_user = add_user(&f.db, "private", false);
        let public_user = add_user(&f.db, "public", true);

        assert!(matches!(
            f.service
                .get_profile_posts(viewer, private_user, f.cursor(), 10, false),
            Err(StoreError::UserIsPrivate)
        ));

        // an empty public profile is an empty page, not an error
        let posts = f
            .service
            .get_profile_posts(viewer, public_user, f.cursor(), 10, false)
            .unwrap();
        assert!(posts.is_empty());

        // the owner always sees their own profile
        let own = f
            .service
            .get_profile_posts(private_user, private_user, f.cursor(), 10, false)
            .unwrap();
        assert!(own.is_empty());
    }

    #[test]
    fn profile_only_reposts_filter() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let visited = add_user(&f.db, "visited", true);
        let author = add_user(&f.db, "author", true);

        let original = f.post_at(author, "original", 20);
        f.post_at(visited, "their own", 10);
        f.service.repost(visited, original.post_id).unwrap();

        let all = f
            .service
            .get_profile_posts(viewer, visited, f.cursor(), 10, false)
            .unwrap();
        assert_eq!(all.len(), 2);

        let reposts = f
            .service
            .get_profile_posts(viewer, visited, f.cursor(), 10, true)
            .unwrap();
        assert_eq!(reposts.len(), 1);
        assert!(reposts[0].is_repost());
        assert_eq!(reposts[0].creator.id, author);
        assert_eq!(reposts[0].poster.id, visited);
    }

    #[test]
    fn hashtag_search_matches_any_tag_and_respects_privacy() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let public_author = add_user(&f.db, "public", true);
        let private_author = add_user(&f.db, "private", false);

        f.post_at(public_author, "a #rust note", 10);
        f.post_at(public_author, "a #birds note", 20);
        f.post_at(private_author, "hidden #rust note", 5);

        let hits = f
            .service
            .get_posts_by_hashtags(
                viewer,
                &["RUST".to_string(), "birds".to_string()],
                0,
                10,
            )
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|p| p.poster.id == public_author));
    }

    #[test]
    fn text_search_is_case_insensitive_substring() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let author = add_user(&f.db, "author", true);

        f.post_at(author, "Shipping the Feed Engine", 10);
        f.post_at(author, "unrelated", 20);

        let hits = f
            .service
            .get_posts_by_text(viewer, "feed engine", 0, 10)
            .unwrap();
        assert_eq!(hits.len(), 1);

        let offset_past_all = f
            .service
            .get_posts_by_text(viewer, "feed engine", 5, 10)
            .unwrap();
        assert!(offset_past_all.is_empty());
    }

    #[test]
    fn admin_listing_caps_the_page_size() {
        let f = fixture();
        let author = add_user(&f.db, "author", false);
        f.post_at(author, "private post", 10);

        assert!(matches!(
            f.service.get_posts_for_admin(0, MAX_ADMIN_PAGE_SIZE + 1),
            Err(StoreError::PageTooLarge)
        ));

        // no visibility filter, flags computed for no viewer
        let listing = f.service.get_posts_for_admin(0, 25).unwrap();
        assert_eq!(listing.len(), 1);
        assert!(!listing[0].did_i_like);
    }

    #[test]
    fn single_post_enforces_visibility() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let private_author = add_user(&f.db, "private", false);

        let post = f.post_at(private_author, "members only", 5);
        assert!(matches!(
            f.service.get_post_by_id(viewer, post.post_id),
            Err(StoreError::UserIsPrivate)
        ));

        f.follow(viewer, private_author);
        let enriched = f.service.get_post_by_id(viewer, post.post_id).unwrap();
        assert_eq!(enriched.post_id, post.post_id);
    }

    #[test]
    fn engagement_is_gated_by_creator_visibility() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let private_author = add_user(&f.db, "private", false);

        let post = f.post_at(private_author, "members only", 5);
        assert!(matches!(
            f.service.like(viewer, post.post_id),
            Err(StoreError::UserIsPrivate)
        ));
        assert!(matches!(
            f.service.repost(viewer, post.post_id),
            Err(StoreError::UserIsPrivate)
        ));
    }

    #[test]
    fn favorites_listing_returns_bookmarked_originals() {
        let f = fixture();
        let viewer = add_user(&f.db, "viewer", true);
        let visited = add_user(&f.db, "visited", true);
        let author = add_user(&f.db, "author", true);

        let post = f.post_at(author, "worth keeping", 10);
        f.post_at(author, "not kept", 20);
        f.service.favorite(visited, post.post_id).unwrap();

        let favorites = f
            .service
            .get_favorites_of(viewer, visited, f.cursor(), 10)
            .unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].post_id, post.post_id);
    }

    #[test]
    fn trending_reflects_recent_tag_usage() {
        let f = fixture();
        let author = add_user(&f.db, "author", true);

        f.post_at(author, "#rust one", 10);
        f.post_at(author, "#rust two", 20);
        f.post_at(author, "#birds three", 30);

        let since = Utc::now() - Duration::hours(1);
        let trending = f.service.get_trending_hashtags(since, 10, 0).unwrap();
        assert_eq!(trending[0].hashtag, "rust");
        assert_eq!(trending[0].uses, 2);
    }
}
