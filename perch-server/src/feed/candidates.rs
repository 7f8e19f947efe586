//! Candidate pool queries.
//!
//! Every listing here is a single SQL pass that returns fully enriched
//! rows: post + content + poster/creator identities, aggregate counts, tag
//! lists, and the viewer's own interaction flags. Visibility is part of the
//! predicates, never a per-row check in a loop.

use chrono::{DateTime, Utc};
use perch_types::{timestamp, EnrichedPost, UserSummary};
use rusqlite::types::ToSql;
use rusqlite::{Connection, Row};

use super::visibility::CREATOR_VISIBLE_SQL;
use crate::db::error::{Result, StoreError};

/// Shared head of every enriched listing. Binds `:viewer` for the did-I-*
/// flags; a NULL viewer (admin listing) yields all-false flags. The content
/// join is an outer join on purpose: a post without its content row is an
/// integrity violation the mapper must detect, not a row to drop silently.
const ENRICHED_SELECT: &str = "\
SELECT
    p.post_id,
    p.content_id,
    p.created_at,
    poster.id, poster.username,
    creator.id, creator.username,
    c.content_id,
    c.text,
    c.image,
    (SELECT COUNT(*) FROM likes l WHERE l.content_id = p.content_id),
    (SELECT COUNT(*) FROM posts pr WHERE pr.content_id = p.content_id) - 1,
    (SELECT GROUP_CONCAT(h.hashtag) FROM hashtags h WHERE h.content_id = p.content_id),
    (SELECT GROUP_CONCAT(m.user_mention_id) FROM mentions m WHERE m.content_id = p.content_id),
    EXISTS (SELECT 1 FROM likes l WHERE l.content_id = p.content_id AND l.user_id = :viewer),
    EXISTS (SELECT 1 FROM posts pr WHERE pr.content_id = p.content_id
            AND pr.user_poster_id = :viewer AND pr.user_creator_id != :viewer),
    EXISTS (SELECT 1 FROM favorites f WHERE f.content_id = p.content_id AND f.user_id = :viewer)
FROM posts p
JOIN users poster ON poster.id = p.user_poster_id
JOIN users creator ON creator.id = p.user_creator_id
LEFT JOIN contents c ON c.content_id = p.content_id";

const RECENCY_ORDER: &str = "ORDER BY p.created_at DESC, p.post_id DESC";

/// Posts (originals and reposts) from authors the viewer follows, older
/// than the cursor. A repost stays in only if the *creator* passes
/// visibility; the poster being followed is not enough.
pub fn followed_pool(
    conn: &Connection,
    viewer: i64,
    oldest: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<EnrichedPost>> {
    let sql = format!(
        "{ENRICHED_SELECT}
         WHERE p.user_poster_id IN (SELECT following_id FROM follows WHERE follower_id = :viewer)
           AND p.created_at < :cursor
           AND poster.blocked = 0
           AND creator.blocked = 0
           AND (p.user_creator_id = p.user_poster_id OR {CREATOR_VISIBLE_SQL})
         {RECENCY_ORDER}
         LIMIT :limit"
    );
    let cursor = timestamp::to_store(&oldest);
    run_enriched(
        conn,
        &sql,
        &[(":viewer", &viewer), (":cursor", &cursor), (":limit", &limit)],
    )
}

/// Original posts matching the viewer's declared interests, older than the
/// cursor. Authors must be public, unblocked, not the viewer, and not
/// already followed — the followed-pool exclusion is what keeps a post from
/// surfacing through both pools.
pub fn interest_pool(
    conn: &Connection,
    viewer: i64,
    oldest: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<EnrichedPost>> {
    let sql = format!(
        "{ENRICHED_SELECT}
         WHERE p.user_poster_id = p.user_creator_id
           AND creator.is_public = 1
           AND creator.blocked = 0
           AND p.user_creator_id != :viewer
           AND p.user_creator_id NOT IN
               (SELECT following_id FROM follows WHERE follower_id = :viewer)
           AND p.created_at < :cursor
           AND EXISTS (SELECT 1 FROM hashtags h
                       JOIN interests i ON i.interest = h.hashtag AND i.user_id = :viewer
                       WHERE h.content_id = p.content_id)
         {RECENCY_ORDER}
         LIMIT :limit"
    );
    let cursor = timestamp::to_store(&oldest);
    run_enriched(
        conn,
        &sql,
        &[(":viewer", &viewer), (":cursor", &cursor), (":limit", &limit)],
    )
}

/// Everything a visited user has posted (or only their reposts), older than
/// the cursor. The caller has already resolved viewer-vs-visited
/// visibility; reposts of third-party content still honor the creator's
/// own visibility here.
pub fn profile_posts(
    conn: &Connection,
    viewer: i64,
    visited: i64,
    oldest: DateTime<Utc>,
    limit: i64,
    only_reposts: bool,
) -> Result<Vec<EnrichedPost>> {
    let repost_clause = if only_reposts {
        "AND p.user_poster_id != p.user_creator_id"
    } else {
        ""
    };
    let sql = format!(
        "{ENRICHED_SELECT}
         WHERE p.user_poster_id = :visited
           AND p.created_at < :cursor
           AND creator.blocked = 0
           AND (p.user_creator_id = p.user_poster_id OR {CREATOR_VISIBLE_SQL})
           {repost_clause}
         {RECENCY_ORDER}
         LIMIT :limit"
    );
    let cursor = timestamp::to_store(&oldest);
    run_enriched(
        conn,
        &sql,
        &[
            (":viewer", &viewer),
            (":visited", &visited),
            (":cursor", &cursor),
            (":limit", &limit),
        ],
    )
}

/// Original posts the visited user has favorited, older than the cursor.
pub fn favorites_of(
    conn: &Connection,
    viewer: i64,
    visited: i64,
    oldest: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<EnrichedPost>> {
    let sql = format!(
        "{ENRICHED_SELECT}
         JOIN favorites fav ON fav.content_id = p.content_id AND fav.user_id = :visited
         WHERE p.user_poster_id = p.user_creator_id
           AND p.created_at < :cursor
           AND creator.blocked = 0
           AND {CREATOR_VISIBLE_SQL}
         {RECENCY_ORDER}
         LIMIT :limit"
    );
    let cursor = timestamp::to_store(&oldest);
    run_enriched(
        conn,
        &sql,
        &[
            (":viewer", &viewer),
            (":visited", &visited),
            (":cursor", &cursor),
            (":limit", &limit),
        ],
    )
}

/// Original posts carrying any of the given hashtags, offset-paginated.
pub fn by_hashtags(
    conn: &Connection,
    viewer: i64,
    hashtags: &[String],
    offset: i64,
    limit: i64,
) -> Result<Vec<EnrichedPost>> {
    if hashtags.is_empty() {
        return Ok(Vec::new());
    }
    let tags: Vec<String> = hashtags.iter().map(|t| t.to_lowercase()).collect();
    let names: Vec<String> = (0..tags.len()).map(|i| format!(":tag{i}")).collect();
    let sql = format!(
        "{ENRICHED_SELECT}
         WHERE p.user_poster_id = p.user_creator_id
           AND creator.blocked = 0
           AND {CREATOR_VISIBLE_SQL}
           AND EXISTS (SELECT 1 FROM hashtags h
                       WHERE h.content_id = p.content_id AND h.hashtag IN ({}))
         {RECENCY_ORDER}
         LIMIT :limit OFFSET :offset",
        names.join(", ")
    );

    let mut params: Vec<(&str, &dyn ToSql)> = vec![
        (":viewer", &viewer),
        (":limit", &limit),
        (":offset", &offset),
    ];
    for (name, tag) in names.iter().zip(tags.iter()) {
        params.push((name.as_str(), tag));
    }
    run_enriched(conn, &sql, &params)
}

/// Original posts whose text contains the needle, case-insensitive,
/// offset-paginated. Substring matching only; anything smarter is a search
/// engine's job.
pub fn by_text(
    conn: &Connection,
    viewer: i64,
    text: &str,
    offset: i64,
    limit: i64,
) -> Result<Vec<EnrichedPost>> {
    let sql = format!(
        "{ENRICHED_SELECT}
         WHERE p.user_poster_id = p.user_creator_id
           AND creator.blocked = 0
           AND {CREATOR_VISIBLE_SQL}
           AND c.text IS NOT NULL
           AND LOWER(c.text) LIKE '%' || LOWER(:needle) || '%'
         {RECENCY_ORDER}
         LIMIT :limit OFFSET :offset"
    );
    run_enriched(
        conn,
        &sql,
        &[
            (":viewer", &viewer),
            (":needle", &text),
            (":limit", &limit),
            (":offset", &offset),
        ],
    )
}

/// Administrative listing: every post row, newest first, no visibility
/// filter. Flags are computed for no viewer and come back false.
pub fn admin_listing(conn: &Connection, offset: i64, limit: i64) -> Result<Vec<EnrichedPost>> {
    let viewer: Option<i64> = None;
    let sql = format!(
        "{ENRICHED_SELECT}
         {RECENCY_ORDER}
         LIMIT :limit OFFSET :offset"
    );
    run_enriched(
        conn,
        &sql,
        &[(":viewer", &viewer), (":limit", &limit), (":offset", &offset)],
    )
}

/// A single post, enriched for the viewer. Visibility is the caller's job.
pub fn single_post(conn: &Connection, viewer: i64, post_id: i64) -> Result<Option<EnrichedPost>> {
    let sql = format!("{ENRICHED_SELECT} WHERE p.post_id = :post_id");
    let mut posts = run_enriched(conn, &sql, &[(":viewer", &viewer), (":post_id", &post_id)])?;
    Ok(posts.pop())
}

fn run_enriched(
    conn: &Connection,
    sql: &str,
    params: &[(&str, &dyn ToSql)],
) -> Result<Vec<EnrichedPost>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, map_enriched_row)?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(post, content_present)| {
            if content_present {
                Ok(post)
            } else {
                Err(StoreError::ContentMissing(post.post_id))
            }
        })
        .collect()
}

/// Map one enriched row. The bool is whether the content row was actually
/// present; the caller turns a false into a page-level failure.
fn map_enriched_row(row: &Row) -> rusqlite::Result<(EnrichedPost, bool)> {
    let content_present = row.get::<_, Option<i64>>(7)?.is_some();
    let hashtags = row
        .get::<_, Option<String>>(12)?
        .map(|joined| joined.split(',').map(str::to_string).collect())
        .unwrap_or_default();
    let mentions = row
        .get::<_, Option<String>>(13)?
        .map(|joined| {
            joined
                .split(',')
                .filter_map(|id| id.parse().ok())
                .collect()
        })
        .unwrap_or_default();
    let raw_reposts: i64 = row.get(11)?;

    let post = EnrichedPost {
        post_id: row.get(0)?,
        content_id: row.get(1)?,
        created_at: crate::db::parse_ts(2, row.get(2)?)?,
        poster: UserSummary {
            id: row.get(3)?,
            username: row.get(4)?,
        },
        creator: UserSummary {
            id: row.get(5)?,
            username: row.get(6)?,
        },
        text: row.get(8)?,
        image: row.get(9)?,
        number_likes: row.get(10)?,
        number_reposts: raw_reposts.max(0),
        hashtags,
        mentions,
        did_i_like: row.get::<_, i64>(14)? != 0,
        did_i_repost: row.get::<_, i64>(15)? != 0,
        did_i_favorite: row.get::<_, i64>(16)? != 0,
    };

    Ok((post, content_present))
}
