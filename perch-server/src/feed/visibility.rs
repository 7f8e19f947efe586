//! Visibility rules: whether a viewer may see an author's content.
//!
//! The rules live in two forms that must stay in agreement: [`can_view`]
//! for single-author paths (profiles, single posts, engagement writes), and
//! [`CREATOR_VISIBLE_SQL`], the same decision embedded as a predicate in
//! the candidate-pool queries so it is never evaluated per row in a loop.

use rusqlite::{Connection, OptionalExtension};

use crate::db::error::{Result, StoreError};

/// Predicate over the `creator` user alias (joined on `p.user_creator_id`):
/// the viewer may see this creator's content because it is their own, the
/// creator is public, or the viewer follows the creator. Block filtering is
/// a separate `creator.blocked = 0` clause so blocked authors drop out of
/// pools outright. Binds `:viewer`.
pub(crate) const CREATOR_VISIBLE_SQL: &str = "(p.user_creator_id = :viewer \
     OR creator.is_public = 1 \
     OR EXISTS (SELECT 1 FROM follows fv \
                WHERE fv.follower_id = :viewer AND fv.following_id = p.user_creator_id))";

/// Decide whether `viewer_id` may see content authored by `author_id`.
///
/// Precedence:
/// 1. self: always visible, before any block or privacy check;
/// 2. a blocked viewer account ([`StoreError::ViewerBlocked`]) or a blocked
///    author account ([`StoreError::AuthorBlocked`]) — distinct kinds, the
///    HTTP layer maps them to different status codes;
/// 3. a follow edge viewer -> author;
/// 4. the author being public;
/// 5. otherwise [`StoreError::UserIsPrivate`].
pub fn can_view(conn: &Connection, viewer_id: i64, author_id: i64) -> Result<()> {
    if viewer_id == author_id {
        return ensure_user_exists(conn, viewer_id);
    }

    let row = conn
        .query_row(
            "SELECT author.is_public, author.blocked,
                    (SELECT blocked FROM users WHERE id = ?1),
                    EXISTS (SELECT 1 FROM follows
                            WHERE follower_id = ?1 AND following_id = ?2)
             FROM users author WHERE author.id = ?2",
            (viewer_id, author_id),
            |row| {
                Ok((
                    row.get::<_, i64>(0)? != 0,
                    row.get::<_, i64>(1)? != 0,
                    row.get::<_, Option<i64>>(2)?,
                    row.get::<_, i64>(3)? != 0,
                ))
            },
        )
        .optional()?;

    let (author_public, author_blocked, viewer_blocked, follows) =
        row.ok_or(StoreError::UserNotFound)?;

    match viewer_blocked {
        None => return Err(StoreError::UserNotFound),
        Some(b) if b != 0 => return Err(StoreError::ViewerBlocked),
        Some(_) => {}
    }
    if author_blocked {
        return Err(StoreError::AuthorBlocked);
    }
    if follows || author_public {
        return Ok(());
    }
    Err(StoreError::UserIsPrivate)
}

/// Reject requests from unknown or blocked viewer accounts before running
/// any pool query.
pub fn ensure_active_viewer(conn: &Connection, viewer_id: i64) -> Result<()> {
    let blocked: Option<i64> = conn
        .query_row(
            "SELECT blocked FROM users WHERE id = ?",
            [viewer_id],
            |row| row.get(0),
        )
        .optional()?;
    match blocked {
        None => Err(StoreError::UserNotFound),
        Some(b) if b != 0 => Err(StoreError::ViewerBlocked),
        Some(_) => Ok(()),
    }
}

fn ensure_user_exists(conn: &Connection, user_id: i64) -> Result<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM users WHERE id = ?)",
        [user_id],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(StoreError::UserNotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{FollowRepository, UserRepository};
    use crate::db::testing::{add_user, block_user, mem_db};

    #[test]
    fn self_is_always_visible() {
        let db = mem_db();
        let user = add_user(&db, "wren", false);
        block_user(&db, user);

        let conn = db.connection().unwrap();
        assert!(can_view(&conn, user, user).is_ok());
    }

    #[test]
    fn public_author_is_visible() {
        let db = mem_db();
        let viewer = add_user(&db, "wren", true);
        let author = add_user(&db, "robin", true);

        let conn = db.connection().unwrap();
        assert!(can_view(&conn, viewer, author).is_ok());
    }

    #[test]
    fn private_author_requires_follow() {
        let db = mem_db();
        let viewer = add_user(&db, "wren", true);
        let author = add_user(&db, "heron", false);

        let conn = db.connection().unwrap();
        assert!(matches!(
            can_view(&conn, viewer, author),
            Err(StoreError::UserIsPrivate)
        ));

        FollowRepository::new(db.pool.clone())
            .follow(viewer, author)
            .unwrap();
        assert!(can_view(&conn, viewer, author).is_ok());
    }

    #[test]
    fn removing_the_follow_edge_revokes_visibility() {
        let db = mem_db();
        let viewer = add_user(&db, "wren", true);
        let author = add_user(&db, "heron", false);
        let follows = FollowRepository::new(db.pool.clone());

        follows.follow(viewer, author).unwrap();
        let conn = db.connection().unwrap();
        assert!(can_view(&conn, viewer, author).is_ok());

        follows.unfollow(viewer, author).unwrap();
        assert!(matches!(
            can_view(&conn, viewer, author),
            Err(StoreError::UserIsPrivate)
        ));
    }

    #[test]
    fn blocked_sides_produce_distinct_errors() {
        let db = mem_db();
        let viewer = add_user(&db, "wren", true);
        let author = add_user(&db, "robin", true);
        FollowRepository::new(db.pool.clone())
            .follow(viewer, author)
            .unwrap();

        let conn = db.connection().unwrap();

        block_user(&db, author);
        assert!(matches!(
            can_view(&conn, viewer, author),
            Err(StoreError::AuthorBlocked)
        ));

        UserRepository::new(db.pool.clone())
            .set_blocked(author, false)
            .unwrap();
        block_user(&db, viewer);
        assert!(matches!(
            can_view(&conn, viewer, author),
            Err(StoreError::ViewerBlocked)
        ));
    }

    #[test]
    fn viewer_block_takes_precedence_over_author_block() {
        let db = mem_db();
        let viewer = add_user(&db, "wren", true);
        let author = add_user(&db, "robin", true);
        block_user(&db, viewer);
        block_user(&db, author);

        let conn = db.connection().unwrap();
        assert!(matches!(
            can_view(&conn, viewer, author),
            Err(StoreError::ViewerBlocked)
        ));
    }

    #[test]
    fn unknown_users_error() {
        let db = mem_db();
        let user = add_user(&db, "wren", true);
        let conn = db.connection().unwrap();

        assert!(matches!(
            can_view(&conn, user, 404),
            Err(StoreError::UserNotFound)
        ));
        assert!(matches!(
            can_view(&conn, 404, user),
            Err(StoreError::UserNotFound)
        ));
    }

    #[test]
    fn active_viewer_check() {
        let db = mem_db();
        let user = add_user(&db, "wren", true);
        let conn = db.connection().unwrap();

        assert!(ensure_active_viewer(&conn, user).is_ok());
        assert!(matches!(
            ensure_active_viewer(&conn, 404),
            Err(StoreError::UserNotFound)
        ));

        block_user(&db, user);
        assert!(matches!(
            ensure_active_viewer(&conn, user),
            Err(StoreError::ViewerBlocked)
        ));
    }
}
