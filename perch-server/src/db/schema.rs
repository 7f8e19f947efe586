/// SQL schema for the Perch database.
/// Creates all tables with constraints, foreign keys, and indexes.
pub const SCHEMA: &str = r#"
-- Users mirrored from the identity service
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT UNIQUE NOT NULL,
    username TEXT UNIQUE NOT NULL,
    is_public INTEGER NOT NULL DEFAULT 1,
    blocked INTEGER NOT NULL DEFAULT 0,
    location TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

-- Follow edges (one-way relationships)
CREATE TABLE IF NOT EXISTS follows (
    follower_id INTEGER NOT NULL,
    following_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (follower_id, following_id),
    FOREIGN KEY (follower_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (following_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_follows_follower ON follows(follower_id);
CREATE INDEX IF NOT EXISTS idx_follows_following ON follows(following_id);

-- Declared interest keywords, stored lowercase to match hashtags
CREATE TABLE IF NOT EXISTS interests (
    user_id INTEGER NOT NULL,
    interest TEXT NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (user_id, interest),
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

-- Immutable post payloads, shared between an original and its reposts
CREATE TABLE IF NOT EXISTS contents (
    content_id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT CHECK(text IS NULL OR length(text) <= 1000),
    image TEXT
);

-- Post rows; poster == creator for originals, poster != creator for reposts
CREATE TABLE IF NOT EXISTS posts (
    post_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_poster_id INTEGER NOT NULL,
    user_creator_id INTEGER NOT NULL,
    content_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (user_poster_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (user_creator_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (content_id) REFERENCES contents(content_id)
);

CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at DESC);
CREATE INDEX IF NOT EXISTS idx_posts_poster ON posts(user_poster_id);
CREATE INDEX IF NOT EXISTS idx_posts_content ON posts(content_id);

CREATE TABLE IF NOT EXISTS hashtags (
    content_id INTEGER NOT NULL,
    hashtag TEXT NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (content_id, hashtag),
    FOREIGN KEY (content_id) REFERENCES contents(content_id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_hashtags_hashtag ON hashtags(hashtag);

CREATE TABLE IF NOT EXISTS mentions (
    content_id INTEGER NOT NULL,
    user_mention_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (content_id, user_mention_id),
    FOREIGN KEY (content_id) REFERENCES contents(content_id) ON DELETE CASCADE,
    FOREIGN KEY (user_mention_id) REFERENCES users(id) ON DELETE CASCADE
);

-- Likes attach to content, so all reposts share one like count
CREATE TABLE IF NOT EXISTS likes (
    content_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (content_id, user_id),
    FOREIGN KEY (content_id) REFERENCES contents(content_id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_likes_user ON likes(user_id);

CREATE TABLE IF NOT EXISTS favorites (
    content_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (content_id, user_id),
    FOREIGN KEY (content_id) REFERENCES contents(content_id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_favorites_user ON favorites(user_id);
"#;

/// Demo data for local development. Three mirrored users, a follow edge,
/// declared interests, and a couple of posts so a freshly seeded server
/// returns a non-empty feed.
pub const DEMO_DATA: &str = r#"
INSERT OR IGNORE INTO users (id, email, username, is_public, blocked, location, created_at) VALUES
    (1, 'wren@example.com', 'wren', 1, 0, 'Buenos Aires', '2024-01-01T00:00:00.000000Z'),
    (2, 'robin@example.com', 'robin', 1, 0, 'Madrid', '2024-01-02T00:00:00.000000Z'),
    (3, 'heron@example.com', 'heron', 0, 0, 'Lima', '2024-01-03T00:00:00.000000Z');

INSERT OR IGNORE INTO follows (follower_id, following_id, created_at) VALUES
    (1, 2, '2024-01-04T00:00:00.000000Z'),
    (2, 1, '2024-01-04T00:00:00.000000Z');

INSERT OR IGNORE INTO interests (user_id, interest, created_at) VALUES
    (1, 'rust', '2024-01-04T00:00:00.000000Z'),
    (1, 'birds', '2024-01-04T00:00:00.000000Z'),
    (2, 'birds', '2024-01-04T00:00:00.000000Z');

INSERT OR IGNORE INTO contents (content_id, text, image) VALUES
    (1, 'first light over the marsh #birds', NULL),
    (2, 'pattern matching all the way down #rust', NULL);

INSERT OR IGNORE INTO posts (post_id, user_poster_id, user_creator_id, content_id, created_at) VALUES
    (1, 2, 2, 1, '2024-01-05T08:00:00.000000Z'),
    (2, 1, 1, 2, '2024-01-05T09:00:00.000000Z');

INSERT OR IGNORE INTO hashtags (content_id, hashtag, created_at) VALUES
    (1, 'birds', '2024-01-05T08:00:00.000000Z'),
    (2, 'rust', '2024-01-05T09:00:00.000000Z');
"#;
