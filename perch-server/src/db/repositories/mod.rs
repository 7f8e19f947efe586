mod favorite_repository;
mod follow_repository;
mod hashtag_repository;
mod interest_repository;
mod like_repository;
mod post_repository;
mod user_repository;

pub use favorite_repository::FavoriteRepository;
pub use follow_repository::FollowRepository;
pub use hashtag_repository::HashtagRepository;
pub use interest_repository::InterestRepository;
pub use like_repository::LikeRepository;
pub use post_repository::{PostRepository, MAX_TEXT_LENGTH};
pub use user_repository::UserRepository;
