//! Domain entities - the core business objects.

mod post;

pub use post::{
    MAX_SLUG_LEN, MAX_TITLE_LEN, NewPost, Post, PostChanges, PostStatus, validate_slug,
    validate_title,
};
