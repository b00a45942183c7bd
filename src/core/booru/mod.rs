pub mod booru_models;
pub mod booru_service;

pub use booru_models::Post;
pub use booru_service::{BooruClient, BooruError, BooruService};
