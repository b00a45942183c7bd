#[path = "sakugabooru_client.rs"]
pub mod sakugabooru_client;

pub use sakugabooru_client::SakugabooruClient;
