pub mod client;
pub mod models;
pub mod session;

pub use client::SpotifyClient;
pub use models::{CatalogTrack, PlaylistSpec, Visibility};
pub use session::CatalogSession;
