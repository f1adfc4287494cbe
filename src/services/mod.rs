pub mod anime_service;
pub mod anime_service_impl;
pub use anime_service::{AnimeError, AnimeService};
pub use anime_service_impl::SeaOrmAnimeService;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{AuthError, AuthenticatedUser, UserService};
pub use user_service_impl::SeaOrmUserService;
