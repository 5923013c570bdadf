pub mod prelude;

pub mod banners;
pub mod gallery_images;
pub mod users;
pub mod videos;
