pub use super::banners::Entity as Banners;
pub use super::gallery_images::Entity as GalleryImages;
pub use super::users::Entity as Users;
pub use super::videos::Entity as Videos;
