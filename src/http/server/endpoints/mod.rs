pub mod authorize;
pub mod callback;
pub mod data;
pub mod landing;
