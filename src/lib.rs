pub mod image_setup;
pub mod utils;
