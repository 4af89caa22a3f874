pub mod models;
pub mod next_video;

pub use next_video::*;
