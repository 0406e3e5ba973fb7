pub mod camera;
pub mod setup;

pub use camera::{follow_player, CAMERA_PIXELS_PER_UNIT};
pub use setup::setup;
