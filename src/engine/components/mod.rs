pub mod camera;
pub mod mesh;
