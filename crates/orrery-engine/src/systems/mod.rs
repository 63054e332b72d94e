pub mod lighting;
pub mod raycast;
pub mod sdf_render;
#[cfg(feature = "vectors")]
pub mod vector;
