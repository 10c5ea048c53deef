pub mod anchor;
pub mod annotation;
pub mod config;
pub mod dimension;
pub mod motion;
pub mod shape;
pub mod vec3;

pub use anchor::*;
pub use annotation::*;
pub use config::*;
pub use dimension::*;
pub use motion::*;
pub use shape::*;
pub use vec3::{Vec3, DOWN, ORIGIN, UP};
