pub mod mock_geometry;
pub mod traits;
pub mod types;

pub use mock_geometry::MockGeometry;
pub use traits::*;
pub use types::*;
