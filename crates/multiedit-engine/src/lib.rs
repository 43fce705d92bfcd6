pub mod convert;
pub mod delimiters;
pub mod editor;
mod error;
pub mod math;
pub mod mode;

// Re-export key types for easier usage
pub use convert::*;
pub use delimiters::*;
pub use editor::*;
pub use error::Error;
pub use math::*;
pub use mode::EditorMode;
