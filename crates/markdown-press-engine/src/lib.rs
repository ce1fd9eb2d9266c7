pub mod convert;
pub mod io;
pub mod render;
pub mod template;

// Re-export key types for easier usage
pub use convert::*;
pub use io::*;
pub use render::{LineClass, Stage, classify_line, render};
pub use template::*;
