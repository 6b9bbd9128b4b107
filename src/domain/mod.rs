pub mod assembly;
pub mod types;
pub mod window;
pub mod zone;

pub use assembly::*;
pub use types::*;
pub use window::*;
pub use zone::*;
