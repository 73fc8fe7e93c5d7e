pub mod text;
pub mod traits;
