pub mod directory;
pub mod recommendation;
pub mod slots;
