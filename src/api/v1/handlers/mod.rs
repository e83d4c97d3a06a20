pub mod fallback;
pub mod health;
pub mod members;
pub mod workspaces;
