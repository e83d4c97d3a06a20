pub mod error;
pub mod memory;
pub mod store;
pub mod workspace_repo;

pub use memory::MemoryWorkspaceStore;
pub use store::WorkspaceStore;
pub use workspace_repo::PgWorkspaceStore;
