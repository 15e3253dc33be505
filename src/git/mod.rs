pub mod commands;
pub mod repository;

pub use commands::GitCli;
pub use repository::RepoCache;
