//! Repository traits

mod repositories;

pub use repositories::{
    LinkRepository, RepoResult, StatsRepository, UserRepository, ViewRepository,
};
