//! 数据库仓储层
//!
//! 提供投票、采纳、声望、徽章的数据访问，封装 SQL 操作细节。
//! 跨行原子单元（投票写入、采纳切换）的事务边界收拢在仓储方法内部，
//! 服务层只依赖 trait 抽象。

pub mod acceptance_repo;
pub mod badge_repo;
pub mod traits;
pub mod user_repo;
pub mod vote_repo;

pub use acceptance_repo::AcceptanceRepository;
pub use badge_repo::BadgeRepository;
pub use traits::{
    AcceptanceRepositoryTrait, BadgeRepositoryTrait, UserRepositoryTrait, VoteRepositoryTrait,
};
pub use user_repo::UserRepository;
pub use vote_repo::VoteRepository;
