//! 业务服务层
//!
//! 投票、声望、徽章、采纳的业务编排：仓储之上的规则判断、
//! 计分事件分发与竞争冲突重试。`Gamification` 是面向上层的
//! 组装入口，把具体仓储接到各服务上。

pub mod acceptance_service;
pub mod badge_awarder;
pub mod query_service;
pub mod reputation_service;
pub mod vote_ledger;

pub use acceptance_service::AcceptanceService;
pub use badge_awarder::{BadgeAwarder, BadgeMetric, BadgeRule, BADGE_RULES};
pub use query_service::QueryService;
pub use reputation_service::{ReputationChange, ReputationService};
pub use vote_ledger::VoteLedger;

use std::sync::Arc;

use sqlx::PgPool;

use crate::repository::{
    AcceptanceRepository, BadgeRepository, UserRepository, VoteRepository,
};

/// 服务组装入口
///
/// 在同一个连接池上装配全部服务，内部仓储与声望计算器共享。
pub struct Gamification {
    pub votes: VoteLedger<VoteRepository, UserRepository, BadgeRepository>,
    pub acceptance: AcceptanceService<AcceptanceRepository, UserRepository, BadgeRepository>,
    pub reputation: Arc<ReputationService<UserRepository, BadgeRepository>>,
    pub queries: QueryService<VoteRepository, UserRepository, BadgeRepository>,
}

impl Gamification {
    pub fn new(pool: PgPool) -> Self {
        let vote_repo = Arc::new(VoteRepository::new(pool.clone()));
        let acceptance_repo = Arc::new(AcceptanceRepository::new(pool.clone()));
        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let badge_repo = Arc::new(BadgeRepository::new(pool));

        let badge_awarder = Arc::new(BadgeAwarder::new(badge_repo.clone(), user_repo.clone()));
        let reputation = Arc::new(ReputationService::new(user_repo.clone(), badge_awarder));

        Self {
            votes: VoteLedger::new(vote_repo.clone(), reputation.clone()),
            acceptance: AcceptanceService::new(acceptance_repo, reputation.clone()),
            reputation,
            queries: QueryService::new(vote_repo, user_repo, badge_repo),
        }
    }
}
