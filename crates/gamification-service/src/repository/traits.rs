//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试。
//! 跨行的原子单元（投票写入、采纳切换）整体收拢在单个仓储方法内，
//! 事务边界不跨越 trait 接口。

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    AcceptanceOutcome, CastResult, UserBadge, UserCounters, Vote, VoteTally, VoteTarget, VoteType,
};

/// 投票仓储接口
///
/// 独占 votes 表的写入，以及目标内容上票数计数列的事务内维护。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepositoryTrait: Send + Sync {
    /// 查目标内容的作者，目标不存在返回 None
    async fn target_author(&self, target: VoteTarget) -> Result<Option<i64>>;

    /// 投票写入的原子单元
    ///
    /// 单个事务内完成查找、创建或翻转，以及票数计数列的增减。
    /// 并发首投撞上唯一约束时返回 `ConcurrencyConflict`，由调用方重试。
    async fn cast_vote(
        &self,
        voter_id: i64,
        target: VoteTarget,
        vote_type: VoteType,
    ) -> Result<CastResult>;

    /// 查某用户对某目标的投票
    async fn find_vote(&self, voter_id: i64, target: VoteTarget) -> Result<Option<Vote>>;

    /// 读目标的维护计数，目标不存在返回 None
    async fn tally(&self, target: VoteTarget) -> Result<Option<VoteTally>>;

    /// 从投票行聚合重算计数（对账用），与维护计数无关
    async fn recount_tally(&self, target: VoteTarget) -> Result<VoteTally>;
}

/// 采纳仓储接口
///
/// 独占 answers.accepted 标志的状态迁移。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AcceptanceRepositoryTrait: Send + Sync {
    /// 采纳切换的原子单元
    ///
    /// 单个事务内锁定问题行、校验操作人、取消原采纳、设置新采纳。
    /// 目标已是采纳状态时返回 `changed = false`，不做写入。
    async fn accept_answer_exclusive(
        &self,
        answer_id: i64,
        acting_user_id: i64,
    ) -> Result<AcceptanceOutcome>;
}

/// 用户仓储接口
///
/// 独占 users.reputation 的变更，提供徽章判断所需的计数器快照。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// 查用户当前声望，用户不存在返回 None
    async fn get_reputation(&self, user_id: i64) -> Result<Option<i32>>;

    /// 原子地调整声望并返回新值，下限为零
    ///
    /// 实现必须使用数据库侧的原子自增（而非读-改-写），
    /// 保证并发计分事件不丢更新。用户不存在返回 None。
    async fn adjust_reputation(&self, user_id: i64, delta: i32) -> Result<Option<i32>>;

    /// 查用户计数器快照（提问数 / 回答数 / 声望）
    async fn counters(&self, user_id: i64) -> Result<Option<UserCounters>>;
}

/// 徽章仓储接口
///
/// 目录只读；授予记录只插入，幂等性由 (user_id, badge_id) 唯一约束兜底。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BadgeRepositoryTrait: Send + Sync {
    /// 按名字查在用的目录条目
    async fn find_active_by_name(&self, name: &str) -> Result<Option<crate::models::Badge>>;

    /// 查用户已持有的徽章名集合
    async fn list_held_badge_names(&self, user_id: i64) -> Result<Vec<String>>;

    /// 插入授予记录
    ///
    /// `ON CONFLICT DO NOTHING`：并发重复授予时返回 None，不报错。
    async fn create_user_badge(
        &self,
        user_id: i64,
        badge_id: i64,
        reason: &str,
    ) -> Result<Option<UserBadge>>;

    /// 列出用户的全部授予记录，按获得时间倒序
    async fn list_user_badges(&self, user_id: i64) -> Result<Vec<UserBadge>>;
}
