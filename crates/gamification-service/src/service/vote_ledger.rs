//! 投票账本服务
//!
//! 投票请求的入口：自投票判定、写入原子单元的重试包装、
//! 合格结果向声望计算器的上报。
//!
//! 上报规则：Created 和 Flipped 各产生恰好一个计分事件；
//! Unchanged（同向重复）和自投票不产生事件。

use std::sync::Arc;

use tracing::{debug, instrument};

use sage_shared::retry::{RetryPolicy, retry_with_policy};

use crate::error::{GamificationError, Result};
use crate::models::{CastResult, ScoringEvent, VoteOutcome, VoteTarget, VoteType};
use crate::repository::{BadgeRepositoryTrait, UserRepositoryTrait, VoteRepositoryTrait};
use crate::service::reputation_service::ReputationService;

/// 投票账本服务
pub struct VoteLedger<VR, UR, BR>
where
    VR: VoteRepositoryTrait,
    UR: UserRepositoryTrait,
    BR: BadgeRepositoryTrait,
{
    vote_repo: Arc<VR>,
    reputation: Arc<ReputationService<UR, BR>>,
    retry_policy: RetryPolicy,
}

impl<VR, UR, BR> VoteLedger<VR, UR, BR>
where
    VR: VoteRepositoryTrait,
    UR: UserRepositoryTrait,
    BR: BadgeRepositoryTrait,
{
    pub fn new(vote_repo: Arc<VR>, reputation: Arc<ReputationService<UR, BR>>) -> Self {
        Self {
            vote_repo,
            reputation,
            retry_policy: RetryPolicy::contention(),
        }
    }

    /// 投票
    ///
    /// 对自己内容投票静默忽略；目标不存在报 NotFound；
    /// 瞬时冲突（并发首投撞唯一约束）在内部重试，调用方不感知。
    #[instrument(skip(self))]
    pub async fn cast_vote(
        &self,
        voter_id: i64,
        target: VoteTarget,
        vote_type: VoteType,
    ) -> Result<VoteOutcome> {
        let author_id = self
            .vote_repo
            .target_author(target)
            .await?
            .ok_or_else(|| match target {
                VoteTarget::Question(id) => GamificationError::QuestionNotFound(id),
                VoteTarget::Answer(id) => GamificationError::AnswerNotFound(id),
            })?;

        // 不能给自己的内容投票：正常结果，不是错误
        if author_id == voter_id {
            debug!(voter_id, ?target, "忽略自投票");
            return Ok(VoteOutcome::SelfVoteIgnored);
        }

        let result = retry_with_policy(
            &self.retry_policy,
            "cast_vote",
            GamificationError::is_retryable,
            || self.vote_repo.cast_vote(voter_id, target, vote_type),
        )
        .await?;

        let outcome = match result {
            CastResult::Created(vote) => {
                self.reputation
                    .apply_event(ScoringEvent::VoteCast {
                        kind: target.kind(),
                        author_id,
                        vote_type,
                    })
                    .await?;
                VoteOutcome::Created { vote }
            }
            // 同向重复：不可撤销投票，无变化也无计分
            CastResult::Unchanged(vote) => VoteOutcome::Unchanged { vote },
            CastResult::Flipped { vote, previous } => {
                self.reputation
                    .apply_event(ScoringEvent::VoteFlipped {
                        kind: target.kind(),
                        author_id,
                        from: previous,
                        to: vote_type,
                    })
                    .await?;
                VoteOutcome::Flipped { vote, previous }
            }
        };

        Ok(outcome)
    }
}
