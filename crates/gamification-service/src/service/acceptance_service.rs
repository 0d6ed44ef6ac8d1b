//! 回答采纳服务
//!
//! 采纳请求的入口：仓储原子单元的重试包装、状态迁移时向声望计算器
//! 的上报。重复采纳同一回答不产生计分事件——只有实际状态迁移才计分。

use std::sync::Arc;

use tracing::{info, instrument};

use sage_shared::retry::{RetryPolicy, retry_with_policy};

use crate::error::{GamificationError, Result};
use crate::models::{Answer, ScoringEvent};
use crate::repository::{AcceptanceRepositoryTrait, BadgeRepositoryTrait, UserRepositoryTrait};
use crate::service::reputation_service::ReputationService;

/// 回答采纳服务
pub struct AcceptanceService<AR, UR, BR>
where
    AR: AcceptanceRepositoryTrait,
    UR: UserRepositoryTrait,
    BR: BadgeRepositoryTrait,
{
    acceptance_repo: Arc<AR>,
    reputation: Arc<ReputationService<UR, BR>>,
    retry_policy: RetryPolicy,
}

impl<AR, UR, BR> AcceptanceService<AR, UR, BR>
where
    AR: AcceptanceRepositoryTrait,
    UR: UserRepositoryTrait,
    BR: BadgeRepositoryTrait,
{
    pub fn new(acceptance_repo: Arc<AR>, reputation: Arc<ReputationService<UR, BR>>) -> Self {
        Self {
            acceptance_repo,
            reputation,
            retry_policy: RetryPolicy::contention(),
        }
    }

    /// 采纳回答
    ///
    /// 只有提问者可以采纳；原采纳回答（如有）在同一原子单元内被取消。
    /// 成功且发生状态迁移时，回答作者 +15、提问者 +2。
    #[instrument(skip(self))]
    pub async fn accept_answer(&self, answer_id: i64, acting_user_id: i64) -> Result<Answer> {
        let outcome = retry_with_policy(
            &self.retry_policy,
            "accept_answer",
            GamificationError::is_retryable,
            || {
                self.acceptance_repo
                    .accept_answer_exclusive(answer_id, acting_user_id)
            },
        )
        .await?;

        if outcome.changed {
            info!(
                answer_id,
                question_author_id = outcome.question_author_id,
                previous_accepted_id = ?outcome.previous_accepted_id,
                "回答已采纳"
            );

            self.reputation
                .apply_event(ScoringEvent::AnswerAccepted {
                    answer_author_id: outcome.answer.user_id,
                    question_author_id: outcome.question_author_id,
                })
                .await?;
        }

        Ok(outcome.answer)
    }
}
