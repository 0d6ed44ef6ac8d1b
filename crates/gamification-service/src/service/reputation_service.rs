//! 声望计算服务
//!
//! 消费投票 / 采纳路径上报的计分事件，按固定分值表调整用户声望。
//! 调整通过仓储的原子自增落库（下限为零），每次成功调整后触发一次
//! 徽章检查——声望阈值可能刚被跨越。
//!
//! 发内容本身不加分，但会触发徽章检查（首问 / 首答徽章由此达成），
//! 通过 `on_question_posted` / `on_answer_posted` 钩子接入。

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::error::{GamificationError, Result};
use crate::models::{ScoringEvent, UserBadge};
use crate::repository::{BadgeRepositoryTrait, UserRepositoryTrait};
use crate::service::badge_awarder::BadgeAwarder;

/// 一次声望调整的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReputationChange {
    pub user_id: i64,
    /// 应用的净增量（flip 事件为新旧方向的差值）
    pub delta: i32,
    /// 调整后的声望（已钳制到 >= 0）
    pub reputation: i32,
}

/// 声望计算服务
pub struct ReputationService<UR, BR>
where
    UR: UserRepositoryTrait,
    BR: BadgeRepositoryTrait,
{
    user_repo: Arc<UR>,
    badge_awarder: Arc<BadgeAwarder<BR, UR>>,
}

impl<UR, BR> ReputationService<UR, BR>
where
    UR: UserRepositoryTrait,
    BR: BadgeRepositoryTrait,
{
    pub fn new(user_repo: Arc<UR>, badge_awarder: Arc<BadgeAwarder<BR, UR>>) -> Self {
        Self {
            user_repo,
            badge_awarder,
        }
    }

    /// 应用一个计分事件，返回每个接收方的调整结果
    ///
    /// 采纳事件携带两个接收方（回答作者 +15、提问者 +2），逐个应用。
    /// 徽章检查失败只记录告警，不影响已落库的声望调整。
    #[instrument(skip(self))]
    pub async fn apply_event(&self, event: ScoringEvent) -> Result<Vec<ReputationChange>> {
        let mut changes = Vec::new();

        for adjustment in event.adjustments() {
            let reputation = self
                .user_repo
                .adjust_reputation(adjustment.user_id, adjustment.delta)
                .await?
                .ok_or(GamificationError::UserNotFound(adjustment.user_id))?;

            info!(
                user_id = adjustment.user_id,
                delta = adjustment.delta,
                reputation,
                "声望已更新"
            );

            // 声望阈值可能刚被跨越，触发徽章检查
            if let Err(e) = self.badge_awarder.check_and_award(adjustment.user_id).await {
                warn!(
                    user_id = adjustment.user_id,
                    error = %e,
                    "声望更新后的徽章检查失败"
                );
            }

            changes.push(ReputationChange {
                user_id: adjustment.user_id,
                delta: adjustment.delta,
                reputation,
            });
        }

        Ok(changes)
    }

    /// 新提问钩子：不加分，只做徽章检查
    #[instrument(skip(self))]
    pub async fn on_question_posted(&self, user_id: i64) -> Result<Vec<UserBadge>> {
        self.badge_awarder.check_and_award(user_id).await
    }

    /// 新回答钩子：不加分，只做徽章检查
    #[instrument(skip(self))]
    pub async fn on_answer_posted(&self, user_id: i64) -> Result<Vec<UserBadge>> {
        self.badge_awarder.check_and_award(user_id).await
    }
}
