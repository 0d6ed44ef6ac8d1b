//! 查询服务
//!
//! 声望、徽章、投票状态与票数的只读入口。不触发任何计分或授予。

use std::sync::Arc;

use tracing::instrument;

use crate::error::{GamificationError, Result};
use crate::models::{UserBadge, VoteTally, VoteTarget, VoteType};
use crate::repository::{BadgeRepositoryTrait, UserRepositoryTrait, VoteRepositoryTrait};

/// 查询服务
pub struct QueryService<VR, UR, BR>
where
    VR: VoteRepositoryTrait,
    UR: UserRepositoryTrait,
    BR: BadgeRepositoryTrait,
{
    vote_repo: Arc<VR>,
    user_repo: Arc<UR>,
    badge_repo: Arc<BR>,
}

impl<VR, UR, BR> QueryService<VR, UR, BR>
where
    VR: VoteRepositoryTrait,
    UR: UserRepositoryTrait,
    BR: BadgeRepositoryTrait,
{
    pub fn new(vote_repo: Arc<VR>, user_repo: Arc<UR>, badge_repo: Arc<BR>) -> Self {
        Self {
            vote_repo,
            user_repo,
            badge_repo,
        }
    }

    /// 查用户当前声望
    #[instrument(skip(self))]
    pub async fn get_reputation(&self, user_id: i64) -> Result<i32> {
        self.user_repo
            .get_reputation(user_id)
            .await?
            .ok_or(GamificationError::UserNotFound(user_id))
    }

    /// 列出用户的徽章，按获得时间倒序
    #[instrument(skip(self))]
    pub async fn get_badges(&self, user_id: i64) -> Result<Vec<UserBadge>> {
        self.badge_repo.list_user_badges(user_id).await
    }

    /// 查某用户是否对某目标投过指定类型的票
    #[instrument(skip(self))]
    pub async fn has_voted(
        &self,
        user_id: i64,
        target: VoteTarget,
        vote_type: VoteType,
    ) -> Result<bool> {
        let vote = self.vote_repo.find_vote(user_id, target).await?;
        Ok(vote.is_some_and(|v| v.vote_type == vote_type))
    }

    /// 读目标当前票数
    #[instrument(skip(self))]
    pub async fn vote_tally(&self, target: VoteTarget) -> Result<VoteTally> {
        self.vote_repo.tally(target).await?.ok_or(match target {
            VoteTarget::Question(id) => GamificationError::QuestionNotFound(id),
            VoteTarget::Answer(id) => GamificationError::AnswerNotFound(id),
        })
    }

    /// 从投票行重算目标票数（对账用，绕过维护计数列）
    #[instrument(skip(self))]
    pub async fn recount_vote_tally(&self, target: VoteTarget) -> Result<VoteTally> {
        self.vote_repo.recount_tally(target).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::Vote;
    use crate::repository::traits::{
        MockBadgeRepositoryTrait, MockUserRepositoryTrait, MockVoteRepositoryTrait,
    };

    fn service(
        vote_repo: MockVoteRepositoryTrait,
        user_repo: MockUserRepositoryTrait,
        badge_repo: MockBadgeRepositoryTrait,
    ) -> QueryService<MockVoteRepositoryTrait, MockUserRepositoryTrait, MockBadgeRepositoryTrait>
    {
        QueryService::new(Arc::new(vote_repo), Arc::new(user_repo), Arc::new(badge_repo))
    }

    fn upvote_on_answer(user_id: i64, answer_id: i64) -> Vote {
        Vote {
            id: 1,
            user_id,
            question_id: None,
            answer_id: Some(answer_id),
            vote_type: VoteType::Upvote,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_reputation_missing_user() {
        let mut user_repo = MockUserRepositoryTrait::new();
        user_repo.expect_get_reputation().returning(|_| Ok(None));

        let service = service(
            MockVoteRepositoryTrait::new(),
            user_repo,
            MockBadgeRepositoryTrait::new(),
        );
        let err = service.get_reputation(7).await.unwrap_err();
        assert!(matches!(err, GamificationError::UserNotFound(7)));
    }

    #[tokio::test]
    async fn test_has_voted_matches_vote_type() {
        let mut vote_repo = MockVoteRepositoryTrait::new();
        vote_repo
            .expect_find_vote()
            .returning(|user_id, target| Ok(Some(upvote_on_answer(user_id, target.id()))));

        let service = service(
            vote_repo,
            MockUserRepositoryTrait::new(),
            MockBadgeRepositoryTrait::new(),
        );
        assert!(
            service
                .has_voted(2, VoteTarget::Answer(5), VoteType::Upvote)
                .await
                .unwrap()
        );
        assert!(
            !service
                .has_voted(2, VoteTarget::Answer(5), VoteType::Downvote)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_has_voted_without_vote() {
        let mut vote_repo = MockVoteRepositoryTrait::new();
        vote_repo.expect_find_vote().returning(|_, _| Ok(None));

        let service = service(
            vote_repo,
            MockUserRepositoryTrait::new(),
            MockBadgeRepositoryTrait::new(),
        );
        assert!(
            !service
                .has_voted(2, VoteTarget::Question(5), VoteType::Upvote)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_vote_tally_missing_target() {
        let mut vote_repo = MockVoteRepositoryTrait::new();
        vote_repo.expect_tally().returning(|_| Ok(None));

        let service = service(
            vote_repo,
            MockUserRepositoryTrait::new(),
            MockBadgeRepositoryTrait::new(),
        );
        let err = service.vote_tally(VoteTarget::Question(9)).await.unwrap_err();
        assert!(matches!(err, GamificationError::QuestionNotFound(9)));
    }

    #[tokio::test]
    async fn test_vote_tally_present() {
        let mut vote_repo = MockVoteRepositoryTrait::new();
        vote_repo.expect_tally().returning(|_| {
            Ok(Some(VoteTally {
                upvote_count: 4,
                downvote_count: 1,
            }))
        });

        let service = service(
            vote_repo,
            MockUserRepositoryTrait::new(),
            MockBadgeRepositoryTrait::new(),
        );
        let tally = service.vote_tally(VoteTarget::Answer(9)).await.unwrap();
        assert_eq!(tally.score(), 3);
    }
}
