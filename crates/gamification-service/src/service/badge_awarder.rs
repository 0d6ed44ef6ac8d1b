//! 徽章发放服务
//!
//! 对用户当前计数器（提问数、回答数、声望）评估内置阈值规则，
//! 幂等地授予达标徽章。调用频率远高于实际新授予频率：每次调用
//! 一次快照读、一次持有集合读，只有真正新达标时才落写入。
//!
//! 幂等性两层兜底：先用持有集合过滤，再靠 (user_id, badge_id)
//! 唯一约束吃掉并发窗口内的重复插入。

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::error::{GamificationError, Result};
use crate::models::{UserBadge, UserCounters};
use crate::repository::{BadgeRepositoryTrait, UserRepositoryTrait};

/// 阈值规则关注的计数器维度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeMetric {
    Questions,
    Answers,
    Reputation,
}

/// 内置发放规则
///
/// 三个规则族相互独立，评估无顺序依赖。名字对应徽章目录条目，
/// 目录未配置的名字静默跳过。
#[derive(Debug, Clone, Copy)]
pub struct BadgeRule {
    pub name: &'static str,
    pub metric: BadgeMetric,
    pub threshold: i64,
    pub reason: &'static str,
}

impl BadgeRule {
    /// 计数器是否达到本规则的阈值
    pub fn met(&self, counters: &UserCounters) -> bool {
        let value = match self.metric {
            BadgeMetric::Questions => counters.question_count,
            BadgeMetric::Answers => counters.answer_count,
            BadgeMetric::Reputation => i64::from(counters.reputation),
        };
        value >= self.threshold
    }
}

/// 全部内置规则
pub const BADGE_RULES: &[BadgeRule] = &[
    // 提问数规则族
    BadgeRule {
        name: "Student",
        metric: BadgeMetric::Questions,
        threshold: 1,
        reason: "Asked first question",
    },
    BadgeRule {
        name: "Inquisitive",
        metric: BadgeMetric::Questions,
        threshold: 10,
        reason: "Asked 10 questions",
    },
    BadgeRule {
        name: "Socratic",
        metric: BadgeMetric::Questions,
        threshold: 50,
        reason: "Asked 50 questions",
    },
    // 回答数规则族
    BadgeRule {
        name: "Teacher",
        metric: BadgeMetric::Answers,
        threshold: 1,
        reason: "Answered first question",
    },
    BadgeRule {
        name: "Enlightened",
        metric: BadgeMetric::Answers,
        threshold: 10,
        reason: "Answered 10 questions",
    },
    BadgeRule {
        name: "Guru",
        metric: BadgeMetric::Answers,
        threshold: 50,
        reason: "Answered 50 questions",
    },
    // 声望规则族
    BadgeRule {
        name: "Trusted",
        metric: BadgeMetric::Reputation,
        threshold: 100,
        reason: "Reached 100 reputation",
    },
    BadgeRule {
        name: "Established",
        metric: BadgeMetric::Reputation,
        threshold: 500,
        reason: "Reached 500 reputation",
    },
    BadgeRule {
        name: "Notable",
        metric: BadgeMetric::Reputation,
        threshold: 1000,
        reason: "Reached 1000 reputation",
    },
    BadgeRule {
        name: "Famous",
        metric: BadgeMetric::Reputation,
        threshold: 5000,
        reason: "Reached 5000 reputation",
    },
];

/// 计算计数器达标的全部规则
pub fn qualifying_rules(counters: &UserCounters) -> Vec<&'static BadgeRule> {
    BADGE_RULES.iter().filter(|r| r.met(counters)).collect()
}

/// 徽章发放服务
pub struct BadgeAwarder<BR, UR>
where
    BR: BadgeRepositoryTrait,
    UR: UserRepositoryTrait,
{
    badge_repo: Arc<BR>,
    user_repo: Arc<UR>,
}

impl<BR, UR> BadgeAwarder<BR, UR>
where
    BR: BadgeRepositoryTrait,
    UR: UserRepositoryTrait,
{
    pub fn new(badge_repo: Arc<BR>, user_repo: Arc<UR>) -> Self {
        Self {
            badge_repo,
            user_repo,
        }
    }

    /// 检查并授予达标徽章，返回本次新授予的记录
    #[instrument(skip(self))]
    pub async fn check_and_award(&self, user_id: i64) -> Result<Vec<UserBadge>> {
        let counters = self
            .user_repo
            .counters(user_id)
            .await?
            .ok_or(GamificationError::UserNotFound(user_id))?;

        let held: HashSet<String> = self
            .badge_repo
            .list_held_badge_names(user_id)
            .await?
            .into_iter()
            .collect();

        let mut granted = Vec::new();

        for rule in qualifying_rules(&counters) {
            if held.contains(rule.name) {
                continue;
            }

            let Some(badge) = self.badge_repo.find_active_by_name(rule.name).await? else {
                // 目录未配置该徽章，静默跳过
                debug!(badge = rule.name, "徽章未配置，跳过发放");
                continue;
            };

            if let Some(user_badge) = self
                .badge_repo
                .create_user_badge(user_id, badge.id, rule.reason)
                .await?
            {
                info!(user_id, badge = rule.name, reason = rule.reason, "已授予徽章");
                granted.push(user_badge);
            }
        }

        Ok(granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::{Badge, BadgeTier};
    use crate::repository::traits::{MockBadgeRepositoryTrait, MockUserRepositoryTrait};

    fn counters(questions: i64, answers: i64, reputation: i32) -> UserCounters {
        UserCounters {
            question_count: questions,
            answer_count: answers,
            reputation,
        }
    }

    fn catalog_badge(id: i64, name: &str) -> Badge {
        Badge {
            id,
            name: name.to_string(),
            description: format!("{name} badge"),
            tier: BadgeTier::Bronze,
            icon: None,
            criteria: None,
            is_active: true,
        }
    }

    fn granted_badge(user_id: i64, badge_id: i64, reason: &str) -> UserBadge {
        UserBadge {
            id: badge_id * 100,
            user_id,
            badge_id,
            earned_at: Utc::now(),
            reason: Some(reason.to_string()),
        }
    }

    #[test]
    fn test_qualifying_rules_thresholds() {
        // 10 个提问 + 1200 声望：Student, Inquisitive, Trusted, Established, Notable
        let c = counters(10, 0, 1200);
        let names: Vec<_> = qualifying_rules(&c).iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["Student", "Inquisitive", "Trusted", "Established", "Notable"]
        );

        // 空计数器不触发任何规则
        assert!(qualifying_rules(&counters(0, 0, 0)).is_empty());

        // 全满
        let all = qualifying_rules(&counters(50, 50, 5000));
        assert_eq!(all.len(), BADGE_RULES.len());
    }

    #[test]
    fn test_rule_met_boundary_values() {
        let rule = &BADGE_RULES[1]; // Inquisitive: questions >= 10
        assert!(!rule.met(&counters(9, 0, 0)));
        assert!(rule.met(&counters(10, 0, 0)));
        assert!(rule.met(&counters(11, 0, 0)));
    }

    #[tokio::test]
    async fn test_check_and_award_grants_new_badges() {
        let mut badge_repo = MockBadgeRepositoryTrait::new();
        let mut user_repo = MockUserRepositoryTrait::new();

        user_repo
            .expect_counters()
            .times(1)
            .returning(|_| Ok(Some(counters(1, 0, 0))));
        badge_repo
            .expect_list_held_badge_names()
            .times(1)
            .returning(|_| Ok(vec![]));
        badge_repo
            .expect_find_active_by_name()
            .withf(|name| name == "Student")
            .times(1)
            .returning(|name| Ok(Some(catalog_badge(1, name))));
        badge_repo
            .expect_create_user_badge()
            .withf(|user_id, badge_id, reason| {
                *user_id == 7 && *badge_id == 1 && reason == "Asked first question"
            })
            .times(1)
            .returning(|user_id, badge_id, reason| {
                Ok(Some(granted_badge(user_id, badge_id, reason)))
            });

        let awarder = BadgeAwarder::new(Arc::new(badge_repo), Arc::new(user_repo));
        let granted = awarder.check_and_award(7).await.unwrap();
        assert_eq!(granted.len(), 1);
        assert_eq!(granted[0].badge_id, 1);
    }

    #[tokio::test]
    async fn test_check_and_award_is_idempotent() {
        let mut badge_repo = MockBadgeRepositoryTrait::new();
        let mut user_repo = MockUserRepositoryTrait::new();

        // 所有达标徽章都已持有：不查目录，不插入
        user_repo
            .expect_counters()
            .times(1)
            .returning(|_| Ok(Some(counters(10, 0, 1200))));
        badge_repo.expect_list_held_badge_names().times(1).returning(|_| {
            Ok(vec![
                "Student".to_string(),
                "Inquisitive".to_string(),
                "Trusted".to_string(),
                "Established".to_string(),
                "Notable".to_string(),
            ])
        });

        let awarder = BadgeAwarder::new(Arc::new(badge_repo), Arc::new(user_repo));
        let granted = awarder.check_and_award(7).await.unwrap();
        assert!(granted.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_badge_skipped_silently() {
        let mut badge_repo = MockBadgeRepositoryTrait::new();
        let mut user_repo = MockUserRepositoryTrait::new();

        user_repo
            .expect_counters()
            .times(1)
            .returning(|_| Ok(Some(counters(1, 0, 0))));
        badge_repo
            .expect_list_held_badge_names()
            .times(1)
            .returning(|_| Ok(vec![]));
        // 目录未配置 Student
        badge_repo
            .expect_find_active_by_name()
            .times(1)
            .returning(|_| Ok(None));

        let awarder = BadgeAwarder::new(Arc::new(badge_repo), Arc::new(user_repo));
        let granted = awarder.check_and_award(7).await.unwrap();
        assert!(granted.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_grant_collapses() {
        let mut badge_repo = MockBadgeRepositoryTrait::new();
        let mut user_repo = MockUserRepositoryTrait::new();

        user_repo
            .expect_counters()
            .times(1)
            .returning(|_| Ok(Some(counters(1, 0, 0))));
        badge_repo
            .expect_list_held_badge_names()
            .times(1)
            .returning(|_| Ok(vec![]));
        badge_repo
            .expect_find_active_by_name()
            .times(1)
            .returning(|name| Ok(Some(catalog_badge(1, name))));
        // 并发授予抢先：ON CONFLICT DO NOTHING 返回空行
        badge_repo
            .expect_create_user_badge()
            .times(1)
            .returning(|_, _, _| Ok(None));

        let awarder = BadgeAwarder::new(Arc::new(badge_repo), Arc::new(user_repo));
        let granted = awarder.check_and_award(7).await.unwrap();
        assert!(granted.is_empty());
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let badge_repo = MockBadgeRepositoryTrait::new();
        let mut user_repo = MockUserRepositoryTrait::new();

        user_repo.expect_counters().times(1).returning(|_| Ok(None));

        let awarder = BadgeAwarder::new(Arc::new(badge_repo), Arc::new(user_repo));
        let err = awarder.check_and_award(404).await.unwrap_err();
        assert!(matches!(err, GamificationError::UserNotFound(404)));
    }
}
