//! 徽章相关实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::BadgeTier;

/// 徽章目录条目
///
/// 静态参照数据，由运营流程维护；发放服务只读。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: i64,
    /// 徽章名（唯一），发放规则按名字查目录
    pub name: String,
    pub description: String,
    pub tier: BadgeTier,
    #[sqlx(default)]
    pub icon: Option<String>,
    /// 获取条件的展示文案
    #[sqlx(default)]
    pub criteria: Option<String>,
    /// 下线的徽章不再发放，已授予的保留
    pub is_active: bool,
}

/// 用户徽章授予记录
///
/// (user_id, badge_id) 唯一——同一徽章每用户至多授予一次。
/// 只插入，正常运行中从不更新或删除。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserBadge {
    pub id: i64,
    pub user_id: i64,
    pub badge_id: i64,
    pub earned_at: DateTime<Utc>,
    /// 触发授予的条件描述
    #[sqlx(default)]
    pub reason: Option<String>,
}

/// 用户计数器快照
///
/// 徽章阈值判断的输入：提问数、回答数、当前声望。
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct UserCounters {
    pub question_count: i64,
    pub answer_count: i64,
    pub reputation: i32,
}
