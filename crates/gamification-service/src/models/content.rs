//! 内容实体（采纳视角）
//!
//! 问题与回答的内容字段归内容服务所有，本子系统只读取归属字段，
//! 并独占 `accepted` 标志的状态迁移。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 回答（核心相关列）
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: i64,
    /// 所属问题 ID
    pub question_id: i64,
    /// 回答作者 ID
    pub user_id: i64,
    /// 是否被采纳（每个问题至多一个）
    pub accepted: bool,
    pub upvote_count: i32,
    pub downvote_count: i32,
    pub created_at: DateTime<Utc>,
}

/// 采纳操作的原子单元结果
///
/// `changed = false` 表示目标回答原本就是已采纳状态，调用方不应
/// 重复触发计分事件。
#[derive(Debug, Clone)]
pub struct AcceptanceOutcome {
    /// 采纳后的目标回答
    pub answer: Answer,
    /// 提问者 ID（+2 分的接收方）
    pub question_author_id: i64,
    /// 被替换下来的原采纳回答 ID（如有）
    pub previous_accepted_id: Option<i64>,
    /// 是否发生了实际状态迁移
    pub changed: bool,
}
