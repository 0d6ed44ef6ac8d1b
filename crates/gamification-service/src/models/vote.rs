//! 投票相关实体定义
//!
//! 投票行由 Vote Ledger 独占写入：首投创建、异向改票原地翻转，
//! 本子系统从不删除投票。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{TargetKind, VoteType};
use crate::error::{GamificationError, Result};

/// 投票目标引用
///
/// 问题票与回答票互斥，数据库中用两个可空外键列表达，内存中用
/// tagged union 表达，杜绝"两列都有值"的非法状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum VoteTarget {
    Question(i64),
    Answer(i64),
}

impl VoteTarget {
    pub fn kind(self) -> TargetKind {
        match self {
            Self::Question(_) => TargetKind::Question,
            Self::Answer(_) => TargetKind::Answer,
        }
    }

    pub fn id(self) -> i64 {
        match self {
            Self::Question(id) | Self::Answer(id) => id,
        }
    }
}

/// 投票
///
/// 唯一性由数据库约束保证：同一用户对同一目标至多一行。
/// flip 只改 vote_type，created_at 保持首投时间。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: i64,
    /// 投票人 ID
    pub user_id: i64,
    /// 目标问题 ID（与 answer_id 互斥）
    #[sqlx(default)]
    pub question_id: Option<i64>,
    /// 目标回答 ID（与 question_id 互斥）
    #[sqlx(default)]
    pub answer_id: Option<i64>,
    /// 投票方向
    pub vote_type: VoteType,
    /// 首投时间，flip 不更新
    pub created_at: DateTime<Utc>,
}

impl Vote {
    /// 还原目标引用
    ///
    /// 数据库 CHECK 约束保证两列恰好一列非空，违反互斥的行视为
    /// 数据损坏，以内部错误上报而不是 panic。
    pub fn target(&self) -> Result<VoteTarget> {
        match (self.question_id, self.answer_id) {
            (Some(qid), None) => Ok(VoteTarget::Question(qid)),
            (None, Some(aid)) => Ok(VoteTarget::Answer(aid)),
            _ => Err(GamificationError::Internal(format!(
                "投票行违反目标互斥: id={}",
                self.id
            ))),
        }
    }
}

/// 原子单元内的投票写入结果（仓储层）
#[derive(Debug, Clone)]
pub enum CastResult {
    /// 首次投票，新行已创建
    Created(Vote),
    /// 与已有投票同向，未做任何写入
    Unchanged(Vote),
    /// 异向改票，原行已翻转
    Flipped { vote: Vote, previous: VoteType },
}

/// 投票操作对外结果
///
/// 自投票是正常结果而非错误，调用方据此决定是否提示用户。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum VoteOutcome {
    /// 新投票已记录
    Created { vote: Vote },
    /// 与已有投票同向，无变化（投票不可通过重复提交撤销）
    Unchanged { vote: Vote },
    /// 方向已翻转
    Flipped { vote: Vote, previous: VoteType },
    /// 对自己内容投票，静默忽略
    SelfVoteIgnored,
}

/// 目标的赞踩计数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub upvote_count: i32,
    pub downvote_count: i32,
}

impl VoteTally {
    /// 净得分（赞减踩），排序用
    pub fn score(&self) -> i32 {
        self.upvote_count - self.downvote_count
    }
}
