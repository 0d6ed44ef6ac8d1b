//! 投票 / 声望 / 徽章服务错误类型
//!
//! 定义服务层的业务错误和系统错误。自投票、重复同向投票等属于正常业务
//! 结果，由 `VoteOutcome` 表达，不进入错误通道。

use thiserror::Error;

/// 投票 / 声望 / 徽章服务错误类型
#[derive(Debug, Error)]
pub enum GamificationError {
    // === 目标不存在 ===
    #[error("问题不存在: {0}")]
    QuestionNotFound(i64),

    #[error("回答不存在: {0}")]
    AnswerNotFound(i64),

    #[error("用户不存在: {0}")]
    UserNotFound(i64),

    // === 权限错误 ===
    #[error("无权执行该操作: user_id={user_id}, operation={operation}")]
    PermissionDenied {
        user_id: i64,
        operation: &'static str,
    },

    // === 系统错误 ===
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("并发冲突，请重试")]
    ConcurrencyConflict,

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 服务 Result 类型别名
pub type Result<T> = std::result::Result<T, GamificationError>;

impl GamificationError {
    /// 检查是否为可重试的错误
    ///
    /// 投票与采纳的原子单元都设计为可安全重放（重复请求塌缩为 no-op，
    /// 唯一约束阻止重复写入），所以瞬时错误直接整体重试。
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::ConcurrencyConflict)
    }

    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(
            self,
            Self::Database(_) | Self::ConcurrencyConflict | Self::Internal(_)
        )
    }

    /// 获取错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::QuestionNotFound(_) => "QUESTION_NOT_FOUND",
            Self::AnswerNotFound(_) => "ANSWER_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::ConcurrencyConflict => "CONCURRENCY_CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 将 sqlx 错误映射为服务错误
    ///
    /// 唯一约束冲突说明并发请求抢先写入了同一行（如两个首投撞上
    /// uq_votes_user_*），属于瞬时冲突，整体重试后会塌缩为 flip 或 no-op。
    pub fn from_write_conflict(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error()
            && db_err.is_unique_violation()
        {
            return Self::ConcurrencyConflict;
        }
        Self::Database(err)
    }
}
