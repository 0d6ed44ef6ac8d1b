//! 领域模型定义
//!
//! 包含投票、采纳、计分、徽章的核心实体

pub mod badge;
pub mod content;
pub mod enums;
pub mod scoring;
pub mod vote;

// 重新导出常用类型
pub use badge::{Badge, UserBadge, UserCounters};
pub use content::{AcceptanceOutcome, Answer};
pub use enums::{BadgeTier, TargetKind, VoteType};
pub use scoring::{
    ACCEPTING_ANSWER, ANSWER_ACCEPTED, ANSWER_DOWNVOTE, ANSWER_UPVOTE, QUESTION_DOWNVOTE,
    QUESTION_UPVOTE, ReputationAdjustment, ScoringEvent, vote_points,
};
pub use vote::{CastResult, Vote, VoteOutcome, VoteTally, VoteTarget};
