//! 问答社区激励服务
//!
//! 提供投票、声望、徽章、回答采纳等社区激励功能。
//!
//! ## 核心功能
//!
//! - **投票**：对问题/回答的赞成与反对，禁止自投，同向重投幂等，反向重投原地翻转
//! - **声望计分**：投票与采纳驱动的声望增减，下限为零，数据库侧原子更新
//! - **徽章授予**：按提问数、回答数、声望阈值自动授予，重复授予幂等
//! - **回答采纳**：提问者采纳回答，同一问题至多一个采纳，切换原子完成
//! - **查询**：声望、徽章列表、投票状态、票数统计的只读入口
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `repository`: 数据库仓储层
//! - `service`: 业务服务层

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{GamificationError, Result};
pub use models::{
    AcceptanceOutcome, Answer, Badge, BadgeTier, CastResult, ScoringEvent, TargetKind, UserBadge,
    UserCounters, Vote, VoteOutcome, VoteTally, VoteTarget, VoteType,
};
pub use service::{
    AcceptanceService, BadgeAwarder, Gamification, QueryService, ReputationChange,
    ReputationService, VoteLedger,
};
