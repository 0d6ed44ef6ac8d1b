//! 计分事件与分值表
//!
//! 计分事件是投票 / 采纳路径通知声望计算器的内部消息，携带计算分值
//! 增量所需的全部信息。flip 事件携带新旧两个方向，计算器据此应用
//! 净增量而不是重复应用单向分值。

use serde::Serialize;

use super::enums::{TargetKind, VoteType};

/// 问题被赞，作者得分
pub const QUESTION_UPVOTE: i32 = 5;
/// 问题被踩，作者扣分
pub const QUESTION_DOWNVOTE: i32 = -2;
/// 回答被赞，作者得分
pub const ANSWER_UPVOTE: i32 = 10;
/// 回答被踩，作者扣分
pub const ANSWER_DOWNVOTE: i32 = -2;
/// 回答被采纳，回答作者得分
pub const ANSWER_ACCEPTED: i32 = 15;
/// 采纳回答，提问者得分
pub const ACCEPTING_ANSWER: i32 = 2;

/// 单向投票的分值
pub fn vote_points(kind: TargetKind, vote_type: VoteType) -> i32 {
    match (kind, vote_type) {
        (TargetKind::Question, VoteType::Upvote) => QUESTION_UPVOTE,
        (TargetKind::Question, VoteType::Downvote) => QUESTION_DOWNVOTE,
        (TargetKind::Answer, VoteType::Upvote) => ANSWER_UPVOTE,
        (TargetKind::Answer, VoteType::Downvote) => ANSWER_DOWNVOTE,
    }
}

/// 单个用户的声望增量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReputationAdjustment {
    pub user_id: i64,
    pub delta: i32,
}

/// 计分事件
///
/// 每个合格的投票结果恰好产生一个事件；采纳事件同时携带两个接收方。
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase", tag = "event")]
pub enum ScoringEvent {
    /// 首次投票
    VoteCast {
        kind: TargetKind,
        author_id: i64,
        vote_type: VoteType,
    },
    /// 改票，作为一次迁移上报而非两个独立事件
    VoteFlipped {
        kind: TargetKind,
        author_id: i64,
        from: VoteType,
        to: VoteType,
    },
    /// 回答被采纳
    AnswerAccepted {
        answer_author_id: i64,
        question_author_id: i64,
    },
}

impl ScoringEvent {
    /// 计算事件产生的全部声望增量
    ///
    /// flip 应用新旧方向的净差值（如回答 踩→赞 为 +12），
    /// 而不是先 +10 再 -2 的两次独立应用。
    pub fn adjustments(&self) -> Vec<ReputationAdjustment> {
        match *self {
            Self::VoteCast {
                kind,
                author_id,
                vote_type,
            } => vec![ReputationAdjustment {
                user_id: author_id,
                delta: vote_points(kind, vote_type),
            }],
            Self::VoteFlipped {
                kind,
                author_id,
                from,
                to,
            } => vec![ReputationAdjustment {
                user_id: author_id,
                delta: vote_points(kind, to) - vote_points(kind, from),
            }],
            Self::AnswerAccepted {
                answer_author_id,
                question_author_id,
            } => vec![
                ReputationAdjustment {
                    user_id: answer_author_id,
                    delta: ANSWER_ACCEPTED,
                },
                ReputationAdjustment {
                    user_id: question_author_id,
                    delta: ACCEPTING_ANSWER,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_points_table() {
        assert_eq!(vote_points(TargetKind::Question, VoteType::Upvote), 5);
        assert_eq!(vote_points(TargetKind::Question, VoteType::Downvote), -2);
        assert_eq!(vote_points(TargetKind::Answer, VoteType::Upvote), 10);
        assert_eq!(vote_points(TargetKind::Answer, VoteType::Downvote), -2);
    }

    #[test]
    fn test_vote_cast_adjustment() {
        let event = ScoringEvent::VoteCast {
            kind: TargetKind::Answer,
            author_id: 9,
            vote_type: VoteType::Upvote,
        };
        assert_eq!(
            event.adjustments(),
            vec![ReputationAdjustment {
                user_id: 9,
                delta: 10
            }]
        );
    }

    #[test]
    fn test_flip_applies_net_delta() {
        // 回答 踩→赞：净 +12，而不是 +10
        let event = ScoringEvent::VoteFlipped {
            kind: TargetKind::Answer,
            author_id: 9,
            from: VoteType::Downvote,
            to: VoteType::Upvote,
        };
        assert_eq!(event.adjustments()[0].delta, 12);

        // 回答 赞→踩：净 -12
        let event = ScoringEvent::VoteFlipped {
            kind: TargetKind::Answer,
            author_id: 9,
            from: VoteType::Upvote,
            to: VoteType::Downvote,
        };
        assert_eq!(event.adjustments()[0].delta, -12);

        // 问题 赞→踩：净 -7
        let event = ScoringEvent::VoteFlipped {
            kind: TargetKind::Question,
            author_id: 9,
            from: VoteType::Upvote,
            to: VoteType::Downvote,
        };
        assert_eq!(event.adjustments()[0].delta, -7);
    }

    #[test]
    fn test_acceptance_rewards_both_parties() {
        let event = ScoringEvent::AnswerAccepted {
            answer_author_id: 3,
            question_author_id: 4,
        };
        let adjustments = event.adjustments();
        assert_eq!(adjustments.len(), 2);
        assert_eq!(
            adjustments[0],
            ReputationAdjustment {
                user_id: 3,
                delta: 15
            }
        );
        assert_eq!(
            adjustments[1],
            ReputationAdjustment {
                user_id: 4,
                delta: 2
            }
        );
    }
}
