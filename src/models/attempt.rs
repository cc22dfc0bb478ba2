use serde::{Deserialize, Serialize};

use crate::models::quiz::Question;

/// 稀疏答题卡
///
/// 下标对应题目位置，未作答为 `None`（JSON 中为 `null`）。
/// 长度只增长到最后一道已作答题目，末尾未作答的题不会出现。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet(Vec<Option<usize>>);

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录第 `index` 题的选择，覆盖之前的选择
    pub fn record(&mut self, index: usize, choice: usize) {
        if self.0.len() <= index {
            self.0.resize(index + 1, None);
        }
        self.0[index] = Some(choice);
    }

    pub fn get(&self, index: usize) -> Option<usize> {
        self.0.get(index).copied().flatten()
    }

    pub fn answered_count(&self) -> usize {
        self.0.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.answered_count() == 0
    }
}

impl From<Vec<Option<usize>>> for AnswerSheet {
    fn from(answers: Vec<Option<usize>>) -> Self {
        Self(answers)
    }
}

/// 成绩记录的复合主键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttemptKey {
    pub quiz_id: String,
    pub student_id: String,
    pub submitted_at: i64,
}

impl std::fmt::Display for AttemptKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[试卷 {} 学生 {} 提交于 {}]",
            self.quiz_id, self.student_id, self.submitted_at
        )
    }
}

/// 成绩记录（追加写入 `results`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub quiz_id: String,
    pub quiz_title: String,
    pub student_id: String,
    #[serde(default)]
    pub answers: AnswerSheet,
    pub score: usize,
    pub total: usize,
    pub submitted_at: i64,
    #[serde(default)]
    pub shared: bool,
}

impl AttemptRecord {
    pub fn key(&self) -> AttemptKey {
        AttemptKey {
            quiz_id: self.quiz_id.clone(),
            student_id: self.student_id.clone(),
            submitted_at: self.submitted_at,
        }
    }

    pub fn matches(&self, key: &AttemptKey) -> bool {
        self.quiz_id == key.quiz_id
            && self.student_id == key.student_id
            && self.submitted_at == key.submitted_at
    }
}

/// 回顾快照中的单道题（按作答时的选项顺序）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: usize,
}

impl From<&Question> for ReviewQuestion {
    fn from(q: &Question) -> Self {
        Self {
            question: q.question.clone(),
            options: q.options.clone(),
            answer: q.answer,
        }
    }
}

/// 最近一次作答的回顾快照（写入 `lastAttempt`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSnapshot {
    pub quiz_id: String,
    pub quiz_title: String,
    pub questions: Vec<ReviewQuestion>,
    #[serde(default)]
    pub student_answers: AnswerSheet,
    pub score: usize,
    pub total: usize,
    #[serde(default)]
    pub submitted_at: i64,
}

/// 一次已提交作答的完整结果
///
/// 由会话在提交时生成，之后分别转换为成绩记录和回顾快照。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptOutcome {
    pub quiz_id: String,
    pub quiz_title: String,
    pub student_id: String,
    /// 作答时呈现的题目（已打乱，答案下标已重算）
    pub questions: Vec<Question>,
    pub answers: AnswerSheet,
    pub score: usize,
    pub total: usize,
    pub submitted_at: i64,
}

impl AttemptOutcome {
    pub fn to_record(&self) -> AttemptRecord {
        AttemptRecord {
            quiz_id: self.quiz_id.clone(),
            quiz_title: self.quiz_title.clone(),
            student_id: self.student_id.clone(),
            answers: self.answers.clone(),
            score: self.score,
            total: self.total,
            submitted_at: self.submitted_at,
            shared: false,
        }
    }

    pub fn to_snapshot(&self) -> ReviewSnapshot {
        ReviewSnapshot {
            quiz_id: self.quiz_id.clone(),
            quiz_title: self.quiz_title.clone(),
            questions: self.questions.iter().map(ReviewQuestion::from).collect(),
            student_answers: self.answers.clone(),
            score: self.score,
            total: self.total,
            submitted_at: self.submitted_at,
        }
    }
}
