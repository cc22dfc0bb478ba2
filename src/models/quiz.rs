use serde::{Deserialize, Serialize};

/// 每道题的选项数量
pub const OPTION_COUNT: usize = 4;
/// 每道题最短作答时间（秒）
pub const MIN_QUESTION_TIME: u32 = 5;
/// 未设置时间时的默认作答时间（秒）
pub const DEFAULT_QUESTION_TIME: u32 = 20;

fn default_time() -> u32 {
    DEFAULT_QUESTION_TIME
}

/// 单道选择题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    /// 正确选项在 `options` 中的下标
    pub answer: usize,
    #[serde(default = "default_time")]
    pub time: u32,
}

impl Question {
    pub fn new(question: impl Into<String>, options: Vec<String>, answer: usize, time: u32) -> Self {
        Self {
            question: question.into(),
            options,
            answer,
            time,
        }
    }

    /// 实际倒计时秒数，不低于 `MIN_QUESTION_TIME`
    pub fn time_limit(&self) -> u32 {
        self.time.max(MIN_QUESTION_TIME)
    }

    /// 正确选项文本，答案下标无效时返回 None
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.answer).map(String::as_str)
    }
}

/// 试卷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub quiz_id: String,
    pub title: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub created_at: i64,
}

impl Quiz {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// 按序号生成试卷ID，例如 `Q001`
    pub fn id_for_sequence(sequence: usize) -> String {
        format!("Q{:03}", sequence)
    }
}

/// 试卷录入草稿（也是 TOML 文件的格式）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizDraft {
    pub title: String,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

/// 题目录入草稿
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub answer: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

/// 试卷校验错误
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("试卷标题不能为空")]
    EmptyTitle,
    #[error("试卷至少需要一道题")]
    NoQuestions,
    #[error("第 {number} 题信息不完整")]
    IncompleteQuestion { number: usize },
    #[error("第 {number} 题需要 {expected} 个选项，实际 {actual} 个")]
    WrongOptionCount {
        number: usize,
        expected: usize,
        actual: usize,
    },
    #[error("第 {number} 题答案下标 {answer} 超出范围 [0, 3]")]
    AnswerOutOfRange { number: usize, answer: i64 },
}

impl QuestionDraft {
    /// 校验并转换为题目，`number` 从 1 开始，仅用于错误提示
    pub fn validate(&self, number: usize) -> Result<Question, ValidationError> {
        let text = self.question.trim();
        let options: Vec<String> = self.options.iter().map(|o| o.trim().to_string()).collect();

        if options.len() != OPTION_COUNT {
            return Err(ValidationError::WrongOptionCount {
                number,
                expected: OPTION_COUNT,
                actual: options.len(),
            });
        }
        if text.is_empty() || options.iter().any(String::is_empty) {
            return Err(ValidationError::IncompleteQuestion { number });
        }
        if self.answer < 0 || self.answer >= OPTION_COUNT as i64 {
            return Err(ValidationError::AnswerOutOfRange {
                number,
                answer: self.answer,
            });
        }

        Ok(Question {
            question: text.to_string(),
            options,
            answer: self.answer as usize,
            time: normalize_time(self.time),
        })
    }
}

impl QuizDraft {
    /// 校验草稿，成功时返回标题和题目列表
    pub fn validate(&self) -> Result<(String, Vec<Question>), ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.questions.is_empty() {
            return Err(ValidationError::NoQuestions);
        }

        let questions = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| q.validate(i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((title.to_string(), questions))
    }
}

/// 缺失、为 0 或非数字的时间取默认值，其余向下取整并且不低于最短时间
fn normalize_time(time: Option<f64>) -> u32 {
    let t = time
        .filter(|t| t.is_finite() && *t != 0.0)
        .unwrap_or(DEFAULT_QUESTION_TIME as f64)
        .floor();
    if t <= MIN_QUESTION_TIME as f64 {
        MIN_QUESTION_TIME
    } else if t >= u32::MAX as f64 {
        u32::MAX
    } else {
        t as u32
    }
}
