//! 作答回顾 - 业务能力层
//!
//! 从回顾快照还原"我的答案 vs 正确答案"，不依赖原试卷

use std::fmt;

use crate::models::attempt::ReviewSnapshot;

/// 单个选项的回顾
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionReview {
    pub text: String,
    /// 是否为正确选项
    pub is_correct: bool,
    /// 是否为学生所选
    pub is_chosen: bool,
}

/// 单道题的回顾
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview {
    pub question: String,
    pub options: Vec<OptionReview>,
}

impl QuestionReview {
    pub fn answered(&self) -> bool {
        self.options.iter().any(|o| o.is_chosen)
    }

    pub fn is_correct(&self) -> bool {
        self.options.iter().any(|o| o.is_chosen && o.is_correct)
    }
}

/// 回顾结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Review {
    /// 还没有可回顾的作答
    Empty,
    Available {
        quiz_title: String,
        score: usize,
        total: usize,
        submitted_at: i64,
        questions: Vec<QuestionReview>,
    },
}

/// 渲染回顾快照，快照缺失时返回 `Review::Empty`
pub fn render(snapshot: Option<&ReviewSnapshot>) -> Review {
    let Some(snapshot) = snapshot else {
        return Review::Empty;
    };

    let questions = snapshot
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let chosen = snapshot.student_answers.get(i);
            QuestionReview {
                question: q.question.clone(),
                options: q
                    .options
                    .iter()
                    .enumerate()
                    .map(|(j, text)| OptionReview {
                        text: text.clone(),
                        is_correct: j == q.answer,
                        is_chosen: chosen == Some(j),
                    })
                    .collect(),
            }
        })
        .collect();

    Review::Available {
        quiz_title: snapshot.quiz_title.clone(),
        score: snapshot.score,
        total: snapshot.total,
        submitted_at: snapshot.submitted_at,
        questions,
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Review::Empty => writeln!(f, "No review available."),
            Review::Available {
                quiz_title,
                score,
                total,
                questions,
                ..
            } => {
                writeln!(f, "{}", quiz_title)?;
                writeln!(f, "Score: {} / {}", score, total)?;
                for (i, q) in questions.iter().enumerate() {
                    writeln!(f)?;
                    writeln!(f, "Q{}. {}", i + 1, q.question)?;
                    for (j, opt) in q.options.iter().enumerate() {
                        write!(f, "  {}. {}", j + 1, opt.text)?;
                        if opt.is_correct {
                            write!(f, " (Correct)")?;
                        }
                        if opt.is_chosen {
                            write!(f, " (Your answer)")?;
                        }
                        writeln!(f)?;
                    }
                    if !q.answered() {
                        writeln!(f, "  (Not answered)")?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: serde_json::Value) -> ReviewSnapshot {
        serde_json::from_value(value).unwrap()
    }

    fn questions(review: &Review) -> &[QuestionReview] {
        match review {
            Review::Available { questions, .. } => questions,
            Review::Empty => panic!("应有回顾内容"),
        }
    }

    #[test]
    fn test_correct_and_chosen_on_same_option() {
        let snap = snapshot(json!({
            "quizId": "Q001", "quizTitle": "Math",
            "questions": [{"question": "2+2?", "options": ["3", "4", "5", "6"], "answer": 1}],
            "studentAnswers": [1], "score": 1, "total": 1, "submittedAt": 1
        }));

        let review = render(Some(&snap));
        let q = &questions(&review)[0];

        for opt in &q.options {
            if opt.text == "4" {
                assert!(opt.is_correct && opt.is_chosen);
            } else {
                assert!(!opt.is_correct && !opt.is_chosen);
            }
        }
        assert!(q.is_correct());
    }

    #[test]
    fn test_unanswered_question_marks_only_correct() {
        let snap = snapshot(json!({
            "quizId": "Q002", "quizTitle": "Geo",
            "questions": [{"question": "Capital of France?", "options": ["Rome", "Paris", "Berlin", "Madrid"], "answer": 1}],
            "studentAnswers": [null], "score": 0, "total": 1, "submittedAt": 1
        }));

        let review = render(Some(&snap));
        let q = &questions(&review)[0];

        assert!(q.options.iter().all(|o| !o.is_chosen));
        let correct: Vec<&str> = q
            .options
            .iter()
            .filter(|o| o.is_correct)
            .map(|o| o.text.as_str())
            .collect();
        assert_eq!(correct, vec!["Paris"]);
        assert!(!q.answered());
        assert!(review.to_string().contains("(Not answered)"));
    }

    #[test]
    fn test_missing_snapshot_renders_placeholder() {
        let review = render(None);
        assert_eq!(review, Review::Empty);
        assert_eq!(review.to_string(), "No review available.\n");
    }

    #[test]
    fn test_short_answer_sheet_leaves_tail_unanswered() {
        let snap = snapshot(json!({
            "quizId": "Q003", "quizTitle": "Mixed",
            "questions": [
                {"question": "a", "options": ["1", "2"], "answer": 0},
                {"question": "b", "options": ["1", "2"], "answer": 1}
            ],
            "studentAnswers": [1], "score": 0, "total": 2, "submittedAt": 1
        }));

        let review = render(Some(&snap));
        let qs = questions(&review);
        assert!(qs[0].answered() && !qs[0].is_correct());
        assert!(!qs[1].answered());

        let text = review.to_string();
        assert!(text.contains("Score: 0 / 2"));
        assert!(text.contains("  2. 2 (Your answer)"));
        assert!(text.contains("  1. 1 (Correct)"));
    }
}
