//! 会话显示描述
//!
//! 从会话状态到显示内容的纯函数，界面层只负责把它画出来

use std::fmt;

use crate::workflow::quiz_session::{QuizSession, SessionPhase, Transition};

/// 单个选项的显示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    /// 从 1 开始的编号
    pub number: usize,
    pub text: String,
    pub selected: bool,
}

/// 会话的显示描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    Loading,
    Question {
        quiz_title: String,
        /// 从 1 开始的题号
        position: usize,
        total: usize,
        question: String,
        options: Vec<OptionView>,
        remaining_seconds: u32,
        /// 已完成题目占比（不含当前题）
        progress_percent: u32,
    },
    /// 只有剩余时间变化，题目内容不变
    Countdown { remaining_seconds: u32 },
    Submitted {
        quiz_title: String,
        answered: usize,
        total: usize,
    },
}

pub fn render(session: &QuizSession) -> SessionView {
    match session.phase() {
        SessionPhase::Loading => SessionView::Loading,
        SessionPhase::InProgress(index) => {
            let total = session.total();
            let question = &session.questions()[index];
            let chosen = session.answers().get(index);

            SessionView::Question {
                quiz_title: session.quiz_title().to_string(),
                position: index + 1,
                total,
                question: question.question.clone(),
                options: question
                    .options
                    .iter()
                    .enumerate()
                    .map(|(i, text)| OptionView {
                        number: i + 1,
                        text: text.clone(),
                        selected: chosen == Some(i),
                    })
                    .collect(),
                remaining_seconds: session.remaining_seconds().unwrap_or(0),
                progress_percent: ((index as f64 / total as f64) * 100.0).round() as u32,
            }
        }
        SessionPhase::Submitted => SessionView::Submitted {
            quiz_title: session.quiz_title().to_string(),
            answered: session.answers().answered_count(),
            total: session.total(),
        },
    }
}

/// 按状态变化生成显示描述，计时 tick 只更新剩余时间
pub fn render_transition(session: &QuizSession, transition: &Transition) -> SessionView {
    match transition {
        Transition::Ticked { remaining } => SessionView::Countdown {
            remaining_seconds: *remaining,
        },
        _ => render(session),
    }
}

impl fmt::Display for SessionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionView::Loading => writeln!(f, "Loading quiz..."),
            SessionView::Question {
                quiz_title,
                position,
                total,
                question,
                options,
                remaining_seconds,
                progress_percent,
            } => {
                writeln!(
                    f,
                    "{}  Q{}/{}  ({}%)  Time: {}s",
                    quiz_title, position, total, progress_percent, remaining_seconds
                )?;
                writeln!(f, "{}", question)?;
                for opt in options {
                    let mark = if opt.selected { "*" } else { " " };
                    writeln!(f, " {} {}. {}", mark, opt.number, opt.text)?;
                }
                Ok(())
            }
            SessionView::Countdown { remaining_seconds } => {
                write!(f, "Time: {}s", remaining_seconds)
            }
            SessionView::Submitted {
                quiz_title,
                answered,
                total,
            } => writeln!(
                f,
                "{} submitted ({} of {} answered).",
                quiz_title, answered, total
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::{Question, Quiz};
    use crate::models::student::StudentIdentity;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session() -> QuizSession {
        let quiz = Quiz {
            quiz_id: "Q001".into(),
            title: "Solo".into(),
            questions: vec![
                Question::new("only?", vec!["yes".into()], 0, 12),
                Question::new("again?", vec!["ok".into()], 0, 12),
            ],
            created_at: 0,
        };
        let student = StudentIdentity {
            student_id: "S1".into(),
            email: String::new(),
            name: String::new(),
        };
        QuizSession::start(&quiz, student, &mut StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn test_question_view_marks_selection() {
        let mut s = session();
        s.select(0).unwrap();

        match render(&s) {
            SessionView::Question {
                position,
                total,
                options,
                remaining_seconds,
                progress_percent,
                ..
            } => {
                assert_eq!((position, total), (1, 2));
                assert_eq!(remaining_seconds, 12);
                assert_eq!(progress_percent, 0);
                assert!(options[0].selected);
            }
            other => panic!("应为答题视图: {:?}", other),
        }

        s.next();
        let text = render(&s).to_string();
        assert!(text.contains("Q2/2"));
        assert!(text.contains("(50%)"));
    }

    #[test]
    fn test_submitted_view() {
        let mut s = session();
        s.next();
        s.next();
        assert_eq!(
            render(&s),
            SessionView::Submitted {
                quiz_title: "Solo".into(),
                answered: 0,
                total: 2
            }
        );
    }

    #[test]
    fn test_tick_renders_only_remaining_time() {
        let mut s = session();
        let token = s.countdown_token().unwrap();
        let transition = s.tick(token);

        let view = render_transition(&s, &transition);
        assert_eq!(
            view,
            SessionView::Countdown {
                remaining_seconds: 11
            }
        );
        assert_eq!(view.to_string(), "Time: 11s");

        let transition = s.next();
        assert!(matches!(
            render_transition(&s, &transition),
            SessionView::Question { position: 2, .. }
        ));
    }
}
