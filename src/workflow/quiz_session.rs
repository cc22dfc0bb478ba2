//! 答题会话 - 流程层
//!
//! 核心职责：定义"一次作答"的状态机
//!
//! 状态顺序：
//! 1. Loading：复制并打乱题目
//! 2. InProgress(i)：第 i 题计时作答
//! 3. Submitted：提交完成，之后的任何事件都被忽略

use rand::Rng;
use tracing::{debug, info};

use crate::error::SessionError;
use crate::models::attempt::{AnswerSheet, AttemptOutcome};
use crate::models::quiz::{Question, Quiz};
use crate::models::student::StudentIdentity;
use crate::services::{randomizer, scorer};
use crate::workflow::countdown::{Countdown, CountdownToken, Tick};

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    InProgress(usize),
    Submitted,
}

/// 一次事件处理的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// 记录了第 `index` 题的选择
    Selected { index: usize, choice: usize },
    /// 倒计时减少一秒
    Ticked { remaining: u32 },
    /// 进入第 `index` 题（倒计时已重新开始）
    Advanced { index: usize },
    /// 最后一题结束，进入 Submitted（只会出现一次）
    Finished,
    /// 事件被忽略（过期的 tick 或已提交）
    Ignored,
}

/// 答题会话
///
/// 持有打乱后的题目副本，不会修改原试卷
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz_id: String,
    quiz_title: String,
    student: StudentIdentity,
    questions: Vec<Question>,
    answers: AnswerSheet,
    phase: SessionPhase,
    countdown: Option<Countdown>,
    generation: u64,
}

impl QuizSession {
    /// 开始作答：复制题目，打乱题目顺序和每题的选项，进入第一题
    ///
    /// 试卷没有题目时返回 `NoQuizAvailable`，会话不会进入答题状态
    pub fn start<R: Rng + ?Sized>(
        quiz: &Quiz,
        student: StudentIdentity,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        if quiz.questions.is_empty() {
            return Err(SessionError::NoQuizAvailable);
        }

        let mut session = Self {
            quiz_id: quiz.quiz_id.clone(),
            quiz_title: quiz.title.clone(),
            student,
            questions: quiz.questions.clone(),
            answers: AnswerSheet::new(),
            phase: SessionPhase::Loading,
            countdown: None,
            generation: 0,
        };

        randomizer::shuffle_questions(&mut session.questions, rng);
        session.enter(0);

        info!(
            "📝 [{}] 学生 {} 开始作答 {} ({} 道题)",
            session.quiz_id,
            session.student.student_id,
            session.quiz_title,
            session.questions.len()
        );
        Ok(session)
    }

    fn enter(&mut self, index: usize) {
        self.generation += 1;
        let seconds = self.questions[index].time_limit();
        self.countdown = Some(Countdown::start(self.generation, seconds));
        self.phase = SessionPhase::InProgress(index);
        debug!(
            "[{}] 进入第 {}/{} 题，限时 {} 秒",
            self.quiz_id,
            index + 1,
            self.questions.len(),
            seconds
        );
    }

    /// 记录当前题的选择，覆盖之前的选择，不会自动进入下一题
    pub fn select(&mut self, choice: usize) -> Result<Transition, SessionError> {
        let SessionPhase::InProgress(index) = self.phase else {
            return Err(SessionError::NotInProgress);
        };

        let option_count = self.questions[index].options.len();
        if choice >= option_count {
            return Err(SessionError::InvalidChoice {
                choice,
                option_count,
            });
        }

        self.answers.record(index, choice);
        debug!("[{}] 第 {} 题选择了 {}", self.quiz_id, index + 1, choice);
        Ok(Transition::Selected { index, choice })
    }

    /// 主动进入下一题
    pub fn next(&mut self) -> Transition {
        match self.phase {
            SessionPhase::InProgress(index) => self.advance(index),
            _ => Transition::Ignored,
        }
    }

    /// 处理一次一秒 tick，只接受当前倒计时的代号
    pub fn tick(&mut self, token: CountdownToken) -> Transition {
        let SessionPhase::InProgress(index) = self.phase else {
            return Transition::Ignored;
        };
        let Some(countdown) = self.countdown.as_mut() else {
            return Transition::Ignored;
        };
        if countdown.token() != token {
            debug!("[{}] 忽略过期 tick (代号 {})", self.quiz_id, token.generation());
            return Transition::Ignored;
        }

        match countdown.tick() {
            Tick::Running(remaining) => Transition::Ticked { remaining },
            Tick::Expired => {
                info!("⏰ [{}] 第 {} 题超时", self.quiz_id, index + 1);
                self.advance(index)
            }
            Tick::Ignored => Transition::Ignored,
        }
    }

    /// 离开当前题：先取消倒计时，再进入下一题或提交
    fn advance(&mut self, index: usize) -> Transition {
        if let Some(mut countdown) = self.countdown.take() {
            countdown.cancel();
        }

        if index + 1 < self.questions.len() {
            self.enter(index + 1);
            Transition::Advanced { index: index + 1 }
        } else {
            self.phase = SessionPhase::Submitted;
            info!(
                "✓ [{}] 学生 {} 作答结束，已答 {}/{}",
                self.quiz_id,
                self.student.student_id,
                self.answers.answered_count(),
                self.questions.len()
            );
            Transition::Finished
        }
    }

    /// 结束会话并计算成绩，会话随之销毁
    pub fn into_outcome(self, submitted_at: i64) -> Result<AttemptOutcome, SessionError> {
        if self.phase != SessionPhase::Submitted {
            return Err(SessionError::NotSubmitted);
        }

        let score = scorer::score(&self.questions, &self.answers);
        Ok(AttemptOutcome {
            quiz_id: self.quiz_id,
            quiz_title: self.quiz_title,
            student_id: self.student.student_id,
            questions: self.questions,
            answers: self.answers,
            score: score.score,
            total: score.total,
            submitted_at,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == SessionPhase::Submitted
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            SessionPhase::InProgress(index) => Some(index),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().map(|i| &self.questions[i])
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.countdown.as_ref().map(Countdown::remaining)
    }

    /// 当前倒计时的代号，不在答题状态时为 None
    pub fn countdown_token(&self) -> Option<CountdownToken> {
        self.countdown.as_ref().map(Countdown::token)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn quiz_title(&self) -> &str {
        &self.quiz_title
    }

    pub fn student(&self) -> &StudentIdentity {
        &self.student
    }
}
