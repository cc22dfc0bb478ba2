//! 会话驱动器 - 编排层
//!
//! ## 职责
//!
//! 把外部输入和一秒一次的 tick 交给会话，直到会话提交。
//!
//! - 单个任务内用 `tokio::select!` 轮流处理输入和计时，同一时刻只有一个状态变化
//! - 会话的倒计时代号变化时重建计时器，旧题目的计时器随之作废
//! - 输入流结束后继续计时，直到全部题目超时提交

use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::error::AppResult;
use crate::models::attempt::AttemptOutcome;
use crate::workflow::{session_view, CountdownToken, QuizFlow, QuizSession, SessionView, Transition};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// 作答时的外部输入
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    /// 选择选项（从 0 开始）
    Select(usize),
    /// 进入下一题
    Next,
}

impl SessionInput {
    /// 解析一行终端输入：`1`-`9` 选择选项，空行或 `n` 进入下一题
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.eq_ignore_ascii_case("n") {
            return Some(SessionInput::Next);
        }
        match line.parse::<usize>() {
            Ok(n) if n >= 1 => Some(SessionInput::Select(n - 1)),
            _ => None,
        }
    }
}

fn new_ticker() -> Interval {
    let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// 驱动会话直到提交，然后交给 `QuizFlow::finish` 计分保存
///
/// 每次状态变化后调用 `on_view` 输出最新的显示描述，计时 tick 只给出剩余时间
pub async fn run_session<S, F>(
    flow: &QuizFlow,
    mut session: QuizSession,
    inputs: S,
    mut on_view: F,
) -> AppResult<AttemptOutcome>
where
    S: Stream<Item = SessionInput> + Unpin,
    F: FnMut(&SessionView),
{
    let mut inputs = inputs.fuse();
    let mut inputs_open = true;
    let mut token: Option<CountdownToken> = session.countdown_token();
    let mut ticker = new_ticker();

    on_view(&session_view::render(&session));

    while !session.is_submitted() {
        let transition = tokio::select! {
            input = inputs.next(), if inputs_open => match input {
                Some(SessionInput::Select(choice)) => match session.select(choice) {
                    Ok(t) => t,
                    Err(e) => {
                        warn!("⚠️ 无效输入: {}", e);
                        Transition::Ignored
                    }
                },
                Some(SessionInput::Next) => session.next(),
                None => {
                    debug!("输入已结束，剩余题目按超时处理");
                    inputs_open = false;
                    Transition::Ignored
                }
            },
            _ = ticker.tick() => match token {
                Some(current) => session.tick(current),
                None => Transition::Ignored,
            },
        };

        // 进入新题目时作废旧计时器
        let next_token = session.countdown_token();
        if next_token != token {
            token = next_token;
            ticker = new_ticker();
        }

        if transition != Transition::Ignored {
            on_view(&session_view::render_transition(&session, &transition));
        }
    }

    flow.finish(session)
}
