//! 每题倒计时
//!
//! 倒计时归会话所有，离开当前题目时由会话负责取消。
//! 每个倒计时有一个代号（token），过期代号的 tick 一律忽略。

/// 倒计时代号，每进入一道题递增一次
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountdownToken(u64);

impl CountdownToken {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// 一次 tick 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// 仍在计时，剩余秒数
    Running(u32),
    /// 计时归零
    Expired,
    /// 倒计时已取消，tick 被忽略
    Ignored,
}

/// 可取消的倒计时
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    token: CountdownToken,
    remaining: u32,
    active: bool,
}

impl Countdown {
    pub fn start(generation: u64, seconds: u32) -> Self {
        Self {
            token: CountdownToken(generation),
            remaining: seconds,
            active: true,
        }
    }

    pub fn token(&self) -> CountdownToken {
        self.token
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// 减少一秒，归零时自动停止
    pub fn tick(&mut self) -> Tick {
        if !self.active {
            return Tick::Ignored;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_to_expiry_once() {
        let mut c = Countdown::start(1, 3);
        assert_eq!(c.tick(), Tick::Running(2));
        assert_eq!(c.tick(), Tick::Running(1));
        assert_eq!(c.tick(), Tick::Expired);
        assert_eq!(c.tick(), Tick::Ignored);
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn test_cancelled_countdown_ignores_ticks() {
        let mut c = Countdown::start(7, 10);
        c.cancel();
        assert_eq!(c.tick(), Tick::Ignored);
        assert_eq!(c.remaining(), 10);
        assert_eq!(c.token().generation(), 7);
    }
}
