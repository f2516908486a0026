//! 終端機觀察者：即時印出 AI 行動，並依設定停頓
use std::thread;
use std::time::Duration;
use tactics_lib::TurnObserver;

#[derive(Debug)]
pub struct ConsoleObserver {
    delay: Duration,
    /// 上次繪製後累積的重繪請求
    pending_draws: usize,
}

impl ConsoleObserver {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending_draws: 0,
        }
    }

    /// 取出並清空重繪請求數
    pub fn take_draws(&mut self) -> usize {
        std::mem::take(&mut self.pending_draws)
    }
}

impl TurnObserver for ConsoleObserver {
    fn log(&mut self, message: &str) {
        println!("  {message}");
    }

    // 回呼期間名冊仍被 AI 借用，實際繪製留給回合結束後
    fn draw(&mut self) {
        self.pending_draws += 1;
    }

    fn pause(&mut self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}
