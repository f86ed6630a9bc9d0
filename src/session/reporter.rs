//! Background status logging.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{info, warn};

use super::instance::SharedGame;
use crate::rules::RulesEngine;

/// Periodically logs a shared game's state whenever it has changed.
///
/// Takes the game's lock for each read, so it never sees a half-applied move.
/// Stopped by `stop` or on drop; either way the thread is joined.
#[derive(Debug)]
pub struct StatusReporter {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<u64>>,
}

impl StatusReporter {
    /// Start polling `game` every `interval`.
    pub fn spawn<E: RulesEngine>(game: SharedGame<E>, interval: Duration) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::spawn(move || {
            let mut reports = 0;
            while flag.load(Ordering::Acquire) {
                let state = game.lock().serialize_state(false);
                if let Some(state) = state {
                    info!("status: {}", state);
                    reports += 1;
                }
                thread::sleep(interval);
            }
            reports
        });

        Self {
            running,
            handle: Some(handle),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stop the thread and return how many states it logged.
    pub fn stop(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        self.running.store(false, Ordering::Release);
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(reports)) => reports,
            Some(Err(_)) => {
                warn!("status reporter thread panicked");
                0
            }
            None => 0,
        }
    }
}

impl Drop for StatusReporter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Side;
    use crate::games::nim::NimRules;
    use crate::session::GameInstance;

    #[test]
    fn test_reports_changes_then_stops() {
        let game = GameInstance::authoritative(NimRules::default()).shared();
        let reporter = StatusReporter::spawn(Arc::clone(&game), Duration::from_millis(1));

        thread::sleep(Duration::from_millis(50));
        game.lock().process_move(Side::Home, "2,7").unwrap();
        thread::sleep(Duration::from_millis(50));

        assert!(reporter.is_running());
        assert!(reporter.stop() >= 1);
    }

    #[test]
    fn test_drop_joins_thread() {
        let game = GameInstance::authoritative(NimRules::default()).shared();
        {
            let _reporter = StatusReporter::spawn(Arc::clone(&game), Duration::from_millis(1));
        }
        // The reporter's clone of the game is gone once its thread has exited.
        assert_eq!(Arc::strong_count(&game), 1);
    }
}
