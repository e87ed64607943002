use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A periodic tick source with a scoped lifetime: `spawn` starts the
/// clock thread, dropping the handle stops it. Owners acquire a ticker
/// when their view opens and release it (drop) when the view closes, so
/// no callback can outlive its owner.
pub struct Ticker {
    rx: Receiver<()>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(period: Duration) -> Ticker {
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();
        let stop_flag = Arc::clone(&stop);
        // sleep in short steps so drop doesn't stall a full period
        let step = Duration::from_millis(10).min(period);
        let handle = thread::spawn(move || {
            let mut acc = Duration::ZERO;
            loop {
                if stop_flag.load(Ordering::Relaxed) {
                    return;
                }
                thread::sleep(step);
                acc += step;
                if acc >= period {
                    acc = Duration::ZERO;
                    if tx.send(()).is_err() {
                        return;
                    }
                }
            }
        });
        Ticker {
            rx,
            stop,
            handle: Some(handle),
        }
    }

    /// Number of ticks elapsed since the last call. Queued ticks are not
    /// lost when the event loop lags; they are delivered here one by one.
    pub fn drain(&self) -> u32 {
        let mut ticks = 0;
        loop {
            match self.rx.try_recv() {
                Ok(()) => ticks += 1,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return ticks,
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
