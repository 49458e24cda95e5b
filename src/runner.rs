//! Periodic driver for a [`Navigator`].
//!
//! The runner issues one tick per tick interval of the current settings
//! snapshot. Everything for a tick (pointer read, detection, animation,
//! drawing) happens on the runner's thread; stopping just means no further
//! ticks are issued.

use crate::display::Desktop;
use crate::error::{Error, Result};
use crate::navigator::Navigator;
use crate::sampler::{Clock, SystemClock};
use crate::surface::OverlaySurface;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::JoinHandle;
use std::time::Instant;

/// Drives a navigator at its configured tick rate.
pub struct Runner {
    running: Arc<AtomicBool>,
    thread_handle: RwLock<Option<JoinHandle<()>>>,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    /// Create a new Runner instance.
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            thread_handle: RwLock::new(None),
        }
    }

    /// Tick on the current thread until `stop()` is called from another one.
    pub fn run<D, S>(&self, navigator: &mut Navigator, desktop: &D, surface: &mut S) -> Result<()>
    where
        D: Desktop + ?Sized,
        S: OverlaySurface + ?Sized,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyRunning);
        }

        drive(&self.running, navigator, desktop, &SystemClock, surface);

        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Tick on a background thread. Returns immediately; use `stop()` to end.
    pub fn run_async<D, S>(
        &self,
        mut navigator: Navigator,
        desktop: D,
        mut surface: S,
    ) -> Result<()>
    where
        D: Desktop + Send + 'static,
        S: OverlaySurface + Send + 'static,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyRunning);
        }

        let running = self.running.clone();
        let handle = std::thread::Builder::new()
            .name("mousenav-runner".into())
            .spawn(move || {
                drive(&running, &mut navigator, &desktop, &SystemClock, &mut surface);
                running.store(false, Ordering::SeqCst);
            })
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                Error::ThreadError(format!("failed to spawn runner thread: {e}"))
            })?;

        *self
            .thread_handle
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(handle);
        Ok(())
    }

    /// Tick on a tokio timer until `stop()` is called.
    #[cfg(feature = "tokio")]
    pub async fn run_tokio<D, S>(
        &self,
        navigator: &mut Navigator,
        desktop: &D,
        surface: &mut S,
    ) -> Result<()>
    where
        D: Desktop + ?Sized,
        S: OverlaySurface + ?Sized,
    {
        use tokio::time::{MissedTickBehavior, interval};

        if self.running.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyRunning);
        }
        log::info!("runner started");

        let mut period = navigator.current_settings().tick_interval();
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while self.running.load(Ordering::SeqCst) {
            ticker.tick().await;
            if !self.running.load(Ordering::SeqCst) {
                break;
            }
            step_logged(navigator, desktop, &SystemClock, surface);

            let next = navigator.current_settings().tick_interval();
            if next != period {
                period = next;
                ticker = interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            }
        }

        finish(surface);
        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Stop ticking and wait for a background thread to finish.
    pub fn stop(&self) -> Result<()> {
        if !self.running.swap(false, Ordering::SeqCst) {
            return Err(Error::NotRunning);
        }

        let handle = self
            .thread_handle
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle
                .join()
                .map_err(|_| Error::ThreadError("failed to join runner thread".into()))?;
        }

        Ok(())
    }

    /// Check if the runner is currently ticking.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        if self.is_running() {
            let _ = self.stop();
        }
    }
}

fn drive<D, C, S>(
    running: &AtomicBool,
    navigator: &mut Navigator,
    desktop: &D,
    clock: &C,
    surface: &mut S,
) where
    D: Desktop + ?Sized,
    C: Clock + ?Sized,
    S: OverlaySurface + ?Sized,
{
    log::info!("runner started");
    while running.load(Ordering::SeqCst) {
        let started = Instant::now();
        // Re-read every tick so a new fps applies immediately.
        let interval = navigator.current_settings().tick_interval();

        step_logged(navigator, desktop, clock, surface);

        let spent = started.elapsed();
        if spent < interval {
            std::thread::sleep(interval - spent);
        }
    }
    finish(surface);
}

fn step_logged<D, C, S>(navigator: &mut Navigator, desktop: &D, clock: &C, surface: &mut S)
where
    D: Desktop + ?Sized,
    C: Clock + ?Sized,
    S: OverlaySurface + ?Sized,
{
    if let Err(e) = navigator.step(desktop, clock, surface) {
        log::warn!("tick skipped: {e}");
    }
}

fn finish<S: OverlaySurface + ?Sized>(surface: &mut S) {
    if let Err(e) = surface.set_visible(false) {
        log::warn!("failed to hide overlay on shutdown: {e}");
    }
    log::info!("runner stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrow::Frame;
    use crate::display::Rect;
    use crate::geometry::Point;
    use crate::settings::{Settings, SharedSettings};
    use crate::surface::testing::CallLog;
    use std::sync::Mutex;
    use std::time::Duration;

    const FULL_HD: Rect = Rect::new(0, 0, 1920, 1080);

    struct OffscreenDesktop;

    impl Desktop for OffscreenDesktop {
        fn pointer_position(&self) -> Result<Point> {
            Ok(Point::new(2500, 300))
        }

        fn primary_bounds(&self) -> Result<Rect> {
            Ok(FULL_HD)
        }
    }

    #[derive(Clone, Default)]
    struct SharedLog(Arc<Mutex<CallLog>>);

    impl OverlaySurface for SharedLog {
        fn set_bounds(&mut self, bounds: Rect) -> Result<()> {
            self.0.lock().unwrap().set_bounds(bounds)
        }

        fn set_visible(&mut self, visible: bool) -> Result<()> {
            self.0.lock().unwrap().set_visible(visible)
        }

        fn set_opacity(&mut self, opacity: f64) -> Result<()> {
            self.0.lock().unwrap().set_opacity(opacity)
        }

        fn submit(&mut self, frame: &Frame) -> Result<()> {
            self.0.lock().unwrap().submit(frame)
        }
    }

    fn navigator() -> Navigator {
        Navigator::new(
            FULL_HD,
            SharedSettings::new(Settings::default().with_fps(60)),
            Point::new(960, 540),
            Instant::now(),
        )
    }

    #[test]
    fn test_stop_when_not_running() {
        let runner = Runner::new();
        assert!(!runner.is_running());
        assert!(matches!(runner.stop(), Err(Error::NotRunning)));
    }

    #[test]
    fn test_run_async_ticks_until_stopped() {
        let runner = Runner::new();
        let log = SharedLog::default();

        runner
            .run_async(navigator(), OffscreenDesktop, log.clone())
            .unwrap();
        assert!(runner.is_running());
        assert!(matches!(
            runner.run_async(navigator(), OffscreenDesktop, log.clone()),
            Err(Error::AlreadyRunning)
        ));

        std::thread::sleep(Duration::from_millis(200));
        runner.stop().unwrap();
        assert!(!runner.is_running());

        let calls = log.0.lock().unwrap();
        assert!(!calls.frames().is_empty());
        assert_eq!(calls.visibility_changes().first(), Some(&true));
        assert_eq!(calls.visibility_changes().last(), Some(&false));
    }

    #[test]
    fn test_blocking_run_stops_from_other_thread() {
        let runner = Arc::new(Runner::new());
        let stopper = runner.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(100));
            stopper.stop().unwrap();
        });

        let mut nav = navigator();
        let mut log = CallLog::default();
        runner.run(&mut nav, &OffscreenDesktop, &mut log).unwrap();
        handle.join().unwrap();

        assert!(!runner.is_running());
        assert!(!log.frames().is_empty());
    }

    #[cfg(feature = "tokio")]
    #[tokio::test]
    async fn test_run_tokio_stops() {
        let runner = Arc::new(Runner::new());
        let stopper = runner.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            stopper.stop().unwrap();
        });

        let mut nav = navigator();
        let mut log = CallLog::default();
        runner
            .run_tokio(&mut nav, &OffscreenDesktop, &mut log)
            .await
            .unwrap();

        assert!(!log.frames().is_empty());
        assert_eq!(log.visibility_changes().last(), Some(&false));
    }
}
