//! The per-tick pipeline: sample, detect, show/hide, animate, render.

use crate::arrow::Frame;
use crate::display::{Desktop, Rect};
use crate::edge::{EdgeDetector, EdgeState};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::overlay::OverlayRenderer;
use crate::sampler::{Clock, Sampler};
use crate::settings::{Settings, SharedSettings};
use crate::surface::{OverlaySurface, SurfaceFactory, SurfaceOptions};
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "statistics")]
use crate::statistics::NavigatorStatistics;

/// What one tick produced.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    /// Detection result for this tick.
    pub edge: EdgeState,
    /// Frame submitted to the surface, if the overlay is visible.
    pub frame: Option<Frame>,
}

/// Pointer tracker and overlay driver for one primary display.
pub struct Navigator {
    detector: EdgeDetector,
    settings: SharedSettings,
    applied: Option<Arc<Settings>>,
    sampler: Sampler,
    overlay: OverlayRenderer,
    #[cfg(feature = "statistics")]
    statistics: NavigatorStatistics,
}

impl Navigator {
    /// Create a navigator for `bounds`, seeded with the pointer position and
    /// time at startup.
    pub fn new(bounds: Rect, settings: SharedSettings, position: Point, now: Instant) -> Self {
        Self {
            detector: EdgeDetector::new(bounds),
            settings,
            applied: None,
            sampler: Sampler::new(position, now),
            overlay: OverlayRenderer::new(),
            #[cfg(feature = "statistics")]
            statistics: NavigatorStatistics::new(),
        }
    }

    /// Create a navigator from live desktop readings.
    ///
    /// Fails with [`Error::NoPrimaryDisplay`] when the primary display cannot
    /// be determined; there is no fallback display.
    pub fn from_desktop<D: Desktop + ?Sized, C: Clock + ?Sized>(
        desktop: &D,
        clock: &C,
        settings: SharedSettings,
    ) -> Result<Self> {
        let bounds = desktop.primary_bounds().map_err(|e| {
            log::error!("cannot determine primary display: {e}");
            Error::NoPrimaryDisplay
        })?;
        let position = desktop.pointer_position()?;
        log::info!(
            "tracking pointer against primary display {}x{} at ({}, {})",
            bounds.width,
            bounds.height,
            bounds.x,
            bounds.y
        );
        Ok(Self::new(bounds, settings, position, clock.now()))
    }

    /// Create an overlay surface covering the primary display.
    pub fn open_surface<F: SurfaceFactory + ?Sized>(&self, factory: &F) -> Result<F::Surface> {
        let mut surface = factory.create(self.detector.bounds(), SurfaceOptions::OVERLAY)?;
        surface.set_visible(false)?;
        surface.set_opacity(self.settings.load().opacity())?;
        Ok(surface)
    }

    /// Publish new settings. They take effect at the start of the next tick.
    pub fn apply_settings(&self, settings: Settings) {
        self.settings.store(settings);
    }

    /// Handle for publishing settings from another thread.
    pub fn settings_handle(&self) -> SharedSettings {
        self.settings.clone()
    }

    /// The snapshot the next tick will use.
    pub fn current_settings(&self) -> Arc<Settings> {
        self.settings.load()
    }

    /// Primary-display bounds in use.
    pub fn bounds(&self) -> Rect {
        self.detector.bounds()
    }

    /// Overlay animation state.
    pub fn overlay(&self) -> &OverlayRenderer {
        &self.overlay
    }

    /// Statistics gathered so far.
    #[cfg(feature = "statistics")]
    pub fn statistics(&self) -> &NavigatorStatistics {
        &self.statistics
    }

    /// Run one tick with the pointer at `position` at time `now`.
    pub fn tick<S: OverlaySurface + ?Sized>(
        &mut self,
        position: Point,
        now: Instant,
        surface: &mut S,
    ) -> Result<TickOutcome> {
        let settings = self.settings.load();
        self.sync_settings(&settings, surface)?;

        let sample = self.sampler.sample(position, now);
        let edge = self
            .detector
            .detect(sample.position, settings.edge_zone_px, sample.speed);
        log::trace!(
            "pointer ({}, {}) speed {:.0} px/s -> {:?}",
            position.x,
            position.y,
            sample.speed,
            edge.region
        );

        // A failed transition is left uncommitted so the next tick retries it;
        // the animation step still happens.
        let transition = self.update_visibility(&edge, &settings, surface);
        self.overlay.animate(&settings);
        transition?;

        let frame = self.overlay.render(&settings);
        if let Some(frame) = &frame {
            surface.submit(frame)?;
        }

        #[cfg(feature = "statistics")]
        self.statistics.record_tick(&sample, &edge, frame.is_some());

        Ok(TickOutcome { edge, frame })
    }

    /// Show or hide the overlay, keeping the renderer and `surface` in step.
    fn update_visibility<S: OverlaySurface + ?Sized>(
        &mut self,
        edge: &EdgeState,
        settings: &Settings,
        surface: &mut S,
    ) -> Result<()> {
        if edge.active {
            let appeared = self
                .overlay
                .show(edge.anchor, edge.direction_deg, edge.speed, settings);
            if !appeared {
                return Ok(());
            }
            if let Err(e) = surface.set_visible(true) {
                self.overlay.hide();
                return Err(e);
            }
            log::debug!(
                "overlay shown at ({}, {}) pointing {:.1} deg",
                edge.anchor.x,
                edge.anchor.y,
                edge.direction_deg
            );
        } else if self.overlay.is_visible() {
            surface.set_visible(false)?;
            self.overlay.hide();
            log::debug!("overlay hidden");
        }
        Ok(())
    }

    /// Read the pointer from `desktop` and run one tick.
    pub fn step<D, C, S>(
        &mut self,
        desktop: &D,
        clock: &C,
        surface: &mut S,
    ) -> Result<TickOutcome>
    where
        D: Desktop + ?Sized,
        C: Clock + ?Sized,
        S: OverlaySurface + ?Sized,
    {
        let position = desktop.pointer_position()?;
        self.tick(position, clock.now(), surface)
    }

    /// Push surface-level settings when a new snapshot has been published.
    fn sync_settings<S: OverlaySurface + ?Sized>(
        &mut self,
        settings: &Arc<Settings>,
        surface: &mut S,
    ) -> Result<()> {
        if self
            .applied
            .as_ref()
            .is_some_and(|applied| Arc::ptr_eq(applied, settings))
        {
            return Ok(());
        }

        if self.applied.is_some() {
            log::info!(
                "settings applied: scale {:.2}, {} fps, opacity {}%",
                settings.arrow_scale,
                settings.effective_fps(),
                settings.opacity_percent
            );
        }
        surface.set_opacity(settings.opacity())?;
        self.applied = Some(settings.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{Edge, Region};
    use crate::surface::testing::{CallLog, FlakySurface, SurfaceCall};
    use std::cell::Cell;
    use std::time::Duration;

    const FULL_HD: Rect = Rect::new(0, 0, 1920, 1080);

    fn navigator(settings: Settings) -> (Navigator, Instant) {
        let t0 = Instant::now();
        let nav = Navigator::new(
            FULL_HD,
            SharedSettings::new(settings),
            Point::new(960, 540),
            t0,
        );
        (nav, t0)
    }

    fn at(t0: Instant, tick: u64) -> Instant {
        t0 + Duration::from_millis(16 * tick)
    }

    fn try_tick<S: OverlaySurface>(
        nav: &mut Navigator,
        surface: &mut S,
        x: i32,
        y: i32,
        now: Instant,
    ) -> Result<TickOutcome> {
        nav.tick(Point::new(x, y), now, surface)
    }

    fn tick<S: OverlaySurface>(
        nav: &mut Navigator,
        surface: &mut S,
        x: i32,
        y: i32,
        now: Instant,
    ) -> TickOutcome {
        try_tick(nav, surface, x, y, now).unwrap()
    }

    #[test]
    fn test_interior_pointer_draws_nothing() {
        let (mut nav, t0) = navigator(Settings::default());
        let mut surface = CallLog::default();

        let out = tick(&mut nav, &mut surface, 900, 500, at(t0, 1));
        assert!(!out.edge.active);
        assert!(out.frame.is_none());
        assert!(surface.frames().is_empty());
        assert!(surface.visibility_changes().is_empty());
        assert_eq!(surface.opacities(), vec![0.85]);
    }

    #[test]
    fn test_offscreen_pointer_shows_arrow() {
        let (mut nav, t0) = navigator(Settings::default());
        let mut surface = CallLog::default();

        let out = tick(&mut nav, &mut surface, 3000, 540, at(t0, 1));
        assert_eq!(out.edge.region, Region::Offscreen);
        assert_eq!(out.edge.anchor, Point::new(1919, 540));
        let frame = out.frame.unwrap();
        assert_eq!(frame.anchor, Point::new(1919, 540));
        assert_eq!(frame.angle_deg, 0.0);
        assert_eq!(surface.visibility_changes(), vec![true]);
        assert_eq!(surface.frames().len(), 1);
    }

    #[test]
    fn test_fast_flick_boosts_target_scale() {
        let (mut nav, t0) = navigator(Settings::default());
        let mut surface = CallLog::default();

        // 2040 px in 16 ms is far above the 1400 px/s threshold.
        tick(&mut nav, &mut surface, 3000, 540, at(t0, 1));
        assert!((nav.overlay().state().target_scale - 1.4).abs() < 1e-12);

        // Holding still drops the boost.
        tick(&mut nav, &mut surface, 3000, 540, at(t0, 2));
        assert_eq!(nav.overlay().state().target_scale, 1.0);
    }

    #[test]
    fn test_leaving_edge_hides_once() {
        let (mut nav, t0) = navigator(Settings::default());
        let mut surface = CallLog::default();

        let out = tick(&mut nav, &mut surface, 5, 540, at(t0, 1));
        assert_eq!(out.edge.region, Region::NearEdge(Edge::Left));
        tick(&mut nav, &mut surface, 4, 540, at(t0, 2));
        tick(&mut nav, &mut surface, 500, 540, at(t0, 3));
        tick(&mut nav, &mut surface, 501, 540, at(t0, 4));

        assert_eq!(surface.visibility_changes(), vec![true, false]);
        assert_eq!(surface.frames().len(), 2);
    }

    #[test]
    fn test_animation_runs_while_hidden() {
        let settings = Settings::default().with_pulse(2);
        let (mut nav, t0) = navigator(settings);
        let mut surface = CallLog::default();

        tick(&mut nav, &mut surface, 960, 540, at(t0, 1));
        tick(&mut nav, &mut surface, 960, 540, at(t0, 2));
        assert!(!nav.overlay().is_visible());
        assert!(nav.overlay().state().pulse_phase > 0.0);
    }

    #[test]
    fn test_reshow_continues_scale() {
        let (mut nav, t0) = navigator(Settings::default());
        let mut surface = CallLog::default();

        // Flick off-screen, then let the boosted scale settle partially.
        tick(&mut nav, &mut surface, 3000, 540, at(t0, 1));
        let scale_visible = nav.overlay().state().current_scale;
        assert!(scale_visible > 1.0);

        // Back inside, then off-screen again without a flick.
        tick(&mut nav, &mut surface, 1000, 540, at(t0, 200));
        let scale_hidden = nav.overlay().state().current_scale;
        let out = tick(&mut nav, &mut surface, 1000, -5, at(t0, 400));
        let reshown = out.frame.unwrap();

        // Scale eased from where it was instead of restarting at 1.0.
        assert!(scale_hidden > 1.0);
        let expected = scale_hidden + (1.0 - scale_hidden) * 0.15;
        assert!((reshown.size - 40.0 * expected).abs() < 1e-9);
    }

    #[test]
    fn test_rejected_show_is_retried() {
        let (mut nav, t0) = navigator(Settings::default());
        let mut surface = FlakySurface {
            show_failures: 1,
            ..Default::default()
        };

        let result = try_tick(&mut nav, &mut surface, 3000, 540, at(t0, 1));
        assert!(matches!(result, Err(Error::Surface(_))));
        assert!(!nav.overlay().is_visible());
        assert!(surface.log.frames().is_empty());
        // The show still aimed the arrow and started easing toward the boost.
        assert!(nav.overlay().state().current_scale > 1.0);

        let out = tick(&mut nav, &mut surface, 3000, 540, at(t0, 2));
        assert!(out.frame.is_some());
        assert!(nav.overlay().is_visible());
        assert_eq!(surface.log.visibility_changes(), vec![true]);
    }

    #[test]
    fn test_rejected_hide_is_retried() {
        let (mut nav, t0) = navigator(Settings::default());
        let mut surface = FlakySurface {
            hide_failures: 1,
            ..Default::default()
        };

        tick(&mut nav, &mut surface, 3000, 540, at(t0, 1));
        let scale_shown = nav.overlay().state().current_scale;

        let result = try_tick(&mut nav, &mut surface, 960, 540, at(t0, 2));
        assert!(matches!(result, Err(Error::Surface(_))));
        // The surface still shows the arrow, so the renderer must agree.
        assert!(nav.overlay().is_visible());
        // Easing toward the boosted target continued on the failed tick.
        assert!(nav.overlay().state().current_scale > scale_shown);

        for n in 3..10 {
            tick(&mut nav, &mut surface, 960, 540, at(t0, n));
        }
        assert!(!nav.overlay().is_visible());
        assert_eq!(surface.log.visibility_changes(), vec![true, false]);
        assert_eq!(surface.log.frames().len(), 1);
    }

    #[test]
    fn test_rejected_opacity_is_retried() {
        let (mut nav, t0) = navigator(Settings::default().with_opacity(60));
        let mut surface = FlakySurface {
            opacity_failures: 1,
            ..Default::default()
        };

        let result = try_tick(&mut nav, &mut surface, 3000, 540, at(t0, 1));
        assert!(matches!(result, Err(Error::Surface(_))));
        assert!(surface.log.opacities().is_empty());

        let out = tick(&mut nav, &mut surface, 3000, 540, at(t0, 2));
        assert!(out.frame.is_some());
        assert_eq!(surface.log.opacities(), vec![0.6]);

        tick(&mut nav, &mut surface, 3000, 540, at(t0, 3));
        assert_eq!(surface.log.opacities(), vec![0.6]);
    }

    #[test]
    fn test_apply_settings_takes_effect_next_tick() {
        let (mut nav, t0) = navigator(Settings::default());
        let mut surface = CallLog::default();
        let ui = nav.settings_handle();

        tick(&mut nav, &mut surface, 960, 540, at(t0, 1));
        ui.store(Settings::default().with_opacity(50).with_edge_zone(600));
        let out = tick(&mut nav, &mut surface, 960, 540, at(t0, 2));

        assert_eq!(surface.opacities(), vec![0.85, 0.5]);
        // The wider edge zone from the new snapshot is already in use.
        assert!(out.edge.active);

        tick(&mut nav, &mut surface, 960, 540, at(t0, 3));
        assert_eq!(surface.opacities().len(), 2);
    }

    #[test]
    fn test_apply_settings_through_navigator() {
        let (mut nav, t0) = navigator(Settings::default());
        let mut surface = CallLog::default();
        let settings = Settings::default().with_arrow_scale(2.0);
        nav.apply_settings(settings.with_animations(false));

        // Slow enough that no speed boost applies.
        tick(&mut nav, &mut surface, -10, 540, at(t0, 1000));
        assert_eq!(nav.overlay().state().current_scale, 2.0);
    }

    struct FakeDesktop {
        bounds: Option<Rect>,
        pointer: Cell<Point>,
    }

    impl Desktop for FakeDesktop {
        fn pointer_position(&self) -> Result<Point> {
            Ok(self.pointer.get())
        }

        fn primary_bounds(&self) -> Result<Rect> {
            self.bounds
                .ok_or_else(|| Error::Platform("no displays".into()))
        }
    }

    struct FixedClock(Instant);

    impl Clock for FixedClock {
        fn now(&self) -> Instant {
            self.0
        }
    }

    #[test]
    fn test_missing_primary_display_is_fatal() {
        let desktop = FakeDesktop {
            bounds: None,
            pointer: Cell::new(Point::new(0, 0)),
        };
        let result = Navigator::from_desktop(
            &desktop,
            &FixedClock(Instant::now()),
            SharedSettings::default(),
        );
        assert!(matches!(result, Err(Error::NoPrimaryDisplay)));
    }

    #[test]
    fn test_step_reads_desktop() {
        let desktop = FakeDesktop {
            bounds: Some(FULL_HD),
            pointer: Cell::new(Point::new(960, 540)),
        };
        let t0 = Instant::now();
        let start = FixedClock(t0);
        let handle = SharedSettings::default();
        let mut nav = Navigator::from_desktop(&desktop, &start, handle).unwrap();
        let mut surface = CallLog::default();

        desktop.pointer.set(Point::new(1919, 100));
        let later = FixedClock(t0 + Duration::from_secs(1));
        let out = nav.step(&desktop, &later, &mut surface).unwrap();
        assert_eq!(out.edge.region, Region::NearEdge(Edge::Right));
        // Moved (959, -440) over one second.
        assert!((out.edge.speed - 1055.1).abs() < 0.1);
    }

    struct LogFactory;

    impl SurfaceFactory for LogFactory {
        type Surface = CallLog;

        fn create(&self, bounds: Rect, options: SurfaceOptions) -> Result<CallLog> {
            assert_eq!(options, SurfaceOptions::OVERLAY);
            let mut log = CallLog::default();
            log.set_bounds(bounds)?;
            Ok(log)
        }
    }

    #[test]
    fn test_open_surface_starts_hidden() {
        let (nav, _) = navigator(Settings::default().with_opacity(40));
        let surface = nav.open_surface(&LogFactory).unwrap();
        assert_eq!(
            surface.calls,
            vec![
                SurfaceCall::Bounds(FULL_HD),
                SurfaceCall::Visible(false),
                SurfaceCall::Opacity(0.4),
            ]
        );
    }
}
