//! Drives update-and-render ticks. The windowed host calls [`FrameScheduler::frame`]
//! once per display refresh for as long as the window lives; headless runs
//! call it in a loop over a [`FrameClock::Fixed`] timestep.

use std::time::Instant;

use crate::camera::CameraPose;
use crate::input::InputSnapshot;
use crate::overlay::OverlayGateway;
use crate::world::{HubWorld, TickReport};

/// Source of the elapsed time fed to the light animation.
#[derive(Debug, Clone, Copy)]
pub enum FrameClock {
    Wall(Instant),
    Fixed { step: f64 },
}

impl FrameClock {
    pub fn wall() -> Self {
        FrameClock::Wall(Instant::now())
    }

    pub fn fixed(step: f64) -> Self {
        FrameClock::Fixed { step }
    }

    fn elapsed_secs(&self, tick: u64) -> f64 {
        match self {
            FrameClock::Wall(start) => start.elapsed().as_secs_f64(),
            FrameClock::Fixed { step } => tick as f64 * step,
        }
    }
}

/// Everything a renderer may read after the tick's mutations.
pub struct FrameView<'a> {
    pub world: &'a HubWorld,
    pub camera: CameraPose,
    pub tick: u64,
    pub elapsed_secs: f64,
}

pub trait FrameRenderer {
    type Error;

    fn render_frame(&mut self, frame: &FrameView<'_>) -> Result<(), Self::Error>;
}

/// Renderer that draws nothing; for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl FrameRenderer for NullRenderer {
    type Error = std::convert::Infallible;

    fn render_frame(&mut self, _frame: &FrameView<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Debug)]
pub struct FrameScheduler {
    clock: FrameClock,
}

impl FrameScheduler {
    pub fn new(clock: FrameClock) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> FrameClock {
        self.clock
    }

    /// Update the world from `input`, then render. A render failure is
    /// returned after the state has already advanced.
    pub fn frame<R: FrameRenderer>(
        &mut self,
        world: &mut HubWorld,
        input: &mut InputSnapshot,
        overlay: &mut dyn OverlayGateway,
        renderer: &mut R,
    ) -> Result<TickReport, R::Error> {
        let elapsed_secs = self.clock.elapsed_secs(world.ticks());
        let report = world.tick(input, elapsed_secs, overlay);
        let camera = world.camera_pose();
        let view = FrameView {
            world: &*world,
            camera,
            tick: report.tick,
            elapsed_secs,
        };
        renderer.render_frame(&view)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HubConfig;
    use crate::overlay::RecordingOverlay;
    use rand::{rngs::SmallRng, SeedableRng};

    #[derive(Default)]
    struct CountingRenderer {
        frames: Vec<(u64, f64, bool)>,
    }

    impl FrameRenderer for CountingRenderer {
        type Error = String;

        fn render_frame(&mut self, frame: &FrameView<'_>) -> Result<(), Self::Error> {
            let visible = frame.world.player().entity.visible;
            self.frames.push((frame.tick, frame.elapsed_secs, visible));
            if self.frames.len() > 3 {
                return Err("device lost".into());
            }
            Ok(())
        }
    }

    fn world() -> HubWorld {
        HubWorld::with_rng(&HubConfig::default(), SmallRng::seed_from_u64(3)).expect("world")
    }

    #[test]
    fn fixed_clock_advances_by_step() {
        let mut world = world();
        let mut scheduler = FrameScheduler::new(FrameClock::fixed(0.5));
        let mut renderer = CountingRenderer::default();
        let mut overlay = RecordingOverlay::new();
        let mut input = InputSnapshot::new();

        for expected in 0..3 {
            let report = scheduler
                .frame(&mut world, &mut input, &mut overlay, &mut renderer)
                .expect("frame renders");
            assert_eq!(report.tick, expected);
        }

        let times: Vec<f64> = renderer.frames.iter().map(|frame| frame.1).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn render_errors_surface_after_update() {
        let mut world = world();
        let mut scheduler = FrameScheduler::new(FrameClock::fixed(1.0 / 60.0));
        let mut renderer = CountingRenderer::default();
        let mut overlay = RecordingOverlay::new();
        let mut input = InputSnapshot::new();

        let err = (0..10)
            .map(|_| scheduler.frame(&mut world, &mut input, &mut overlay, &mut renderer))
            .find_map(Result::err)
            .expect("renderer fails on the fourth frame");

        assert_eq!(err, "device lost");
        assert_eq!(world.ticks(), 4);
    }

    #[test]
    fn null_renderer_never_fails() {
        let mut world = world();
        let mut scheduler = FrameScheduler::new(FrameClock::wall());
        let mut overlay = RecordingOverlay::new();
        let mut input = InputSnapshot::new();
        let report = scheduler
            .frame(&mut world, &mut input, &mut overlay, &mut NullRenderer)
            .expect("infallible");
        assert_eq!(report.tick, 0);
    }
}
