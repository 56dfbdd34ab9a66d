//! Frame pacing for the live show.
//!
//! Portable, without async/await or platform-specific timers: the caller
//! sleeps between frames for the duration returned by [`FrameScheduler::tick`].

use embassy_time::{Duration, Instant};

use crate::{OutputDriver, painter::Painter};

/// Default target frame rate (60 FPS).
pub const DEFAULT_FPS: u32 = 60;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Drives a [`Painter`] at a fixed frame rate and writes each frame out.
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(painter, driver);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     sleep(result.sleep_duration);
/// }
/// ```
pub struct FrameScheduler<'a, O: OutputDriver, const CHANNEL_SIZE: usize> {
    output: O,
    painter: Painter<'a, CHANNEL_SIZE>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, O: OutputDriver, const CHANNEL_SIZE: usize> FrameScheduler<'a, O, CHANNEL_SIZE> {
    /// Create a scheduler running at [`DEFAULT_FPS`].
    pub fn new(painter: Painter<'a, CHANNEL_SIZE>, driver: O) -> Self {
        Self::with_frame_duration(painter, driver, DEFAULT_FRAME_DURATION)
    }

    pub fn with_frame_duration(
        painter: Painter<'a, CHANNEL_SIZE>,
        driver: O,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output: driver,
            painter,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Render one frame, write it out and return when the next one is due.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Skip the backlog after a stall of more than two frames
        let max_drift_ms = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift_ms {
            self.next_frame = now;
        }

        let frame = self.painter.render(now);
        self.output.write(frame);

        self.next_frame += self.frame_duration;
        let sleep_duration =
            Duration::from_millis(self.next_frame.as_millis().saturating_sub(now.as_millis()));

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    pub fn painter(&self) -> &Painter<'a, CHANNEL_SIZE> {
        &self.painter
    }

    pub fn painter_mut(&mut self) -> &mut Painter<'a, CHANNEL_SIZE> {
        &mut self.painter
    }

    /// Give back the output driver.
    pub fn into_output(self) -> O {
        self.output
    }
}
