//! Live show player
//!
//! The painter owns the pattern being shown and the frame buffer sent to the
//! strip. Pattern changes are cross-faded by wrapping the current tree in a
//! [`Transition`]; once the fade is over the wrapper is dropped again.

use embassy_time::Instant;

use crate::{
    channel::{PatternCommand, PatternReceiver},
    color::Rgb,
    config::PainterConfig,
    frame::Frame,
    pattern::{PatternSlot, Transition, rebase},
};

pub struct Painter<'a, const CHANNEL_SIZE: usize> {
    commands: PatternReceiver<'a, CHANNEL_SIZE>,
    config: PainterConfig,

    root: Option<PatternSlot>,
    /// Origin of the clock seen by `root`
    show_start: Instant,
    frame: Frame,
}

impl<'a, const CHANNEL_SIZE: usize> Painter<'a, CHANNEL_SIZE> {
    pub fn new(commands: PatternReceiver<'a, CHANNEL_SIZE>, config: &PainterConfig) -> Self {
        Self {
            commands,
            config: *config,
            root: None,
            show_start: Instant::from_millis(0),
            frame: Frame::new(config.num_leds),
        }
    }

    /// Pattern currently shown, including any pending cross-fade wrapper
    pub fn pattern(&self) -> Option<&PatternSlot> {
        self.root.as_ref()
    }

    /// Check whether a cross-fade is in progress
    pub fn is_transitioning(&self) -> bool {
        matches!(self.root, Some(PatternSlot::Transition(_)))
    }

    /// Cross-fade from the current pattern to `pattern`
    pub fn set_pattern(&mut self, pattern: PatternSlot, now: Instant) {
        let Some(current) = self.root.take() else {
            self.cut_to(pattern, now);
            return;
        };
        let offset_ms = self.show_time(now).as_millis();
        let transition = Transition::new(
            Some(Box::new(current)),
            Some(Box::new(pattern)),
            offset_ms,
            self.config.transition.as_millis(),
        )
        .with_curve(self.config.curve);
        tracing::debug!(offset_ms, "starting pattern transition");
        self.root = Some(transition.into());
    }

    /// Switch to `pattern` immediately, restarting the clock
    pub fn cut_to(&mut self, pattern: PatternSlot, now: Instant) {
        tracing::debug!(kind = pattern.kind().as_str(), "switching pattern");
        self.root = Some(pattern);
        self.show_start = now;
    }

    /// Stop drawing; the frame buffer keeps its content
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Apply every queued command (non-blocking)
    pub fn process_pending(&mut self, now: Instant) {
        while let Ok(command) = self.commands.try_receive() {
            match command {
                PatternCommand::Fade(pattern) => self.set_pattern(pattern, now),
                PatternCommand::Cut(pattern) => self.cut_to(pattern, now),
                PatternCommand::Clear => self.clear(),
            }
        }
    }

    /// Process one frame
    pub fn render(&mut self, now: Instant) -> &[Rgb] {
        self.process_pending(now);
        self.finish_transition(now);

        let show_time = self.show_time(now);
        if let Some(root) = &mut self.root {
            root.render(show_time, &mut self.frame);
        }
        &self.frame
    }

    fn show_time(&self, now: Instant) -> Instant {
        rebase(now, self.show_start.as_millis())
    }

    /// Replace a finished cross-fade by its target, keeping the target's clock
    fn finish_transition(&mut self, now: Instant) {
        let show_time = self.show_time(now);
        let Some(PatternSlot::Transition(transition)) = &self.root else {
            return;
        };
        if !transition.is_complete(show_time) {
            return;
        }
        let Some(PatternSlot::Transition(transition)) = self.root.take() else {
            return;
        };
        let offset_ms = transition.offset_ms;
        self.root = transition.into_after().map(|after| *after);
        self.show_start = Instant::from_millis(self.show_start.as_millis() + offset_ms);
        tracing::debug!("pattern transition complete");
    }
}
