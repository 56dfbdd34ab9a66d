//! Bounded pattern mailbox shared between tasks
//!
//! Control tasks (network handlers, alarms, buttons) push [`PatternCommand`]s
//! and the render loop drains them once per tick. Synchronization goes through
//! `critical-section`, so the mailbox also works from interrupt handlers.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::pattern::PatternSlot;

/// Request to change the pattern being shown
#[derive(Debug, Clone)]
pub enum PatternCommand {
    /// Cross-fade to the pattern using the painter's transition settings
    Fade(PatternSlot),
    /// Switch to the pattern on the next frame
    Cut(PatternSlot),
    /// Stop drawing; the strip keeps its last frame
    Clear,
}

/// Error returned when trying to send to a full channel.
#[derive(Debug, Clone)]
pub struct TrySendError(pub PatternCommand);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// A bounded, thread-safe queue of pattern commands.
pub struct PatternChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<PatternCommand, SIZE>>>,
}

impl<const SIZE: usize> PatternChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for this channel.
    ///
    /// Multiple senders can coexist; they share access to the same queue.
    pub const fn sender(&self) -> PatternSender<'_, SIZE> {
        PatternSender { channel: self }
    }

    /// Get a receiver handle for this channel.
    pub const fn receiver(&self) -> PatternReceiver<'_, SIZE> {
        PatternReceiver { channel: self }
    }

    /// Queue a command.
    ///
    /// Returns the command back if the channel is full.
    pub fn try_send(&self, command: PatternCommand) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(command).map_err(TrySendError)
        })
    }

    /// Take the oldest queued command.
    pub fn try_receive(&self) -> Result<PatternCommand, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }
}

impl<const SIZE: usize> Default for PatternChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender handle for a [`PatternChannel`].
#[derive(Clone, Copy)]
pub struct PatternSender<'a, const SIZE: usize> {
    channel: &'a PatternChannel<SIZE>,
}

impl<const SIZE: usize> PatternSender<'_, SIZE> {
    /// Queue a cross-fade to `pattern`.
    pub fn fade_to(&self, pattern: PatternSlot) -> Result<(), TrySendError> {
        self.channel.try_send(PatternCommand::Fade(pattern))
    }

    /// Queue a hard cut to `pattern`.
    pub fn cut_to(&self, pattern: PatternSlot) -> Result<(), TrySendError> {
        self.channel.try_send(PatternCommand::Cut(pattern))
    }

    /// Queue any command.
    pub fn try_send(&self, command: PatternCommand) -> Result<(), TrySendError> {
        self.channel.try_send(command)
    }
}

/// A receiver handle for a [`PatternChannel`].
#[derive(Clone, Copy)]
pub struct PatternReceiver<'a, const SIZE: usize> {
    channel: &'a PatternChannel<SIZE>,
}

impl<const SIZE: usize> PatternReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Result<PatternCommand, TryReceiveError> {
        self.channel.try_receive()
    }
}
