#![forbid(unsafe_code)]

//! Cross-thread control of a carousel.
//!
//! A carousel is single-owner and never shared. Timers, animation callbacks,
//! or UI code on other threads talk to it through a [`CarouselRemote`], which
//! queues [`Command`]s on an mpsc channel. The owner drains the queue with
//! [`Carousel::pump`](crate::Carousel::pump), so every mutation still happens
//! on one logical thread.

use std::sync::mpsc;
use std::time::Duration;

use glide_core::InputEvent;

/// A queued request for the carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `next(delay)`.
    Next(Option<Duration>),
    /// `prev(delay)`.
    Prev(Option<Duration>),
    /// `slide(to, speed)`.
    Slide {
        /// Target index.
        to: usize,
        /// Optional speed override.
        speed: Option<Duration>,
    },
    /// Host input (pointer, resize, animation completion).
    Input(InputEvent),
    /// `teardown()`.
    Teardown,
}

/// The carousel behind a remote has been dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("carousel is gone")]
pub struct RemoteClosed;

/// Cloneable, `Send` handle that queues commands for a carousel.
#[derive(Debug, Clone)]
pub struct CarouselRemote {
    sender: mpsc::Sender<Command>,
}

impl CarouselRemote {
    /// Queue a command.
    pub fn send(&self, command: Command) -> Result<(), RemoteClosed> {
        self.sender.send(command).map_err(|_| RemoteClosed)
    }

    /// Queue `next(delay)`.
    pub fn next(&self, delay: Option<Duration>) -> Result<(), RemoteClosed> {
        self.send(Command::Next(delay))
    }

    /// Queue `prev(delay)`.
    pub fn prev(&self, delay: Option<Duration>) -> Result<(), RemoteClosed> {
        self.send(Command::Prev(delay))
    }

    /// Queue `slide(to, speed)`.
    pub fn slide(&self, to: usize, speed: Option<Duration>) -> Result<(), RemoteClosed> {
        self.send(Command::Slide { to, speed })
    }

    /// Queue host input.
    pub fn input(&self, event: InputEvent) -> Result<(), RemoteClosed> {
        self.send(Command::Input(event))
    }

    /// Queue `teardown()`.
    pub fn teardown(&self) -> Result<(), RemoteClosed> {
        self.send(Command::Teardown)
    }
}

/// Receiving end owned by the carousel.
#[derive(Debug)]
pub(crate) struct CommandQueue {
    sender: mpsc::Sender<Command>,
    receiver: mpsc::Receiver<Command>,
}

impl CommandQueue {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    pub(crate) fn remote(&self) -> CarouselRemote {
        CarouselRemote {
            sender: self.sender.clone(),
        }
    }

    /// Drain pending commands.
    pub(crate) fn drain(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        while let Ok(command) = self.receiver.try_recv() {
            commands.push(command);
        }
        commands
    }
}
