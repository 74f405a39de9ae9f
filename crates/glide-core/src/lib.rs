#![forbid(unsafe_code)]

//! Core: pointer input, gesture classification, and configuration.
//!
//! # Role in glide
//! `glide-core` is the input layer. It normalizes platform pointer events
//! into [`PointerSample`](event::PointerSample)s, classifies each interaction
//! with a [`GestureClassifier`](gesture::GestureClassifier), and defines the
//! [`CarouselConfig`](config::CarouselConfig) every other crate reads.
//!
//! # How it fits in the system
//! The carousel runtime (`glide`) feeds samples through the classifier and
//! turns the resulting [`GestureOutcome`](gesture::GestureOutcome)s into
//! panel motion. Nothing here knows about rendering, so the state machine
//! can be exercised without a host.

pub mod config;
pub mod event;
pub mod gesture;

pub use config::{CarouselConfig, ConfigError};
pub use event::{InputEvent, Point, PointerKind, PointerPhase, PointerSample, RawPointer};
pub use gesture::{
    Decision, Direction, GestureClassifier, GestureConfig, GestureContext, GestureOutcome,
    GestureSession, GestureState, Release, ScrollLock, resistance,
};
