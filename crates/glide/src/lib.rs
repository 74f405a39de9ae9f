#![forbid(unsafe_code)]

//! glide: a touch-driven carousel with an endless ring layout.
//!
//! This crate is the runtime. It owns the panel offsets, runs the ring
//! arithmetic that makes a finite strip look endless, and turns classified
//! gestures into commits. Input normalization and configuration live in
//! [`glide_core`]; rendering strategies and clocks live in [`glide_backend`].
//! Both are re-exported here.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use glide::{Carousel, CarouselConfig, HeadlessSurface, ManualClock, PointerSample};
//! use glide::TransitionRenderer;
//!
//! let clock = ManualClock::new();
//! let renderer = TransitionRenderer::new(HeadlessSurface::new(300.0), clock.clone());
//! let mut carousel = Carousel::new(CarouselConfig::default(), 3, renderer, clock.clone());
//!
//! carousel.handle_pointer(&PointerSample::start(250.0, 10.0, Duration::ZERO));
//! carousel.handle_pointer(&PointerSample::moved(50.0, 12.0, Duration::from_millis(80)));
//! carousel.handle_pointer(&PointerSample::end(50.0, 12.0, Duration::from_millis(100)));
//! assert_eq!(carousel.position(), 1);
//! ```

pub mod autoplay;
pub mod carousel;
pub mod layout;
pub mod remote;
pub mod ring;
pub mod transition;

pub use autoplay::AutoplayTimer;
pub use carousel::{Carousel, SlideOutcome};
pub use layout::{Geometry, Inert, Ready};
pub use remote::{CarouselRemote, Command, RemoteClosed};
pub use ring::{Ring, Slot};
pub use transition::{Panel, TransitionController};

pub use glide_backend::{
    AdaptiveRenderer, Clock, HeadlessSurface, ManualClock, MonotonicClock, PollingRenderer,
    Renderer, RendererCapabilities, Surface, SurfaceOp, TransitionRenderer,
};
pub use glide_core::{
    CarouselConfig, ConfigError, Decision, Direction, GestureConfig, GestureOutcome, GestureState,
    InputEvent, Point, PointerKind, PointerPhase, PointerSample, RawPointer, resistance,
};
