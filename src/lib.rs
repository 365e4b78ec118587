//! # rf-stopwatch
//!
//! A portable, no_std Rust controller for a two-endpoint wireless stopwatch built on
//! sub-GHz packet radios such as the CC1101.
//!
//! The controller detects a start button press, broadcasts a `START` frame and later
//! receives asynchronous `END` frames from up to two remote targets, computing the
//! elapsed time of each measurement on its own clock.
//!
//! This crate implements the timing and protocol logic using:
//! - `embedded-hal` traits for the button input and loop pacing
//! - a fixed 32-byte frame codec with an ASCII command payload
//! - a two-slot timer registry armed by a single start event
//! - interrupt-safe millisecond counting with `critical-section`
//!
//! The radio driver itself (modulation, tuning, CRC, address filtering) is plugged in
//! through the [`radio::Transceiver`] trait.
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` support and enables `std::error::Error` and `Vec` sinks |
//! | `delay-loop`          | Uses `embedded_hal::delay::DelayNs` to pace the polling loop |
//! | `clock-isr` (default) | Uses `critical_section::with` for an ISR driven millisecond counter |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Protocol
//!
//! - Byte 0 of every frame is the destination address, the rest is ASCII, zero padded
//! - `START` arms both timer slots when neither is in flight
//! - `END1` / `END2` resolve slot 0 / slot 1 and report the elapsed milliseconds
//! - CRC failures, malformed and orphan `END` frames are reported and otherwise ignored
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rf_stopwatch::{config::StopwatchConfig, diag::TextSink, session::Session};
//!
//! rf_stopwatch::millis_clock!(MILLIS);
//!
//! let mut session = Session::new(radio, &MILLIS, button, TextSink::new(serial), StopwatchConfig::default());
//! let _ = session.init();
//! session.run();
//! ```
//!
//! Or, use `run_polling_loop()` with a `DelayNs` implementation:
//!
//! ```rust,ignore
//! rf_stopwatch::clock::run_polling_loop(&mut session, &mut delay, 1);
//! ```
//!
//! ## Integration Notes
//!
//! - The loop is single threaded; the receive wait (100 ms by default) blocks button sampling
//! - A lost `END` frame leaves its slot armed unless `arm_timeout_ms` is configured
//! - Only one button channel drives the start signal
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "clock-isr")]
pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

pub mod clock;
pub mod config;
pub mod consts;
pub mod debounce;
pub mod diag;
pub mod error;
pub mod frame;
pub mod radio;
pub mod registry;
pub mod session;
pub mod sync;
