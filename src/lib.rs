// src/lib.rs
//! Wavescope - a streaming viewer for raw digitizer waveforms.
//!
//! Core pipeline: an ingest thread pulls decoded events from an
//! [`scope::source::EventSource`] at full stream rate while the render
//! context consumes at most one pending event at a time through a one-slot
//! mailbox, keeping the display responsive under unbounded input.

pub mod scope;
