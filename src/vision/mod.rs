//! Vision pipeline module
//!
//! Provides the VisionClient seam and the HTTP worker implementation that
//! feeds the data store.

pub mod client;
mod error;
mod worker;

pub use client::{VisionClient, VisionPayload};
pub use error::VisionError;
pub use worker::WorkerVisionClient;
