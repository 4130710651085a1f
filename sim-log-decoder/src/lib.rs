//! Simulation Log Decoder Library
//!
//! A stateless, reusable library for decoding the telemetry a wireless
//! sensor network simulation publishes on its UDP multicast channel. Two
//! independent binary encodings are handled:
//! - the event-log protocol (big-endian, marker byte 128) describing node
//!   lifecycle and link-authentication state transitions
//! - the frame-control field of IEEE 802.15.4 link-layer headers
//!   (little-endian), decoded independently of the event protocol
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on decoding:
//! - Validates datagram framing and routes messages to a decoder by kind
//! - Produces immutable [`NormalizedEvent`] records
//! - Resolves subtype codes to labels with a guaranteed fallback
//! - Derives 802.15.4 addressing sizes and PAN-ID presence
//!
//! The library does NOT:
//! - Perform any I/O (sockets, files, timers)
//! - Format log lines or render anything
//! - Manage process lifecycle
//!
//! All of that lives in the application layer (sim-log-cli). Decoding is a
//! pure function of the input buffer, so a dispatcher can be shared across
//! threads without synchronization.
//!
//! # Example Usage
//!
//! ```
//! use sim_log_decoder::{Dispatcher, DispatcherConfig, SubtypeRegistry};
//!
//! let dispatcher = Dispatcher::new(SubtypeRegistry::with_defaults(), DispatcherConfig::new());
//!
//! // Node 5 joined the simulation.
//! let event = dispatcher.dispatch(&[128, 1, 1, 0x00, 0x05]).unwrap();
//! assert_eq!(event.nodes, vec![5]);
//! assert_eq!(dispatcher.registry().label(event.kind, event.subtype), "node join");
//! ```

// Public modules
pub mod config;
pub mod data_frame;
pub mod dispatcher;
pub mod event_decoder;
pub mod frame_control;
pub mod registry;
pub mod types;

// Re-export main types for convenience
pub use config::DispatcherConfig;
pub use data_frame::ReachabilityReport;
pub use dispatcher::Dispatcher;
pub use event_decoder::EventDecoder;
pub use frame_control::{AddressMode, FrameControl, FrameError, FrameType};
pub use registry::SubtypeRegistry;
pub use types::{
    DecodeError, DispatchOutcome, EventKind, NormalizedEvent, Result, DATA_FRAME, LOG_HEADER,
    SIM_END,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: a freshly built dispatcher ignores noise.
        let dispatcher = Dispatcher::new(SubtypeRegistry::with_defaults(), DispatcherConfig::new());
        assert_eq!(dispatcher.dispatch(&[0, 1, 2]), Err(DispatchOutcome::Ignored));
    }
}
