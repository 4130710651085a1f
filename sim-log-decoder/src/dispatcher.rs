//! Message dispatcher
//!
//! Inspects one raw datagram at a time: validates framing, classifies the
//! message family and routes event-log messages to the matching decoder.
//! The dispatcher performs no I/O and keeps no state between calls; the
//! subtype registry and diagnostic configuration are injected at
//! construction, so a single instance can be shared across threads.
//!
//! Malformed input never panics. Datagrams outside the event-log family
//! and unrecognized message kinds are ignored; structural decode failures
//! drop the one datagram and leave the pipeline running.

use crate::config::DispatcherConfig;
use crate::event_decoder::EventDecoder;
use crate::registry::SubtypeRegistry;
use crate::types::{DispatchOutcome, EventKind, NormalizedEvent, LOG_HEADER, SIM_END};

/// Routes raw datagrams to the event decoders
pub struct Dispatcher {
    registry: SubtypeRegistry,
    config: DispatcherConfig,
}

impl Dispatcher {
    /// Create a dispatcher with the given registry and configuration
    pub fn new(registry: SubtypeRegistry, config: DispatcherConfig) -> Self {
        Self { registry, config }
    }

    /// The subtype registry this dispatcher labels events with
    pub fn registry(&self) -> &SubtypeRegistry {
        &self.registry
    }

    /// Dispatch one datagram.
    ///
    /// Framing rules, checked in order:
    /// 1. a single byte equal to [`SIM_END`] is a shutdown request; the
    ///    caller must schedule delayed termination
    /// 2. anything of 4 bytes or fewer, or not starting with
    ///    [`LOG_HEADER`], belongs to another message family and is ignored
    /// 3. byte 1 selects the decoder; unknown kinds are ignored with a
    ///    diagnostic
    /// 4. the decoder sees the body with the 2-byte header stripped; a
    ///    structural failure drops this datagram only
    pub fn dispatch(&self, datagram: &[u8]) -> Result<NormalizedEvent, DispatchOutcome> {
        if datagram.len() == 1 && datagram[0] == SIM_END {
            return Err(DispatchOutcome::ShutdownRequested);
        }

        if datagram.len() <= 4 || datagram[0] != LOG_HEADER {
            if self.config.log_ignored {
                log::trace!(
                    "ignoring {} byte datagram outside the event-log family",
                    datagram.len()
                );
            }
            return Err(DispatchOutcome::Ignored);
        }

        let kind = match EventKind::from_code(datagram[1]) {
            Some(kind) => kind,
            None => {
                log::debug!("message type {} is not recognized", datagram[1]);
                return Err(DispatchOutcome::Ignored);
            }
        };

        match EventDecoder::decode(kind, &datagram[2..]) {
            Ok(event) => {
                log::trace!(
                    "decoded {} event, subtype {} ({})",
                    kind,
                    event.subtype,
                    self.registry.label(kind, event.subtype)
                );
                Ok(event)
            }
            Err(e) => {
                log::warn!("could not parse message of type {}: {}", kind.code(), e);
                Err(DispatchOutcome::ParseFailed(kind))
            }
        }
    }
}
