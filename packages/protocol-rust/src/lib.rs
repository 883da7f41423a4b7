//! Redisques operation protocol: the operation catalog, request builders and
//! reply vocabulary shared by queue clients and the queue engine.
//!
//! This crate performs no I/O. Requests are built here, carried by an
//! external message bus (see [`Dispatcher`]) and resolved again on the engine
//! side with [`resolve`] or [`RequestDecoder`].

pub mod client;
pub mod codec;
pub mod decode;
pub mod keys;
pub mod messages;
pub mod operation;
pub mod traits;

pub use client::QueueClient;
pub use codec::{CodecError, WireFormat};
pub use decode::{DecodeError, DecodedRequest, DecoderConfig, LegacyAliasPolicy, RequestDecoder};
pub use messages::{builders, Message, Payload, Reply, ReplyStatus};
pub use operation::{
    resolve, FieldKind, FieldSpec, LegacyAliasUsed, Operation, PayloadShape, Resolved,
    UnknownOperation,
};
pub use traits::Dispatcher;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    /// Number of WARN events emitted on this thread while `f` runs.
    pub(crate) fn count_warnings(f: impl FnOnce()) -> usize {
        let counter = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(counter.clone()));
        tracing::subscriber::with_default(subscriber, f);
        counter.load(Ordering::SeqCst)
    }
}
