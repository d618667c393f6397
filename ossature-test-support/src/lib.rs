//! Shared test utilities used across ossature crates.

pub mod property;
pub mod scene;

pub mod tracing {
    //! Capture of spans and events emitted while a closure runs.
    //!
    //! [`capture`] installs a scoped subscriber made of a registry and a
    //! [`Recorder`] layer, so assertions never depend on global logging state.
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::registry::LookupSpan;
    use tracing_subscriber::{Layer, Registry};

    /// A closed span together with the fields recorded against it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CapturedSpan {
        /// Span name from the callsite metadata.
        pub name: String,
        /// Fields recorded at creation and via `Span::record`.
        pub fields: HashMap<String, String>,
    }

    /// An emitted event with its level, target, and fields.
    ///
    /// The formatted message is stored under the `message` key.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CapturedEvent {
        /// Level the event was emitted at.
        pub level: Level,
        /// Module path style target of the event.
        pub target: String,
        /// Structured fields, rendered to strings.
        pub fields: HashMap<String, String>,
    }

    impl CapturedEvent {
        /// Returns the rendered value of `name`, if the event carried it.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }

        /// Returns the event message, if any.
        #[must_use]
        pub fn message(&self) -> Option<&str> {
            self.field("message")
        }
    }

    #[derive(Default)]
    struct Store {
        spans: Vec<CapturedSpan>,
        events: Vec<CapturedEvent>,
    }

    /// Layer that stores every closed span and emitted event.
    #[derive(Clone, Default)]
    pub struct Recorder {
        store: Arc<Mutex<Store>>,
    }

    impl Recorder {
        fn store(&self) -> MutexGuard<'_, Store> {
            self.store.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Spans in the order they closed.
        #[must_use]
        pub fn spans(&self) -> Vec<CapturedSpan> {
            self.store().spans.clone()
        }

        /// Events in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<CapturedEvent> {
            self.store().events.clone()
        }

        /// Events emitted at exactly `level`.
        #[must_use]
        pub fn events_at(&self, level: Level) -> Vec<CapturedEvent> {
            self.store()
                .events
                .iter()
                .filter(|event| event.level == level)
                .cloned()
                .collect()
        }

        /// Returns `true` when a span called `name` has closed.
        #[must_use]
        pub fn saw_span(&self, name: &str) -> bool {
            self.store().spans.iter().any(|span| span.name == name)
        }
    }

    /// Runs `f` with a scoped subscriber and returns its output alongside the
    /// recorder holding everything emitted during the call.
    ///
    /// # Examples
    /// ```
    /// use ossature_test_support::tracing::capture;
    ///
    /// let (value, recorder) = capture(|| {
    ///     tracing::info!(answer = 42, "computed");
    ///     42
    /// });
    /// assert_eq!(value, 42);
    /// assert_eq!(recorder.events()[0].field("answer"), Some("42"));
    /// ```
    pub fn capture<F, R>(f: F) -> (R, Recorder)
    where
        F: FnOnce() -> R,
    {
        let recorder = Recorder::default();
        let subscriber = Registry::default().with(recorder.clone());
        let output = tracing::subscriber::with_default(subscriber, f);
        (output, recorder)
    }

    struct PendingSpan {
        name: String,
        fields: HashMap<String, String>,
    }

    impl<S> Layer<S> for Recorder
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(
            &self,
            attrs: &tracing::span::Attributes<'_>,
            id: &tracing::span::Id,
            ctx: Context<'_, S>,
        ) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut pending = PendingSpan {
                name: attrs.metadata().name().to_owned(),
                fields: HashMap::new(),
            };
            attrs.record(&mut Fields(&mut pending.fields));
            span.extensions_mut().insert(pending);
        }

        fn on_record(
            &self,
            id: &tracing::span::Id,
            values: &tracing::span::Record<'_>,
            ctx: Context<'_, S>,
        ) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            if let Some(pending) = span.extensions_mut().get_mut::<PendingSpan>() {
                values.record(&mut Fields(&mut pending.fields));
            }
        }

        fn on_close(&self, id: tracing::span::Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let Some(pending) = span.extensions_mut().remove::<PendingSpan>() else {
                return;
            };
            self.store().spans.push(CapturedSpan {
                name: pending.name,
                fields: pending.fields,
            });
        }

        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            event.record(&mut Fields(&mut fields));
            self.store().events.push(CapturedEvent {
                level: *event.metadata().level(),
                target: event.metadata().target().to_owned(),
                fields,
            });
        }
    }

    struct Fields<'a>(&'a mut HashMap<String, String>);

    impl Visit for Fields<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_bool(&mut self, field: &Field, value: bool) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_i64(&mut self, field: &Field, value: i64) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_u64(&mut self, field: &Field, value: u64) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }
    }

}
