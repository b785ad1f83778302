use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const DEFAULT_LOG_FILTER: &str =
    "ciharvest=info,ciharvest_core=info,ciharvest_github=info,ciharvest_travis=info";

pub const VERBOSE_LOG_FILTER: &str =
    "ciharvest=debug,ciharvest_core=debug,ciharvest_github=debug,ciharvest_travis=debug";

/// Installs the global subscriber; `RUST_LOG` overrides the default filter.
pub fn init(verbose: bool) {
    if verbose {
        init_with_default(VERBOSE_LOG_FILTER);
    } else {
        init_with_default(DEFAULT_LOG_FILTER);
    }
}

pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .init();
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        Mutex,
    };

    use tracing::{
        Event,
        Subscriber,
    };
    use tracing_subscriber::layer::{
        Context,
        Layer,
    };

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<String>>>);

    impl<S: Subscriber> Layer<S> for Captured {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let meta = event.metadata();
            self.0
                .lock()
                .unwrap()
                .push(format!("{} {}", meta.level(), meta.target()));
        }
    }

    fn captured_with(filter: &str) -> Vec<String> {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(filter))
            .with(captured.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(target: "ciharvest", "run failed");
            tracing::warn!(target: "ciharvest", "finished with failures");
            tracing::info!(target: "ciharvest_core::pipeline", "Done!");
            tracing::debug!(target: "ciharvest_travis::client", "decoded builds");
        });

        let events = captured.0.lock().unwrap().clone();
        events
    }

    #[test]
    fn test_default_filter_keeps_binary_events() {
        let events = captured_with(DEFAULT_LOG_FILTER);

        assert!(events.contains(&"ERROR ciharvest".to_string()));
        assert!(events.contains(&"WARN ciharvest".to_string()));
        assert!(events.contains(&"INFO ciharvest_core::pipeline".to_string()));
        assert!(!events.iter().any(|e| e.starts_with("DEBUG")));
    }

    #[test]
    fn test_verbose_filter_enables_debug() {
        let events = captured_with(VERBOSE_LOG_FILTER);

        assert!(events.contains(&"ERROR ciharvest".to_string()));
        assert!(events.contains(&"DEBUG ciharvest_travis::client".to_string()));
    }
}
