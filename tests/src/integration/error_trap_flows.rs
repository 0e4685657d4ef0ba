//! # Error Trap Flows
//!
//! Host errors reported through the global hook end up on the presenter as
//! error-level messages, but only while the messenger is catching.

#[cfg(test)]
mod tests {
    use crate::support::{init_test_tracing, start, Reply, ScriptedPresenter};
    use anyhow::Result;
    use herald_bus::EventFilter;
    use herald_core::{ErrorTrap, HeraldConfig, HostError, HostHooks, Level, Messenger};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_catch_errors_toggle() -> Result<()> {
        init_test_tracing();
        let (messenger, bus) = Messenger::in_memory(HeraldConfig::default());
        let (presenter, task) = start(
            &bus,
            EventFilter::levels(vec![Level::Error]),
            ScriptedPresenter::always(Reply::button("ok")),
        );

        let trap = Arc::new(ErrorTrap::new(Arc::new(messenger)));
        let hooks = HostHooks::new();
        trap.install(&hooks);

        let error = HostError::new("undefined is not a function")
            .with_source("widgets/list.js")
            .with_line(17);

        // off: the host surfaces the error itself
        assert!(!hooks.report(&error));

        trap.messenger().catch_errors(true);
        assert!(hooks.report(&error));

        trap.messenger().catch_errors(false);
        assert!(!hooks.report(&error));

        // let the presenter drain, then stop it
        tokio::task::yield_now().await;
        drop(trap);
        drop(hooks);
        drop(bus);
        timeout(Duration::from_secs(1), task).await??;

        let seen = presenter.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].name, "global:error");
        assert_eq!(seen[0].header.as_deref(), Some("Runtime error (line 17)"));
        assert_eq!(seen[0].footer.as_deref(), Some("widgets/list.js"));
        assert!(seen[0].content.contains("undefined is not a function"));
        Ok(())
    }

    #[tokio::test]
    async fn test_catch_errors_from_config() -> Result<()> {
        init_test_tracing();
        let config = HeraldConfig {
            catch_errors: true,
            error_icon: "bug".to_string(),
            ..HeraldConfig::default()
        };
        let (messenger, bus) = Messenger::in_memory(config);
        let mut sub = bus.subscribe(EventFilter::names(["global:error"]));

        let trap = ErrorTrap::new(Arc::new(messenger));
        assert!(trap.handle(&HostError::new("boom")));

        let event = timeout(Duration::from_secs(1), sub.recv()).await?.expect("bus open");
        assert_eq!(event.message_promise.metadata().icon.as_deref(), Some("bug"));
        assert_eq!(event.message_promise.metadata().header.as_deref(), Some("Runtime error"));
        Ok(())
    }
}
