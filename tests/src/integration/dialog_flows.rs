//! # Dialog Flows
//!
//! Caller → Messenger → bus → scripted presenter → settled future → caller.

#[cfg(test)]
mod tests {
    use crate::support::{init_test_tracing, start, Reply, ScriptedPresenter};
    use anyhow::Result;
    use herald_bus::{EventFilter, InMemoryEventBus, Scope};
    use herald_core::builder::{ALERT_FOOTER, CONFIRM_FOOTER};
    use herald_core::{HeraldConfig, Level, MessageError, MessageOptions, Messenger, PromptOptions, Registry};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const WAIT: Duration = Duration::from_secs(1);

    fn messenger() -> (Messenger, Arc<InMemoryEventBus>) {
        init_test_tracing();
        Messenger::in_memory(HeraldConfig::default())
    }

    // =============================================================================
    // PLAIN MESSAGES
    // =============================================================================

    #[tokio::test]
    async fn test_unknown_level_routes_to_message() -> Result<()> {
        let (messenger, bus) = messenger();
        let (presenter, _task) = start(&bus, EventFilter::all(), ScriptedPresenter::always(Reply::button("ok")));

        let future = messenger.message("Hello", MessageOptions::new().level(9));
        let payload = timeout(WAIT, future).await??;

        let seen = presenter.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].name, "global:message");
        assert_eq!(seen[0].content, "Hello");
        assert_eq!(seen[0].scope, Scope::Global);
        assert!(payload.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_json_options_reach_presenter() -> Result<()> {
        let (messenger, bus) = messenger();
        let mut sub = bus.subscribe(EventFilter::names(["io:statusmessage"]));

        let future = messenger.message_value(
            &json!("Copied 3 files"),
            json!({ "emitter": "io", "level": 4, "header": "Copy", "progress": 100 }),
        );

        let event = timeout(WAIT, sub.recv()).await?.expect("bus open");
        assert_eq!(event.message_promise.id(), future.id());
        assert_eq!(event.message_promise.metadata().header.as_deref(), Some("Copy"));
        assert_eq!(event.message_promise.extra("progress"), Some(&json!(100)));
        Ok(())
    }

    #[tokio::test]
    async fn test_alert_and_warn() -> Result<()> {
        let (messenger, bus) = messenger();
        let (presenter, _task) = start(&bus, EventFilter::all(), ScriptedPresenter::always(Reply::button("ok")));

        timeout(WAIT, messenger.alert("Saved", None)).await??;
        let warned = messenger.warn("Disk almost full");
        assert_eq!(warned.level(), Level::Warning);
        timeout(WAIT, warned).await??;

        let seen = presenter.seen();
        assert_eq!(seen[0].name, "global:message");
        assert_eq!(seen[0].footer.as_deref(), Some(ALERT_FOOTER));
        assert_eq!(seen[1].name, "global:warn");
        assert!(seen[1].content.starts_with(r#"<div class="dialog-message-icon"><i icon="alert">"#));
        Ok(())
    }

    #[tokio::test]
    async fn test_rejection_reaches_caller() -> Result<()> {
        let (messenger, bus) = messenger();
        let (_presenter, _task) = start(
            &bus,
            EventFilter::all(),
            ScriptedPresenter::always(Reply::Reject("window closed".into())),
        );

        let result = timeout(WAIT, messenger.message("bye", MessageOptions::default())).await?;
        assert_eq!(result, Err(MessageError::rejected("window closed")));
        Ok(())
    }

    // =============================================================================
    // CONFIRM / PROMPT
    // =============================================================================

    #[tokio::test]
    async fn test_confirm_yes_and_no() -> Result<()> {
        let (messenger, bus) = messenger();
        let script = ScriptedPresenter::new(|event| {
            if event.message_promise.content().contains("Save") {
                Reply::button("yes")
            } else {
                Reply::button("no")
            }
        });
        let (presenter, _task) = start(&bus, EventFilter::all(), script);

        assert!(timeout(WAIT, messenger.confirm("Save changes?", None)).await??);
        assert!(!timeout(WAIT, messenger.confirm("Discard changes?", None)).await??);
        assert_eq!(presenter.seen()[0].footer.as_deref(), Some(CONFIRM_FOOTER));
        Ok(())
    }

    #[tokio::test]
    async fn test_prompt_returns_typed_value() -> Result<()> {
        let (messenger, bus) = messenger();
        let (presenter, _task) = start(
            &bus,
            EventFilter::all(),
            ScriptedPresenter::always(Reply::input("ok", "Alice")),
        );

        let reply = messenger.prompt("Name?", PromptOptions::new().default_value("Bob"));
        assert_eq!(timeout(WAIT, reply).await??, Some("Alice".to_string()));
        assert!(presenter.seen()[0].content.contains(r#"value="Bob""#));
        Ok(())
    }

    #[tokio::test]
    async fn test_prompt_cancel_is_none() -> Result<()> {
        let (messenger, bus) = messenger();
        let (_presenter, _task) = start(
            &bus,
            EventFilter::all(),
            ScriptedPresenter::always(Reply::input("cancel", "Alice")),
        );

        let reply = messenger.prompt("Name?", PromptOptions::default());
        assert_eq!(timeout(WAIT, reply).await??, None);
        Ok(())
    }

    // =============================================================================
    // SCOPES AND SHARED INSTANCE
    // =============================================================================

    #[tokio::test]
    async fn test_target_scope_isolates_presenters() -> Result<()> {
        let (messenger, bus) = messenger();
        let (global, _g) = start(
            &bus,
            EventFilter::all().in_scope(Scope::Global),
            ScriptedPresenter::always(Reply::button("ok")),
        );
        let (panel, _p) = start(
            &bus,
            EventFilter::all().in_scope(Scope::Target("panel".into())),
            ScriptedPresenter::always(Reply::button("ok")),
        );

        timeout(WAIT, messenger.message("side", MessageOptions::new().target("panel"))).await??;
        timeout(WAIT, messenger.message("main", MessageOptions::default())).await??;

        assert_eq!(panel.seen().len(), 1);
        assert_eq!(panel.seen()[0].content, "side");
        assert_eq!(global.seen().len(), 1);
        assert_eq!(global.seen()[0].content, "main");
        Ok(())
    }

    #[tokio::test]
    async fn test_shared_messenger_across_load_sites() -> Result<()> {
        init_test_tracing();
        let registry = Registry::new();
        let bus = Arc::new(InMemoryEventBus::new());

        let make = {
            let bus = bus.clone();
            move || {
                Messenger::new(
                    HeraldConfig::default(),
                    bus.clone(),
                    Arc::new(herald_types::TokioTimer::new()),
                )
            }
        };
        let first = Messenger::shared(&registry, make.clone());
        let second = Messenger::shared(&registry, make);
        assert!(Arc::ptr_eq(&first, &second));

        first.message("one", MessageOptions::default());
        second.message("two", MessageOptions::default());
        assert_eq!(first.events_published(), 2);
        Ok(())
    }
}
