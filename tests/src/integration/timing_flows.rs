//! # Timing Flows
//!
//! Timeouts, stay-active windows and slow users, on a paused tokio clock.

#[cfg(test)]
mod tests {
    use crate::support::{init_test_tracing, start, Reply, ScriptedPresenter};
    use anyhow::Result;
    use herald_bus::{EventFilter, InMemoryEventBus};
    use herald_core::{DialogContainer, HeraldConfig, MessageOptions, Messenger, PromptOptions};
    use herald_types::TokioTimer;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::sleep;

    fn messenger() -> (Messenger, Arc<InMemoryEventBus>) {
        init_test_tracing();
        Messenger::in_memory(HeraldConfig::default())
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_fulfils_unanswered_message() -> Result<()> {
        let (messenger, bus) = messenger();
        let (_presenter, _task) = start(&bus, EventFilter::all(), ScriptedPresenter::always(Reply::Ignore));

        let future = messenger.message("Hello", MessageOptions::new().timeout(ms(100)));

        sleep(ms(50)).await;
        assert!(future.is_pending());

        sleep(ms(60)).await;
        assert_eq!(future.outcome(), Some(Ok(None)));
        assert!(future.elapsed() >= ms(100));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_user_loses_to_timeout() -> Result<()> {
        let (messenger, bus) = messenger();
        let (_presenter, _task) = start(
            &bus,
            EventFilter::all(),
            ScriptedPresenter::always(Reply::button("ok")).with_delay(ms(500)),
        );

        let future = messenger.message("Quick!", MessageOptions::new().timeout(ms(100)));
        assert_eq!(future.clone().await?, None);

        // the late click lands on a settled future
        sleep(ms(600)).await;
        assert_eq!(future.outcome(), Some(Ok(None)));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_stay_active_holds_user_answer() -> Result<()> {
        let (messenger, bus) = messenger();
        let (_presenter, _task) = start(&bus, EventFilter::all(), ScriptedPresenter::always(Reply::button("ok")));

        let future = messenger.message("Uploading", MessageOptions::new().stay_active(ms(300)));

        sleep(ms(100)).await;
        assert!(future.is_pending());
        assert!(future.is_guarded());

        let payload = future.clone().await?;
        assert_eq!(payload, Some(DialogContainer::new().with_button("ok")));
        assert!(future.elapsed() >= ms(300));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_stay_active_outlasts_timeout() -> Result<()> {
        let (messenger, bus) = messenger();
        let (_presenter, _task) = start(
            &bus,
            EventFilter::all(),
            ScriptedPresenter::always(Reply::button("ok")).with_delay(ms(200)),
        );

        let future = messenger.message(
            "Busy",
            MessageOptions::new().timeout(ms(100)).stay_active(ms(400)),
        );

        sleep(ms(300)).await;
        assert!(future.is_pending());

        // the timeout attempt came first, so it is the one applied
        sleep(ms(150)).await;
        assert_eq!(future.outcome(), Some(Ok(None)));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_timeout_reads_as_no() -> Result<()> {
        let (messenger, bus) = messenger();
        let (_presenter, _task) = start(&bus, EventFilter::all(), ScriptedPresenter::always(Reply::Ignore));

        let mut request = messenger.builder().confirm("Still there?", None);
        request.metadata.timeout = Some(ms(250));
        let future = messenger.dispatch(request);

        let answered = herald_core::dialogs::confirmed(future.clone().await?.as_ref());
        assert!(!answered);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_prompt_timeout_is_none() -> Result<()> {
        let (messenger, bus) = messenger();
        let (_presenter, _task) = start(&bus, EventFilter::all(), ScriptedPresenter::always(Reply::Ignore));

        let options = PromptOptions::new().with_message(MessageOptions::new().timeout(ms(80)));
        let reply = messenger.prompt("Name?", options);
        assert_eq!(reply.await?, None);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_unheard_message_stays_pending() -> Result<()> {
        let (messenger, _bus) = messenger();

        let future = messenger.message("Anyone?", MessageOptions::default());
        sleep(Duration::from_secs(3600)).await;

        assert!(future.is_pending());
        assert_eq!(messenger.events_published(), 1);
        Ok(())
    }

    #[test]
    fn test_messenger_built_outside_runtime() -> Result<()> {
        init_test_tracing();
        let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
        let bus = Arc::new(InMemoryEventBus::new());
        let messenger = Messenger::new(
            HeraldConfig::default(),
            bus.clone(),
            Arc::new(TokioTimer::with_handle(runtime.handle().clone())),
        );

        // dispatched from a plain thread, timed out on the runtime
        let future = messenger.message("Background", MessageOptions::new().timeout(ms(20)));
        assert!(future.is_pending());

        let payload = runtime.block_on(future.settled())?;
        assert_eq!(payload, None);
        assert!(future.is_fulfilled());
        Ok(())
    }
}
