//! # Panic Hook
//!
//! The panic hook is process-global, so this flow runs in its own test
//! binary where no other test can panic while it is installed.

use anyhow::Result;
use herald_bus::EventFilter;
use herald_core::{ErrorTrap, HeraldConfig, Messenger};
use std::sync::Arc;

#[test]
fn test_panic_hook_routes_panics() -> Result<()> {
    let (messenger, bus) = Messenger::in_memory(HeraldConfig::default());
    let mut sub = bus.subscribe(EventFilter::names(["global:error"]));
    let trap = Arc::new(ErrorTrap::new(Arc::new(messenger)));

    // not catching: the trap passes the panic on to the previous hook
    trap.install_panic_hook();
    let result = std::panic::catch_unwind(|| panic!("unseen"));
    assert!(result.is_err());
    assert!(sub.try_recv()?.is_none());

    trap.messenger().catch_errors(true);
    let result = std::panic::catch_unwind(|| panic!("kaboom"));

    // the binary started on the default hook, taking ours puts it back
    drop(std::panic::take_hook());

    assert!(result.is_err());
    let event = sub.try_recv()?.expect("error message published");
    assert!(event.message_promise.content().contains("kaboom"));
    assert_eq!(
        event.message_promise.metadata().footer.as_deref(),
        Some(file!())
    );
    assert!(event
        .message_promise
        .metadata()
        .header
        .as_deref()
        .is_some_and(|header| header.starts_with("Runtime error (line ")));
    Ok(())
}
