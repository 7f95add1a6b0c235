//! Load Signal - page readiness state and load listeners.
//!
//! Models the host page's `readyState` and its `load` event.
//!
//! - `ready_state()` / `ready_state_signal()` - current state, reactive
//! - `on_load(handler)` - register a listener, returns a cleanup function
//! - `dispatch_load()` - mark the page complete and notify listeners
//!
//! Listeners stay registered until their cleanup runs, like DOM event
//! listeners. Callers that only care about the first load remove
//! themselves from inside the handler.
//!
//! # Example
//!
//! ```ignore
//! use spark_showcase::host::load;
//!
//! let remove = load::on_load(|| println!("page loaded"));
//! load::dispatch_load();
//! remove();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use spark_signals::{signal, Signal};

// =============================================================================
// TYPES
// =============================================================================

/// Document readiness, in the order a page moves through it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    #[default]
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    pub const fn as_str(self) -> &'static str {
        match self {
            ReadyState::Loading => "loading",
            ReadyState::Interactive => "interactive",
            ReadyState::Complete => "complete",
        }
    }
}

/// Handler invoked on each load dispatch.
pub type LoadHandler = Rc<dyn Fn()>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static READY_STATE: Signal<ReadyState> = signal(ReadyState::Loading);
}

struct ListenerRegistry {
    listeners: Vec<(usize, LoadHandler)>,
    next_id: usize,
}

impl ListenerRegistry {
    fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<ListenerRegistry> = RefCell::new(ListenerRegistry::new());
}

// =============================================================================
// READY STATE
// =============================================================================

/// Current readiness of the page.
pub fn ready_state() -> ReadyState {
    READY_STATE.with(|s| s.get())
}

/// Reactive readiness signal (creates a dependency when read in an effect).
pub fn ready_state_signal() -> Signal<ReadyState> {
    READY_STATE.with(|s| s.clone())
}

/// True once the load signal has fired.
pub fn is_loaded() -> bool {
    ready_state() == ReadyState::Complete
}

/// Move from `Loading` to `Interactive` (DOM parsed, subresources pending).
/// No effect in any other state.
pub fn mark_interactive() {
    if ready_state() == ReadyState::Loading {
        READY_STATE.with(|s| s.set(ReadyState::Interactive));
    }
}

// =============================================================================
// LISTENERS
// =============================================================================

/// Subscribe to the load signal.
/// Returns cleanup function that removes the listener.
pub fn on_load<F>(handler: F) -> impl FnOnce()
where
    F: Fn() + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.listeners.push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            reg.borrow_mut()
                .listeners
                .retain(|(listener_id, _)| *listener_id != id);
        });
    }
}

/// Number of registered load listeners.
pub fn listener_count() -> usize {
    REGISTRY.with(|reg| reg.borrow().listeners.len())
}

/// Mark the page `Complete` and invoke every registered listener.
///
/// Listeners run against a snapshot, so a handler may remove itself or
/// register new listeners without affecting this dispatch.
/// Returns the number of handlers invoked.
pub fn dispatch_load() -> usize {
    READY_STATE.with(|s| s.set(ReadyState::Complete));

    let snapshot: Vec<LoadHandler> = REGISTRY.with(|reg| {
        reg.borrow()
            .listeners
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect()
    });

    debug!("load signal dispatched to {} listener(s)", snapshot.len());
    for handler in &snapshot {
        handler();
    }
    snapshot.len()
}

// =============================================================================
// RESET
// =============================================================================

/// Reset readiness and drop all listeners (for testing).
pub fn reset_load_state() {
    READY_STATE.with(|s| s.set(ReadyState::Loading));
    REGISTRY.with(|reg| *reg.borrow_mut() = ListenerRegistry::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn setup() {
        reset_load_state();
    }

    #[test]
    fn test_ready_state_progression() {
        setup();

        assert_eq!(ready_state(), ReadyState::Loading);
        assert!(!is_loaded());

        mark_interactive();
        assert_eq!(ready_state(), ReadyState::Interactive);

        dispatch_load();
        assert!(is_loaded());

        // Never moves backwards
        mark_interactive();
        assert_eq!(ready_state(), ReadyState::Complete);
    }

    #[test]
    fn test_listener_runs_on_dispatch() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let _remove = on_load(move || count_clone.set(count_clone.get() + 1));

        assert_eq!(count.get(), 0);
        assert_eq!(dispatch_load(), 1);
        assert_eq!(count.get(), 1);

        // Still registered until removed
        dispatch_load();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_remove_listener() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let remove = on_load(move || count_clone.set(count_clone.get() + 1));
        assert_eq!(listener_count(), 1);

        remove();
        assert_eq!(listener_count(), 0);
        assert_eq!(dispatch_load(), 0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_handler_can_remove_itself() {
        setup();

        let remove_slot: Rc<RefCell<Option<Box<dyn FnOnce()>>>> = Rc::new(RefCell::new(None));
        let slot_clone = remove_slot.clone();
        let remove = on_load(move || {
            if let Some(remove) = slot_clone.borrow_mut().take() {
                remove();
            }
        });
        *remove_slot.borrow_mut() = Some(Box::new(remove));

        dispatch_load();
        assert_eq!(listener_count(), 0);
    }

    #[test]
    fn test_ready_state_names() {
        assert_eq!(ReadyState::Loading.as_str(), "loading");
        assert_eq!(ReadyState::Complete.as_str(), "complete");
    }
}
