//! Ad Slot Controller - lifecycle of one placement bound to a container.
//!
//! ```text
//!                bind (page still loading)
//!   Detached ─────────────────────────────► WaitingForLoadSignal
//!      │                                           │
//!      │ bind (page already loaded)                │ load signal
//!      ▼                                           ▼
//!   Initialized ◄──────────────────────────────────┘
//!
//!   unbind / detach / config change / drop ─► Detached (cycle restarts)
//! ```
//!
//! The controller never creates or destroys its container, only the
//! container's children. A request is declared (placeholder element) and
//! submitted (fill request) at most once per container/config lifetime;
//! the `initialized` flag is the only guard.
//!
//! Nothing escapes the controller: failures are logged and the page keeps
//! rendering whether or not the ad network is present.
//!
//! # Example
//!
//! ```ignore
//! use spark_showcase::ads::{AdSlotController, PlacementConfig, AdFormat};
//!
//! let controller = AdSlotController::with_global_queue();
//! let handle = controller.attach(
//!     PlacementConfig::new("ca-pub-4546141241525552", "1122334455")
//!         .with_format(AdFormat::Auto),
//! );
//!
//! let container = dom::create_element("div");
//! handle.bind(container);   // initializes now, or on the load signal
//!
//! // Later, when the container leaves the page:
//! handle.unbind();
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, warn};

use crate::dom::{self, DomError, ElementId};
use crate::host::{self, GlobalAdQueue};
use super::{AdError, FillRequest, PlacementConfig, RequestSink};

// =============================================================================
// Status
// =============================================================================

/// Where a slot is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// No live request: unbound, incomplete config, or the last
    /// immediate attempt failed.
    Detached,

    /// Bound with a complete config; a load listener is registered.
    /// Stays here after a retryable failure so the next load signal retries.
    WaitingForLoadSignal,

    /// Placeholder declared and fill request submitted.
    Initialized,
}

// =============================================================================
// Slot State
// =============================================================================

struct SlotState {
    container: Option<ElementId>,
    initialized: bool,
    status: SlotStatus,
    /// Removes the pending load listener.
    cancel_listener: Option<Box<dyn FnOnce()>>,
    /// Bumped on every teardown; listeners from older cycles ignore the signal.
    generation: u64,
}

impl SlotState {
    fn new() -> Self {
        Self {
            container: None,
            initialized: false,
            status: SlotStatus::Detached,
            cancel_listener: None,
            generation: 0,
        }
    }
}

struct SlotInner {
    config: PlacementConfig,
    sink: Rc<dyn RequestSink>,
    state: SlotState,
}

impl SlotInner {
    /// Begin a cycle for the current container/config pair.
    fn start(&mut self, this: &Weak<RefCell<SlotInner>>) {
        let Some(container) = self.state.container else {
            return;
        };
        if let Err(err) = self.config.validate() {
            debug!("ad slot on {container} idle: {err}");
            return;
        }

        if host::is_loaded() {
            // Already logged; with no listener there is nothing to retry.
            let _ = self.initialize();
            return;
        }

        let this = this.clone();
        let generation = self.state.generation;
        let cancel = host::on_load(move || handle_load_signal(&this, generation));
        self.state.cancel_listener = Some(Box::new(cancel));
        self.state.status = SlotStatus::WaitingForLoadSignal;
        debug!("ad slot {} waiting for load signal", self.config.slot_id);
    }

    /// Declare the placeholder and submit the fill request, at most once.
    ///
    /// A no-op returns `Ok`. Failures are logged here and handed back so
    /// the load listener can decide whether to stay registered.
    fn initialize(&mut self) -> Result<(), AdError> {
        if self.state.initialized {
            return Ok(());
        }
        let Some(container) = self.state.container else {
            return Ok(());
        };
        if self.config.validate().is_err() {
            return Ok(());
        }

        match self.request_fill(container) {
            Ok(()) => {
                self.state.initialized = true;
                self.state.status = SlotStatus::Initialized;
                debug!("ad slot {} initialized on {container}", self.config.slot_id);
                Ok(())
            }
            Err(err) => {
                warn!(
                    "ad slot {} not initialized [{}]: {err}",
                    self.config.slot_id,
                    err.as_label()
                );
                Err(err)
            }
        }
    }

    fn request_fill(&self, container: ElementId) -> Result<(), AdError> {
        dom::clear_children(container)?;

        let placeholder = build_placeholder(&self.config)?;
        if let Err(err) = dom::append_child(container, placeholder) {
            dom::release_element(placeholder);
            return Err(err.into());
        }

        self.sink.submit(FillRequest)
    }

    /// End the current cycle: drop the listener, empty the container,
    /// reset the guard. The container binding itself is kept.
    fn teardown(&mut self) {
        if let Some(cancel) = self.state.cancel_listener.take() {
            cancel();
        }

        // An incomplete config never touched the container.
        if let (Some(container), true) = (self.state.container, self.config.is_complete()) {
            match dom::clear_children(container) {
                Ok(0) => {}
                Ok(removed) => debug!("ad slot container {container} cleared ({removed} removed)"),
                Err(err) => debug!("ad slot container {container} not cleared: {err}"),
            }
        }

        self.state.initialized = false;
        self.state.status = SlotStatus::Detached;
        self.state.generation += 1;
    }
}

/// Load listener body. Removes its own listener once initialized, so a
/// second load signal is a no-op. After a retryable failure it stays
/// registered for the next signal; any other failure removes it.
fn handle_load_signal(this: &Weak<RefCell<SlotInner>>, generation: u64) {
    let Some(inner) = this.upgrade() else {
        return;
    };
    let Ok(mut slot) = inner.try_borrow_mut() else {
        warn!("ad slot busy during load signal, skipping");
        return;
    };
    if slot.state.generation != generation {
        return;
    }

    let finished = match slot.initialize() {
        Ok(()) => slot.state.initialized,
        Err(err) if err.is_retryable() => false,
        Err(err) => {
            debug!("ad slot {} gives up [{}]", slot.config.slot_id, err.as_label());
            slot.state.status = SlotStatus::Detached;
            true
        }
    };

    if finished {
        if let Some(cancel) = slot.state.cancel_listener.take() {
            cancel();
        }
    }
}

/// Build the detached `ins` placeholder carrying the request attributes.
fn build_placeholder(config: &PlacementConfig) -> Result<ElementId, DomError> {
    let ins = dom::create_detached("ins");

    let populate = || -> Result<(), DomError> {
        dom::set_class(ins, "adsbygoogle")?;
        dom::set_style(ins, "display", "block")?;
        dom::set_style(ins, "text-align", "center")?;
        for (name, value) in config.request_attributes() {
            dom::set_attribute(ins, name, &value)?;
        }
        Ok(())
    };

    match populate() {
        Ok(()) => Ok(ins),
        Err(err) => {
            dom::release_element(ins);
            Err(err)
        }
    }
}

/// Run `f` on the slot, logging instead of panicking on re-entrant use.
fn with_slot(inner: &Rc<RefCell<SlotInner>>, f: impl FnOnce(&mut SlotInner)) {
    match inner.try_borrow_mut() {
        Ok(mut slot) => f(&mut slot),
        Err(_) => warn!("ad slot re-entered while busy, ignoring call"),
    }
}

// =============================================================================
// Controller
// =============================================================================

/// Owns the lifecycle state of one ad placement.
///
/// Dropping the controller tears the slot down, exactly like
/// [`detach`](Self::detach).
pub struct AdSlotController {
    inner: Rc<RefCell<SlotInner>>,
}

impl AdSlotController {
    /// Create a controller that submits to `sink`, with an unpopulated config.
    pub fn new(sink: Rc<dyn RequestSink>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SlotInner {
                config: PlacementConfig::default(),
                sink,
                state: SlotState::new(),
            })),
        }
    }

    /// Create a controller that submits to the page-wide ad queue.
    pub fn with_global_queue() -> Self {
        Self::new(Rc::new(GlobalAdQueue))
    }

    /// Supply the placement and get the handle to bind to a container.
    ///
    /// Safe with an incomplete config: the handle binds, but nothing
    /// happens until a complete config arrives through [`set_config`](Self::set_config).
    pub fn attach(&self, config: PlacementConfig) -> ContainerHandle {
        self.set_config(config);
        self.handle()
    }

    /// A handle to this controller's container binding.
    pub fn handle(&self) -> ContainerHandle {
        ContainerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Replace the placement. An equal config is a no-op; a different one
    /// tears the current cycle down and restarts it in place.
    pub fn set_config(&self, config: PlacementConfig) {
        let this = Rc::downgrade(&self.inner);
        with_slot(&self.inner, |slot| {
            if slot.config == config {
                return;
            }
            slot.teardown();
            slot.config = config;
            slot.start(&this);
        });
    }

    /// Tear down and forget the container.
    pub fn detach(&self) {
        with_slot(&self.inner, |slot| {
            slot.teardown();
            slot.state.container = None;
        });
    }

    pub fn status(&self) -> SlotStatus {
        self.inner.borrow().state.status
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.borrow().state.initialized
    }

    pub fn container(&self) -> Option<ElementId> {
        self.inner.borrow().state.container
    }

    pub fn config(&self) -> PlacementConfig {
        self.inner.borrow().config.clone()
    }
}

impl Drop for AdSlotController {
    fn drop(&mut self) {
        with_slot(&self.inner, |slot| {
            slot.teardown();
            slot.state.container = None;
        });
    }
}

// =============================================================================
// Container Handle
// =============================================================================

/// Binds a controller to a concrete container element.
///
/// Holds the controller weakly: once the controller is dropped every
/// call is a no-op.
#[derive(Clone)]
pub struct ContainerHandle {
    inner: Weak<RefCell<SlotInner>>,
}

impl ContainerHandle {
    /// The container became available. Rebinding to another element tears
    /// the old one down first; rebinding the same element is a no-op.
    pub fn bind(&self, container: ElementId) {
        let Some(inner) = self.inner.upgrade() else {
            debug!("bind on a dropped ad slot ignored");
            return;
        };
        let this = Rc::downgrade(&inner);
        with_slot(&inner, |slot| {
            if slot.state.container == Some(container) {
                return;
            }
            slot.teardown();
            slot.state.container = Some(container);
            slot.start(&this);
        });
    }

    /// The container left the page.
    pub fn unbind(&self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        with_slot(&inner, |slot| {
            slot.teardown();
            slot.state.container = None;
        });
    }

    pub fn is_bound(&self) -> bool {
        self.container().is_some()
    }

    pub fn container(&self) -> Option<ElementId> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.borrow().state.container)
    }
}

// =============================================================================
// Tests
// =============================================================================
