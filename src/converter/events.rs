//! Lifecycle events and the hub that dispatches them.
//!
//! Listeners are registered on the [`EventHub`] owned by one conversion
//! run. Each emitted event is delivered to every listener, highest priority
//! first (ties in subscription order), and all of them finish before the
//! converter moves on. A listener error aborts the run.
//!
//! During dispatch the hub is taken out of the context so listeners can
//! borrow the context mutably. Events emitted from inside a listener (for
//! example by converting another symbol) are queued and delivered once the
//! current event has reached every listener. Listeners subscribed from
//! inside a listener receive the next event delivered.

use crate::base::{DeclarationId, ReflectionId, SymbolId};

use super::context::Context;
use super::error::ConvertError;

// ============================================================================
// EVENTS
// ============================================================================

/// Event tag, used to filter listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Begin,
    CreateModule,
    CreateDeclaration,
    CreateSignature,
    CreateParameter,
    CreateTypeParameter,
    End,
    ResolveBegin,
    Resolve,
    ResolveEnd,
    FinalizeNames,
}

/// Where a dependent reflection lives inside its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureSlot {
    /// `signatures[n]` of the owner.
    Call(usize),
    /// The owner's index signature.
    Index,
    /// Accessor signatures.
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConverterEvent {
    /// Once, before any entry point is converted.
    Begin,
    /// Once per entry point, after its module reflection is registered.
    CreateModule {
        reflection: ReflectionId,
        module: SymbolId,
    },
    /// Once per declaration reflection, after its comment is attached and
    /// before its children are converted.
    CreateDeclaration {
        reflection: ReflectionId,
        symbol: Option<SymbolId>,
        declarations: Vec<DeclarationId>,
    },
    CreateSignature {
        owner: ReflectionId,
        slot: SignatureSlot,
        declaration: Option<DeclarationId>,
    },
    CreateParameter {
        owner: ReflectionId,
        slot: SignatureSlot,
        index: usize,
        declaration: DeclarationId,
    },
    /// `signature` is `None` for type parameters of the owner itself.
    CreateTypeParameter {
        owner: ReflectionId,
        signature: Option<SignatureSlot>,
        index: usize,
        declaration: DeclarationId,
    },
    /// Once, after every entry point is converted.
    End,
    ResolveBegin,
    /// Once per live reflection, in creation order.
    Resolve { reflection: ReflectionId },
    ResolveEnd,
    /// The only point at which reflections may be renamed.
    FinalizeNames,
}

impl ConverterEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ConverterEvent::Begin => EventKind::Begin,
            ConverterEvent::CreateModule { .. } => EventKind::CreateModule,
            ConverterEvent::CreateDeclaration { .. } => EventKind::CreateDeclaration,
            ConverterEvent::CreateSignature { .. } => EventKind::CreateSignature,
            ConverterEvent::CreateParameter { .. } => EventKind::CreateParameter,
            ConverterEvent::CreateTypeParameter { .. } => EventKind::CreateTypeParameter,
            ConverterEvent::End => EventKind::End,
            ConverterEvent::ResolveBegin => EventKind::ResolveBegin,
            ConverterEvent::Resolve { .. } => EventKind::Resolve,
            ConverterEvent::ResolveEnd => EventKind::ResolveEnd,
            ConverterEvent::FinalizeNames => EventKind::FinalizeNames,
        }
    }
}

// ============================================================================
// LISTENERS
// ============================================================================

/// Something that reacts to converter events.
///
/// Plugins with state implement this directly; plain closures can be
/// registered through [`EventHub::on`].
pub trait Listener {
    fn handle(&mut self, cx: &mut Context<'_>, event: &ConverterEvent) -> Result<(), ConvertError>;
}

/// A closure listening to a single event kind.
struct FilteredListener<F> {
    kind: EventKind,
    handler: F,
}

impl<F> Listener for FilteredListener<F>
where
    F: FnMut(&mut Context<'_>, &ConverterEvent) -> Result<(), ConvertError>,
{
    fn handle(&mut self, cx: &mut Context<'_>, event: &ConverterEvent) -> Result<(), ConvertError> {
        if event.kind() == self.kind {
            (self.handler)(cx, event)
        } else {
            Ok(())
        }
    }
}

struct Subscription {
    priority: i32,
    listener: Box<dyn Listener>,
}

// ============================================================================
// HUB
// ============================================================================

#[derive(Default)]
pub struct EventHub {
    subscriptions: Vec<Subscription>,
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.subscriptions.len())
            .finish()
    }
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener receiving every event.
    pub fn subscribe(&mut self, priority: i32, listener: Box<dyn Listener>) {
        // Stable position: after every listener with priority >= this one.
        let position = self
            .subscriptions
            .iter()
            .position(|s| s.priority < priority)
            .unwrap_or(self.subscriptions.len());
        self.subscriptions
            .insert(position, Subscription { priority, listener });
    }

    /// Add a closure receiving only events of `kind`.
    pub fn on<F>(&mut self, kind: EventKind, priority: i32, handler: F)
    where
        F: FnMut(&mut Context<'_>, &ConverterEvent) -> Result<(), ConvertError> + 'static,
    {
        self.subscribe(priority, Box::new(FilteredListener { kind, handler }));
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Deliver `event` to every listener in order, stopping at the first error.
    pub(crate) fn dispatch(
        &mut self,
        cx: &mut Context<'_>,
        event: &ConverterEvent,
    ) -> Result<(), ConvertError> {
        for subscription in &mut self.subscriptions {
            subscription.listener.handle(cx, event)?;
        }
        Ok(())
    }

    /// Move listeners added elsewhere into this hub, keeping priority order.
    pub(crate) fn absorb(&mut self, other: EventHub) {
        for subscription in other.subscriptions {
            self.subscribe(subscription.priority, subscription.listener);
        }
    }
}
