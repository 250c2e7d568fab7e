//! The contract between items and their containers.
//!
//! # Undo context
//! An [EditableItem](crate::item::EditableItem) can delegate its undo-redo
//! authority to a containing object by being *captured* into its context.
//! While captured, the item performs no local undo or redo; every call is
//! forwarded to the parent, which is solely responsible for the consistency
//! of the whole aggregate.
//!
//! [UndoContext] is the contract containers implement to take part in that
//! delegation. [EditableItem](crate::item::EditableItem) implements it
//! itself, so editable items can be nested: a tree of items flattens into a
//! single undo-redo timeline rooted at whichever ancestor is not captured.
//!
//! # Identity
//! Parent references are non-owning. A context is identified by its
//! [ItemId], which is what capture uses to tell "re-capture by the same
//! parent" (a no-op) apart from "capture by another parent" (an error), and
//! what [SubItemChange](crate::change::SubItemChange) records use to name
//! the sub-object a change belongs to.
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A process-unique identity for an undo context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(u64);

impl ItemId {
    /// Mint a fresh identity.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An undo-redo capable object that items can be captured into.
///
/// Containers aggregate child items into one undo-redo timeline by
/// capturing them (see
/// [capture_into_undo_context](crate::item::EditableItem::capture_into_undo_context))
/// and, for transactional sub-items, by subscribing to their commits (see
/// [capture_sub_item](crate::item::EditableItem::capture_sub_item)).
pub trait UndoContext {
    /// The identity of this context.
    fn id(&self) -> ItemId;

    /// Restore the previous state of the aggregate.
    fn undo(&mut self);

    /// Restore the next state of the aggregate.
    fn redo(&mut self);

    /// A captured sub-item committed an edit.
    ///
    /// The change describes what happened inside the sub-item. Implementors
    /// are expected to fold it into their own timeline; [EditableItem](crate::item::EditableItem)
    /// responds by committing itself, which is how sub-item commits cascade
    /// to the outermost uncaptured ancestor.
    fn commit_from_sub_item(&mut self, change: crate::change::SubItemChange);
}

/// Observable properties of an [EditableItem](crate::item::EditableItem).
///
/// Delivered through the named-property hook (see
/// [set_property_hook](crate::item::EditableItem::set_property_hook)) so a
/// binding layer can re-publish them on its own execution context. The hook
/// is a no-op unless one is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemProperty {
    /// The item entered or left edit mode.
    IsInEditMode,
    /// The item was captured into, or released from, an undo context.
    IsCapturedInUndoContext,
    /// The answer of [can_undo](crate::item::EditableItem::can_undo) may
    /// have changed.
    CanUndo,
    /// The answer of [can_redo](crate::item::EditableItem::can_redo) may
    /// have changed.
    CanRedo,
    /// The history depth bound changed.
    HistoryLevels,
}

impl ItemProperty {
    /// The property name as a binding layer would publish it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::IsInEditMode => "IsInEditMode",
            Self::IsCapturedInUndoContext => "IsCapturedInUndoContext",
            Self::CanUndo => "CanUndo",
            Self::CanRedo => "CanRedo",
            Self::HistoryLevels => "HistoryLevels",
        }
    }
}

impl fmt::Display for ItemProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
