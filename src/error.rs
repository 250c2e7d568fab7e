use thiserror::Error;

/// Errors raised by [EditableItem](crate::item::EditableItem) operations.
///
/// All variants signal caller misuse rather than recoverable runtime
/// conditions. They are raised synchronously at the point of violation and
/// are never retried or swallowed internally.
///
/// Note that [undo](crate::item::EditableItem::undo) and
/// [redo](crate::item::EditableItem::redo) never fail for "nothing to
/// undo/redo"; that is a silent no-op, since consumers are expected to poll
/// [can_undo](crate::item::EditableItem::can_undo) and
/// [can_redo](crate::item::EditableItem::can_redo) before invoking them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    /// A transactional operation was invoked outside an open edit
    /// transaction.
    ///
    /// Raised by [commit_edit](crate::item::EditableItem::commit_edit),
    /// [cancel_edit](crate::item::EditableItem::cancel_edit), and
    /// [end_edit](crate::item::EditableItem::end_edit).
    #[error("the item is not in edit mode")]
    NotInEditMode,

    /// An item with an open edit transaction was captured into an undo
    /// context. Capture is only safe on a quiescent item.
    #[error("the item is in edit mode and cannot be captured")]
    ItemIsInEditMode,

    /// The parent context handed to
    /// [capture_into_undo_context](crate::item::EditableItem::capture_into_undo_context)
    /// is absent; its weak reference no longer points at a live context.
    #[error("the parent undo context is absent or dead")]
    InvalidParentContext,

    /// The item is already captured by a different parent context and must
    /// be released before it can be captured again.
    ///
    /// Re-capturing by the *same* parent is a no-op, not an error.
    #[error("the item is already captured into another undo context")]
    AlreadyCaptured,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn distinguishable() {
        assert_ne!(EditError::NotInEditMode, EditError::ItemIsInEditMode);
        assert_ne!(EditError::InvalidParentContext, EditError::AlreadyCaptured);
    }

    #[test]
    fn display() {
        assert_eq!(
            "the item is not in edit mode",
            EditError::NotInEditMode.to_string()
        );
    }
}
