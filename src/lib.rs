//! A transactional edit and undo-redo framework for stateful items.
//!
//! # Example
//! ```rust
//! use undoable::item::EditableItem;
//! use undoable::state::EditableState;
//!
//! #[derive(Clone, PartialEq)]
//! struct MyState(i32);
//!
//! impl EditableState for MyState {
//!     fn restore(&mut self, snapshot: &Self) {
//!         self.0 = snapshot.0;
//!     }
//! }
//!
//! fn main() {
//!     let mut item = EditableItem::new(MyState(5));
//!
//!     item.begin_edit();
//!     item.data_mut().0 = 10;
//!     item.commit_edit().unwrap();
//!     item.end_edit().unwrap();
//!     assert_eq!(10, item.0);
//!
//!     item.undo();
//!     assert_eq!(5, item.0);
//!
//!     item.redo();
//!     assert_eq!(10, item.0);
//! }
//! ```
//!
//! # Edit transactions
//! An [EditableItem](crate::item::EditableItem) wraps a single value and
//! manages its changes in a transactional pattern:
//! [begin_edit](crate::item::EditableItem::begin_edit) opens a transaction,
//! mutations are then committed
//! ([commit_edit](crate::item::EditableItem::commit_edit)) or discarded
//! ([cancel_edit](crate::item::EditableItem::cancel_edit)), and
//! [end_edit](crate::item::EditableItem::end_edit) closes the transaction.
//! Each commit yields an [EditCommitted](crate::change::EditCommitted)
//! record describing what changed.
//!
//! # Nesting
//! Items can be captured into a containing
//! [UndoContext](crate::context::UndoContext), so a whole tree of editable
//! objects behaves as one atomic unit under a single undo-redo stack. See
//! the [context](crate::context) module.
pub mod change;
pub mod context;
pub mod error;
pub mod item;
pub mod state;
pub mod strategy;

mod stack;

pub mod prelude {
    //! Re-exports of the crate's traits.
    pub use crate::change::StateChange;
    pub use crate::context::UndoContext;
    pub use crate::state::EditableState;
    pub use crate::strategy::EditStrategy;
}
