//! State-change records carried by commit notifications.
//!
//! Each successful commit produces an [EditCommitted] record holding an
//! ordered sequence of [StateChange] objects describing exactly what
//! changed between the previous comparison snapshot and the newly committed
//! state.
//!
//! Two kinds of change are modeled:
//! - [PropertyChange] for a single named property of the item itself;
//! - [SubItemChange] for everything that happened inside a captured
//!   sub-item, nesting that sub-item's own records recursively.
//!
//! The records are pure data. They are shared ([Rc]) rather than owned so
//! that a sub-item's commit record can appear both in its own notification
//! and, wrapped in a [SubItemChange], in its parent's.
use crate::context::ItemId;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// An opaque record of "something changed".
///
/// Concrete records downcast through [as_any](StateChange::as_any):
/// ```
/// # use undoable::change::{PropertyChange, StateChange};
/// # use std::rc::Rc;
/// let change: Rc<dyn StateChange> = Rc::new(PropertyChange::new("value", 5, 10));
///
/// let p = change.as_any().downcast_ref::<PropertyChange<i32>>().unwrap();
/// assert_eq!(5, p.old_value);
/// assert_eq!(10, p.new_value);
/// ```
pub trait StateChange: Any + fmt::Debug {
    /// The record as [Any], for downcasting to a concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// A change to a single named property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChange<T> {
    /// The name of the property.
    pub property: String,
    /// The value before the commit.
    pub old_value: T,
    /// The value after the commit.
    pub new_value: T,
}

impl<T> PropertyChange<T> {
    /// Create a record for one property going from `old_value` to
    /// `new_value`.
    pub fn new(property: impl Into<String>, old_value: T, new_value: T) -> Self {
        Self {
            property: property.into(),
            old_value,
            new_value,
        }
    }
}

impl<T: fmt::Debug + 'static> StateChange for PropertyChange<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A change that occurred inside a captured sub-item.
///
/// Holds the identity of the sub-item plus the ordered records of its own
/// commit. Since those records may themselves contain [SubItemChange]s, a
/// commit notification from a composite object reflects which leaf
/// properties, on which nested object, actually changed.
#[derive(Debug, Clone)]
pub struct SubItemChange {
    /// The identity of the sub-item the changes belong to.
    pub sub_item: ItemId,
    /// The sub-item's own records, in commit order.
    pub changes: Vec<Rc<dyn StateChange>>,
}

impl SubItemChange {
    /// Create a record for the changes committed by `sub_item`.
    pub fn new(sub_item: ItemId, changes: Vec<Rc<dyn StateChange>>) -> Self {
        Self { sub_item, changes }
    }
}

impl StateChange for SubItemChange {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The record of state changes resulting from one successful commit.
///
/// Emitted once per commit, including commits triggered indirectly by a
/// captured sub-item's own commit. The sequence is immutable and ordered.
#[derive(Debug, Clone)]
pub struct EditCommitted {
    changes: Vec<Rc<dyn StateChange>>,
}

impl EditCommitted {
    /// Create a record from an ordered sequence of changes.
    pub fn new(changes: Vec<Rc<dyn StateChange>>) -> Self {
        Self { changes }
    }

    /// The recorded changes, in order.
    pub fn changes(&self) -> &[Rc<dyn StateChange>] {
        &self.changes
    }

    /// Whether the commit recorded no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The number of recorded changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn property_change() {
        let change = PropertyChange::new("name", "old".to_string(), "new".to_string());

        assert_eq!("name", change.property);
        assert_eq!("old", change.old_value);
        assert_eq!("new", change.new_value);
    }

    #[test]
    fn downcast() {
        let changes: Vec<Rc<dyn StateChange>> = vec![
            Rc::new(PropertyChange::new("count", 1, 2)),
            Rc::new(PropertyChange::new("label", 'a', 'b')),
        ];

        let count = changes[0]
            .as_any()
            .downcast_ref::<PropertyChange<i32>>()
            .unwrap();
        assert_eq!(2, count.new_value);

        assert!(changes[1]
            .as_any()
            .downcast_ref::<PropertyChange<i32>>()
            .is_none());
    }

    #[test]
    fn nested_sub_item_change() {
        let leaf_id = ItemId::next();
        let mid_id = ItemId::next();

        let leaf = SubItemChange::new(leaf_id, vec![Rc::new(PropertyChange::new("x", 0, 1))]);
        let mid = SubItemChange::new(mid_id, vec![Rc::new(leaf)]);

        assert_eq!(mid_id, mid.sub_item);

        let inner = mid.changes[0]
            .as_any()
            .downcast_ref::<SubItemChange>()
            .unwrap();
        assert_eq!(leaf_id, inner.sub_item);

        let prop = inner.changes[0]
            .as_any()
            .downcast_ref::<PropertyChange<i32>>()
            .unwrap();
        assert_eq!(1, prop.new_value);
    }

    #[test]
    fn committed_record() {
        let record = EditCommitted::new(vec![Rc::new(PropertyChange::new("x", 0, 1))]);
        assert_eq!(1, record.len());
        assert!(!record.is_empty());

        let empty = EditCommitted::new(Vec::new());
        assert!(empty.is_empty());
    }
}
