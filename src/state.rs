use crate::change::StateChange;
use std::rc::Rc;

/// The capability a managed value supplies to its
/// [EditableItem](crate::item::EditableItem).
///
/// The engine never writes a snapshot back by blind replacement; it invokes
/// [restore](EditableState::restore) and lets the type decide how, e.g.
/// whole-object replace or field-by-field copy so that per-field change
/// notifications can be raised.
///
/// A simplest implementation replaces the whole value:
/// ```
/// # use undoable::state::EditableState;
/// #[derive(Clone, PartialEq)]
/// struct MyState(String);
///
/// impl EditableState for MyState {
///     fn restore(&mut self, snapshot: &Self) {
///         *self = snapshot.clone();
///     }
/// }
/// ```
pub trait EditableState {
    /// Write the snapshot's values back into `self`.
    ///
    /// Invoked during [cancel_edit](crate::item::EditableItem::cancel_edit),
    /// [undo](crate::item::EditableItem::undo), and
    /// [redo](crate::item::EditableItem::redo).
    fn restore(&mut self, snapshot: &Self);

    /// Describe the difference between two states as change records.
    ///
    /// Called at commit time with the previous comparison snapshot and the
    /// newly committed state; the result is carried by the commit
    /// notification.
    ///
    /// # Remarks
    /// The default implementation reports nothing. Types that want their
    /// commit notifications to name what changed override this and return
    /// one [PropertyChange](crate::change::PropertyChange) per differing
    /// property.
    fn diff(old: &Self, new: &Self) -> Vec<Rc<dyn StateChange>> {
        let _ = (old, new);
        Vec::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::change::PropertyChange;

    #[derive(Clone, PartialEq, Debug)]
    struct Plain(i32);

    impl EditableState for Plain {
        fn restore(&mut self, snapshot: &Self) {
            *self = snapshot.clone();
        }
    }

    #[test]
    fn restore_replaces() {
        let mut state = Plain(3);
        state.restore(&Plain(7));
        assert_eq!(Plain(7), state);
    }

    #[test]
    fn default_diff_is_empty() {
        assert!(Plain::diff(&Plain(1), &Plain(2)).is_empty());
    }

    #[derive(Clone, PartialEq, Debug)]
    struct Named {
        name: String,
        count: i32,
    }

    impl EditableState for Named {
        fn restore(&mut self, snapshot: &Self) {
            self.name = snapshot.name.clone();
            self.count = snapshot.count;
        }

        fn diff(old: &Self, new: &Self) -> Vec<Rc<dyn StateChange>> {
            let mut changes: Vec<Rc<dyn StateChange>> = Vec::new();
            if old.name != new.name {
                changes.push(Rc::new(PropertyChange::new(
                    "name",
                    old.name.clone(),
                    new.name.clone(),
                )));
            }
            if old.count != new.count {
                changes.push(Rc::new(PropertyChange::new("count", old.count, new.count)));
            }
            changes
        }
    }

    #[test]
    fn field_diff() {
        let old = Named {
            name: "a".to_string(),
            count: 1,
        };
        let new = Named {
            name: "a".to_string(),
            count: 2,
        };

        let changes = Named::diff(&old, &new);
        assert_eq!(1, changes.len());

        let count = changes[0]
            .as_any()
            .downcast_ref::<PropertyChange<i32>>()
            .unwrap();
        assert_eq!("count", count.property);
        assert_eq!(1, count.old_value);
        assert_eq!(2, count.new_value);
    }
}
