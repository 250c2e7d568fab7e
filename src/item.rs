//! The transactional editable-item engine.
use crate::change::{EditCommitted, StateChange, SubItemChange};
use crate::context::{ItemId, ItemProperty, UndoContext};
use crate::error::EditError;
use crate::stack::BoundedStack;
use crate::state::EditableState;
use crate::strategy::{CloneStrategy, EditStrategy};
use log::{debug, trace};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

/// A builder to create an [EditableItem].
///
/// ```
/// # use undoable::item::ItemBuilder;
/// # use undoable::state::EditableState;
/// #[derive(Clone, PartialEq)]
/// struct MyState(i32);
/// # impl EditableState for MyState {
/// #     fn restore(&mut self, snapshot: &Self) { *self = snapshot.clone(); }
/// # }
///
/// let item = ItemBuilder::new().history_levels(10).build(MyState(0));
/// ```
pub struct ItemBuilder<T, S = CloneStrategy<T>> {
    strategy: S,
    history_levels: usize,
    _state: PhantomData<T>,
}

impl<T> ItemBuilder<T, CloneStrategy<T>> {
    /// Create a new builder instance using the default
    /// [CloneStrategy](crate::strategy::CloneStrategy).
    pub fn new() -> Self {
        Self {
            strategy: CloneStrategy::new(),
            history_levels: 0,
            _state: PhantomData,
        }
    }
}

impl<T> Default for ItemBuilder<T, CloneStrategy<T>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> ItemBuilder<T, S> {
    /// Set the number of levels to keep undo or redo information.
    ///
    /// When more snapshots are retained than the bound, the oldest are
    /// dropped first.
    ///
    /// # Remarks
    /// `history_levels=0` means no limit.
    pub fn history_levels(mut self, levels: usize) -> Self {
        self.history_levels = levels;
        self
    }

    /// Replace the clone and equality strategy.
    pub fn strategy<S2>(self, strategy: S2) -> ItemBuilder<T, S2>
    where
        S2: EditStrategy<State = T>,
    {
        ItemBuilder {
            strategy,
            history_levels: self.history_levels,
            _state: PhantomData,
        }
    }

    /// Create a new [EditableItem] object by the initial value of T.
    pub fn build(self, data: T) -> EditableItem<T, S>
    where
        T: EditableState,
        S: EditStrategy<State = T>,
    {
        EditableItem::with_parts(data, self.strategy, self.history_levels)
    }
}

/// The parent an item has been captured by.
///
/// Non-owning; the item never assumes it can extend the parent's lifetime.
struct ParentHandle {
    id: ItemId,
    context: Weak<RefCell<dyn UndoContext>>,
    /// Whether commits cascade into the parent's timeline.
    cascade: bool,
}

/// A wrapper type managing one value in a transactional edit pattern with
/// undo-redo history.
///
/// # Edit transaction
/// Changes happen inside a transaction: [begin_edit](EditableItem::begin_edit)
/// takes a comparison snapshot of the value, mutations go through
/// [data_mut](EditableItem::data_mut), and the transaction ends in
/// [commit_edit](EditableItem::commit_edit) (making the change permanent and
/// undoable), [cancel_edit](EditableItem::cancel_edit) (restoring the
/// snapshot), or [end_edit](EditableItem::end_edit).
///
/// Every commit produces an [EditCommitted](crate::change::EditCommitted)
/// record of what changed, returned to the caller and delivered to
/// registered observers.
///
/// # Undo and redo
/// Committed states are kept on a bounded pair of snapshot stacks.
/// [undo](EditableItem::undo) and [redo](EditableItem::redo) move between
/// them, writing snapshots back through the value's
/// [restore](crate::state::EditableState::restore) hook. Calling them with
/// nothing to do is a silent no-op; poll [can_undo](EditableItem::can_undo)
/// and [can_redo](EditableItem::can_redo) first.
///
/// # Capture
/// An item can be captured into a containing
/// [UndoContext](crate::context::UndoContext), delegating its undo-redo
/// authority to that parent. While captured, `undo` and `redo` forward to
/// the parent and perform no local state change, and
/// [capture_sub_item](EditableItem::capture_sub_item) additionally makes
/// every commit of the sub-item commit the parent too. This turns a tree of
/// editable objects into a single undo-redo timeline rooted at whichever
/// ancestor is not itself captured.
///
/// # Deref
/// [EditableItem] implements [Deref](std::ops::Deref) to the managed value.
///
/// # Thread-safety
/// [EditableItem] does not implement [Send] and [Sync]. Operations assume
/// exclusive, serialized access; notifications are delivered synchronously
/// at the point of mutation.
pub struct EditableItem<T, S = CloneStrategy<T>> {
    id: ItemId,

    data: T,
    comparison: Option<T>,

    in_edit_mode: bool,

    undo_stack: BoundedStack<T>,
    redo_stack: BoundedStack<T>,

    parent: Option<ParentHandle>,

    strategy: S,

    commit_observers: Vec<Box<dyn FnMut(&EditCommitted)>>,
    property_hook: Option<Box<dyn FnMut(ItemProperty)>>,
}

impl<T> EditableItem<T, CloneStrategy<T>>
where
    T: EditableState + Clone + PartialEq,
{
    /// Create a new item managing `data` with the default
    /// [CloneStrategy](crate::strategy::CloneStrategy).
    pub fn new(data: T) -> Self {
        Self::with_strategy(data, CloneStrategy::new())
    }
}

impl<T, S> EditableItem<T, S>
where
    T: EditableState,
    S: EditStrategy<State = T>,
{
    /// Create a new item managing `data` with an explicit strategy.
    pub fn with_strategy(data: T, strategy: S) -> Self {
        Self::with_parts(data, strategy, 0)
    }

    pub(crate) fn with_parts(data: T, strategy: S, history_levels: usize) -> Self {
        Self {
            id: ItemId::next(),
            data,
            comparison: None,
            in_edit_mode: false,
            undo_stack: BoundedStack::new(history_levels),
            redo_stack: BoundedStack::new(history_levels),
            parent: None,
            strategy,
            commit_observers: Vec::new(),
            property_hook: None,
        }
    }

    /// The identity of this item.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Immutable access to the managed value.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Mutable access to the managed value.
    ///
    /// # Remarks
    /// Mutations made outside an open edit transaction are not tracked:
    /// they are invisible to [cancel_edit](EditableItem::cancel_edit) and
    /// produce no history until the next commit.
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Returns the managed value, consuming the item.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Whether an edit transaction is open.
    pub fn is_in_edit_mode(&self) -> bool {
        self.in_edit_mode
    }

    /// Whether this item is captured into a parent undo context.
    pub fn is_captured(&self) -> bool {
        self.parent.is_some()
    }

    /// The number of levels to keep undo or redo information.
    ///
    /// `0` means no limit.
    pub fn history_levels(&self) -> usize {
        self.undo_stack.limit()
    }

    /// Set the number of levels to keep undo or redo information.
    ///
    /// Both stacks are trimmed immediately, dropping the oldest snapshots
    /// first.
    ///
    /// # Remarks
    /// `levels=0` means no limit.
    pub fn set_history_levels(&mut self, levels: usize) {
        if levels == self.undo_stack.limit() {
            return;
        }

        self.undo_stack.set_limit(levels);
        self.redo_stack.set_limit(levels);

        self.notify(ItemProperty::HistoryLevels);
    }

    /// Whether a call to [undo](EditableItem::undo) would result in a state
    /// change.
    ///
    /// True while captured, since the question is delegated to the parent.
    pub fn can_undo(&self) -> bool {
        self.parent.is_some() || !self.undo_stack.is_empty()
    }

    /// Whether a call to [redo](EditableItem::redo) would result in a state
    /// change.
    ///
    /// True while captured, since the question is delegated to the parent.
    pub fn can_redo(&self) -> bool {
        self.parent.is_some() || !self.redo_stack.is_empty()
    }

    /// Register an observer for commit notifications.
    ///
    /// Observers are invoked synchronously, in registration order, once per
    /// successful commit, including commits triggered by a captured
    /// sub-item.
    pub fn on_edit_committed<F>(&mut self, observer: F)
    where
        F: FnMut(&EditCommitted) + 'static,
    {
        self.commit_observers.push(Box::new(observer));
    }

    /// Register the named-property hook.
    ///
    /// The hook receives a notification whenever one of the item's
    /// observable properties changes. Without a registered hook the
    /// notifications are dropped; a binding layer overrides this to marshal
    /// delivery onto its own execution context.
    pub fn set_property_hook<F>(&mut self, hook: F)
    where
        F: FnMut(ItemProperty) + 'static,
    {
        self.property_hook = Some(Box::new(hook));
    }

    /// Begins the editing of the item.
    ///
    /// Takes the comparison snapshot later used by
    /// [cancel_edit](EditableItem::cancel_edit) and
    /// [commit_edit](EditableItem::commit_edit).
    ///
    /// # Remarks
    /// No-op if an edit transaction is already open.
    pub fn begin_edit(&mut self) {
        if self.in_edit_mode {
            return;
        }

        trace!("item {}: begin edit", self.id);

        self.in_edit_mode = true;
        self.comparison = Some(self.strategy.clone_state(&self.data));

        self.notify(ItemProperty::IsInEditMode);
    }

    /// Commits the changes to the item as they are, without ending the
    /// editing.
    ///
    /// The comparison snapshot is refreshed, the pre-commit state becomes
    /// undoable, and the redo history is invalidated.
    ///
    /// # Return
    /// The record of state changes for this commit, or
    /// [NotInEditMode](crate::error::EditError::NotInEditMode) when no edit
    /// transaction is open.
    pub fn commit_edit(&mut self) -> Result<EditCommitted, EditError> {
        if !self.in_edit_mode {
            return Err(EditError::NotInEditMode);
        }

        Ok(self.commit_internal(None))
    }

    /// Discards all changes to the item, reloading the state at the last
    /// commit or at the beginning of the edit transaction, whichever
    /// occurred last.
    ///
    /// # Return
    /// [NotInEditMode](crate::error::EditError::NotInEditMode) when no edit
    /// transaction is open.
    pub fn cancel_edit(&mut self) -> Result<(), EditError> {
        if !self.in_edit_mode {
            return Err(EditError::NotInEditMode);
        }

        if let Some(comparison) = self.comparison.as_ref() {
            if !self.strategy.same_state(&self.data, comparison) {
                trace!("item {}: cancel edit, restoring snapshot", self.id);
                self.data.restore(comparison);
            }
        }

        Ok(())
    }

    /// Ends the editing of the item.
    ///
    /// # Return
    /// [NotInEditMode](crate::error::EditError::NotInEditMode) when no edit
    /// transaction is open.
    pub fn end_edit(&mut self) -> Result<(), EditError> {
        if !self.in_edit_mode {
            return Err(EditError::NotInEditMode);
        }

        trace!("item {}: end edit", self.id);

        self.in_edit_mode = false;

        self.notify(ItemProperty::IsInEditMode);
        Ok(())
    }

    /// Allows the item to be captured by a containing undo-redo capable
    /// object so that undo and redo operations can be coordinated across a
    /// larger scope.
    ///
    /// Capturing clears both history stacks; parent delegation makes local
    /// history meaningless until released. Releasing does not bring the
    /// stacks back.
    ///
    /// # Return
    /// - [InvalidParentContext](crate::error::EditError::InvalidParentContext)
    ///   when `parent` no longer points at a live context;
    /// - [ItemIsInEditMode](crate::error::EditError::ItemIsInEditMode) when
    ///   an edit transaction is open;
    /// - [AlreadyCaptured](crate::error::EditError::AlreadyCaptured) when
    ///   the item is captured by a different parent.
    ///
    /// Re-capturing by the current parent is a no-op.
    ///
    /// # Remarks
    /// This method is meant to be used by containers, and should not be
    /// called directly.
    pub fn capture_into_undo_context(
        &mut self,
        parent: Weak<RefCell<dyn UndoContext>>,
    ) -> Result<(), EditError> {
        self.capture(parent, false)
    }

    /// Releases the item from being captured into an undo context.
    ///
    /// # Remarks
    /// No-op if the item is not captured. This method is meant to be used
    /// by containers, and should not be called directly.
    pub fn release_from_undo_context(&mut self) {
        if self.parent.is_none() {
            return;
        }

        debug!("item {}: released from undo context", self.id);

        self.parent = None;

        self.notify(ItemProperty::IsCapturedInUndoContext);
    }

    /// Has the last operation performed on the item undone.
    ///
    /// # Remarks
    /// If the item is captured, the call is forwarded to the capturing
    /// parent, which can bubble up to the outermost uncaptured ancestor.
    /// The parent is then solely responsible for ensuring that the inner
    /// state of the whole aggregate is correct; no local state change is
    /// performed here.
    ///
    /// If there is nothing to undo, this is a silent no-op.
    pub fn undo(&mut self) {
        if let Some(parent) = self.parent.as_ref() {
            if let Some(context) = parent.context.upgrade() {
                context.borrow_mut().undo();
            }
            return;
        }

        let snapshot = match self.undo_stack.pop() {
            Some(snapshot) => snapshot,
            None => return,
        };

        debug!("item {}: undo", self.id);

        self.redo_stack.push(self.strategy.clone_state(&self.data));
        self.data.restore(&snapshot);

        self.notify(ItemProperty::CanUndo);
        self.notify(ItemProperty::CanRedo);
    }

    /// Has the last undone operation performed on the item, presuming that
    /// it has not changed since then, redone.
    ///
    /// # Remarks
    /// If the item is captured, the call is forwarded to the capturing
    /// parent, which can bubble up to the outermost uncaptured ancestor.
    /// The parent is then solely responsible for ensuring that the inner
    /// state of the whole aggregate is correct; no local state change is
    /// performed here.
    ///
    /// If there is nothing to redo, this is a silent no-op.
    pub fn redo(&mut self) {
        if let Some(parent) = self.parent.as_ref() {
            if let Some(context) = parent.context.upgrade() {
                context.borrow_mut().redo();
            }
            return;
        }

        let snapshot = match self.redo_stack.pop() {
            Some(snapshot) => snapshot,
            None => return,
        };

        debug!("item {}: redo", self.id);

        self.undo_stack.push(self.strategy.clone_state(&self.data));
        self.data.restore(&snapshot);

        self.notify(ItemProperty::CanUndo);
        self.notify(ItemProperty::CanRedo);
    }

    /// Captures a sub-item into the parent's context.
    ///
    /// Beyond plain capture, any commit on the sub-item triggers a commit
    /// on the parent carrying a
    /// [SubItemChange](crate::change::SubItemChange); nested editable
    /// graphs flatten this way into the single undo-redo timeline of the
    /// outermost uncaptured ancestor.
    ///
    /// # Return
    /// The same errors as
    /// [capture_into_undo_context](EditableItem::capture_into_undo_context),
    /// raised on the sub-item.
    ///
    /// # Remarks
    /// Intended for sub-objects that are directly owned parts of the
    /// parent's state. Using it on unrelated items yields unwanted commits.
    pub fn capture_sub_item<U, R>(
        parent: &Rc<RefCell<EditableItem<T, S>>>,
        sub_item: &Rc<RefCell<EditableItem<U, R>>>,
    ) -> Result<(), EditError>
    where
        T: 'static,
        S: 'static,
        U: EditableState,
        R: EditStrategy<State = U>,
    {
        let context: Rc<RefCell<dyn UndoContext>> = parent.clone();
        sub_item.borrow_mut().capture(Rc::downgrade(&context), true)
    }

    fn capture(
        &mut self,
        parent: Weak<RefCell<dyn UndoContext>>,
        cascade: bool,
    ) -> Result<(), EditError> {
        let context = parent.upgrade().ok_or(EditError::InvalidParentContext)?;
        let parent_id = context.borrow().id();

        if self.parent.as_ref().map(|p| p.id) == Some(parent_id) {
            return Ok(());
        }

        if self.in_edit_mode {
            return Err(EditError::ItemIsInEditMode);
        }

        if self.parent.is_some() {
            return Err(EditError::AlreadyCaptured);
        }

        debug!("item {}: captured into undo context {}", self.id, parent_id);

        self.parent = Some(ParentHandle {
            id: parent_id,
            context: parent,
            cascade,
        });

        self.undo_stack.clear();
        self.redo_stack.clear();

        self.notify(ItemProperty::IsCapturedInUndoContext);
        Ok(())
    }

    fn commit_internal(&mut self, sub_change: Option<SubItemChange>) -> EditCommitted {
        let previous = self.comparison.replace(self.strategy.clone_state(&self.data));

        let mut changes: Vec<Rc<dyn StateChange>> = match previous.as_ref() {
            Some(previous) => T::diff(previous, &self.data),
            None => Vec::new(),
        };
        if let Some(sub_change) = sub_change {
            changes.push(Rc::new(sub_change));
        }

        if let Some(snapshot) = previous {
            // An unchanged commit is not worth an undo step.
            if !self.strategy.same_state(&snapshot, &self.data) {
                self.undo_stack.push(snapshot);
            }
        }
        self.redo_stack.clear();

        self.notify(ItemProperty::CanUndo);
        self.notify(ItemProperty::CanRedo);

        let record = EditCommitted::new(changes);

        debug!("item {}: commit ({} changes)", self.id, record.len());

        for observer in self.commit_observers.iter_mut() {
            observer(&record);
        }

        if let Some(parent) = self.parent.as_ref().filter(|p| p.cascade) {
            if let Some(context) = parent.context.upgrade() {
                let change = SubItemChange::new(self.id, record.changes().to_vec());
                context.borrow_mut().commit_from_sub_item(change);
            }
        }

        record
    }

    fn notify(&mut self, property: ItemProperty) {
        if let Some(hook) = self.property_hook.as_mut() {
            hook(property);
        }
    }
}

impl<T, S> UndoContext for EditableItem<T, S>
where
    T: EditableState,
    S: EditStrategy<State = T>,
{
    fn id(&self) -> ItemId {
        self.id
    }

    fn undo(&mut self) {
        EditableItem::undo(self);
    }

    fn redo(&mut self) {
        EditableItem::redo(self);
    }

    fn commit_from_sub_item(&mut self, change: SubItemChange) {
        self.commit_internal(Some(change));
    }
}

impl<T: std::fmt::Debug, S> std::fmt::Debug for EditableItem<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.data.fmt(f)
    }
}

impl<T: std::fmt::Display, S> std::fmt::Display for EditableItem<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.data.fmt(f)
    }
}

impl<T, S> std::ops::Deref for EditableItem<T, S> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
