//! Cloning and equality strategies for managed values.
//!
//! An [EditableItem](crate::item::EditableItem) needs two functions over its
//! managed type: a clone function producing an independent snapshot, and an
//! equality function deciding whether two states are the same. The engine
//! never inspects the managed type itself; it only calls the strategy
//! supplied at construction.
//!
//! # Choosing a strategy
//! In priority order:
//! 1. [DeepCloneStrategy] when the type declares [DeepClone] — the best at
//!    separating state across cloning;
//! 2. [CloneStrategy] when [Clone] already produces an independent copy;
//!    plain values with copy-by-value semantics fall in here as well;
//! 3. [FnStrategy] with explicit closures when neither capability fits or
//!    the defaults would be wrong.
//!
//! Equality prefers the type's own [PartialEq]; [FnStrategy] accepts any
//! reflexive, symmetric equivalence instead.
//!
//! # Correctness precondition
//! The clone function MUST produce a true independent copy: mutating the
//! original afterwards must not affect the clone, or stored snapshots would
//! be retroactively corrupted. The engine cannot verify this.
use std::marker::PhantomData;

/// A clone and equality pair over a managed type.
pub trait EditStrategy {
    /// The managed type.
    type State;

    /// Produce an independent copy of `state`.
    fn clone_state(&self, state: &Self::State) -> Self::State;

    /// Whether two states are equal.
    fn same_state(&self, a: &Self::State, b: &Self::State) -> bool;
}

/// A deep-clone capability.
///
/// Declared by types whose [Clone] is shallow (e.g. contains shared
/// handles) but that can still produce a fully independent copy on demand.
pub trait DeepClone {
    /// Produce a copy sharing no state with `self`.
    fn deep_clone(&self) -> Self;
}

/// A strategy using [Clone] and [PartialEq].
///
/// This is the default strategy of
/// [EditableItem](crate::item::EditableItem).
#[derive(Debug, Clone)]
pub struct CloneStrategy<T>(PhantomData<T>);

impl<T> CloneStrategy<T> {
    /// Create a new strategy instance.
    pub const fn new() -> Self {
        Self(PhantomData::<T>)
    }
}

impl<T> Default for CloneStrategy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq> EditStrategy for CloneStrategy<T> {
    type State = T;

    fn clone_state(&self, state: &Self::State) -> Self::State {
        state.clone()
    }

    fn same_state(&self, a: &Self::State, b: &Self::State) -> bool {
        a == b
    }
}

/// A strategy using [DeepClone] and [PartialEq].
#[derive(Debug, Clone)]
pub struct DeepCloneStrategy<T>(PhantomData<T>);

impl<T> DeepCloneStrategy<T> {
    /// Create a new strategy instance.
    pub const fn new() -> Self {
        Self(PhantomData::<T>)
    }
}

impl<T> Default for DeepCloneStrategy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeepClone + PartialEq> EditStrategy for DeepCloneStrategy<T> {
    type State = T;

    fn clone_state(&self, state: &Self::State) -> Self::State {
        state.deep_clone()
    }

    fn same_state(&self, a: &Self::State, b: &Self::State) -> bool {
        a == b
    }
}

/// A strategy from explicit clone and equality closures.
///
/// For types without a usable [Clone] or [PartialEq], or when the declared
/// capabilities are not the right notion of snapshot and sameness for
/// editing purposes.
///
/// ```
/// # use undoable::strategy::{EditStrategy, FnStrategy};
/// let strategy = FnStrategy::new(
///     |s: &String| s.clone(),
///     |a: &String, b: &String| a.eq_ignore_ascii_case(b),
/// );
///
/// assert!(strategy.same_state(&"Ab".to_string(), &"aB".to_string()));
/// ```
pub struct FnStrategy<T> {
    clone_fn: Box<dyn Fn(&T) -> T>,
    equals_fn: Box<dyn Fn(&T, &T) -> bool>,
}

impl<T> FnStrategy<T> {
    /// Create a strategy from the two supplied functions.
    pub fn new<C, E>(clone_fn: C, equals_fn: E) -> Self
    where
        C: Fn(&T) -> T + 'static,
        E: Fn(&T, &T) -> bool + 'static,
    {
        Self {
            clone_fn: Box::new(clone_fn),
            equals_fn: Box::new(equals_fn),
        }
    }
}

impl<T> EditStrategy for FnStrategy<T> {
    type State = T;

    fn clone_state(&self, state: &Self::State) -> Self::State {
        (self.clone_fn)(state)
    }

    fn same_state(&self, a: &Self::State, b: &Self::State) -> bool {
        (self.equals_fn)(a, b)
    }
}
