use std::collections::VecDeque;

/// A LIFO stack of snapshots with a bounded depth.
///
/// `limit=0` means no limit. When a push would exceed the limit, the oldest
/// entry is dropped first.
pub(crate) struct BoundedStack<T> {
    inner: VecDeque<T>,
    limit: usize,
}

impl<T> BoundedStack<T> {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            inner: VecDeque::new(),
            limit,
        }
    }

    pub(crate) fn limit(&self) -> usize {
        self.limit
    }

    pub(crate) fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.trim();
    }

    pub(crate) fn push(&mut self, value: T) {
        self.inner.push_back(value);
        self.trim();
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        self.inner.pop_back()
    }

    pub(crate) fn clear(&mut self) {
        self.inner.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn trim(&mut self) {
        if 0 == self.limit {
            return;
        }
        while self.limit < self.inner.len() {
            self.inner.pop_front();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lifo_order() {
        let mut stack = BoundedStack::new(0);

        stack.push(1);
        stack.push(2);
        stack.push(3);

        assert_eq!(Some(3), stack.pop());
        assert_eq!(Some(2), stack.pop());
        assert_eq!(Some(1), stack.pop());
        assert_eq!(None, stack.pop());
    }

    #[test]
    fn unlimited_by_default() {
        let mut stack = BoundedStack::new(0);
        for i in 0..1000 {
            stack.push(i);
        }
        assert_eq!(1000, stack.len());
    }

    #[test]
    fn push_drops_oldest() {
        let mut stack = BoundedStack::new(2);

        stack.push(1);
        stack.push(2);
        stack.push(3);

        assert_eq!(2, stack.len());
        assert_eq!(Some(3), stack.pop());
        assert_eq!(Some(2), stack.pop());
        assert_eq!(None, stack.pop());
    }

    #[test]
    fn set_limit_trims() {
        let mut stack = BoundedStack::new(0);
        for i in 0..5 {
            stack.push(i);
        }

        stack.set_limit(2);
        assert_eq!(2, stack.limit());
        assert_eq!(2, stack.len());
        assert_eq!(Some(4), stack.pop());
        assert_eq!(Some(3), stack.pop());
    }

    #[test]
    fn clear() {
        let mut stack = BoundedStack::new(0);
        stack.push(1);
        stack.clear();
        assert!(stack.is_empty());
    }
}
