//! Callback handles stored in slider arguments.
//!
//! ## Usage
//!
//! Pass a closure to [`crate::RangeSliderArgs::on_drag`]; it is wrapped in a
//! [`CallbackWith`] so the arguments stay `Clone + PartialEq`.

use std::sync::Arc;

/// Stable, comparable callback handle for `Fn(T) -> R`.
///
/// Two handles are equal only when they share the same closure
/// (`Arc::ptr_eq`), so argument structs can derive `PartialEq` without
/// comparing closures deeply.
pub struct CallbackWith<T, R = ()> {
    handler: Arc<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> CallbackWith<T, R> {
    /// Create a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Invoke the callback with an argument.
    pub fn call(&self, value: T) -> R {
        (self.handler)(value)
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

impl<T, R> std::fmt::Debug for CallbackWith<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackWith").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_callback_identity() {
        let a = CallbackWith::<f64>::new(|_| {});
        let b = a.clone();
        let c = CallbackWith::<f64>::new(|_| {});
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_callback_call() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let callback = CallbackWith::new(move |n: usize| {
            counter.fetch_add(n, Ordering::SeqCst);
        });
        callback.call(2);
        callback.clone().call(3);
        assert_eq!(hits.load(Ordering::SeqCst), 5);
    }
}
