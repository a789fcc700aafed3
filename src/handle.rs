//! Shared-ownership handle for cached sessions.
//!
//! A [`SessionHandle`] is one strong reference to a session object that is
//! allocated and destroyed elsewhere. The cache holds exactly one handle per
//! stored mapping: it [`acquire`](SessionHandle::acquire)s when an entry is
//! created and [`release`](SessionHandle::release)s when the entry goes away.
//! Both are ordinary reference-count operations on an [`Arc`], so a mismatched
//! acquire/release is not expressible without leaking a handle value.
//!
//! The session payload is never copied or inspected by the cache.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// One strong reference to a session of type `S`.
///
/// # Example
///
/// ```
/// use tls_session_cache::handle::SessionHandle;
///
/// let session = SessionHandle::new(String::from("ticket"));
/// assert_eq!(session.strong_count(), 1);
///
/// let second = session.acquire();
/// assert_eq!(session.strong_count(), 2);
/// assert!(second.ptr_eq(&session));
///
/// second.release();
/// assert_eq!(session.strong_count(), 1);
/// ```
pub struct SessionHandle<S> {
    inner: Arc<S>,
}

impl<S> SessionHandle<S> {
    /// Allocates a new session with a reference count of one.
    pub fn new(session: S) -> Self {
        Self {
            inner: Arc::new(session),
        }
    }

    /// Takes another strong reference to the same session.
    #[inline]
    #[must_use = "dropping the acquired handle releases it immediately"]
    pub fn acquire(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Gives up this strong reference. The session is destroyed if this was
    /// the last one.
    #[inline]
    pub fn release(self) {
        drop(self);
    }

    /// Number of strong references currently held, including this one.
    #[inline]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Whether both handles refer to the same session object.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Borrows the session payload.
    #[inline]
    pub fn session(&self) -> &S {
        &self.inner
    }

    /// Converts into the underlying `Arc` without touching the count.
    pub fn into_arc(self) -> Arc<S> {
        self.inner
    }
}

impl<S> Clone for SessionHandle<S> {
    fn clone(&self) -> Self {
        self.acquire()
    }
}

impl<S> Deref for SessionHandle<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.inner
    }
}

impl<S> From<Arc<S>> for SessionHandle<S> {
    fn from(inner: Arc<S>) -> Self {
        Self { inner }
    }
}

/// Handles compare by identity, not by payload.
impl<S> PartialEq for SessionHandle<S> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<S> Eq for SessionHandle<S> {}

impl<S> fmt::Debug for SessionHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("ptr", &Arc::as_ptr(&self.inner))
            .field("strong_count", &self.strong_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_and_release_adjust_count() {
        let handle = SessionHandle::new(5u8);
        let a = handle.acquire();
        let b = a.clone();
        assert_eq!(handle.strong_count(), 3);

        a.release();
        assert_eq!(handle.strong_count(), 2);
        drop(b);
        assert_eq!(handle.strong_count(), 1);
    }

    #[test]
    fn equality_is_identity() {
        let a = SessionHandle::new("same");
        let b = SessionHandle::new("same");
        assert_ne!(a, b);
        assert_eq!(a, a.acquire());
        assert_eq!(*a, *b);
    }

    #[test]
    fn from_arc_shares_allocation() {
        let arc = Arc::new(vec![1, 2, 3]);
        let handle = SessionHandle::from(Arc::clone(&arc));
        assert_eq!(Arc::strong_count(&arc), 2);
        assert_eq!(handle.session(), &vec![1, 2, 3]);

        let back = handle.into_arc();
        assert!(Arc::ptr_eq(&back, &arc));
        assert_eq!(Arc::strong_count(&arc), 2);
    }

    #[test]
    fn last_release_destroys_session() {
        struct Flag(Arc<std::sync::atomic::AtomicBool>);
        impl Drop for Flag {
            fn drop(&mut self) {
                self.0.store(true, std::sync::atomic::Ordering::SeqCst);
            }
        }

        let dropped = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let handle = SessionHandle::new(Flag(Arc::clone(&dropped)));
        let extra = handle.acquire();

        handle.release();
        assert!(!dropped.load(std::sync::atomic::Ordering::SeqCst));
        extra.release();
        assert!(dropped.load(std::sync::atomic::Ordering::SeqCst));
    }
}
