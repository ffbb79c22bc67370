//! Identity-preserving restore.
//!
//! Undo and redo never hand the caller a decoded copy. The decoded state is merged
//! into the live subject the snapshot was taken from, so every handle the caller
//! holds keeps pointing at the same object.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::path::PathBuf;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::time::Duration;

use rewind_core::{HistoryError, Result};

/// Live, shared subject tracked by a snapshot history.
pub type Subject<T> = Rc<RefCell<T>>;

/// Wrap a value as a subject.
pub fn subject<T>(value: T) -> Subject<T> {
    Rc::new(RefCell::new(value))
}

/// Merge a decoded snapshot into a live value.
///
/// The provided method overwrites every field of `self` with the snapshot's fields.
/// Override it to take over the update, e.g. to keep caches, handles or counters that
/// should not roll back.
pub trait Restore: Sized {
    fn restore_from(&mut self, snapshot: Self) {
        *self = snapshot;
    }
}

macro_rules! restore_by_assignment {
    ($($ty:ty),* $(,)?) => {
        $(impl Restore for $ty {})*
    };
}

restore_by_assignment!(
    (), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, PathBuf, Duration,
);

impl<T> Restore for Vec<T> {}
impl<T> Restore for VecDeque<T> {}
impl<T> Restore for LinkedList<T> {}
impl<T> Restore for BinaryHeap<T> {}
impl<T> Restore for Option<T> {}
impl<T> Restore for Box<T> {}
impl<T> Restore for Rc<T> {}
impl<T> Restore for Arc<T> {}
impl<T, const N: usize> Restore for [T; N] {}
impl<T, S> Restore for HashSet<T, S> {}
impl<T> Restore for BTreeSet<T> {}
impl<K, V, S> Restore for HashMap<K, V, S> {}
impl<K, V> Restore for BTreeMap<K, V> {}

macro_rules! restore_tuples {
    ($(($($name:ident),+))+) => {
        $(impl<$($name),+> Restore for ($($name,)+) {})+
    };
}

restore_tuples! {
    (A)
    (A, B)
    (A, B, C)
    (A, B, C, D)
    (A, B, C, D, E)
    (A, B, C, D, E, F)
    (A, B, C, D, E, F, G)
    (A, B, C, D, E, F, G, H)
    (A, B, C, D, E, F, G, H, I)
    (A, B, C, D, E, F, G, H, I, J)
    (A, B, C, D, E, F, G, H, I, J, K)
    (A, B, C, D, E, F, G, H, I, J, K, L)
    (A, B, C, D, E, F, G, H, I, J, K, L, M)
    (A, B, C, D, E, F, G, H, I, J, K, L, M, N)
    (A, B, C, D, E, F, G, H, I, J, K, L, M, N, O)
    (A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P)
}

/// Merge `decoded` into the subject behind `target` and return that same subject.
pub fn restore<T: Restore>(target: &Weak<RefCell<T>>, decoded: T) -> Result<Subject<T>> {
    let Some(live) = target.upgrade() else {
        tracing::warn!("restore target has been dropped");
        return Err(HistoryError::SubjectDropped);
    };
    live.try_borrow_mut()
        .map_err(|_| HistoryError::SubjectBorrowed)?
        .restore_from(decoded);
    Ok(live)
}
