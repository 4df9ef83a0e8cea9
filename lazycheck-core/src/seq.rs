//! Lazy, pull-based sequences used to enumerate shrink candidates.
//!
//! A [`Seq`] is a possibly infinite sequence with value semantics: cloning
//! a handle yields an independent cursor over the same logical sequence,
//! and pulling from one cursor never affects another. All transforms defer
//! their work until the sequence is actually pulled, which is what lets
//! shrink candidate sequences for unbounded domains stay cheap.

use std::collections::VecDeque;

/// A lazy, value-semantic sequence of `T`.
///
/// Pulling goes through the [`Iterator`] impl; elements are moved out of
/// the sequence, never cloned. Element clones happen only when a handle
/// itself is cloned or two sequences are compared.
pub struct Seq<T> {
    cell: Box<dyn SeqCell<T>>,
}

/// One concrete sequence state. Pulling mutates the cell's own cursor;
/// `boxed_clone` re-derives an independent cursor at the same position.
trait SeqCell<T> {
    fn pull(&mut self) -> Option<T>;
    fn boxed_clone(&self) -> Box<dyn SeqCell<T>>;
}

impl<T> Clone for Seq<T> {
    fn clone(&self) -> Self {
        Seq {
            cell: self.cell.boxed_clone(),
        }
    }
}

impl<T> Iterator for Seq<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.cell.pull()
    }
}

/// Shows a bounded prefix; the sequence may be infinite.
impl<T: std::fmt::Debug> std::fmt::Debug for Seq<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const PREVIEW: usize = 16;
        let mut cursor = self.clone();
        let mut list = f.debug_list();
        for _ in 0..PREVIEW {
            match cursor.next() {
                Some(item) => {
                    list.entry(&item);
                }
                None => return list.finish(),
            }
        }
        list.entry(&format_args!("..."));
        list.finish()
    }
}

/// Structural equality: same elements in the same order, including length.
/// Traverses clones of both sequences, so comparing two infinite sequences
/// only terminates at the first mismatch.
impl<T: PartialEq> PartialEq for Seq<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.clone();
        let mut b = other.clone();
        loop {
            match (a.next(), b.next()) {
                (None, None) => return true,
                (Some(x), Some(y)) if x == y => continue,
                _ => return false,
            }
        }
    }
}

impl<T: 'static> Seq<T> {
    fn from_cell(cell: impl SeqCell<T> + 'static) -> Self {
        Seq {
            cell: Box::new(cell),
        }
    }

    /// The empty sequence.
    pub fn empty() -> Self {
        Seq::from_cell(Empty)
    }

    /// A finite sequence replaying `items` in order. Pulling moves items
    /// out; cloning the handle is what clones the remaining items.
    pub fn from_vec(items: Vec<T>) -> Self
    where
        T: Clone,
    {
        Seq::from_cell(Replay {
            items: VecDeque::from(items),
        })
    }

    /// A one-element sequence.
    pub fn singleton(item: T) -> Self
    where
        T: Clone,
    {
        Seq::from_vec(vec![item])
    }

    /// Build a sequence by repeatedly stepping a state. The step function
    /// returns `None` to end the sequence; it may never do so, giving an
    /// infinite sequence.
    pub fn unfold<S, F>(state: S, step: F) -> Self
    where
        S: Clone + 'static,
        F: Fn(&mut S) -> Option<T> + Clone + 'static,
    {
        Seq::from_cell(Unfold { state, step })
    }

    /// Defer building a sequence until it is first pulled.
    pub fn lazy<F>(thunk: F) -> Self
    where
        F: Fn() -> Seq<T> + Clone + 'static,
    {
        Seq::from_cell(Lazy {
            forced: None,
            thunk,
        })
    }

    /// Lazily transform every element.
    pub fn map<U, F>(self, f: F) -> Seq<U>
    where
        U: 'static,
        F: Fn(T) -> U + Clone + 'static,
    {
        Seq::from_cell(MapCell { inner: self, f })
    }

    /// Lazily keep only elements satisfying `pred`.
    pub fn filter<P>(self, pred: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + Clone + 'static,
    {
        Seq::from_cell(FilterCell { inner: self, pred })
    }

    /// Lazily map and filter in one pass.
    pub fn filter_map<U, F>(self, f: F) -> Seq<U>
    where
        U: 'static,
        F: Fn(T) -> Option<U> + Clone + 'static,
    {
        Seq::from_cell(FilterMapCell { inner: self, f })
    }

    /// Skip the first `n` elements. Skipping past the end yields the empty
    /// sequence; the skipped elements are only consumed on the first pull.
    pub fn skip(self, n: usize) -> Seq<T> {
        Seq::from_cell(SkipCell {
            pending: n,
            inner: self,
        })
    }

    /// Keep at most the first `n` elements.
    pub fn take(self, n: usize) -> Seq<T> {
        Seq::from_cell(TakeCell {
            remaining: n,
            inner: self,
        })
    }

    /// This sequence followed by `other`.
    pub fn chain(self, other: Seq<T>) -> Seq<T> {
        Seq::from_cell(ChainCell {
            first: Some(self),
            second: other,
        })
    }
}

struct Empty;

impl<T> SeqCell<T> for Empty {
    fn pull(&mut self) -> Option<T> {
        None
    }

    fn boxed_clone(&self) -> Box<dyn SeqCell<T>> {
        Box::new(Empty)
    }
}

struct Replay<T> {
    items: VecDeque<T>,
}

impl<T: Clone + 'static> SeqCell<T> for Replay<T> {
    fn pull(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    fn boxed_clone(&self) -> Box<dyn SeqCell<T>> {
        Box::new(Replay {
            items: self.items.clone(),
        })
    }
}

struct Unfold<S, F> {
    state: S,
    step: F,
}

impl<T, S, F> SeqCell<T> for Unfold<S, F>
where
    S: Clone + 'static,
    F: Fn(&mut S) -> Option<T> + Clone + 'static,
{
    fn pull(&mut self) -> Option<T> {
        (self.step)(&mut self.state)
    }

    fn boxed_clone(&self) -> Box<dyn SeqCell<T>> {
        Box::new(Unfold {
            state: self.state.clone(),
            step: self.step.clone(),
        })
    }
}

struct Lazy<T, F> {
    forced: Option<Seq<T>>,
    thunk: F,
}

impl<T: 'static, F> SeqCell<T> for Lazy<T, F>
where
    F: Fn() -> Seq<T> + Clone + 'static,
{
    fn pull(&mut self) -> Option<T> {
        if self.forced.is_none() {
            self.forced = Some((self.thunk)());
        }
        match &mut self.forced {
            Some(seq) => seq.next(),
            None => None,
        }
    }

    fn boxed_clone(&self) -> Box<dyn SeqCell<T>> {
        Box::new(Lazy {
            forced: self.forced.clone(),
            thunk: self.thunk.clone(),
        })
    }
}

struct MapCell<T, F> {
    inner: Seq<T>,
    f: F,
}

impl<T, U, F> SeqCell<U> for MapCell<T, F>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> U + Clone + 'static,
{
    fn pull(&mut self) -> Option<U> {
        self.inner.next().map(|item| (self.f)(item))
    }

    fn boxed_clone(&self) -> Box<dyn SeqCell<U>> {
        Box::new(MapCell {
            inner: self.inner.clone(),
            f: self.f.clone(),
        })
    }
}

struct FilterCell<T, P> {
    inner: Seq<T>,
    pred: P,
}

impl<T, P> SeqCell<T> for FilterCell<T, P>
where
    T: 'static,
    P: Fn(&T) -> bool + Clone + 'static,
{
    fn pull(&mut self) -> Option<T> {
        for item in self.inner.by_ref() {
            if (self.pred)(&item) {
                return Some(item);
            }
        }
        None
    }

    fn boxed_clone(&self) -> Box<dyn SeqCell<T>> {
        Box::new(FilterCell {
            inner: self.inner.clone(),
            pred: self.pred.clone(),
        })
    }
}

struct FilterMapCell<T, F> {
    inner: Seq<T>,
    f: F,
}

impl<T, U, F> SeqCell<U> for FilterMapCell<T, F>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> Option<U> + Clone + 'static,
{
    fn pull(&mut self) -> Option<U> {
        for item in self.inner.by_ref() {
            if let Some(mapped) = (self.f)(item) {
                return Some(mapped);
            }
        }
        None
    }

    fn boxed_clone(&self) -> Box<dyn SeqCell<U>> {
        Box::new(FilterMapCell {
            inner: self.inner.clone(),
            f: self.f.clone(),
        })
    }
}

struct SkipCell<T> {
    pending: usize,
    inner: Seq<T>,
}

impl<T: 'static> SeqCell<T> for SkipCell<T> {
    fn pull(&mut self) -> Option<T> {
        while self.pending > 0 {
            self.pending -= 1;
            self.inner.next()?;
        }
        self.inner.next()
    }

    fn boxed_clone(&self) -> Box<dyn SeqCell<T>> {
        Box::new(SkipCell {
            pending: self.pending,
            inner: self.inner.clone(),
        })
    }
}

struct TakeCell<T> {
    remaining: usize,
    inner: Seq<T>,
}

impl<T: 'static> SeqCell<T> for TakeCell<T> {
    fn pull(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.inner.next()
    }

    fn boxed_clone(&self) -> Box<dyn SeqCell<T>> {
        Box::new(TakeCell {
            remaining: self.remaining,
            inner: self.inner.clone(),
        })
    }
}

struct ChainCell<T> {
    first: Option<Seq<T>>,
    second: Seq<T>,
}

impl<T: 'static> SeqCell<T> for ChainCell<T> {
    fn pull(&mut self) -> Option<T> {
        if let Some(first) = &mut self.first {
            if let Some(item) = first.next() {
                return Some(item);
            }
            self.first = None;
        }
        self.second.next()
    }

    fn boxed_clone(&self) -> Box<dyn SeqCell<T>> {
        Box::new(ChainCell {
            first: self.first.clone(),
            second: self.second.clone(),
        })
    }
}
