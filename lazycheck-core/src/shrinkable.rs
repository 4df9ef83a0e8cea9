//! Lazy shrink trees for generated values.
//!
//! A [`Shrinkable`] pairs a value with a lazy sequence of "smaller"
//! candidate values, each itself a `Shrinkable`. Following the candidates
//! recursively forms an implicit rose tree that is expanded strictly on
//! demand: constructing a `Shrinkable` never computes a shrink candidate,
//! which keeps trees for unbounded domains usable.
//!
//! Values are produced through `value() -> Result<T>`. A generator whose
//! computation fails parks the error here and the failure surfaces only
//! when the value is demanded, so generator invocation itself never fails.

use crate::error::Result;
use crate::seq::Seq;
use std::rc::Rc;

pub mod render;

/// A generated value plus a lazy sequence of smaller candidates.
///
/// Handles are cheap to clone; clones share the underlying node. What
/// counts as "smaller" is a convention upheld by each generator's author
/// (shorter, closer to zero, ...), not a structural guarantee.
pub struct Shrinkable<T> {
    node: Rc<dyn Node<T>>,
}

trait Node<T> {
    fn value(&self) -> Result<T>;
    fn shrinks(&self) -> Seq<Shrinkable<T>>;
}

impl<T> Clone for Shrinkable<T> {
    fn clone(&self) -> Self {
        Shrinkable {
            node: Rc::clone(&self.node),
        }
    }
}

impl<T: 'static> Shrinkable<T> {
    fn from_node(node: impl Node<T> + 'static) -> Self {
        Shrinkable {
            node: Rc::new(node),
        }
    }

    /// A terminal value: no shrink candidates.
    pub fn just(value: T) -> Self
    where
        T: Clone,
    {
        Shrinkable::from_node(JustNode { value })
    }

    /// Wrap a value-producing computation with no shrink candidates.
    ///
    /// If the thunk fails, the failure is re-surfaced on every demand of
    /// the value rather than at construction time.
    pub fn lambda<F>(thunk: F) -> Self
    where
        F: Fn() -> Result<T> + 'static,
    {
        Shrinkable::from_node(LambdaNode { thunk })
    }

    /// General lazy node: both the value and the shrink sequence are
    /// computed on demand.
    pub fn with<V, S>(value_fn: V, shrinks_fn: S) -> Self
    where
        V: Fn() -> Result<T> + 'static,
        S: Fn() -> Seq<Shrinkable<T>> + 'static,
    {
        Shrinkable::from_node(WithNode {
            value_fn,
            shrinks_fn,
        })
    }

    /// Produce the value.
    pub fn value(&self) -> Result<T> {
        self.node.value()
    }

    /// The lazy sequence of shrink candidates.
    pub fn shrinks(&self) -> Seq<Shrinkable<T>> {
        self.node.shrinks()
    }

    /// Transform the value and, lazily and recursively, every shrink
    /// candidate, preserving the shape of the tree.
    pub fn map<U, F>(&self, f: F) -> Shrinkable<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        self.map_rc(Rc::new(f))
    }

    fn map_rc<U, F>(&self, f: Rc<F>) -> Shrinkable<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        Shrinkable::from_node(MapNode {
            inner: self.clone(),
            f,
        })
    }

    /// Monadic bind: shrink candidates come from shrinking the input
    /// (re-applying `f`) first, then from the output's own candidates.
    pub fn and_then<U, F>(&self, f: F) -> Shrinkable<U>
    where
        U: 'static,
        F: Fn(T) -> Shrinkable<U> + 'static,
    {
        self.and_then_rc(Rc::new(f))
    }

    fn and_then_rc<U, F>(&self, f: Rc<F>) -> Shrinkable<U>
    where
        U: 'static,
        F: Fn(T) -> Shrinkable<U> + 'static,
    {
        Shrinkable::from_node(BindNode {
            inner: self.clone(),
            f,
        })
    }

    /// Restrict the tree to values satisfying `pred`.
    ///
    /// Returns `None` if the root value is rejected. Candidates are pruned
    /// lazily as the shrink sequence is pulled; a root whose value is a
    /// deferred error is kept so the failure reaches whoever demands it.
    pub fn filter<P>(&self, pred: P) -> Option<Shrinkable<T>>
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.filter_rc(Rc::new(pred))
    }

    fn filter_rc<P>(&self, pred: Rc<P>) -> Option<Shrinkable<T>>
    where
        P: Fn(&T) -> bool + 'static,
    {
        if let Ok(value) = self.value() {
            if !(*pred)(&value) {
                return None;
            }
        }
        Some(Shrinkable::from_node(FilterNode {
            inner: self.clone(),
            pred,
        }))
    }
}

struct JustNode<T> {
    value: T,
}

impl<T: Clone + 'static> Node<T> for JustNode<T> {
    fn value(&self) -> Result<T> {
        Ok(self.value.clone())
    }

    fn shrinks(&self) -> Seq<Shrinkable<T>> {
        Seq::empty()
    }
}

struct LambdaNode<F> {
    thunk: F,
}

impl<T, F> Node<T> for LambdaNode<F>
where
    T: 'static,
    F: Fn() -> Result<T>,
{
    fn value(&self) -> Result<T> {
        (self.thunk)()
    }

    fn shrinks(&self) -> Seq<Shrinkable<T>> {
        Seq::empty()
    }
}

struct WithNode<V, S> {
    value_fn: V,
    shrinks_fn: S,
}

impl<T, V, S> Node<T> for WithNode<V, S>
where
    V: Fn() -> Result<T>,
    S: Fn() -> Seq<Shrinkable<T>>,
{
    fn value(&self) -> Result<T> {
        (self.value_fn)()
    }

    fn shrinks(&self) -> Seq<Shrinkable<T>> {
        (self.shrinks_fn)()
    }
}

struct MapNode<T, F> {
    inner: Shrinkable<T>,
    f: Rc<F>,
}

impl<T, U, F> Node<U> for MapNode<T, F>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> U + 'static,
{
    fn value(&self) -> Result<U> {
        self.inner.value().map(|value| (*self.f)(value))
    }

    fn shrinks(&self) -> Seq<Shrinkable<U>> {
        let f = Rc::clone(&self.f);
        self.inner
            .shrinks()
            .map(move |candidate| candidate.map_rc(Rc::clone(&f)))
    }
}

struct BindNode<T, F> {
    inner: Shrinkable<T>,
    f: Rc<F>,
}

impl<T, U, F> Node<U> for BindNode<T, F>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> Shrinkable<U> + 'static,
{
    fn value(&self) -> Result<U> {
        self.inner.value().and_then(|value| (*self.f)(value).value())
    }

    fn shrinks(&self) -> Seq<Shrinkable<U>> {
        let f = Rc::clone(&self.f);
        let input = self
            .inner
            .shrinks()
            .map(move |candidate| candidate.and_then_rc(Rc::clone(&f)));

        let inner = self.inner.clone();
        let f = Rc::clone(&self.f);
        let output = Seq::lazy(move || match inner.value() {
            Ok(value) => (*f)(value).shrinks(),
            Err(_) => Seq::empty(),
        });

        input.chain(output)
    }
}

struct FilterNode<T, P> {
    inner: Shrinkable<T>,
    pred: Rc<P>,
}

impl<T, P> Node<T> for FilterNode<T, P>
where
    T: 'static,
    P: Fn(&T) -> bool + 'static,
{
    fn value(&self) -> Result<T> {
        self.inner.value()
    }

    fn shrinks(&self) -> Seq<Shrinkable<T>> {
        let pred = Rc::clone(&self.pred);
        self.inner
            .shrinks()
            .filter_map(move |candidate| candidate.filter_rc(Rc::clone(&pred)))
    }
}
