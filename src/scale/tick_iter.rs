use super::Tick;

/// Iterator over ticks produced by a scale.
pub struct TickIter {
    inner: Box<dyn Iterator<Item = Tick> + 'static>,
}

impl TickIter {
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Tick> + 'static,
    {
        Self {
            inner: Box::new(iter),
        }
    }

    /// Creates a `TickIter` from a vector of ticks.
    ///
    /// Used for explicit user breaks and for scales whose breaks are computed
    /// eagerly (binned, temporal).
    ///
    /// # Examples
    ///
    /// ```
    /// use fastnum::decimal::D128;
    /// use ggscale::scale::{Tick, TickIter};
    ///
    /// let ticks = vec![
    ///     Tick { value: D128::from(0), level: 0 },
    ///     Tick { value: D128::from(50), level: 0 },
    /// ];
    ///
    /// let iter = TickIter::from_vec(ticks);
    /// assert_eq!(iter.count(), 2);
    /// ```
    pub fn from_vec(vec: Vec<Tick>) -> Self {
        Self::new(vec.into_iter())
    }
}

impl Iterator for TickIter {
    type Item = Tick;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
