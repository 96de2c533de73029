use std::convert::Infallible;

/// One-based random access over an ordered sequence.
///
/// Positions run from `1` to `elem_count()`. Insertion points run from `1` to
/// `elem_count() + 1`.
pub trait Bisect {
    type Elem;
    fn elem_count(&self) -> usize;
    /// `idx` is in `1..=elem_count()`.
    fn elem(&self, idx: usize) -> Self::Elem;

    /// Insertion point for `x` in a sequence sorted by `<`. Equal elements
    /// stay in front of `x`.
    fn bisect(&self, x: &Self::Elem) -> usize
    where
        Self::Elem: PartialOrd,
    {
        let res: Result<usize, Infallible> = self.bisect_by(|e| Ok(*x < e));
        match res {
            Ok(idx) => idx,
            Err(never) => match never {},
        }
    }

    /// Returns the smallest position `i` such that `before(elem(j))` holds for
    /// every `j >= i`, or `elem_count() + 1`.
    ///
    /// `before` must be monotonic over the sequence (false then true). It is
    /// called at most `ceil(log2(elem_count() + 1))` times, and the first error
    /// it returns ends the search.
    fn bisect_by<E, F>(&self, mut before: F) -> Result<usize, E>
    where
        F: FnMut(Self::Elem) -> Result<bool, E>,
    {
        let mut start = 1usize;
        let mut end = self.elem_count();
        // mid starts at 1 so an empty sequence yields 1
        let mut mid = 1usize;
        let mut right = false;
        while start <= end {
            mid = start + (end - start) / 2;
            if before(self.elem(mid))? {
                end = mid - 1;
                right = false;
            } else {
                start = mid + 1;
                right = true;
            }
        }
        Ok(mid + right as usize)
    }
}

impl<T: Clone> Bisect for [T] {
    type Elem = T;

    fn elem_count(&self) -> usize {
        self.len()
    }

    fn elem(&self, idx: usize) -> T {
        self[idx - 1].clone()
    }
}
