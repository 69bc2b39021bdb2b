use ordered_float::OrderedFloat;
use std::collections::BinaryHeap;

/// A stored point returned by a query, with its distance to the query point.
#[derive(Debug)]
pub struct Neighbor<'a, T> {
    pub point: &'a [f64],
    pub value: &'a T,
    pub distance: f64,
}

impl<'a, T> Neighbor<'a, T> {
    /// Drops the distance, leaving the `(point, value)` pair.
    #[must_use]
    pub fn into_pair(self) -> (&'a [f64], &'a T) {
        (self.point, self.value)
    }
}

impl<T> Clone for Neighbor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Neighbor<'_, T> {}

/// Best `k` candidates of a search. Admits anything within `radius` until
/// full, then only candidates strictly closer than the worst one held.
pub struct SearchState {
    k: usize,
    radius: f64,
    candidates: BinaryHeap<(OrderedFloat<f64>, usize)>,
}

impl SearchState {
    #[must_use]
    pub fn new(k: usize, radius: f64) -> Self {
        SearchState {
            k,
            radius,
            candidates: BinaryHeap::new(),
        }
    }

    #[must_use]
    pub fn unbounded(radius: f64) -> Self {
        Self::new(usize::MAX, radius)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.candidates.len() >= self.k
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        match self.candidates.peek() {
            Some((worst, _)) if self.is_full() => worst.into_inner(),
            _ => self.radius,
        }
    }

    #[must_use]
    pub fn may_contain(&self, lower_bound: f64) -> bool {
        if self.is_full() {
            lower_bound < self.threshold()
        } else {
            lower_bound <= self.radius
        }
    }

    pub fn offer(&mut self, distance: f64, entry: usize) -> bool {
        // Not full yet: the radius is the only bound
        if !self.is_full() {
            if distance <= self.radius {
                self.candidates.push((OrderedFloat(distance), entry));
                return true;
            }
            return false;
        }
        if distance < self.threshold() {
            self.candidates.pop();
            self.candidates.push((OrderedFloat(distance), entry));
            return true;
        }
        false
    }

    #[must_use]
    pub fn into_sorted(self) -> Vec<(f64, usize)> {
        self.candidates
            .into_sorted_vec()
            .into_iter()
            .map(|(distance, entry)| (distance.into_inner(), entry))
            .collect()
    }
}
