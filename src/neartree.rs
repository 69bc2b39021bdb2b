use crate::{
    distance::{Euclidean, Metric},
    error::{Error, Result},
    node::{Node, NONE},
    search::{Neighbor, SearchState},
};
use tracing::{debug, trace};

/// A metric tree over fixed-dimension points, each carrying a value of type `T`.
///
/// Nodes live in an arena and refer to their children by index. Every node
/// keeps, per child, the exact maximum distance from its pivot to any point of
/// that child's subtree; queries use these radii with the triangle inequality
/// to skip subtrees that cannot hold a better candidate.
#[derive(Clone, Debug)]
pub struct NearTree<T, M = Euclidean> {
    dimension: usize,
    metric: M,
    root: usize,
    nodes: Vec<Node>,
    points: Vec<Vec<f64>>,
    values: Vec<T>,
}

impl<T> NearTree<T, Euclidean> {
    /// Creates an empty tree of the given dimension using the Euclidean metric.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `dimension` is zero.
    pub fn new(dimension: usize) -> Result<Self> {
        Self::with_metric(dimension, Euclidean)
    }
}

impl<T, M: Metric> NearTree<T, M> {
    /// Creates an empty tree of the given dimension using `metric`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `dimension` is zero.
    pub fn with_metric(dimension: usize, metric: M) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::InvalidArgument("dimension must be positive"));
        }
        Ok(NearTree {
            dimension,
            metric,
            root: NONE,
            nodes: Vec::new(),
            points: Vec::new(),
            values: Vec::new(),
        })
    }

    /// Inserts `point` with its associated `value`.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] if `point` does not have exactly
    /// `dimension()` coordinates; the tree is left unchanged.
    pub fn insert(&mut self, point: &[f64], value: T) -> Result<()> {
        self.check_dimension(point)?;
        let entry = self.push_entry(point.to_vec(), value);
        self.insert_entry(entry);
        Ok(())
    }

    /// Inserts all `entries`, stopping at the first one with a wrong dimension.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] for the first invalid point. The
    /// entries before it stay inserted.
    pub fn try_extend<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (Vec<f64>, T)>,
    {
        for (point, value) in entries {
            self.check_dimension(&point)?;
            let entry = self.push_entry(point, value);
            self.insert_entry(entry);
        }
        Ok(())
    }

    /// Finds the stored point closest to `point`, within `radius` if given.
    ///
    /// A point lying exactly at `radius` qualifies. Among equally close points
    /// the first one encountered wins.
    ///
    /// # Errors
    /// - [`Error::DimensionMismatch`] if `point` has a wrong dimension.
    /// - [`Error::InvalidArgument`] if `radius` is negative or NaN.
    /// - [`Error::NotFound`] if the tree is empty or no point lies within `radius`.
    pub fn nearest(&self, point: &[f64], radius: Option<f64>) -> Result<Neighbor<'_, T>> {
        self.check_dimension(point)?;
        let radius = check_radius(radius)?;

        let mut state = SearchState::new(1, radius);
        self.search(point, &mut state);
        state
            .into_sorted()
            .first()
            .map(|&(distance, entry)| self.neighbor(entry, distance))
            .ok_or(Error::NotFound)
    }

    /// Finds up to `k` stored points closest to `point`, within `radius` if
    /// given, sorted by increasing distance.
    ///
    /// Fewer than `k` results (possibly none) are returned when not enough
    /// points lie within `radius`.
    ///
    /// # Errors
    /// - [`Error::DimensionMismatch`] if `point` has a wrong dimension.
    /// - [`Error::InvalidArgument`] if `k` is zero or `radius` is negative or NaN.
    /// - [`Error::NotFound`] if the tree is empty.
    pub fn k_nearest(
        &self,
        point: &[f64],
        k: usize,
        radius: Option<f64>,
    ) -> Result<Vec<Neighbor<'_, T>>> {
        self.check_dimension(point)?;
        if k == 0 {
            return Err(Error::InvalidArgument("k must be positive"));
        }
        let radius = check_radius(radius)?;
        if self.is_empty() {
            return Err(Error::NotFound);
        }

        let mut state = SearchState::new(k, radius);
        self.search(point, &mut state);
        Ok(self.neighbors(state))
    }

    /// Finds every stored point within `radius` of `point` (inclusive), sorted
    /// by increasing distance.
    ///
    /// # Errors
    /// - [`Error::DimensionMismatch`] if `point` has a wrong dimension.
    /// - [`Error::InvalidArgument`] if `radius` is negative or NaN.
    pub fn find_in_sphere(&self, point: &[f64], radius: f64) -> Result<Vec<Neighbor<'_, T>>> {
        self.check_dimension(point)?;
        let radius = check_radius(Some(radius))?;

        let mut state = SearchState::unbounded(radius);
        self.search(point, &mut state);
        Ok(self.neighbors(state))
    }

    /// Finds the stored point farthest from `point`.
    ///
    /// # Errors
    /// - [`Error::DimensionMismatch`] if `point` has a wrong dimension.
    /// - [`Error::NotFound`] if the tree is empty.
    pub fn farthest(&self, point: &[f64]) -> Result<Neighbor<'_, T>> {
        self.check_dimension(point)?;

        let mut best: Option<(f64, usize)> = None;
        let mut visited = 0;
        let mut pruned = 0;
        // Each frame carries an upper bound on the distance of its subtree's points.
        let mut stack = Vec::new();
        if self.root != NONE {
            stack.push((self.root, f64::INFINITY));
        }
        while let Some((node_id, upper_bound)) = stack.pop() {
            if matches!(best, Some((farthest, _)) if upper_bound <= farthest) {
                pruned += 1;
                continue;
            }
            visited += 1;
            let node = &self.nodes[node_id];
            let distance = self.metric.distance(point, &self.points[node.entry]);
            if best.map_or(true, |(farthest, _)| distance > farthest) {
                best = Some((distance, node.entry));
            }
            for (child, radius) in node.children() {
                stack.push((child, distance + radius));
            }
        }

        debug!(visited, pruned, "farthest query");
        best.map(|(distance, entry)| self.neighbor(entry, distance))
            .ok_or(Error::NotFound)
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stored points, in insertion order.
    #[must_use]
    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    /// Stored values, in insertion order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[must_use]
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Number of nodes on the longest root-to-leaf path (0 for an empty tree).
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = Vec::new();
        if self.root != NONE {
            stack.push((self.root, 1));
        }
        while let Some((node_id, depth)) = stack.pop() {
            height = height.max(depth);
            for (child, _) in self.nodes[node_id].children() {
                stack.push((child, depth + 1));
            }
        }
        height
    }

    fn check_dimension(&self, point: &[f64]) -> Result<()> {
        if point.len() == self.dimension {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.dimension,
                actual: point.len(),
            })
        }
    }

    fn push_entry(&mut self, point: Vec<f64>, value: T) -> usize {
        let entry = self.points.len();
        self.points.push(point);
        self.values.push(value);
        entry
    }

    fn insert_entry(&mut self, entry: usize) {
        let slot_id = self.nodes.len();
        self.nodes.push(Node::leaf(entry));
        if self.root == NONE {
            self.root = slot_id;
            trace!(entry, depth = 1, size = self.size(), "inserted point");
            return;
        }

        // Descend to an empty slot, widening radii on the way
        let mut current = self.root;
        let mut depth = 1;
        loop {
            let pivot = &self.points[self.nodes[current].entry];
            let distance = self.metric.distance(&self.points[entry], pivot);

            let node = &mut self.nodes[current];
            let side = node.choose_side();
            node.widen(side, distance);
            depth += 1;
            match node.child(side) {
                NONE => {
                    node.attach(side, slot_id);
                    break;
                }
                child => current = child,
            }
        }
        trace!(entry, depth, size = self.size(), "inserted point");
    }

    fn search(&self, point: &[f64], state: &mut SearchState) {
        let mut visited = 0;
        let mut pruned = 0;
        // Each frame carries a lower bound on the distance of its subtree's points.
        let mut stack = Vec::new();
        if self.root != NONE {
            stack.push((self.root, 0.0));
        }
        while let Some((node_id, lower_bound)) = stack.pop() {
            // The threshold may have tightened since this frame was pushed.
            if !state.may_contain(lower_bound) {
                pruned += 1;
                continue;
            }
            visited += 1;
            let node = &self.nodes[node_id];
            let distance = self.metric.distance(point, &self.points[node.entry]);
            state.offer(distance, node.entry);

            // No point of a child subtree is closer than `distance - radius`.
            // `max` also maps the NaN of `inf - inf` to 0.
            let left_bound = (distance - node.left_radius).max(0.0);
            let right_bound = (distance - node.right_radius).max(0.0);
            let mut frames = [(node.right, right_bound), (node.left, left_bound)];
            if left_bound > right_bound {
                frames.swap(0, 1);
            }
            // The last frame pushed (smaller bound, left on ties) is visited first.
            for (child, bound) in frames {
                if child == NONE {
                    continue;
                }
                if state.may_contain(bound) {
                    stack.push((child, bound));
                } else {
                    pruned += 1;
                }
            }
        }

        debug!(visited, pruned, found = state.len(), "search completed");
    }

    fn neighbor(&self, entry: usize, distance: f64) -> Neighbor<'_, T> {
        Neighbor {
            point: &self.points[entry],
            value: &self.values[entry],
            distance,
        }
    }

    fn neighbors(&self, state: SearchState) -> Vec<Neighbor<'_, T>> {
        state
            .into_sorted()
            .into_iter()
            .map(|(distance, entry)| self.neighbor(entry, distance))
            .collect()
    }
}

impl<T, M: Metric> Extend<(Vec<f64>, T)> for NearTree<T, M> {
    /// # Panics
    /// Panics if a point has a wrong dimension; use [`NearTree::try_extend`]
    /// to handle that case.
    fn extend<I: IntoIterator<Item = (Vec<f64>, T)>>(&mut self, entries: I) {
        if let Err(error) = self.try_extend(entries) {
            panic!("cannot extend tree: {error}");
        }
    }
}

fn check_radius(radius: Option<f64>) -> Result<f64> {
    match radius {
        None => Ok(f64::INFINITY),
        Some(radius) if radius >= 0.0 => Ok(radius),
        Some(_) => Err(Error::InvalidArgument("radius must be non-negative")),
    }
}
