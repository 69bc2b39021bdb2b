pub const NONE: usize = usize::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A tree node: one pivot entry and up to two children.
///
/// `entry` indexes the tree's insertion-ordered points/values. Each child slot
/// carries the exact maximum distance from the pivot to any point stored in
/// that child's subtree (0 while the slot is empty).
#[derive(Clone, Debug)]
pub struct Node {
    pub entry: usize,
    pub left: usize,
    pub right: usize,
    pub left_radius: f64,
    pub right_radius: f64,
}

impl Node {
    #[must_use]
    pub fn leaf(entry: usize) -> Node {
        Node {
            entry,
            left: NONE,
            right: NONE,
            left_radius: 0.0,
            right_radius: 0.0,
        }
    }

    #[must_use]
    pub fn child(&self, side: Side) -> usize {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn children(&self) -> impl Iterator<Item = (usize, f64)> {
        [
            (self.left, self.left_radius),
            (self.right, self.right_radius),
        ]
        .into_iter()
        .filter(|&(child, _)| child != NONE)
    }

    // Empty slot first, otherwise the wider side
    #[must_use]
    pub fn choose_side(&self) -> Side {
        if self.left == NONE {
            Side::Left
        } else if self.right == NONE {
            Side::Right
        } else if self.left_radius >= self.right_radius {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn widen(&mut self, side: Side, distance: f64) {
        let radius = match side {
            Side::Left => &mut self.left_radius,
            Side::Right => &mut self.right_radius,
        };
        *radius = radius.max(distance);
    }

    pub fn attach(&mut self, side: Side, child: usize) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}
