/// Openness of the two bounds of a [`VersionRange`](crate::version::range::VersionRange).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundaryType {
    /// `[min,max]`
    #[default]
    Closed,
    /// `(min,max)`
    Open,
    /// `(min,max]`
    LeftOpen,
    /// `[min,max)`
    RightOpen,
}

impl BoundaryType {
    pub fn of(left_exclusive: bool, right_exclusive: bool) -> Self {
        match (left_exclusive, right_exclusive) {
            (false, false) => BoundaryType::Closed,
            (true, true) => BoundaryType::Open,
            (true, false) => BoundaryType::LeftOpen,
            (false, true) => BoundaryType::RightOpen,
        }
    }

    pub fn is_left_exclusive(&self) -> bool {
        matches!(self, BoundaryType::Open | BoundaryType::LeftOpen)
    }

    pub fn is_right_exclusive(&self) -> bool {
        matches!(self, BoundaryType::Open | BoundaryType::RightOpen)
    }

    pub fn prefix(&self) -> char {
        if self.is_left_exclusive() { '(' } else { '[' }
    }

    pub fn suffix(&self) -> char {
        if self.is_right_exclusive() { ')' } else { ']' }
    }
}
