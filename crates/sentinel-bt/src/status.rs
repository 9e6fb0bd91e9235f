//! Status returned by tree nodes.

/// The result of evaluating a tree node for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeStatus {
    /// Not finished; evaluate this node again next tick before trying siblings.
    Running,
    /// The node completed and its condition or action held.
    Success,
    /// The node does not apply right now; the parent routes around it.
    Failure,
}

impl TreeStatus {
    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, TreeStatus::Running)
    }

    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, TreeStatus::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, TreeStatus::Failure)
    }

    /// Returns `true` for `Success` and `Failure`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !self.is_running()
    }

    /// Maps a boolean guard onto `Success`/`Failure`.
    #[inline]
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            TreeStatus::Success
        } else {
            TreeStatus::Failure
        }
    }
}
