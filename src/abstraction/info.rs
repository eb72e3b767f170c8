use super::bucket::Bucket;
use crate::cfr::CfrInfo;
use crate::cfr::History;

/// An information set: what the acting player knows at a decision.
///
/// The bucket stands in for the player's cards on the current street, the
/// history for the public action path since the snapshot. The width is the
/// menu length, so two sets that happen to collide on bucket and history
/// but offer different menus never share a regret table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Info {
    bucket: Bucket,
    history: History,
    width: usize,
}

impl CfrInfo for Info {}

impl Info {
    pub fn new(bucket: Bucket, history: History, width: usize) -> Self {
        Self {
            bucket,
            history,
            width,
        }
    }
    pub fn bucket(&self) -> Bucket {
        self.bucket
    }
    pub fn history(&self) -> History {
        self.history
    }
    pub fn width(&self) -> usize {
        self.width
    }
}

impl std::fmt::Display for Info {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}@{}x{}", self.bucket, self.history, self.width)
    }
}
