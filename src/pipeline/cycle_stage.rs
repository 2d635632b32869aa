use std::fmt;

/// Network stage of an upload cycle. A cycle moves `Uploading` then
/// `Fetching`, and a failure in either ends it with an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStage {
    Uploading,
    Fetching,
}

impl fmt::Display for CycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleStage::Uploading => f.write_str("uploading file"),
            CycleStage::Fetching => f.write_str("fetching tags"),
        }
    }
}
