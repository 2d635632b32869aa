pub type Tag = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Final value of one upload cycle. `colors` is never filled by the
/// tagging flow and stays empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadResult {
    pub tags: Vec<Tag>,
    pub colors: Vec<PhotoColor>,
}

impl UploadResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_tags(tags: Vec<Tag>) -> Self {
        Self {
            tags,
            colors: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.colors.is_empty()
    }
}
