/// Text held by the editor wrapper for as long as it is mounted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorContent {
    value: String,
    revision: u64,
}

impl EditorContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Number of change events applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the content with the editor's latest value.
    pub fn on_change(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.revision += 1;
    }
}
