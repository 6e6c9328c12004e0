//! Load and save options

/// Options for [`DocumentModel::open`](super::DocumentModel::open)
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Refuse files that cannot be written back
    pub check_write_permission: bool,
    /// Scan `includes` for custom components and check their names
    pub scan_includes: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            check_write_permission: true,
            scan_includes: true,
        }
    }
}

/// Options for writing a document to disk
#[derive(Debug, Clone)]
pub struct SaveOptions {
    /// Number of spaces per indentation level
    pub tab_size: usize,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self { tab_size: 2 }
    }
}

impl SaveOptions {
    /// Indentation string for one level
    pub fn indent(&self) -> String {
        " ".repeat(self.tab_size)
    }
}
