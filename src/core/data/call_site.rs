use std::{
    hash::{Hash, Hasher},
    path::PathBuf,
};

/// A `name: value` pair from the object literal passed to a message call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallArgument {
    pub name: String,
    /// Source text of the value with surrounding quotes stripped.
    pub value_text: String,
}

/// A call expression recognized as a message reference, e.g. `m.greet({ name: 'x' })`.
///
/// Identity is `(file_path, offset)`: two call sites are equal when they start
/// at the same byte in the same file.
#[derive(Debug, Clone)]
pub struct CallSite {
    pub file_path: PathBuf,
    /// Message key the call refers to (`greet`).
    pub function_name: String,
    /// Byte offset where the call expression starts.
    pub offset: usize,
    /// Byte offset just past the end of the call expression.
    pub enclosing_range_end: usize,
    pub arguments: Vec<CallArgument>,
}

impl CallSite {
    /// Whether `offset` falls inside this call expression.
    pub fn covers(&self, offset: usize) -> bool {
        self.offset <= offset && offset < self.enclosing_range_end
    }

    /// Value of the named argument, if the call passes one.
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value_text.as_str())
    }
}

impl PartialEq for CallSite {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.file_path == other.file_path
    }
}

impl Eq for CallSite {}

impl Hash for CallSite {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.file_path.hash(state);
        self.offset.hash(state);
    }
}
