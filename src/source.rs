use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use elsa::FrozenVec;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(NonZeroUsize);

/// Owns the text of every loaded file so that [`Source`] can hand out borrows while still
/// accepting new files.
#[derive(Default)]
pub struct SourceBuffer(FrozenVec<String>);

impl SourceBuffer {
    pub fn new() -> Self {
        Self(FrozenVec::new())
    }
}

pub struct Source<'buf> {
    buf: &'buf SourceBuffer,
    files: Vec<SourceFile<'buf>>,
}

#[derive(Debug)]
pub struct SourceFile<'buf> {
    id: SourceId,
    path: PathBuf,
    text: &'buf str,
}

impl<'buf> Source<'buf> {
    pub fn new(buf: &'buf mut SourceBuffer) -> Self {
        // the &mut makes the borrow exclusive
        Self {
            buf: &*buf,
            files: Vec::new(),
        }
    }

    pub fn load_from_string(&mut self, path: PathBuf, text: String) -> SourceId {
        let idx = self.buf.0.len();
        let id = SourceId(NonZeroUsize::MIN.saturating_add(idx));

        let text: &'buf str = self.buf.0.push_get(text);
        self.files.push(SourceFile { id, path, text });

        id
    }

    /// Reads a file as UTF-8 text.
    pub fn load(&mut self, path: PathBuf) -> io::Result<SourceId> {
        let text = fs::read_to_string(&path)?;

        Ok(self.load_from_string(path, text))
    }

    pub fn get(&self, id: SourceId) -> Option<&SourceFile<'buf>> {
        self.files.get(usize::from(id.0) - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceFile<'buf>> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<'buf> SourceFile<'buf> {
    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &'buf str {
        self.text
    }
}
