//! Line and column lookup for byte offsets.

/// Start offsets of every line in a source string.
#[derive(Debug)]
pub(crate) struct LineIndex<'src> {
    source: &'src str,
    starts: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(offset, _)| offset + 1))
            .collect();
        Self { source, starts }
    }

    /// 1-based line number of `offset`: one more than the number of line
    /// breaks before it.
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }

    fn line_start(&self, offset: usize) -> usize {
        self.starts[self.line_of(offset) - 1]
    }

    /// 1-based character column of `offset` within its line.
    pub fn column(&self, offset: usize) -> usize {
        self.source[self.line_start(offset)..offset].chars().count() + 1
    }

    /// The full text of the line containing `offset`, without its terminator.
    pub fn line_text(&self, offset: usize) -> &'src str {
        let line = &self.source[self.line_start(offset)..];
        let line = line.split('\n').next().unwrap_or_default();
        line.strip_suffix('\r').unwrap_or(line)
    }
}
