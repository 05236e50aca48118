/// Byte offset to (line, column) conversion over recorded newline
/// offsets.
///
/// Borrows the offsets from a [`crate::ScanOutcome`] rather than
/// copying them; the scanner's vector is the single source of truth.
#[derive(Copy, Clone, Debug)]
pub struct LineMap<'a> {
    newline_offsets: &'a [u32],
}

impl<'a> LineMap<'a> {
    pub fn new(newline_offsets: &'a [u32]) -> Self {
        debug_assert!(newline_offsets.windows(2).all(|w| w[0] < w[1]));
        LineMap { newline_offsets }
    }

    /// Line and column of the byte at `offset`, both 1-based.
    ///
    /// The line is one more than the count of newline offsets at or
    /// before `offset`; the column measures from the closest such
    /// newline, with a virtual newline before the file so the first
    /// character of each line is column 1.
    pub fn origin_of(self, offset: u32) -> (u32, u32) {
        let line = self.newline_offsets.partition_point(|&at| at <= offset);
        let column = match line.checked_sub(1) {
            Some(i) => offset - self.newline_offsets[i],
            None => offset + 1,
        };
        #[expect(
            clippy::cast_possible_truncation,
            reason = "newline count is bounded by the u32 source length"
        )]
        let line = line as u32 + 1;
        (line, column)
    }

    /// Number of lines, counting the final unterminated one.
    pub fn line_count(self) -> usize {
        self.newline_offsets.len() + 1
    }
}
