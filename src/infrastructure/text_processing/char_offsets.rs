/// Converts byte offsets into char offsets for one text.
///
/// Lookups are cheapest in ascending order; a lookup behind the cursor
/// restarts the count from the beginning.
pub(crate) struct CharOffsets<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharOffsets<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    pub(crate) fn char_at(&mut self, byte: usize) -> usize {
        let byte = byte.min(self.text.len());
        if byte < self.byte {
            self.byte = 0;
            self.chars = 0;
        }

        self.chars += self.text[self.byte..]
            .char_indices()
            .take_while(|(i, _)| self.byte + i < byte)
            .count();
        self.byte = byte;
        self.chars
    }
}

/// Byte index of the `n`th char, or the text length when it has fewer chars.
pub(crate) fn byte_index_of_char(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Shrinks a byte range so it excludes surrounding whitespace.
pub(crate) fn trim_span(text: &str, start: usize, end: usize) -> (usize, usize) {
    let slice = &text[start..end];
    let leading = slice.len() - slice.trim_start().len();
    let trailing = slice.len() - slice.trim_end().len();
    if leading == slice.len() {
        return (start, start);
    }
    (start + leading, end - trailing)
}
