use crate::error::StreamError;

/// Tab stops are every four columns.
pub const TAB_STOP: usize = 4;

/// Reassembles byte chunks into complete, tab-expanded lines.
///
/// Chunk boundaries may fall anywhere, including inside a multi-byte
/// character. Everything up to the last `\n` of the buffered bytes is
/// decoded and split; the remainder waits for the next chunk.
#[derive(Debug, Default, Clone)]
pub struct LineAssembler {
    pending: Vec<u8>,
    /// Bytes already decoded, for error offsets.
    decoded: usize,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes received after the last line terminator.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Adds a chunk and returns the lines it completed.
    ///
    /// On a decode error nothing is consumed: the pending bytes are exactly
    /// what they were before the call. The unterminated tail is checked too;
    /// only a character cut off at the very end of the chunk may stay
    /// incomplete.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<String>, StreamError> {
        let Some(last_newline) = chunk.iter().rposition(|&b| b == b'\n') else {
            let kept = self.pending.len();
            self.pending.extend_from_slice(chunk);
            if let Err(e) = check_partial(&self.pending, self.decoded) {
                self.pending.truncate(kept);
                return Err(e);
            }
            return Ok(Vec::new());
        };
        let (head, tail) = chunk.split_at(last_newline + 1);

        let mut ready = Vec::with_capacity(self.pending.len() + head.len());
        ready.extend_from_slice(&self.pending);
        ready.extend_from_slice(head);
        let text = self.decode(&ready)?;
        check_partial(tail, self.decoded + ready.len())?;
        let lines = text.lines().map(expand_tabs).collect();

        self.decoded += ready.len();
        self.pending.clear();
        self.pending.extend_from_slice(tail);
        Ok(lines)
    }

    /// End of input: returns the unterminated tail as a final line.
    pub fn finish(&mut self) -> Result<Option<String>, StreamError> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        let text = self.decode(&self.pending)?;
        let line = expand_tabs(text);
        self.decoded += self.pending.len();
        self.pending.clear();
        Ok(Some(line))
    }

    /// Forgets any buffered partial line.
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<&'a str, StreamError> {
        std::str::from_utf8(bytes).map_err(|source| StreamError::Decode {
            offset: self.decoded + source.valid_up_to(),
            source,
        })
    }
}

/// Accepts bytes that are valid UTF-8 apart from a truncated final character.
/// `base` is the stream offset of `bytes[0]`.
fn check_partial(bytes: &[u8], base: usize) -> Result<(), StreamError> {
    match std::str::from_utf8(bytes) {
        Err(source) if source.error_len().is_some() => Err(StreamError::Decode {
            offset: base + source.valid_up_to(),
            source,
        }),
        _ => Ok(()),
    }
}

/// Replaces each tab with spaces up to the next multiple of [`TAB_STOP`],
/// counting columns in characters of the already-expanded line.
pub fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + TAB_STOP);
    let mut column = 0usize;
    for c in line.chars() {
        if c == '\t' {
            let fill = TAB_STOP - column % TAB_STOP;
            out.extend(std::iter::repeat_n(' ', fill));
            column += fill;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}
