/// Incremental parser for `text/event-stream` payloads. Chunks from the
/// network can split anywhere, including inside a multi-byte code point,
/// so the parser buffers raw bytes across `push` calls, decodes only
/// complete lines, and dispatches on the blank line that terminates a
/// frame.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: Vec<u8>,
    event: String,
    data: Vec<String>,
}

/// One dispatched server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// Event name; "message" when the frame carried no `event:` field.
    pub event: String,
    pub data: String,
}

impl SseParser {
    /// Feed a chunk of stream bytes, returning every frame it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        // UTF-8 continuation bytes are all >= 0x80, so a raw b'\n' is
        // always a real line break and never the tail of a code point
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line);
            if let Some(frame) = self.handle_line(line.trim_end_matches(['\n', '\r'])) {
                frames.push(frame);
            }
        }
        frames
    }

    fn handle_line(&mut self, line: &str) -> Option<SseFrame> {
        if line.is_empty() {
            return self.dispatch();
        }
        // Lines starting with ':' are comments (keep-alive pings)
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event = value.to_string(),
            "data" => self.data.push(value.to_string()),
            // "id" and "retry" are not used by the alert feed
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseFrame> {
        if self.data.is_empty() {
            self.event.clear();
            return None;
        }
        let frame = SseFrame {
            event: if self.event.is_empty() {
                "message".to_string()
            } else {
                std::mem::take(&mut self.event)
            },
            data: self.data.join("\n"),
        };
        self.event.clear();
        self.data.clear();
        Some(frame)
    }
}
