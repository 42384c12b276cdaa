//! In-memory output buffer for a single render.

use std::fmt;

/// Collects everything a view writes. Handed back as a `String` only once the
/// render has completed.
#[derive(Debug, Default)]
pub struct ViewWriter {
    buffer: String,
}

impl ViewWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl fmt::Write for ViewWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    #[test]
    fn accumulates_writes() {
        let mut writer = ViewWriter::new();
        write!(writer, "Hello, {}", "World").unwrap();
        writer.write_char('!').unwrap();

        assert_eq!(writer.len(), 13);
        assert_eq!(writer.into_string(), "Hello, World!");
    }
}
