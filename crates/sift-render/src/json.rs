use serde::Serialize;
use std::io::Write;

/// Writes any serializable value as pretty-printed JSON.
///
/// Used for answer lists, batch reports, question banks, and grading items alike.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonWriter;

impl JsonWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, value)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn write_to<T: Serialize + ?Sized>(
        &self,
        writer: &mut dyn Write,
        value: &T,
    ) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, value)?;
        writeln!(writer)?;
        Ok(())
    }
}
