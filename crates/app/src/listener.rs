//! Listener writing each payload as one JSON line

use std::io::Write;
use std::sync::Mutex;

use rotaboard_core::ResultListener;
use rotaboard_domain::WidgetPayload;
use tracing::warn;

/// Serialises every delivered payload onto `writer`, one object per line.
///
/// Write errors are logged and the payload is dropped; the rotation keeps
/// going.
pub struct JsonLinesListener<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesListener<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poison_err) => poison_err.into_inner(),
        }
    }

    fn write_line(writer: &mut W, payload: &WidgetPayload) -> std::io::Result<()> {
        serde_json::to_writer(&mut *writer, payload)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

impl<W: Write + Send> ResultListener for JsonLinesListener<W> {
    fn on_result(&self, payload: WidgetPayload) {
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poison_err) => {
                warn!("Output writer lock poisoned, recovering");
                poison_err.into_inner()
            }
        };

        if let Err(err) = Self::write_line(&mut writer, &payload) {
            warn!(error = %err, "Failed to write widget payload");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use serde_json::json;

    use super::*;

    #[test]
    fn writes_one_line_per_payload() {
        let listener = JsonLinesListener::new(Vec::new());
        listener.on_result(json!({ "widget": "build", "data": { "green": true } }));
        listener.on_result(json!({ "widget": "weather", "data": [1, 2] }));

        let output = String::from_utf8(listener.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            serde_json::from_str::<WidgetPayload>(lines[0]).unwrap(),
            json!({ "widget": "build", "data": { "green": true } })
        );
        assert_eq!(serde_json::from_str::<WidgetPayload>(lines[1]).unwrap()["widget"], "weather");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_do_not_panic() {
        let listener = JsonLinesListener::new(BrokenPipe);
        listener.on_result(json!({ "widget": "build" }));
    }
}
