// SPDX-License-Identifier: Apache-2.0

mod support;

use std::io;
use std::sync::{Arc, Mutex};

use deprecheck_core::model::Script;
use deprecheck_core::{CorpusIndex, DeprecationValidator, TracingSink, DIAGNOSTIC_TARGET};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(Arc::clone(&self.0))
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "lock poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn json_lines(sink: &SharedBuffer) -> Vec<serde_json::Value> {
    let bytes = sink.0.lock().expect("lock output").clone();
    let text = String::from_utf8(bytes).expect("utf8 log output");
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("json log line"))
        .collect()
}

fn message(line: &serde_json::Value) -> Option<&str> {
    line.get("fields")
        .and_then(|f| f.get("message"))
        .and_then(|v| v.as_str())
}

#[test]
fn index_build_logs_structured_summary() {
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .json()
        .with_max_level(Level::INFO)
        .finish();

    let index: CorpusIndex = tracing::subscriber::with_default(subscriber, support::mocked_index);

    let lines = json_lines(&sink);
    let built = lines
        .iter()
        .find(|l| message(l) == Some("corpus index built"))
        .expect("index summary line");
    assert_eq!(built.get("level").and_then(|v| v.as_str()), Some("INFO"));
    let fields = built.get("fields").expect("fields object");
    assert_eq!(fields.get("scripts").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(
        fields.get("fingerprint").and_then(|v| v.as_str()),
        Some(index.fingerprint())
    );
}

#[test]
fn tracing_sink_emits_error_events_on_diagnostic_target() {
    let index = support::mocked_index();
    let validator = DeprecationValidator::with_default_policy(&index);
    let script = Script {
        name: "script_case_3".to_string(),
        deprecated: true,
        tests: Vec::new(),
    };

    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .json()
        .with_max_level(Level::INFO)
        .finish();
    let ok = tracing::subscriber::with_default(subscriber, || {
        validator.is_script_deprecated_and_used(&script, &mut TracingSink)
    });
    assert!(!ok);

    let lines = json_lines(&sink);
    let warned = lines
        .iter()
        .find(|l| message(l) == Some("deprecated entity still in use"))
        .expect("validator warning");
    assert_eq!(warned.get("level").and_then(|v| v.as_str()), Some("WARN"));

    let emitted = lines
        .iter()
        .find(|l| l.get("target").and_then(|v| v.as_str()) == Some(DIAGNOSTIC_TARGET))
        .expect("diagnostic line");
    assert_eq!(emitted.get("level").and_then(|v| v.as_str()), Some("ERROR"));
    let fields = emitted.get("fields").expect("fields object");
    assert_eq!(fields.get("code").and_then(|v| v.as_str()), Some("SC107"));
    assert_eq!(
        message(emitted),
        Some("[SC107] - script_case_3 script is deprecated and being used in the following files:\nscript_2.yml")
    );
}
