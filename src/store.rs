//! Reads and rewrites the server document on disk.
//!
//! Whole-document persistence: every mutation writes the file back in full,
//! pretty-printed with four-space indentation. Single-operator tool, no
//! locking; concurrent invocations are last-writer-wins.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::conf::ServerDocument;
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn load(&self) -> Result<ServerDocument> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| Error::ConfigUnreadable(format!("{}: {}", self.path.display(), e)))?;
        log::debug!("read {} bytes from {}", raw.len(), self.path.display());
        serde_json::from_str(&raw)
            .map_err(|e| Error::ConfigUnreadable(format!("{}: {}", self.path.display(), e)))
    }

    pub fn save(&self, doc: &ServerDocument) -> Result<()> {
        let mut out = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, fmt);
        doc.serialize(&mut ser)
            .map_err(|e| Error::ConfigUnreadable(format!("could not serialize document: {}", e)))?;
        out.push(b'\n');
        fs::write(&self.path, &out).map_err(|e| {
            Error::ConfigUnreadable(format!("could not write {}: {}", self.path.display(), e))
        })?;
        log::debug!("wrote {} bytes to {}", out.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_unreadable() {
        let store = Store::new("/nonexistent/xray_server.json");
        assert!(matches!(store.load(), Err(Error::ConfigUnreadable(_))));
    }

    #[test]
    fn invalid_json_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xray_server.json");
        fs::write(&path, "{not json").unwrap();
        let store = Store::new(&path);
        assert!(matches!(store.load(), Err(Error::ConfigUnreadable(_))));
    }

    #[test]
    fn save_is_pretty_printed_and_reparses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xray_server.json");
        fs::write(
            &path,
            r#"{"inbounds": [{"settings": {"clients": []}}], "log": {"loglevel": "info"}}"#,
        )
        .unwrap();
        let store = Store::new(&path);
        let doc = store.load().unwrap();
        store.save(&doc).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("    \"inbounds\""));
        assert!(written.ends_with('\n'));
        let reloaded = store.load().unwrap();
        assert_eq!(
            serde_json::to_value(&reloaded).unwrap()["log"]["loglevel"],
            "info"
        );
    }
}
