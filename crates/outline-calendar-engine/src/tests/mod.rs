use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary notes directory
pub fn create_test_notes_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a note with content, creating parent folders as needed
pub fn create_test_file(notes_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = notes_dir.path().join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Read a note back for assertions
pub fn read_test_file(notes_dir: &TempDir, filename: &str) -> String {
    fs::read_to_string(notes_dir.path().join(filename)).unwrap()
}
