use std::path::{Path, PathBuf};
use std::{fs, io};

/// Reads a text file into a `String`.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	fs::read_to_string(filename)
}

/// Builds the path of the file holding `key` inside `folder`.
///
/// Example:
/// `data` + `"previousPrompts"` + `"bin"` → `data/previousPrompts.bin`
///
/// # Errors
/// Returns `InvalidInput` if the key is empty or would escape `folder`
/// (path separators, `.` or `..`).
pub(crate) fn build_key_path<P: AsRef<Path>>(
	folder: P,
	key: &str,
	extension: &str,
) -> io::Result<PathBuf> {
	if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
		return Err(io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("Invalid store key: '{}'", key),
		));
	}

	Ok(folder.as_ref().join(format!("{}.{}", key, extension)))
}

/// Reads a whole file, returning `None` if it does not exist.
pub(crate) fn read_bytes_if_exists<P: AsRef<Path>>(path: P) -> io::Result<Option<Vec<u8>>> {
	match fs::read(path) {
		Ok(bytes) => Ok(Some(bytes)),
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
		Err(e) => Err(e),
	}
}

/// Writes `bytes` to `path` through a temporary file and a rename,
/// so readers never observe a partially written file.
pub(crate) fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> io::Result<()> {
	let path = path.as_ref();
	let tmp_path = path.with_extension("tmp");
	fs::write(&tmp_path, bytes)?;
	fs::rename(&tmp_path, path)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn key_path_uses_extension() {
		let path = build_key_path("data", "previousPrompts", "bin").unwrap();
		assert_eq!(path, Path::new("data").join("previousPrompts.bin"));
	}

	#[test]
	fn key_path_rejects_escaping_keys() {
		for key in ["", ".", "..", "../etc", "a/b", "a\\b"] {
			let err = build_key_path("data", key, "bin").unwrap_err();
			assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
		}
	}

	#[test]
	fn missing_file_reads_as_none() {
		let dir = tempfile::tempdir().unwrap();
		assert!(read_bytes_if_exists(dir.path().join("absent.bin")).unwrap().is_none());
	}

	#[test]
	fn atomic_write_replaces_content() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("value.bin");

		write_atomic(&path, b"first").unwrap();
		write_atomic(&path, b"second").unwrap();

		assert_eq!(read_bytes_if_exists(&path).unwrap(), Some(b"second".to_vec()));
		assert!(!dir.path().join("value.tmp").exists());
	}
}
