//! Shared output helpers for the driver binaries.

use std::{ fs, path::Path };
use anyhow::Context;

/// Create the parent directory of `path` if it doesn't already exist.
pub fn mkdir_parent(path: &Path) -> anyhow::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir)
                .with_context(|| format!("couldn't create {}", dir.display()))
        },
        _ => Ok(()),
    }
}

/// Write a set of named arrays to an uncompressed `.npz` archive, creating
/// parent directories as needed.
///
/// Expands to an expression of type `anyhow::Result<()>`.
macro_rules! write_npz {
    (
        $path:expr,
        arrays: { $( $name:expr => $arr:expr ),+ $(,)? } $(,)?
    ) => {
        (|| -> anyhow::Result<()> {
            use anyhow::Context;
            let path: &std::path::Path = $path.as_ref();
            $crate::output::mkdir_parent(path)?;
            let file
                = std::fs::File::create(path)
                .with_context(|| format!("couldn't create {}", path.display()))?;
            let mut npz = ndarray_npy::NpzWriter::new(file);
            $(
                npz.add_array($name, $arr)
                    .with_context(|| format!("couldn't write array {:?}", $name))?;
            )+
            npz.finish()
                .with_context(|| format!("couldn't finish {}", path.display()))?;
            Ok(())
        })()
    }
}
pub(crate) use write_npz;
