//! `dw files` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use dw_index::{FileIndex, FsFileIndex, IndexedFile};

use crate::error::CliError;
use crate::output::Output;

/// Length of the hash prefix shown per file.
const SHORT_HASH_LEN: usize = 12;

/// Arguments for the files command.
#[derive(Args)]
pub(crate) struct FilesArgs {
    /// Document directory to index (default: current directory).
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl FilesArgs {
    /// Execute the files command.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be indexed or stdout fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let index = FsFileIndex::scan(&self.dir)?;

        let mut stdout = std::io::stdout().lock();
        let mut failed = 0;
        for file in index.files() {
            match describe(file) {
                Ok(line) => writeln!(stdout, "{line}")?,
                Err(e) => {
                    failed += 1;
                    output.warning(&format!("{}: {e}", file.path()));
                }
            }
        }
        stdout.flush()?;

        output.info(&format!(
            "{} files in {}",
            index.files().len(),
            index.root().display()
        ));
        if failed > 0 {
            return Err(CliError::Validation(format!("{failed} files could not be read")));
        }
        Ok(())
    }
}

/// One listing line: short content hash, mime type and index path.
fn describe(file: &IndexedFile) -> Result<String, CliError> {
    let hash = file.content().hash()?;
    let mime = file.mime_type()?;
    let short = hash.get(..SHORT_HASH_LEN).unwrap_or(hash.as_str());
    Ok(format!("{short}  {mime:<24}  {}", file.path()))
}
