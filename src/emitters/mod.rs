pub mod json;
pub mod script;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::table::Record;

/// Common trait for all output renderers
pub trait Emitter {
    /// Render the records as the complete output document
    fn render(&self, records: &[Record]) -> Result<String>;

    /// Render the records and write the document to `output_path` in one pass.
    ///
    /// Rendering finishes before the file is created, so a rendering failure
    /// leaves no output behind.
    fn write_to_path(&self, records: &[Record], output_path: &Path) -> Result<()> {
        let document = self.render(records)?;
        write_document(output_path, &document)
    }
}

pub(crate) fn write_document(output_path: &Path, document: &str) -> Result<()> {
    let io_err = |source: std::io::Error| ConvertError::Io {
        path: output_path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(output_path).map_err(io_err)?);
    writer.write_all(document.as_bytes()).map_err(io_err)?;
    writer.flush().map_err(io_err)
}
