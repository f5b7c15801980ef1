//! Dataset readers, result writer, and file-driven runs for jointseq.

mod domain;
mod error;
mod pipeline;
mod reader;
mod record;
mod writer;

pub use domain::{Dataset, DatasetFormat, RunName};
pub use error::IoError;
pub use pipeline::{align_files, AlignedRun};
pub use reader::DatasetReader;
pub use record::{CsvRecord, DataRecord, JsonRecord};
pub use writer::ResultWriter;
