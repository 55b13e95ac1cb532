//! SEO scout engine: model invocation, effect execution and file export.
mod analyzer;
mod export;
mod invoker;
mod persist;
mod types;

pub use analyzer::{Analyzer, ProgressSink};
pub use export::{
    export_filename, export_records, render_delimited_text, render_spreadsheet,
    write_delimited_text, write_spreadsheet, ExportError, ExportFormat, COLUMN_WIDTHS,
    EXPORT_HEADERS, SHEET_NAME,
};
pub use invoker::{
    GeminiInvoker, Grounding, InvokerSettings, ModelInvoker, DEFAULT_API_BASE, DEFAULT_MODEL,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{InvocationFailure, ModelInvocationError};
