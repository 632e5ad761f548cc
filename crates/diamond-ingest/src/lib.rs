pub mod advanced;
pub mod columns;
pub mod join;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod team;

pub use pipeline::{ingest, ingest_files, IngestError, Ingestion, RawSources, SourcePaths};
