//! Parquet I/O for store snapshots
//!
//! # Format
//!
//! A snapshot is stored as two Parquet files:
//! - `{path}_vertices.parquet`: (`id`, `owner`, `data`, `created_at`, `live`) in id order
//! - `{path}_edges.parquet`: (`from`, `to`, `weight`, `edge_type`, `live`) in adjacency order
//!
//! Row order is significant: restoring relies on it to rebuild adjacency lists.

use super::snapshot::Snapshot;
use super::store::GraphStore;
use super::types::{CallerId, Edge, Vertex, VertexId};
use anyhow::{anyhow, Context, Result};
use arrow::array::{Array, BooleanArray, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

impl Snapshot {
    /// Write snapshot to Parquet files
    ///
    /// Creates two files:
    /// - `{path}_vertices.parquet`: vertex records
    /// - `{path}_edges.parquet`: edge records
    ///
    /// # Errors
    ///
    /// Returns error if file I/O fails or Arrow conversion fails
    #[allow(clippy::unused_async)] // Async API for future I/O operations
    pub async fn write_parquet<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let base_path = path.as_ref();

        self.write_vertices_parquet(base_path)?;
        self.write_edges_parquet(base_path)?;

        info!(
            path = %base_path.display(),
            vertices = self.vertices.len(),
            edges = self.edges.len(),
            "snapshot written"
        );
        Ok(())
    }

    /// Read snapshot from Parquet files
    ///
    /// # Errors
    ///
    /// Returns error if files don't exist or Arrow conversion fails
    #[allow(clippy::unused_async)] // Async API for future I/O operations
    pub async fn read_parquet<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref();

        Ok(Self {
            vertices: Self::read_vertices_parquet(base_path)?,
            edges: Self::read_edges_parquet(base_path)?,
        })
    }

    fn write_vertices_parquet(&self, base_path: &Path) -> Result<()> {
        let vertices_path = format!("{}_vertices.parquet", base_path.display());

        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::UInt64, false),
            Field::new("owner", DataType::Utf8, false),
            Field::new("data", DataType::Utf8, false),
            Field::new("created_at", DataType::UInt64, false),
            Field::new("live", DataType::Boolean, false),
        ]));

        let ids = UInt64Array::from_iter_values(self.vertices.iter().map(|v| v.id.0));
        let owners = StringArray::from_iter_values(self.vertices.iter().map(|v| v.owner.as_str()));
        let data = StringArray::from_iter_values(self.vertices.iter().map(|v| v.data.as_str()));
        let created = UInt64Array::from_iter_values(self.vertices.iter().map(|v| v.created_at));
        let live = BooleanArray::from(self.vertices.iter().map(|v| v.live).collect::<Vec<_>>());

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(ids),
                Arc::new(owners),
                Arc::new(data),
                Arc::new(created),
                Arc::new(live),
            ],
        )
        .context("Failed to create vertices RecordBatch")?;

        write_batch(&vertices_path, schema, &batch)
    }

    fn write_edges_parquet(&self, base_path: &Path) -> Result<()> {
        let edges_path = format!("{}_edges.parquet", base_path.display());

        let schema = Arc::new(Schema::new(vec![
            Field::new("from", DataType::UInt64, false),
            Field::new("to", DataType::UInt64, false),
            Field::new("weight", DataType::UInt64, false),
            Field::new("edge_type", DataType::Utf8, false),
            Field::new("live", DataType::Boolean, false),
        ]));

        let sources = UInt64Array::from_iter_values(self.edges.iter().map(|e| e.from.0));
        let targets = UInt64Array::from_iter_values(self.edges.iter().map(|e| e.to.0));
        let weights = UInt64Array::from_iter_values(self.edges.iter().map(|e| e.weight));
        let types = StringArray::from_iter_values(self.edges.iter().map(|e| e.edge_type.as_str()));
        let live = BooleanArray::from(self.edges.iter().map(|e| e.live).collect::<Vec<_>>());

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(sources),
                Arc::new(targets),
                Arc::new(weights),
                Arc::new(types),
                Arc::new(live),
            ],
        )
        .context("Failed to create edges RecordBatch")?;

        write_batch(&edges_path, schema, &batch)
    }

    fn read_vertices_parquet(base_path: &Path) -> Result<Vec<Vertex>> {
        let vertices_path = format!("{}_vertices.parquet", base_path.display());
        let mut vertices = Vec::new();

        for batch in read_batches(&vertices_path)? {
            let ids = column::<UInt64Array>(&batch, 0, "id")?;
            let owners = column::<StringArray>(&batch, 1, "owner")?;
            let data = column::<StringArray>(&batch, 2, "data")?;
            let created = column::<UInt64Array>(&batch, 3, "created_at")?;
            let live = column::<BooleanArray>(&batch, 4, "live")?;

            for i in 0..batch.num_rows() {
                vertices.push(Vertex {
                    id: VertexId(ids.value(i)),
                    owner: CallerId::new(owners.value(i)),
                    data: data.value(i).to_string(),
                    created_at: created.value(i),
                    live: live.value(i),
                });
            }
        }

        Ok(vertices)
    }

    fn read_edges_parquet(base_path: &Path) -> Result<Vec<Edge>> {
        let edges_path = format!("{}_edges.parquet", base_path.display());
        let mut edges = Vec::new();

        for batch in read_batches(&edges_path)? {
            let sources = column::<UInt64Array>(&batch, 0, "from")?;
            let targets = column::<UInt64Array>(&batch, 1, "to")?;
            let weights = column::<UInt64Array>(&batch, 2, "weight")?;
            let types = column::<StringArray>(&batch, 3, "edge_type")?;
            let live = column::<BooleanArray>(&batch, 4, "live")?;

            for i in 0..batch.num_rows() {
                edges.push(Edge {
                    from: VertexId(sources.value(i)),
                    to: VertexId(targets.value(i)),
                    weight: weights.value(i),
                    edge_type: types.value(i).to_string(),
                    live: live.value(i),
                });
            }
        }

        Ok(edges)
    }
}

impl GraphStore {
    /// Snapshot the store into Parquet files at `path`
    ///
    /// # Errors
    ///
    /// Returns error if file I/O fails or Arrow conversion fails
    pub async fn write_parquet<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.snapshot().write_parquet(path).await
    }

    /// Load a store with default settings from Parquet files at `path`
    ///
    /// Use [`Snapshot::read_parquet`] with
    /// [`GraphStoreBuilder::restore`](super::GraphStoreBuilder::restore) to
    /// attach a clock, sink or config.
    ///
    /// # Errors
    ///
    /// Returns error if files don't exist, Arrow conversion fails, or the
    /// records violate a store invariant
    pub async fn read_parquet<P: AsRef<Path>>(path: P) -> Result<Self> {
        let snapshot = Snapshot::read_parquet(path).await?;
        Self::builder().restore(snapshot)
    }
}

fn write_batch(path: &str, schema: Arc<Schema>, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {path}"))?;

    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::ZSTD(
            parquet::basic::ZstdLevel::try_new(3)?,
        ))
        .build();

    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    Ok(())
}

fn read_batches(path: &str) -> Result<Vec<RecordBatch>> {
    let file = File::open(path).with_context(|| format!("Failed to open {path}"))?;

    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    reader
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to read {path}"))
}

fn column<'a, T: Array + 'static>(batch: &'a RecordBatch, index: usize, name: &str) -> Result<&'a T> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| anyhow!("Invalid {name} column type"))
}
