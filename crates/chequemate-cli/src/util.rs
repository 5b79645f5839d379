use std::{
    fs::File,
    io::{self, BufReader, BufWriter, StdoutLock, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;

/// Destination of a command's JSON report: stdout, or the file given by `--output`.
#[derive(Debug)]
pub enum ReportOutput {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl ReportOutput {
    /// Writes `report` as pretty JSON to `output_path`, or to stdout when it is `None`.
    pub fn emit<T>(report: &T, output_path: Option<&Path>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match output_path {
            Some(path) => Self::create(path)?,
            None => Self::Stdout(io::stdout().lock()),
        };
        output.write_report(report)
    }

    fn create(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create output file {}", path.display()))?;
        Ok(Self::File {
            writer: BufWriter::new(file),
            path: path.to_owned(),
        })
    }

    fn destination(&self) -> String {
        match self {
            Self::Stdout(_) => "stdout".to_owned(),
            Self::File { path, .. } => path.display().to_string(),
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(writer) => writer,
            Self::File { writer, .. } => writer,
        }
    }

    fn write_report<T>(&mut self, report: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let result = (|| -> io::Result<()> {
            let writer = self.writer();
            serde_json::to_writer_pretty(&mut *writer, report)?;
            writeln!(writer)?;
            writer.flush()
        })();
        result.with_context(|| format!("failed to write report to {}", self.destination()))
    }
}

/// Reads and deserializes a JSON file; `file_kind` names the file in error messages.
pub fn read_json_file<T>(file_kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("failed to open {file_kind} file {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {file_kind} file {}", path.display()))
}
