//! XML event source
//!
//! Drives a [`DocumentProcessor`] from a byte stream using quick-xml. Empty
//! elements are expanded into an open/close pair, text is forwarded
//! untrimmed, and end-name checking is left to the dispatcher so that an
//! out-of-order close surfaces as a truncated document rather than a parser
//! error. Declarations, comments, processing instructions and DOCTYPE are
//! skipped.

use crate::app::models::Attributes;
use crate::app::services::dispatcher::DocumentProcessor;
use crate::app::services::row_sink::RowSink;
use crate::error::{LoaderError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One XML document bound to its source path for error reporting
pub struct XmlEventSource<R: BufRead> {
    reader: Reader<R>,
    path: PathBuf,
}

impl XmlEventSource<BufReader<File>> {
    /// Open `path` with a read buffer of `buffer_bytes`
    pub fn open(path: &Path, buffer_bytes: usize) -> Result<Self> {
        let file = File::open(path).map_err(|source| LoaderError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::with_capacity(buffer_bytes, file), path))
    }
}

impl<R: BufRead> XmlEventSource<R> {
    pub fn new(input: R, path: impl Into<PathBuf>) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.trim_text(false);
        reader.expand_empty_elements(true);
        reader.check_end_names(false);
        Self {
            reader,
            path: path.into(),
        }
    }

    /// Feed every event of the document to `processor`, then finish it
    pub fn drive<S: RowSink>(&mut self, processor: &mut DocumentProcessor<S>) -> Result<()> {
        let mut buf = Vec::with_capacity(8192);
        let mut attributes = Attributes::new();

        loop {
            let event = self
                .reader
                .read_event_into(&mut buf)
                .map_err(|e| self.xml_error(e))?;

            match event {
                Event::Start(e) => {
                    self.collect_attributes(&e, &mut attributes)?;
                    let name = e.name();
                    let name = self
                        .reader
                        .decoder()
                        .decode(name.as_ref())
                        .map_err(|e| self.xml_error(e))?;
                    processor.start_element(&name, &attributes)?;
                }
                Event::End(e) => {
                    let name = e.name();
                    let name = self
                        .reader
                        .decoder()
                        .decode(name.as_ref())
                        .map_err(|e| self.xml_error(e))?;
                    processor.end_element(&name)?;
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(|e| self.xml_error(e))?;
                    processor.text(&text)?;
                }
                Event::CData(e) => {
                    let text = self
                        .reader
                        .decoder()
                        .decode(&e)
                        .map_err(|e| self.xml_error(e))?;
                    processor.text(&text)?;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        debug!(
            "Reached end of {} at byte {}",
            self.path.display(),
            self.reader.buffer_position()
        );
        processor.finish_document()
    }

    fn collect_attributes(
        &self,
        element: &BytesStart<'_>,
        attributes: &mut Attributes,
    ) -> Result<()> {
        attributes.clear();
        for attr in element.attributes() {
            let attr = attr.map_err(|e| self.xml_error(e.into()))?;
            let key = self
                .reader
                .decoder()
                .decode(attr.key.as_ref())
                .map_err(|e| self.xml_error(e))?;
            let value = attr.unescape_value().map_err(|e| self.xml_error(e))?;
            attributes.push(key.into_owned(), value.into_owned());
        }
        Ok(())
    }

    fn xml_error(&self, source: quick_xml::Error) -> LoaderError {
        LoaderError::Xml {
            path: self.path.clone(),
            position: self.reader.buffer_position(),
            source,
        }
    }
}

/// Load one file into `processor`
pub fn process_file<S: RowSink>(
    path: &Path,
    processor: &mut DocumentProcessor<S>,
    buffer_bytes: usize,
) -> Result<()> {
    info!("Loading {}", path.display());
    let rows_before = processor.stats().total_rows();

    XmlEventSource::open(path, buffer_bytes)?.drive(processor)?;

    debug!(
        "{}: {} rows written",
        path.display(),
        processor.stats().total_rows() - rows_before
    );
    Ok(())
}

/// Load one document from an in-memory or streamed reader
pub fn process_reader<R: BufRead, S: RowSink>(
    input: R,
    label: impl Into<PathBuf>,
    processor: &mut DocumentProcessor<S>,
) -> Result<()> {
    XmlEventSource::new(input, label).drive(processor)
}
