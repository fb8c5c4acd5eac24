use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::error::SinkError;

const SEPARATOR: char = ',';
const LINE_END: &str = "\r\n";

/// Quotes a field, doubling any quotes inside it.
pub fn escape_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

pub fn format_line<S: AsRef<str>>(fields: &[S]) -> String {
    let mut line = fields
        .iter()
        .map(|field| escape_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string());
    line.push_str(LINE_END);
    line
}

struct SinkState<W> {
    writer: W,
    width: Option<usize>,
    finished: bool,
}

/// CSV writer shared by every branch of a scrape.
///
/// A line is built in full before the lock is taken, so rows from concurrent
/// branches never interleave.
pub struct CsvSink<W> {
    state: Mutex<SinkState<W>>,
}

impl<W: AsyncWrite + Unpin + Send> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            state: Mutex::new(SinkState {
                writer,
                width: None,
                finished: false,
            }),
        }
    }

    pub async fn write_header<S: AsRef<str>>(&self, columns: &[S]) -> Result<(), SinkError> {
        let line = format_line(columns);
        let mut state = self.state.lock().await;
        if state.finished {
            return Err(SinkError::Finished);
        }
        if state.width.is_some() {
            return Err(SinkError::HeaderAlreadyWritten);
        }
        state.writer.write_all(line.as_bytes()).await?;
        state.width = Some(columns.len());
        Ok(())
    }

    pub async fn write_row<S: AsRef<str>>(&self, row: &[S]) -> Result<(), SinkError> {
        let line = format_line(row);
        let mut state = self.state.lock().await;
        if state.finished {
            return Err(SinkError::Finished);
        }
        match state.width {
            None => return Err(SinkError::HeaderNotWritten),
            Some(expected) if expected != row.len() => {
                return Err(SinkError::WidthMismatch {
                    expected,
                    got: row.len(),
                });
            }
            Some(_) => {}
        }
        state.writer.write_all(line.as_bytes()).await?;
        Ok(())
    }

    /// Flushes and shuts the writer down. Any later write fails.
    pub async fn finish(&self) -> Result<(), SinkError> {
        let mut state = self.state.lock().await;
        if state.finished {
            return Ok(());
        }
        state.finished = true;
        state.writer.flush().await?;
        state.writer.shutdown().await?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.state.into_inner().writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_and_keeps_delimiters_inside_quotes() {
        assert_eq!(escape_field("plain"), "\"plain\"");
        assert_eq!(escape_field("SMITH, J"), "\"SMITH, J\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field(""), "\"\"");
    }

    #[tokio::test]
    async fn writes_header_then_rows_with_crlf() {
        let sink = CsvSink::new(Vec::new());
        sink.write_header(&["a", "b"]).await.unwrap();
        sink.write_row(&["1", "x,y"]).await.unwrap();
        sink.finish().await.unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "\"a\",\"b\"\r\n\"1\",\"x,y\"\r\n");
    }

    #[tokio::test]
    async fn row_before_header_fails_fast() {
        let sink = CsvSink::new(Vec::new());
        let err = sink.write_row(&["1"]).await.unwrap_err();
        assert!(matches!(err, SinkError::HeaderNotWritten));
        assert!(sink.into_inner().is_empty());
    }

    #[tokio::test]
    async fn header_only_once() {
        let sink = CsvSink::new(Vec::new());
        sink.write_header(&["a"]).await.unwrap();
        let err = sink.write_header(&["a"]).await.unwrap_err();
        assert!(matches!(err, SinkError::HeaderAlreadyWritten));
    }

    #[tokio::test]
    async fn rejects_rows_of_the_wrong_width_and_writes_after_finish() {
        let sink = CsvSink::new(Vec::new());
        sink.write_header(&["a", "b"]).await.unwrap();
        let err = sink.write_row(&["1"]).await.unwrap_err();
        assert!(matches!(
            err,
            SinkError::WidthMismatch {
                expected: 2,
                got: 1
            }
        ));
        sink.finish().await.unwrap();
        assert!(matches!(
            sink.write_row(&["1", "2"]).await.unwrap_err(),
            SinkError::Finished
        ));
    }

    #[tokio::test]
    async fn concurrent_rows_stay_whole() {
        use futures::future::join_all;

        let sink = CsvSink::new(Vec::new());
        sink.write_header(&["n", "text"]).await.unwrap();
        join_all((0..50).map(|n| {
            let sink = &sink;
            async move {
                let row = [n.to_string(), "a long-ish field, with a comma".to_string()];
                sink.write_row(&row).await.unwrap();
            }
        }))
        .await;
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = out.split_terminator("\r\n").collect();
        assert_eq!(lines.len(), 51);
        assert!(
            lines[1..]
                .iter()
                .all(|l| l.ends_with(",\"a long-ish field, with a comma\""))
        );
    }
}
