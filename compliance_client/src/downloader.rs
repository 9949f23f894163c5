use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use reqwest_middleware::ClientWithMiddleware;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::io::StreamReader;
use tracing::info;

use crate::endpoints::ServiceEndpoints;
use crate::error::Result;
use crate::http_client::{Api, ResponseErrorLogger};
use crate::types::{DownloadSummary, RunIdentifier};

/// Fetches the result archive of a finished run into a local directory.
#[derive(Debug, Clone)]
pub struct Downloader {
    endpoints: ServiceEndpoints,
    client: ClientWithMiddleware,
    output_dir: PathBuf,
    chunk_size: usize,
}

impl Downloader {
    pub fn new(
        endpoints: ServiceEndpoints,
        client: ClientWithMiddleware,
        output_dir: impl AsRef<Path>,
        chunk_size: usize,
    ) -> Self {
        Self {
            endpoints,
            client,
            output_dir: output_dir.as_ref().to_path_buf(),
            chunk_size: chunk_size.max(1),
        }
    }

    /// Where the archive of `run_id` is written: `<output_dir>/result_<id>.zip`.
    pub fn archive_path(&self, run_id: &RunIdentifier) -> PathBuf {
        self.output_dir.join(run_id.archive_file_name())
    }

    /// Stream the archive of `run_id` to disk. The file is only created once the service has
    /// answered with a success status; the content is not validated.
    pub async fn download(&self, run_id: &RunIdentifier) -> Result<DownloadSummary> {
        let url = self.endpoints.download_url(run_id)?;
        info!("Downloading results of run {run_id} from {url}");

        let response = self
            .client
            .get(url)
            .with_extension(Api("history-download"))
            .send()
            .await
            .process_error("history-download")?;
        let status = response.status();

        let path = self.archive_path(run_id);
        let mut file = tokio::fs::File::create(&path).await?;
        let body = response.bytes_stream().map_err(std::io::Error::other);
        let bytes_written = copy_in_chunks(body, &mut file, self.chunk_size).await?;
        file.flush().await?;

        info!("Wrote {bytes_written} bytes to {path:?}");

        Ok(DownloadSummary {
            path,
            bytes_written,
            status: status.as_u16(),
        })
    }
}

/// Copy a byte stream into `writer` through a buffer of `chunk_size` bytes, so memory use stays
/// bounded no matter how the incoming data is split. Returns the number of bytes written.
pub async fn copy_in_chunks<S, W>(stream: S, writer: &mut W, chunk_size: usize) -> Result<u64>
where
    S: Stream<Item = std::io::Result<Bytes>>,
    W: AsyncWrite + Unpin + ?Sized,
{
    let reader = StreamReader::new(stream);
    tokio::pin!(reader);

    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        writer.write_all(&buffer[..n]).await?;
        total += n as u64;
    }

    Ok(total)
}
