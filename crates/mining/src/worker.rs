use crate::error::{MiningError, Result};
use crate::protocol::{self, FrameEvent, ResultsFrame};
use crate::service::{BatchOutcome, Candidate, SearchOutcome, SelectorSearchService};
use async_trait::async_trait;
use push4_selectors::PixelSelector;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::time::timeout;

/// File name of the accelerated miner binary inside the miner directory.
pub const MINER_BINARY_NAME: &str = "selector_miner_cuda";

/// Deadline for one single-target invocation. Batch invocations are
/// unbounded; the worker owns its own completion there.
pub const SINGLE_SEARCH_TIMEOUT: Duration = Duration::from_secs(300);

const BATCH_REQUEST_FILE: &str = "temp_selectors.txt";

/// Process adapter for the external selector search worker.
///
/// Single mode: `<miner> <prefix> "()" 0x<target>`, answer parsed from a
/// `Function found:` line. Batch mode: `<miner> --batch <request-file>`,
/// stdout streamed through the framed results parser. The request file is
/// deleted on every exit path.
pub struct MinerWorker {
    binary: PathBuf,
    working_dir: PathBuf,
    single_timeout: Duration,
}

impl MinerWorker {
    pub fn new(miner_dir: impl AsRef<Path>) -> Self {
        let working_dir = miner_dir.as_ref().to_path_buf();
        Self {
            binary: working_dir.join(MINER_BINARY_NAME),
            working_dir,
            single_timeout: SINGLE_SEARCH_TIMEOUT,
        }
    }

    pub fn with_single_timeout(mut self, timeout: Duration) -> Self {
        self.single_timeout = timeout;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Build the miner binary if it is absent, mirroring the worker's own
    /// build flow: check for `nvcc`, then run `make` in the miner directory.
    async fn build_miner(&self) -> Result<()> {
        log::info!("miner binary missing; building in {}", self.working_dir.display());

        let nvcc = Command::new("nvcc")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;
        if !matches!(nvcc, Ok(status) if status.success()) {
            return Err(MiningError::WorkerUnavailable(
                "CUDA compiler (nvcc) not found; install the CUDA toolkit".to_string(),
            ));
        }

        let status = Command::new("make")
            .current_dir(&self.working_dir)
            .status()
            .await
            .map_err(|err| MiningError::WorkerUnavailable(format!("could not run make: {err}")))?;
        if !status.success() {
            return Err(MiningError::WorkerUnavailable(format!(
                "make exited with {status} in {}",
                self.working_dir.display()
            )));
        }
        if !self.binary.exists() {
            return Err(MiningError::WorkerUnavailable(format!(
                "build finished but {} is still missing",
                self.binary.display()
            )));
        }
        Ok(())
    }

    async fn stream_batch_output(child: &mut Child) -> Result<HashMap<String, Candidate>> {
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| MiningError::BatchProcess("failed to capture worker stdout".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| MiningError::BatchProcess("failed to capture worker stderr".into()))?;

        let parse_stdout = async {
            let mut lines = BufReader::new(stdout).lines();
            let mut frame = ResultsFrame::default();
            let mut results = HashMap::new();
            while let Ok(Some(line)) = lines.next_line().await {
                match frame.feed(&line) {
                    FrameEvent::Result(framed) => match protocol::parse_result_line(framed) {
                        Some(parsed) => {
                            let func_name = parsed
                                .signature
                                .strip_suffix("()")
                                .unwrap_or(&parsed.signature)
                                .to_string();
                            results.insert(
                                parsed.selector_hex.clone(),
                                Candidate {
                                    func_name,
                                    signature: parsed.signature,
                                    nonce: Some(parsed.nonce),
                                },
                            );
                        }
                        None => log::warn!("could not parse result line: {framed}"),
                    },
                    FrameEvent::Info(info) => log::info!("miner: {info}"),
                    FrameEvent::Marker | FrameEvent::Empty => {}
                }
            }
            results
        };

        let drain_stderr = async {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    log::warn!("miner: {line}");
                }
            }
        };

        let (results, ()) = tokio::join!(parse_stdout, drain_stderr);
        Ok(results)
    }
}

async fn remove_request_file(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            log::warn!("could not remove request file {}: {err}", path.display());
        }
    }
}

#[async_trait]
impl SelectorSearchService for MinerWorker {
    async fn ensure_ready(&self) -> Result<()> {
        if !self.binary.exists() {
            self.build_miner().await?;
        }
        Ok(())
    }

    async fn search_one(&self, prefix: &str, target: &PixelSelector) -> Result<SearchOutcome> {
        let target_hex = target.to_prefixed_hex();
        log::debug!("invoking miner for {target_hex} with prefix {prefix:?}");

        let mut command = Command::new(&self.binary);
        command
            .arg(prefix)
            .arg("()")
            .arg(&target_hex)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = timeout(self.single_timeout, command.output())
            .await
            .map_err(|_| MiningError::Timeout(self.single_timeout))??;

        // The worker multiplexes diagnostics and the answer on one stream.
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        for line in text
            .lines()
            .filter(|l| l.contains("Error") || l.contains("CUDA error"))
        {
            log::warn!("miner: {}", line.trim());
        }

        match protocol::parse_found_line(&text) {
            Some(name) => {
                // Some worker builds report only the numeric seed.
                let func_name = if name.chars().all(|c| c.is_ascii_digit()) {
                    format!("{prefix}{name}")
                } else {
                    name
                };
                let signature = format!("{func_name}()");
                Ok(SearchOutcome::Found(Candidate {
                    func_name,
                    signature,
                    nonce: None,
                }))
            }
            None if output.status.success() => Ok(SearchOutcome::NotFound),
            None => Err(MiningError::OutputParse(format!(
                "worker exited with {} and no recognizable result: {}",
                output.status,
                text.chars().take(500).collect::<String>()
            ))),
        }
    }

    async fn search_batch(&self, targets: &[PixelSelector]) -> Result<BatchOutcome> {
        let request_path = self.working_dir.join(BATCH_REQUEST_FILE);
        let mut request_lines = targets
            .iter()
            .map(PixelSelector::to_prefixed_hex)
            .collect::<Vec<_>>()
            .join("\n");
        request_lines.push('\n');

        if let Err(err) = tokio::fs::write(&request_path, request_lines).await {
            remove_request_file(&request_path).await;
            return Err(err.into());
        }

        log::info!("starting batch mining for {} selectors", targets.len());
        let spawned = Command::new(&self.binary)
            .arg("--batch")
            .arg(&request_path)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(err) => {
                remove_request_file(&request_path).await;
                return Err(err.into());
            }
        };

        let streamed = Self::stream_batch_output(&mut child).await;
        let waited = child.wait().await;
        remove_request_file(&request_path).await;

        let results = streamed?;
        let status = waited?;
        let failure = if status.success() {
            None
        } else {
            Some(format!("miner process exited with {status}"))
        };
        Ok(BatchOutcome { results, failure })
    }
}
