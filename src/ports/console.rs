//! Console interaction port
//!
//! Renders prompts as plain text lines and reads answers one line at a time.
//! Any async reader/writer pair works; [`ConsolePort::stdio`] binds the process
//! standard streams.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::ConsoleConfig;
use crate::flow::InteractionPort;
use crate::utils::errors::{StepFlowError, Result};

struct ConsoleIo<R, W> {
    reader: BufReader<R>,
    writer: W,
}

/// Line-oriented interaction port
pub struct ConsolePort<R, W> {
    io: Mutex<ConsoleIo<R, W>>,
    config: ConsoleConfig,
}

impl ConsolePort<tokio::io::Stdin, tokio::io::Stdout> {
    /// Port over the process stdin/stdout
    pub fn stdio(config: ConsoleConfig) -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout(), config)
    }
}

impl<R, W> ConsolePort<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W, config: ConsoleConfig) -> Self {
        Self {
            io: Mutex::new(ConsoleIo {
                reader: BufReader::new(reader),
                writer,
            }),
            config,
        }
    }

    /// Give back the underlying reader and writer
    pub fn into_parts(self) -> (R, W) {
        let io = self.io.into_inner();
        (io.reader.into_inner(), io.writer)
    }

    async fn ask(&self, question: &str, default: &str) -> Result<String> {
        let mut io = self.io.lock().await;

        let mut text = question.to_string();
        if !default.is_empty() {
            text.push_str(&format!(" [{}]", default));
        }
        text.push('\n');
        text.push_str(&self.config.prompt_marker);
        io.writer.write_all(text.as_bytes()).await?;
        io.writer.flush().await?;

        let line = read_line(&mut io.reader)
            .await?
            .ok_or_else(|| StepFlowError::Interaction("input stream closed".to_string()))?;

        if line.is_empty() {
            debug!("Empty answer, using default");
            Ok(default.to_string())
        } else {
            Ok(line)
        }
    }
}

/// Read one line without its terminator; `None` at end of input
async fn read_line<R: AsyncRead + Unpin>(reader: &mut BufReader<R>) -> Result<Option<String>> {
    let mut line = String::new();
    let read = reader.read_line(&mut line).await?;
    if read == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

#[async_trait]
impl<R, W> InteractionPort for ConsolePort<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn notify(&self, message: &str) -> Result<()> {
        let mut io = self.io.lock().await;
        io.writer.write_all(format!("{}\n", message).as_bytes()).await?;

        if self.config.acknowledge_alerts {
            io.writer
                .write_all(format!("(press Enter to continue)\n{}", self.config.prompt_marker).as_bytes())
                .await?;
            io.writer.flush().await?;
            // End of input acknowledges as well
            read_line(&mut io.reader).await?;
        } else {
            io.writer.flush().await?;
        }

        Ok(())
    }

    async fn prompt_text(&self, message: &str, default: &str) -> Result<String> {
        self.ask(message, default).await
    }

    async fn prompt_choice(&self, message: &str, options: &[String], default: &str) -> Result<String> {
        let question = if options.is_empty() {
            message.to_string()
        } else {
            format!("{} ({})", message, options.join(", "))
        };
        self.ask(&question, default).await
    }
}
