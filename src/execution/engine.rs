use std::time::{Duration, Instant};

use chrono::Utc;
use serde_json::{Map, Value};
use sqlx::SqlitePool;

use super::{Outcome, audit, normalize, request};
use crate::config::Config;
use crate::db;
use crate::db::execution_log::NewExecutionLog;
use crate::error::AppError;
use crate::models::{ExecutionStatus, HttpMethod};

/// Executes button invocations against their target endpoints.
///
/// Owns the process-wide outbound HTTP client; the client's connection pool
/// is shared across all invocations and its connect/total timeouts are the
/// only cancellation mechanism. Invocations are otherwise independent.
pub struct Executor {
    client: reqwest::Client,
}

impl Executor {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .build()
                .expect("Failed to build outbound HTTP client"),
        }
    }

    /// Run one invocation attempt.
    ///
    /// Every path that gets past the lookup writes exactly one execution
    /// log row at the single join point at the bottom — including preview
    /// invocations and the inactive rejection. An unknown id is the one
    /// hard error with no record, since there is no button to attach it to.
    pub async fn execute(
        &self,
        pool: &SqlitePool,
        button_id: i64,
        input_parameters: Option<Map<String, Value>>,
        is_preview: bool,
        caller: &str,
    ) -> Result<Outcome, AppError> {
        let started = Instant::now();

        let button = db::buttons::find_by_id(pool, button_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Button not found with id: {button_id}")))?;

        let action = button.action_descriptor();

        if !button.active {
            audit::record(
                pool,
                NewExecutionLog {
                    button_id: button.id,
                    executed_by: caller,
                    action: &action,
                    request_payload: None,
                    response_data: None,
                    status: ExecutionStatus::Failure,
                    error_message: Some("Button is inactive"),
                    execution_time_ms: elapsed_ms(started),
                },
            )
            .await;
            return Err(AppError::Conflict("Button is inactive".to_string()));
        }

        // Capture the effective input before dispatch so the attempt is
        // recorded even when the call itself fails.
        let input = input_parameters.unwrap_or_default();
        let request_payload =
            serde_json::to_string(&input).unwrap_or_else(|_| String::from("{}"));
        let outbound = request::build(&button, &input);

        let attempt = self.dispatch(outbound).await;
        let execution_time_ms = elapsed_ms(started);

        let (outcome, status, response_data, error_message) = match attempt {
            Ok((code, body)) => {
                let success = code.is_success();
                let error_message = (!success).then(|| {
                    format!(
                        "HTTP {}: {}",
                        code.as_u16(),
                        code.canonical_reason().unwrap_or("Unknown")
                    )
                });

                // Preview computes the same outcome but must leave the
                // definition untouched.
                if !is_preview {
                    if let Err(e) =
                        db::buttons::touch_last_executed(pool, button.id, Utc::now()).await
                    {
                        tracing::error!(
                            "Failed to update last_executed_at for button {}: {e}",
                            button.id
                        );
                    }
                }

                let outcome = Outcome {
                    success,
                    message: if success {
                        "Execution successful".to_string()
                    } else {
                        "Execution failed".to_string()
                    },
                    data: normalize::normalize(button.output_format, &body),
                    status_code: Some(code.as_u16()),
                    execution_time_ms,
                };
                let status = if success {
                    ExecutionStatus::Success
                } else {
                    ExecutionStatus::Failure
                };
                (outcome, status, Some(body), error_message)
            }
            Err(e) => {
                tracing::error!("Error executing button {}: {e}", button.id);
                let status = if e.is_timeout() {
                    ExecutionStatus::Timeout
                } else {
                    ExecutionStatus::Failure
                };
                let outcome = Outcome {
                    success: false,
                    message: format!("Execution failed: {e}"),
                    data: Value::Null,
                    status_code: None,
                    execution_time_ms,
                };
                (outcome, status, None, Some(e.to_string()))
            }
        };

        audit::record(
            pool,
            NewExecutionLog {
                button_id: button.id,
                executed_by: caller,
                action: &action,
                request_payload: Some(&request_payload),
                response_data: response_data.as_deref(),
                status,
                error_message: error_message.as_deref(),
                execution_time_ms,
            },
        )
        .await;

        Ok(outcome)
    }

    async fn dispatch(
        &self,
        outbound: request::OutboundRequest,
    ) -> Result<(reqwest::StatusCode, String), reqwest::Error> {
        let mut req = match outbound.method {
            HttpMethod::Get => self.client.get(&outbound.url),
            HttpMethod::Post => self.client.post(&outbound.url),
            HttpMethod::Put => self.client.put(&outbound.url),
            HttpMethod::Delete => self.client.delete(&outbound.url),
        };

        for (name, value) in &outbound.headers {
            req = req.header(name, value);
        }

        if let Some(body) = &outbound.body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Ok((status, body))
    }
}

fn elapsed_ms(started: Instant) -> i64 {
    i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX)
}
