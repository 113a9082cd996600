//! The dialogue controller: filter, assemble, complete, record.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use munglog_config::AppConfig;
use munglog_core::error::Error;
use munglog_core::event::{DomainEvent, EventBus};
use munglog_core::message::Message;
use munglog_core::provider::{Provider, ProviderRequest};
use munglog_memory::{SessionMemory, Turn};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::filter::DomainFilter;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const PREVIEW_CHARS: usize = 40;

/// The outcome of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    /// `true` when the question was out of domain and `text` is the refusal.
    pub refused: bool,
}

/// Answers pet-care questions for one conversation session.
///
/// The session memory is owned by the controller; independent sessions are
/// independent controllers. Share one across tasks with `Arc`.
pub struct DialogueController {
    /// The completion client
    provider: Arc<dyn Provider>,

    /// The model to use
    model: String,

    /// Temperature setting
    temperature: f32,

    /// Max tokens per reply
    max_tokens: Option<u32>,

    /// Deadline for a single remote call
    timeout: Duration,

    filter: DomainFilter,

    /// Persona instruction sent first on every remote call
    system_prompt: String,

    /// Fixed answer for out-of-domain questions
    refusal: String,

    memory: RwLock<SessionMemory>,

    /// Serializes whole turns so appends land in call order.
    turn_gate: Mutex<()>,

    event_bus: Arc<EventBus>,
}

impl DialogueController {
    /// Create a controller with an empty session of `memory_capacity` turns.
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        filter: DomainFilter,
        memory_capacity: usize,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.3,
            max_tokens: None,
            timeout: DEFAULT_TIMEOUT,
            filter,
            system_prompt: munglog_config::DEFAULT_SYSTEM_PROMPT.into(),
            refusal: munglog_config::DEFAULT_REFUSAL.into(),
            memory: RwLock::new(SessionMemory::new(memory_capacity)),
            turn_gate: Mutex::new(()),
            event_bus: Arc::new(EventBus::default()),
        }
    }

    /// Build a controller with every knob taken from configuration.
    pub fn from_config(provider: Arc<dyn Provider>, config: &AppConfig) -> Self {
        Self::new(
            provider,
            &config.model,
            DomainFilter::from_config(&config.filter),
            config.session.capacity,
        )
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens)
        .with_timeout(Duration::from_secs(config.request_timeout_secs))
        .with_system_prompt(&config.persona.system_prompt)
        .with_refusal(&config.persona.refusal)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the max tokens per reply.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Set the deadline for a single remote call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_refusal(mut self, refusal: impl Into<String>) -> Self {
        self.refusal = refusal.into();
        self
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    /// Full message list for a remote call: persona, replayed turns, question.
    pub fn build_messages(&self, memory: &SessionMemory, question: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(memory.len() * 2 + 2);
        messages.push(Message::system(&self.system_prompt));
        messages.extend(memory.to_prompt_messages());
        messages.push(Message::user(question));
        messages
    }

    /// Answer one question.
    ///
    /// Out-of-domain questions get the refusal text, which is recorded as a
    /// turn like any other answer. A remote failure or timeout is returned
    /// as an error and nothing is recorded.
    pub async fn ask(&self, question: &str) -> Result<String, Error> {
        self.respond(question).await.map(|answer| answer.text)
    }

    /// Like [`ask`](Self::ask), but also reports whether the question was refused.
    pub async fn respond(&self, question: &str) -> Result<Answer, Error> {
        if question.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let _turn = self.turn_gate.lock().await;

        // Decide and snapshot under one guard; refusals are recorded on the spot.
        let (messages, epoch) = {
            let mut memory = self.memory.write().await;

            if !self.filter.is_valid(question, &memory) {
                memory.push(Turn::refused(question, &self.refusal));
                info!(
                    strategy = %self.filter.strategy(),
                    history = memory.len(),
                    "Question refused as out of domain"
                );
                drop(memory);

                self.event_bus.publish(DomainEvent::QuestionRefused {
                    question_preview: preview(question),
                    timestamp: Utc::now(),
                });
                return Ok(Answer {
                    text: self.refusal.clone(),
                    refused: true,
                });
            }

            (self.build_messages(&memory, question), memory.epoch())
        };

        let history_turns = (messages.len() - 2) / 2;
        debug!(
            model = %self.model,
            messages = messages.len(),
            history_turns,
            "Forwarding question to provider"
        );

        let request = ProviderRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let call = self.provider.complete(request);
        let response = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!(provider = %self.provider.name(), error = %e, "Completion call failed");
                let err = Error::from(e);
                self.publish_failure(&err);
                return Err(err);
            }
            Err(_) => {
                warn!(
                    provider = %self.provider.name(),
                    timeout_secs = self.timeout.as_secs(),
                    "Completion call timed out"
                );
                let err = Error::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                };
                self.publish_failure(&err);
                return Err(err);
            }
        };

        let answer = response.message.content;

        {
            let mut memory = self.memory.write().await;
            if memory.epoch() == epoch {
                memory.push(Turn::answered(question, &answer));
            } else {
                debug!("Session was reset during the remote call; turn not recorded");
            }
        }

        info!(
            model = %response.model,
            answer_chars = answer.chars().count(),
            history_turns,
            "Question answered"
        );

        self.event_bus.publish(DomainEvent::QuestionAnswered {
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            history_turns,
            timestamp: Utc::now(),
        });

        Ok(Answer {
            text: answer,
            refused: false,
        })
    }

    /// Forget every recorded turn.
    pub async fn reset(&self) {
        let cleared = self.memory.write().await.clear();
        info!(turns_cleared = cleared, "Session memory reset");
        self.event_bus.publish(DomainEvent::SessionReset {
            turns_cleared: cleared,
            timestamp: Utc::now(),
        });
    }

    /// Snapshot of the recorded turns, oldest first.
    pub async fn history(&self) -> Vec<Turn> {
        self.memory.read().await.turns().cloned().collect()
    }

    fn publish_failure(&self, err: &Error) {
        self.event_bus.publish(DomainEvent::RemoteCallFailed {
            error_message: err.to_string(),
            timestamp: Utc::now(),
        });
    }
}

fn preview(question: &str) -> String {
    question.chars().take(PREVIEW_CHARS).collect()
}
