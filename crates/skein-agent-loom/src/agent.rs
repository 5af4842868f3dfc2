use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::Value;
use skein_contract::{
    state_without_messages, Agent, AgentError, EventStream, ExecuteRequest, ExecutionState,
    Message, MessageConverter, StateError, StateMerger, ThreadStateSnapshot, MESSAGES_KEY,
};
use skein_protocol_copilotkit::{encode, gen_run_id, Event};
use skein_thread_store::{MemoryThreadStore, ThreadStateStore};
use tracing::{debug, warn};

use crate::codec::LoomMessageConverter;
use crate::merge::DefaultStateMerger;
use crate::messages::ModelMessage;
use crate::runtime::{LoomRuntime, RunEvent, RuntimeError};

/// Backend family identifier carried in the agent descriptor.
pub const LOOM_FAMILY: &str = "loom";

/// Node names stamped on emitted events, one per driver exit.
pub const NODE_STREAM: &str = "loom_stream";
pub const NODE_COMPLETE: &str = "loom_complete";
pub const NODE_IDLE: &str = "loom_idle";
pub const NODE_ERROR: &str = "loom_error";

/// State key the final run output is recorded under.
pub const LAST_OUTPUT_KEY: &str = "last_output";

type LoomConverter = dyn MessageConverter<Native = ModelMessage>;
type LoomMerger = dyn StateMerger<Native = ModelMessage>;

/// Adapter that drives a loom engine through the sync-event protocol.
///
/// One instance serves one named agent. The thread state store is owned
/// here and written on run start and completion; reads come through
/// [`Agent::get_state`].
#[derive(Clone)]
pub struct LoomAgent {
    name: String,
    description: Option<String>,
    runtime: Arc<dyn LoomRuntime>,
    store: Arc<dyn ThreadStateStore>,
    converter: Arc<LoomConverter>,
    merger: Arc<LoomMerger>,
}

impl LoomAgent {
    /// Create an agent over the given engine with the default codec,
    /// merge policy, and an in-memory store.
    pub fn new(name: impl Into<String>, runtime: Arc<dyn LoomRuntime>) -> Self {
        Self {
            name: name.into(),
            description: None,
            runtime,
            store: Arc::new(MemoryThreadStore::new()),
            converter: Arc::new(LoomMessageConverter),
            merger: Arc::new(DefaultStateMerger),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the thread state store.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn ThreadStateStore>) -> Self {
        self.store = store;
        self
    }

    /// Replace the message converter.
    #[must_use]
    pub fn with_converter(mut self, converter: Arc<LoomConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// Replace the state merger.
    #[must_use]
    pub fn with_merger(mut self, merger: Arc<LoomMerger>) -> Self {
        self.merger = merger;
        self
    }

    // ========================================================================
    // Run driver
    // ========================================================================

    /// Convert, merge, and store the inbound request; extract what the
    /// engine run needs. Runs before any event is emitted.
    async fn prepare(&self, request: &ExecuteRequest) -> Result<RunSetup, AgentError> {
        let native = self.converter.to_native(&request.messages);

        // The run prompt is the trailing user message. Anything else,
        // including an empty prompt, means there is nothing to execute.
        let prompt = request
            .messages
            .last()
            .and_then(Message::user_text)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        // History excludes the prompt itself; a lone message means none.
        let history = if native.len() > 1 {
            Some(native[..native.len() - 1].to_vec())
        } else {
            None
        };

        let prior = match &request.state {
            Value::Null => ExecutionState::new(),
            Value::Object(map) => map.clone(),
            other => {
                return Err(StateError::NotAnObject(json_type_name(other)).into());
            }
        };

        let state = self
            .merger
            .merge(prior, &native, &request.actions, &self.name)?;
        self.store.put(&request.thread_id, state.clone()).await?;
        debug!(
            thread_id = %request.thread_id,
            agent = %self.name,
            messages = native.len(),
            "stored merged run state"
        );

        Ok(RunSetup {
            state,
            prompt,
            history,
        })
    }

    /// Record the final output, append the response message, store the
    /// final state, and build the terminal event's state view.
    async fn complete(
        &self,
        thread_id: &str,
        state: &mut ExecutionState,
        output: Value,
    ) -> Result<ExecutionState, AgentError> {
        let response = ModelMessage::text_response(output_text(&output));
        match state.get_mut(MESSAGES_KEY) {
            Some(Value::Array(items)) => match serde_json::to_value(&response) {
                Ok(value) => items.push(value),
                Err(err) => warn!(error = %err, "failed to serialize final response message"),
            },
            _ => warn!(
                thread_id = %thread_id,
                "merged state has no messages array to receive the final response"
            ),
        }
        state.insert(LAST_OUTPUT_KEY.to_string(), output);
        self.store.put(thread_id, state.clone()).await?;
        debug!(thread_id = %thread_id, agent = %self.name, "stored final run state");
        Ok(self.with_canonical_messages(state))
    }

    /// Copy of `state` with its `messages` entry reconverted to canonical
    /// form for the terminal event.
    fn with_canonical_messages(&self, state: &ExecutionState) -> ExecutionState {
        let native = decode_native_messages(state.get(MESSAGES_KEY));
        let canonical = self.converter.to_canonical(&native);
        let mut view = state.clone();
        let value = serde_json::to_value(&canonical).unwrap_or_else(|err| {
            warn!(error = %err, "failed to serialize canonical message list");
            Value::Array(Vec::new())
        });
        view.insert(MESSAGES_KEY.to_string(), value);
        view
    }

    fn sync_record(
        &self,
        thread_id: &str,
        node_name: &str,
        state: ExecutionState,
        active: bool,
        running: bool,
    ) -> String {
        let event = Event::state_sync(
            thread_id,
            gen_run_id(),
            &self.name,
            node_name,
            active,
            state,
            running,
        );
        format!("{}\n", encode(&event))
    }

    fn error_record(&self, error: &AgentError, thread_id: &str) -> String {
        let event = Event::run_error(error, thread_id, &self.name, NODE_ERROR);
        format!("{}\n", encode(&event))
    }
}

/// Everything STARTING produces for the rest of the run.
struct RunSetup {
    state: ExecutionState,
    prompt: Option<String>,
    history: Option<Vec<ModelMessage>>,
}

#[async_trait]
impl Agent for LoomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn family(&self) -> &'static str {
        LOOM_FAMILY
    }

    fn execute(&self, request: ExecuteRequest) -> EventStream {
        let agent = self.clone();
        let stream = async_stream::stream! {
            let thread_id = request.thread_id.clone();

            let RunSetup { mut state, prompt, history } = match agent.prepare(&request).await {
                Ok(setup) => setup,
                Err(err) => {
                    yield Ok(agent.error_record(&err, &thread_id));
                    yield Err(err);
                    return;
                }
            };

            // Nothing to execute: report the merged state and finish.
            let prompt = match prompt {
                Some(prompt) => prompt,
                None => {
                    yield Ok(agent.sync_record(
                        &thread_id,
                        NODE_IDLE,
                        state_without_messages(&state),
                        false,
                        false,
                    ));
                    return;
                }
            };

            let mut run = match agent.runtime.run_stream(&prompt, history).await {
                Ok(run) => run,
                Err(err) => {
                    let err = AgentError::from(err);
                    yield Ok(agent.error_record(&err, &thread_id));
                    yield Err(err);
                    return;
                }
            };

            loop {
                match run.next().await {
                    Some(Ok(RunEvent::Delta(_))) => {
                        yield Ok(agent.sync_record(
                            &thread_id,
                            NODE_STREAM,
                            state_without_messages(&state),
                            true,
                            true,
                        ));
                    }
                    Some(Ok(RunEvent::Output(output))) => {
                        match agent.complete(&thread_id, &mut state, output).await {
                            Ok(final_view) => {
                                yield Ok(agent.sync_record(
                                    &thread_id,
                                    NODE_COMPLETE,
                                    final_view,
                                    false,
                                    false,
                                ));
                            }
                            Err(err) => {
                                yield Ok(agent.error_record(&err, &thread_id));
                                yield Err(err);
                            }
                        }
                        return;
                    }
                    Some(Err(err)) => {
                        let err = AgentError::from(err);
                        yield Ok(agent.error_record(&err, &thread_id));
                        yield Err(err);
                        return;
                    }
                    None => {
                        let err = AgentError::from(RuntimeError::MissingOutput);
                        yield Ok(agent.error_record(&err, &thread_id));
                        yield Err(err);
                        return;
                    }
                }
            }
        };
        Box::pin(stream)
    }

    async fn get_state(&self, thread_id: &str) -> Result<ThreadStateSnapshot, AgentError> {
        if thread_id.is_empty() {
            return Ok(ThreadStateSnapshot::missing(""));
        }
        let Some(mut state) = self.store.get(thread_id).await? else {
            return Ok(ThreadStateSnapshot::missing(thread_id));
        };
        if state.is_empty() {
            return Ok(ThreadStateSnapshot::missing(thread_id));
        }

        let native = decode_native_messages(state.get(MESSAGES_KEY));
        let messages = self.converter.to_canonical(&native);
        state.remove(MESSAGES_KEY);

        Ok(ThreadStateSnapshot {
            thread_id: thread_id.to_string(),
            thread_exists: true,
            state,
            messages,
        })
    }
}

/// Decode the stored `messages` entry back to native messages, skipping
/// anything that does not parse. Custom mergers may store other shapes.
fn decode_native_messages(value: Option<&Value>) -> Vec<ModelMessage> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(message) => Some(message),
            Err(err) => {
                warn!(error = %err, "skipping stored entry that is not a model message");
                None
            }
        })
        .collect()
}

/// Final output as message text: strings verbatim, anything else as JSON.
fn output_text(output: &Value) -> String {
    match output {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
