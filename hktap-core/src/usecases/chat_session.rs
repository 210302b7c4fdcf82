use super::{
    catalog_system_prompt, create_schedule_tool, decode_schedule_tool_call, prelude::*,
};

pub const GREETING: &str = "Hello! I'm your HKTAP AI assistant. I can help you find \
information about locations in Hong Kong based on our database. How can I assist you today?";

pub const NO_RESPONSE: &str = "Sorry, I couldn't generate a response.";

/// Progress of a single turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatState {
    #[default]
    Idle,
    AwaitingModelResponse,
    ToolCallReceived,
    PlainTextReceived,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnFailure {
    // No credential for the text generation service
    Config,
    RemoteService,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Schedules,
    PlainText,
    Failed(TurnFailure),
}

#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub outcome: TurnOutcome,
    pub transcript_append: Vec<Message>,
    pub schedules_created: Vec<Schedule>,
}

/// A conversation with the assistant.
///
/// Turns must be sent one after another, the session
/// is back in [`ChatState::Idle`] after every turn.
#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Vec<Message>,
    state: ChatState,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            transcript: vec![Message::assistant(GREETING)],
            state: ChatState::Idle,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    fn transition(&mut self, state: ChatState) {
        log::debug!("Chat state: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    pub fn send_chat_turn<G, S>(
        &mut self,
        gateway: &G,
        store: &S,
        catalog: &[Location],
        user_text: &str,
    ) -> Result<ChatTurn>
    where
        G: TextGenerationGateway + ?Sized,
        S: ScheduleRepo + ?Sized,
    {
        let user_text = user_text.trim();
        if user_text.is_empty() {
            return Err(Error::EmptyMessage);
        }
        debug_assert_eq!(self.state, ChatState::Idle);
        let request = CompletionRequest {
            system_prompt: catalog_system_prompt(catalog),
            history: self.transcript.clone(),
            user_message: user_text.to_owned(),
            tools: vec![create_schedule_tool()],
        };
        let mut append = vec![Message::user(user_text)];

        self.transition(ChatState::AwaitingModelResponse);
        let (outcome, schedules_created) = match gateway.complete(&request) {
            Err(err) => {
                self.transition(ChatState::Failed);
                log::warn!("Text generation failed: {err}");
                let failure = if matches!(err, TextGenerationError::MissingCredential) {
                    TurnFailure::Config
                } else {
                    TurnFailure::RemoteService
                };
                append.push(Message::assistant(error_message(&err)));
                (TurnOutcome::Failed(failure), vec![])
            }
            Ok(completion) => self.process_completion(completion, store, &mut append),
        };

        self.transcript.extend(append.iter().cloned());
        self.transition(ChatState::Idle);
        Ok(ChatTurn {
            outcome,
            transcript_append: append,
            schedules_created,
        })
    }

    fn process_completion<S>(
        &mut self,
        completion: Completion,
        store: &S,
        append: &mut Vec<Message>,
    ) -> (TurnOutcome, Vec<Schedule>)
    where
        S: ScheduleRepo + ?Sized,
    {
        let Completion {
            content,
            tool_calls,
        } = completion;
        let content = content.filter(|c| !c.trim().is_empty());
        let drafts: Vec<_> = tool_calls
            .iter()
            .filter_map(|call| match decode_schedule_tool_call(call) {
                Ok(draft) => Some(draft),
                Err(err) => {
                    log::warn!("Skipping malformed '{}' tool call: {err}", call.name);
                    None
                }
            })
            .collect();

        if drafts.is_empty() {
            self.transition(ChatState::PlainTextReceived);
            let text = content.unwrap_or_else(|| NO_RESPONSE.to_owned());
            append.push(Message::assistant(text));
            return (TurnOutcome::PlainText, vec![]);
        }

        self.transition(ChatState::ToolCallReceived);
        if let Some(text) = content {
            append.push(Message::assistant(text));
        }
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let schedule = draft.into_schedule();
            match store.append_schedule(&schedule) {
                Ok(()) => {
                    append.push(Message::assistant(schedule_summary(&schedule)));
                    created.push(schedule);
                }
                Err(err) => {
                    log::error!("Failed to store schedule '{}': {err}", schedule.title);
                    append.push(Message::assistant(format!(
                        "Sorry, the schedule \"{}\" could not be saved.",
                        schedule.title
                    )));
                }
            }
        }
        (TurnOutcome::Schedules, created)
    }
}

fn error_message(err: &TextGenerationError) -> String {
    match err {
        TextGenerationError::MissingCredential => "Sorry, I encountered an error: \
            the assistant is not configured. Please make sure the OpenRouter API key is set."
            .to_owned(),
        err => format!("Sorry, I encountered an error: {err}. Please try again later."),
    }
}

/// Human readable listing of all events of a schedule.
pub fn schedule_summary(schedule: &Schedule) -> String {
    let n = schedule.events.len();
    let mut summary = format!(
        "Created schedule \"{}\" with {n} event{}",
        schedule.title,
        if n == 1 { "" } else { "s" }
    );
    if n > 0 {
        summary.push(':');
    }
    for (i, e) in schedule.events.iter().enumerate() {
        summary.push_str(&format!(
            "\n{}. {} at {}, {} - {}",
            i + 1,
            e.title,
            e.location,
            e.start.to_short_utc(),
            e.end.to_short_utc()
        ));
    }
    summary
}
