//! Chat transcript state and the question/answer round trip.

use runtime::{names, EventBus, Metrics};
use serde::Serialize;
use streaming::AskRequest;

use crate::backend::ChatApi;
use crate::error::ClientError;

/// Shown in place of a reply when the backend call fails.
pub const APOLOGY: &str = "Sorry, an error occurred. Please try again later.";

/// Placeholder while a reply is pending.
pub const TYPING_TEXT: &str = "Typing...";

/// Canned questions offered as one-click buttons.
pub const EXAMPLE_QUESTIONS: [&str; 4] = [
    "How is my field doing this week?",
    "Which areas show poor growth?",
    "Will it rain in the next few days?",
    "When should I apply fertilizer?",
];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    /// Text split on line breaks, one entry per rendered line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// Farm and date attached to every question, when known.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChatContext {
    pub farm_id: Option<String>,
    pub date: Option<String>,
}

/// How a chat request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    /// Blank input; nothing was sent.
    Ignored,
    Answered,
    /// The apology was shown instead of a reply.
    Failed(ClientError),
}

/// Transcript, input buffer and typing indicator of the chat page.
pub struct ChatWidget<C> {
    api: C,
    messages: Vec<ChatMessage>,
    input: String,
    typing: bool,
    context: ChatContext,
    events: EventBus,
    metrics: Metrics,
}

impl<C: ChatApi> ChatWidget<C> {
    pub fn new(api: C) -> Self {
        Self {
            api,
            messages: Vec::new(),
            input: String::new(),
            typing: false,
            context: ChatContext::default(),
            events: EventBus::new(),
            metrics: Metrics::new(),
        }
    }

    pub fn with_context(mut self, context: ChatContext) -> Self {
        self.context = context;
        self
    }

    /// Sends `input` as a question and appends the reply.
    pub async fn submit(&mut self, input: &str) -> ChatReply {
        let Some(request) = self.begin_question(input) else {
            return ChatReply::Ignored;
        };
        let result = self.api.ask(request).await.map(|r| r.response);
        self.finish(result)
    }

    /// Submits whatever is in the input buffer.
    pub async fn submit_input(&mut self) -> ChatReply {
        let input = std::mem::take(&mut self.input);
        self.submit(&input).await
    }

    /// Records the user's question and raises the typing indicator.
    ///
    /// Returns `None` for blank input, in which case nothing changes.
    pub fn begin_question(&mut self, input: &str) -> Option<AskRequest> {
        let question = input.trim();
        if question.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::user(question));
        self.input.clear();
        self.typing = true;
        self.metrics.inc(names::CHAT_QUESTIONS);
        Some(AskRequest {
            question: question.to_string(),
            farm_id: self.context.farm_id.clone(),
            date: self.context.date.clone(),
        })
    }

    /// Lowers the typing indicator and appends the reply or the apology.
    pub fn finish(&mut self, result: Result<String, ClientError>) -> ChatReply {
        self.typing = false;
        match result {
            Ok(text) => {
                self.messages.push(ChatMessage::bot(text));
                ChatReply::Answered
            }
            Err(err) => {
                self.metrics.inc(names::CHAT_FAILURES);
                self.events
                    .error("chat.ask", format!("chat request failed: {err}"));
                self.messages.push(ChatMessage::bot(APOLOGY));
                ChatReply::Failed(err)
            }
        }
    }

    /// Example button: fills the input buffer without sending.
    pub fn use_example(&mut self, question: &str) {
        self.input = question.to_string();
    }

    pub async fn request_weather(&mut self, farm_id: &str) -> ChatReply {
        self.typing = true;
        let result = self.api.weather(farm_id.to_string()).await.map(|r| r.advice);
        self.finish(result)
    }

    pub async fn request_farm_advice(&mut self, farm_id: &str, date: Option<&str>) -> ChatReply {
        self.typing = true;
        let result = self
            .api
            .farm_advice(farm_id.to_string(), date.map(str::to_string))
            .await
            .map(|r| r.advice);
        self.finish(result)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn context(&self) -> &ChatContext {
        &self.context
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatContext, ChatMessage, ChatReply, ChatWidget, Sender, APOLOGY};
    use crate::testing::FakeBackend;
    use pretty_assertions::assert_eq;
    use runtime::names;
    use streaming::AskRequest;

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let api = FakeBackend::new().with_answer("hi");
        let mut chat = ChatWidget::new(api.clone());

        assert_eq!(chat.submit("   \n\t").await, ChatReply::Ignored);
        assert_eq!(chat.submit("").await, ChatReply::Ignored);
        assert!(chat.messages().is_empty());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn question_and_reply_are_appended() {
        let api = FakeBackend::new().with_answer("Growth looks good.\nKeep watering.");
        let mut chat = ChatWidget::new(api.clone());

        assert_eq!(chat.submit("  How is my field?  ").await, ChatReply::Answered);
        assert_eq!(
            chat.messages(),
            &[
                ChatMessage::user("How is my field?"),
                ChatMessage::bot("Growth looks good.\nKeep watering."),
            ]
        );
        assert!(!chat.is_typing());
        let lines: Vec<_> = chat.messages()[1].lines().collect();
        assert_eq!(lines, vec!["Growth looks good.", "Keep watering."]);
        assert_eq!(api.asked(), vec![AskRequest::new("How is my field?")]);
        assert_eq!(chat.metrics().counter(names::CHAT_QUESTIONS), 1);
    }

    #[tokio::test]
    async fn failure_shows_apology() {
        let mut chat = ChatWidget::new(FakeBackend::new());

        let reply = chat.submit("Will it rain?").await;
        assert!(matches!(reply, ChatReply::Failed(_)));
        let last = chat.last_message().expect("apology");
        assert_eq!(last.sender, Sender::Bot);
        assert_eq!(last.text, APOLOGY);
        assert!(!chat.is_typing());
        assert!(chat.events().errors().any(|e| e.kind == "chat.ask"));
    }

    #[test]
    fn typing_indicator_spans_the_request() {
        let mut chat = ChatWidget::new(FakeBackend::new());
        let request = chat.begin_question("hello").expect("request");
        assert_eq!(request.question, "hello");
        assert!(chat.is_typing());

        chat.finish(Ok("hi there".to_string()));
        assert!(!chat.is_typing());
        assert_eq!(chat.messages().len(), 2);
    }

    #[tokio::test]
    async fn context_is_attached_to_questions() {
        let api = FakeBackend::new().with_answer("ok");
        let mut chat = ChatWidget::new(api.clone()).with_context(ChatContext {
            farm_id: Some("7".to_string()),
            date: Some("20240315".to_string()),
        });
        chat.submit("status?").await;

        let asked = api.asked();
        assert_eq!(asked[0].farm_id.as_deref(), Some("7"));
        assert_eq!(asked[0].date.as_deref(), Some("20240315"));
    }

    #[tokio::test]
    async fn example_fills_input_until_submitted() {
        let api = FakeBackend::new().with_answer("ok");
        let mut chat = ChatWidget::new(api.clone());

        chat.use_example(super::EXAMPLE_QUESTIONS[1]);
        assert_eq!(chat.input(), super::EXAMPLE_QUESTIONS[1]);
        assert!(api.calls().is_empty());

        chat.submit_input().await;
        assert_eq!(chat.input(), "");
        assert_eq!(chat.messages()[0].text, super::EXAMPLE_QUESTIONS[1]);
    }

    #[tokio::test]
    async fn advice_requests_append_bot_messages() {
        let api = FakeBackend::new().with_advice("Sunny, 24C.");
        let mut chat = ChatWidget::new(api.clone());

        assert_eq!(chat.request_weather("3").await, ChatReply::Answered);
        assert_eq!(
            chat.request_farm_advice("3", Some("20240315")).await,
            ChatReply::Answered
        );
        assert_eq!(
            chat.messages(),
            &[ChatMessage::bot("Sunny, 24C."), ChatMessage::bot("Sunny, 24C.")]
        );
        assert_eq!(
            api.calls(),
            vec!["/chatbot/weather?farm_id=3", "/chatbot/farm/3/advice"]
        );
    }
}
