//! Handler that routes bot commands to the analytics service.
//!
//! Query failures never abort the chain: the user gets an error reply and
//! the details go to the log.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};

use analytics::{AnalyticsService, Period};
use storage::{Database, UserRecord};

use crate::analysis::{build_user_prompt, TextAnalyzer};
use crate::core::{Bot, Handler, HandlerResponse, Message, Result};
use crate::format;

const INTRO: &str = "Hi! I collect group chat statistics.\n\
Commands:\n\
/stats [period] — most active users and totals\n\
/mystats — your personal statistics\n\
/wordcloud [period] — most frequent words\n\
/analyze @username — describe a user from their messages\n\
Periods: today, week, month, all.";
const GROUP_ONLY: &str = "This command only works in group chats.";
const PERIOD_USAGE: &str = "Unknown period. Use: today, week, month or all.";
const ANALYZE_USAGE: &str =
    "Usage: /analyze @username, or reply to a user's message with /analyze.";
const ANALYZE_OFF: &str = "User analysis is not configured on this bot.";
const STATS_FAILED: &str = "❌ Failed to load statistics, try again later.";
const WORDCLOUD_FAILED: &str = "❌ Failed to build the word cloud, try again later.";
const LOOKUP_FAILED: &str = "❌ Failed to look up the user, try again later.";
const ANALYZE_FAILED: &str = "❌ The analysis service failed, try again later.";

const ANALYZE_MIN_MESSAGES: usize = 10;
const ANALYZE_FETCH_LIMIT: i64 = 100;

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Start,
    Stats(Option<&'a str>),
    MyStats,
    WordCloud(Option<&'a str>),
    Analyze(Option<&'a str>),
}

/// Splits `/command[@bot] [arg]` into the known commands; anything else is
/// not ours and falls through the chain.
fn parse_command(text: &str) -> Option<Command<'_>> {
    let text = text.trim();
    if !text.starts_with('/') {
        return None;
    }
    let mut parts = text.split_whitespace();
    let head = parts.next()?;
    let name = head.split('@').next().unwrap_or(head);
    let arg = parts.next();

    match name {
        "/start" => Some(Command::Start),
        "/stats" => Some(Command::Stats(arg)),
        "/mystats" => Some(Command::MyStats),
        "/wordcloud" => Some(Command::WordCloud(arg)),
        "/analyze" => Some(Command::Analyze(arg)),
        _ => None,
    }
}

/// No argument means today; a bad tag is a caller mistake answered with usage.
fn parse_period(arg: Option<&str>) -> analytics::Result<Period> {
    match arg {
        Some(tag) => tag.parse(),
        None => Ok(Period::Today),
    }
}

/// Answers `/start`, `/stats`, `/mystats`, `/wordcloud` and `/analyze`.
pub struct CommandHandler {
    service: AnalyticsService,
    db: Database,
    analyzer: Option<Arc<dyn TextAnalyzer>>,
    bot: Arc<dyn Bot>,
}

impl CommandHandler {
    pub fn new(
        service: AnalyticsService,
        db: Database,
        analyzer: Option<Arc<dyn TextAnalyzer>>,
        bot: Arc<dyn Bot>,
    ) -> Self {
        Self {
            service,
            db,
            analyzer,
            bot,
        }
    }

    async fn stats_reply(&self, chat_id: i64, arg: Option<&str>) -> String {
        let period = match parse_period(arg) {
            Ok(period) => period,
            Err(_) => return PERIOD_USAGE.to_string(),
        };
        match self.service.chat_overview(chat_id, period).await {
            Ok(overview) => format::chat_overview(&overview, period),
            Err(e) => {
                error!(error = %e, chat_id, "Chat overview failed");
                STATS_FAILED.to_string()
            }
        }
    }

    async fn my_stats_reply(&self, message: &Message) -> String {
        match self
            .service
            .user_stats(message.user.id, message.chat.id, Period::All)
            .await
        {
            Ok(stats) => {
                format::user_stats(message.user.display_name(), stats.as_ref(), Period::All)
            }
            Err(e) => {
                error!(error = %e, user_id = message.user.id, "User stats failed");
                STATS_FAILED.to_string()
            }
        }
    }

    async fn word_cloud_reply(&self, chat_id: i64, arg: Option<&str>) -> String {
        let period = match parse_period(arg) {
            Ok(period) => period,
            Err(_) => return PERIOD_USAGE.to_string(),
        };
        match self.service.word_cloud(chat_id, period).await {
            Ok(cloud) => format::word_cloud(&cloud, period),
            Err(e) => {
                error!(error = %e, chat_id, "Word cloud failed");
                WORDCLOUD_FAILED.to_string()
            }
        }
    }

    /// Resolves the analysis target from `@username` or the replied-to
    /// message's author. The error side carries the reply text.
    async fn resolve_target(
        &self,
        message: &Message,
        arg: Option<&str>,
    ) -> std::result::Result<UserRecord, String> {
        if let Some(handle) = arg.and_then(|a| a.strip_prefix('@')) {
            return match self.db.users.find_by_username(handle).await {
                Ok(Some(user)) => Ok(user),
                Ok(None) => Err(format!("I have not seen @{} in this chat yet.", handle)),
                Err(e) => {
                    error!(error = %e, handle, "Username lookup failed");
                    Err(LOOKUP_FAILED.to_string())
                }
            };
        }

        if let Some(author) = &message.reply_to_user {
            let record = UserRecord::new(
                author.id,
                author.username.clone(),
                author.first_name.clone(),
                author.last_name.clone(),
            );
            return match self.db.users.upsert(&record).await {
                Ok(()) => Ok(record),
                Err(e) => {
                    error!(error = %e, user_id = author.id, "Target upsert failed");
                    Err(LOOKUP_FAILED.to_string())
                }
            };
        }

        Err(ANALYZE_USAGE.to_string())
    }

    async fn analyze_reply(&self, message: &Message, arg: Option<&str>) -> String {
        let Some(analyzer) = self.analyzer.clone() else {
            return ANALYZE_OFF.to_string();
        };

        let target = match self.resolve_target(message, arg).await {
            Ok(user) => user,
            Err(reply) => return reply,
        };
        let name = target
            .username
            .as_ref()
            .map(|u| format!("@{}", u))
            .or_else(|| target.first_name.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        let messages = match self
            .db
            .messages
            .recent_by_user(target.telegram_id, ANALYZE_FETCH_LIMIT)
            .await
        {
            Ok(messages) => messages,
            Err(e) => {
                error!(error = %e, user_id = target.telegram_id, "Recent messages fetch failed");
                return LOOKUP_FAILED.to_string();
            }
        };
        if messages.len() < ANALYZE_MIN_MESSAGES {
            return format!(
                "Not enough data to analyze {} (need at least {} messages, have {}).",
                name,
                ANALYZE_MIN_MESSAGES,
                messages.len()
            );
        }

        let prompt = build_user_prompt(&name, &messages);
        match analyzer.analyze(&prompt).await {
            Ok(analysis) => format!(
                "🔍 Analysis of {}\n\n{}\n\nBased on {} recent messages.",
                name,
                analysis.trim(),
                messages.len()
            ),
            Err(e) => {
                error!(error = %e, user_id = target.telegram_id, "Analysis request failed");
                ANALYZE_FAILED.to_string()
            }
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(command) = parse_command(&message.content) else {
            return Ok(HandlerResponse::Continue);
        };

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            command = ?command,
            "Handling command"
        );

        let reply = match command {
            Command::Start => INTRO.to_string(),
            _ if !message.chat.is_group() => GROUP_ONLY.to_string(),
            Command::Stats(arg) => self.stats_reply(message.chat.id, arg).await,
            Command::MyStats => self.my_stats_reply(message).await,
            Command::WordCloud(arg) => self.word_cloud_reply(message.chat.id, arg).await,
            Command::Analyze(arg) => self.analyze_reply(message, arg).await,
        };

        self.bot.reply_to(message, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands_with_arguments() {
        assert_eq!(parse_command("/start"), Some(Command::Start));
        assert_eq!(parse_command("/stats week"), Some(Command::Stats(Some("week"))));
        assert_eq!(parse_command("/stats"), Some(Command::Stats(None)));
        assert_eq!(parse_command("/mystats"), Some(Command::MyStats));
        assert_eq!(
            parse_command("/wordcloud month"),
            Some(Command::WordCloud(Some("month")))
        );
        assert_eq!(
            parse_command("/analyze @anna"),
            Some(Command::Analyze(Some("@anna")))
        );
    }

    #[test]
    fn strips_bot_mention_from_command_name() {
        assert_eq!(
            parse_command("/stats@statbot week"),
            Some(Command::Stats(Some("week")))
        );
    }

    #[test]
    fn ignores_plain_text_and_unknown_commands() {
        assert_eq!(parse_command("hello there"), None);
        assert_eq!(parse_command("/weather"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn period_defaults_to_today() {
        assert_eq!(parse_period(None).unwrap(), Period::Today);
        assert_eq!(parse_period(Some("all")).unwrap(), Period::All);
        assert!(parse_period(Some("fortnight")).is_err());
    }
}
