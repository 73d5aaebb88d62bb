//! Renders analytics records into chat-ready display strings.

use analytics::{ChatOverview, Period, TopUserStat, UserStat, WordCloud};

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

pub fn period_label(period: Period) -> &'static str {
    match period {
        Period::Today => "today",
        Period::Week => "this week",
        Period::Month => "this month",
        Period::All => "all time",
    }
}

fn rank_icon(index: usize) -> String {
    match MEDALS.get(index) {
        Some(medal) => (*medal).to_string(),
        None => format!("{}.", index + 1),
    }
}

fn message_noun(count: i64) -> &'static str {
    if count == 1 {
        "message"
    } else {
        "messages"
    }
}

fn top_user_name(user: &TopUserStat) -> String {
    match (&user.username, &user.first_name) {
        (Some(username), _) => format!("@{}", username),
        (None, Some(first_name)) => first_name.clone(),
        (None, None) => "Unknown".to_string(),
    }
}

/// Leaderboard plus totals, or a no-data notice for a silent period.
pub fn chat_overview(overview: &ChatOverview, period: Period) -> String {
    let mut text = format!("📊 Chat statistics ({})\n\n", period_label(period));

    if overview.top_users.is_empty() {
        text.push_str("No data for this period.");
        return text;
    }

    text.push_str("🏆 Most active users:\n");
    for (i, user) in overview.top_users.iter().enumerate() {
        text.push_str(&format!(
            "{} {} — {} {}\n",
            rank_icon(i),
            top_user_name(user),
            user.message_count,
            message_noun(user.message_count)
        ));
    }

    text.push_str(&format!(
        "\n📈 Totals:\n• Messages: {}\n• Participants: {}",
        overview.chat_stats.total_messages, overview.chat_stats.unique_users
    ));
    text
}

/// Personal statistics, or a notice when the user has not written yet.
pub fn user_stats(display_name: &str, stats: Option<&UserStat>, period: Period) -> String {
    let Some(stats) = stats else {
        return format!(
            "📊 Statistics for {}\n\nNo messages in this chat yet.",
            display_name
        );
    };

    format!(
        "📊 Statistics for {} ({})\n\n\
• Messages: {}\n\
• Average length: {:.1} chars\n\
• First message: {}\n\
• Last message: {}",
        display_name,
        period_label(period),
        stats.message_count,
        stats.avg_message_length,
        stats.first_message.format("%Y-%m-%d"),
        stats.last_message.format("%Y-%m-%d"),
    )
}

/// Ranked word list, or a notice when nothing survived filtering.
pub fn word_cloud(cloud: &WordCloud, period: Period) -> String {
    let mut text = format!("☁️ Word cloud ({})\n\n", period_label(period));

    if cloud.words.is_empty() {
        text.push_str("Not enough words to analyze.");
        return text;
    }

    for (i, word) in cloud.words.iter().enumerate() {
        text.push_str(&format!("{} {} — {}\n", rank_icon(i), word.word, word.count));
    }
    text.push_str(&format!("\nAnalyzed {} {}.", cloud.total_messages, message_noun(cloud.total_messages)));
    text
}
