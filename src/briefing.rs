//! The AI-written daily briefing block.

use chrono::NaiveDate;

use std::path::Path;

use crate::constant::NO_USER_CONTEXT;
use crate::error::GenerationError;
use crate::llm::TextGenerator;

pub struct BriefingGenerator<G> {
    generator: G,
    weather_location: String,
}

impl<G: TextGenerator> BriefingGenerator<G> {
    pub fn new(generator: G, weather_location: impl Into<String>) -> Self {
        Self {
            generator,
            weather_location: weather_location.into(),
        }
    }

    /// Asks the completion service for today's briefing and returns it as
    /// an HTML block. Any service failure is returned to the caller, which
    /// treats it as fatal.
    pub async fn generate(
        &self,
        context: &str,
        mail_digest: &str,
        today: NaiveDate,
    ) -> Result<String, GenerationError> {
        let prompt = build_prompt(today, &self.weather_location, context, mail_digest);

        let text = self.generator.run_prompt(&prompt).await.inspect_err(|e| {
            tracing::error!("Error generating content: {}", e);
        })?;
        tracing::info!("Generated briefing ({} chars)", text.len());

        Ok(render_html(&text))
    }
}

pub fn build_prompt(
    today: NaiveDate,
    weather_location: &str,
    context: &str,
    mail_digest: &str,
) -> String {
    let today = today.format("%B %d, %Y");

    format!(
        r#"It is {today}. based on my context below, give me a short, bulleted daily briefing.
Include a weather note for {weather_location}, a chess puzzle, and a specific suggestion for my fiddle or piano practice.

Also, I have included a list of my recent emails below. Please summarize them and highlight any important personal messages or action items. If there are no important emails, you can say "No important new emails".

CONTEXT:
{context}

RECENT EMAILS:
{mail_digest}
"#
    )
}

/// Wraps completion text in the briefing shell. The text is trusted and
/// only has its line breaks converted.
pub fn render_html(text: &str) -> String {
    format!(
        r#"<div id="gemini-daily-update"><h2>Daily Update</h2><p>{}</p></div>"#,
        text.replace('\n', "<br>")
    )
}

pub fn load_user_context(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(context) => context,
        Err(e) => {
            tracing::warn!("No user context at {}: {}", path.display(), e);
            NO_USER_CONTEXT.to_string()
        }
    }
}
