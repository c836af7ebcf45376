//! Message Handler module for processing incoming Telegram messages

use anyhow::{anyhow, Context, Result};
use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{FileId, ParseMode, PhotoSize};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};

use super::ui_builder::{format_help, format_prediction, format_relay_error, format_welcome};
use super::{BotContext, PredictionReply, RelayError};

/// Fallback upload name for photos, which Telegram sends without one
const PHOTO_FILE_NAME: &str = "photo.jpg";

/// Pick the highest-resolution variant of a photo by pixel area
pub fn largest_photo(photos: &[PhotoSize]) -> Option<&PhotoSize> {
    photos
        .iter()
        .max_by_key(|p| u64::from(p.width) * u64::from(p.height))
}

/// Turn a Bot API error into one that never carries the bot token
///
/// Network errors from the Bot API quote the request URL, and every Bot
/// API URL embeds the token.
fn redact_token(err: impl Display, token: &str) -> anyhow::Error {
    let message = err.to_string();
    if token.is_empty() {
        return anyhow!(message);
    }
    anyhow!(message.replace(token, "<redacted>"))
}

/// Download a Telegram file into a temporary file under `temp_dir`
///
/// Uses the bot's configured API URL. The returned guard deletes the file
/// when dropped.
pub async fn download_file(bot: &Bot, file_id: FileId, temp_dir: &Path) -> Result<NamedTempFile> {
    let file = bot
        .get_file(file_id)
        .await
        .map_err(|e| redact_token(e, bot.token()))?;

    let temp_file = NamedTempFile::new_in(temp_dir).context("Failed to create temporary file")?;
    let handle = temp_file
        .as_file()
        .try_clone()
        .context("Failed to open temporary file")?;
    let mut dst = tokio::fs::File::from_std(handle);

    bot.download_file(&file.path, &mut dst)
        .await
        .map_err(|e| redact_token(e, bot.token()))?;
    dst.flush().await.context("Failed to write temporary file")?;

    Ok(temp_file)
}

/// Download an image, send it to the prediction service and return the reply
pub async fn relay_image(
    bot: &Bot,
    ctx: &BotContext,
    file_id: FileId,
    file_name: &str,
) -> Result<PredictionReply, RelayError> {
    let temp_file = download_file(bot, file_id, &ctx.temp_dir)
        .await
        .map_err(RelayError::Download)?;
    debug!(temp_path = %temp_file.path().display(), "Image downloaded");

    let image = tokio::fs::read(temp_file.path())
        .await
        .context("Failed to read temporary file")
        .map_err(RelayError::Download)?;

    // temp_file is dropped on return, removing the image from disk
    ctx.client
        .predict(image, file_name)
        .await
        .map_err(RelayError::from)
}

async fn forward_image(
    bot: &Bot,
    ctx: &BotContext,
    chat_id: ChatId,
    file_id: FileId,
    file_name: &str,
    language_code: Option<&str>,
) -> Result<()> {
    bot.send_message(chat_id, ctx.localizer.message("processing-photo", language_code))
        .await?;

    match relay_image(bot, ctx, file_id, file_name).await {
        Ok(reply) => {
            let text = format_prediction(&reply, &ctx.localizer, language_code);
            bot.send_message(chat_id, text)
                .parse_mode(ParseMode::MarkdownV2)
                .await?;
            info!(user_id = %chat_id, "Prediction sent to user");
        }
        Err(e) => {
            error!(user_id = %chat_id, error = %e, "Prediction relay failed");
            let text = format_relay_error(&e, &ctx.localizer, language_code);
            bot.send_message(chat_id, text).await?;
        }
    }

    Ok(())
}

async fn handle_text_message(bot: &Bot, msg: &Message, ctx: &BotContext, text: &str) -> Result<()> {
    let language_code = language_code(msg);
    debug!(user_id = %msg.chat.id, message_length = text.len(), "Received text message from user");

    let command = text
        .split_whitespace()
        .next()
        .map(|word| word.split('@').next().unwrap_or(word))
        .unwrap_or_default();

    let reply = match command {
        "/start" => format_welcome(&ctx.localizer, language_code),
        "/help" => format_help(&ctx.localizer, language_code),
        _ => ctx.localizer.message("unsupported-message", language_code),
    };
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

async fn handle_photo_message(bot: &Bot, msg: &Message, ctx: &BotContext) -> Result<()> {
    let language_code = language_code(msg);
    debug!(user_id = %msg.chat.id, "Received photo message from user");

    if let Some(photo) = msg.photo().and_then(largest_photo) {
        forward_image(
            bot,
            ctx,
            msg.chat.id,
            photo.file.id.clone(),
            PHOTO_FILE_NAME,
            language_code,
        )
        .await?;
    }
    Ok(())
}

async fn handle_document_message(bot: &Bot, msg: &Message, ctx: &BotContext) -> Result<()> {
    let language_code = language_code(msg);

    if let Some(doc) = msg.document() {
        let is_image = doc
            .mime_type
            .as_ref()
            .is_some_and(|mime| mime.to_string().starts_with("image/"));

        if is_image {
            debug!(user_id = %msg.chat.id, "Received image document from user");
            let file_name = doc
                .file_name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| PHOTO_FILE_NAME.to_string());
            forward_image(bot, ctx, msg.chat.id, doc.file.id.clone(), &file_name, language_code)
                .await?;
        } else {
            debug!(user_id = %msg.chat.id, "Received non-image document from user");
            bot.send_message(
                msg.chat.id,
                ctx.localizer.message("unsupported-document", language_code),
            )
            .await?;
        }
    }
    Ok(())
}

async fn handle_unsupported_message(bot: &Bot, msg: &Message, ctx: &BotContext) -> Result<()> {
    debug!(user_id = %msg.chat.id, "Received unsupported message type from user");
    bot.send_message(
        msg.chat.id,
        ctx.localizer.message("unsupported-message", language_code(msg)),
    )
    .await?;
    Ok(())
}

fn language_code(msg: &Message) -> Option<&str> {
    msg.from
        .as_ref()
        .and_then(|user| user.language_code.as_deref())
}

pub async fn message_handler(bot: Bot, msg: Message, ctx: Arc<BotContext>) -> Result<()> {
    if let Some(text) = msg.text() {
        handle_text_message(&bot, &msg, &ctx, text).await?;
    } else if msg.photo().is_some() {
        handle_photo_message(&bot, &msg, &ctx).await?;
    } else if msg.document().is_some() {
        handle_document_message(&bot, &msg, &ctx).await?;
    } else {
        handle_unsupported_message(&bot, &msg, &ctx).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_token_removes_every_occurrence() {
        let err = anyhow!(
            "error sending request for url (http://127.0.0.1/file/bot1:ABC/a.jpg), token 1:ABC"
        );
        let redacted = redact_token(err, "1:ABC").to_string();
        assert!(!redacted.contains("1:ABC"));
        assert!(redacted.contains("/file/bot<redacted>/a.jpg"));
    }

    #[test]
    fn test_redact_token_with_empty_token_keeps_message() {
        assert_eq!(redact_token("file expired", "").to_string(), "file expired");
    }
}
