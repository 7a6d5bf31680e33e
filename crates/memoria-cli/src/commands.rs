use std::sync::Arc;
use std::time::Duration;

use eyre::{Result, bail, eyre};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use memoria_backend::{BackendConfig, HttpBackend, VoiceBackend};
use memoria_chat::{ConversationSession, PlaybackOutcome, SendOutcome, SendRejection};
use memoria_cli::config::{self, MemoriaConfig};
use memoria_cli::input::audio_content_type;
use memoria_cli::sink::TerminalSink;
use memoria_core::error::ErrorKind;
use memoria_core::models::memorial::VoiceStatus;
use memoria_core::models::message::ConversationMessage;
use memoria_core::models::training::{Memory, PersonalityTrait};
use memoria_core::models::viewer::{Viewer, ViewerRole};
use memoria_memorials::{TrainingBatch, VoiceMemorialRegistry, VoiceSetup, load_profile};
use memoria_policy::lifecycle::MemorialPhase;
use memoria_policy::{ProfileState, VoiceLifecycle, VoiceProfile, access, progress};
use memoria_storage::{FileStore, TranscriptStore};

use crate::{Cli, Command, Overrides};

/// Everything a command needs once flags and the config file are merged.
struct Context {
    config: MemoriaConfig,
    session: String,
}

impl Context {
    fn resolve(overrides: &Overrides, session: String) -> Result<Self> {
        let mut config = match (config::load_config()?, &overrides.api_url) {
            (Some(config), _) => config,
            (None, Some(url)) => MemoriaConfig::new(url.clone()),
            (None, None) => bail!("no config found; run `memoria configure --api-url <URL>` first"),
        };
        apply_overrides(&mut config, overrides);
        Ok(Self { config, session })
    }

    fn viewer(&self) -> Viewer {
        self.config.viewer()
    }

    fn user_id(&self) -> Result<&str> {
        self.config
            .signed_in_user()
            .ok_or_else(|| eyre!("this command needs a signed-in user; pass --user or set MEMORIA_USER_ID"))
    }

    fn backend(&self) -> Result<Arc<dyn VoiceBackend>> {
        let backend = HttpBackend::new(BackendConfig {
            base_url: self.config.api_base_url.clone(),
            auth_token: self.config.auth_token.clone(),
            timeout: Duration::from_secs(self.config.request_timeout_secs),
        })?;
        Ok(Arc::new(backend))
    }

    fn store(&self) -> Result<Arc<dyn TranscriptStore>> {
        Ok(Arc::new(FileStore::new(config::session_dir(&self.session)?)))
    }
}

fn apply_overrides(config: &mut MemoriaConfig, overrides: &Overrides) {
    if let Some(url) = &overrides.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(user) = &overrides.user_id {
        config.user_id = Some(user.clone());
    }
    if let Some(token) = &overrides.token {
        config.auth_token = Some(token.clone());
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let Cli {
        overrides,
        session,
        command,
        ..
    } = cli;

    // Everything but `configure` needs a usable config.
    let ctx = || Context::resolve(&overrides, session.clone());

    match command {
        Command::Configure {
            role,
            timeout,
            show,
        } => configure(&overrides, role, timeout, show),
        Command::Memorials => memorials(&ctx()?).await,
        Command::Status { tribute } => status(&ctx()?, &tribute).await,
        Command::Upload {
            tribute,
            file,
            duration,
            content_type,
            replace,
        } => {
            let content_type = content_type.unwrap_or_else(|| audio_content_type(&file).to_string());
            let audio = tokio::fs::read(&file)
                .await
                .map_err(|e| eyre!("failed to read {}: {e}", file.display()))?;
            upload(&ctx()?, &tribute, audio, &content_type, duration, replace).await
        }
        Command::Train {
            tribute,
            stories,
            traits,
        } => train(&ctx()?, &tribute, stories, traits).await,
        Command::Chat {
            tribute,
            message,
            owner,
        } => chat(&ctx()?, &tribute, message, owner).await,
        Command::Clear { tribute } => {
            ctx()?.store()?.clear(&tribute)?;
            println!("Conversation with {tribute} cleared.");
            Ok(())
        }
    }
}

fn configure(
    overrides: &Overrides,
    role: Option<ViewerRole>,
    timeout: Option<u64>,
    show: bool,
) -> Result<()> {
    let existing = config::load_config()?;

    if show {
        let config = existing.ok_or_else(|| eyre!("no config found"))?;
        println!("{}", serde_json::to_string_pretty(&config::config_info(&config))?);
        return Ok(());
    }

    let mut config = match (existing, &overrides.api_url) {
        (Some(config), _) => config,
        (None, Some(url)) => MemoriaConfig::new(url.clone()),
        (None, None) => bail!("--api-url is required for the first configure"),
    };
    apply_overrides(&mut config, overrides);
    if let Some(role) = role {
        config.role = role;
    }
    if let Some(timeout) = timeout {
        config.request_timeout_secs = timeout;
    }

    let path = config::save_config(&config)?;
    println!("Saved {}", path.display());
    Ok(())
}

async fn memorials(ctx: &Context) -> Result<()> {
    let user_id = ctx.user_id()?;
    let registry = VoiceMemorialRegistry::new(ctx.backend()?);
    let overview = registry.overview(user_id).await.map_err(|e| {
        eyre!("{} ({e})", e.error_kind().user_message())
    })?;

    if overview.memorials.is_empty() {
        println!("No voice memorials yet.");
    } else {
        println!("Voice memorials:");
        for m in &overview.memorials {
            let phase = MemorialPhase::of(m);
            println!(
                "  {:<24} {:<14} {} stories, {} traits{}",
                m.tribute_name.as_deref().unwrap_or(&m.tribute_id),
                m.voice_status.as_str(),
                m.memory_count,
                m.trait_count,
                if phase.chat_enabled { ", chat on" } else { "" },
            );
        }
    }

    if !overview.available.is_empty() {
        println!("Tributes without a memorial:");
        for t in &overview.available {
            println!("  {:<24} {}", t.id, t.name);
        }
    }
    Ok(())
}

async fn status(ctx: &Context, tribute_id: &str) -> Result<()> {
    let backend = ctx.backend()?;
    let profile = loaded(load_profile(backend.as_ref(), tribute_id).await)?;
    let progress = progress::progress(&profile);

    println!("Voice status: {}", profile.voice_status);
    println!("Setup: {}%", progress.percent);
    for item in &progress.checklist {
        let mark = if item.complete { "x" } else { " " };
        println!("  [{mark}] {}: {}", item.label, item.status_text);
    }
    println!(
        "Chat: {}",
        if profile.chat_enabled { "enabled" } else { "not available" }
    );
    Ok(())
}

/// Unwrap a loaded profile, turning an unavailable one into the error the
/// viewer sees.
fn loaded(state: ProfileState) -> Result<VoiceProfile> {
    match state {
        ProfileState::Loaded { profile } => Ok(profile),
        ProfileState::Unavailable { reason } => {
            let kind = memoria_core::error::ErrorKind::UpstreamUnavailable;
            Err(eyre!("{} ({reason})", kind.user_message()))
        }
    }
}

async fn upload(
    ctx: &Context,
    tribute_id: &str,
    audio: Vec<u8>,
    content_type: &str,
    duration: f64,
    replace: bool,
) -> Result<()> {
    let backend = ctx.backend()?;
    let current = loaded(load_profile(backend.as_ref(), tribute_id).await)?;
    let mut lifecycle = VoiceLifecycle::from_status(current.voice_status);
    let setup = VoiceSetup::new(backend);

    match current.voice_status {
        VoiceStatus::NotUploaded | VoiceStatus::Failed => {}
        VoiceStatus::Uploaded | VoiceStatus::Processing if replace => {
            setup.delete_voice(tribute_id).await?;
            lifecycle.discard_sample()?;
        }
        VoiceStatus::Uploaded | VoiceStatus::Processing => {
            bail!("a voice sample is already {}; pass --replace to upload a new one", current.voice_status)
        }
        VoiceStatus::Ready => bail!("the voice clone is ready and cannot be replaced"),
    }
    lifecycle.start_upload()?;

    let outcome = setup
        .upload_sample(tribute_id, audio, content_type, duration)
        .await?;
    if let Some(warning) = outcome.warning {
        println!("Warning: {warning}");
    }
    if let Err(e) = lifecycle.observe(outcome.voice_status) {
        warn!(tribute_id = %tribute_id, error = %e, "clone service reported an unexpected status");
    }
    println!("Sample uploaded, status: {}", outcome.voice_status);
    Ok(())
}

async fn train(
    ctx: &Context,
    tribute_id: &str,
    memories: Vec<Memory>,
    traits: Vec<PersonalityTrait>,
) -> Result<()> {
    let setup = VoiceSetup::new(ctx.backend()?);
    let counts = setup
        .save_training_data(tribute_id, TrainingBatch { memories, traits })
        .await?;
    println!(
        "Saved {} stories and {} traits.",
        counts.memories_saved, counts.traits_saved
    );
    Ok(())
}

async fn chat(
    ctx: &Context,
    tribute_id: &str,
    message: Option<String>,
    owner: Option<String>,
) -> Result<()> {
    let backend = ctx.backend()?;
    let registry = VoiceMemorialRegistry::new(backend.clone());
    let memorial = registry
        .resolve(tribute_id, ctx.config.signed_in_user(), owner)
        .await
        .map_err(|e| eyre!("{} ({e})", e.error_kind().user_message()))?;
    let viewer = ctx.viewer();

    let decision = access::evaluate(&memorial.settings, &viewer, &memorial.owner_user_id);
    if !decision.allowed {
        let hint = if decision.requires_login {
            " Sign in with --user."
        } else {
            ""
        };
        bail!("{}{hint}", decision.reason.message());
    }

    let session = ConversationSession::open(
        memorial,
        viewer,
        backend,
        ctx.store()?,
        Arc::new(TerminalSink::new(std::io::stderr())),
    );
    if !session.gate().await.chat_enabled {
        bail!("This memorial is not ready for conversation yet.");
    }
    info!(tribute_id = %tribute_id, session = %ctx.session, "chat started");

    if let Some(message) = message {
        return print_outcome(&session.send(&message).await);
    }

    print_transcript(&session.messages().await);
    println!("Type a message. /play N plays reply N, /clear clears, /quit exits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "/quit" | "/exit" => break,
            "/clear" => {
                session.clear().await;
                println!("Conversation cleared.");
            }
            "/history" => print_transcript(&session.messages().await),
            _ if line.starts_with("/play") => {
                let messages = session.messages().await;
                let Some(message) = line
                    .trim_start_matches("/play")
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| messages.get(i))
                else {
                    println!("Usage: /play N, where N is a message number from /history");
                    continue;
                };
                let outcome = session.toggle_playback(message.id).await;
                match &outcome {
                    PlaybackOutcome::NotPlayable => println!("Only replies can be played."),
                    PlaybackOutcome::Failed { error, .. } => {
                        let kind = outcome.error_kind().unwrap_or(ErrorKind::PlaybackFailure);
                        println!("{} ({error})", kind.user_message())
                    }
                    PlaybackOutcome::Started { .. } | PlaybackOutcome::Stopped { .. } => {}
                }
            }
            _ => print_outcome(&session.send(line).await)?,
        }
    }
    Ok(())
}

/// Show the result of a send. A blocking failure ends the conversation.
fn print_outcome(outcome: &SendOutcome) -> Result<()> {
    if let Some(kind) = outcome.error_kind().filter(ErrorKind::is_blocking) {
        let detail = match outcome {
            SendOutcome::Rejected(SendRejection::AccessDenied(decision)) => decision.reason.message(),
            _ => kind.user_message(),
        };
        bail!("{detail}");
    }
    match outcome {
        SendOutcome::Replied(message) | SendOutcome::Failed(message) => {
            println!("{}", render(message))
        }
        SendOutcome::Discarded => {}
        SendOutcome::Rejected(SendRejection::EmptyMessage) => {}
        SendOutcome::Rejected(SendRejection::AlreadySending) => {
            println!("Still waiting for the last reply.")
        }
        SendOutcome::Rejected(SendRejection::ChatDisabled) => {
            println!("This memorial is not ready for conversation yet.")
        }
        SendOutcome::Rejected(SendRejection::AccessDenied(decision)) => {
            println!("{}", decision.reason.message())
        }
    }
    Ok(())
}

fn print_transcript(messages: &[ConversationMessage]) {
    for (i, message) in messages.iter().enumerate() {
        println!("{:>3}. {}", i + 1, render(message));
    }
}

fn render(message: &ConversationMessage) -> String {
    let who = if message.is_assistant() { "memorial" } else { "you" };
    let audio = if message.audio_url.is_some() { " [audio]" } else { "" };
    format!("{who}: {}{audio}", message.content)
}
