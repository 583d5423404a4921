//! Course Studio CLI
//!
//! Generates language courses from a JSON file or a prompt, shows exported
//! courses and looks up words.
//!
//! Exit status: 0 on success, 2 when generation ends on the error screen,
//! otherwise a sysexits-style code chosen from the failure's `ErrorCode`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use course_studio::adapters::{
    FileCourseStorage, GeminiConfig, GeminiProvider, GenerationSettings, JsonCourseValidator,
    LlmCourseGenerator, LlmWordLookup, MockAIProvider, OpenAIConfig, OpenAIProvider,
    TextRenderer,
};
use course_studio::application::{
    ExportCourseError, ExportCourseHandler, ImportCourseCommand, ImportCourseError,
    ImportCourseHandler, ImportSource, LookupWordCommand, LookupWordError, LookupWordHandler,
    StudioController,
};
use course_studio::config::{AiConfig, AiProvider, AppConfig};
use course_studio::domain::foundation::{CourseId, DomainError, ErrorCode};
use course_studio::ports::{AIProvider, CourseStorage, StorageError};

/// Course returned by the offline mock provider.
const SAMPLE_COURSE: &str = include_str!("../demos/sample_course.json");

/// Word definition returned by the offline mock provider.
const SAMPLE_WORD: &str = r#"{"definition": "Documento que permite viajar.", "translation": "ticket"}"#;

/// Course Studio - AI language course generator
#[derive(Parser, Debug)]
#[command(name = "course-studio")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a course from a JSON file or a prompt
    Generate {
        /// JSON document describing the course
        #[arg(
            long,
            value_name = "PATH",
            conflicts_with = "prompt",
            required_unless_present = "prompt"
        )]
        file: Option<PathBuf>,

        /// Free-text description of the course
        #[arg(long, value_name = "TEXT")]
        prompt: Option<String>,

        /// Save the generated course to the courses directory
        #[arg(long)]
        save: bool,

        /// Print quiz answers
        #[arg(long)]
        answers: bool,
    },
    /// Show an exported course file or a stored course id
    View {
        /// Path to a course file, or the id of a stored course
        #[arg(value_name = "PATH|ID")]
        target: String,

        /// Print quiz answers
        #[arg(long)]
        answers: bool,
    },
    /// List stored courses
    List,
    /// Define and translate a word
    Define {
        word: String,

        /// Language the word belongs to
        #[arg(short, long)]
        language: String,

        /// Sentence the word appears in
        #[arg(short, long)]
        context: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let logs = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if args.json_logs {
        logs.json().init();
    } else {
        logs.init();
    }

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let err = domain_error(e);
            tracing::debug!(code = %err.code, details = ?err.details, "Command failed");
            ExitCode::from(exit_status(err.code))
        }
    }
}

/// Recovers the typed failure behind a command error.
fn domain_error(err: anyhow::Error) -> DomainError {
    let err = match err.downcast::<ImportCourseError>() {
        Ok(e) => return e.into(),
        Err(err) => err,
    };
    let err = match err.downcast::<ExportCourseError>() {
        Ok(e) => return e.into(),
        Err(err) => err,
    };
    let err = match err.downcast::<LookupWordError>() {
        Ok(e) => return e.into(),
        Err(err) => err,
    };
    match err.downcast::<StorageError>() {
        Ok(e) => e.into(),
        Err(err) => DomainError::new(ErrorCode::InternalError, format!("{err:#}")),
    }
}

fn exit_status(code: ErrorCode) -> u8 {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyInput
        | ErrorCode::InvalidJson
        | ErrorCode::InvalidCourse => 65,
        ErrorCode::CourseNotFound | ErrorCode::NoCourseLoaded => 66,
        ErrorCode::AIProviderError | ErrorCode::RateLimited => 69,
        ErrorCode::StorageError => 74,
        ErrorCode::InvalidStateTransition | ErrorCode::InternalError => 1,
    }
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = AppConfig::load().context("failed to load configuration")?;
    let storage = Arc::new(FileCourseStorage::new(&config.storage.courses_dir));

    match args.command {
        Command::Generate {
            file,
            prompt,
            save,
            answers,
        } => {
            config.validate()?;
            let provider = build_provider(&config.ai, SAMPLE_COURSE)?;
            let settings = GenerationSettings {
                temperature: config.ai.temperature,
                max_output_tokens: config.ai.max_output_tokens,
            };
            let generator =
                LlmCourseGenerator::new(provider, Arc::new(JsonCourseValidator::new()))
                    .with_settings(settings);
            let controller = Arc::new(StudioController::new(Arc::new(generator)));

            match (file, prompt) {
                (Some(path), _) => {
                    let content = tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    controller.submit_file(&content).await;
                }
                (None, Some(prompt)) => {
                    controller.submit_prompt(&prompt).await;
                }
                (None, None) => anyhow::bail!("either --file or --prompt is required"),
            }

            let screen = controller.screen().await;
            let renderer = TextRenderer::new().with_answers(answers);
            print!("{}", renderer.render_screen(&screen));

            if controller.course().await.is_none() {
                return Ok(ExitCode::from(2));
            }
            if save {
                let summary = ExportCourseHandler::new(controller, storage.clone())
                    .handle()
                    .await?;
                println!("Saved as {}", storage.course_path(summary.id).display());
            }
        }
        Command::View { target, answers } => {
            let source = match target.parse::<CourseId>() {
                Ok(id) => ImportSource::Stored(id),
                Err(_) => ImportSource::File(PathBuf::from(target)),
            };
            let controller = Arc::new(StudioController::new(Arc::new(offline_generator())));
            ImportCourseHandler::new(controller.clone(), storage)
                .handle(ImportCourseCommand { source })
                .await?;
            let renderer = TextRenderer::new().with_answers(answers);
            print!("{}", renderer.render_screen(&controller.screen().await));
        }
        Command::List => {
            let courses = storage.list().await?;
            if courses.is_empty() {
                println!("No courses in {}", storage.base_path().display());
            }
            for course in courses {
                println!(
                    "{}  {}  {} ({})",
                    course.id, course.exported_at, course.title, course.language
                );
            }
        }
        Command::Define {
            word,
            language,
            context,
        } => {
            config.validate()?;
            let provider = build_provider(&config.ai, SAMPLE_WORD)?;
            let controller = Arc::new(StudioController::new(Arc::new(offline_generator())));
            let lookup = Arc::new(LlmWordLookup::new(provider));
            let handler = LookupWordHandler::new(lookup, controller);

            let mut cmd = LookupWordCommand::new(word).in_language(language);
            if let Some(context) = context {
                cmd = cmd.with_context(context);
            }
            let info = handler.handle(cmd).await?;
            println!("{}\n{}", info.translation, info.definition);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Builds the configured provider; `mock_reply` is what the mock answers with.
fn build_provider(ai: &AiConfig, mock_reply: &str) -> anyhow::Result<Arc<dyn AIProvider>> {
    let provider: Arc<dyn AIProvider> = match ai.provider {
        AiProvider::Gemini => {
            let key = ai
                .gemini_api_key
                .as_ref()
                .context("COURSE_STUDIO__AI__GEMINI_API_KEY is not set")?;
            let mut config =
                GeminiConfig::new(key.expose_secret().as_str()).with_timeout(ai.timeout());
            if let Some(model) = &ai.model {
                config = config.with_model(model);
            }
            if let Some(url) = &ai.base_url {
                config = config.with_base_url(url);
            }
            Arc::new(GeminiProvider::new(config)?)
        }
        AiProvider::OpenAI => {
            let key = ai
                .openai_api_key
                .as_ref()
                .context("COURSE_STUDIO__AI__OPENAI_API_KEY is not set")?;
            let mut config =
                OpenAIConfig::new(key.expose_secret().as_str()).with_timeout(ai.timeout());
            if let Some(model) = &ai.model {
                config = config.with_model(model);
            }
            if let Some(url) = &ai.base_url {
                config = config.with_base_url(url);
            }
            Arc::new(OpenAIProvider::new(config)?)
        }
        AiProvider::Mock => Arc::new(MockAIProvider::new().with_fallback(mock_reply)),
    };

    let info = provider.provider_info();
    tracing::debug!(provider = %info.name, model = %info.model, "Provider ready");
    Ok(provider)
}

/// Generator backing the controller for commands that never submit.
fn offline_generator() -> LlmCourseGenerator {
    LlmCourseGenerator::new(
        Arc::new(MockAIProvider::new().with_fallback(SAMPLE_COURSE)),
        Arc::new(JsonCourseValidator::new()),
    )
}
