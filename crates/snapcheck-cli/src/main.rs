// crates/snapcheck-cli/src/main.rs
// ============================================================================
// Module: Snapcheck CLI Entry Point
// Description: Command dispatcher for fixture validation and verification.
// Purpose: Provide a safe CLI for snapshot validate/show/verify/record tasks.
// Dependencies: clap, snapcheck-config, snapcheck-core, serde_json, time
// ============================================================================

//! ## Overview
//! The Snapcheck CLI operates on committed golden fixtures: `validate`
//! checks a fixture's well-formedness and canonical form, `show` prints a
//! stored record, `verify` compares a record against a live capture with
//! placeholder-aware matching, and `record` captures or regenerates a
//! record. All user-facing strings are routed through the message catalog
//! and all writes go through checked stdout/stderr helpers.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use snapcheck_cli::t;
use snapcheck_config as config;
use snapcheck_config::SnapcheckConfig;
use snapcheck_core::FileSnapshotStore;
use snapcheck_core::MismatchKind;
use snapcheck_core::RecordOutcome;
use snapcheck_core::RecordedDate;
use snapcheck_core::SnapshotDocument;
use snapcheck_core::SnapshotRecorder;
use snapcheck_core::SnapshotStore;
use snapcheck_core::SnapshotVerifier;
use snapcheck_core::TestId;
use snapcheck_core::VerificationReport;
use snapcheck_core::VerificationStatus;
use snapcheck_core::parse_document;
use snapcheck_core::to_document_bytes;
use time::OffsetDateTime;
use time::PrimitiveDateTime;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Snapcheck: recorded API response snapshots with placeholder-aware checks.
#[derive(Debug, Parser)]
#[command(name = "snapcheck", disable_version_flag = true)]
struct Cli {
    /// Path of the snapcheck.toml config file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Print version information and exit.
    #[arg(long = "version")]
    show_version: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Snapcheck subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a fixture: parse, record invariants, canonical form.
    Validate(ValidateArgs),
    /// Print a stored record's content or capture date.
    Show(ShowArgs),
    /// Compare a stored record against a live capture.
    Verify(VerifyArgs),
    /// Record or regenerate a snapshot from a live capture.
    Record(RecordArgs),
}

/// Arguments for `snapcheck validate`.
#[derive(Debug, clap::Args)]
struct ValidateArgs {
    /// Fixture path, overriding the configured one.
    #[arg(long, value_name = "PATH")]
    fixture: Option<PathBuf>,
}

/// Arguments for `snapcheck show`.
#[derive(Debug, clap::Args)]
struct ShowArgs {
    /// Fixture path, overriding the configured one.
    #[arg(long, value_name = "PATH")]
    fixture: Option<PathBuf>,
    /// Fully-qualified test identifier of the record.
    #[arg(long = "test-id", value_name = "ID")]
    test_id: String,
    /// Print the capture date instead of the content.
    #[arg(long)]
    date: bool,
}

/// Arguments for `snapcheck verify`.
#[derive(Debug, clap::Args)]
struct VerifyArgs {
    /// Fixture path, overriding the configured one.
    #[arg(long, value_name = "PATH")]
    fixture: Option<PathBuf>,
    /// Fully-qualified test identifier of the record.
    #[arg(long = "test-id", value_name = "ID")]
    test_id: String,
    /// Path of the live capture JSON to compare.
    #[arg(long, value_name = "PATH")]
    live: PathBuf,
}

/// Arguments for `snapcheck record`.
#[derive(Debug, clap::Args)]
struct RecordArgs {
    /// Fixture path, overriding the configured one.
    #[arg(long, value_name = "PATH")]
    fixture: Option<PathBuf>,
    /// Fully-qualified test identifier of the record.
    #[arg(long = "test-id", value_name = "ID")]
    test_id: String,
    /// Path of the live capture JSON to record.
    #[arg(long, value_name = "PATH")]
    live: PathBuf,
    /// Overwrite an existing record without update mode.
    #[arg(long)]
    force: bool,
}

// ============================================================================
// SECTION: CLI Errors
// ============================================================================

/// Terminal CLI error carrying a formatted message.
#[derive(Debug)]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a formatted message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

/// Outcome of a successfully-dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandOutcome {
    /// The command succeeded.
    Success,
    /// The command ran but reported a failure (e.g. verification failed).
    Failure,
}

impl CommandOutcome {
    /// Maps the outcome onto a process exit code.
    const fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::Failure => ExitCode::FAILURE,
        }
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Process entry point.
fn main() -> ExitCode {
    match run() {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => emit_error(&err.message),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<CommandOutcome> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(CommandOutcome::Success);
    }

    let config = load_config(cli.config.as_deref())?;
    let Some(command) = cli.command else {
        show_help()?;
        return Ok(CommandOutcome::Success);
    };

    match command {
        Commands::Validate(args) => command_validate(&config, &args),
        Commands::Show(args) => command_show(&config, &args),
        Commands::Verify(args) => command_verify(&config, &args),
        Commands::Record(args) => {
            let update_mode = config
                .resolve_update_mode()
                .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
            command_record(&config, &args, update_mode)
        }
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = <Cli as clap::CommandFactory>::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Config and Fixture Helpers
// ============================================================================

/// Loads configuration from the explicit path, the environment override,
/// or built-in defaults.
fn load_config(explicit: Option<&Path>) -> CliResult<SnapcheckConfig> {
    if explicit.is_some() || std::env::var_os(config::CONFIG_ENV_VAR).is_some() {
        return SnapcheckConfig::load(explicit)
            .map_err(|err| CliError::new(t!("config.load_failed", error = err)));
    }
    Ok(SnapcheckConfig::default())
}

/// Resolves the fixture path from the CLI override or configuration.
fn resolve_fixture_path(config: &SnapcheckConfig, fixture: Option<&Path>) -> PathBuf {
    fixture.map_or_else(|| config.fixture.path.clone(), Path::to_path_buf)
}

/// Opens the file store for a fixture path with configured limits.
fn fixture_store(config: &SnapcheckConfig, path: &Path) -> FileSnapshotStore {
    FileSnapshotStore::with_limit(path, config.fixture.max_bytes)
}

/// Loads the fixture document, failing when it is absent.
fn load_fixture(config: &SnapcheckConfig, path: &Path) -> CliResult<SnapshotDocument> {
    let store = fixture_store(config, path);
    let document = store
        .load()
        .map_err(|err| CliError::new(t!("fixture.load_failed", path = path.display(), error = err)))?;
    document.map_or_else(
        || Err(CliError::new(t!("fixture.missing", path = path.display()))),
        Ok,
    )
}

/// Parses a CLI test identifier argument.
fn parse_test_id(raw: &str) -> CliResult<TestId> {
    TestId::new(raw)
        .map_err(|err| CliError::new(t!("record.invalid_test_id", test_id = raw, error = err)))
}

/// Reads and parses a live capture JSON file under the configured size cap.
fn read_live_capture(config: &SnapcheckConfig, path: &Path) -> CliResult<serde_json::Value> {
    let bytes = fs::read(path)
        .map_err(|err| CliError::new(t!("live.read_failed", path = path.display(), error = err)))?;
    if bytes.len() > config.fixture.max_bytes {
        return Err(CliError::new(t!(
            "live.too_large",
            path = path.display(),
            size = bytes.len(),
            limit = config.fixture.max_bytes
        )));
    }
    serde_json::from_slice(&bytes)
        .map_err(|err| CliError::new(t!("live.parse_failed", path = path.display(), error = err)))
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Implements `snapcheck validate`.
fn command_validate(config: &SnapcheckConfig, args: &ValidateArgs) -> CliResult<CommandOutcome> {
    let path = resolve_fixture_path(config, args.fixture.as_deref());
    let bytes = fs::read(&path)
        .map_err(|err| CliError::new(t!("fixture.load_failed", path = path.display(), error = err)))?;
    let document = parse_document(&bytes, config.fixture.max_bytes)
        .map_err(|err| CliError::new(t!("fixture.load_failed", path = path.display(), error = err)))?;

    let reserialized = to_document_bytes(&document).map_err(|err| {
        CliError::new(t!("validate.roundtrip_failed", path = path.display(), error = err))
    })?;
    let reparsed = parse_document(&reserialized, config.fixture.max_bytes).map_err(|err| {
        CliError::new(t!("validate.roundtrip_failed", path = path.display(), error = err))
    })?;
    if reparsed != document {
        return Err(CliError::new(t!(
            "validate.roundtrip_failed",
            path = path.display(),
            error = "re-parsed document differs from original"
        )));
    }
    if reserialized != bytes {
        write_stdout_line(&t!("validate.not_canonical", path = path.display()))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(CommandOutcome::Failure);
    }

    write_stdout_line(&t!("validate.ok", count = document.len(), path = path.display()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(CommandOutcome::Success)
}

/// Implements `snapcheck show`.
fn command_show(config: &SnapcheckConfig, args: &ShowArgs) -> CliResult<CommandOutcome> {
    let path = resolve_fixture_path(config, args.fixture.as_deref());
    let test_id = parse_test_id(&args.test_id)?;
    let document = load_fixture(config, &path)?;
    let Some(record) = document.get(&test_id) else {
        return Err(CliError::new(t!("record.lookup_failed", test_id = test_id)));
    };

    if args.date {
        write_stdout_line(&t!("show.date", date = record.recorded_date))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(CommandOutcome::Success);
    }

    let rendered = serde_json::to_string_pretty(&record.recorded_content)
        .map_err(|err| CliError::new(t!("fixture.load_failed", path = path.display(), error = err)))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(CommandOutcome::Success)
}

/// Implements `snapcheck verify`.
fn command_verify(config: &SnapcheckConfig, args: &VerifyArgs) -> CliResult<CommandOutcome> {
    let path = resolve_fixture_path(config, args.fixture.as_deref());
    let test_id = parse_test_id(&args.test_id)?;
    let document = load_fixture(config, &path)?;
    let live = read_live_capture(config, &args.live)?;

    let verifier = SnapshotVerifier::with_limits(&document, config.match_limits());
    let report = verifier
        .verify(&test_id, &live)
        .map_err(|err| CliError::new(t!("verify.run_failed", error = err)))?;

    match report.status {
        VerificationStatus::Passed => {
            let digest = report
                .content_digest
                .map_or_else(|| "unavailable".to_string(), |digest| digest.value);
            write_stdout_line(&t!("verify.pass", test_id = test_id, digest = digest))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(CommandOutcome::Success)
        }
        VerificationStatus::MissingRecord => {
            Err(CliError::new(t!("record.lookup_failed", test_id = test_id)))
        }
        VerificationStatus::Failed => {
            emit_failure_report(&report)?;
            Ok(CommandOutcome::Failure)
        }
    }
}

/// Implements `snapcheck record`.
fn command_record(
    config: &SnapcheckConfig,
    args: &RecordArgs,
    update_mode: bool,
) -> CliResult<CommandOutcome> {
    let path = resolve_fixture_path(config, args.fixture.as_deref());
    let test_id = parse_test_id(&args.test_id)?;
    let content = read_live_capture(config, &args.live)?;

    let store = fixture_store(config, &path);
    let mut document = store
        .load()
        .map_err(|err| CliError::new(t!("fixture.load_failed", path = path.display(), error = err)))?
        .unwrap_or_default();

    let exists = document.get(&test_id).is_some();
    if exists && !(args.force || update_mode) {
        return Err(CliError::new(t!(
            "record.refused",
            test_id = test_id,
            env = config::UPDATE_ENV_VAR
        )));
    }

    let recorder = SnapshotRecorder::new();
    let outcome = recorder
        .record(&mut document, test_id.clone(), content, recorded_now())
        .map_err(|err| CliError::new(t!("record.content_invalid", error = err)))?;
    store
        .save(&document)
        .map_err(|err| CliError::new(t!("fixture.save_failed", path = path.display(), error = err)))?;

    let message = match outcome {
        RecordOutcome::Created => t!("record.created", test_id = test_id, path = path.display()),
        RecordOutcome::Replaced => t!("record.replaced", test_id = test_id, path = path.display()),
    };
    write_stdout_line(&message).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(CommandOutcome::Success)
}

/// Stamps the current wall-clock time as a recorded date.
fn recorded_now() -> RecordedDate {
    let now = OffsetDateTime::now_utc();
    RecordedDate::from_datetime(PrimitiveDateTime::new(now.date(), now.time()))
}

// ============================================================================
// SECTION: Report Rendering
// ============================================================================

/// Prints a failed verification report to stdout.
fn emit_failure_report(report: &VerificationReport) -> CliResult<()> {
    write_stdout_line(&t!("verify.fail.header", test_id = report.test_id))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    for mismatch in &report.mismatches {
        let line = t!(
            "verify.fail.mismatch",
            path = mismatch.path,
            detail = describe_mismatch(&mismatch.kind)
        );
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    if report.truncated {
        write_stdout_line(&t!("verify.fail.truncated"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(())
}

/// Renders one mismatch reason as a single line.
fn describe_mismatch(kind: &MismatchKind) -> String {
    match kind {
        MismatchKind::ValueMismatch {
            recorded,
            live,
        } => t!("verify.detail.value", recorded = recorded, live = live),
        MismatchKind::MissingKey {
            key,
        } => t!("verify.detail.missing_key", key = key),
        MismatchKind::UnexpectedKey {
            key,
        } => t!("verify.detail.unexpected_key", key = key),
        MismatchKind::LengthMismatch {
            recorded,
            live,
        } => t!("verify.detail.length", recorded = recorded, live = live),
        MismatchKind::TemplateMismatch {
            template,
            live,
        } => t!("verify.detail.template", live = live, template = template),
        MismatchKind::BindingConflict {
            token,
            bound,
            live,
        } => t!("verify.detail.binding", token = token, bound = bound, live = live),
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a message line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a message line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits a terminal error to stderr and returns the failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
