use std::fs;
use std::io::{self, BufRead, Write};

use clap::{Args, Parser, Subcommand};
use client::i18n::Translations;
use client::net::{ProxyClient, TutorApi};
use client::state::{AppShell, Page};
use proto::Subject;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("client setup failed: {0}")]
    Client(#[from] client::net::ClientError),
    #[error("health check failed: HTTP {0}")]
    Health(u16),
    #[error("{0}")]
    Feedback(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("only one of --instructions and --text may read from stdin")]
    StdinTwice,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "teaicher", about = "Assignment feedback and AI tutor chat from the terminal")]
struct Cli {
    #[arg(long, env = "TEAICHER_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "TEAICHER_SUBJECT", default_value = "English", value_parser = parse_subject)]
    subject: Subject,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Get feedback on a text against the assignment instructions.
    Feedback(FeedbackArgs),
    /// Chat with the tutor, one line per turn, until end of input.
    Chat(ChatArgs),
}

#[derive(Args, Debug)]
struct FeedbackArgs {
    #[arg(long, help = "Instructions file path, or - for stdin")]
    instructions: String,

    #[arg(long, help = "Student text file path, or - for stdin")]
    text: String,
}

#[derive(Args, Debug)]
struct ChatArgs {
    #[arg(long, default_value_t = false, help = "Use the step-by-step Socratic tutor")]
    test: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let mut shell = AppShell::new(cli.subject);

    match cli.command {
        Command::Ping => run_ping(&cli.base_url).await,
        Command::Feedback(args) => {
            let api = ProxyClient::new(&cli.base_url)?;
            run_feedback(&mut shell, &api, args).await
        }
        Command::Chat(args) => {
            let api = ProxyClient::new(&cli.base_url)?;
            shell.page = if args.test { Page::Test } else { Page::Discuss };
            run_chat(&mut shell, &api).await
        }
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));
    let response = reqwest::Client::new().get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Health(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn run_feedback(shell: &mut AppShell, api: &dyn TutorApi, args: FeedbackArgs) -> Result<(), CliError> {
    if args.instructions == "-" && args.text == "-" {
        return Err(CliError::StdinTwice);
    }
    let subject = shell.subject();
    let t = shell.translations();
    shell.check.instructions = read_input(&args.instructions)?;
    shell.check.student_text = read_input(&args.text)?;

    eprintln!("{}", t.generating_feedback);
    shell.check.submit(api, subject, t).await;

    if let Some(error) = shell.check.error.take() {
        return Err(CliError::Feedback(error));
    }
    if let Some(feedback) = &shell.check.feedback {
        print!("{}", render_feedback(t, feedback));
    }
    Ok(())
}

async fn run_chat(shell: &mut AppShell, api: &dyn TutorApi) -> Result<(), CliError> {
    let t = shell.translations();
    let Some(session) = shell.active_chat() else {
        return Ok(());
    };

    println!("{}", t.chat_welcome);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        session.input = line;
        if !session.can_send() {
            continue;
        }

        eprintln!("{}", t.thinking);
        session.send(api).await;
        if let Some(reply) = session.messages.last() {
            println!("{}\n", reply.text);
        }
    }
    Ok(())
}

fn parse_subject(raw: &str) -> Result<Subject, String> {
    Subject::parse(raw).ok_or_else(|| format!("unknown subject `{raw}`; expected English or Svenska"))
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        return io::read_to_string(io::stdin()).map_err(|source| CliError::Read { path: "stdin".into(), source });
    }
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })
}

fn render_feedback(t: &Translations, feedback: &proto::Feedback) -> String {
    format!(
        "## {}\n{}\n\n## {}\n{}\n",
        t.following_instructions, feedback.instruction_following, t.language_and_style, feedback.language_feedback
    )
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
