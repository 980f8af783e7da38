use anyhow::Result;
use directories::ProjectDirs;
use linkbot::app::App;
use linkbot::{Config, SessionStatus};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use url::Url;

fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "linkbot", "linkbot") {
        proj_dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config/default.toml")
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load_or_default(&get_config_path());
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(config))
}

async fn run(config: Config) -> Result<()> {
    let mut app = App::new(config);
    println!("linkbot control. Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tick = tokio::time::interval(Duration::from_millis(50));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => handle_command(&mut app, line.trim()),
                    None => break,
                }
            }
            _ = tick.tick() => {}
        }

        app.process_events();
        for notice in app.take_notices() {
            println!("[{}] {}", notice.timestamp.format("%H:%M:%S"), notice.message);
        }
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_command(app: &mut App, line: &str) {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "help" => print_help(),
        "login" => {
            if app.can_login() {
                app.initiate_login();
            } else {
                println!("Login is unavailable while the bot is running.");
            }
        }
        "callback" => match Url::parse(rest) {
            Ok(location) => app.navigate(&location),
            Err(e) => println!("Not a valid URL: {e}"),
        },
        "keyword" => app.form.keyword = rest.to_string(),
        "email" => app.form.email = rest.to_string(),
        "password" => app.form.password = rest.to_string(),
        "start" => app.start_bot(),
        "stop" => app.stop_bot(),
        "status" => print_status(app),
        "vnc" => println!("Open the manual login viewer: {}", app.config.viewer_url()),
        "quit" | "exit" => app.should_quit = true,
        other => println!("Unknown command `{other}`. Type `help`."),
    }
}

fn print_status(app: &App) {
    match app.status() {
        SessionStatus::Error(message) => println!("Status: error ({message})"),
        status => println!("Status: {}", status.label()),
    }
    if let Some(credential) = app.auth.credential() {
        println!("Logged in as {}", credential.profile.display_name());
    }
}

fn print_help() {
    println!("Commands:");
    println!("  login              request an authorization URL to open in a browser");
    println!("  callback <url>     paste the full redirect URL after authorizing");
    println!("  keyword <text>     set the search keyword for the bot");
    println!("  email <address>    set the account email for the bot");
    println!("  password <secret>  set the account password for the bot");
    println!("  start              start the bot with the current form");
    println!("  stop               stop the bot");
    println!("  status             show the derived session status");
    println!("  vnc                print the manual-fallback viewer URL");
    println!("  quit               exit");
}
