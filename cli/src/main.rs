use std::time::Duration;

use clap::{Parser, Subcommand};
use statusbar_cli::{CliContext, Repl, commands, logging, producers};
use statusbar_core::{DisplayEntry, StatusbarConfig, StatusbarConfigExt};
use statusbar_overlay::ParentWindow;

#[derive(Parser)]
#[command(version, about = "Floating statusbar driver")]
struct Args {
    /// Width of the simulated host window
    #[arg(long, default_value_t = 1920)]
    width: u32,
    /// Height of the simulated host window
    #[arg(long, default_value_t = 1080)]
    height: u32,
    /// Simulate a host with a workspace-switch notification
    #[arg(long)]
    workspaces: bool,
    /// Do not run the clock producer
    #[arg(long)]
    no_clock: bool,
    /// Start with the statusbar disabled
    #[arg(long)]
    disabled: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();
    let args = Args::parse();

    let config = StatusbarConfig::load();
    let parent = ParentWindow {
        width: args.width,
        height: args.height,
    };
    let mut ctx = CliContext::new(config, parent, args.workspaces);

    let run_clock = !args.no_clock;
    producers::seed(&mut ctx, run_clock);
    if !args.disabled {
        ctx.bar.enable();
    }
    commands::show_status(&ctx);

    let mut clock = tokio::time::interval(Duration::from_secs(1));
    let mut repl = Repl::new();
    repl.prompt()?;

    loop {
        tokio::select! {
            _ = clock.tick(), if run_clock => producers::update_clock(&mut ctx),
            line = repl.next_line() => {
                let Some(line) = line? else {
                    commands::exit(&mut ctx)?;
                    break;
                };
                let line = line.trim();
                if !line.is_empty() {
                    match respond(line, &mut ctx) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(err) => println!("{err}"),
                    }
                }
                repl.prompt()?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(no_binary_name = true, about = "statusbar commands")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enable or disable the statusbar
    Toggle,
    /// Set the note shown before every value
    Note { text: String },
    ClearNote,
    /// Set a status variable
    Set { name: String, value: String },
    /// Clear a status variable's value
    Unset { name: String },
    /// Remove a status variable entirely
    Unbind { name: String },
    /// Add a variable entry to the status strip
    Push { name: String },
    /// Add fixed text to the status strip
    Literal { text: String },
    FocusIn,
    FocusOut,
    Workspace,
    /// Set the number of tray icons
    Tray { icons: u32 },
    /// Resize the host window
    Resize { width: u32, height: u32 },
    Status,
    Strip,
    SaveConfig,
    Exit,
}

fn respond(line: &str, ctx: &mut CliContext) -> Result<bool, String> {
    let args = shlex::split(line).ok_or("error: Invalid quoting")?;
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Toggle) => commands::toggle(ctx),
        Some(Commands::Note { text }) => commands::set_note(ctx, &text),
        Some(Commands::ClearNote) => commands::clear_note(ctx),
        Some(Commands::Set { name, value }) => commands::set_variable(ctx, &name, &value),
        Some(Commands::Unset { name }) => commands::clear_variable(ctx, &name),
        Some(Commands::Unbind { name }) => commands::unbind_variable(ctx, &name),
        Some(Commands::Push { name }) => commands::push_entry(ctx, DisplayEntry::variable(name)),
        Some(Commands::Literal { text }) => commands::push_entry(ctx, DisplayEntry::literal(text)),
        Some(Commands::FocusIn) => commands::focus(ctx, true),
        Some(Commands::FocusOut) => commands::focus(ctx, false),
        Some(Commands::Workspace) => commands::switch_workspace(ctx),
        Some(Commands::Tray { icons }) => commands::set_tray(ctx, icons),
        Some(Commands::Resize { width, height }) => commands::resize(ctx, width, height),
        Some(Commands::Status) => commands::show_status(ctx),
        Some(Commands::Strip) => commands::show_strip(ctx),
        Some(Commands::SaveConfig) => commands::save_config(ctx)?,
        Some(Commands::Exit) => {
            commands::exit(ctx)?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
