use anyhow::{Result, bail};
use clap::Parser;

use git_usr::{
    cli::{Cli, Commands, SwitchTarget, switch_target, usage_exit_code},
    commands,
    git::GitCli,
    paths::Paths,
    prompt::TerminalPrompt,
    ui::Ui,
};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = usage_exit_code(&e);
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Output flags may also trail a bare profile name
    let target = match &cli.command {
        Some(Commands::Switch(args)) => Some(switch_target(args, cli.global)),
        _ => None,
    };
    let (color, no_color) = match &target {
        Some(Ok(t)) => (t.color.unwrap_or(cli.color), cli.no_color || t.no_color),
        _ => (cli.color, cli.no_color),
    };
    let ui = Ui::new(color, no_color);

    let result = match target.transpose() {
        Ok(target) => run(cli, target, &ui),
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        ui.err(format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli, target: Option<SwitchTarget>, ui: &Ui) -> Result<()> {
    let git = GitCli::default();

    match cli.command {
        None | Some(Commands::Help) => {
            commands::help(Paths::resolve().ok().as_ref(), ui);
            Ok(())
        }
        Some(Commands::Version) => {
            commands::version(ui);
            Ok(())
        }
        Some(Commands::List) => commands::list(&Paths::resolve()?, &git, ui),
        Some(Commands::Current) => commands::current(&Paths::resolve()?, &git, ui),
        Some(Commands::Add {
            profile,
            name,
            email,
        }) => commands::add(&Paths::resolve()?, &profile, name, email, &TerminalPrompt, ui),
        Some(Commands::Remove { profile }) => commands::remove(&Paths::resolve()?, &profile, ui),
        Some(Commands::Completion { shell }) => {
            commands::completion(&Paths::resolve()?, shell, ui)
        }
        Some(Commands::Switch(_)) => {
            let Some(target) = target else {
                bail!("Profile name required");
            };
            commands::switch(&Paths::resolve()?, &git, &target.profile, target.scope, ui)
        }
    }
}
