//! Shell completion scripts.
//!
//! The scripts are static text with the stored profile names baked in, so a
//! script has to be regenerated after profiles are added or removed. Bash,
//! zsh, fish and PowerShell get hand-written scripts that also complete
//! profile names; any other shell clap_complete knows gets its generated
//! script for the fixed command surface.

use clap::Command;
use clap_complete::Shell;

use crate::cli::BIN_NAME;

/// Subcommands offered for completion, with descriptions
const COMMANDS: &[(&str, &str)] = &[
    ("list", "List all profiles"),
    ("current", "Show current git config"),
    ("add", "Add or update a profile"),
    ("remove", "Remove a profile"),
    ("completion", "Generate completion script"),
    ("help", "Show help"),
    ("version", "Show version information"),
];

/// Shells with a profile-aware script
const TEMPLATED_SHELLS: &[&str] = &["bash", "zsh", "fish", "powershell"];

/// Build the completion script for `shell`
pub fn generate(shell: Shell, profiles: &[String], cmd: &mut Command) -> String {
    match shell {
        Shell::Bash => bash(profiles),
        Shell::Zsh => zsh(profiles),
        Shell::Fish => fish(profiles),
        Shell::PowerShell => powershell(profiles),
        other => {
            let mut buf = Vec::new();
            clap_complete::generate(other, cmd, BIN_NAME, &mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        }
    }
}

fn command_words() -> String {
    COMMANDS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(" ")
}

const BASH: &str = r#"# bash completion for git-usr
# Defining _git_usr also completes `git usr <TAB>` through git's own bash completion.
_git_usr() {
    local cur prev profiles
    COMPREPLY=()
    cur="${COMP_WORDS[COMP_CWORD]}"
    prev="${COMP_WORDS[COMP_CWORD-1]}"
    profiles="@PROFILES@"

    case "${prev}" in
        completion)
            COMPREPLY=( $(compgen -W "@SHELLS@" -- "${cur}") )
            return 0
            ;;
        remove)
            COMPREPLY=( $(compgen -W "${profiles}" -- "${cur}") )
            return 0
            ;;
    esac

    COMPREPLY=( $(compgen -W "@COMMANDS@ ${profiles} --global" -- "${cur}") )
    return 0
}

complete -F _git_usr git-usr

# Installation: add this to ~/.bashrc or save it to /etc/bash_completion.d/git-usr"#;

fn bash(profiles: &[String]) -> String {
    BASH.replace("@PROFILES@", &profiles.join(" "))
        .replace("@SHELLS@", &TEMPLATED_SHELLS.join(" "))
        .replace("@COMMANDS@", &command_words())
}

const ZSH: &str = r#"#compdef git-usr

_git_usr() {
    local -a commands profiles
    commands=(
@COMMANDS@
    )
    profiles=(@PROFILES@)

    _arguments -C \
        '--global[Apply globally]' \
        '1: :->command' \
        '*::arg:->args'

    case $state in
        command)
            _describe -t commands 'git-usr commands' commands
            _describe -t profiles 'profiles' profiles
            ;;
        args)
            case $words[1] in
                completion)
                    _values 'shell' @SHELLS@
                    ;;
                remove)
                    _describe -t profiles 'profiles' profiles
                    ;;
            esac
            ;;
    esac
}

_git_usr "$@"

# Installation: save as _git-usr in a directory on $fpath, then run compinit"#;

fn zsh(profiles: &[String]) -> String {
    let commands = COMMANDS
        .iter()
        .map(|(name, desc)| format!("        '{}:{}'", name, desc))
        .collect::<Vec<_>>()
        .join("\n");

    ZSH.replace("@COMMANDS@", &commands)
        .replace("@PROFILES@", &profiles.join(" "))
        .replace("@SHELLS@", &TEMPLATED_SHELLS.join(" "))
}

fn fish(profiles: &[String]) -> String {
    let mut out = String::from("# fish completion for git-usr\n\n# Commands\n");
    for (name, desc) in COMMANDS {
        out.push_str(&format!(
            "complete -c {BIN_NAME} -f -n \"__fish_use_subcommand\" -a \"{name}\" -d \"{desc}\"\n"
        ));
    }

    out.push_str("\n# Profiles\n");
    for profile in profiles {
        out.push_str(&format!(
            "complete -c {BIN_NAME} -f -n \"__fish_use_subcommand\" -a \"{profile}\" -d \"Switch to {profile} profile\"\n"
        ));
    }

    out.push_str(&format!(
        "\ncomplete -c {BIN_NAME} -f -n \"__fish_seen_subcommand_from completion\" -a \"{}\"\n",
        TEMPLATED_SHELLS.join(" ")
    ));
    for profile in profiles {
        out.push_str(&format!(
            "complete -c {BIN_NAME} -f -n \"__fish_seen_subcommand_from remove\" -a \"{profile}\"\n"
        ));
    }

    out.push_str(&format!(
        "\ncomplete -c {BIN_NAME} -l global -d \"Apply globally\"\n\n\
         # Installation: save to ~/.config/fish/completions/git-usr.fish"
    ));
    out
}

const POWERSHELL: &str = r#"# PowerShell completion for git-usr

Register-ArgumentCompleter -Native -CommandName git-usr -ScriptBlock {
    param($wordToComplete, $commandAst, $cursorPosition)

    $commands = @(@COMMANDS@)
    $profiles = @(@PROFILES@)
    $shells = @(@SHELLS@)

    $tokens = $commandAst.ToString() -split '\s+'
    $candidates = @()

    if ($tokens.Count -le 2) {
        $candidates = $commands + $profiles + @('--global')
    }
    elseif ($tokens[1] -eq 'completion') {
        $candidates = $shells
    }
    elseif ($tokens[1] -eq 'remove') {
        $candidates = $profiles
    }

    $candidates | Where-Object { $_ -like "$wordToComplete*" } | ForEach-Object {
        [System.Management.Automation.CompletionResult]::new($_, $_, 'ParameterValue', $_)
    }
}

# Installation: add this to your PowerShell profile ($PROFILE)"#;

/// `'a', 'b'` with PowerShell single-quote escaping
fn ps_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| format!("'{}'", s.as_ref().replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(", ")
}

fn powershell(profiles: &[String]) -> String {
    let commands: Vec<&str> = COMMANDS.iter().map(|(name, _)| *name).collect();

    POWERSHELL
        .replace("@COMMANDS@", &ps_list(&commands))
        .replace("@PROFILES@", &ps_list(profiles))
        .replace("@SHELLS@", &ps_list(TEMPLATED_SHELLS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::CommandFactory;

    fn names() -> Vec<String> {
        vec!["personal".to_string(), "work".to_string()]
    }

    fn script(shell: Shell) -> String {
        generate(shell, &names(), &mut Cli::command())
    }

    #[test]
    fn test_bash_includes_profiles_and_commands() {
        let out = script(Shell::Bash);
        assert!(out.contains("profiles=\"personal work\""));
        assert!(out.contains("list current add remove completion help version"));
        assert!(out.contains("complete -F _git_usr git-usr"));
        assert!(!out.contains('@'));
    }

    #[test]
    fn test_zsh_is_compdef() {
        let out = script(Shell::Zsh);
        assert!(out.starts_with("#compdef git-usr"));
        assert!(out.contains("profiles=(personal work)"));
        assert!(out.contains("'remove:Remove a profile'"));
    }

    #[test]
    fn test_fish_lists_each_profile() {
        let out = script(Shell::Fish);
        assert!(out.contains("-a \"work\" -d \"Switch to work profile\""));
        assert!(out.contains("__fish_seen_subcommand_from remove\" -a \"personal\""));
        assert!(out.contains("-l global"));
    }

    #[test]
    fn test_powershell_escapes_quotes() {
        let out = generate(Shell::PowerShell, &["o'brien".to_string()], &mut Cli::command());
        assert!(out.contains("$profiles = @('o''brien')"));
        assert!(out.contains("Register-ArgumentCompleter -Native -CommandName git-usr"));
    }

    #[test]
    fn test_no_profiles_still_valid() {
        let out = generate(Shell::Bash, &[], &mut Cli::command());
        assert!(out.contains("profiles=\"\""));
    }

    #[test]
    fn test_other_shells_use_clap_complete() {
        let out = script(Shell::Elvish);
        assert!(out.contains("git-usr"));
        assert!(!out.is_empty());
    }
}
