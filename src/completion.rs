//! # Shell Completion Module
//!
//! - Generation of completion scripts for various shells (clap_complete)
//! - An enhanced bash script that completes track titles for `play`
//!
//! ## Usage
//!
//! ```bash
//! tuneshelf completion zsh > ~/.config/zsh/completions/_tuneshelf
//! tuneshelf completion-enhanced > ~/.local/share/bash-completion/completions/tuneshelf
//! ```

use crate::cli::Shell;
use crate::track::Catalog;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io::{self, Write};

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(gen, cmd, name, out);
}

/// Map our Shell enum to clap_complete's Shell
#[must_use]
pub const fn shell_to_completion_shell(shell: &Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}

const ENHANCED_BASH: &str = r#"# Enhanced Tuneshelf completion script for Bash with track title completion
# Install with: tuneshelf completion-enhanced > ~/.local/share/bash-completion/completions/tuneshelf

_tuneshelf() {
    local cur prev words cword
    _init_completion -n : || return

    local commands="list play recommend search menu import completion completion-enhanced help"
    local subcommand=""
    local i
    for ((i = 1; i < cword; i++)); do
        case "${words[i]}" in
            --catalog|--config) ((i++)) ;;
            -*) ;;
            *) subcommand="${words[i]}"; break ;;
        esac
    done

    case "$prev" in
        --catalog|--config|--db)
            _filedir
            return
            ;;
    esac

    case "$subcommand" in
        "")
            COMPREPLY=($(compgen -W "$commands --catalog --config --help --version" -- "$cur"))
            ;;
        play)
            local IFS=$'\n'
            COMPREPLY=($(compgen -W "$(tuneshelf complete-titles 2>/dev/null)" -- "$cur"))
            ;;
        recommend)
            COMPREPLY=($(compgen -W "--top-n --verbose" -- "$cur"))
            ;;
        import)
            if [[ "$cur" == -* ]]; then
                COMPREPLY=($(compgen -W "--db --force" -- "$cur"))
            else
                _filedir json
            fi
            ;;
        completion)
            COMPREPLY=($(compgen -W "bash zsh fish power-shell elvish" -- "$cur"))
            ;;
    esac
}

complete -F _tuneshelf tuneshelf
"#;

/// Write the enhanced bash completion script.
///
/// # Errors
///
/// Writing to `out` failed.
pub fn write_enhanced_bash_completion(out: &mut dyn Write) -> io::Result<()> {
    out.write_all(ENHANCED_BASH.as_bytes())
}

/// Print every track title, one per line, for completion scripts.
///
/// # Errors
///
/// Writing to `out` failed.
pub fn write_title_completions(out: &mut dyn Write, catalog: &Catalog) -> io::Result<()> {
    for track in catalog {
        if !track.title.trim().is_empty() {
            writeln!(out, "{}", track.title)?;
        }
    }
    Ok(())
}
