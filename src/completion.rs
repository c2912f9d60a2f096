/// Positional argument that prints [`BASH_COMPLETION`] instead of checking.
pub const BASH_COMPLETION_ARG: &str = "bash-completion";

/// Bash completion for every flag, e.g. `eval "$(statoo bash-completion)"`.
pub const BASH_COMPLETION: &str = r#"__statoo_comp()
{
    local cur
    cur="${COMP_WORDS[COMP_CWORD]}"
    opts="-a -auth -commithash -f -find -h -help -j -json -request-header -response-header -s -skip -t -timeout -verbose -version"
    COMPREPLY=( $(compgen -W "${opts}" -- "${cur}") )
}
complete -F __statoo_comp statoo"#;
