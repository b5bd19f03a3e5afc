use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("turnos").chain(args.iter().copied()))
}

// =============================================================
// list subcommands
// =============================================================

#[test]
fn filtered_lists_accept_all_flag() {
    let cli = parse(&["especialidades", "list", "--all"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Especialidades(FilteredListCommand { command: FilteredListSubcommand::List { all: true } })
    ));

    let cli = parse(&["politicas", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Politicas(FilteredListCommand { command: FilteredListSubcommand::List { all: false } })
    ));
}

#[test]
fn unfiltered_lists_reject_all_flag() {
    for resource in ["servicios", "bloqueos", "disponibilidad", "empresas"] {
        let err = parse(&[resource, "list", "--all"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument, "{resource}");
        assert!(parse(&[resource, "list"]).is_ok(), "{resource}");
    }
}

// =============================================================
// global flags
// =============================================================

#[test]
fn cookie_flags_parse_before_subcommand() {
    let cli = parse(&["--session-cookie", "s-1", "--csrf-token", "t-1", "whoami"]).unwrap();
    assert_eq!(cli.session_cookie.as_deref(), Some("s-1"));
    assert_eq!(cli.csrf_token.as_deref(), Some("t-1"));
    assert!(matches!(cli.command, Command::Whoami));
}
