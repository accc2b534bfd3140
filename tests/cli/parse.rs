use clap::Parser;
use ticca::tooling::cli::{AgentCommands, Cli, Commands};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["ticca", "agent", "status"],
        vec!["ticca", "agent", "list", "--format", "json", "--enabled"],
        vec!["ticca", "agent", "show", "web-searcher", "--include-prompt"],
        vec!["ticca", "agent", "tools", "git-committer"],
        vec!["ticca", "agent", "validate", "git-committer", "--verbose"],
        vec!["ticca", "agent", "validate", "--all"],
        vec![
            "ticca",
            "agent",
            "create",
            "doc-writer",
            "--display-name",
            "Doc Writer",
            "--tools",
            "read_file,grep",
            "--prompt",
            "Write docs.",
            "--non-interactive",
        ],
        vec!["ticca", "agent", "remove", "doc-writer", "--force"],
        vec!["ticca", "session", "list", "--agent", "web-searcher", "--limit", "5"],
        vec!["ticca", "session", "show", "abc", "--format", "json"],
        vec!["ticca", "config", "show", "--format", "json"],
        vec!["ticca", "--workspace", "/tmp", "--log-level", "debug", "agent", "list"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_conflicting_arguments() {
    let rejected: Vec<Vec<&str>> = vec![
        vec!["ticca", "agent", "validate"],
        vec!["ticca", "agent", "validate", "git-committer", "--all"],
        vec![
            "ticca", "agent", "create", "x", "--prompt", "a", "--prompt-path", "b",
        ],
        vec![
            "ticca",
            "agent",
            "create",
            "x",
            "--interactive",
            "--non-interactive",
        ],
        vec!["ticca", "agent", "show"],
        vec!["ticca", "session", "list", "--limit", "many"],
    ];

    for args in rejected {
        assert!(
            Cli::try_parse_from(args.clone()).is_err(),
            "expected parse failure for args: {args:?}"
        );
    }
}

#[test]
fn create_tools_are_comma_separated() {
    let cli = Cli::try_parse_from([
        "ticca",
        "agent",
        "create",
        "doc-writer",
        "--tools",
        "read_file,grep,list_files",
    ])
    .unwrap();

    match cli.command {
        Commands::Agent {
            command: AgentCommands::Create { tools, .. },
        } => assert_eq!(tools, vec!["read_file", "grep", "list_files"]),
        _ => panic!("expected agent create"),
    }
}

#[test]
fn logging_flags_become_overrides() {
    let cli = Cli::try_parse_from([
        "ticca",
        "--verbose",
        "--log-format",
        "json",
        "config",
        "show",
    ])
    .unwrap();
    let overrides = cli.logging_overrides();
    assert!(overrides.verbose);
    assert_eq!(overrides.format.as_deref(), Some("json"));
    assert!(overrides.level.is_none());
}
