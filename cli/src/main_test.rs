use super::*;

#[test]
fn defaults_point_at_local_backend() {
    let cli = Cli::try_parse_from(["verba-cli", "health"]).expect("parse");
    assert_eq!(cli.base_url, "http://127.0.0.1:8000");
    let credentials = cli.credentials().expect("credentials");
    assert_eq!(credentials.deployment, Deployment::Local);
    assert!(credentials.key.is_empty());
}

#[test]
fn deployment_is_validated() {
    let cli = Cli::try_parse_from(["verba-cli", "--deployment", "weaviate", "--url", "http://w:8080", "labels"])
        .expect("parse");
    assert_eq!(cli.credentials().expect("credentials").deployment, Deployment::Weaviate);

    let cli = Cli::try_parse_from(["verba-cli", "--deployment", "Cloud", "labels"]).expect("parse");
    assert!(matches!(cli.credentials(), Err(CliError::InvalidDeployment(d)) if d == "Cloud"));
}

#[test]
fn import_collects_paths_and_labels() {
    let cli = Cli::try_parse_from([
        "verba-cli",
        "import",
        "a.md",
        "b.pdf",
        "--label",
        "Docs",
        "--label",
        "Q3",
        "--overwrite",
    ])
    .expect("parse");
    let Command::Import(args) = cli.command else { panic!("expected import") };
    assert_eq!(args.paths, vec![PathBuf::from("a.md"), PathBuf::from("b.pdf")]);
    assert_eq!(args.labels, vec!["Docs".to_owned(), "Q3".to_owned()]);
    assert!(args.overwrite);
}

#[test]
fn nested_subcommands_parse() {
    let cli = Cli::try_parse_from(["verba-cli", "documents", "chunks", "doc-1", "--page", "2"]).expect("parse");
    assert!(matches!(
        cli.command,
        Command::Documents(DocumentsCommand {
            command: DocumentsSubcommand::Chunks { ref uuid, page: 2, page_size: 10 }
        }) if uuid == "doc-1"
    ));

    let cli = Cli::try_parse_from(["verba-cli", "-vv", "config", "set-rag", "rag.json"]).expect("parse");
    assert_eq!(cli.verbose, 2);
    assert!(matches!(cli.command, Command::Config(ConfigCommand { command: ConfigSubcommand::SetRag { .. } })));
}

#[test]
fn reset_modes_parse_case_insensitively() {
    assert_eq!(ResetMode::parse("documents"), Some(ResetMode::Documents));
    assert!(ResetMode::parse("everything").is_none());
}
