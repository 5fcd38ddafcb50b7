use super::*;

#[test]
fn parses_summary_command() {
    let cli = Cli::try_parse_from(["alsokal-cli", "summary"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Summary));
}

#[test]
fn actions_are_capped_by_default() {
    let cli = Cli::try_parse_from(["alsokal-cli", "actions"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Actions { all: false }));
}

#[test]
fn actions_all_flag() {
    let cli =
        Cli::try_parse_from(["alsokal-cli", "actions", "--all"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Actions { all: true }));
}

#[test]
fn data_dir_is_global() {
    let cli = Cli::try_parse_from(["alsokal-cli", "check", "--data-dir", "/srv/alsokal"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Check));
    assert_eq!(cli.data_dir, PathBuf::from("/srv/alsokal"));
}

#[test]
fn growth_accepts_platform_filter() {
    let cli = Cli::try_parse_from(["alsokal-cli", "growth", "--platform", "tiktok"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Growth { platform: Some(ref p) } if p == "tiktok"
    ));
}

#[test]
fn pipeline_and_revenue_parse() {
    let cli = Cli::try_parse_from(["alsokal-cli", "pipeline"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Pipeline));
    let cli = Cli::try_parse_from(["alsokal-cli", "revenue"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Revenue));
}

#[test]
fn missing_command_is_rejected() {
    assert!(Cli::try_parse_from(["alsokal-cli"]).is_err());
}

#[test]
fn unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["alsokal-cli", "collect"]).is_err());
}

#[test]
fn growth_platform_help_uses_data_file_names() {
    use clap::CommandFactory;

    let cmd = Cli::command();
    let growth = cmd
        .get_subcommands()
        .find(|c| c.get_name() == "growth")
        .expect("growth subcommand");
    let help = growth
        .get_arguments()
        .find(|a| a.get_id() == "platform")
        .and_then(|a| a.get_help())
        .expect("platform help")
        .to_string();
    assert!(help.contains("youtube-long"));
    assert!(!help.contains("youtube)"));
}
