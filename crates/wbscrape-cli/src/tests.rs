use super::*;

#[test]
fn parses_category_by_name() {
    let cli = Cli::try_parse_from(["wbscrape", "category", "Детективы"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Category {
            ref target,
            refresh_catalogue: false,
            output: OutputArgs {
                no_sales: false,
                output_dir: None
            }
        } if target == "Детективы"
    ));
}

#[test]
fn parses_category_with_all_flags() {
    let cli = Cli::try_parse_from([
        "wbscrape",
        "category",
        "https://www.wildberries.ru/catalog/knigi/detektivy",
        "--refresh-catalogue",
        "--no-sales",
        "--output-dir",
        "/tmp/out",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Category {
            refresh_catalogue: true,
            output: OutputArgs {
                no_sales: true,
                output_dir: Some(ref dir)
            },
            ..
        } if dir == &PathBuf::from("/tmp/out")
    ));
}

#[test]
fn category_requires_a_target() {
    assert!(Cli::try_parse_from(["wbscrape", "category"]).is_err());
}

#[test]
fn search_collects_every_word() {
    let cli = Cli::try_parse_from(["wbscrape", "search", "iphone", "15", "case"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Search { ref keyword, .. } if keyword == &["iphone", "15", "case"]
    ));
}

#[test]
fn search_requires_a_keyword() {
    assert!(Cli::try_parse_from(["wbscrape", "search"]).is_err());
}

#[test]
fn parses_categories_filter() {
    let cli = Cli::try_parse_from(["wbscrape", "categories", "--filter", "книги"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Categories {
            filter: Some(ref f),
            refresh_catalogue: false
        } if f == "книги"
    ));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["wbscrape"]).is_err());
}
