use std::{env, fs, path::PathBuf};

fn fetch_args(cmd: clap::Command) -> clap::Command {
    cmd.arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let output = || {
        clap::arg!(-o --output <FILE> "Output file (default: stdout)")
            .value_name("FILE")
            .value_parser(clap::value_parser!(std::path::PathBuf))
    };
    let format = |default: &'static str| {
        clap::arg!(-f --format <FORMAT> "Output format (json, text)")
            .value_name("FORMAT")
            .default_value(default)
            .value_parser(["json", "text"])
    };

    let mut cmd = clap::Command::new("citeloc")
        .about("Locate article content and citation fields in web pages")
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand(fetch_args(
            clap::Command::new("content")
                .about("Print the article content of a page, starting at its title")
                .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
                .arg(output())
                .arg(clap::arg!(--hint <TITLE> "Title hint to use instead of the page's own"))
                .arg(clap::arg!(--standardize "Print the standardized text instead of Markdown")),
        ))
        .subcommand(fetch_args(
            clap::Command::new("locate")
                .about("Locate citation values in a page and print their spans")
                .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
                .arg(clap::arg!(--title <TITLE> "Article title"))
                .arg(clap::arg!(--author <NAME> "Author name (repeatable)").action(clap::ArgAction::Append))
                .arg(clap::arg!(--date <DATE> "Publication date"))
                .arg(clap::arg!(--publisher <NAME> "Publisher name"))
                .arg(format("json"))
                .arg(clap::arg!(--pretty "Pretty print JSON output")),
        ))
        .subcommand(fetch_args(
            clap::Command::new("collect")
                .about("Fetch every page of a citation records file and locate its fields")
                .arg(clap::arg!(<RECORDS> "JSON file with an array of citation records"))
                .arg(output())
                .arg(clap::arg!(-w --workers <NUM> "Number of concurrent workers").default_value("8"))
                .arg(clap::arg!(--pretty "Pretty print JSON output")),
        ))
        .subcommand(fetch_args(
            clap::Command::new("evaluate")
                .about("Measure content trimming against a citation records file")
                .arg(clap::arg!(<RECORDS> "JSON file with an array of citation records"))
                .arg(
                    clap::arg!(--pages <DIR> "Read pages from this directory, named by record index")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(format("text"))
                .arg(clap::arg!(--pretty "Pretty print JSON output")),
        ));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "citeloc", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "citeloc", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "citeloc", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "citeloc", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
