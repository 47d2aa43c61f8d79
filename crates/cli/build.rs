use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("seoscope")
        .version("0.3.0")
        .about("SEO and readability reports for web pages and text")
        .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, '-' for stdin, or raw text with --text"))
        .arg(clap::arg!(--text "Treat INPUT as raw text instead of a URL or file"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout; seoscope_report.pdf for pdf)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (pdf, json, text)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["pdf", "json", "text"]),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("10"))
        .arg(
            clap::Arg::new("user_agent")
                .long("user-agent")
                .value_name("UA")
                .help("Custom User-Agent for HTTP requests"),
        )
        .arg(clap::arg!(--top <NUM> "Number of keywords and phrases to keep").default_value("10"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "seoscope", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "seoscope", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "seoscope", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "seoscope", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
