use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let Some(out_dir) = env::var_os("OUT_DIR").map(PathBuf::from) else {
        return;
    };
    let completions_dir = out_dir.join("completions");

    if let Err(e) = fs::create_dir_all(&completions_dir) {
        println!("cargo:warning=Skipping shell completions: {}", e);
        return;
    }

    let mut cmd = clap::Command::new("quarry")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Quarry Contributors")
        .about("Extract markup, text, headings, links and quotes from web pages")
        .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-m --mode <MODE> "Extraction mode (html, text, headings, links, quotes or 1-5)")
                .default_value("text")
                .value_parser([
                    "html", "full", "markup", "text", "plain", "headings", "links", "quotes", "1", "2", "3", "4", "5",
                ]),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests"))
        .arg(clap::arg!(--head_check "Send a HEAD request before fetching and stop unless it returns 200"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    for shell in [
        clap_complete::Shell::Bash,
        clap_complete::Shell::Zsh,
        clap_complete::Shell::Fish,
        clap_complete::Shell::PowerShell,
    ] {
        if let Err(e) = clap_complete::generate_to(shell, &mut cmd, "quarry", &completions_dir) {
            println!("cargo:warning=Failed to generate {} completions: {}", shell, e);
        }
    }
}
