use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("hamus")
        .version("0.2.0")
        .author("Hamus Contributors")
        .about("Extract phishing signals from a URL and score them")
        .arg(clap::arg!(<URL> "URL to extract features from and score"))
        .arg(
            clap::arg!(-m --model <FILE> "Classifier artifact (JSON); features only when omitted")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(clap::arg!(--opr_key <KEY> "Page-rank API token").value_name("KEY"))
        .arg(clap::arg!(--whois_key <KEY> "WHOIS API token").value_name("KEY"))
        .arg(clap::arg!(--timeout <SECS> "Page fetch timeout in seconds").default_value("5"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for the page fetch").value_name("UA"))
        .arg(clap::arg!(--offline "Skip all network lookups"))
        .arg(clap::arg!(-v --verbose "Enable progress logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "hamus", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "hamus", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "hamus", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "hamus", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
