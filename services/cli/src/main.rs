use urr24_cli::run;

fn main() {
    if let Err(err) = run() {
        eprintln!("compass error: {err}");
        std::process::exit(1);
    }
}
