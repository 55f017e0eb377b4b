use cfixture::cli;

fn main() {
    if let Err(err) = cli::run_cli() {
        eprintln!("Error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("Caused by: {cause}");
        }
        std::process::exit(1);
    }
}
